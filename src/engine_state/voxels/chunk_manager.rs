//! # Chunk Manager Module
//!
//! This module provides the `ChunkManager` struct which owns every live chunk of the
//! world, keyed by chunk coordinate. It is the central coordinator for chunk creation,
//! neighbor wiring, block access across chunk boundaries and per-frame regeneration of
//! stale geometry.
//!
//! ## Neighbor Links
//!
//! Links are plain coordinates resolved through the registry on every access, so a
//! missing neighbor is an error value rather than a dangling reference. Links are
//! set in two steps: [`create_chunk`](ChunkManager::create_chunk) wires whatever
//! already exists, and
//! [`rearrange_chunk_neighbor_pointers`](ChunkManager::rearrange_chunk_neighbor_pointers)
//! re-resolves all of them once bulk creation is done.
//!
//! ## Frame Loop
//!
//! ```text
//! update_all_chunks  -> re-mesh every dirty, non-fringe chunk
//! load_all_chunks    -> hand every non-empty mesh to the render batch
//! ```

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, info, warn};

use super::{
    block::{block_side::BlockSide, block_type::BlockType, Block, BlockId, BlockRegistry, StaticBlockRegistry},
    chunk::{
        vegetation::{plan_trees, PlacementMode},
        BlockAccessError, BlockAddress, Chunk, ChunkNeighbors, ChunkState, LocalBlockSource,
        CHUNK_HEIGHT,
    },
    coords::{to_chunk_coords, to_local_coords, ChunkCoord},
    generation::GenerationContext,
};
use crate::engine_state::rendering::{
    batch::RenderBatch,
    draw_command::DrawCommand,
    meshing::{generate_culled_mesh, MeshOutcome},
};

/// Follows neighbor links from `coord` until `local` lands inside a chunk.
///
/// # Returns
/// The owning chunk, its coordinate and the position in its space, or why no chunk
/// owns it.
fn resolve(
    chunks: &HashMap<ChunkCoord, Chunk>,
    mut coord: ChunkCoord,
    mut local: Point3<i32>,
) -> Result<(ChunkCoord, &Chunk, Point3<i32>), BlockAccessError> {
    loop {
        let chunk = chunks
            .get(&coord)
            .ok_or(BlockAccessError::NoChunk { coord })?;
        match Chunk::locate(local) {
            BlockAddress::Local(local) => return Ok((coord, chunk, local)),
            BlockAddress::OutOfHeight => return Err(BlockAccessError::OutOfHeight { y: local.y }),
            BlockAddress::Neighbor { side, local: rebased } => {
                coord = chunk
                    .neighbor(side)
                    .ok_or(BlockAccessError::MissingNeighbor { coord, side })?;
                local = rebased;
            }
        }
    }
}

/// Read-only block lookups in one chunk's local space, following its neighbor links.
///
/// Cells inside the chunk are read straight from its grid; only cells past its edge
/// go through the registry.
pub struct ChunkView<'a> {
    chunks: &'a HashMap<ChunkCoord, Chunk>,
    coord: ChunkCoord,
    chunk: Option<&'a Chunk>,
}

impl LocalBlockSource for ChunkView<'_> {
    fn get_local_block(&self, local: Point3<i32>) -> Block {
        if Chunk::contains(local) {
            return self.chunk.map_or(Block::NULL, |chunk| chunk.block_at(local));
        }
        match resolve(self.chunks, self.coord, local) {
            Ok((_, owner, local)) => owner.block_at(local),
            Err(_) => Block::NULL,
        }
    }
}

/// Owns every live chunk of the world.
pub struct ChunkManager {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkCoord, Chunk>,
    registry: Box<dyn BlockRegistry>,
    /// Buffer slot handed to the next created chunk
    next_slot: usize,
    max_vertices_per_chunk: usize,
}

impl ChunkManager {
    /// Creates an empty manager backed by the built-in block registry.
    pub fn new(max_vertices_per_chunk: usize) -> Self {
        Self::with_registry(max_vertices_per_chunk, Box::new(StaticBlockRegistry))
    }

    /// Creates an empty manager that takes block attributes from `registry`.
    pub fn with_registry(max_vertices_per_chunk: usize, registry: Box<dyn BlockRegistry>) -> Self {
        ChunkManager {
            chunks: HashMap::new(),
            registry,
            next_slot: 0,
            max_vertices_per_chunk,
        }
    }

    /// The registry block attributes come from.
    pub fn registry(&self) -> &dyn BlockRegistry {
        self.registry.as_ref()
    }

    /// Number of registered chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// `true` if no chunk is registered.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The chunk at grid position `coord`.
    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// The chunk owning world position `world_pos`.
    pub fn get_chunk_at(&self, world_pos: Point3<f32>) -> Option<&Chunk> {
        self.chunks.get(&to_chunk_coords(world_pos))
    }

    /// Every registered chunk, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Block lookups in the local space of chunk `coord`.
    pub fn view(&self, coord: ChunkCoord) -> ChunkView<'_> {
        ChunkView {
            chunks: &self.chunks,
            coord,
            chunk: self.chunks.get(&coord),
        }
    }

    fn existing_neighbors(&self, coord: ChunkCoord) -> ChunkNeighbors {
        let mut neighbors = ChunkNeighbors::default();
        for side in BlockSide::horizontal() {
            if let Some(offset) = side.chunk_offset() {
                let neighbor = coord + offset;
                if self.chunks.contains_key(&neighbor) {
                    neighbors.set(side, Some(neighbor));
                }
            }
        }
        neighbors
    }

    /// Allocates an ungenerated chunk at `coord` and links it to the neighbors that
    /// already exist. Existing chunks are not linked back.
    ///
    /// # Returns
    /// `true` if a chunk was created, `false` if one already existed or no buffer slot
    /// could be addressed.
    pub fn create_chunk(&mut self, coord: ChunkCoord) -> bool {
        if self.chunks.contains_key(&coord) {
            return false;
        }

        let draw_command = match DrawCommand::for_slot(self.next_slot, self.max_vertices_per_chunk) {
            Some(draw_command) => draw_command,
            None => {
                warn!(
                    "No addressable buffer slot left for chunk ({}, {})",
                    coord.x, coord.y
                );
                return false;
            }
        };
        self.next_slot += 1;

        let mut chunk = Chunk::new(coord, draw_command);
        chunk.set_neighbors(self.existing_neighbors(coord));
        self.chunks.insert(coord, chunk);
        true
    }

    /// Re-resolves the four links of every chunk from the current registry and
    /// recomputes their fringe flags. Links are symmetric afterwards.
    pub fn rearrange_chunk_neighbor_pointers(&mut self) {
        let rewired: Vec<(ChunkCoord, ChunkNeighbors)> = self
            .chunks
            .keys()
            .map(|&coord| (coord, self.existing_neighbors(coord)))
            .collect();

        for (coord, neighbors) in rewired {
            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.set_neighbors(neighbors);
            }
        }
    }

    /// Generates the terrain of chunk `coord`.
    ///
    /// # Returns
    /// `false` if there is no chunk at `coord`.
    pub fn generate_terrain(&mut self, coord: ChunkCoord, ctx: &GenerationContext) -> bool {
        match self.chunks.get_mut(&coord) {
            Some(chunk) => {
                chunk.generate_terrain(ctx, self.registry.as_ref());
                true
            }
            None => false,
        }
    }

    /// Plants the trees of chunk `coord`. Leaves reaching past the chunk edge are
    /// written into the linked neighbors; placements with no owner are dropped.
    ///
    /// # Returns
    /// The number of blocks placed.
    pub fn generate_vegetation(&mut self, coord: ChunkCoord, ctx: &GenerationContext) -> usize {
        match self.chunks.get(&coord) {
            Some(chunk) if chunk.state() != ChunkState::Uninitialized && !chunk.is_placeholder() => {}
            _ => return 0,
        }

        let mut placed = 0;
        for placement in plan_trees(coord, ctx) {
            if placement.mode == PlacementMode::IntoAir
                && !self.get_local_block(coord, placement.local).is_air()
            {
                continue;
            }
            match self.set_local_block(coord, placement.local, placement.block_type.id()) {
                Ok(()) => placed += 1,
                Err(err) => debug!("Skipped {:?} placement: {}", placement.block_type, err),
            }
        }
        placed
    }

    /// Creates, wires and generates every chunk within the configured load radius.
    ///
    /// All chunks get terrain before any gets vegetation, so trees can grow into
    /// already generated neighbors.
    ///
    /// # Returns
    /// The number of chunks created.
    pub fn load_region(&mut self, ctx: &GenerationContext) -> usize {
        let radius = ctx.config().load_radius;
        let coords: Vec<ChunkCoord> = (-radius..=radius)
            .flat_map(|x| (-radius..=radius).map(move |z| ChunkCoord::new(x, z)))
            .collect();

        let created = coords
            .iter()
            .filter(|&&coord| self.create_chunk(coord))
            .count();
        self.rearrange_chunk_neighbor_pointers();

        for &coord in &coords {
            self.generate_terrain(coord, ctx);
        }
        let placed: usize = coords
            .iter()
            .map(|&coord| self.generate_vegetation(coord, ctx))
            .sum();

        info!(
            "Loaded {} chunks within radius {} ({} vegetation blocks)",
            created, radius, placed
        );
        created
    }

    /// The block at `local` in the space of chunk `coord`, following neighbor links.
    ///
    /// Returns [`Block::NULL`] when no loaded, generated chunk owns the position.
    pub fn get_local_block(&self, coord: ChunkCoord, local: Point3<i32>) -> Block {
        self.view(coord).get_local_block(local)
    }

    /// Material of the block at `local` in chunk `coord`, if it is a known type.
    pub fn block_type_at(&self, coord: ChunkCoord, local: Point3<i32>) -> Option<BlockType> {
        BlockType::from_id(self.get_local_block(coord, local).block_id)
    }

    /// Sets the block at `local` in the space of chunk `coord` to material `block_id`,
    /// with its attributes taken from the registry.
    pub fn set_local_block(
        &mut self,
        coord: ChunkCoord,
        local: Point3<i32>,
        block_id: BlockId,
    ) -> Result<(), BlockAccessError> {
        let block = self.registry.make_block(block_id);
        self.write_local_block(coord, local, block)
    }

    /// Replaces the block at `local` in the space of chunk `coord` with air.
    pub fn remove_local_block(
        &mut self,
        coord: ChunkCoord,
        local: Point3<i32>,
    ) -> Result<(), BlockAccessError> {
        self.write_local_block(coord, local, Block::AIR)
    }

    fn write_local_block(
        &mut self,
        coord: ChunkCoord,
        local: Point3<i32>,
        block: Block,
    ) -> Result<(), BlockAccessError> {
        let (owner, _, local) = resolve(&self.chunks, coord, local)?;
        self.chunks
            .get_mut(&owner)
            .ok_or(BlockAccessError::NoChunk { coord: owner })?
            .write_block(local, block)?;
        self.mark_block_changed(owner, local);
        Ok(())
    }

    /// Marks chunk `coord` dirty, and the neighbors that share the boundary plane
    /// `local` lies on.
    pub fn mark_block_changed(&mut self, coord: ChunkCoord, local: Point3<i32>) {
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return;
        };
        chunk.mark_dirty();

        let neighbors: Vec<ChunkCoord> = Chunk::boundary_sides(local)
            .filter_map(|side| chunk.neighbor(side))
            .collect();
        for neighbor in neighbors {
            if let Some(neighbor) = self.chunks.get_mut(&neighbor) {
                neighbor.mark_dirty();
            }
        }
    }

    /// The block at world position `world_pos`, or [`Block::NULL`] outside the loaded
    /// world.
    pub fn get_block(&self, world_pos: Point3<f32>) -> Block {
        let coord = to_chunk_coords(world_pos);
        if !self.chunks.contains_key(&coord) {
            debug!(
                "No chunk at ({}, {}) for block read at {:?}",
                coord.x, coord.y, world_pos
            );
            return Block::NULL;
        }
        self.get_local_block(coord, to_local_coords(coord, world_pos))
    }

    /// Sets the block at world position `world_pos` to material `block_id`.
    ///
    /// Failures are logged and returned; the world is left unchanged.
    pub fn set_block(&mut self, world_pos: Point3<f32>, block_id: BlockId) -> Result<(), BlockAccessError> {
        let block = self.registry.make_block(block_id);
        self.write_block(world_pos, block)
    }

    /// Replaces the block at world position `world_pos` with air.
    pub fn remove_block(&mut self, world_pos: Point3<f32>) -> Result<(), BlockAccessError> {
        self.write_block(world_pos, Block::AIR)
    }

    fn write_block(&mut self, world_pos: Point3<f32>, block: Block) -> Result<(), BlockAccessError> {
        let coord = to_chunk_coords(world_pos);
        if !self.chunks.contains_key(&coord) {
            let y = world_pos.y.floor() as i32;
            if !(0..CHUNK_HEIGHT).contains(&y) {
                return Err(BlockAccessError::OutOfHeight { y });
            }
            warn!(
                "Tried to modify a block at {:?} but there is no chunk at ({}, {})",
                world_pos, coord.x, coord.y
            );
            return Err(BlockAccessError::NoChunk { coord });
        }

        self.write_local_block(coord, to_local_coords(coord, world_pos), block)
            .inspect_err(|err| warn!("Block write at {:?} refused: {}", world_pos, err))
    }

    /// Rebuilds the geometry of chunk `coord` and marks it clean.
    ///
    /// # Returns
    /// `None` if there is no generated chunk at `coord`.
    pub fn generate_render_data(&mut self, coord: ChunkCoord) -> Option<MeshOutcome> {
        let chunk = self.chunks.get(&coord)?;
        if chunk.state() == ChunkState::Uninitialized {
            return None;
        }

        let mesh = generate_culled_mesh(
            chunk,
            &self.view(coord),
            self.registry.as_ref(),
            self.max_vertices_per_chunk,
        );
        Some(self.chunks.get_mut(&coord)?.store_render_data(mesh))
    }

    /// Re-meshes every dirty chunk that has all four neighbors.
    ///
    /// # Returns
    /// The number of chunks re-meshed.
    pub fn update_all_chunks(&mut self) -> usize {
        let mut pending = Vec::new();
        for (coord, chunk) in &self.chunks {
            match chunk.state() {
                ChunkState::Clean => {}
                _ if chunk.is_fringe() => {}
                ChunkState::Dirty => pending.push(*coord),
                ChunkState::Uninitialized => info!(
                    "Chunk ({}, {}) has no terrain yet, skipping its mesh",
                    coord.x, coord.y
                ),
            }
        }

        pending
            .into_iter()
            .filter(|&coord| self.generate_render_data(coord).is_some())
            .count()
    }

    /// Forwards every non-empty, non-fringe mesh to `batch`.
    ///
    /// # Returns
    /// The number of chunks submitted.
    pub fn load_all_chunks(&self, batch: &mut dyn RenderBatch) -> usize {
        let mut submitted = 0;
        for chunk in self.chunks.values() {
            if chunk.is_fringe() || chunk.vertex_count() == 0 {
                continue;
            }
            batch.add_vertices(chunk.vertices());
            submitted += 1;
        }
        submitted
    }

    /// Releases every chunk and resets buffer slot assignment.
    pub fn free_all_chunks(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.free();
        }
        info!("Freed {} chunks", self.chunks.len());
        self.chunks.clear();
        self.next_slot = 0;
    }

    /// Counts chunks per lifecycle state as `(uninitialized, dirty, clean)`.
    pub fn state_counts(&self) -> (usize, usize, usize) {
        self.chunks
            .values()
            .fold((0, 0, 0), |(u, d, c), chunk| match chunk.state() {
                ChunkState::Uninitialized => (u + 1, d, c),
                ChunkState::Dirty => (u, d + 1, c),
                ChunkState::Clean => (u, d, c + 1),
            })
    }

    /// Number of chunks that are missing at least one neighbor.
    pub fn fringe_count(&self) -> usize {
        self.chunks.values().filter(|chunk| chunk.is_fringe()).count()
    }
}
