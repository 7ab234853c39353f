//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one 16×256×16 column of the world, the
//! unit of generation, meshing and neighbor linkage.
//!
//! ## Storage
//!
//! Blocks live in a dense boxed slice indexed `y * 256 + x * 16 + z`, so a linear walk
//! over the slice visits blocks in the (y, x, z) order the mesher uses.
//!
//! ## Neighbors
//!
//! A chunk never holds references to other chunks. Each of its four horizontal
//! neighbor links is an optional [`ChunkCoord`] that the
//! [`ChunkManager`](super::chunk_manager::ChunkManager) resolves through its registry,
//! so an absent or stale neighbor degrades to [`Block::NULL`] instead of a dangling
//! access.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --generate_terrain--> Dirty --store_render_data--> Clean
//!                                       ^                            |
//!                                       +-------block mutation-------+
//! ```

use std::{error::Error, fmt};

use cgmath::Point3;
use log::warn;

use super::{
    block::{block_side::BlockSide, Block, BlockRegistry},
    coords::{chunk_origin, to_local_coords, ChunkCoord},
    generation::GenerationContext,
};
use crate::engine_state::rendering::{
    draw_command::DrawCommand,
    meshing::{Mesh, MeshOutcome},
    vertex::BlockVertex,
};

pub mod chunk_iteration;
pub mod terrain;
pub mod vegetation;

/// Blocks along the X axis.
pub const CHUNK_LENGTH: i32 = 16;
/// Blocks along the Z axis.
pub const CHUNK_WIDTH: i32 = 16;
/// Blocks along the Y axis. There are no chunks above or below.
pub const CHUNK_HEIGHT: i32 = 256;
/// Number of blocks in one horizontal layer.
pub const CHUNK_LAYER_SIZE: usize = (CHUNK_LENGTH * CHUNK_WIDTH) as usize;
/// Total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_LAYER_SIZE * CHUNK_HEIGHT as usize;

/// Where a chunk's geometry stands relative to its blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// Grid allocated, terrain not generated. Reads return NULL, writes are refused.
    Uninitialized,
    /// Blocks changed since the last mesh (or there never was one).
    Dirty,
    /// Geometry matches the blocks.
    Clean,
}

/// The four horizontal neighbor links of a chunk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkNeighbors {
    /// +X
    pub front: Option<ChunkCoord>,
    /// -X
    pub back: Option<ChunkCoord>,
    /// -Z
    pub left: Option<ChunkCoord>,
    /// +Z
    pub right: Option<ChunkCoord>,
}

impl ChunkNeighbors {
    /// The link on `side`. Always `None` for `TOP`/`BOTTOM`.
    pub fn get(&self, side: BlockSide) -> Option<ChunkCoord> {
        match side {
            BlockSide::FRONT => self.front,
            BlockSide::BACK => self.back,
            BlockSide::LEFT => self.left,
            BlockSide::RIGHT => self.right,
            BlockSide::TOP | BlockSide::BOTTOM => None,
        }
    }

    /// Replaces the link on `side`. Ignored for `TOP`/`BOTTOM`.
    pub fn set(&mut self, side: BlockSide, coord: Option<ChunkCoord>) {
        match side {
            BlockSide::FRONT => self.front = coord,
            BlockSide::BACK => self.back = coord,
            BlockSide::LEFT => self.left = coord,
            BlockSide::RIGHT => self.right = coord,
            BlockSide::TOP | BlockSide::BOTTOM => {}
        }
    }

    /// `true` when all four links are present.
    pub fn is_complete(&self) -> bool {
        self.front.is_some() && self.back.is_some() && self.left.is_some() && self.right.is_some()
    }
}

/// Result of routing a local coordinate that may lie outside the chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockAddress {
    /// The coordinate is inside this chunk.
    Local(Point3<i32>),
    /// The coordinate belongs to the neighbor on `side`, at `local` in its space.
    Neighbor {
        /// Direction of the owning neighbor
        side: BlockSide,
        /// Position in the neighbor's local space
        local: Point3<i32>,
    },
    /// Above or below the world. No chunk owns it.
    OutOfHeight,
}

/// Why a block write was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockAccessError {
    /// `y` is outside `[0, CHUNK_HEIGHT)`.
    OutOfHeight {
        /// The offending height
        y: i32,
    },
    /// The write crosses into a neighbor `coord` has no link to.
    MissingNeighbor {
        /// Chunk the lookup was routed from
        coord: ChunkCoord,
        /// Direction of the missing link
        side: BlockSide,
    },
    /// The owning chunk has no terrain yet.
    NotGenerated {
        /// The ungenerated chunk
        coord: ChunkCoord,
    },
    /// No chunk is registered at `coord`.
    NoChunk {
        /// The empty registry key
        coord: ChunkCoord,
    },
}

impl fmt::Display for BlockAccessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BlockAccessError::OutOfHeight { y } => {
                write!(f, "y = {} is outside the world height [0, {})", y, CHUNK_HEIGHT)
            }
            BlockAccessError::MissingNeighbor { coord, side } => write!(
                f,
                "chunk ({}, {}) has no {:?} neighbor",
                coord.x, coord.y, side
            ),
            BlockAccessError::NotGenerated { coord } => {
                write!(f, "chunk ({}, {}) has not been generated", coord.x, coord.y)
            }
            BlockAccessError::NoChunk { coord } => {
                write!(f, "no chunk at ({}, {})", coord.x, coord.y)
            }
        }
    }
}

impl Error for BlockAccessError {}

/// Anything that can answer block queries in one chunk's local coordinate space,
/// including coordinates one step outside it.
pub trait LocalBlockSource {
    /// The block at `local`, or [`Block::NULL`] if nothing owns it.
    fn get_local_block(&self, local: Point3<i32>) -> Block;
}

/// One 16×256×16 column of the world.
pub struct Chunk {
    coord: ChunkCoord,
    blocks: Box<[Block]>,
    vertices: Vec<BlockVertex>,
    draw_command: DrawCommand,
    state: ChunkState,
    neighbors: ChunkNeighbors,
    is_fringe: bool,
    is_placeholder: bool,
}

impl Chunk {
    /// Allocates a zeroed, ungenerated chunk.
    ///
    /// # Arguments
    /// * `coord` - Position on the chunk grid
    /// * `draw_command` - This chunk's slot in the shared geometry buffer
    pub fn new(coord: ChunkCoord, draw_command: DrawCommand) -> Self {
        Chunk {
            coord,
            blocks: vec![<Block as bytemuck::Zeroable>::zeroed(); CHUNK_VOLUME].into_boxed_slice(),
            vertices: Vec::new(),
            draw_command,
            state: ChunkState::Uninitialized,
            neighbors: ChunkNeighbors::default(),
            is_fringe: true,
            is_placeholder: false,
        }
    }

    /// Position on the chunk grid.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// All four neighbor links.
    pub fn neighbors(&self) -> &ChunkNeighbors {
        &self.neighbors
    }

    /// The neighbor link on `side`.
    pub fn neighbor(&self, side: BlockSide) -> Option<ChunkCoord> {
        self.neighbors.get(side)
    }

    /// Replaces all four links and recomputes the fringe flag.
    pub fn set_neighbors(&mut self, neighbors: ChunkNeighbors) {
        self.neighbors = neighbors;
        self.is_fringe = !neighbors.is_complete();
    }

    /// A fringe chunk is missing at least one neighbor and is never meshed.
    pub fn is_fringe(&self) -> bool {
        self.is_fringe
    }

    /// `true` if the chunk lies outside the load radius and was filled with air as a
    /// stand-in rather than generated from the noise field.
    pub fn is_placeholder(&self) -> bool {
        self.is_placeholder
    }

    /// Geometry from the last mesh build.
    pub fn vertices(&self) -> &[BlockVertex] {
        &self.vertices
    }

    /// Number of vertices from the last mesh build.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// This chunk's slot record in the shared geometry buffer.
    pub fn draw_command(&self) -> &DrawCommand {
        &self.draw_command
    }

    /// Flips the chunk to `Dirty` unless it has never been generated.
    pub fn mark_dirty(&mut self) {
        if self.state != ChunkState::Uninitialized {
            self.state = ChunkState::Dirty;
        }
    }

    /// `true` if `local` lies inside this chunk's grid.
    pub fn contains(local: Point3<i32>) -> bool {
        (0..CHUNK_LENGTH).contains(&local.x)
            && (0..CHUNK_HEIGHT).contains(&local.y)
            && (0..CHUNK_WIDTH).contains(&local.z)
    }

    /// Routes a local coordinate: inside the grid, to a neighbor, or out of the world.
    ///
    /// X is checked first, then Z, so a diagonal coordinate hops to the X neighbor,
    /// which then routes the remaining Z offset itself. Height is only checked once the
    /// horizontal position is local.
    pub fn locate(local: Point3<i32>) -> BlockAddress {
        if local.x >= CHUNK_LENGTH {
            return BlockAddress::Neighbor {
                side: BlockSide::FRONT,
                local: Point3::new(local.x - CHUNK_LENGTH, local.y, local.z),
            };
        }
        if local.x < 0 {
            return BlockAddress::Neighbor {
                side: BlockSide::BACK,
                local: Point3::new(local.x + CHUNK_LENGTH, local.y, local.z),
            };
        }
        if local.z >= CHUNK_WIDTH {
            return BlockAddress::Neighbor {
                side: BlockSide::RIGHT,
                local: Point3::new(local.x, local.y, local.z - CHUNK_WIDTH),
            };
        }
        if local.z < 0 {
            return BlockAddress::Neighbor {
                side: BlockSide::LEFT,
                local: Point3::new(local.x, local.y, local.z + CHUNK_WIDTH),
            };
        }
        if !(0..CHUNK_HEIGHT).contains(&local.y) {
            return BlockAddress::OutOfHeight;
        }
        BlockAddress::Local(local)
    }

    /// Linear index of an in-bounds local coordinate.
    pub fn local_index(local: Point3<i32>) -> usize {
        local.y as usize * CHUNK_LAYER_SIZE + (local.x * CHUNK_WIDTH + local.z) as usize
    }

    /// Inverse of [`local_index`](Self::local_index).
    pub fn index_to_local(index: usize) -> Point3<i32> {
        let y = index / CHUNK_LAYER_SIZE;
        let rest = (index % CHUNK_LAYER_SIZE) as i32;
        Point3::new(rest / CHUNK_WIDTH, y as i32, rest % CHUNK_WIDTH)
    }

    /// The block at an in-bounds local coordinate.
    ///
    /// Returns [`Block::NULL`] for ungenerated chunks and for coordinates outside the
    /// grid; neighbor routing is the manager's job.
    pub fn block_at(&self, local: Point3<i32>) -> Block {
        if self.state == ChunkState::Uninitialized || !Self::contains(local) {
            return Block::NULL;
        }
        self.blocks
            .get(Self::local_index(local))
            .copied()
            .unwrap_or(Block::NULL)
    }

    /// Stores `block` at an in-bounds local coordinate.
    ///
    /// Dirty propagation is left to the caller, see
    /// [`boundary_sides`](Self::boundary_sides).
    pub fn write_block(&mut self, local: Point3<i32>, block: Block) -> Result<(), BlockAccessError> {
        if self.state == ChunkState::Uninitialized {
            return Err(BlockAccessError::NotGenerated { coord: self.coord });
        }
        match Self::locate(local) {
            BlockAddress::Local(local) => {
                let index = Self::local_index(local);
                match self.blocks.get_mut(index) {
                    Some(slot) => {
                        *slot = block;
                        Ok(())
                    }
                    None => Err(BlockAccessError::NotGenerated { coord: self.coord }),
                }
            }
            BlockAddress::Neighbor { side, .. } => Err(BlockAccessError::MissingNeighbor {
                coord: self.coord,
                side,
            }),
            BlockAddress::OutOfHeight => Err(BlockAccessError::OutOfHeight { y: local.y }),
        }
    }

    /// The neighbors whose meshes can see a block at `local`: the X neighbor when the
    /// block sits on an X boundary plane, the Z neighbor for a Z boundary plane.
    pub fn boundary_sides(local: Point3<i32>) -> impl Iterator<Item = BlockSide> {
        let x_side = if local.x == 0 {
            Some(BlockSide::BACK)
        } else if local.x == CHUNK_LENGTH - 1 {
            Some(BlockSide::FRONT)
        } else {
            None
        };
        let z_side = if local.z == 0 {
            Some(BlockSide::LEFT)
        } else if local.z == CHUNK_WIDTH - 1 {
            Some(BlockSide::RIGHT)
        } else {
            None
        };
        x_side.into_iter().chain(z_side)
    }

    /// Converts a world position to this chunk's local coordinates.
    pub fn world_to_local(&self, world_pos: Point3<f32>) -> Point3<i32> {
        to_local_coords(self.coord, world_pos)
    }

    /// World X/Z of this chunk's `(0, 0)` column.
    pub fn world_origin(&self) -> (i32, i32) {
        chunk_origin(self.coord)
    }

    /// Fills the grid from the noise field and leaves the chunk `Dirty`.
    ///
    /// Chunks outside the load radius are filled with air and flagged as placeholders.
    pub fn generate_terrain(&mut self, ctx: &GenerationContext, registry: &dyn BlockRegistry) {
        self.blocks.fill(<Block as bytemuck::Zeroable>::zeroed());
        self.is_placeholder = !ctx.is_within_load_radius(self.coord);

        if self.is_placeholder {
            self.blocks.fill(Block::AIR);
        } else {
            terrain::fill_columns(self, ctx, registry);
        }

        self.state = ChunkState::Dirty;
    }

    /// Installs freshly built geometry and marks the chunk `Clean`.
    ///
    /// # Returns
    /// Whether the mesh is complete or had to drop faces to fit the buffer slot.
    pub fn store_render_data(&mut self, mesh: Mesh) -> MeshOutcome {
        let outcome = mesh.outcome();
        if let MeshOutcome::Truncated { dropped_faces, .. } = outcome {
            warn!(
                "Chunk ({}, {}) exceeded the maximum vertex capacity, dropped {} faces",
                self.coord.x, self.coord.y, dropped_faces
            );
        }

        let mut vertices = mesh.into_vertices();
        vertices.shrink_to_fit();
        self.vertices = vertices;
        self.draw_command.vertex_count = self.vertices.len() as u32;
        self.state = ChunkState::Clean;

        outcome
    }

    /// Releases the block grid and geometry. The chunk reads as NULL afterwards.
    pub fn free(&mut self) {
        self.blocks = Box::new([]);
        self.vertices = Vec::new();
        self.draw_command.vertex_count = 0;
        self.state = ChunkState::Uninitialized;
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub(crate) fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// A lone chunk answers for itself only; everything outside it is NULL.
impl LocalBlockSource for Chunk {
    fn get_local_block(&self, local: Point3<i32>) -> Block {
        self.block_at(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{block_type::BlockType, StaticBlockRegistry};

    pub(crate) fn generated_chunk(coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord, DrawCommand::default());
        chunk.blocks_mut().fill(Block::AIR);
        chunk.state = ChunkState::Dirty;
        chunk
    }

    #[test]
    fn index_round_trips_and_follows_y_x_z_order() {
        assert_eq!(Chunk::local_index(Point3::new(0, 0, 1)), 1);
        assert_eq!(Chunk::local_index(Point3::new(1, 0, 0)), 16);
        assert_eq!(Chunk::local_index(Point3::new(0, 1, 0)), 256);
        assert_eq!(Chunk::local_index(Point3::new(15, 255, 15)), CHUNK_VOLUME - 1);
        let local = Point3::new(7, 130, 3);
        assert_eq!(Chunk::index_to_local(Chunk::local_index(local)), local);
    }

    #[test]
    fn locate_routes_to_neighbors() {
        assert_eq!(
            Chunk::locate(Point3::new(16, 5, 3)),
            BlockAddress::Neighbor { side: BlockSide::FRONT, local: Point3::new(0, 5, 3) }
        );
        assert_eq!(
            Chunk::locate(Point3::new(-1, 5, 3)),
            BlockAddress::Neighbor { side: BlockSide::BACK, local: Point3::new(15, 5, 3) }
        );
        assert_eq!(
            Chunk::locate(Point3::new(4, 5, 16)),
            BlockAddress::Neighbor { side: BlockSide::RIGHT, local: Point3::new(4, 5, 0) }
        );
        assert_eq!(
            Chunk::locate(Point3::new(4, 5, -1)),
            BlockAddress::Neighbor { side: BlockSide::LEFT, local: Point3::new(4, 5, 15) }
        );
        assert_eq!(Chunk::locate(Point3::new(4, 256, 4)), BlockAddress::OutOfHeight);
        assert_eq!(Chunk::locate(Point3::new(4, -1, 4)), BlockAddress::OutOfHeight);
        assert_eq!(
            Chunk::locate(Point3::new(4, 0, 4)),
            BlockAddress::Local(Point3::new(4, 0, 4))
        );
    }

    #[test]
    fn ungenerated_chunk_reads_null_and_refuses_writes() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), DrawCommand::default());
        assert!(chunk.block_at(Point3::new(0, 0, 0)).is_null());
        assert_eq!(
            chunk.write_block(Point3::new(0, 0, 0), Block::AIR),
            Err(BlockAccessError::NotGenerated { coord: ChunkCoord::new(0, 0) })
        );
    }

    #[test]
    fn write_outside_grid_is_refused() {
        let mut chunk = generated_chunk(ChunkCoord::new(2, 3));
        assert_eq!(
            chunk.write_block(Point3::new(16, 10, 0), Block::AIR),
            Err(BlockAccessError::MissingNeighbor {
                coord: ChunkCoord::new(2, 3),
                side: BlockSide::FRONT
            })
        );
        assert_eq!(
            chunk.write_block(Point3::new(3, 300, 0), Block::AIR),
            Err(BlockAccessError::OutOfHeight { y: 300 })
        );
    }

    #[test]
    fn written_blocks_read_back() {
        let mut chunk = generated_chunk(ChunkCoord::new(0, 0));
        let stone = StaticBlockRegistry.make_block(BlockType::STONE.id());
        chunk.write_block(Point3::new(3, 40, 9), stone).unwrap();
        assert_eq!(chunk.block_at(Point3::new(3, 40, 9)), stone);
        assert!(chunk.get_local_block(Point3::new(-1, 40, 9)).is_null());
    }

    #[test]
    fn boundary_sides_follow_the_planes() {
        let sides = |x, z| Chunk::boundary_sides(Point3::new(x, 10, z)).collect::<Vec<_>>();
        assert_eq!(sides(0, 5), vec![BlockSide::BACK]);
        assert_eq!(sides(15, 5), vec![BlockSide::FRONT]);
        assert_eq!(sides(5, 0), vec![BlockSide::LEFT]);
        assert_eq!(sides(5, 15), vec![BlockSide::RIGHT]);
        assert_eq!(sides(0, 15), vec![BlockSide::BACK, BlockSide::RIGHT]);
        assert!(sides(5, 5).is_empty());
    }

    #[test]
    fn fringe_follows_neighbor_completeness() {
        let mut chunk = generated_chunk(ChunkCoord::new(0, 0));
        assert!(chunk.is_fringe());
        let mut neighbors = ChunkNeighbors::default();
        for side in BlockSide::horizontal() {
            let offset = side.chunk_offset().unwrap();
            neighbors.set(side, Some(ChunkCoord::new(offset.x, offset.y)));
        }
        chunk.set_neighbors(neighbors);
        assert!(!chunk.is_fringe());
        neighbors.set(BlockSide::LEFT, None);
        chunk.set_neighbors(neighbors);
        assert!(chunk.is_fringe());
    }

    #[test]
    fn storing_render_data_cleans_and_mark_dirty_reverts() {
        let mut chunk = generated_chunk(ChunkCoord::new(0, 0));
        chunk.store_render_data(Mesh::new(36));
        assert_eq!(chunk.state(), ChunkState::Clean);
        chunk.mark_dirty();
        assert_eq!(chunk.state(), ChunkState::Dirty);
    }

    #[test]
    fn freed_chunk_reads_null() {
        let mut chunk = generated_chunk(ChunkCoord::new(0, 0));
        chunk.free();
        assert_eq!(chunk.state(), ChunkState::Uninitialized);
        assert!(chunk.block_at(Point3::new(1, 1, 1)).is_null());
        chunk.mark_dirty();
        assert_eq!(chunk.state(), ChunkState::Uninitialized);
    }
}
