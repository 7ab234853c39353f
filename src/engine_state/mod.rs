//! # Engine State Module
//!
//! The state that drives the voxel world from one frame to the next.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the chunk manager, the generation context and the render batch
//! * `config` - World configuration and its loading
//! * `rendering` - Vertex layout, draw commands, the mesher and the render batch
//! * `voxels` - Blocks, chunks, noise and the chunk manager
//!
//! ## Frame Flow
//!
//! 1. `load_world` creates, wires and generates every chunk in the load radius
//! 2. `tick` re-meshes dirty chunks and refills the render batch
//! 3. `shutdown` frees every chunk

use log::info;
use web_time::Instant;

use config::WorldConfig;
use rendering::batch::ChunkBatch;
use voxels::{chunk_manager::ChunkManager, generation::GenerationContext};

pub mod config;
pub mod rendering;
pub mod voxels;

/// What a single frame did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Chunks whose geometry was rebuilt
    pub meshed_chunks: usize,
    /// Chunks handed to the render batch
    pub submitted_chunks: usize,
    /// Vertices in the render batch
    pub batched_vertices: usize,
}

/// A snapshot of the world, as logged by [`EngineState::report`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WorldReport {
    /// Seed the world was generated from
    pub seed: u32,
    /// Chunks in the registry
    pub chunks: usize,
    /// Chunks with no terrain yet
    pub uninitialized: usize,
    /// Chunks waiting for a mesh
    pub dirty: usize,
    /// Chunks whose mesh is current
    pub clean: usize,
    /// Chunks missing at least one neighbor
    pub fringe: usize,
    /// Air-filled chunks outside the load radius
    pub placeholders: usize,
    /// Vertices held by all chunks
    pub vertices: usize,
    /// `(min, max)` of the normalized blended noise sampled so far
    pub noise_range: Option<(f64, f64)>,
}

/// The main state container of the voxel world.
pub struct EngineState {
    manager: ChunkManager,
    ctx: GenerationContext,
    batch: ChunkBatch,
}

impl EngineState {
    /// Builds an empty world from `config`. No chunk exists until
    /// [`load_world`](Self::load_world).
    pub fn new(config: WorldConfig) -> Self {
        let manager = ChunkManager::new(config.max_vertices_per_chunk);
        EngineState {
            manager,
            ctx: GenerationContext::new(config),
            batch: ChunkBatch::new(),
        }
    }

    /// The chunk manager.
    pub fn manager(&self) -> &ChunkManager {
        &self.manager
    }

    /// The chunk manager, for block edits between frames.
    pub fn manager_mut(&mut self) -> &mut ChunkManager {
        &mut self.manager
    }

    /// Seed, noise field and config the world is generated from.
    pub fn context(&self) -> &GenerationContext {
        &self.ctx
    }

    /// Geometry submitted by the last frame.
    pub fn batch(&self) -> &ChunkBatch {
        &self.batch
    }

    /// Generates every chunk within the load radius.
    ///
    /// # Returns
    /// The number of chunks created.
    pub fn load_world(&mut self) -> usize {
        let start = Instant::now();
        let created = self.manager.load_region(&self.ctx);
        info!("World generation took {:?}", start.elapsed());
        created
    }

    /// Runs one frame: re-meshes dirty chunks and refills the render batch.
    pub fn tick(&mut self) -> FrameStats {
        let meshed_chunks = self.manager.update_all_chunks();
        self.batch.clear();
        let submitted_chunks = self.manager.load_all_chunks(&mut self.batch);

        FrameStats {
            meshed_chunks,
            submitted_chunks,
            batched_vertices: self.batch.vertex_count(),
        }
    }

    /// Logs and returns a summary of the world.
    pub fn report(&self) -> WorldReport {
        let (uninitialized, dirty, clean) = self.manager.state_counts();
        let report = WorldReport {
            seed: self.ctx.seed(),
            chunks: self.manager.len(),
            uninitialized,
            dirty,
            clean,
            fringe: self.manager.fringe_count(),
            placeholders: self.manager.chunks().filter(|chunk| chunk.is_placeholder()).count(),
            vertices: self.manager.chunks().map(|chunk| chunk.vertex_count()).sum(),
            noise_range: self.ctx.noise().observed_range(),
        };

        info!(
            "Seed {}: {} chunks ({} uninitialized, {} dirty, {} clean), {} fringe, {} placeholders, {} vertices",
            report.seed,
            report.chunks,
            report.uninitialized,
            report.dirty,
            report.clean,
            report.fringe,
            report.placeholders,
            report.vertices
        );
        if let Some((min, max)) = report.noise_range {
            info!("Blended noise ranged over [{:.4}, {:.4}]", min, max);
        }
        report
    }

    /// Frees every chunk and empties the render batch.
    pub fn shutdown(&mut self) {
        self.manager.free_all_chunks();
        self.batch.clear();
    }
}
