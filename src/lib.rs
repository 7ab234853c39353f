//! # Voxel World
//!
//! The terrain and geometry core of a chunked voxel world: procedural height
//! generation, neighbor-aware block addressing across chunk boundaries, the chunk
//! dirty/clean state machine, face-culling mesh generation and the chunk manager that
//! ties them together every frame.
//!
//! ## Key Modules
//!
//! * `engine_state::voxels` - Blocks, chunks, the noise field and the chunk manager
//! * `engine_state::rendering` - Vertex layout, draw commands, the mesher and render batches
//! * `engine_state::config` - World configuration
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_world::engine_state::{config::WorldConfig, EngineState};
//!
//! let mut engine = EngineState::new(WorldConfig::default());
//! engine.load_world();
//! let stats = engine.tick();
//! println!("{} vertices ready", stats.batched_vertices);
//! ```

#![warn(missing_docs)]

use log::{error, info};

use engine_state::{config::WorldConfig, EngineState};

pub mod engine_state;

/// Frames run by [`run`] before it reports and shuts down.
const HEADLESS_FRAMES: usize = 2;

/// Initializes logging, loads the world configuration from the path given as the first
/// argument (or uses defaults), generates the world and runs it headless.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => {
                info!("Loaded world config from {}", path);
                config
            }
            Err(err) => {
                error!("{}, falling back to defaults", err);
                WorldConfig::default()
            }
        },
        None => WorldConfig::default(),
    };

    let mut engine = EngineState::new(config);
    engine.load_world();
    for frame in 0..HEADLESS_FRAMES {
        let stats = engine.tick();
        info!(
            "Frame {}: meshed {} chunks, submitted {} chunks, {} vertices",
            frame, stats.meshed_chunks, stats.submitted_chunks, stats.batched_vertices
        );
    }
    engine.report();
    engine.shutdown();
}
