//! # Voxel World Core
//!
//! This module contains the block, chunk and generation layers of the voxel world.
//!
//! ## Architecture
//!
//! * **Block**: packed voxel values, material ids and the block registry
//! * **Chunk**: a 16×256×16 column with its lifecycle state and neighbor links
//! * **ChunkManager**: the coordinate-keyed registry that wires neighbors and drives
//!   regeneration of dirty geometry
//! * **NoiseField** and **GenerationContext**: seeded, reproducible terrain inputs
//!
//! ## Data Flow
//!
//! 1. The manager creates every chunk of the load region
//! 2. Neighbor links are re-resolved once all chunks exist
//! 3. Terrain, then vegetation, is generated for each chunk
//! 4. Each frame, dirty non-fringe chunks are re-meshed and handed to the renderer

pub mod block;
pub mod chunk;
pub mod chunk_manager;
pub mod coords;
pub mod generation;
pub mod noise_field;
