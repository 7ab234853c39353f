//! Mesh generation for voxel rendering.
//!
//! This module converts chunk block grids into flat triangle lists.
//!
//! # Architecture
//! - [`Mesh`]: The vertices of one chunk, bounded by its buffer slot
//! - [`Face`]: A single quad of a voxel with its corners and texture layer
//! - [`generate_culled_mesh`]: Emits one quad per face that borders a see-through cell

mod culled;
mod face;
mod mesh;

pub use culled::{generate_culled_mesh, is_face_visible};
pub use face::Face;
pub use mesh::*;
