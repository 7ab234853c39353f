//! Mesh generation for chunk geometry.
//!
//! Meshes are built per chunk with face culling and land in the chunk's fixed slot of
//! the shared geometry buffer described by its
//! [`DrawCommand`](super::draw_command::DrawCommand).

mod mesh;

pub use mesh::*;
