//! # Rendering Module
//!
//! The geometry side of the voxel world: the vertex format, per-chunk draw commands,
//! the face-culling mesher and the render batch that receives finished chunks.
//! GPU resource management lives outside this crate; these types only describe what
//! a renderer uploads.

pub mod batch;
pub mod draw_command;
pub mod meshing;
pub mod vertex;
