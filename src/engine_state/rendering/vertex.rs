//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format emitted by the mesher and consumed by the
//! render batch, plus the layout the GPU pipeline needs to read it.

use cgmath::Point3;

/// A vertex of a block face.
///
/// # Memory Layout
/// - Position: 3x i32 (12 bytes)
/// - Texture Layer: u32 (4 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockVertex {
    /// Corner position in world space
    pub position: [i32; 3],
    /// Layer of the block texture array
    pub texture_layer: u32,
    /// UV texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Face normal
    pub normal: [f32; 3],
}

impl BlockVertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - The corner position in world space
    /// * `texture_layer` - Layer of the texture array sampled by this face
    /// * `tex_coords` - UV coordinates of this corner
    /// * `normal` - The face normal
    pub fn new(pos: Point3<i32>, texture_layer: u32, tex_coords: [f32; 2], normal: [f32; 3]) -> Self {
        BlockVertex {
            position: [pos.x, pos.y, pos.z],
            texture_layer,
            tex_coords,
            normal,
        }
    }

    /// Size of one vertex in bytes, as laid out in the geometry buffer.
    pub const SIZE: usize = std::mem::size_of::<BlockVertex>();

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<i32>)
    /// - `location = 1`: texture_layer (u32)
    /// - `location = 2`: tex_coords (vec2<f32>)
    /// - `location = 3`: normal (vec3<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Sint32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[u32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Uint32,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[u32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[u32; 6]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
