use cgmath::Point3;

use crate::engine_state::{
    rendering::vertex::BlockVertex, voxels::block::block_side::BlockSide,
};

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points (lower-left, lower-right, upper-right,
/// upper-left) in world space, wound counter-clockwise when seen from outside the
/// block, plus the texture layer it samples and the side it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in world coordinates
    pub ll: Point3<i32>,
    /// Lower-right corner of the face in world coordinates
    pub lr: Point3<i32>,
    /// Upper-right corner of the face in world coordinates
    pub ur: Point3<i32>,
    /// Upper-left corner of the face in world coordinates
    pub ul: Point3<i32>,
    /// Layer of the texture array this face samples
    pub texture_layer: u32,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the voxel whose minimum corner is `pos`.
    ///
    /// # Arguments
    /// * `pos` - The minimum corner of the voxel in world space
    /// * `texture_layer` - Texture array layer for this face
    /// * `block_side` - Which side of the block this face represents
    pub fn new(pos: Point3<i32>, texture_layer: u32, block_side: BlockSide) -> Self {
        let (x, y, z) = (pos.x, pos.y, pos.z);
        let [ll, lr, ur, ul] = match block_side {
            BlockSide::FRONT => [
                Point3::new(x + 1, y, z + 1),
                Point3::new(x + 1, y, z),
                Point3::new(x + 1, y + 1, z),
                Point3::new(x + 1, y + 1, z + 1),
            ],
            BlockSide::BACK => [
                Point3::new(x, y, z),
                Point3::new(x, y, z + 1),
                Point3::new(x, y + 1, z + 1),
                Point3::new(x, y + 1, z),
            ],
            BlockSide::RIGHT => [
                Point3::new(x, y, z + 1),
                Point3::new(x + 1, y, z + 1),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x, y + 1, z + 1),
            ],
            BlockSide::LEFT => [
                Point3::new(x + 1, y, z),
                Point3::new(x, y, z),
                Point3::new(x, y + 1, z),
                Point3::new(x + 1, y + 1, z),
            ],
            BlockSide::TOP => [
                Point3::new(x, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z),
                Point3::new(x, y + 1, z),
            ],
            BlockSide::BOTTOM => [
                Point3::new(x, y, z),
                Point3::new(x + 1, y, z),
                Point3::new(x + 1, y, z + 1),
                Point3::new(x, y, z + 1),
            ],
        };

        Face {
            ll,
            lr,
            ur,
            ul,
            texture_layer,
            block_side,
        }
    }

    /// The two triangles of the quad, `(ll, lr, ur)` and `(ll, ur, ul)`.
    pub fn vertices(&self) -> [BlockVertex; 6] {
        let normal = self.block_side.normal();
        let vertex = |pos: Point3<i32>, uv: [f32; 2]| {
            BlockVertex::new(pos, self.texture_layer, uv, normal)
        };
        let ll = vertex(self.ll, [0.0, 1.0]);
        let lr = vertex(self.lr, [1.0, 1.0]);
        let ur = vertex(self.ur, [1.0, 0.0]);
        let ul = vertex(self.ul, [0.0, 0.0]);
        [ll, lr, ur, ll, ur, ul]
    }
}
