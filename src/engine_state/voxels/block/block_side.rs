//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the four horizontal
//! directions a chunk can have a neighbor in.
//!
//! Axis convention used throughout the crate:
//!
//! | Side     | Axis | Chunk neighbor |
//! |----------|------|----------------|
//! | `FRONT`  | +X   | `(x + 1, z)`   |
//! | `BACK`   | -X   | `(x - 1, z)`   |
//! | `RIGHT`  | +Z   | `(x, z + 1)`   |
//! | `LEFT`   | -Z   | `(x, z - 1)`   |
//! | `TOP`    | +Y   | none           |
//! | `BOTTOM` | -Y   | none           |

use cgmath::{Vector2, Vector3};

/// Represents the six possible faces of a voxel block.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face looking towards +X
    FRONT = 0,

    /// The face looking towards +Z
    RIGHT = 1,

    /// The face looking towards -X
    BACK = 2,

    /// The face looking towards -Z
    LEFT = 3,

    /// The face looking towards +Y
    TOP = 4,

    /// The face looking towards -Y
    BOTTOM = 5,
}

/// Which of a block's three textures a face samples.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum TextureFace {
    /// The four vertical faces
    Side,
    /// The +Y face
    Top,
    /// The -Y face
    Bottom,
}

impl BlockSide {
    /// Returns all six faces in meshing order: the four sides first, then top and bottom.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::RIGHT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// Returns the four sides that can have a neighboring chunk.
    pub fn horizontal() -> [BlockSide; 4] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The unit offset from a block to the block this face touches.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(1, 0, 0),
            BlockSide::BACK => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(0, 0, 1),
            BlockSide::LEFT => Vector3::new(0, 0, -1),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
        }
    }

    /// The offset in chunk coordinates to the neighbor on this side.
    ///
    /// # Returns
    /// `None` for `TOP` and `BOTTOM`: chunks span the full world height.
    pub fn chunk_offset(self) -> Option<Vector2<i32>> {
        match self {
            BlockSide::FRONT => Some(Vector2::new(1, 0)),
            BlockSide::BACK => Some(Vector2::new(-1, 0)),
            BlockSide::RIGHT => Some(Vector2::new(0, 1)),
            BlockSide::LEFT => Some(Vector2::new(0, -1)),
            BlockSide::TOP | BlockSide::BOTTOM => None,
        }
    }

    /// The face pointing the other way.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::RIGHT => BlockSide::LEFT,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BOTTOM => BlockSide::TOP,
        }
    }

    /// The constant normal attached to every vertex of this face.
    pub fn normal(self) -> [f32; 3] {
        let offset = self.offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }

    /// Which texture of the block this face uses.
    pub fn texture_face(self) -> TextureFace {
        match self {
            BlockSide::TOP => TextureFace::Top,
            BlockSide::BOTTOM => TextureFace::Bottom,
            _ => TextureFace::Side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_sides_cancel_out() {
        for side in BlockSide::all() {
            assert_eq!(side.offset() + side.opposite().offset(), Vector3::new(0, 0, 0));
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn only_horizontal_sides_have_chunk_neighbors() {
        for side in BlockSide::horizontal() {
            assert!(side.chunk_offset().is_some());
        }
        assert!(BlockSide::TOP.chunk_offset().is_none());
        assert!(BlockSide::BOTTOM.chunk_offset().is_none());
    }
}
