//! # Block Type Module
//!
//! This module defines the materials a block can be made of. The discriminants are the
//! material ids stored in every [`Block`](super::Block), so they must stay stable.

use num_derive::FromPrimitive;

use super::BlockId;

/// Enumerates every material the terrain and vegetation generators place.
///
/// The `FromPrimitive` derive allows conversion from the raw material id stored in a
/// block back to the enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space. Transparent and never meshed.
    AIR = 0,

    /// The indestructible floor at `y == 0`.
    BEDROCK = 1,

    /// Surface block above the beach line.
    GRASS = 2,

    /// Surface block at or just above sea level.
    SAND = 3,

    /// The thin layer between stone and the surface.
    DIRT = 4,

    /// Everything deeper than six blocks below the surface.
    STONE = 5,

    /// Tree trunk.
    LOG = 6,

    /// Tree canopy.
    LEAVES = 7,

    /// A light emitting block. Never generated, only placed.
    GLOWSTONE = 8,

    /// Fills air between the terrain and sea level. Rendered in the blended pass.
    WATER = 9,
}

impl BlockType {
    /// Converts a raw material id to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the id doesn't name a known material.
    pub fn from_id(id: BlockId) -> Option<Self> {
        num::FromPrimitive::from_u16(id)
    }

    /// The material id stored in blocks of this type.
    pub fn id(self) -> BlockId {
        self as BlockId
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_convert_back_to_types() {
        assert_eq!(BlockType::from_id(0), Some(BlockType::AIR));
        assert_eq!(BlockType::from_id(9), Some(BlockType::WATER));
        assert_eq!(BlockType::LEAVES.id(), 7);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(BlockType::from_id(42), None);
        assert_eq!(BlockType::from_id(u16::MAX), None);
    }
}
