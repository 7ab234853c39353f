//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes the packed [`Block`] value stored in chunk grids, the per-material
//! [`BlockFormat`] looked up from a [`BlockRegistry`], and the two sentinels every
//! lookup can return: [`Block::AIR`] and [`Block::NULL`].

use block_side::TextureFace;
use block_type::BlockType;
use log::debug;
use phf::phf_map;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used for material ids.
pub type BlockId = u16;

/// Material id reserved for the "no block here" sentinel.
pub const NULL_BLOCK_ID: BlockId = BlockId::MAX;

const FLAG_TRANSPARENT: u8 = 1 << 0;
const FLAG_BLENDABLE: u8 = 1 << 1;
const FLAG_LIGHT_SOURCE: u8 = 1 << 2;

/// A single voxel as stored in a chunk grid.
///
/// This is a lightweight value: the material id plus the attributes the mesher needs
/// without going back to the registry, packed into a flag byte and an RGB light color.
///
/// # Memory Layout
/// `#[repr(C)]` with no padding (6 bytes), so a zeroed grid is a valid grid.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq)]
pub struct Block {
    /// The material of this block.
    pub block_id: BlockId,
    flags: u8,
    light_color: [u8; 3],
}

impl Block {
    /// Empty space. Transparent, not blended, not emitting light.
    pub const AIR: Block = Block {
        block_id: BlockType::AIR as BlockId,
        flags: FLAG_TRANSPARENT,
        light_color: [255, 255, 255],
    };

    /// Returned for any position outside the loaded world. Distinct from [`Block::AIR`]:
    /// faces are never emitted against it.
    pub const NULL: Block = Block {
        block_id: NULL_BLOCK_ID,
        flags: 0,
        light_color: [0, 0, 0],
    };

    /// Builds a block of material `block_id` with the attributes from its format.
    pub fn from_format(block_id: BlockId, format: &BlockFormat) -> Self {
        let mut block = Block {
            block_id,
            flags: 0,
            light_color: format.light_color,
        };
        block.set_transparency(format.is_transparent);
        block.set_blendability(format.is_blendable);
        block.set_light_source(format.is_light_source);
        block
    }

    /// `true` for the air material, regardless of flags.
    pub fn is_air(&self) -> bool {
        self.block_id == BlockType::AIR as BlockId
    }

    /// `true` for the out-of-world sentinel.
    pub fn is_null(&self) -> bool {
        self.block_id == NULL_BLOCK_ID
    }

    /// Whether faces behind this block can be seen.
    pub fn is_transparent(&self) -> bool {
        self.flags & FLAG_TRANSPARENT != 0
    }

    /// Whether the block is drawn in the blended pass.
    pub fn is_blendable(&self) -> bool {
        self.flags & FLAG_BLENDABLE != 0
    }

    /// Whether the block emits light.
    pub fn is_light_source(&self) -> bool {
        self.flags & FLAG_LIGHT_SOURCE != 0
    }

    /// RGB color of emitted light.
    pub fn light_color(&self) -> [u8; 3] {
        self.light_color
    }

    /// Sets the transparency flag.
    pub fn set_transparency(&mut self, transparent: bool) {
        self.set_flag(FLAG_TRANSPARENT, transparent);
    }

    /// Sets the blendability flag.
    pub fn set_blendability(&mut self, blendable: bool) {
        self.set_flag(FLAG_BLENDABLE, blendable);
    }

    /// Sets the light source flag.
    pub fn set_light_source(&mut self, light_source: bool) {
        self.set_flag(FLAG_LIGHT_SOURCE, light_source);
    }

    /// Sets the RGB color of emitted light.
    pub fn set_light_color(&mut self, color: [u8; 3]) {
        self.light_color = color;
    }

    fn set_flag(&mut self, flag: u8, value: bool) {
        if value {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}

/// Static per-material properties, as returned by a [`BlockRegistry`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockFormat {
    /// Faces behind the block stay visible
    pub is_transparent: bool,
    /// Drawn in the blended pass
    pub is_blendable: bool,
    /// Emits light
    pub is_light_source: bool,
    /// RGB color of emitted light
    pub light_color: [u8; 3],
    /// Texture array layer for the +Y face
    pub top_texture: u32,
    /// Texture array layer for the four vertical faces
    pub side_texture: u32,
    /// Texture array layer for the -Y face
    pub bottom_texture: u32,
}

impl BlockFormat {
    /// The texture layer a face of the given kind samples.
    pub fn texture(&self, face: TextureFace) -> u32 {
        match face {
            TextureFace::Top => self.top_texture,
            TextureFace::Side => self.side_texture,
            TextureFace::Bottom => self.bottom_texture,
        }
    }

    const fn solid(top_texture: u32, side_texture: u32, bottom_texture: u32) -> Self {
        BlockFormat {
            is_transparent: false,
            is_blendable: false,
            is_light_source: false,
            light_color: [255, 255, 255],
            top_texture,
            side_texture,
            bottom_texture,
        }
    }

    const fn uniform(texture: u32) -> Self {
        Self::solid(texture, texture, texture)
    }
}

/// Format used for material ids the registry doesn't know.
pub const FALLBACK_FORMAT: BlockFormat = BlockFormat::uniform(0);

/// Looks up the static properties of a material.
///
/// Terrain and vegetation generation use it to fill in block flags, the mesher uses it
/// to pick texture layers.
pub trait BlockRegistry {
    /// Returns the format of `block_id`, or `None` if the id is unknown.
    fn lookup(&self, block_id: BlockId) -> Option<BlockFormat>;

    /// Like [`lookup`](Self::lookup) but falls back to an opaque format.
    fn lookup_or_fallback(&self, block_id: BlockId) -> BlockFormat {
        self.lookup(block_id).unwrap_or_else(|| {
            debug!("Unknown block id {}, using fallback format", block_id);
            FALLBACK_FORMAT
        })
    }

    /// Builds a block of material `block_id` with its registered attributes.
    fn make_block(&self, block_id: BlockId) -> Block {
        Block::from_format(block_id, &self.lookup_or_fallback(block_id))
    }
}

/// Texture array layers of the block atlas.
pub mod textures {
    /// Top of grass
    pub const GRASS_TOP: u32 = 0;
    /// Side of grass
    pub const GRASS_SIDE: u32 = 1;
    /// Dirt, also the bottom of grass
    pub const DIRT: u32 = 2;
    /// Stone
    pub const STONE: u32 = 3;
    /// Sand
    pub const SAND: u32 = 4;
    /// Water
    pub const WATER: u32 = 5;
    /// Bark
    pub const LOG_SIDE: u32 = 6;
    /// Log rings
    pub const LOG_TOP: u32 = 7;
    /// Leaves
    pub const LEAVES: u32 = 8;
    /// Bedrock
    pub const BEDROCK: u32 = 9;
    /// Glowstone
    pub const GLOWSTONE: u32 = 10;
}

/// Maps each material id to its format.
///
/// Keys are the `BlockType` discriminants.
static BLOCK_FORMATS: phf::Map<u16, BlockFormat> = phf_map! {
    0u16 => BlockFormat {
        is_transparent: true,
        is_blendable: false,
        is_light_source: false,
        light_color: [255, 255, 255],
        top_texture: 0,
        side_texture: 0,
        bottom_texture: 0,
    },
    1u16 => BlockFormat::uniform(textures::BEDROCK),
    2u16 => BlockFormat::solid(textures::GRASS_TOP, textures::GRASS_SIDE, textures::DIRT),
    3u16 => BlockFormat::uniform(textures::SAND),
    4u16 => BlockFormat::uniform(textures::DIRT),
    5u16 => BlockFormat::uniform(textures::STONE),
    6u16 => BlockFormat::solid(textures::LOG_TOP, textures::LOG_SIDE, textures::LOG_TOP),
    7u16 => BlockFormat::uniform(textures::LEAVES),
    8u16 => BlockFormat {
        is_transparent: false,
        is_blendable: false,
        is_light_source: true,
        light_color: [255, 214, 140],
        top_texture: textures::GLOWSTONE,
        side_texture: textures::GLOWSTONE,
        bottom_texture: textures::GLOWSTONE,
    },
    9u16 => BlockFormat {
        is_transparent: false,
        is_blendable: true,
        is_light_source: false,
        light_color: [255, 255, 255],
        top_texture: textures::WATER,
        side_texture: textures::WATER,
        bottom_texture: textures::WATER,
    },
};

/// The built-in registry covering every [`BlockType`].
#[derive(Copy, Clone, Debug, Default)]
pub struct StaticBlockRegistry;

impl BlockRegistry for StaticBlockRegistry {
    fn lookup(&self, block_id: BlockId) -> Option<BlockFormat> {
        BLOCK_FORMATS.get(&block_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_distinct() {
        assert!(Block::AIR.is_air());
        assert!(Block::AIR.is_transparent());
        assert!(!Block::AIR.is_null());
        assert!(Block::NULL.is_null());
        assert!(!Block::NULL.is_air());
        assert_ne!(Block::AIR, Block::NULL);
    }

    #[test]
    fn flags_are_independent() {
        let mut block = Block::AIR;
        block.set_light_source(true);
        block.set_blendability(true);
        block.set_transparency(false);
        assert!(block.is_light_source());
        assert!(block.is_blendable());
        assert!(!block.is_transparent());
        block.set_blendability(false);
        assert!(block.is_light_source());
        assert!(!block.is_blendable());
    }

    #[test]
    fn registry_covers_every_block_type() {
        let registry = StaticBlockRegistry;
        for id in 0..=9 {
            let block_type = BlockType::from_id(id).unwrap();
            assert!(registry.lookup(block_type.id()).is_some(), "{:?}", block_type);
        }
    }

    #[test]
    fn water_is_opaque_but_blended() {
        let water = StaticBlockRegistry.make_block(BlockType::WATER.id());
        assert!(!water.is_transparent());
        assert!(water.is_blendable());
    }

    #[test]
    fn glowstone_carries_its_light_color() {
        let glowstone = StaticBlockRegistry.make_block(BlockType::GLOWSTONE.id());
        assert!(glowstone.is_light_source());
        assert_eq!(glowstone.light_color(), [255, 214, 140]);
    }

    #[test]
    fn grass_uses_three_textures() {
        let grass = StaticBlockRegistry.lookup(BlockType::GRASS.id()).unwrap();
        assert_eq!(grass.texture(TextureFace::Top), textures::GRASS_TOP);
        assert_eq!(grass.texture(TextureFace::Side), textures::GRASS_SIDE);
        assert_eq!(grass.texture(TextureFace::Bottom), textures::DIRT);
    }

    #[test]
    fn unknown_ids_fall_back_to_opaque() {
        let block = StaticBlockRegistry.make_block(300);
        assert_eq!(block.block_id, 300);
        assert!(!block.is_transparent());
    }

    #[test]
    fn zeroed_block_is_air_material() {
        let block: Block = bytemuck::Zeroable::zeroed();
        assert!(block.is_air());
        assert!(!block.is_transparent());
    }
}
