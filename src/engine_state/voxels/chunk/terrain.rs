//! # Terrain Module
//!
//! Column-by-column terrain extrusion. Each column samples the noise field once and
//! every cell of the column is classified from that single height.

use cgmath::Point3;

use super::{Chunk, CHUNK_HEIGHT, CHUNK_LENGTH, CHUNK_WIDTH};
use crate::engine_state::{
    config::WorldConfig,
    voxels::{
        block::{block_type::BlockType, Block, BlockRegistry},
        generation::GenerationContext,
    },
};

/// Depth of the dirt layer between the stone and the surface block.
pub const DIRT_DEPTH: i32 = 6;

/// The memoized noise result for one column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnProfile {
    /// Y of the surface block
    pub height: i32,
    /// Cells below this are stone
    pub stone_height: i32,
}

impl ColumnProfile {
    /// The profile of a column whose surface block sits at `height`.
    pub fn new(height: i32) -> Self {
        ColumnProfile {
            height,
            stone_height: height - DIRT_DEPTH,
        }
    }

    /// Samples the noise field for world column `(world_x, world_z)`.
    pub fn sample(ctx: &GenerationContext, world_x: i32, world_z: i32) -> Self {
        Self::new(ctx.noise().height(world_x, world_z) as i32)
    }

    /// The material of the cell at height `y`, by the first matching rule:
    /// bedrock floor, stone, dirt, the surface block, water up to sea level, air.
    pub fn classify(&self, y: i32, config: &WorldConfig) -> BlockType {
        if y == 0 {
            BlockType::BEDROCK
        } else if y < self.stone_height {
            BlockType::STONE
        } else if y < self.height {
            BlockType::DIRT
        } else if y == self.height {
            if self.height < config.sea_level + 2 {
                BlockType::SAND
            } else {
                BlockType::GRASS
            }
        } else if y >= config.min_biome_height && y < config.sea_level {
            BlockType::WATER
        } else {
            BlockType::AIR
        }
    }
}

/// Blocks of every terrain material, built once per chunk from the registry.
struct TerrainPalette {
    bedrock: Block,
    stone: Block,
    dirt: Block,
    sand: Block,
    grass: Block,
    water: Block,
    air: Block,
}

impl TerrainPalette {
    fn new(registry: &dyn BlockRegistry) -> Self {
        TerrainPalette {
            bedrock: registry.make_block(BlockType::BEDROCK.id()),
            stone: registry.make_block(BlockType::STONE.id()),
            dirt: registry.make_block(BlockType::DIRT.id()),
            sand: registry.make_block(BlockType::SAND.id()),
            grass: registry.make_block(BlockType::GRASS.id()),
            water: registry.make_block(BlockType::WATER.id()),
            air: registry.make_block(BlockType::AIR.id()),
        }
    }

    fn block(&self, block_type: BlockType) -> Block {
        match block_type {
            BlockType::BEDROCK => self.bedrock,
            BlockType::STONE => self.stone,
            BlockType::DIRT => self.dirt,
            BlockType::SAND => self.sand,
            BlockType::GRASS => self.grass,
            BlockType::WATER => self.water,
            _ => self.air,
        }
    }
}

/// Extrudes every column of `chunk` from the noise field.
pub(super) fn fill_columns(chunk: &mut Chunk, ctx: &GenerationContext, registry: &dyn BlockRegistry) {
    let palette = TerrainPalette::new(registry);
    let (origin_x, origin_z) = chunk.world_origin();
    let config = ctx.config();
    let blocks = chunk.blocks_mut();

    for x in 0..CHUNK_LENGTH {
        for z in 0..CHUNK_WIDTH {
            let column = ColumnProfile::sample(ctx, origin_x + x, origin_z + z);
            for y in 0..CHUNK_HEIGHT {
                let index = Chunk::local_index(Point3::new(x, y, z));
                if let Some(slot) = blocks.get_mut(index) {
                    *slot = palette.block(column.classify(y, config));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_is_classified_bottom_to_top() {
        let config = WorldConfig::default();
        let column = ColumnProfile::new(100);
        assert_eq!(column.classify(0, &config), BlockType::BEDROCK);
        assert_eq!(column.classify(1, &config), BlockType::STONE);
        assert_eq!(column.classify(93, &config), BlockType::STONE);
        assert_eq!(column.classify(94, &config), BlockType::DIRT);
        assert_eq!(column.classify(99, &config), BlockType::DIRT);
        assert_eq!(column.classify(100, &config), BlockType::GRASS);
        assert_eq!(column.classify(101, &config), BlockType::AIR);
    }

    #[test]
    fn low_columns_get_sand_and_water() {
        let config = WorldConfig::default();
        let column = ColumnProfile::new(70);
        assert_eq!(column.classify(70, &config), BlockType::SAND);
        assert_eq!(column.classify(71, &config), BlockType::WATER);
        assert_eq!(column.classify(84, &config), BlockType::WATER);
        assert_eq!(column.classify(85, &config), BlockType::AIR);
    }

    #[test]
    fn surface_choice_depends_only_on_sea_level() {
        let config = WorldConfig::default();
        assert_eq!(ColumnProfile::new(86).classify(86, &config), BlockType::SAND);
        assert_eq!(ColumnProfile::new(87).classify(87, &config), BlockType::GRASS);
    }

    #[test]
    fn bedrock_wins_over_everything() {
        let config = WorldConfig::default();
        assert_eq!(ColumnProfile::new(0).classify(0, &config), BlockType::BEDROCK);
        assert_eq!(ColumnProfile::new(3).classify(0, &config), BlockType::BEDROCK);
    }
}
