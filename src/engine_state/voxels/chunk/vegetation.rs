//! # Vegetation Module
//!
//! Plans the trees of one chunk. Planning is pure: it reads the noise field and the
//! chunk's private random generator and returns block placements in the chunk's local
//! space. Leaves may reach up to two cells past the chunk edge; the
//! [`ChunkManager`](crate::engine_state::voxels::chunk_manager::ChunkManager) routes
//! those placements to the neighbors.

use cgmath::Point3;

use super::{terrain::ColumnProfile, CHUNK_HEIGHT, CHUNK_LENGTH, CHUNK_WIDTH};
use crate::engine_state::voxels::{
    block::block_type::BlockType, coords::ChunkCoord, generation::GenerationContext,
};

/// Shortest trunk, in blocks.
pub const MIN_TRUNK_HEIGHT: i32 = 3;
/// Tallest trunk, in blocks.
pub const MAX_TRUNK_HEIGHT: i32 = 5;

/// How a placement treats the block already in its cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementMode {
    /// Replace whatever is there.
    Overwrite,
    /// Only fill air, so leaves never cut into trunks or terrain.
    IntoAir,
}

/// A single block write produced by tree planning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Target cell in the planning chunk's local space
    pub local: Point3<i32>,
    /// Material to place
    pub block_type: BlockType,
    /// How to treat the block already there
    pub mode: PlacementMode,
}

/// One leaf layer of a tree.
struct LeafRing {
    radius: i32,
    /// Chance in `[0, 1]` that each corner cell is left out
    corner_skip_chance: f64,
}

/// Leaf layers from the bottom up, starting two cells below the trunk top.
const LEAF_RINGS: [LeafRing; 4] = [
    LeafRing {
        radius: 2,
        corner_skip_chance: 0.4,
    },
    LeafRing {
        radius: 2,
        corner_skip_chance: 0.4,
    },
    LeafRing {
        radius: 1,
        corner_skip_chance: 1.0 / 6.0,
    },
    LeafRing {
        radius: 1,
        corner_skip_chance: 1.0,
    },
];

/// Plans every tree of chunk `coord`.
///
/// Each column rolls for a tree with `tree_chance`. A tree needs its base above
/// `sea_level + 2` and its top leaf ring below the world ceiling.
///
/// # Returns
/// The placements in the order they must be applied: each tree's trunk, then its
/// leaves. Callers skip placeholder chunks.
pub fn plan_trees(coord: ChunkCoord, ctx: &GenerationContext) -> Vec<Placement> {
    let config = ctx.config();
    let mut rng = ctx.chunk_rng(coord);
    let (origin_x, origin_z) = (coord.x * CHUNK_LENGTH, coord.y * CHUNK_WIDTH);
    let mut placements = Vec::new();

    for x in 0..CHUNK_LENGTH {
        for z in 0..CHUNK_WIDTH {
            if rng.f64() >= config.tree_chance {
                continue;
            }

            let column = ColumnProfile::sample(ctx, origin_x + x, origin_z + z);
            let base_y = column.height + 1;
            if base_y <= config.sea_level + 2 {
                continue;
            }

            let trunk_height = rng.i32(MIN_TRUNK_HEIGHT..=MAX_TRUNK_HEIGHT);
            let trunk_top = base_y + trunk_height - 1;
            let top_leaf_y = trunk_top - 2 + LEAF_RINGS.len() as i32 - 1;
            if top_leaf_y >= CHUNK_HEIGHT {
                continue;
            }

            plan_tree(&mut rng, Point3::new(x, base_y, z), trunk_height, &mut placements);
        }
    }

    placements
}

fn plan_tree(
    rng: &mut fastrand::Rng,
    base: Point3<i32>,
    trunk_height: i32,
    placements: &mut Vec<Placement>,
) {
    for dy in 0..trunk_height {
        placements.push(Placement {
            local: Point3::new(base.x, base.y + dy, base.z),
            block_type: BlockType::LOG,
            mode: PlacementMode::Overwrite,
        });
    }

    // Two cells below the trunk top.
    let mut leaf_y = base.y + trunk_height - 3;
    for ring in LEAF_RINGS.iter() {
        for leaf_x in base.x - ring.radius..=base.x + ring.radius {
            for leaf_z in base.z - ring.radius..=base.z + ring.radius {
                let is_corner = (leaf_x - base.x).abs() == ring.radius
                    && (leaf_z - base.z).abs() == ring.radius;
                if is_corner && rng.f64() < ring.corner_skip_chance {
                    continue;
                }
                placements.push(Placement {
                    local: Point3::new(leaf_x, leaf_y, leaf_z),
                    block_type: BlockType::LEAVES,
                    mode: PlacementMode::IntoAir,
                });
            }
        }
        leaf_y += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::WorldConfig;

    fn context(tree_chance: f64) -> GenerationContext {
        GenerationContext::new(WorldConfig {
            seed: Some(11),
            load_radius: 4,
            tree_chance,
            // Every column high enough to carry a tree.
            min_biome_height: 120,
            max_biome_height: 140,
            ..WorldConfig::default()
        })
    }

    #[test]
    fn zero_chance_plants_nothing() {
        assert!(plan_trees(ChunkCoord::new(0, 0), &context(0.0)).is_empty());
    }

    #[test]
    fn planning_is_reproducible_per_chunk() {
        let ctx = context(0.05);
        assert_eq!(
            plan_trees(ChunkCoord::new(1, 2), &ctx),
            plan_trees(ChunkCoord::new(1, 2), &ctx)
        );
    }

    #[test]
    fn trunks_have_bounded_height_and_sit_on_the_surface() {
        let ctx = context(0.05);
        let placements = plan_trees(ChunkCoord::new(0, 0), &ctx);
        let logs: Vec<_> = placements
            .iter()
            .filter(|p| p.block_type == BlockType::LOG)
            .collect();
        assert!(!logs.is_empty());
        assert!(logs.iter().all(|p| p.mode == PlacementMode::Overwrite));

        let mut columns = std::collections::HashMap::new();
        for log in &logs {
            columns
                .entry((log.local.x, log.local.z))
                .or_insert_with(Vec::new)
                .push(log.local.y);
        }
        for ((x, z), ys) in columns {
            let surface = ColumnProfile::sample(&ctx, x, z).height;
            assert_eq!(*ys.iter().min().unwrap(), surface + 1);
            // Two trees never share a column, so each column holds one trunk.
            assert!((MIN_TRUNK_HEIGHT as usize..=MAX_TRUNK_HEIGHT as usize).contains(&ys.len()));
        }
    }

    #[test]
    fn leaves_stay_within_two_cells_of_the_chunk() {
        let placements = plan_trees(ChunkCoord::new(-1, 0), &context(0.1));
        for leaf in placements.iter().filter(|p| p.block_type == BlockType::LEAVES) {
            assert_eq!(leaf.mode, PlacementMode::IntoAir);
            assert!((-2..CHUNK_LENGTH + 2).contains(&leaf.local.x));
            assert!((-2..CHUNK_WIDTH + 2).contains(&leaf.local.z));
            assert!(leaf.local.y < CHUNK_HEIGHT);
        }
    }

    #[test]
    fn top_ring_never_has_corners() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut placements = Vec::new();
        plan_tree(&mut rng, Point3::new(8, 100, 8), 4, &mut placements);
        let top_y = placements.iter().map(|p| p.local.y).max().unwrap();
        let top: Vec<_> = placements.iter().filter(|p| p.local.y == top_y).collect();
        assert_eq!(top.len(), 5);
        assert!(top.iter().all(|p| (p.local.x - 8).abs() + (p.local.z - 8).abs() <= 1));
    }
}
