//! # Generation Context
//!
//! Carries everything terrain and vegetation generation read: the world seed, the
//! noise field built from it and the world configuration. There is no global random
//! state; vegetation draws from a generator seeded per chunk, so a chunk's content
//! does not depend on the order chunks are generated in.

use log::info;

use super::{coords::ChunkCoord, noise_field::NoiseField};
use crate::engine_state::config::WorldConfig;

/// Explicit state passed into terrain and vegetation generation.
pub struct GenerationContext {
    seed: u32,
    noise: NoiseField,
    config: WorldConfig,
}

impl GenerationContext {
    /// Builds the context, drawing a seed if the config doesn't fix one.
    pub fn new(config: WorldConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u32(..));
        info!("World seed is {}", seed);

        GenerationContext {
            seed,
            noise: NoiseField::new(seed, &config),
            config,
        }
    }

    /// The world seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The terrain height field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// The world configuration.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// A random generator private to chunk `coord`.
    pub fn chunk_rng(&self, coord: ChunkCoord) -> fastrand::Rng {
        fastrand::Rng::with_seed(chunk_seed(self.seed, coord))
    }

    /// Whether `coord` lies inside the eagerly generated region. Chunks on or beyond
    /// the outer ring are generated as placeholder air.
    pub fn is_within_load_radius(&self, coord: ChunkCoord) -> bool {
        let limit = self.config.load_radius - 1;
        coord.x.abs() <= limit && coord.y.abs() <= limit
    }
}

/// The splitmix64 finalizer.
fn splitmix(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    value = (value ^ (value >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

/// Mixes the world seed with a chunk coordinate, one component at a time so that
/// mirrored coordinates land on unrelated seeds.
fn chunk_seed(seed: u32, coord: ChunkCoord) -> u64 {
    let x = splitmix(seed as u64 ^ coord.x as i64 as u64);
    splitmix(x ^ coord.y as i64 as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(seed: u32, load_radius: i32) -> GenerationContext {
        GenerationContext::new(WorldConfig {
            seed: Some(seed),
            load_radius,
            ..WorldConfig::default()
        })
    }

    #[test]
    fn fixed_seed_is_kept() {
        assert_eq!(context(77, 2).seed(), 77);
    }

    #[test]
    fn chunk_rngs_are_reproducible_and_distinct() {
        let ctx = context(5, 2);
        let a: Vec<u32> = {
            let mut rng = ctx.chunk_rng(ChunkCoord::new(1, -1));
            (0..8).map(|_| rng.u32(..)).collect()
        };
        let b: Vec<u32> = {
            let mut rng = ctx.chunk_rng(ChunkCoord::new(1, -1));
            (0..8).map(|_| rng.u32(..)).collect()
        };
        let c: Vec<u32> = {
            let mut rng = ctx.chunk_rng(ChunkCoord::new(-1, 1));
            (0..8).map(|_| rng.u32(..)).collect()
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn chunk_seeds_do_not_collide_nearby() {
        for seed in [0, 5, 1234] {
            let mut seen = std::collections::HashMap::new();
            for x in -8..=8 {
                for z in -8..=8 {
                    let coord = ChunkCoord::new(x, z);
                    if let Some(other) = seen.insert(chunk_seed(seed, coord), coord) {
                        panic!("seed {}: {:?} and {:?} share a chunk seed", seed, coord, other);
                    }
                }
            }
        }
    }

    #[test]
    fn outer_ring_is_outside_load_radius() {
        let ctx = context(1, 1);
        assert!(ctx.is_within_load_radius(ChunkCoord::new(0, 0)));
        assert!(!ctx.is_within_load_radius(ChunkCoord::new(1, 0)));
        assert!(!ctx.is_within_load_radius(ChunkCoord::new(-1, -1)));

        let ctx = context(1, 3);
        assert!(ctx.is_within_load_radius(ChunkCoord::new(2, -2)));
        assert!(!ctx.is_within_load_radius(ChunkCoord::new(3, 0)));
    }
}
