//! # Noise Field
//!
//! Deterministic terrain height for any world column, blended from three independently
//! seeded octave generators. Low-weight octaves run at higher frequencies so they only
//! add detail on top of the broad shape of the first one.
//!
//! The field has no knowledge of chunks and caches nothing: every call recomputes the
//! height from scratch. The terrain generator samples each column once and reuses the
//! value for the whole vertical extrusion. The only state a sample leaves behind is the
//! running range of blended noise values, kept for world reports.

use std::cell::Cell;

use noise::{Fbm, MultiFractal, NoiseFn, OpenSimplex};

use crate::engine_state::config::{OctaveConfig, WorldConfig};

/// Fractal octaves inside each generator.
const FRACTAL_OCTAVES: usize = 8;
/// Frequency multiplier between fractal octaves.
const FRACTAL_LACUNARITY: f64 = 1.6;
/// World coordinates are divided by this before sampling.
const COORDINATE_SCALE: f64 = 1.5;

/// One weighted component of the blended height.
struct OctaveGenerator {
    noise: Fbm<OpenSimplex>,
    weight: f64,
}

/// Produces terrain heights in `[min_biome_height, max_biome_height]`.
pub struct NoiseField {
    octaves: Vec<OctaveGenerator>,
    weight_sum: f64,
    exponent: f64,
    min_height: f64,
    max_height: f64,
    /// Lowest and highest normalized blend seen so far
    observed: Cell<Option<(f64, f64)>>,
}

impl NoiseField {
    /// Creates the field for `seed` using the octave layout from `config`.
    ///
    /// Each octave gets its own seed drawn from a generator seeded with `seed`, so the
    /// same world seed always yields the same field.
    pub fn new(seed: u32, config: &WorldConfig) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed as u64);
        let octaves = config
            .octaves
            .iter()
            .map(|octave: &OctaveConfig| OctaveGenerator {
                noise: Fbm::<OpenSimplex>::new(rng.u32(..))
                    .set_octaves(FRACTAL_OCTAVES)
                    .set_lacunarity(FRACTAL_LACUNARITY)
                    .set_frequency(octave.frequency),
                weight: octave.weight,
            })
            .collect::<Vec<_>>();
        let weight_sum = octaves.iter().map(|octave| octave.weight).sum();

        NoiseField {
            octaves,
            weight_sum,
            exponent: config.height_exponent,
            min_height: config.min_biome_height as f64,
            max_height: config.max_biome_height as f64,
            observed: Cell::new(None),
        }
    }

    /// Terrain height of the world column `(x, z)`.
    pub fn height(&self, x: i32, z: i32) -> f64 {
        let point = [x as f64 / COORDINATE_SCALE, z as f64 / COORDINATE_SCALE];

        let blended = self
            .octaves
            .iter()
            .map(|octave| {
                let sample = remap(octave.noise.get(point), -1.0, 1.0, 0.0, 1.0).clamp(0.0, 1.0);
                sample * octave.weight
            })
            .sum::<f64>();

        let normalized = if self.weight_sum > 0.0 {
            (blended / self.weight_sum).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.observe(normalized);

        remap(
            normalized.powf(self.exponent),
            0.0,
            1.0,
            self.min_height,
            self.max_height,
        )
    }

    /// The `(min, max)` of the normalized blended noise over every sample taken, or
    /// `None` before the first one.
    pub fn observed_range(&self) -> Option<(f64, f64)> {
        self.observed.get()
    }

    fn observe(&self, value: f64) {
        let range = match self.observed.get() {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        };
        self.observed.set(Some(range));
    }
}

/// Linearly maps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}
