//! # World Configuration
//!
//! Tunables for terrain generation and meshing. Every field has a default matching the
//! reference world, so a config file only needs the values it changes:
//!
//! ```json
//! { "seed": 42, "load_radius": 4, "tree_chance": 0.05 }
//! ```
//!
//! Chunk dimensions are not configurable; see [`crate::engine_state::voxels::chunk`].

use std::{error::Error, fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

/// Frequency and relative weight of one terrain octave.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OctaveConfig {
    /// Sampling frequency of the octave's fractal noise
    pub frequency: f64,
    /// Share of the blended height, relative to the other octaves
    pub weight: f64,
}

/// Configuration consumed by the generation context, the chunk manager and the mesher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed. Drawn at random once per process when absent.
    pub seed: Option<u32>,
    /// Chunks in `[-load_radius, load_radius]²` are created eagerly. The outermost ring
    /// is generated as placeholder air.
    pub load_radius: i32,
    /// Water fills air up to this height.
    pub sea_level: i32,
    /// Lowest terrain height the noise field produces.
    pub min_biome_height: i32,
    /// Highest terrain height the noise field produces.
    pub max_biome_height: i32,
    /// Probability of a tree being attempted on each column.
    pub tree_chance: f64,
    /// Capacity of one chunk's slot in the shared geometry buffer.
    pub max_vertices_per_chunk: usize,
    /// The three blended noise octaves, broadest first.
    pub octaves: [OctaveConfig; 3],
    /// Applied to the normalized height to bias terrain towards lower elevations.
    pub height_exponent: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: None,
            load_radius: 8,
            sea_level: 85,
            min_biome_height: 55,
            max_biome_height: 145,
            tree_chance: 0.02,
            max_vertices_per_chunk: 98_304,
            octaves: [
                OctaveConfig {
                    frequency: 0.00573,
                    weight: 1.0,
                },
                OctaveConfig {
                    frequency: 0.02,
                    weight: 0.2,
                },
                OctaveConfig {
                    frequency: 0.1,
                    weight: 0.03,
                },
            ],
            height_exponent: 1.19,
        }
    }
}

/// Errors produced while loading a [`WorldConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid config JSON.
    Parse(serde_json::Error),
    /// A value is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "Failed to read world config: {}", err),
            ConfigError::Parse(err) => write!(f, "Failed to parse world config: {}", err),
            ConfigError::Invalid(msg) => write!(f, "Invalid world config: {}", msg),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl WorldConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON config at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Checks the cross-field constraints serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        use crate::engine_state::voxels::chunk::CHUNK_HEIGHT;

        if self.load_radius < 0 {
            return Err(ConfigError::Invalid(format!(
                "load_radius must not be negative, got {}",
                self.load_radius
            )));
        }
        if self.min_biome_height >= self.max_biome_height {
            return Err(ConfigError::Invalid(format!(
                "min_biome_height ({}) must be below max_biome_height ({})",
                self.min_biome_height, self.max_biome_height
            )));
        }
        if self.min_biome_height < 7 || self.max_biome_height >= CHUNK_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "biome heights must lie in [7, {}), got [{}, {}]",
                CHUNK_HEIGHT, self.min_biome_height, self.max_biome_height
            )));
        }
        if !(0.0..=1.0).contains(&self.tree_chance) {
            return Err(ConfigError::Invalid(format!(
                "tree_chance must be a probability, got {}",
                self.tree_chance
            )));
        }
        if self.octaves.iter().any(|octave| octave.weight < 0.0)
            || self.octaves.iter().map(|octave| octave.weight).sum::<f64>() <= 0.0
        {
            return Err(ConfigError::Invalid(
                "octave weights must be non-negative with a positive sum".to_string(),
            ));
        }
        if self.max_vertices_per_chunk == 0 {
            return Err(ConfigError::Invalid(
                "max_vertices_per_chunk must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "seed": 7, "load_radius": 2 }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.load_radius, 2);
        assert_eq!(config.sea_level, 85);
        assert_eq!(config.octaves[1].weight, 0.2);
    }

    #[test]
    fn inverted_biome_bounds_are_rejected() {
        let result =
            WorldConfig::from_json_str(r#"{ "min_biome_height": 150, "max_biome_height": 100 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = WorldConfig::from_json_str("{ seed: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = WorldConfig::load("/definitely/not/here/world.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
