use std::path::Path;

use log::warn;

use crate::engine::Tile;
use crate::error::ConfigError;

/// Engine tunables, loadable from TOML.
///
/// ```toml
/// target_tile = 2048
/// four_probability = 0.1
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A merge producing this value (or more) wins the game.
    pub target_tile: Tile,
    /// Chance that a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            target_tile: 2048,
            four_probability: 0.1,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_tile < 4 || !self.target_tile.is_power_of_two() {
            return Err(ConfigError::Validation(
                "target_tile must be a power of two >= 4".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::Validation(
                "four_probability must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
