use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// A grid that cannot occur in play.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("tile {value} at ({row}, {col}) is not a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// A text command that does not name a direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised direction '{0}'")]
pub struct ParseDirectionError(pub String);
