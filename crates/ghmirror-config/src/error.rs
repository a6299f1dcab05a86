//! Error type for configuration loading/saving and path discovery.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write config file {path}: {source}")]
    Write { path: String, source: std::io::Error },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("could not determine home directory")]
    NoHomeDir,
}
