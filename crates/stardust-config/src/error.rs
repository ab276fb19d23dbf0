//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when loading or rendering configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize config to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    /// No home directory to derive the platform config path from.
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
}
