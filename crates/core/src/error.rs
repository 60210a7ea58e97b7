//! Error type for configuration loading.

use thiserror::Error;

/// Errors that can occur while loading the curfew config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Filesystem I/O error (missing file, permissions, ...).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}
