//! Error types
//!
//! The animation core itself is infallible; only the edges (config files and
//! parsing user-supplied text) can fail.

use std::path::PathBuf;

/// Failure loading or saving a `BitConfig`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read or write config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine the platform config directory")]
    NoConfigDir,
}

/// Failure parsing text into a Bit type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown state '{0}' (expected idle, yes or no)")]
    UnknownState(String),

    #[error("Unknown action '{0}' (expected yes, no, release, blur or ask)")]
    UnknownAction(String),

    #[error("Invalid event '{0}' (expected SECONDS:ACTION)")]
    InvalidEvent(String),
}
