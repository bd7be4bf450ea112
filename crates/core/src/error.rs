//! Error types for navigation state and linking configuration

use std::path::PathBuf;
use thiserror::Error;

/// Invalid navigation state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("navigation state must contain at least one route")]
    EmptyRoutes,

    #[error("route index {index} is out of bounds for {len} routes")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Failure loading linking configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read linking config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid linking config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("linking config must declare at least one screen")]
    NoScreens,
}
