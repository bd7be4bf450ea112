//! Deferlink Core - navigation state and linking primitives
//!
//! This crate provides:
//! - Navigation state tree (`NavigationState`, `RouteRecord`, `ChildState`)
//! - Linking configuration (prefixes, screen paths, platform)
//! - URL prefix stripping
//! - Standard path-to-state parser
//! - Deferred link slot shared between capture and resolution

pub mod config;
pub mod deferred;
pub mod error;
pub mod parse;
pub mod path;
pub mod state;

// Re-export main types for convenience
pub use config::{LinkingConfig, LinkingOptions, NestedScreen, Platform, ScreenConfig};
pub use deferred::DeferredLink;
pub use error::{ConfigError, StateError};
pub use parse::{get_state_from_path, StandardParser, StateParser};
pub use path::extract_path_from_url;
pub use state::{ChildState, NavigationState, Params, RouteRecord};

/// Common result type used throughout deferlink-core
pub type Result<T> = std::result::Result<T, ConfigError>;
