//! Navigator tree and deferred state application
//!
//! This crate provides:
//! - `NavigationContainer`: owner of mounted navigators and the linking context
//! - `Navigation`: live-tree handle (parent, state, scheduling)
//! - Apply-once state scheduling on route-name changes
//! - Incoming link capture with deferral

pub mod container;
pub mod error;
pub mod navigation;
pub mod tree;

// Re-exports
pub use container::{LinkingContext, NavigationContainer, OpenOutcome, RouteNamesChange};
pub use error::NavigatorError;
pub use navigation::Navigation;
pub use tree::{rehydrate, NavigatorId};

/// Result type for navigator operations
pub type Result<T> = std::result::Result<T, NavigatorError>;
