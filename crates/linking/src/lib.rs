//! Deferred deep link resolution
//!
//! This crate provides:
//! - `UnhandledLinking`: resolves the container's pending link for a
//!   navigator that is about to mount, and schedules it
//! - Subtree descent from a parsed root state to a nested navigator
//! - `ResolveOutcome`: what a resolution attempt did

pub mod descent;
pub mod error;
pub mod outcome;
pub mod resolver;

// Re-exports
pub use descent::{descend, DescentError};
pub use error::LinkingError;
pub use outcome::ResolveOutcome;
pub use resolver::UnhandledLinking;

/// Result type for linking operations
pub type Result<T> = std::result::Result<T, LinkingError>;
