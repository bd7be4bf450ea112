//! Subtree descent
//!
//! A parsed link describes the whole tree from the root down. A navigator
//! that is about to mount somewhere below the root only wants the part that
//! describes itself. Descent walks the first route of each level until it
//! reaches the level hosting the anchor (the focused screen of the real parent
//! navigator) and returns the state nested under it.

use nav_core::{ChildState, NavigationState};
use thiserror::Error;
use tracing::debug;

/// Why descent found no subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescentError {
    /// The chain ran out before any level's first route matched the anchor
    #[error("no level of the parsed state starts with the anchor route")]
    NoMatch,
    /// The anchor matched but hosts no nested state
    #[error("the anchor route carries no nested state")]
    NoNestedState,
}

/// Find the state nested under the first route named `anchor`
///
/// Only `routes[0]` of each level is followed, so the parsed state is expected
/// to hold a single branch down to the leaf.
pub fn descend<'a>(
    state: &'a NavigationState,
    anchor: &str,
) -> Result<&'a NavigationState, DescentError> {
    if state.routes().len() > 1 {
        debug!(
            "Descent level holds {} routes, following '{}'",
            state.routes().len(),
            state.first_route().name
        );
    }

    let first = state.first_route();
    if first.name == anchor {
        return first.child.state().ok_or(DescentError::NoNestedState);
    }

    match &first.child {
        ChildState::Nested(nested) => descend(nested, anchor),
        ChildState::Leaf => Err(DescentError::NoMatch),
    }
}
