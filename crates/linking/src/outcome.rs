//! Resolution outcomes

use nav_core::NavigationState;

/// Result of one attempt to resolve the pending link
///
/// Only `Scheduled` clears the deferred slot. Every other variant leaves the
/// slot as it was so a navigator elsewhere in the tree can still pick it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// State registered for the navigator's next route-name change
    Scheduled {
        state: NavigationState,
        /// Parent route the subtree was found under, `None` at the top level
        anchor: Option<String>,
    },
    /// The container has no linking options
    NoConfiguration,
    /// Nothing is waiting in the deferred slot
    NoPendingLink,
    /// The parser produced no state for the path
    Unresolvable { path: String },
    /// The parsed state doesn't pass through the parent's focused screen
    NoMatch { anchor: Option<String> },
    /// The anchor matched but has nothing nested below it
    NoNestedState { anchor: String },
}

impl ResolveOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ResolveOutcome::Scheduled { .. })
    }

    /// Scheduled state, if any
    pub fn scheduled_state(&self) -> Option<&NavigationState> {
        match self {
            ResolveOutcome::Scheduled { state, .. } => Some(state),
            _ => None,
        }
    }

    /// Short label for logs and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            ResolveOutcome::Scheduled { .. } => "scheduled",
            ResolveOutcome::NoConfiguration => "no-configuration",
            ResolveOutcome::NoPendingLink => "no-pending-link",
            ResolveOutcome::Unresolvable { .. } => "unresolvable",
            ResolveOutcome::NoMatch { .. } => "no-match",
            ResolveOutcome::NoNestedState { .. } => "no-nested-state",
        }
    }
}
