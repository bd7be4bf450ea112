//! Deferred link slot
//!
//! Holds the most recent external link that no mounted navigator could handle.
//! The slot belongs to one navigation container; clones share the same cell.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Shared holder for the last unhandled link
#[derive(Debug, Clone, Default)]
pub struct DeferredLink {
    slot: Arc<Mutex<Option<String>>>,
}

impl DeferredLink {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a link, replacing any unresolved one
    ///
    /// Returns the link that was overwritten.
    pub fn store(&self, link: impl Into<String>) -> Option<String> {
        let link = link.into();
        debug!("Storing deferred link {}", link);
        self.slot.lock().replace(link)
    }

    /// Current pending link, if any
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    /// Remove and return the pending link
    pub fn take(&self) -> Option<String> {
        self.slot.lock().take()
    }

    /// Drop the pending link
    pub fn clear(&self) {
        if let Some(link) = self.take() {
            debug!("Cleared deferred link {}", link);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().is_some()
    }
}
