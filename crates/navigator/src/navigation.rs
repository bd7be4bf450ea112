//! Live-tree handle for a single navigator

use crate::container::NavigationContainer;
use crate::tree::NavigatorId;
use crate::Result;
use nav_core::NavigationState;

/// Read access to one navigator's place in the tree, plus scheduling
///
/// Handles are cheap and borrow the container. Every query re-reads the
/// tree, so a handle whose navigator has since been unmounted reports
/// [`crate::NavigatorError::NotFound`].
#[derive(Clone, Copy)]
pub struct Navigation<'a> {
    container: &'a NavigationContainer,
    id: NavigatorId,
}

impl<'a> Navigation<'a> {
    pub(crate) fn new(container: &'a NavigationContainer, id: NavigatorId) -> Self {
        Self { container, id }
    }

    pub fn id(&self) -> NavigatorId {
        self.id
    }

    /// Navigator hosting this one, `None` for the top-level navigator
    pub fn get_parent(&self) -> Result<Option<Navigation<'a>>> {
        Ok(self
            .container
            .parent_of(self.id)?
            .map(|parent| Navigation::new(self.container, parent)))
    }

    /// Current state of this navigator
    pub fn get_state(&self) -> Result<NavigationState> {
        self.container.state(self.id)
    }

    pub fn route_names(&self) -> Result<Vec<String>> {
        Ok(self.get_state()?.route_names().to_vec())
    }

    /// Apply `state` the next time this navigator's route names change
    ///
    /// Nothing is visible until then. A later call replaces an earlier state
    /// that has not been applied yet.
    pub fn set_state_for_next_route_names_change(&self, state: NavigationState) -> Result<()> {
        self.container.schedule(self.id, state)
    }
}

impl std::fmt::Debug for Navigation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigation").field("id", &self.id).finish()
    }
}
