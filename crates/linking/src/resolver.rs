//! Deferred link resolver
//!
//! A screen that gates a conditionally rendered navigator (a sign-in screen in
//! front of the signed-in stack) creates an [`UnhandledLinking`] and calls
//! [`UnhandledLinking::resolve_pending_link`] right before it flips the
//! condition. The pending link is parsed, narrowed to the subtree for the
//! navigator that is about to mount, and registered to be applied when that
//! navigator's route names change.

use crate::descent::{descend, DescentError};
use crate::outcome::ResolveOutcome;
use crate::Result;
use nav_core::DeferredLink;
use navigator::{LinkingContext, Navigation, NavigationContainer, NavigatorId};
use tracing::{debug, info, warn};

/// Resolver bound to one screen of one navigator
#[derive(Debug)]
pub struct UnhandledLinking<'a> {
    navigation: Navigation<'a>,
    linking: &'a LinkingContext,
    route_name: String,
}

impl<'a> UnhandledLinking<'a> {
    /// Bind a resolver to the screen `route_name` of navigator `id`
    ///
    /// Fails when `id` is not mounted in `container`. Warns once when the
    /// container has no linking options, since every resolution will then be
    /// a no-op.
    pub fn new(
        container: &'a NavigationContainer,
        id: NavigatorId,
        route_name: impl Into<String>,
    ) -> Result<Self> {
        let navigation = container.navigation(id)?;
        let route_name = route_name.into();
        let linking = container.linking();

        if linking.options().is_none() {
            warn!(
                "Deferred link resolution is used inside the '{}' screen without linking options. \
                 This has no effect. Either register linking options with the NavigationContainer \
                 or remove the resolver.",
                route_name
            );
        }

        Ok(Self {
            navigation,
            linking,
            route_name,
        })
    }

    /// Slot shared with the link capture side
    pub fn last_unhandled(&self) -> &DeferredLink {
        self.linking.last_unhandled()
    }

    /// Resolve the pending link for the navigator about to mount
    ///
    /// Call this before the state change that mounts the navigator. On
    /// success the resolved state is scheduled and the slot is cleared; every
    /// other outcome leaves the slot alone. Errors only when the navigator is
    /// no longer part of the container.
    pub fn resolve_pending_link(&self) -> Result<ResolveOutcome> {
        let Some(options) = self.linking.options() else {
            debug!("No linking options, nothing to resolve");
            return Ok(ResolveOutcome::NoConfiguration);
        };

        let Some(link) = self.last_unhandled().peek() else {
            debug!("No pending link for '{}'", self.route_name);
            return Ok(ResolveOutcome::NoPendingLink);
        };

        let path = options.extract_path(&link).unwrap_or_default();
        let Some(root_state) = options.state_from_path(&path) else {
            debug!("Pending link {} resolves to no state", link);
            return Ok(ResolveOutcome::Unresolvable { path });
        };

        let (state, anchor) = match self.navigation.get_parent()? {
            None => (root_state, None),
            Some(parent) => {
                let parent_state = parent.get_state()?;
                let Some(anchor) = parent_state
                    .route_names()
                    .get(parent_state.index())
                    .cloned()
                else {
                    debug!("Parent {} has no anchor route name", parent.id());
                    return Ok(ResolveOutcome::NoMatch { anchor: None });
                };

                match descend(&root_state, &anchor) {
                    Ok(inner) => (inner.clone(), Some(anchor)),
                    Err(DescentError::NoMatch) => {
                        debug!("Pending link {} does not pass through '{}'", link, anchor);
                        return Ok(ResolveOutcome::NoMatch {
                            anchor: Some(anchor),
                        });
                    }
                    Err(DescentError::NoNestedState) => {
                        debug!("Pending link {} stops at '{}'", link, anchor);
                        return Ok(ResolveOutcome::NoNestedState { anchor });
                    }
                }
            }
        };

        self.navigation
            .set_state_for_next_route_names_change(state.clone())?;
        self.last_unhandled().clear();

        info!(
            "Scheduled link {} for navigator {}: active route '{}'",
            link,
            self.navigation.id(),
            state.active_route_name()
        );
        Ok(ResolveOutcome::Scheduled { state, anchor })
    }
}
