//! Navigation container
//!
//! The container owns every mounted navigator plus the linking context: the
//! registered [`LinkingOptions`] and the [`DeferredLink`] slot for links that
//! arrived before a navigator able to show them existed.

use crate::error::NavigatorError;
use crate::navigation::Navigation;
use crate::tree::{rehydrate, NavigatorId, NavigatorNode, Tree};
use crate::Result;
use nav_core::{DeferredLink, LinkingOptions, NavigationState};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Linking options and the deferred link slot of one container
#[derive(Debug, Default)]
pub struct LinkingContext {
    options: Option<LinkingOptions>,
    last_unhandled: DeferredLink,
}

impl LinkingContext {
    pub fn new(options: Option<LinkingOptions>) -> Self {
        Self {
            options,
            last_unhandled: DeferredLink::new(),
        }
    }

    pub fn options(&self) -> Option<&LinkingOptions> {
        self.options.as_ref()
    }

    /// Slot holding the last link no navigator could handle
    pub fn last_unhandled(&self) -> &DeferredLink {
        &self.last_unhandled
    }
}

/// What happened to an incoming link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// No linking options registered
    Ignored,
    /// The link matched no prefix or no screen
    Unresolvable,
    /// The root navigator showed the link right away
    Handled(NavigationState),
    /// No mounted navigator can show the link yet; it was stored
    Deferred,
}

/// How a navigator reacted to new route names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteNamesChange {
    /// Same names as before, nothing happened
    Unchanged,
    /// A scheduled state was applied
    Applied(NavigationState),
    /// Existing routes were kept where possible
    Reconciled(NavigationState),
}

/// Top-level owner of the navigator tree
#[derive(Debug, Default)]
pub struct NavigationContainer {
    tree: RwLock<Tree>,
    linking: LinkingContext,
}

impl NavigationContainer {
    /// Create a container, optionally with linking support
    pub fn new(options: Option<LinkingOptions>) -> Self {
        Self {
            tree: RwLock::new(Tree::default()),
            linking: LinkingContext::new(options),
        }
    }

    pub fn linking(&self) -> &LinkingContext {
        &self.linking
    }

    pub fn root(&self) -> Option<NavigatorId> {
        self.tree.read().root
    }

    /// Mount the top-level navigator
    pub fn mount_root(&self, route_names: Vec<String>) -> Result<NavigatorId> {
        let mut tree = self.tree.write();
        if tree.root.is_some() {
            return Err(NavigatorError::RootAlreadyMounted);
        }

        let state = NavigationState::initial(&route_names)?;
        let id = tree.insert(NavigatorNode {
            parent: None,
            state,
            pending: None,
            children: BTreeMap::new(),
        });
        tree.root = Some(id);

        debug!("Mounted root navigator {} with {:?}", id, route_names);
        Ok(id)
    }

    /// Mount a navigator inside the route named `route_name` of `parent`
    ///
    /// When that route carries nested state (from a link), the new navigator
    /// starts from it and the route's copy is consumed.
    pub fn mount_child(
        &self,
        parent: NavigatorId,
        route_name: &str,
        route_names: Vec<String>,
    ) -> Result<NavigatorId> {
        let mut tree = self.tree.write();
        let node = tree.get_mut(parent)?;

        let active_key = node.state.active_route().key.clone();
        let route = node
            .state
            .routes_mut()
            .iter_mut()
            .filter(|route| route.name == route_name)
            .max_by_key(|route| route.key == active_key)
            .ok_or_else(|| NavigatorError::RouteNotFound {
                navigator: parent,
                route: route_name.to_string(),
            })?;

        if node.children.contains_key(&route.key) {
            return Err(NavigatorError::ChildAlreadyMounted {
                navigator: parent,
                route: route_name.to_string(),
            });
        }

        let key = route.key.clone();
        let state = match std::mem::take(&mut route.child).into_state() {
            Some(nested) => {
                debug!("Navigator under '{}' starts from linked state", route_name);
                rehydrate(nested, &route_names)?
            }
            None => NavigationState::initial(&route_names)?,
        };

        let id = tree.insert(NavigatorNode {
            parent: Some((parent, key.clone())),
            state,
            pending: None,
            children: BTreeMap::new(),
        });
        tree.get_mut(parent)?.children.insert(key, id);

        debug!("Mounted navigator {} under {} '{}'", id, parent, route_name);
        Ok(id)
    }

    /// Unmount a navigator and its descendants
    pub fn unmount(&self, id: NavigatorId) -> Result<()> {
        let mut tree = self.tree.write();
        let parent = tree.get(id)?.parent.clone();

        if let Some((parent, key)) = parent {
            if let Ok(node) = tree.get_mut(parent) {
                node.children.remove(&key);
            }
        }

        let removed = tree.remove(id);
        debug!("Unmounted {} navigator(s)", removed.len());
        Ok(())
    }

    /// Live-tree handle for a mounted navigator
    pub fn navigation(&self, id: NavigatorId) -> Result<Navigation<'_>> {
        self.tree.read().get(id)?;
        Ok(Navigation::new(self, id))
    }

    /// State of a single navigator, without its children
    pub fn state(&self, id: NavigatorId) -> Result<NavigationState> {
        Ok(self.tree.read().get(id)?.state.clone())
    }

    /// State scheduled for the next route-name change of `id`
    pub fn pending_state(&self, id: NavigatorId) -> Result<Option<NavigationState>> {
        Ok(self.tree.read().get(id)?.pending.clone())
    }

    pub(crate) fn parent_of(&self, id: NavigatorId) -> Result<Option<NavigatorId>> {
        Ok(self.tree.read().get(id)?.parent.as_ref().map(|(p, _)| *p))
    }

    pub(crate) fn schedule(&self, id: NavigatorId, state: NavigationState) -> Result<()> {
        let mut tree = self.tree.write();
        let node = tree.get_mut(id)?;
        if node.pending.replace(state).is_some() {
            debug!("Replaced unapplied scheduled state of {}", id);
        }
        Ok(())
    }

    /// Whole tree state, children folded into the routes hosting them
    pub fn root_state(&self) -> Option<NavigationState> {
        let tree = self.tree.read();
        tree.root.and_then(|root| tree.assemble(root).ok())
    }

    /// Names of the focused route at each level, from the root down
    pub fn active_route_names(&self) -> Vec<String> {
        let tree = self.tree.read();
        let mut names = Vec::new();
        let mut current = tree.root;

        while let Some(id) = current {
            let Ok(node) = tree.get(id) else { break };
            let active = node.state.active_route();
            names.push(active.name.clone());
            current = node.children.get(&active.key).copied();
        }
        names
    }

    /// Change which screens navigator `id` renders
    ///
    /// This is the moment a scheduled state is applied: it is taken from the
    /// navigator and fitted onto the new names, so it applies exactly once.
    /// Without one, routes whose screens survive are kept. Children hosted by
    /// routes that disappear are unmounted.
    pub fn set_route_names(&self, id: NavigatorId, route_names: Vec<String>) -> Result<RouteNamesChange> {
        let mut tree = self.tree.write();
        let node = tree.get_mut(id)?;

        if node.state.route_names() == route_names.as_slice() {
            return Ok(RouteNamesChange::Unchanged);
        }

        // The scheduled state stays in place until it has been fitted
        let change = match node.pending.as_ref() {
            Some(pending) => {
                let state = rehydrate(pending.clone(), &route_names)?;
                node.pending = None;
                info!(
                    "Applied scheduled state to {}: active route '{}'",
                    id,
                    state.active_route_name()
                );
                node.state = state.clone();
                RouteNamesChange::Applied(state)
            }
            None => {
                let state = rehydrate(node.state.clone(), &route_names)?;
                node.state = state.clone();
                RouteNamesChange::Reconciled(state)
            }
        };

        let removed = tree.prune_children(id)?;
        if !removed.is_empty() {
            debug!("Route change on {} unmounted {} navigator(s)", id, removed.len());
        }
        Ok(change)
    }

    /// Handle an incoming link
    ///
    /// The link is applied right away when every mounted navigator along its
    /// path has a screen for it, and the deferred slot is cleared. Mounted
    /// navigators along the path stay mounted and take their level of the
    /// link. Otherwise it is kept in the deferred slot (replacing any older
    /// one) for a navigator that mounts later.
    pub fn open_url(&self, link: &str) -> Result<OpenOutcome> {
        let Some(options) = self.linking.options() else {
            return Ok(OpenOutcome::Ignored);
        };

        let Some(state) = options
            .extract_path(link)
            .and_then(|path| options.state_from_path(&path))
        else {
            debug!("Link {} does not resolve to any screen", link);
            return Ok(OpenOutcome::Unresolvable);
        };

        let mut tree = self.tree.write();
        let Some(root) = tree.root else {
            drop(tree);
            self.linking.last_unhandled.store(link);
            return Ok(OpenOutcome::Deferred);
        };

        if !showable(&tree, root, &state) {
            drop(tree);
            debug!("Mounted navigators cannot show {} yet, deferring", link);
            self.linking.last_unhandled.store(link);
            return Ok(OpenOutcome::Deferred);
        }

        apply_link(&mut tree, root, state)?;
        let applied = tree.assemble(root)?;
        drop(tree);

        // A handled link supersedes whatever was waiting
        self.linking.last_unhandled.clear();
        info!("Handled link {} on root navigator", link);
        Ok(OpenOutcome::Handled(applied))
    }

    /// Store a link for later resolution, replacing any older one
    pub fn capture_unhandled_link(&self, link: impl Into<String>) {
        self.linking.last_unhandled.store(link);
    }
}

/// Whether every mounted navigator along `state` has a screen for its level
///
/// Levels below a route without a mounted navigator are left to that
/// navigator, which starts from the nested state when it mounts.
fn showable(tree: &Tree, id: NavigatorId, state: &NavigationState) -> bool {
    let Ok(node) = tree.get(id) else {
        return false;
    };

    state.routes().iter().all(|route| {
        if !node.state.route_names().contains(&route.name) {
            return false;
        }
        let Some(nested) = route.child.state() else {
            return true;
        };

        let child = node
            .state
            .routes()
            .iter()
            .filter(|live| live.name == route.name)
            .find_map(|live| node.children.get(&live.key));
        match child {
            Some(&child) => showable(tree, child, nested),
            None => true,
        }
    })
}

/// Install a linked state on `id` and its mounted children, level by level
///
/// A linked route takes over the key of a live route with the same name, so
/// the navigator mounted under it survives and receives the nested level.
/// Nested levels without a mounted navigator stay on the route for the
/// navigator that mounts there later.
fn apply_link(tree: &mut Tree, id: NavigatorId, state: NavigationState) -> Result<()> {
    let node = tree.get(id)?;
    let route_names = node.state.route_names().to_vec();
    let (mut routes, index, _) = state.into_parts();

    let mut claimed: Vec<String> = Vec::new();
    let mut nested_levels = Vec::new();
    for route in &mut routes {
        let live = node
            .state
            .routes()
            .iter()
            .filter(|live| live.name == route.name && !claimed.contains(&live.key))
            .max_by_key(|live| node.children.contains_key(&live.key));
        let Some(live) = live else {
            continue;
        };

        route.key = live.key.clone();
        claimed.push(live.key.clone());
        if let Some(&child) = node.children.get(&live.key) {
            if let Some(nested) = std::mem::take(&mut route.child).into_state() {
                nested_levels.push((child, nested));
            }
        }
    }

    let linked = rehydrate(NavigationState::new(routes, index, route_names.clone())?, &route_names)?;
    let node = tree.get_mut(id)?;
    node.state = linked;
    node.pending = None;
    tree.prune_children(id)?;

    for (child, nested) in nested_levels {
        apply_link(tree, child, nested)?;
    }
    Ok(())
}

