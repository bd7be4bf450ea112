//! Arena of mounted navigators
//!
//! Navigators are addressed by [`NavigatorId`]. A child records the key of the
//! parent route that hosts it, so removing that route unmounts the child.

use crate::error::NavigatorError;
use nav_core::{ChildState, NavigationState, RouteRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a mounted navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NavigatorId(usize);

impl fmt::Display for NavigatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NavigatorNode {
    /// Parent navigator and the key of the route hosting this one
    pub parent: Option<(NavigatorId, String)>,
    pub state: NavigationState,
    /// State waiting for the next route-name change
    pub pending: Option<NavigationState>,
    /// Route key -> child navigator
    pub children: BTreeMap<String, NavigatorId>,
}

#[derive(Debug, Default)]
pub(crate) struct Tree {
    nodes: Vec<Option<NavigatorNode>>,
    pub root: Option<NavigatorId>,
}

impl Tree {
    pub fn get(&self, id: NavigatorId) -> Result<&NavigatorNode, NavigatorError> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(NavigatorError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: NavigatorId) -> Result<&mut NavigatorNode, NavigatorError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(NavigatorError::NotFound(id))
    }

    pub fn insert(&mut self, node: NavigatorNode) -> NavigatorId {
        let id = NavigatorId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    /// Remove a navigator and everything below it, returning the removed ids
    pub fn remove(&mut self, id: NavigatorId) -> Vec<NavigatorId> {
        let mut removed = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                stack.extend(node.children.values().copied());
                removed.push(current);
            }
        }

        if self.root == Some(id) {
            self.root = None;
        }
        removed
    }

    /// Unmount children whose hosting route is gone from `id`'s state
    pub fn prune_children(&mut self, id: NavigatorId) -> Result<Vec<NavigatorId>, NavigatorError> {
        let node = self.get_mut(id)?;
        let stale: Vec<(String, NavigatorId)> = node
            .children
            .iter()
            .filter(|(key, _)| node.state.route_by_key(key).is_none())
            .map(|(key, child)| (key.clone(), *child))
            .collect();

        for (key, _) in &stale {
            node.children.remove(key);
        }

        Ok(stale
            .into_iter()
            .flat_map(|(_, child)| self.remove(child))
            .collect())
    }

    /// Full state of `id`, with mounted children folded into their routes
    pub fn assemble(&self, id: NavigatorId) -> Result<NavigationState, NavigatorError> {
        let node = self.get(id)?;
        let mut state = node.state.clone();

        for route in state.routes_mut() {
            if let Some(child) = node.children.get(&route.key) {
                route.child = ChildState::Nested(Box::new(self.assemble(*child)?));
            }
        }
        Ok(state)
    }
}

/// Fit a state computed elsewhere onto a navigator showing `route_names`
///
/// Routes the navigator cannot show are dropped. The focused route stays
/// focused when it survives, otherwise the last surviving route is. Falls back
/// to the initial state when nothing survives.
pub fn rehydrate(
    partial: NavigationState,
    route_names: &[String],
) -> Result<NavigationState, NavigatorError> {
    let active_key = partial.active_route().key.clone();
    let (routes, _, _) = partial.into_parts();

    let routes: Vec<RouteRecord> = routes
        .into_iter()
        .filter(|route| route_names.contains(&route.name))
        .collect();

    if routes.is_empty() {
        return Ok(NavigationState::initial(route_names)?);
    }

    let index = routes
        .iter()
        .position(|route| route.key == active_key)
        .unwrap_or(routes.len() - 1);

    Ok(NavigationState::new(routes, index, route_names.to_vec())?)
}
