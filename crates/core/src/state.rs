//! Navigation state tree
//!
//! A [`NavigationState`] describes one navigator: its routes, which of them is
//! active, and the names of every screen the navigator can show. A route that
//! hosts a child navigator carries that navigator's state in
//! [`ChildState::Nested`].

use crate::error::StateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ulid::Ulid;

/// Route parameters (path params and query params, already split out)
pub type Params = BTreeMap<String, String>;

/// State of a navigator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawState", rename_all = "camelCase")]
pub struct NavigationState {
    /// Active route position, always `< routes.len()`
    index: usize,
    /// Route records, never empty
    routes: Vec<RouteRecord>,
    /// Every screen the owning navigator declares
    route_names: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawState {
    #[serde(default)]
    index: usize,
    routes: Vec<RouteRecord>,
    #[serde(default)]
    route_names: Vec<String>,
}

impl TryFrom<RawState> for NavigationState {
    type Error = StateError;

    fn try_from(raw: RawState) -> Result<Self, Self::Error> {
        let mut routes = raw.routes;
        for route in &mut routes {
            route.ensure_key();
        }

        let route_names = if raw.route_names.is_empty() {
            routes.iter().map(|r| r.name.clone()).collect()
        } else {
            raw.route_names
        };
        Self::new(routes, raw.index, route_names)
    }
}

impl NavigationState {
    /// Create a state, validating the route list and index
    pub fn new(
        routes: Vec<RouteRecord>,
        index: usize,
        route_names: Vec<String>,
    ) -> Result<Self, StateError> {
        if routes.is_empty() {
            return Err(StateError::EmptyRoutes);
        }
        if index >= routes.len() {
            return Err(StateError::IndexOutOfBounds {
                index,
                len: routes.len(),
            });
        }

        Ok(Self {
            index,
            routes,
            route_names,
        })
    }

    /// A one-route state whose only screen is `route`
    pub fn single(route: RouteRecord) -> Self {
        Self {
            index: 0,
            route_names: vec![route.name.clone()],
            routes: vec![route],
        }
    }

    /// Initial state for a navigator showing `route_names`, focused on the first one
    pub fn initial(route_names: &[String]) -> Result<Self, StateError> {
        let first = route_names.first().ok_or(StateError::EmptyRoutes)?;
        Self::new(vec![RouteRecord::new(first.clone())], 0, route_names.to_vec())
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Mutable access to route records (the route count stays fixed)
    pub fn routes_mut(&mut self) -> &mut [RouteRecord] {
        &mut self.routes
    }

    pub fn route_names(&self) -> &[String] {
        &self.route_names
    }

    /// The focused route
    pub fn active_route(&self) -> &RouteRecord {
        &self.routes[self.index]
    }

    pub fn active_route_name(&self) -> &str {
        &self.active_route().name
    }

    /// First route of this level (the branch descent follows)
    pub fn first_route(&self) -> &RouteRecord {
        &self.routes[0]
    }

    /// Number of levels along the `routes[0]` chain, this level included
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let Some(nested) = current.first_route().child.state() {
            depth += 1;
            current = nested;
        }
        depth
    }

    /// Find a route by key
    pub fn route_by_key(&self, key: &str) -> Option<&RouteRecord> {
        self.routes.iter().find(|r| r.key == key)
    }

    /// Consume the state, returning its parts
    pub fn into_parts(self) -> (Vec<RouteRecord>, usize, Vec<String>) {
        (self.routes, self.index, self.route_names)
    }
}

/// A single route in a navigator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Screen name
    pub name: String,
    /// Unique key within the container
    #[serde(default)]
    pub key: String,
    /// Route parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,
    /// Nested navigator state, if this route hosts one
    #[serde(rename = "state", default, skip_serializing_if = "ChildState::is_leaf")]
    pub child: ChildState,
}

impl RouteRecord {
    /// Create a leaf route with a fresh key
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: format!("{}-{}", name, Ulid::new()),
            name,
            params: Params::new(),
            child: ChildState::Leaf,
        }
    }

    /// Attach parameters
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Attach a nested navigator state
    pub fn with_state(mut self, state: NavigationState) -> Self {
        self.child = ChildState::Nested(Box::new(state));
        self
    }

    /// Give the route a key if it came in without one
    fn ensure_key(&mut self) {
        if self.key.is_empty() {
            self.key = format!("{}-{}", self.name, Ulid::new());
        }
    }
}

/// Whether a route hosts a child navigator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<NavigationState>", into = "Option<NavigationState>")]
pub enum ChildState {
    /// Plain screen
    #[default]
    Leaf,
    /// Screen hosting a navigator with this state
    Nested(Box<NavigationState>),
}

impl ChildState {
    pub fn is_leaf(&self) -> bool {
        matches!(self, ChildState::Leaf)
    }

    /// Nested state, if any
    pub fn state(&self) -> Option<&NavigationState> {
        match self {
            ChildState::Leaf => None,
            ChildState::Nested(state) => Some(state),
        }
    }

    pub fn into_state(self) -> Option<NavigationState> {
        match self {
            ChildState::Leaf => None,
            ChildState::Nested(state) => Some(*state),
        }
    }
}

impl From<Option<NavigationState>> for ChildState {
    fn from(state: Option<NavigationState>) -> Self {
        match state {
            Some(state) => ChildState::Nested(Box::new(state)),
            None => ChildState::Leaf,
        }
    }
}

impl From<ChildState> for Option<NavigationState> {
    fn from(child: ChildState) -> Self {
        child.into_state()
    }
}
