//! Scripted sign-in scenarios
//!
//! A scenario is an ordered list of steps run against one navigation
//! container. Navigators are referred to by the label given when they were
//! mounted:
//!
//! ```toml
//! name = "sign in, then open profile"
//!
//! [[step]]
//! action = "mount_root"
//! label = "root"
//! routes = ["SignIn"]
//!
//! [[step]]
//! action = "capture"
//! url = "rn://profile"
//!
//! [[step]]
//! action = "resolve"
//! navigator = "root"
//! screen = "SignIn"
//!
//! [[step]]
//! action = "set_route_names"
//! navigator = "root"
//! routes = ["Home", "Profile"]
//!
//! [[step]]
//! action = "expect_active"
//! routes = ["Profile"]
//! ```

use crate::util::format_chain;
use anyhow::{Context, Result};
use linking::{ResolveOutcome, UnhandledLinking};
use navigator::{NavigationContainer, NavigatorId, OpenOutcome, RouteNamesChange};
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,

    /// Run without linking options
    #[serde(default)]
    pub no_linking: bool,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse scenario")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    MountRoot {
        label: String,
        routes: Vec<String>,
    },
    MountChild {
        label: String,
        parent: String,
        route: String,
        routes: Vec<String>,
    },
    /// Deliver a link through the container's listener
    OpenUrl { url: String },
    /// Store a link directly in the deferred slot
    Capture { url: String },
    Resolve { navigator: String, screen: String },
    SetRouteNames {
        navigator: String,
        routes: Vec<String>,
    },
    Unmount { navigator: String },
    ExpectActive { routes: Vec<String> },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::MountRoot { label, routes } => write!(f, "mount root '{}' {:?}", label, routes),
            Step::MountChild {
                label,
                parent,
                route,
                routes,
            } => write!(f, "mount '{}' in {}/{} {:?}", label, parent, route, routes),
            Step::OpenUrl { url } => write!(f, "open {}", url),
            Step::Capture { url } => write!(f, "capture {}", url),
            Step::Resolve { navigator, screen } => write!(f, "resolve from {}/{}", navigator, screen),
            Step::SetRouteNames { navigator, routes } => {
                write!(f, "set '{}' routes {:?}", navigator, routes)
            }
            Step::Unmount { navigator } => write!(f, "unmount '{}'", navigator),
            Step::ExpectActive { routes } => write!(f, "expect active {:?}", routes),
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub index: usize,
    pub description: String,
    pub outcome: String,
    pub passed: bool,
}

/// Runs steps against a container
///
/// Resolvers are kept per navigator and screen, the way a screen keeps its
/// resolver across renders.
pub struct Simulation<'a> {
    container: &'a NavigationContainer,
    labels: HashMap<String, NavigatorId>,
    resolvers: HashMap<(NavigatorId, String), UnhandledLinking<'a>>,
}

impl<'a> Simulation<'a> {
    pub fn new(container: &'a NavigationContainer) -> Self {
        Self {
            container,
            labels: HashMap::new(),
            resolvers: HashMap::new(),
        }
    }

    fn navigator(&self, label: &str) -> Result<NavigatorId> {
        self.labels
            .get(label)
            .copied()
            .with_context(|| format!("Unknown navigator label '{}'", label))
    }

    /// Run every step, stopping at the first one that errors
    pub fn run(&mut self, scenario: &Scenario) -> Result<Vec<StepReport>> {
        scenario
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let (outcome, passed) = self
                    .run_step(step)
                    .with_context(|| format!("Step {} ({}) failed", i + 1, step))?;
                Ok(StepReport {
                    index: i + 1,
                    description: step.to_string(),
                    outcome,
                    passed,
                })
            })
            .collect()
    }

    /// Run a single step, returning its outcome and whether it passed
    pub fn run_step(&mut self, step: &Step) -> Result<(String, bool)> {
        let container = self.container;
        debug!("Running step: {}", step);

        let outcome = match step {
            Step::MountRoot { label, routes } => {
                let id = container.mount_root(routes.clone())?;
                self.labels.insert(label.clone(), id);
                format!("mounted {}", id)
            }
            Step::MountChild {
                label,
                parent,
                route,
                routes,
            } => {
                let parent = self.navigator(parent)?;
                let id = container.mount_child(parent, route, routes.clone())?;
                self.labels.insert(label.clone(), id);
                format!("mounted {}, active {:?}", id, container.active_route_names())
            }
            Step::OpenUrl { url } => match container.open_url(url)? {
                OpenOutcome::Ignored => "ignored".to_string(),
                OpenOutcome::Unresolvable => "unresolvable".to_string(),
                OpenOutcome::Handled(state) => format!("handled: {}", format_chain(&state)),
                OpenOutcome::Deferred => "deferred".to_string(),
            },
            Step::Capture { url } => match container.linking().last_unhandled().store(url.as_str()) {
                Some(previous) => format!("stored, replaced {}", previous),
                None => "stored".to_string(),
            },
            Step::Resolve { navigator, screen } => {
                let id = self.navigator(navigator)?;
                let linking = match self.resolvers.entry((id, screen.clone())) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => {
                        entry.insert(UnhandledLinking::new(container, id, screen.as_str())?)
                    }
                };
                describe_resolution(&linking.resolve_pending_link()?)
            }
            Step::SetRouteNames { navigator, routes } => {
                let id = self.navigator(navigator)?;
                match container.set_route_names(id, routes.clone())? {
                    RouteNamesChange::Unchanged => "unchanged".to_string(),
                    RouteNamesChange::Applied(state) => format!("applied: {}", format_chain(&state)),
                    RouteNamesChange::Reconciled(state) => {
                        format!("reconciled: {}", format_chain(&state))
                    }
                }
            }
            Step::Unmount { navigator } => {
                let id = self.navigator(navigator)?;
                container.unmount(id)?;
                self.labels.remove(navigator);
                format!("unmounted {}", id)
            }
            Step::ExpectActive { routes } => {
                let active = container.active_route_names();
                if active != *routes {
                    return Ok((format!("expected {:?}, got {:?}", routes, active), false));
                }
                "ok".to_string()
            }
        };

        Ok((outcome, true))
    }
}

fn describe_resolution(outcome: &ResolveOutcome) -> String {
    match outcome {
        ResolveOutcome::Scheduled { state, anchor } => match anchor {
            Some(anchor) => format!("scheduled under '{}': {}", anchor, format_chain(state)),
            None => format!("scheduled: {}", format_chain(state)),
        },
        ResolveOutcome::Unresolvable { path } => format!("unresolvable path '{}'", path),
        ResolveOutcome::NoMatch {
            anchor: Some(anchor),
        } => format!("no-match under '{}'", anchor),
        ResolveOutcome::NoNestedState { anchor } => format!("no-nested-state under '{}'", anchor),
        other => other.label().to_string(),
    }
}
