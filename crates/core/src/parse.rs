//! Path to navigation state parsing
//!
//! The screen configuration is flattened into one pattern per addressable
//! screen. A pattern is the screen's own path appended to its parent's
//! (unless the screen is `exact`). The most specific matching pattern wins and
//! its chain of screen names becomes a nested, single-branch state.

use crate::config::{LinkingConfig, ScreenConfig};
use crate::state::{NavigationState, Params, RouteRecord};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::debug;

/// Converts a path into navigation state
pub trait StateParser: Send + Sync {
    fn parse(&self, path: &str, config: &LinkingConfig) -> Option<NavigationState>;
}

impl<F> StateParser for F
where
    F: Fn(&str, &LinkingConfig) -> Option<NavigationState> + Send + Sync,
{
    fn parse(&self, path: &str, config: &LinkingConfig) -> Option<NavigationState> {
        self(path, config)
    }
}

/// Default parser, see [`get_state_from_path`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardParser;

impl StateParser for StandardParser {
    fn parse(&self, path: &str, config: &LinkingConfig) -> Option<NavigationState> {
        get_state_from_path(path, config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param { name: String, optional: bool },
    CatchAll,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw == "*" {
            Segment::CatchAll
        } else if let Some(param) = raw.strip_prefix(':') {
            match param.strip_suffix('?') {
                Some(name) => Segment::Param {
                    name: name.to_string(),
                    optional: true,
                },
                None => Segment::Param {
                    name: param.to_string(),
                    optional: false,
                },
            }
        } else {
            Segment::Static(raw.to_string())
        }
    }
}

/// Pattern segment tagged with the chain level that declared it
type Owned = (Segment, usize);

#[derive(Debug, Clone)]
struct RoutePattern {
    chain: Vec<String>,
    segments: Vec<Owned>,
}

impl RoutePattern {
    fn has_catch_all(&self) -> bool {
        self.segments.iter().any(|(s, _)| *s == Segment::CatchAll)
    }

    fn static_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|(s, _)| matches!(s, Segment::Static(_)))
            .count()
    }

    /// Match path segments, returning `(level, name, value)` params
    fn matches(&self, path: &[&str]) -> Option<Vec<(usize, String, String)>> {
        let mut position = 0;
        let mut params = Vec::new();

        for (segment, level) in &self.segments {
            match segment {
                Segment::Static(expected) => {
                    if *path.get(position)? != expected.as_str() {
                        return None;
                    }
                    position += 1;
                }
                Segment::Param { name, optional } => match path.get(position) {
                    Some(value) => {
                        params.push((*level, name.clone(), decode(value)));
                        position += 1;
                    }
                    None if *optional => {}
                    None => return None,
                },
                Segment::CatchAll => position = path.len(),
            }
        }

        (position == path.len()).then_some(params)
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn collect_patterns(
    screens: &BTreeMap<String, ScreenConfig>,
    prefix: &[Owned],
    chain: &mut Vec<String>,
    out: &mut Vec<RoutePattern>,
) {
    for (name, screen) in screens {
        chain.push(name.clone());
        let level = chain.len() - 1;

        let mut pattern: Vec<Owned> = if screen.is_exact() {
            Vec::new()
        } else {
            prefix.to_vec()
        };

        if let Some(path) = screen.path() {
            pattern.extend(
                split_path(path)
                    .iter()
                    .map(|raw| (Segment::parse(raw), level)),
            );
            out.push(RoutePattern {
                chain: chain.clone(),
                segments: pattern.clone(),
            });
        }

        if let Some(children) = screen.screens() {
            collect_patterns(children, &pattern, chain, out);
        }

        chain.pop();
    }
}

fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

fn parse_query(query: &str) -> Params {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

/// Standard path parser
///
/// `outer/profile?tab=posts` with `Outer -> outer { Profile -> profile }`
/// gives `Outer > Profile { tab: posts }`. Returns `None` when no screen
/// pattern matches the path.
pub fn get_state_from_path(path: &str, config: &LinkingConfig) -> Option<NavigationState> {
    let path = path.split('#').next().unwrap_or_default();
    let (path, query) = match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    };

    let segments = split_path(path);
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    let mut patterns = Vec::new();
    collect_patterns(&config.screens, &[], &mut Vec::new(), &mut patterns);
    patterns.sort_by_key(|p| {
        (
            p.has_catch_all(),
            Reverse(p.segments.len()),
            Reverse(p.static_count()),
            Reverse(p.chain.len()),
        )
    });

    let matched = if segments.is_empty() {
        patterns
            .iter()
            .find(|p| p.segments.is_empty())
            .map(|p| (p, Vec::new()))
    } else {
        patterns
            .iter()
            .find_map(|p| p.matches(&segments).map(|params| (p, params)))
    };

    let Some((pattern, params)) = matched else {
        debug!("No screen matches path '{}'", path);
        return None;
    };

    let mut level_params = vec![Params::new(); pattern.chain.len()];
    for (level, name, value) in params {
        level_params[level].insert(name, value);
    }
    if let Some(query) = query {
        if let Some(leaf) = level_params.last_mut() {
            leaf.extend(parse_query(query));
        }
    }

    let mut state: Option<NavigationState> = None;
    for (name, params) in pattern.chain.iter().zip(level_params).rev() {
        let mut route = RouteRecord::new(name.clone()).with_params(params);
        if let Some(nested) = state.take() {
            route = route.with_state(nested);
        }
        state = Some(NavigationState::single(route));
    }

    debug!("Parsed path '{}' into {} level(s)", path, pattern.chain.len());
    state
}
