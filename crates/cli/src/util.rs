//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use nav_core::LinkingOptions;
use std::path::Path;
use tracing::Level;

/// Log to stderr so stdout stays machine readable
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load linking options from a TOML file
pub fn load_options(path: &Path) -> Result<LinkingOptions> {
    LinkingOptions::load(path)
        .with_context(|| format!("Failed to load linking options from {}", path.display()))
}

/// `Home > Profile` along the first-route chain
pub fn format_chain(state: &nav_core::NavigationState) -> String {
    let mut names = vec![state.first_route().name.as_str()];
    let mut current = state;
    while let Some(nested) = current.first_route().child.state() {
        names.push(nested.first_route().name.as_str());
        current = nested;
    }
    names.join(" > ")
}
