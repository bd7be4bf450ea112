//! Parse a path into navigation state

use crate::util;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(config: &Path, path: &str) -> Result<()> {
    let options = util::load_options(config)?;

    let Some(state) = options.state_from_path(path) else {
        anyhow::bail!("No screen matches path '{}'", path);
    };

    let json = serde_json::to_string_pretty(&state).context("Failed to serialize state")?;
    println!("{}", json);
    Ok(())
}
