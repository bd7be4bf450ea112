//! Strip a link down to its path

use crate::util;
use anyhow::Result;
use std::path::Path;

pub fn run(config: &Path, url: &str) -> Result<()> {
    let options = util::load_options(config)?;

    match options.extract_path(url) {
        Some(path) => {
            println!("{}", path);
            Ok(())
        }
        None => anyhow::bail!(
            "Link {} matches none of the configured prefixes {:?}",
            url,
            options.prefixes
        ),
    }
}
