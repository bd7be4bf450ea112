//! Common utilities for integration tests

pub mod cli;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Nested `Outer` navigator with a sign-in gate, plus a top-level `Settings`
pub const LINKING: &str = r#"
prefixes = ["rn://", "https://*.example.com"]

[config.screens]
Settings = "settings"

[config.screens.Outer]
path = "outer"

[config.screens.Outer.screens]
SignIn = "sign-in"
Home = "home"
Profile = "user/:id"
"#;

/// Temporary directory holding `linking.toml` and scenario files
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("linking.toml"), LINKING).expect("Failed to write linking.toml");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the fixture root
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }
}
