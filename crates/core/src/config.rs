//! Linking configuration
//!
//! Describes which URL prefixes the app accepts, how paths map onto screens,
//! and which parser turns a path into navigation state. Stored as TOML:
//!
//! ```toml
//! prefixes = ["rn://"]
//! platform = "native"
//!
//! [config.screens]
//! Home = "home"
//!
//! [config.screens.Outer]
//! path = "outer"
//! screens = { Profile = "profile" }
//! ```

use crate::error::ConfigError;
use crate::parse::{get_state_from_path, StateParser};
use crate::path::extract_path_from_url;
use crate::state::NavigationState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Where incoming links come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Links arrive as full URLs; prefixes are stripped before parsing
    #[default]
    Native,
    /// Links arrive as paths already
    Web,
}

/// Linking options registered with a navigation container
#[derive(Clone, Serialize, Deserialize)]
pub struct LinkingOptions {
    /// Accepted URL prefixes (`rn://`, `https://*.example.com`)
    #[serde(default)]
    pub prefixes: Vec<String>,

    /// Screen configuration
    pub config: LinkingConfig,

    #[serde(default)]
    pub platform: Platform,

    /// Custom path parser (default: [`crate::StandardParser`])
    #[serde(skip)]
    pub get_state_from_path: Option<Arc<dyn StateParser>>,
}

impl LinkingOptions {
    /// Create options with the standard parser
    pub fn new(prefixes: Vec<String>, config: LinkingConfig) -> Self {
        Self {
            prefixes,
            config,
            platform: Platform::Native,
            get_state_from_path: None,
        }
    }

    /// Parse options from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let options: LinkingOptions = toml::from_str(source)?;
        if options.config.screens.is_empty() {
            return Err(ConfigError::NoScreens);
        }
        Ok(options)
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Replace the path parser
    pub fn with_state_parser(mut self, parser: impl StateParser + 'static) -> Self {
        self.get_state_from_path = Some(Arc::new(parser));
        self
    }

    /// Path carried by a captured link
    ///
    /// Native links are full URLs and lose their prefix; web links are paths
    /// already. `None` when a native link matches no prefix.
    pub fn extract_path(&self, link: &str) -> Option<String> {
        match self.platform {
            Platform::Native => extract_path_from_url(&self.prefixes, link),
            Platform::Web => Some(link.to_string()),
        }
    }

    /// Parse a path with the configured parser, or the standard one
    pub fn state_from_path(&self, path: &str) -> Option<NavigationState> {
        match &self.get_state_from_path {
            Some(parser) => parser.parse(path, &self.config),
            None => get_state_from_path(path, &self.config),
        }
    }
}

impl fmt::Debug for LinkingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkingOptions")
            .field("prefixes", &self.prefixes)
            .field("config", &self.config)
            .field("platform", &self.platform)
            .field("custom_parser", &self.get_state_from_path.is_some())
            .finish()
    }
}

/// Screen configuration of the root navigator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkingConfig {
    #[serde(default)]
    pub screens: BTreeMap<String, ScreenConfig>,
}

impl LinkingConfig {
    /// Add a screen mapped to a plain path
    pub fn screen(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.screens
            .insert(name.into(), ScreenConfig::Path(path.into()));
        self
    }

    /// Add a screen hosting a nested navigator
    pub fn nested(mut self, name: impl Into<String>, screen: NestedScreen) -> Self {
        self.screens.insert(name.into(), ScreenConfig::Nested(screen));
        self
    }
}

/// How a single screen maps onto a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScreenConfig {
    /// `Profile = "user/:id"`
    Path(String),
    /// A screen that hosts its own navigator
    Nested(NestedScreen),
}

impl ScreenConfig {
    /// Path pattern declared by this screen, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            ScreenConfig::Path(path) => Some(path),
            ScreenConfig::Nested(nested) => nested.path.as_deref(),
        }
    }

    /// Whether the pattern ignores the parent's pattern
    pub fn is_exact(&self) -> bool {
        matches!(self, ScreenConfig::Nested(nested) if nested.exact)
    }

    /// Child screens, empty for plain screens
    pub fn screens(&self) -> Option<&BTreeMap<String, ScreenConfig>> {
        match self {
            ScreenConfig::Path(_) => None,
            ScreenConfig::Nested(nested) => Some(&nested.screens),
        }
    }
}

/// Nested navigator screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedScreen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Don't prefix the parent's pattern
    #[serde(default)]
    pub exact: bool,

    #[serde(default)]
    pub screens: BTreeMap<String, ScreenConfig>,
}

impl NestedScreen {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn screen(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.screens
            .insert(name.into(), ScreenConfig::Path(path.into()));
        self
    }

    pub fn nested(mut self, name: impl Into<String>, screen: NestedScreen) -> Self {
        self.screens.insert(name.into(), ScreenConfig::Nested(screen));
        self
    }
}
