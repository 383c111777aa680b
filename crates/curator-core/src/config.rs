//! Configuration for curator-core
//!
//! Centralized configuration for the backend connection, the structure
//! rendering policy and view presentation settings. Loaded from TOML or JSON;
//! every field has a default so partial files are accepted.
//!
//! ```toml
//! [backend]
//! base_url = "https://curation.example.org"
//! timeout_secs = 30
//!
//! [render]
//! policy = "on_keystroke"
//! engine = "remote"
//!
//! [view]
//! fallback_label = "Name"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Environment variable overriding `backend.base_url`
pub const BASE_URL_ENV: &str = "CURATOR_BASE_URL";

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    /// Backend connection settings
    pub backend: BackendConfig,
    /// Structure rendering settings
    pub render: RenderConfig,
    /// View presentation settings
    pub view: ViewConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin every endpoint path and returned location is joined onto
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    pub endpoints: EndpointConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
            user_agent: format!("curator/{}", env!("CARGO_PKG_VERSION")),
            endpoints: EndpointConfig::default(),
        }
    }
}

/// Endpoint paths, relative to `base_url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub next_article: String,
    pub back_article: String,
    pub add_compound: String,
    pub delete_compounds: String,
    pub render_structure: String,
    /// Prefix under which page state is served as JSON
    pub page: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            next_article: "/data/nextArticle".to_string(),
            back_article: "/data/backArticle".to_string(),
            add_compound: "/data/addCompound".to_string(),
            delete_compounds: "/data/delCompounds".to_string(),
            render_structure: "/data/smiToMol".to_string(),
            page: "/data/page".to_string(),
        }
    }
}

/// When notation edits trigger a re-render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Re-render when the notation field loses focus
    #[default]
    OnBlur,
    /// Re-render on every keystroke
    OnKeystroke,
}

/// Which structure-drawing engine to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Parse and lay out locally
    #[default]
    Local,
    /// Ask the backend's structure endpoint for the rendered data
    Remote,
}

/// Structure rendering configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub policy: RenderPolicy,
    pub engine: EngineKind,
}

/// View presentation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Tab and menu label for records with a blank name
    pub fallback_label: String,
    /// Appended to the delete action label in multi-select mode
    pub multiple_suffix: String,
    /// Base label of the delete action
    pub delete_label: String,
    /// Columns a tab occupies beyond its label (borders, padding, gap)
    pub tab_padding: u16,
    /// Tab strip width assumed until the front end reports the real one
    pub tab_viewport: u16,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fallback_label: "Name".to_string(),
            multiple_suffix: " Multiple Compounds".to_string(),
            delete_label: "Delete Compound".to_string(),
            tab_padding: 3,
            tab_viewport: 80,
        }
    }
}

impl CuratorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load from a file, choosing the format by extension (TOML unless `.json`)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml(&contents)?,
        };
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Default config file location (`<config dir>/curator/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("curator").join("config.toml"))
    }

    /// Apply environment overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                self.backend.base_url = base_url;
            }
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.backend.base_url).map_err(|e| ConfigError::InvalidUrl {
            field: "backend.base_url".to_string(),
            message: e.to_string(),
        })?;

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "backend.timeout_secs must be positive".to_string(),
            ));
        }

        if self.view.fallback_label.is_empty() {
            return Err(ConfigError::OutOfRange(
                "view.fallback_label must not be empty".to_string(),
            ));
        }

        if self.view.tab_viewport == 0 {
            return Err(ConfigError::OutOfRange(
                "view.tab_viewport must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
