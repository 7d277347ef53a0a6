use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::network::Network;

/// Global user configuration loaded from `~/.deptrace/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Network settings from `[network]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub default: Network,
    #[serde(default, rename = "api-key")]
    pub api_key: Option<String>,
    /// Fullnode base URL overrides keyed by network name.
    #[serde(default)]
    pub urls: BTreeMap<String, String>,
}

impl NetworkConfig {
    /// The fullnode base URL for `network`, honouring overrides.
    pub fn node_url(&self, network: Network) -> String {
        self.urls
            .get(network.as_str())
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| network.default_node_url().to_string())
    }
}

/// Metadata cache settings from `[cache]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_file")]
    pub file: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            file: default_cache_file(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_file() -> String {
    ".package_metadata.json".to_string()
}

/// Diagram geometry from `[render]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_node_width", rename = "node-width")]
    pub node_width: f64,
    #[serde(default = "default_node_height", rename = "node-height")]
    pub node_height: f64,
    #[serde(default = "default_sibling_gap", rename = "sibling-gap")]
    pub sibling_gap: f64,
    #[serde(default = "default_level_gap", rename = "level-gap")]
    pub level_gap: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            sibling_gap: default_sibling_gap(),
            level_gap: default_level_gap(),
        }
    }
}

fn default_node_width() -> f64 {
    200.0
}

fn default_node_height() -> f64 {
    40.0
}

fn default_sibling_gap() -> f64 {
    24.0
}

fn default_level_gap() -> f64 {
    56.0
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            deptrace_util::errors::DepTraceError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            deptrace_util::errors::DepTraceError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the deptrace data directory: `$DEPTRACE_HOME`, else `~/.deptrace/`.
pub fn dirs_path() -> PathBuf {
    if let Ok(custom) = std::env::var("DEPTRACE_HOME") {
        return PathBuf::from(custom);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".deptrace")
}
