//! Graph rendering configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a [`GraphConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid TOML for the schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Layout and styling options for rendered graphs
///
/// Every key is optional in TOML:
///
/// ```toml
/// rankdir = "TB"
/// package_dependencies = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Layout direction (`LR`, `TB`, ...)
    #[serde(default = "default_rankdir")]
    pub rankdir: String,

    /// Minimum space between nodes of one rank, in inches
    #[serde(default = "default_nodesep")]
    pub nodesep: String,

    /// Minimum space between ranks, in inches
    #[serde(default = "default_ranksep")]
    pub ranksep: String,

    /// Font size of the `packages` / `jobs` cluster labels
    #[serde(default = "default_cluster_font_size")]
    pub cluster_font_size: String,

    /// Font size of node labels
    #[serde(default = "default_node_font_size")]
    pub node_font_size: String,

    /// Draw package -> package dependency edges
    #[serde(default = "default_package_dependencies")]
    pub package_dependencies: bool,
}

fn default_rankdir() -> String {
    "LR".to_string()
}

fn default_nodesep() -> String {
    "0.5".to_string()
}

fn default_ranksep() -> String {
    "2".to_string()
}

fn default_cluster_font_size() -> String {
    "32".to_string()
}

fn default_node_font_size() -> String {
    "16".to_string()
}

fn default_package_dependencies() -> bool {
    true
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            rankdir: default_rankdir(),
            nodesep: default_nodesep(),
            ranksep: default_ranksep(),
            cluster_font_size: default_cluster_font_size(),
            node_font_size: default_node_font_size(),
            package_dependencies: default_package_dependencies(),
        }
    }
}

impl GraphConfig {
    /// Parse configuration from TOML. Empty input yields the defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content)
    }
}
