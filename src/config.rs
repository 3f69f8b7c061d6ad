//! `arbor.toml` discovery and traversal defaults

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::depth_first::Order;
use crate::tree::Format;

pub const CONFIG_FILE: &str = "arbor.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read arbor.toml: {0}")]
    ConfigReadError(#[from] std::io::Error),

    #[error("Failed to parse arbor.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    traverse: Option<TraverseSection>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TraverseSection {
    format: Option<Format>,
    orders: Option<Vec<Order>>,
    separator: Option<String>,
    show_tree: Option<bool>,
}

/// Effective settings for the `traverse` and `render` commands
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Where the settings were read from; `None` when built-in defaults apply
    pub source: Option<PathBuf>,
    /// `None` means detect the format from each input
    pub format: Option<Format>,
    pub orders: Vec<Order>,
    pub separator: String,
    pub show_tree: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            format: None,
            orders: Order::ALL.to_vec(),
            separator: " ".to_string(),
            show_tree: false,
        }
    }
}

impl Settings {
    /// Load settings from the nearest `arbor.toml` at or above the current directory
    pub fn discover() -> Result<Self, ConfigError> {
        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Load settings from the nearest `arbor.toml` at or above `start`
    pub fn discover_from(start: &Path) -> Result<Self, ConfigError> {
        match Self::find_config(start) {
            Some(path) => Self::load(&path),
            None => {
                debug!(start = %start.display(), "no arbor.toml found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source = Some(path.to_path_buf());
        debug!(path = %path.display(), ?settings, "loaded config");
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ConfigFile = toml::from_str(content)?;

        // Extract configuration with defaults
        let section = config.traverse.unwrap_or_default();
        let defaults = Self::default();

        Ok(Self {
            source: None,
            format: section.format,
            orders: section
                .orders
                .filter(|orders| !orders.is_empty())
                .unwrap_or(defaults.orders),
            separator: section.separator.unwrap_or(defaults.separator),
            show_tree: section.show_tree.unwrap_or(defaults.show_tree),
        })
    }

    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}
