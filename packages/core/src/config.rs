use crate::result::CoreResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "fxlayout.config.json";

/// Display defaults used when a directive makes an element visible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Display forced by a layout container on the same element
    #[serde(default = "default_layout_display")]
    pub layout_display: String,

    /// Display used when the element had no usable inline display
    /// (absent, empty, or already "none")
    #[serde(default = "default_fallback_display")]
    pub fallback_display: String,
}

fn default_layout_display() -> String {
    "flex".to_string()
}

fn default_fallback_display() -> String {
    "block".to_string()
}

impl Config {
    /// Load config from a directory, falling back to defaults when the
    /// directory has no config file
    pub fn load(dir: impl AsRef<Path>) -> CoreResult<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            debug!(path = %config_path.display(), "Loading config");
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout_display: default_layout_display(),
            fallback_display: default_fallback_display(),
        }
    }
}
