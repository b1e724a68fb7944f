use crate::error::{RenameError, Result};
use crate::output::OutputFormat;
use crate::preview::Preview;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".massrename.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format: "summary" or "json"
    #[serde(default)]
    pub output: OutputFormat,

    /// Default preview format of the plan command: "table", "summary" or "none"
    #[serde(default = "default_preview")]
    pub preview: Preview,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Whether to print the first rename failure as soon as it happens
    #[serde(default = "default_true")]
    pub failure_notice: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            preview: default_preview(),
            use_color: None,
            failure_notice: true,
        }
    }
}

fn default_preview() -> Preview {
    Preview::Table
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from ./.massrename.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| config_error(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| config_error(path, e))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

fn config_error(path: &Path, reason: impl ToString) -> RenameError {
    RenameError::Config {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
