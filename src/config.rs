//! Configuration handling for the form tools

use crate::error::Result;
use crate::transport::Method;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured API base URL
pub const API_URL_ENV: &str = "HRM_FORMS_API_URL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormsConfig {
    /// Base URL that endpoint paths are resolved against
    pub api_base_url: Option<String>,
    /// Method used when a form does not pick one
    pub default_method: Option<Method>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: Option<String>,
}

impl FormsConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "hrm", "hrm-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_base_url = Some(url);
        }

        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn method_or_default(&self) -> Method {
        self.default_method.unwrap_or_default()
    }
}
