//! Configuration handling for the booking form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the booking form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// REST API root that submissions are posted under
    pub endpoint: Option<String>,
    /// REST nonce sent with each submission
    pub nonce: Option<String>,
    /// Title sent with each submission
    pub submission_title: Option<String>,
    /// Animate step transitions
    pub transitions: Option<bool>,
    /// JSON form definition to load instead of the built-in booking form
    pub form_definition: Option<PathBuf>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "booking-form", "booking-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: FormConfig = serde_json::from_str(&content)?;
            tracing::debug!("Loaded config from {}", path.display());
            return Ok(config);
        }
        Ok(Self::default())
    }

    pub fn submission_title_or_default(&self) -> &str {
        match self.submission_title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => crate::state::FormController::DEFAULT_TITLE,
        }
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transitions.unwrap_or(true)
    }
}
