//! Client Configuration
//!
//! Persists the REST backend endpoint and token as a small JSON file
//! beside the app's data. A missing or unreadable file simply reads as
//! no configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "client_config.json";

/// Connection settings for the REST backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ServerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Read the saved configuration, if any
pub fn load_config(dir: &Path) -> Option<ServerConfig> {
    let contents = fs::read_to_string(config_path(dir)).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Write the configuration, creating the directory if needed
pub fn save_config(dir: &Path, config: &ServerConfig) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(config_path(dir), contents).map_err(|e| format!("Failed to write config: {}", e))
}
