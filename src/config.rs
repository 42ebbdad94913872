use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_BASE_URL, DEFAULT_TUTOR_ID, DEFAULT_UPLOAD_PATH};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub upload_path: Option<String>,
    pub tutor_id: Option<String>,
}

impl Config {
    /// Load config from ~/.config/lessonup/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn upload_path(&self) -> &str {
        self.upload_path.as_deref().unwrap_or(DEFAULT_UPLOAD_PATH)
    }

    pub fn tutor_id(&self) -> &str {
        self.tutor_id.as_deref().unwrap_or(DEFAULT_TUTOR_ID)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("lessonup")
        .join("config.toml")
}
