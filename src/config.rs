use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, Result};

const DB_PATH_ENV: &str = "STOTRA_DB";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub db_path: Option<String>,

    #[serde(default = "default_convert_api_base")]
    pub convert_api_base: String,

    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// The cross-link pipeline historically overwrites subtitles that are
    /// already populated; set to false to skip those records instead.
    #[serde(default = "default_crosslink_overwrite")]
    pub crosslink_overwrite: bool,
}

fn default_convert_api_base() -> String {
    "https://aksharamukha.hinduconnect.app".to_string()
}

fn default_batch_size() -> u32 {
    200
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_crosslink_overwrite() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            convert_api_base: default_convert_api_base(),
            batch_size: default_batch_size(),
            request_timeout_secs: default_request_timeout_secs(),
            crosslink_overwrite: default_crosslink_overwrite(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        // Environment wins over the config file
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            if !path.is_empty() {
                config.db_path = Some(path);
            }
        }

        if config.batch_size == 0 {
            return Err(AppError::Config("batch_size must be positive".to_string()));
        }

        Ok(config)
    }

    /// Store location; absent configuration is a startup error.
    pub fn db_path(&self) -> Result<&str> {
        self.db_path.as_deref().ok_or_else(|| {
            AppError::Config(format!(
                "database path not configured (set db_path in {:?} or the {} environment variable)",
                Self::config_path(),
                DB_PATH_ENV
            ))
        })
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stotra-subtitler")
            .join("config.toml")
    }
}
