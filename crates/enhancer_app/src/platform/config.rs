//! Optional `enhancer_app.ron` next to the working directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use enhancer_engine::EnhanceSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "enhancer_app.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub field_name: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = EnhanceSettings::default();
        Self {
            endpoint: settings.endpoint,
            field_name: settings.field_name,
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.map(|t| t.as_secs()),
            log_to_file: false,
        }
    }
}

impl AppConfig {
    pub fn enhance_settings(&self) -> EnhanceSettings {
        EnhanceSettings {
            endpoint: self.endpoint.clone(),
            field_name: self.field_name.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Reads the config file in `dir`; `Ok(None)` when there is none.
pub fn read_config(dir: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path,
            message: err.to_string(),
        })
}

/// Like [`read_config`] but never fails: problems are logged and defaults used.
pub fn load_config(dir: &Path) -> AppConfig {
    match read_config(dir) {
        Ok(Some(config)) => {
            engine_info!("Loaded config from {:?}", dir.join(CONFIG_FILENAME));
            config
        }
        Ok(None) => AppConfig::default(),
        Err(err) => {
            engine_warn!("Falling back to default config: {}", err);
            AppConfig::default()
        }
    }
}
