use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Base URL of the name-analysis service, fixed at build time.
///
/// Set `SOULCHART_API_BASE_URL` while compiling to point the binary at another instance.
pub const API_BASE_URL: &str = match option_env!("SOULCHART_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

pub const NAME_ANALYSIS_PATH: &str = "/api/name-analysis";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory reports are saved to when downloading.
    pub download_dir: String,
    /// `tracing` filter directive, e.g. `info` or `soulchart_client=debug`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            download_dir: "downloads".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
