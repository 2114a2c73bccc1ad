use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub db_dir: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,
    pub session_max_age_days: Option<u64>,

    pub steam: Option<SteamConfig>,
}

/// `[steam]` section.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SteamConfig {
    pub store_base_url: Option<String>,
    pub request_delay_ms: Option<u64>,
    pub request_timeout_sec: Option<u64>,
    pub sync_count: Option<usize>,
    pub user_agent: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
