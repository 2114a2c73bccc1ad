mod file_config;

pub use file_config::{FileConfig, SteamConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STEAM_STORE_URL: &str = "https://store.steampowered.com";
pub const DEFAULT_STEAM_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_SYNC_COUNT: usize = 1010;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 600;
pub const MAX_SESSION_MAX_AGE_DAYS: u64 = 3650;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub session_max_age_days: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub session_max_age_days: u64,

    pub steam: SteamSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamSettings {
    pub store_base_url: String,
    /// Pause before each app details request during a sync.
    pub request_delay: Duration,
    pub request_timeout: Option<Duration>,
    pub sync_count: usize,
    pub user_agent: String,
}

impl Default for SteamSettings {
    fn default() -> Self {
        Self {
            store_base_url: DEFAULT_STEAM_STORE_URL.to_string(),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            request_timeout: None,
            sync_count: DEFAULT_SYNC_COUNT,
            user_agent: DEFAULT_STEAM_USER_AGENT.to_string(),
        }
    }
}

impl SteamSettings {
    fn from_file(file: SteamConfig) -> Result<Self> {
        let defaults = SteamSettings::default();
        let store_base_url = file.store_base_url.unwrap_or(defaults.store_base_url);
        if !store_base_url.starts_with("http://") && !store_base_url.starts_with("https://") {
            bail!("steam.store_base_url must be an http(s) URL: {}", store_base_url);
        }
        if file.request_timeout_sec == Some(0) {
            bail!("steam.request_timeout_sec must be greater than zero");
        }

        Ok(Self {
            store_base_url,
            request_delay: file
                .request_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_delay),
            request_timeout: file.request_timeout_sec.map(Duration::from_secs),
            sync_count: file.sync_count.unwrap_or(defaults.sync_count),
            user_agent: file.user_agent.unwrap_or(defaults.user_agent),
        })
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let session_max_age_days = file
            .session_max_age_days
            .unwrap_or(cli.session_max_age_days);
        if session_max_age_days == 0 {
            bail!("session_max_age_days must be at least 1");
        }
        if session_max_age_days > MAX_SESSION_MAX_AGE_DAYS {
            bail!(
                "session_max_age_days must be at most {}, got {}",
                MAX_SESSION_MAX_AGE_DAYS,
                session_max_age_days
            );
        }

        let steam = SteamSettings::from_file(file.steam.unwrap_or_default())?;

        Ok(Self {
            db_dir,
            port,
            logging_level,
            frontend_dir_path,
            session_max_age_days,
            steam,
        })
    }

    pub fn catalog_db_path(&self) -> PathBuf {
        self.db_dir.join("catalog.db")
    }

    pub fn user_db_path(&self) -> PathBuf {
        self.db_dir.join("user.db")
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
