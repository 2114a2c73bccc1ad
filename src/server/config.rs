use super::RequestsLoggingLevel;
use crate::config::{AppConfig, DEFAULT_SYNC_COUNT};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub frontend_dir_path: Option<String>,
    /// Max-Age of the session cookie, also the server-side token lifetime.
    pub session_max_age_days: u64,
    /// Number of top sellers synced when the request doesn't say.
    pub default_sync_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3000,
            frontend_dir_path: None,
            session_max_age_days: 7,
            default_sync_count: DEFAULT_SYNC_COUNT,
        }
    }
}

impl From<&AppConfig> for ServerConfig {
    fn from(config: &AppConfig) -> Self {
        ServerConfig {
            requests_logging_level: config.logging_level.clone(),
            port: config.port,
            frontend_dir_path: config.frontend_dir_path.clone(),
            session_max_age_days: config.session_max_age_days,
            default_sync_count: config.steam.sync_count,
        }
    }
}
