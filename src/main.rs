use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use std::{fmt::Debug, path::PathBuf};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use levelup_server::config;
use levelup_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use levelup_server::{CatalogSync, SqliteCatalogStore, SqliteUserStore, UserManager};

/// How often expired session tokens are removed.
const SESSION_PRUNE_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory containing the database files (catalog.db, user.db).
    /// Can also be specified in config file.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Days a login session stays valid.
    #[clap(long, default_value_t = 7)]
    pub session_max_age_days: u64,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_dir: args.db_dir.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            session_max_age_days: args.session_max_age_days,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  db_dir: {:?}", app_config.db_dir);
    info!("  port: {}", app_config.port);
    info!("  steam store: {}", app_config.steam.store_base_url);
    info!(
        "  sync: {} games, {:?} between requests",
        app_config.steam.sync_count, app_config.steam.request_delay
    );

    if !app_config.catalog_db_path().exists() {
        info!(
            "Creating new catalog database at {:?}",
            app_config.catalog_db_path()
        );
    }
    let catalog_store = Arc::new(SqliteCatalogStore::new(app_config.catalog_db_path())?);

    if !app_config.user_db_path().exists() {
        info!(
            "Creating new user database at {:?}",
            app_config.user_db_path()
        );
    }
    let user_store = Arc::new(SqliteUserStore::new(app_config.user_db_path())?);

    let catalog_sync = Arc::new(CatalogSync::with_steam_store(
        &app_config.steam,
        catalog_store.clone(),
    )?);

    // Spawn background task for session pruning
    let session_manager = UserManager::new(user_store.clone(), app_config.session_max_age_days);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PRUNE_INTERVAL);
        loop {
            ticker.tick().await;
            match session_manager.prune_expired_sessions() {
                Ok(count) => {
                    if count > 0 {
                        info!("Pruned {} expired sessions", count);
                    }
                }
                Err(e) => {
                    error!("Failed to prune expired sessions: {}", e);
                }
            }
        }
    });

    run_server(
        ServerConfig::from(&app_config),
        catalog_store,
        user_store,
        catalog_sync,
    )
    .await
}
