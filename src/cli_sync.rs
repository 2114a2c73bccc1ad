//! Runs one top sellers sync against the local catalog and exits.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use levelup_server::config::{AppConfig, CliConfig, FileConfig};
use levelup_server::server::metrics;
use levelup_server::{CatalogSync, CatalogStore, SqliteCatalogStore};

#[derive(Parser, Debug)]
#[command(about = "Sync Steam top sellers into the LevelUp catalog")]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Directory containing catalog.db.
    #[clap(long)]
    pub db_dir: Option<PathBuf>,

    /// Number of top sellers to sync, defaults to the configured sync count.
    #[clap(short, long)]
    pub count: Option<usize>,

    /// Overrides the delay between Steam requests, in milliseconds.
    #[clap(long)]
    pub delay_ms: Option<u64>,
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

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        db_dir: cli_args.db_dir.clone(),
        session_max_age_days: 7,
        ..Default::default()
    };
    let mut app_config = AppConfig::resolve(&cli_config, file_config)?;
    if let Some(delay_ms) = cli_args.delay_ms {
        app_config.steam.request_delay = Duration::from_millis(delay_ms);
    }
    let count = cli_args.count.unwrap_or(app_config.steam.sync_count);

    metrics::init_metrics();
    let catalog_store = Arc::new(
        SqliteCatalogStore::new(app_config.catalog_db_path())
            .with_context(|| format!("Failed to open {:?}", app_config.catalog_db_path()))?,
    );
    let catalog_sync = CatalogSync::with_steam_store(&app_config.steam, catalog_store.clone())?;

    let summary = catalog_sync.run(count).await?;
    info!("Catalog now holds {} games", catalog_store.count_entries()?);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
