//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own databases, talking to its
//! own fake Steam store.

use super::constants::*;
use super::fake_steam::FakeSteamStore;
use levelup_server::catalog_store::{CatalogEntry, CatalogStore, SqliteCatalogStore};
use levelup_server::config::SteamSettings;
use levelup_server::server::{make_app, metrics, RequestsLoggingLevel, ServerConfig};
use levelup_server::sync::CatalogSync;
use levelup_server::user::{FullUserStore, SqliteUserStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with isolated databases
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
#[allow(dead_code)]
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// The fake Steam store behind this server
    pub steam: FakeSteamStore,

    /// Catalog store for direct database access in tests
    pub catalog_store: Arc<dyn CatalogStore>,

    /// User store for direct database access in tests
    pub user_store: Arc<dyn FullUserStore>,

    // Private fields - keep resources alive until drop
    _temp_db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawns a server in front of a default fake Steam store
    pub async fn spawn() -> Self {
        Self::spawn_with_steam(FakeSteamStore::spawn().await).await
    }

    /// Spawns a server in front of the given fake Steam store
    ///
    /// # Panics
    ///
    /// Panics if the databases can't be created, the port can't be bound or
    /// the server doesn't become ready within timeout.
    pub async fn spawn_with_steam(steam: FakeSteamStore) -> Self {
        let temp_db_dir = TempDir::new().expect("Failed to create temp dir");

        let catalog_store: Arc<dyn CatalogStore> = Arc::new(
            SqliteCatalogStore::new(temp_db_dir.path().join("catalog.db"))
                .expect("Failed to open catalog store"),
        );
        let user_store: Arc<dyn FullUserStore> = Arc::new(
            SqliteUserStore::new(temp_db_dir.path().join("user.db"))
                .expect("Failed to open user store"),
        );

        // No delay between details requests, but a timeout so a broken
        // fake can't hang the suite.
        let steam_settings = SteamSettings {
            store_base_url: steam.base_url.clone(),
            request_delay: Duration::ZERO,
            request_timeout: Some(Duration::from_secs(STEAM_TIMEOUT_SECS)),
            ..SteamSettings::default()
        };
        let catalog_sync = Arc::new(
            CatalogSync::with_steam_store(&steam_settings, catalog_store.clone())
                .expect("Failed to build catalog sync"),
        );

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
            session_max_age_days: 7,
            default_sync_count: TEST_DEFAULT_SYNC_COUNT,
        };
        metrics::init_metrics();
        let app = make_app(
            config,
            catalog_store.clone(),
            user_store.clone(),
            catalog_sync,
        );

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            steam,
            catalog_store,
            user_store,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    /// Puts an entry straight into the catalog, bypassing Steam
    pub fn seed_catalog(&self, steam_id: u32, name: &str) -> CatalogEntry {
        let entry = CatalogEntry {
            steam_id,
            name: name.to_string(),
            description: format!("Seeded {}", name),
            header_image: String::new(),
            genres: vec![],
            screenshots: vec![],
            platforms: BTreeMap::new(),
            release_date: None,
        };
        self.catalog_store
            .upsert_entry(&entry)
            .expect("Failed to seed catalog");
        entry
    }

    /// Waits for the server to become ready by polling the /api/statics endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server failed to become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            if let Ok(response) = client
                .get(format!("{}/api/statics", self.base_url))
                .send()
                .await
            {
                if response.status().is_success() {
                    return;
                }
            }

            tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
