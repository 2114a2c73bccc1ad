//! Top sellers catalog sync.
//!
//! One run scrapes the requested number of app ids and walks them in order:
//! ids already in the catalog are skipped without touching Steam, the rest
//! are throttled, fetched, normalized and upserted. Runs never overlap.

use super::normalize::normalize_app_details;
use super::throttle::{FixedDelayThrottle, NoOpThrottle, SyncThrottle};
use crate::catalog_store::{CatalogEntry, CatalogStore};
use crate::config::SteamSettings;
use crate::server::metrics;
use crate::steam::{
    AppDetailsFetcher, IdentifierScraper, SteamError, SteamStoreClient, TopSellersScraper,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SyncError {
    /// Scraping the listing failed, nothing was processed.
    #[error("Failed to scrape top sellers: {0}")]
    Listing(SteamError),

    #[error("Failed to fetch game: {0}")]
    Fetch(SteamError),

    #[error("Catalog store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("A sync is already running")]
    AlreadyRunning,
}

/// Outcome counts of one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub requested_count: usize,
    pub synced_count: usize,
    pub skipped_count: usize,
}

pub struct CatalogSync {
    scraper: Arc<dyn IdentifierScraper>,
    fetcher: Arc<dyn AppDetailsFetcher>,
    store: Arc<dyn CatalogStore>,
    throttle: Arc<dyn SyncThrottle>,
    run_lock: Mutex<()>,
}

impl CatalogSync {
    pub fn new(
        scraper: Arc<dyn IdentifierScraper>,
        fetcher: Arc<dyn AppDetailsFetcher>,
        store: Arc<dyn CatalogStore>,
        throttle: Arc<dyn SyncThrottle>,
    ) -> Self {
        Self {
            scraper,
            fetcher,
            store,
            throttle,
            run_lock: Mutex::new(()),
        }
    }

    /// Wires the sync to the live Steam store described by `settings`.
    pub fn with_steam_store(
        settings: &SteamSettings,
        store: Arc<dyn CatalogStore>,
    ) -> anyhow::Result<Self> {
        let client = SteamStoreClient::new(
            settings.store_base_url.clone(),
            settings.user_agent.clone(),
            settings.request_timeout,
        )?;
        let throttle: Arc<dyn SyncThrottle> = if settings.request_delay.is_zero() {
            Arc::new(NoOpThrottle)
        } else {
            Arc::new(FixedDelayThrottle::new(settings.request_delay))
        };
        Ok(Self::new(
            Arc::new(TopSellersScraper::new(client.clone())),
            Arc::new(client),
            store,
            throttle,
        ))
    }

    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    /// Syncs up to `requested` top sellers into the catalog.
    ///
    /// Listing and store failures abort the run. Per-title fetch failures are
    /// logged and counted as skipped.
    pub async fn run(&self, requested: usize) -> Result<SyncSummary, SyncError> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| SyncError::AlreadyRunning)?;

        let started = Instant::now();
        let result = self.run_locked(requested).await;
        match &result {
            Ok(summary) => {
                metrics::record_sync_run("completed", started.elapsed());
                info!(
                    "Top sellers sync done in {:?}: requested {}, synced {}, skipped {}",
                    started.elapsed(),
                    summary.requested_count,
                    summary.synced_count,
                    summary.skipped_count
                );
            }
            Err(e) => {
                metrics::record_sync_run("failed", started.elapsed());
                warn!("Top sellers sync aborted: {}", e);
            }
        }
        result
    }

    async fn run_locked(&self, requested: usize) -> Result<SyncSummary, SyncError> {
        info!("Starting top sellers sync of {} games", requested);
        let app_ids = self
            .scraper
            .scrape_ids(requested)
            .await
            .map_err(SyncError::Listing)?;
        debug!("Scraped {} app ids", app_ids.len());

        let mut synced_count = 0;
        let mut skipped_count = 0;

        for app_id in app_ids {
            if self.store.contains_entry(app_id)? {
                debug!("Game {} already cached, skipping", app_id);
                metrics::record_sync_item("cached");
                skipped_count += 1;
                continue;
            }

            self.throttle.wait().await;

            let details = match self.fetcher.fetch_app_details(app_id).await {
                Ok(details) => details,
                Err(e) => {
                    warn!("Skipping game {}: {}", app_id, e);
                    metrics::record_sync_item("fetch_failed");
                    skipped_count += 1;
                    continue;
                }
            };

            let entry = normalize_app_details(app_id, details);
            self.store.upsert_entry(&entry)?;
            debug!("Synced game {} ({})", app_id, entry.name);
            metrics::record_sync_item("synced");
            synced_count += 1;
        }

        Ok(SyncSummary {
            requested_count: requested,
            synced_count,
            skipped_count,
        })
    }

    /// Fetches one title from Steam and overwrites its catalog entry.
    pub async fn fetch_single(&self, app_id: u32) -> Result<CatalogEntry, SyncError> {
        let details = self
            .fetcher
            .fetch_app_details(app_id)
            .await
            .map_err(SyncError::Fetch)?;
        let entry = normalize_app_details(app_id, details);
        self.store.upsert_entry(&entry)?;
        info!("Fetched game {} ({}) on demand", app_id, entry.name);
        Ok(entry)
    }
}
