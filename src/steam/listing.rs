//! Top sellers identifier scraping.
//!
//! The Steam search page lists titles as HTML rows carrying a
//! `data-ds-appid` attribute. Pages are requested with a start offset until
//! enough unique app ids are collected or the listing runs dry.

use super::error::SteamError;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// Number of rows requested per listing page.
pub const LISTING_PAGE_SIZE: usize = 50;

lazy_static! {
    static ref APP_ID_PATTERN: Regex = Regex::new(r#"data-ds-appid="(\d+)""#).unwrap();
}

/// Source of raw listing pages.
#[async_trait]
pub trait ListingPageSource: Send + Sync {
    /// Returns the markup of the listing page starting at row `start`.
    async fn fetch_listing_page(&self, start: usize, count: usize) -> Result<String, SteamError>;
}

/// Produces an ordered list of unique app ids to sync.
#[async_trait]
pub trait IdentifierScraper: Send + Sync {
    async fn scrape_ids(&self, limit: usize) -> Result<Vec<u32>, SteamError>;
}

/// Extracts app ids in document order. Duplicates are kept, ids that
/// don't fit in a `u32` are skipped.
pub fn extract_app_ids(html: &str) -> Vec<u32> {
    APP_ID_PATTERN
        .captures_iter(html)
        .filter_map(|caps| {
            let raw = caps.get(1)?.as_str();
            match raw.parse() {
                Ok(app_id) => Some(app_id),
                Err(err) => {
                    debug!("Skipping listing app id {}: {}", raw, err);
                    None
                }
            }
        })
        .collect()
}

pub struct TopSellersScraper<S: ListingPageSource> {
    source: S,
}

impl<S: ListingPageSource> TopSellersScraper<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: ListingPageSource> IdentifierScraper for TopSellersScraper<S> {
    async fn scrape_ids(&self, limit: usize) -> Result<Vec<u32>, SteamError> {
        let mut ids = Vec::new();
        let mut seen = HashSet::new();
        let mut start = 0;

        while ids.len() < limit {
            let html = self
                .source
                .fetch_listing_page(start, LISTING_PAGE_SIZE)
                .await?;

            let mut fresh = 0;
            for app_id in extract_app_ids(&html) {
                if !seen.insert(app_id) {
                    continue;
                }
                fresh += 1;
                ids.push(app_id);
                if ids.len() == limit {
                    return Ok(ids);
                }
            }

            // The live listing can reorder between requests, so a page made
            // only of already seen ids may end the run short of `limit`.
            if fresh == 0 {
                debug!(
                    "Listing page at {} added no new app ids, stopping with {} of {}",
                    start,
                    ids.len(),
                    limit
                );
                break;
            }
            start += LISTING_PAGE_SIZE;
        }

        Ok(ids)
    }
}
