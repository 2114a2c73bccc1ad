use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized metadata for one Steam title, keyed by its app id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub steam_id: u32,
    pub name: String,
    pub description: String,
    pub header_image: String,
    pub genres: Vec<String>,
    pub screenshots: Vec<String>,
    /// Platform name ("windows", "mac", "linux") to availability.
    pub platforms: BTreeMap<String, bool>,
    pub release_date: Option<String>,
}

/// One page of catalog entries, ordered by name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub games: Vec<CatalogEntry>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl CatalogPage {
    pub fn new(games: Vec<CatalogEntry>, page: usize, limit: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(limit.max(1)).max(1);
        CatalogPage {
            games,
            page,
            limit,
            total,
            total_pages,
        }
    }
}
