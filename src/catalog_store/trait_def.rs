//! CatalogStore trait definition.

use super::models::{CatalogEntry, CatalogPage};
use anyhow::Result;

/// Storage for cached Steam catalog entries.
///
/// Entries are keyed by Steam app id; `upsert_entry` never creates duplicates.
pub trait CatalogStore: Send + Sync {
    /// Returns true if an entry with this app id is stored.
    fn contains_entry(&self, steam_id: u32) -> Result<bool>;

    /// Returns the entry for this app id, or Ok(None) if absent.
    fn get_entry(&self, steam_id: u32) -> Result<Option<CatalogEntry>>;

    /// Inserts the entry or overwrites the stored one with the same app id.
    fn upsert_entry(&self, entry: &CatalogEntry) -> Result<()>;

    /// Returns one page of entries ordered by name. `page` is 1-based.
    /// `search`, when present, filters names case-insensitively by substring.
    fn list_entries(&self, page: usize, limit: usize, search: Option<&str>)
        -> Result<CatalogPage>;

    /// Returns up to `limit` entries whose name contains `query`.
    fn search_by_name(&self, query: &str, limit: usize) -> Result<Vec<CatalogEntry>>;

    fn count_entries(&self) -> Result<usize>;
}
