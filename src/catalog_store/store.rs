//! SQLite-backed catalog store.

use super::models::{CatalogEntry, CatalogPage};
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use crate::sqlite_persistence::{limit_offset, open_versioned_db};
use anyhow::{Context, Result};
use rusqlite::{params, types::Type, Connection, Row};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const ENTRY_COLUMNS: &str =
    "steam_id, name, description, header_image, genres, screenshots, platforms, release_date";

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

fn json_column<T: DeserializeOwned>(row: &Row, index: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(index)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn row_to_entry(row: &Row) -> rusqlite::Result<CatalogEntry> {
    Ok(CatalogEntry {
        steam_id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        header_image: row.get(3)?,
        genres: json_column(row, 4)?,
        screenshots: json_column(row, 5)?,
        platforms: json_column(row, 6)?,
        release_date: row.get(7)?,
    })
}

impl SqliteCatalogStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned_db(db_path, CATALOG_VERSIONED_SCHEMAS, "catalog")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM steam_games", [], |r| r.get(0))
            .unwrap_or(0);
        info!("Opened Steam catalog: {} games", count);

        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn contains_entry(&self, steam_id: u32) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let found: i64 = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM steam_games WHERE steam_id = ?1)",
            params![steam_id],
            |r| r.get(0),
        )?;
        Ok(found == 1)
    }

    fn get_entry(&self, steam_id: u32) -> Result<Option<CatalogEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM steam_games WHERE steam_id = ?1",
            ENTRY_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![steam_id], row_to_entry)?;
        match rows.next() {
            Some(entry) => Ok(Some(entry?)),
            None => Ok(None),
        }
    }

    fn upsert_entry(&self, entry: &CatalogEntry) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO steam_games
                (steam_id, name, description, header_image, genres, screenshots, platforms, release_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(steam_id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                header_image = excluded.header_image,
                genres = excluded.genres,
                screenshots = excluded.screenshots,
                platforms = excluded.platforms,
                release_date = excluded.release_date,
                cached_at = cast(strftime('%s','now') as int)",
            params![
                entry.steam_id,
                entry.name,
                entry.description,
                entry.header_image,
                serde_json::to_string(&entry.genres)?,
                serde_json::to_string(&entry.screenshots)?,
                serde_json::to_string(&entry.platforms)?,
                entry.release_date,
            ],
        )
        .with_context(|| format!("Failed to upsert catalog entry {}", entry.steam_id))?;
        Ok(())
    }

    fn list_entries(
        &self,
        page: usize,
        limit: usize,
        search: Option<&str>,
    ) -> Result<CatalogPage> {
        let page = page.max(1);
        let limit = limit.max(1);
        let (sql_limit, sql_offset) = limit_offset(page, limit);
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let conn = self.conn.lock().unwrap();
        let (total, games) = match search {
            Some(query) => {
                let total: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM steam_games WHERE instr(lower(name), lower(?1)) > 0",
                    params![query],
                    |r| r.get(0),
                )?;
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM steam_games WHERE instr(lower(name), lower(?1)) > 0
                     ORDER BY name COLLATE NOCASE LIMIT ?2 OFFSET ?3",
                    ENTRY_COLUMNS
                ))?;
                let games = stmt
                    .query_map(params![query, sql_limit, sql_offset], row_to_entry)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                (total, games)
            }
            None => {
                let total: i64 =
                    conn.query_row("SELECT COUNT(*) FROM steam_games", [], |r| r.get(0))?;
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM steam_games ORDER BY name COLLATE NOCASE LIMIT ?1 OFFSET ?2",
                    ENTRY_COLUMNS
                ))?;
                let games = stmt
                    .query_map(params![sql_limit, sql_offset], row_to_entry)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                (total, games)
            }
        };

        Ok(CatalogPage::new(games, page, limit, total as usize))
    }

    fn search_by_name(&self, query: &str, limit: usize) -> Result<Vec<CatalogEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM steam_games WHERE instr(lower(name), lower(?1)) > 0
             ORDER BY name COLLATE NOCASE LIMIT ?2",
            ENTRY_COLUMNS
        ))?;
        let entries = stmt
            .query_map(params![query, limit as i64], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    fn count_entries(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM steam_games", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}
