//! SQLite schema for the Steam catalog database.
//!
//! List and map fields (genres, screenshots, platforms) are stored as JSON text.

use crate::sqlite_column;
use crate::sqlite_persistence::{SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP};

const STEAM_GAMES_TABLE_V_0: Table = Table {
    name: "steam_games",
    columns: &[
        sqlite_column!("steam_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text, non_null = true),
        sqlite_column!("header_image", &SqlType::Text, non_null = true),
        sqlite_column!("genres", &SqlType::Text, non_null = true),
        sqlite_column!("screenshots", &SqlType::Text, non_null = true),
        sqlite_column!("platforms", &SqlType::Text, non_null = true),
        sqlite_column!("release_date", &SqlType::Text),
        sqlite_column!(
            "cached_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_steam_games_name", "name")],
    unique_constraints: &[],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[STEAM_GAMES_TABLE_V_0],
    migration: None,
}];
