use crate::sqlite_column;
use crate::sqlite_persistence::{
    limit_offset, open_versioned_db, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
    DEFAULT_TIMESTAMP,
};
use crate::user::*;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, types::Type, types::Value, Connection, Row};
use std::{
    collections::HashMap,
    path::Path,
    str::FromStr,
    sync::{Arc, Mutex},
    time::{Duration, SystemTime},
};
use tracing::{debug, info};

/// V 0
const USER_TABLE_V_0: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("handle", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[("idx_user_handle", "handle")],
};
const AUTH_TOKEN_TABLE_V_0: Table = Table {
    name: "auth_token",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "user",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("value", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[("idx_auth_token_value", "value")],
};
const LIBRARY_TABLE_V_0: Table = Table {
    name: "library",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "user",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("steam_id", &SqlType::Integer),
        sqlite_column!("game_name", &SqlType::Text, non_null = true),
        sqlite_column!("header_image", &SqlType::Text),
        sqlite_column!("status", &SqlType::Text, non_null = true),
        sqlite_column!("platform", &SqlType::Text, non_null = true),
        sqlite_column!("priority", &SqlType::Integer),
        sqlite_column!(
            "progress_percent",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("drop_reason", &SqlType::Text),
        sqlite_column!(
            "date_added",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("date_last_played", &SqlType::Integer),
    ],
    unique_constraints: &[&["user_id", "game_name"]],
    indices: &[("idx_library_user", "user_id")],
};
const JOURNAL_TABLE_V_0: Table = Table {
    name: "journal",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "library_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "library",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("where_i_left_off", &SqlType::Text, non_null = true),
        sqlite_column!("current_objectives", &SqlType::Text, non_null = true),
        sqlite_column!("important_details", &SqlType::Text, non_null = true),
        sqlite_column!("decisions_made", &SqlType::Text, non_null = true),
        sqlite_column!("session_rating", &SqlType::Integer),
        sqlite_column!("hours_played", &SqlType::Real, non_null = true),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[("idx_journal_library", "library_id")],
};
const REVIEW_TABLE_V_0: Table = Table {
    name: "review",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("steam_id", &SqlType::Integer, non_null = true),
        sqlite_column!("username", &SqlType::Text, non_null = true),
        sqlite_column!("rating", &SqlType::Real, non_null = true),
        sqlite_column!("comment", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("updated_at", &SqlType::Integer),
    ],
    unique_constraints: &[],
    indices: &[("idx_review_steam_id", "steam_id")],
};

pub const USER_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        USER_TABLE_V_0,
        AUTH_TOKEN_TABLE_V_0,
        LIBRARY_TABLE_V_0,
        JOURNAL_TABLE_V_0,
        REVIEW_TABLE_V_0,
    ],
    migration: None,
}];

const LIBRARY_COLUMNS: &str = "l.id, u.handle, l.steam_id, l.game_name, l.header_image, \
     l.status, l.platform, l.priority, l.progress_percent, l.drop_reason, l.date_added, \
     l.date_last_played";

const JOURNAL_COLUMNS: &str = "id, library_id, where_i_left_off, current_objectives, \
     important_details, decisions_made, session_rating, hours_played, created_at";

const REVIEW_COLUMNS: &str = "id, steam_id, username, rating, comment, created_at, updated_at";

const NOW: &str = "cast(strftime('%s','now') as int)";

fn datetime_from_column(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn system_time_from_column_result(value: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(value.max(0) as u64)
}

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

fn unix_seconds(time: SystemTime) -> i64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn row_to_library_entry(row: &Row) -> rusqlite::Result<LibraryEntry> {
    let status: String = row.get(5)?;
    Ok(LibraryEntry {
        id: row.get(0)?,
        username: row.get(1)?,
        steam_id: row.get(2)?,
        game_name: row.get(3)?,
        header_image: row.get(4)?,
        status: GameStatus::from_str(&status)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, e.into()))?,
        platform: row.get(6)?,
        priority: row.get(7)?,
        progress_percent: row.get(8)?,
        drop_reason: row.get(9)?,
        date_added: datetime_from_column(row.get(10)?),
        date_last_played: row.get::<_, Option<i64>>(11)?.map(datetime_from_column),
    })
}

fn row_to_journal_entry(row: &Row) -> rusqlite::Result<JournalEntry> {
    Ok(JournalEntry {
        id: row.get(0)?,
        library_id: row.get(1)?,
        where_i_left_off: row.get(2)?,
        current_objectives: row.get(3)?,
        important_details: row.get(4)?,
        decisions_made: row.get(5)?,
        session_rating: row.get(6)?,
        hours_played: row.get(7)?,
        created_at: datetime_from_column(row.get(8)?),
    })
}

fn row_to_review(row: &Row) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        steam_id: row.get(1)?,
        username: row.get(2)?,
        rating: row.get(3)?,
        comment: row.get(4)?,
        created_at: datetime_from_column(row.get(5)?),
        updated_at: row.get::<_, Option<i64>>(6)?.map(datetime_from_column),
    })
}

fn query_library_entry(
    conn: &Connection,
    username: &str,
    id: usize,
) -> Result<Option<LibraryEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM library l JOIN user u ON u.id = l.user_id
         WHERE l.id = ?1 AND u.handle = ?2",
        LIBRARY_COLUMNS
    ))?;
    let mut rows = stmt.query_map(params![id, username], row_to_library_entry)?;
    Ok(rows.next().transpose()?)
}

fn query_journal_entry(conn: &Connection, id: usize) -> Result<Option<JournalEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM journal WHERE id = ?1",
        JOURNAL_COLUMNS
    ))?;
    let mut rows = stmt.query_map(params![id], row_to_journal_entry)?;
    Ok(rows.next().transpose()?)
}

#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = open_versioned_db(db_path, USER_VERSIONED_SCHEMAS, "user")?;
        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl UserStore for SqliteUserStore {
    fn create_user(&self, username: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO user (handle) VALUES (?1)", params![username])
            .with_context(|| format!("Failed to create user {}", username))?;
        info!("Created user {}", username);
        Ok(conn.last_insert_rowid() as usize)
    }

    fn get_user_id(&self, username: &str) -> Result<Option<usize>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id FROM user WHERE handle = ?1")?;
        let mut rows = stmt.query_map(params![username], |row| row.get(0))?;
        Ok(rows.next().transpose()?)
    }

    fn get_username(&self, user_id: usize) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT handle FROM user WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![user_id], |row| row.get(0))?;
        Ok(rows.next().transpose()?)
    }
}

impl UserAuthTokenStore for SqliteUserStore {
    fn get_user_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT user_id, value, created FROM auth_token WHERE value = ?1")?;
        let mut rows = stmt.query_map(params![value.0], |row| {
            Ok(AuthToken {
                user_id: row.get(0)?,
                value: AuthTokenValue(row.get(1)?),
                created: system_time_from_column_result(row.get(2)?),
            })
        })?;
        Ok(rows.next().transpose()?)
    }

    fn delete_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let Some(token) = self.get_user_auth_token(token)? else {
            return Ok(None);
        };
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM auth_token WHERE value = ?1",
            params![token.value.0],
        )?;
        Ok(Some(token))
    }

    fn add_user_auth_token(&self, token: AuthToken) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO auth_token (user_id, value, created) VALUES (?1, ?2, ?3)",
            params![token.user_id, token.value.0, unix_seconds(token.created)],
        )?;
        Ok(())
    }

    fn prune_auth_tokens(&self, max_age_days: u64) -> Result<usize> {
        let max_age_secs = i64::try_from(max_age_days.saturating_mul(SECONDS_PER_DAY))
            .unwrap_or(i64::MAX);
        let cutoff = unix_seconds(SystemTime::now()).saturating_sub(max_age_secs);
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM auth_token WHERE created < ?1", params![cutoff])?;
        if deleted > 0 {
            debug!("Pruned {} expired auth tokens", deleted);
        }
        Ok(deleted)
    }
}

impl LibraryStore for SqliteUserStore {
    fn list_library(
        &self,
        username: &str,
        status: Option<GameStatus>,
        sort: LibrarySort,
    ) -> Result<Vec<LibraryEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM library l JOIN user u ON u.id = l.user_id
             WHERE u.handle = ?1 AND (?2 IS NULL OR l.status = ?2)
             ORDER BY {}",
            LIBRARY_COLUMNS,
            sort.order_by()
        ))?;
        let entries = stmt
            .query_map(
                params![username, status.map(|s| s.as_str())],
                row_to_library_entry,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    fn get_library_stats(&self, username: &str) -> Result<LibraryStats> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT l.status, COUNT(*) FROM library l JOIN user u ON u.id = l.user_id
             WHERE u.handle = ?1 GROUP BY l.status",
        )?;
        let counts = stmt
            .query_map(params![username], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stats = LibraryStats::default();
        for (status, count) in counts {
            stats.total += count;
            match GameStatus::from_str(&status) {
                Ok(GameStatus::Playing) => stats.playing = count,
                Ok(GameStatus::Completed) => stats.completed = count,
                Ok(GameStatus::OnHold) => stats.on_hold = count,
                Ok(GameStatus::Dropped) => stats.dropped = count,
                Ok(GameStatus::Wishlist) => stats.wishlist = count,
                Err(_) => {}
            }
        }
        Ok(stats)
    }

    fn get_library_entry(&self, username: &str, id: usize) -> Result<Option<LibraryEntry>> {
        let conn = self.conn.lock().unwrap();
        query_library_entry(&conn, username, id)
    }

    fn find_library_entry_by_name(
        &self,
        username: &str,
        game_name: &str,
    ) -> Result<Option<LibraryEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM library l JOIN user u ON u.id = l.user_id
             WHERE u.handle = ?1 AND l.game_name = ?2",
            LIBRARY_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![username, game_name], row_to_library_entry)?;
        Ok(rows.next().transpose()?)
    }

    fn add_library_entry(&self, username: &str, entry: NewLibraryEntry) -> Result<LibraryEntry> {
        let conn = self.conn.lock().unwrap();
        let inserted = conn
            .execute(
                "INSERT INTO library
                    (user_id, steam_id, game_name, header_image, status, platform, priority, progress_percent)
                 SELECT id, ?2, ?3, ?4, ?5, ?6, ?7, ?8 FROM user WHERE handle = ?1",
                params![
                    username,
                    entry.steam_id,
                    entry.game_name,
                    entry.header_image,
                    entry.status.as_str(),
                    entry.platform,
                    entry.priority,
                    entry.progress_percent,
                ],
            )
            .with_context(|| format!("Failed to add {} to library", entry.game_name))?;
        if inserted == 0 {
            anyhow::bail!("User {} not found", username);
        }

        let id = conn.last_insert_rowid() as usize;
        query_library_entry(&conn, username, id)?
            .with_context(|| format!("Library entry {} vanished after insert", id))
    }

    fn update_library_entry(
        &self,
        username: &str,
        id: usize,
        update: LibraryEntryUpdate,
    ) -> Result<Option<LibraryEntry>> {
        let conn = self.conn.lock().unwrap();
        if query_library_entry(&conn, username, id)?.is_none() {
            return Ok(None);
        }

        let mut assignments = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(status) = update.status {
            assignments.push("status");
            values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(platform) = update.platform {
            assignments.push("platform");
            values.push(Value::Text(platform));
        }
        if let Some(priority) = update.priority {
            assignments.push("priority");
            values.push(priority.map(Value::Integer).unwrap_or(Value::Null));
        }
        if let Some(progress) = update.progress_percent {
            assignments.push("progress_percent");
            values.push(Value::Integer(progress));
        }
        if let Some(drop_reason) = update.drop_reason {
            assignments.push("drop_reason");
            values.push(drop_reason.map(Value::Text).unwrap_or(Value::Null));
        }

        if !assignments.is_empty() {
            let set_clause = assignments
                .iter()
                .enumerate()
                .map(|(i, column)| format!("{} = ?{}", column, i + 1))
                .collect::<Vec<_>>()
                .join(", ");
            values.push(Value::Integer(id as i64));
            conn.execute(
                &format!(
                    "UPDATE library SET {} WHERE id = ?{}",
                    set_clause,
                    values.len()
                ),
                params_from_iter(values.iter()),
            )?;
        }

        query_library_entry(&conn, username, id)
    }

    fn delete_library_entry(
        &self,
        username: &str,
        id: usize,
    ) -> Result<Option<(LibraryEntry, usize)>> {
        let mut conn = self.conn.lock().unwrap();
        let Some(entry) = query_library_entry(&conn, username, id)? else {
            return Ok(None);
        };

        let tx = conn.transaction()?;
        let journal_count = tx.execute("DELETE FROM journal WHERE library_id = ?1", params![id])?;
        tx.execute("DELETE FROM library WHERE id = ?1", params![id])?;
        tx.commit()?;

        Ok(Some((entry, journal_count)))
    }
}

impl JournalStore for SqliteUserStore {
    fn list_journal_entries(&self, library_id: usize) -> Result<Vec<JournalEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM journal WHERE library_id = ?1 ORDER BY created_at DESC, id DESC",
            JOURNAL_COLUMNS
        ))?;
        let entries = stmt
            .query_map(params![library_id], row_to_journal_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    fn get_journal_entry(&self, id: usize) -> Result<Option<JournalEntry>> {
        let conn = self.conn.lock().unwrap();
        query_journal_entry(&conn, id)
    }

    fn add_journal_entry(
        &self,
        library_id: usize,
        content: JournalEntryContent,
    ) -> Result<JournalEntry> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO journal
                (library_id, where_i_left_off, current_objectives, important_details,
                 decisions_made, session_rating, hours_played)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                library_id,
                content.where_i_left_off,
                content.current_objectives,
                content.important_details,
                content.decisions_made,
                content.session_rating,
                content.hours_played,
            ],
        )
        .with_context(|| format!("Failed to add journal entry to library entry {}", library_id))?;
        let id = tx.last_insert_rowid() as usize;
        tx.execute(
            &format!("UPDATE library SET date_last_played = {} WHERE id = ?1", NOW),
            params![library_id],
        )?;
        tx.commit()?;

        query_journal_entry(&conn, id)?
            .with_context(|| format!("Journal entry {} vanished after insert", id))
    }

    fn update_journal_entry(
        &self,
        id: usize,
        content: JournalEntryContent,
    ) -> Result<Option<JournalEntry>> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE journal SET where_i_left_off = ?1, current_objectives = ?2,
                important_details = ?3, decisions_made = ?4, session_rating = ?5,
                hours_played = ?6
             WHERE id = ?7",
            params![
                content.where_i_left_off,
                content.current_objectives,
                content.important_details,
                content.decisions_made,
                content.session_rating,
                content.hours_played,
                id,
            ],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        query_journal_entry(&conn, id)
    }

    fn delete_journal_entry(&self, id: usize) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM journal WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

impl ReviewStore for SqliteUserStore {
    fn get_review_summaries(&self, steam_ids: &[u32]) -> Result<HashMap<u32, ReviewSummary>> {
        let mut summaries: HashMap<u32, ReviewSummary> = steam_ids
            .iter()
            .map(|id| (*id, ReviewSummary::default()))
            .collect();
        if summaries.is_empty() {
            return Ok(summaries);
        }

        let ids: Vec<u32> = summaries.keys().copied().collect();
        let placeholders = (1..=ids.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT steam_id, AVG(rating), COUNT(*) FROM review
             WHERE steam_id IN ({}) GROUP BY steam_id",
            placeholders
        ))?;
        let rows = stmt
            .query_map(params_from_iter(ids.iter()), |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    ReviewSummary {
                        average_rating: row.get(1)?,
                        review_count: row.get::<_, i64>(2)? as usize,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        summaries.extend(rows);
        Ok(summaries)
    }

    fn get_review_summary(&self, steam_id: u32) -> Result<ReviewSummary> {
        let conn = self.conn.lock().unwrap();
        let summary = conn.query_row(
            "SELECT AVG(rating), COUNT(*) FROM review WHERE steam_id = ?1",
            params![steam_id],
            |row| {
                Ok(ReviewSummary {
                    average_rating: row.get(0)?,
                    review_count: row.get::<_, i64>(1)? as usize,
                })
            },
        )?;
        Ok(summary)
    }

    fn list_reviews(
        &self,
        steam_id: u32,
        page: usize,
        limit: usize,
    ) -> Result<(Vec<Review>, usize)> {
        let (sql_limit, sql_offset) = limit_offset(page, limit);
        let conn = self.conn.lock().unwrap();
        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM review WHERE steam_id = ?1",
            params![steam_id],
            |row| row.get(0),
        )?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM review WHERE steam_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3",
            REVIEW_COLUMNS
        ))?;
        let reviews = stmt
            .query_map(
                params![steam_id, sql_limit, sql_offset],
                row_to_review,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((reviews, total as usize))
    }

    fn get_review(&self, id: usize) -> Result<Option<Review>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM review WHERE id = ?1",
            REVIEW_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![id], row_to_review)?;
        Ok(rows.next().transpose()?)
    }

    fn add_review(
        &self,
        steam_id: u32,
        username: &str,
        rating: f64,
        comment: &str,
    ) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO review (steam_id, username, rating, comment) VALUES (?1, ?2, ?3, ?4)",
            params![steam_id, username, rating, comment],
        )
        .with_context(|| format!("Failed to add review of {} by {}", steam_id, username))?;
        Ok(conn.last_insert_rowid() as usize)
    }

    fn update_review(&self, id: usize, rating: f64, comment: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            &format!(
                "UPDATE review SET rating = ?1, comment = ?2, updated_at = {} WHERE id = ?3",
                NOW
            ),
            params![rating, comment, id],
        )?;
        Ok(updated > 0)
    }

    fn delete_review(&self, id: usize) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM review WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
