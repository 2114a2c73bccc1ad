use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: usize,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Dropped,
    Wishlist,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "Playing",
            GameStatus::Completed => "Completed",
            GameStatus::OnHold => "On Hold",
            GameStatus::Dropped => "Dropped",
            GameStatus::Wishlist => "Wishlist",
        }
    }
}

impl FromStr for GameStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "Playing" => Ok(GameStatus::Playing),
            "Completed" => Ok(GameStatus::Completed),
            "On Hold" => Ok(GameStatus::OnHold),
            "Dropped" => Ok(GameStatus::Dropped),
            "Wishlist" => Ok(GameStatus::Wishlist),
            _ => anyhow::bail!("Unknown game status {}", s),
        }
    }
}

/// A game in a user's personal library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: usize,
    pub username: String,
    pub steam_id: Option<u32>,
    pub game_name: String,
    pub header_image: Option<String>,
    pub status: GameStatus,
    pub platform: String,
    pub priority: Option<i64>,
    pub progress_percent: i64,
    pub drop_reason: Option<String>,
    pub date_added: DateTime<Utc>,
    pub date_last_played: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewLibraryEntry {
    pub steam_id: Option<u32>,
    pub game_name: String,
    pub header_image: Option<String>,
    pub status: GameStatus,
    pub platform: String,
    pub priority: Option<i64>,
    pub progress_percent: i64,
}

/// Partial update of a library entry. `None` leaves the field untouched,
/// `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntryUpdate {
    pub status: Option<GameStatus>,
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "present_field")]
    pub priority: Option<Option<i64>>,
    pub progress_percent: Option<i64>,
    #[serde(default, deserialize_with = "present_field")]
    pub drop_reason: Option<Option<String>>,
}

impl LibraryEntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.platform.is_none()
            && self.priority.is_none()
            && self.progress_percent.is_none()
            && self.drop_reason.is_none()
    }

    /// Marking a game Completed without a progress value sets progress to 100.
    pub fn with_completion_progress(mut self) -> Self {
        if self.status == Some(GameStatus::Completed) && self.progress_percent.is_none() {
            self.progress_percent = Some(100);
        }
        self
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn present_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibrarySort {
    #[default]
    DateAdded,
    Title,
    Progress,
    Priority,
}

impl LibrarySort {
    /// Unknown keys fall back to the default ordering.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("title") => LibrarySort::Title,
            Some("progress") => LibrarySort::Progress,
            Some("priority") => LibrarySort::Priority,
            _ => LibrarySort::DateAdded,
        }
    }

    /// ORDER BY clause over the `l` alias of the library table.
    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            LibrarySort::DateAdded => "l.date_added DESC, l.id DESC",
            LibrarySort::Title => "l.game_name ASC, l.id ASC",
            LibrarySort::Progress => "l.progress_percent DESC, l.id DESC",
            LibrarySort::Priority => {
                "l.priority IS NULL, l.priority ASC, l.date_added DESC, l.id DESC"
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total: usize,
    pub playing: usize,
    pub completed: usize,
    pub on_hold: usize,
    pub dropped: usize,
    pub wishlist: usize,
}

/// Notes taken after one play session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: usize,
    pub library_id: usize,
    pub where_i_left_off: String,
    pub current_objectives: String,
    pub important_details: String,
    pub decisions_made: String,
    pub session_rating: Option<i64>,
    pub hours_played: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalEntryContent {
    pub where_i_left_off: String,
    pub current_objectives: String,
    pub important_details: String,
    pub decisions_made: String,
    pub session_rating: Option<i64>,
    pub hours_played: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: usize,
    pub steam_id: u32,
    pub username: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub average_rating: Option<f64>,
    pub review_count: usize,
}
