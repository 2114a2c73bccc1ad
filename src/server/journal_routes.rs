//! Play session journal routes.
//!
//! Entries belong to a library game; access to an entry is granted through
//! ownership of that game.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::api_error::{ApiError, ApiResult};
use super::library_routes::parse_id;
use super::session::Session;
use super::state::{GuardedUserStore, ServerState};
use crate::user::{FullUserStore, JournalEntry, JournalEntryContent, LibraryEntry};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JournalBody {
    library_id: Option<serde_json::Value>,
    where_i_left_off: Option<String>,
    current_objectives: Option<String>,
    important_details: Option<String>,
    decisions_made: Option<String>,
    session_rating: Option<i64>,
    hours_played: Option<f64>,
}

impl JournalBody {
    /// Accepts the id as a JSON number or a numeric string.
    fn library_id(&self) -> ApiResult<usize> {
        let invalid = || ApiError::bad_request("Invalid library ID");
        match &self.library_id {
            None | Some(serde_json::Value::Null) => {
                Err(ApiError::bad_request("Library ID is required"))
            }
            Some(serde_json::Value::Number(n)) => n
                .as_u64()
                .map(|id| id as usize)
                .ok_or_else(invalid),
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                s.trim().parse().map_err(|_| invalid())
            }
            Some(serde_json::Value::String(_)) => {
                Err(ApiError::bad_request("Library ID is required"))
            }
            Some(_) => Err(invalid()),
        }
    }

    fn into_content(self) -> JournalEntryContent {
        JournalEntryContent {
            where_i_left_off: self.where_i_left_off.unwrap_or_default(),
            current_objectives: self.current_objectives.unwrap_or_default(),
            important_details: self.important_details.unwrap_or_default(),
            decisions_made: self.decisions_made.unwrap_or_default(),
            session_rating: self.session_rating,
            hours_played: self.hours_played.unwrap_or(0.0),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameJournal {
    game: LibraryEntry,
    entries: Vec<JournalEntry>,
    total_hours: f64,
    session_count: usize,
}

/// Loads an entry the session user is allowed to touch.
fn owned_journal_entry(
    user_store: &dyn FullUserStore,
    session: &Session,
    id: usize,
    not_found: &'static str,
) -> ApiResult<(JournalEntry, LibraryEntry)> {
    let entry = user_store
        .get_journal_entry(id)?
        .ok_or(ApiError::NotFound(not_found))?;
    let game = user_store
        .get_library_entry(&session.user.username, entry.library_id)?
        .ok_or(ApiError::Forbidden)?;
    Ok((entry, game))
}

/// GET /game/{library_id} - All entries of one library game, newest first
async fn get_game_journal(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(library_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let library_id = parse_id(&library_id)?;
    let game = user_store
        .get_library_entry(&session.user.username, library_id)?
        .ok_or(ApiError::NotFound("Game not found in library"))?;

    let entries = user_store.list_journal_entries(library_id)?;
    let total_hours: f64 = entries.iter().map(|e| e.hours_played).sum();

    Ok(Json(GameJournal {
        game,
        session_count: entries.len(),
        total_hours,
        entries,
    }))
}

/// GET /{id} - One journal entry
async fn get_journal_entry(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let (entry, _) = owned_journal_entry(
        user_store.as_ref(),
        &session,
        id,
        "Journal entry not found",
    )?;
    Ok(Json(entry))
}

/// POST / - Records a play session
async fn create_journal_entry(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Json(body): Json<JournalBody>,
) -> ApiResult<impl IntoResponse> {
    let library_id = body.library_id()?;
    let game = user_store
        .get_library_entry(&session.user.username, library_id)?
        .ok_or(ApiError::NotFound("Game not found in library"))?;

    let entry = user_store.add_journal_entry(library_id, body.into_content())?;
    info!("Journal entry added for: {}", game.game_name);

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /{id} - Replaces the editable fields of an entry
async fn update_journal_entry(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(id): Path<String>,
    Json(body): Json<JournalBody>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let (_, game) = owned_journal_entry(user_store.as_ref(), &session, id, "Entry not found")?;

    let updated = user_store
        .update_journal_entry(id, body.into_content())?
        .ok_or(ApiError::NotFound("Entry not found"))?;
    info!("Journal entry updated for: {}", game.game_name);

    Ok(Json(updated))
}

/// DELETE /{id}
async fn delete_journal_entry(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let (_, game) = owned_journal_entry(user_store.as_ref(), &session, id, "Entry not found")?;

    user_store.delete_journal_entry(id)?;
    info!("Journal entry deleted for: {}", game.game_name);

    Ok(Json(json!({ "success": true })))
}

pub fn journal_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(create_journal_entry))
        .route("/game/{library_id}", get(get_game_journal))
        .route(
            "/{id}",
            get(get_journal_entry)
                .put(update_journal_entry)
                .delete(delete_journal_entry),
        )
}
