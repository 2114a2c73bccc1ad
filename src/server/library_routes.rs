//! Personal game library routes. Every route is scoped to the session user.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::api_error::{ApiError, ApiResult};
use super::session::Session;
use super::state::{GuardedUserStore, ServerState};
use crate::user::{GameStatus, LibraryEntry, LibraryEntryUpdate, LibrarySort, NewLibraryEntry};

const NOT_IN_LIBRARY: &str = "Game not found in library";

#[derive(Debug, Deserialize)]
struct LibraryQuery {
    status: Option<String>,
    sort: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddGameBody {
    steam_id: Option<u32>,
    game_name: Option<String>,
    header_image: Option<String>,
    status: Option<GameStatus>,
    platform: Option<String>,
    priority: Option<i64>,
    progress_percent: Option<i64>,
}

/// Library and journal ids are plain integers in paths.
pub(super) fn parse_id(raw: &str) -> ApiResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid ID"))
}

/// GET / - The user's library, optionally filtered by status
async fn list_library(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Query(query): Query<LibraryQuery>,
) -> ApiResult<impl IntoResponse> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<GameStatus>() {
            Ok(status) => Some(status),
            // No entry can have an unknown status.
            Err(_) => return Ok(Json(Vec::<LibraryEntry>::new())),
        },
    };
    let sort = LibrarySort::from_query(query.sort.as_deref());

    let entries = user_store.list_library(&session.user.username, status, sort)?;
    Ok(Json(entries))
}

/// GET /stats - Counts of the user's games by status
async fn get_stats(
    session: Session,
    State(user_store): State<GuardedUserStore>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(user_store.get_library_stats(&session.user.username)?))
}

/// GET /{id} - One library entry
async fn get_library_entry(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    user_store
        .get_library_entry(&session.user.username, id)?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_IN_LIBRARY))
}

/// POST / - Adds a game to the user's library
async fn add_game(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Json(body): Json<AddGameBody>,
) -> ApiResult<impl IntoResponse> {
    let game_name = body.game_name.as_deref().map(str::trim).unwrap_or_default();
    if game_name.is_empty() {
        return Err(ApiError::bad_request("Game name is required"));
    }

    let username = &session.user.username;
    if user_store
        .find_library_entry_by_name(username, game_name)?
        .is_some()
    {
        return Err(ApiError::bad_request("Game already in your library"));
    }

    let entry = user_store.add_library_entry(
        username,
        NewLibraryEntry {
            steam_id: body.steam_id,
            game_name: game_name.to_string(),
            header_image: body.header_image.filter(|s| !s.is_empty()),
            status: body.status.unwrap_or(GameStatus::Wishlist),
            platform: body
                .platform
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Steam".to_string()),
            priority: body.priority,
            progress_percent: body.progress_percent.unwrap_or(0),
        },
    )?;
    info!("Game added: {} for user {}", entry.game_name, username);

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH /{id} - Updates the fields present in the body
async fn update_game(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(id): Path<String>,
    Json(update): Json<LibraryEntryUpdate>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let update = update.with_completion_progress();

    let updated = user_store
        .update_library_entry(&session.user.username, id, update)?
        .ok_or(ApiError::NotFound(NOT_IN_LIBRARY))?;
    info!("Game updated: {}", updated.game_name);

    Ok(Json(updated))
}

/// DELETE /{id} - Removes a game and its journal
async fn delete_game(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let (entry, journal_count) = user_store
        .delete_library_entry(&session.user.username, id)?
        .ok_or(ApiError::NotFound(NOT_IN_LIBRARY))?;
    info!(
        "Game deleted: {} ({} journal entries removed)",
        entry.game_name, journal_count
    );

    Ok(Json(json!({
        "success": true,
        "message": format!("Deleted {} and {} journal entries", entry.game_name, journal_count),
    })))
}

pub fn library_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_library).post(add_game))
        .route("/stats", get(get_stats))
        .route(
            "/{id}",
            get(get_library_entry)
                .patch(update_game)
                .delete(delete_game),
        )
}
