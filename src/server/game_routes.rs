//! Public catalog browsing plus on-demand fetches from Steam.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::api_error::{ApiError, ApiResult};
use super::state::{GuardedCatalogStore, GuardedCatalogSync, ServerState};
use crate::catalog_store::CatalogEntry;
use crate::sync::SyncError;

const DEFAULT_PAGE_LIMIT: usize = 20;
const MAX_PAGE_LIMIT: usize = 100;
const SEARCH_RESULTS_LIMIT: usize = 10;
const MIN_SEARCH_QUERY_LENGTH: usize = 2;

#[derive(Debug, Deserialize)]
struct ListGamesQuery {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

fn parse_steam_id(raw: &str) -> ApiResult<u32> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid Steam app id."))
}

fn page_params(query: &ListGamesQuery) -> (usize, usize) {
    let page = query
        .page
        .as_deref()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1);
    let limit = query
        .limit
        .as_deref()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .min(MAX_PAGE_LIMIT);
    (page, limit)
}

/// GET /?page=&limit=&search= - One page of the catalog ordered by name
async fn list_games(
    State(catalog_store): State<GuardedCatalogStore>,
    Query(query): Query<ListGamesQuery>,
) -> ApiResult<impl IntoResponse> {
    let (page, limit) = page_params(&query);
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    Ok(Json(catalog_store.list_entries(page, limit, search)?))
}

/// GET /search?q= - Name autocompletion
async fn search_games(
    State(catalog_store): State<GuardedCatalogStore>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let q = query.q.trim();
    if q.chars().count() < MIN_SEARCH_QUERY_LENGTH {
        return Ok(Json(Vec::<CatalogEntry>::new()));
    }
    Ok(Json(catalog_store.search_by_name(q, SEARCH_RESULTS_LIMIT)?))
}

/// GET /{steam_id}/details - The cached entry, without calling Steam
async fn get_game_details(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(steam_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let steam_id = parse_steam_id(&steam_id)?;
    catalog_store
        .get_entry(steam_id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Game not found."))
}

/// GET /{steam_id} - Fetches the game from Steam and refreshes the cache
async fn fetch_game(
    State(catalog_sync): State<GuardedCatalogSync>,
    Path(steam_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let steam_id = parse_steam_id(&steam_id)?;
    match catalog_sync.fetch_single(steam_id).await {
        Ok(game) => Ok(Json(json!({
            "message": "Game data fetched and stored successfully.",
            "game": game,
        }))),
        Err(SyncError::Fetch(e)) if e.is_not_found() => {
            Err(ApiError::NotFound("Game not found on Steam."))
        }
        Err(e) => {
            warn!("Failed to fetch game {}: {}", steam_id, e);
            Err(ApiError::Failed("Failed to fetch game data from Steam."))
        }
    }
}

pub fn game_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_games))
        .route("/search", get(search_games))
        .route("/{steam_id}", get(fetch_game))
        .route("/{steam_id}/details", get(get_game_details))
}
