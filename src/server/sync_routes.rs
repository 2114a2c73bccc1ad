//! Top sellers sync trigger.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::api_error::{ApiError, ApiResult};
use super::session::Session;
use super::state::ServerState;
use crate::sync::{SyncError, SyncSummary};

#[derive(Debug, Deserialize)]
struct SyncQuery {
    count: Option<String>,
}

#[derive(Serialize)]
struct SyncResponse {
    message: &'static str,
    #[serde(flatten)]
    summary: SyncSummary,
}

fn requested_count(raw: Option<&str>, default: usize) -> ApiResult<usize> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => s
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ApiError::bad_request("count must be a positive integer")),
    }
}

/// POST /topsellers?count=N - Runs one sync and waits for it to finish
async fn sync_top_sellers(
    session: Session,
    State(state): State<ServerState>,
    Query(query): Query<SyncQuery>,
) -> ApiResult<impl IntoResponse> {
    let count = requested_count(query.count.as_deref(), state.config.default_sync_count)?;
    info!(
        "Top sellers sync of {} games requested by {}",
        count, session.user.username
    );

    match state.catalog_sync.run(count).await {
        Ok(summary) => {
            if let Ok(total) = state.catalog_store.count_entries() {
                super::metrics::set_catalog_games(total);
            }
            Ok(Json(SyncResponse {
                message: "Sync completed.",
                summary,
            }))
        }
        Err(SyncError::AlreadyRunning) => Err(ApiError::Conflict("A sync is already running")),
        Err(e) => {
            error!("Top sellers sync failed: {}", e);
            Err(ApiError::Failed("Failed to sync top sellers."))
        }
    }
}

pub fn sync_routes() -> Router<ServerState> {
    Router::new().route("/topsellers", post(sync_top_sellers))
}
