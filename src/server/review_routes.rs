//! Game reviews. Reading is public, writing needs a session.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::info;

use super::api_error::{ApiError, ApiResult};
use super::session::Session;
use super::state::{GuardedUserStore, ServerState};
use crate::user::{FullUserStore, Review, ReviewSummary};

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
struct SummariesQuery {
    #[serde(rename = "steamIds")]
    steam_ids: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewReviewBody {
    steam_id: Option<u32>,
    rating: Option<f64>,
    #[serde(default)]
    comment: String,
}

#[derive(Debug, Deserialize)]
struct UpdateReviewBody {
    rating: Option<f64>,
    #[serde(default)]
    comment: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameReviewSummary {
    steam_id: u32,
    #[serde(flatten)]
    summary: ReviewSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewPage {
    steam_id: u32,
    page: usize,
    limit: usize,
    total: usize,
    items: Vec<Review>,
}

/// Comma separated ids; anything that isn't an id is dropped.
fn parse_steam_ids(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

/// Missing, unparsable and non-positive values fall back to `default`.
fn positive_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn parse_steam_id(raw: &str) -> ApiResult<u32> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid steamId."))
}

fn parse_review_id(raw: &str) -> ApiResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid review id."))
}

/// Loads a review written by the session user.
fn authored_review(
    user_store: &dyn FullUserStore,
    session: &Session,
    id: usize,
) -> ApiResult<Review> {
    let review = user_store
        .get_review(id)?
        .ok_or(ApiError::NotFound("Review not found."))?;
    if review.username != session.user.username {
        return Err(ApiError::Forbidden);
    }
    Ok(review)
}

/// GET /summaries?steamIds=1,2,3 - Average rating and count per game
async fn get_summaries(
    State(user_store): State<GuardedUserStore>,
    Query(query): Query<SummariesQuery>,
) -> ApiResult<impl IntoResponse> {
    let steam_ids = parse_steam_ids(query.steam_ids.as_deref().unwrap_or_default());
    if steam_ids.is_empty() {
        return Ok(Json(BTreeMap::<String, ReviewSummary>::new()));
    }

    let summaries = user_store.get_review_summaries(&steam_ids)?;
    Ok(Json(
        summaries
            .into_iter()
            .map(|(steam_id, summary)| (steam_id.to_string(), summary))
            .collect::<BTreeMap<String, ReviewSummary>>(),
    ))
}

/// GET /game/{steam_id}/summary
async fn get_game_summary(
    State(user_store): State<GuardedUserStore>,
    Path(steam_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let steam_id = parse_steam_id(&steam_id)?;
    let summary = user_store.get_review_summary(steam_id)?;
    Ok(Json(GameReviewSummary { steam_id, summary }))
}

/// GET /game/{steam_id}?page=&limit= - Reviews of a game, newest first
async fn list_game_reviews(
    State(user_store): State<GuardedUserStore>,
    Path(steam_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<impl IntoResponse> {
    let steam_id = parse_steam_id(&steam_id)?;
    let page = positive_or(query.page.as_deref(), DEFAULT_PAGE);
    let limit = positive_or(query.limit.as_deref(), DEFAULT_LIMIT);

    let (items, total) = user_store.list_reviews(steam_id, page, limit)?;
    Ok(Json(ReviewPage {
        steam_id,
        page,
        limit,
        total,
        items,
    }))
}

/// POST / - Reviews a game as the session user
async fn create_review(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Json(body): Json<NewReviewBody>,
) -> ApiResult<impl IntoResponse> {
    let steam_id = body
        .steam_id
        .ok_or_else(|| ApiError::bad_request("Invalid steamId."))?;
    let rating = body
        .rating
        .filter(|r| (0.0..=5.0).contains(r))
        .ok_or_else(|| ApiError::bad_request("Rating must be a number between 0 and 5."))?;

    let review_id = user_store.add_review(
        steam_id,
        &session.user.username,
        rating,
        body.comment.trim(),
    )?;
    info!(
        "Review {} of game {} submitted by {}",
        review_id, steam_id, session.user.username
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Review submitted successfully.",
            "reviewId": review_id,
        })),
    ))
}

/// PATCH /{id} - Edits one of the user's reviews
async fn update_review(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(id): Path<String>,
    Json(body): Json<UpdateReviewBody>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_review_id(&id)?;
    let rating = body
        .rating
        .filter(|r| (1.0..=5.0).contains(r))
        .ok_or_else(|| ApiError::bad_request("Rating must be 1 to 5."))?;
    let comment = body.comment.trim();
    if comment.is_empty() {
        return Err(ApiError::bad_request("Comment is required."));
    }

    authored_review(user_store.as_ref(), &session, id)?;
    if !user_store.update_review(id, rating, comment)? {
        return Err(ApiError::NotFound("Review not found."));
    }

    Ok(Json(json!({ "message": "Review updated successfully." })))
}

/// DELETE /{id}
async fn delete_review(
    session: Session,
    State(user_store): State<GuardedUserStore>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_review_id(&id)?;
    authored_review(user_store.as_ref(), &session, id)?;
    if !user_store.delete_review(id)? {
        return Err(ApiError::NotFound("Review not found."));
    }

    Ok(Json(json!({ "message": "Review deleted successfully." })))
}

pub fn review_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(create_review))
        .route("/summaries", get(get_summaries))
        .route("/game/{steam_id}", get(list_game_reviews))
        .route("/game/{steam_id}/summary", get(get_game_summary))
        .route("/{id}", patch(update_review).delete(delete_review))
}
