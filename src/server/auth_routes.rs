//! Username-only login, logout and session lookup.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::api_error::{ApiError, ApiResult};
use super::metrics::record_login_attempt;
use super::session::{Session, COOKIE_SESSION_TOKEN_KEY};
use super::state::{GuardedUserManager, ServerState};
use crate::config::MAX_SESSION_MAX_AGE_DAYS;
use crate::user::LoginError;

#[derive(Deserialize, Debug)]
struct LoginBody {
    #[serde(default)]
    username: String,
}

fn session_cookie(value: String, max_age_days: u64) -> Cookie<'static> {
    Cookie::build((COOKIE_SESSION_TOKEN_KEY, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(
            max_age_days.min(MAX_SESSION_MAX_AGE_DAYS) as i64,
        ))
        .build()
}

fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_SESSION_TOKEN_KEY, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .expires(time::OffsetDateTime::now_utc() - time::Duration::days(1))
        .build()
}

/// POST /login - Creates the user on first login and starts a session
async fn login(
    State(state): State<ServerState>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Response> {
    debug!("login() called for {:?}", body.username);
    let (user, token) = match state.user_manager.login(&body.username) {
        Ok(x) => x,
        Err(LoginError::InvalidUsername(reason)) => {
            record_login_attempt("rejected");
            return Err(ApiError::bad_request(reason.to_string()));
        }
        Err(LoginError::Store(err)) => {
            record_login_attempt("error");
            return Err(ApiError::Internal(err.context("Login failed")));
        }
    };
    record_login_attempt("success");
    info!("User {} logged in", user.username);

    let cookie = session_cookie(token.value.0, state.config.session_max_age_days);
    Ok((
        [(SET_COOKIE, cookie.to_string())],
        Json(json!({ "success": true, "user": user })),
    )
        .into_response())
}

/// POST /logout - Ends the current session, if any
async fn logout(
    State(user_manager): State<GuardedUserManager>,
    session: Option<Session>,
) -> ApiResult<Response> {
    if let Some(session) = session {
        user_manager.logout(&session.token)?;
        debug!("User {} logged out", session.user.username);
    }

    Ok((
        [(SET_COOKIE, expired_session_cookie().to_string())],
        Json(json!({ "success": true })),
    )
        .into_response())
}

/// GET /me - The logged in user
async fn me(session: Option<Session>) -> ApiResult<Json<serde_json::Value>> {
    match session {
        Some(session) => Ok(Json(json!({ "user": session.user }))),
        None => Err(ApiError::Unauthorized("Not logged in")),
    }
}

pub fn auth_routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
