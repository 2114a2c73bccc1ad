use super::api_error::ApiError;
use super::state::ServerState;
use crate::user::{AuthTokenValue, User};

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

/// The logged in user of a request.
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub token: AuthTokenValue,
}

pub const COOKIE_SESSION_TOKEN_KEY: &str = "session_token";
pub const HEADER_SESSION_TOKEN_KEY: &str = "Authorization";

fn extract_session_token_from_cookies(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

fn extract_session_token_from_headers(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(HEADER_SESSION_TOKEN_KEY)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then(|| token.to_string())
}

async fn extract_session_from_request_parts(
    parts: &Parts,
    ctx: &ServerState,
) -> Result<Option<Session>, ApiError> {
    let token = match extract_session_token_from_cookies(parts)
        .or_else(|| extract_session_token_from_headers(parts))
    {
        None => {
            debug!("No token in cookies nor headers.");
            return Ok(None);
        }
        Some(x) => AuthTokenValue(x),
    };

    match ctx.user_manager.resolve_session(&token)? {
        Some(user) => {
            debug!("Resolved session of user {}", user.username);
            Ok(Some(Session { user, token }))
        }
        None => {
            debug!("Session token is unknown or expired");
            Ok(None)
        }
    }
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_session_from_request_parts(parts, ctx)
            .await?
            .ok_or(ApiError::Unauthorized("Must be logged in"))
    }
}

impl OptionalFromRequestParts<ServerState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Option<Self>, Self::Rejection> {
        extract_session_from_request_parts(parts, ctx).await
    }
}
