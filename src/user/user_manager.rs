use super::auth::{normalize_username, AuthToken, AuthTokenValue, InvalidUsername};
use super::user_models::User;
use super::user_store::FullUserStore;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    InvalidUsername(#[from] InvalidUsername),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Username-only sessions on top of the user store.
pub struct UserManager {
    user_store: Arc<dyn FullUserStore>,
    session_max_age_days: u64,
}

impl UserManager {
    pub fn new(user_store: Arc<dyn FullUserStore>, session_max_age_days: u64) -> Self {
        Self {
            user_store,
            session_max_age_days,
        }
    }

    pub fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session_max_age_days.saturating_mul(24 * 60 * 60))
    }

    /// Logs in as `raw_username`, creating the user on first sight.
    pub fn login(&self, raw_username: &str) -> Result<(User, AuthToken), LoginError> {
        let username = normalize_username(raw_username)?;

        let id = match self.user_store.get_user_id(&username)? {
            Some(id) => id,
            None => {
                info!("New user created: {}", username);
                self.user_store.create_user(&username)?
            }
        };

        let token = AuthToken {
            user_id: id,
            created: SystemTime::now(),
            value: AuthTokenValue::generate(),
        };
        self.user_store.add_user_auth_token(token.clone())?;
        debug!("Issued session token for {}", username);

        Ok((User { id, username }, token))
    }

    /// Returns the user bound to the token, or Ok(None) if the token is
    /// unknown or expired. Expired tokens are deleted.
    pub fn resolve_session(&self, value: &AuthTokenValue) -> anyhow::Result<Option<User>> {
        let Some(token) = self.user_store.get_user_auth_token(value)? else {
            return Ok(None);
        };

        if token.is_older_than(self.session_max_age()) {
            debug!("Rejecting expired session token of user {}", token.user_id);
            self.user_store.delete_user_auth_token(value)?;
            return Ok(None);
        }

        Ok(self
            .user_store
            .get_username(token.user_id)?
            .map(|username| User {
                id: token.user_id,
                username,
            }))
    }

    /// Returns false if the token did not exist.
    pub fn logout(&self, value: &AuthTokenValue) -> anyhow::Result<bool> {
        Ok(self.user_store.delete_user_auth_token(value)?.is_some())
    }

    pub fn prune_expired_sessions(&self) -> anyhow::Result<usize> {
        self.user_store.prune_auth_tokens(self.session_max_age_days)
    }
}
