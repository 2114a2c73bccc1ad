//! Session tokens and username rules.

use rand::Rng;
use rand_distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use thiserror::Error;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct AuthTokenValue(pub String);

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AuthToken {
    pub user_id: usize,
    pub created: SystemTime,
    pub value: AuthTokenValue,
}

impl AuthTokenValue {
    pub fn generate() -> AuthTokenValue {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        AuthTokenValue(random_string)
    }
}

impl AuthToken {
    pub fn is_older_than(&self, max_age: Duration) -> bool {
        SystemTime::now()
            .duration_since(self.created)
            .map(|age| age > max_age)
            .unwrap_or(false)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidUsername {
    #[error("Username must be at least 2 characters")]
    TooShort,
    #[error("Username can only contain letters, numbers, and underscores")]
    InvalidCharacters,
}

/// Trims and lowercases a login name, then checks it against `^[a-z0-9_]{2,}$`.
pub fn normalize_username(raw: &str) -> Result<String, InvalidUsername> {
    let username = raw.trim().to_lowercase();
    if username.chars().count() < 2 {
        return Err(InvalidUsername::TooShort);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(InvalidUsername::InvalidCharacters);
    }
    Ok(username)
}
