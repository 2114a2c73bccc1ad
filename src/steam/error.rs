use thiserror::Error;

/// Errors returned when talking to the Steam store.
#[derive(Debug, Error)]
pub enum SteamError {
    /// The store answered with a non-success status.
    #[error("Steam request for {context} failed with status {status}")]
    Http { status: u16, context: String },

    #[error("Steam request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The details entry is missing or flagged `success: false`.
    #[error("Game {0} not found on Steam")]
    NotFound(u32),

    #[error("Malformed Steam response: {0}")]
    Decode(String),
}

impl SteamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SteamError::NotFound(_))
    }
}
