use super::auth::{AuthToken, AuthTokenValue};
use super::user_models::{
    GameStatus, JournalEntry, JournalEntryContent, LibraryEntry, LibraryEntryUpdate,
    LibrarySort, LibraryStats, NewLibraryEntry, Review, ReviewSummary,
};
use anyhow::Result;
use std::collections::HashMap;

pub trait UserAuthTokenStore: Send + Sync {
    /// Returns the auth token with the given value.
    /// Returns Ok(None) if the token does not exist.
    fn get_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>>;

    /// Deletes an auth token given the token value.
    /// Returns the deleted token, or Ok(None) if it did not exist.
    fn delete_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>>;

    fn add_user_auth_token(&self, token: AuthToken) -> Result<()>;

    /// Deletes tokens created more than `max_age_days` ago.
    /// Returns the number of tokens that were deleted.
    fn prune_auth_tokens(&self, max_age_days: u64) -> Result<usize>;
}

pub trait UserStore: UserAuthTokenStore + Send + Sync {
    /// Creates a new user and returns the user id.
    fn create_user(&self, username: &str) -> Result<usize>;

    /// Returns Ok(None) if no user has this name.
    fn get_user_id(&self, username: &str) -> Result<Option<usize>>;

    fn get_username(&self, user_id: usize) -> Result<Option<String>>;
}

/// Per-user game library. Every lookup is scoped to the owner's username.
pub trait LibraryStore: Send + Sync {
    fn list_library(
        &self,
        username: &str,
        status: Option<GameStatus>,
        sort: LibrarySort,
    ) -> Result<Vec<LibraryEntry>>;

    fn get_library_stats(&self, username: &str) -> Result<LibraryStats>;

    /// Returns Ok(None) if the entry does not exist or belongs to someone else.
    fn get_library_entry(&self, username: &str, id: usize) -> Result<Option<LibraryEntry>>;

    fn find_library_entry_by_name(
        &self,
        username: &str,
        game_name: &str,
    ) -> Result<Option<LibraryEntry>>;

    fn add_library_entry(&self, username: &str, entry: NewLibraryEntry) -> Result<LibraryEntry>;

    /// Applies the fields present in `update`.
    /// Returns Ok(None) if the entry does not exist or belongs to someone else.
    fn update_library_entry(
        &self,
        username: &str,
        id: usize,
        update: LibraryEntryUpdate,
    ) -> Result<Option<LibraryEntry>>;

    /// Deletes the entry together with its journal.
    /// Returns the deleted entry and the number of journal entries removed.
    fn delete_library_entry(
        &self,
        username: &str,
        id: usize,
    ) -> Result<Option<(LibraryEntry, usize)>>;
}

pub trait JournalStore: Send + Sync {
    /// Entries of one library game, newest first.
    fn list_journal_entries(&self, library_id: usize) -> Result<Vec<JournalEntry>>;

    fn get_journal_entry(&self, id: usize) -> Result<Option<JournalEntry>>;

    /// Adds an entry and marks the parent library game as played now.
    fn add_journal_entry(
        &self,
        library_id: usize,
        content: JournalEntryContent,
    ) -> Result<JournalEntry>;

    /// Replaces the editable fields. Returns Ok(None) if the entry does not exist.
    fn update_journal_entry(
        &self,
        id: usize,
        content: JournalEntryContent,
    ) -> Result<Option<JournalEntry>>;

    /// Returns false if the entry did not exist.
    fn delete_journal_entry(&self, id: usize) -> Result<bool>;
}

pub trait ReviewStore: Send + Sync {
    /// Summaries keyed by steam id. Every requested id is present.
    fn get_review_summaries(&self, steam_ids: &[u32]) -> Result<HashMap<u32, ReviewSummary>>;

    fn get_review_summary(&self, steam_id: u32) -> Result<ReviewSummary>;

    /// One page of reviews, newest first, plus the total count.
    fn list_reviews(
        &self,
        steam_id: u32,
        page: usize,
        limit: usize,
    ) -> Result<(Vec<Review>, usize)>;

    fn get_review(&self, id: usize) -> Result<Option<Review>>;

    /// Returns the new review id.
    fn add_review(&self, steam_id: u32, username: &str, rating: f64, comment: &str)
        -> Result<usize>;

    /// Returns false if the review did not exist.
    fn update_review(&self, id: usize, rating: f64, comment: &str) -> Result<bool>;

    /// Returns false if the review did not exist.
    fn delete_review(&self, id: usize) -> Result<bool>;
}

pub trait FullUserStore: UserStore + LibraryStore + JournalStore + ReviewStore {}

// Blanket implementation for any type that implements all the user-facing stores
impl<T: UserStore + LibraryStore + JournalStore + ReviewStore> FullUserStore for T {}
