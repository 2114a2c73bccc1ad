pub mod auth;
mod sqlite_user_store;
mod user_manager;
pub mod user_models;
mod user_store;

pub use auth::{normalize_username, AuthToken, AuthTokenValue, InvalidUsername};
pub use sqlite_user_store::{SqliteUserStore, USER_VERSIONED_SCHEMAS};
pub use user_manager::{LoginError, UserManager};
pub use user_models::{
    GameStatus, JournalEntry, JournalEntryContent, LibraryEntry, LibraryEntryUpdate,
    LibrarySort, LibraryStats, NewLibraryEntry, Review, ReviewSummary, User,
};
pub use user_store::{
    FullUserStore, JournalStore, LibraryStore, ReviewStore, UserAuthTokenStore, UserStore,
};
