//! LevelUp Server Library
//!
//! This library exposes the internal modules for the binaries and the
//! end-to-end tests.

pub mod catalog_store;
pub mod config;
pub mod server;
pub mod sqlite_persistence;
pub mod steam;
pub mod sync;
pub mod user;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use sync::{CatalogSync, SyncSummary};
pub use user::{SqliteUserStore, UserManager};
