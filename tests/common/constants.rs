//! Shared constants for end-to-end tests
//!
//! When test users or Steam fixtures change, update only this file.

#![allow(dead_code)]

// ============================================================================
// Test Users
// ============================================================================

/// Regular test user
pub const TEST_USER: &str = "testuser";

/// A second user, for ownership checks
pub const OTHER_USER: &str = "otheruser";

// ============================================================================
// Fake Steam Store Fixtures
// ============================================================================

/// Listing pages served by the default fake store, by page index.
/// The second page repeats an id from the first one.
pub const TOP_SELLER_PAGES: &[&[u32]] = &[&[10, 20], &[10, 30]];

/// Apps the default fake store knows, with their names.
pub const KNOWN_APPS: &[(u32, &str)] = &[
    (10, "Hollow Depths"),
    (20, "Star Freighter"),
    (30, "Orchard Tales"),
    (1145360, "Hades"),
];

/// App id the fake store answers with `success: false`
pub const UNKNOWN_APP_ID: u32 = 404040;

/// Genre attached to every known app
pub const FAKE_GENRE: &str = "Action";

/// Release date attached to every known app except `UNDATED_APP_ID`
pub const FAKE_RELEASE_DATE: &str = "17 Sep, 2020";

/// Known app served without a release date
pub const UNDATED_APP_ID: u32 = 30;

/// Top sellers synced when the request gives no count
pub const TEST_DEFAULT_SYNC_COUNT: usize = 2;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Per-request timeout of the server's Steam client (seconds)
pub const STEAM_TIMEOUT_SECS: u64 = 5;
