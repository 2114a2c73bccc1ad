mod normalize;
mod orchestrator;
mod throttle;

pub use normalize::normalize_app_details;
pub use orchestrator::{CatalogSync, SyncError, SyncSummary};
pub use throttle::{FixedDelayThrottle, NoOpThrottle, SyncThrottle};
