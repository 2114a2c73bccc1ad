mod api_error;
mod auth_routes;
pub mod config;
mod game_routes;
mod http_layers;
mod journal_routes;
mod library_routes;
pub mod metrics;
mod review_routes;
#[allow(clippy::module_inception)]
pub mod server;
mod session;
pub mod state;
mod sync_routes;

pub use api_error::{ApiError, ApiResult};
pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use session::{Session, COOKIE_SESSION_TOKEN_KEY, HEADER_SESSION_TOKEN_KEY};
