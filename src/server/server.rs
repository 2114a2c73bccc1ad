use anyhow::Result;
use std::time::Duration;

use tracing::{info, warn};

use axum::{
    extract::State, middleware, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{
    auth_routes::auth_routes, game_routes::game_routes, journal_routes::journal_routes,
    library_routes::library_routes, log_requests, metrics, review_routes::review_routes,
    state::*, sync_routes::sync_routes, ServerConfig,
};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn get_statics(State(state): State<ServerState>) -> impl IntoResponse {
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
    })
}

pub fn make_app(
    config: ServerConfig,
    catalog_store: GuardedCatalogStore,
    user_store: GuardedUserStore,
    catalog_sync: GuardedCatalogSync,
) -> Router {
    let state = ServerState::new(config.clone(), catalog_store, user_store, catalog_sync);

    let api_routes: Router<ServerState> = Router::new()
        .route("/statics", get(get_statics))
        .nest("/auth", auth_routes())
        .nest("/library", library_routes())
        .nest("/journal", journal_routes())
        .nest("/reviews", review_routes())
        .nest("/games", game_routes())
        .nest("/sync", sync_routes());

    let mut app: Router = Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(metrics::metrics_handler))
        .with_state(state.clone());

    if let Some(frontend_path) = config.frontend_dir_path {
        let static_files_service =
            ServeDir::new(frontend_path).append_index_html_on_directories(true);
        app = app.fallback_service(static_files_service);
    }

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state, log_requests));

    app
}

pub async fn run_server(
    config: ServerConfig,
    catalog_store: GuardedCatalogStore,
    user_store: GuardedUserStore,
    catalog_sync: GuardedCatalogSync,
) -> Result<()> {
    metrics::init_metrics();
    match catalog_store.count_entries() {
        Ok(count) => metrics::set_catalog_games(count),
        Err(e) => warn!("Could not count catalog games: {}", e),
    }

    let port = config.port;
    let app = make_app(config, catalog_store, user_store, catalog_sync);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("LevelUp server listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
