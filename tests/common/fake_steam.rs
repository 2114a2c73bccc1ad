//! In-process stand-in for the Steam store.
//!
//! Serves the two endpoints the server talks to: the top sellers search
//! listing and `appdetails`. Tests tweak its behavior and count the calls
//! it receives.

use super::constants::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use levelup_server::steam::LISTING_PAGE_SIZE;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Default)]
struct FakeSteamState {
    pages: Mutex<Vec<Vec<u32>>>,
    apps: Mutex<HashMap<u32, String>>,
    failing_apps: Mutex<HashSet<u32>>,
    listing_fails: AtomicBool,
    details_delay: Mutex<Duration>,
    listing_calls: AtomicUsize,
    details_calls: Mutex<Vec<u32>>,
}

/// Handle on a running fake store. The server task lives as long as the
/// test runtime.
#[derive(Clone)]
pub struct FakeSteamStore {
    pub base_url: String,
    state: Arc<FakeSteamState>,
}

#[allow(dead_code)]
impl FakeSteamStore {
    /// Spawns a store serving `TOP_SELLER_PAGES` and `KNOWN_APPS`.
    pub async fn spawn() -> Self {
        let state = Arc::new(FakeSteamState::default());
        *state.pages.lock().unwrap() = TOP_SELLER_PAGES.iter().map(|p| p.to_vec()).collect();
        *state.apps.lock().unwrap() = KNOWN_APPS
            .iter()
            .map(|(id, name)| (*id, name.to_string()))
            .collect();

        let app = Router::new()
            .route("/search/", get(search))
            .route("/api/appdetails", get(appdetails))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake Steam store");
        let addr = listener
            .local_addr()
            .expect("Failed to get fake Steam store address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake Steam store failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Replaces the listing pages, by page index.
    pub fn set_pages(&self, pages: &[&[u32]]) {
        *self.state.pages.lock().unwrap() = pages.iter().map(|p| p.to_vec()).collect();
    }

    /// Makes every listing request answer HTTP 500.
    pub fn fail_listing(&self) {
        self.state.listing_fails.store(true, Ordering::SeqCst);
    }

    /// Makes `appdetails` of this app answer HTTP 500.
    pub fn fail_app(&self, app_id: u32) {
        self.state.failing_apps.lock().unwrap().insert(app_id);
    }

    /// Renames a known app, as if Steam updated its record.
    pub fn rename_app(&self, app_id: u32, name: &str) {
        self.state
            .apps
            .lock()
            .unwrap()
            .insert(app_id, name.to_string());
    }

    /// Delays every `appdetails` answer.
    pub fn delay_details(&self, delay: Duration) {
        *self.state.details_delay.lock().unwrap() = delay;
    }

    pub fn listing_calls(&self) -> usize {
        self.state.listing_calls.load(Ordering::SeqCst)
    }

    /// App ids requested from `appdetails`, in request order.
    pub fn details_calls(&self) -> Vec<u32> {
        self.state.details_calls.lock().unwrap().clone()
    }
}

fn listing_html(ids: &[u32]) -> String {
    let rows: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<a href="https://store.example.com/app/{id}/" class="search_result_row" data-ds-appid="{id}"><span class="title">App {id}</span></a>"#
            )
        })
        .collect();
    format!(r#"<html><body><div id="search_resultsRows">{rows}</div></body></html>"#)
}

async fn search(
    State(state): State<Arc<FakeSteamState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.listing_calls.fetch_add(1, Ordering::SeqCst);
    if state.listing_fails.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    }

    let start: usize = params
        .get("start")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let pages = state.pages.lock().unwrap();
    let ids = pages
        .get(start / LISTING_PAGE_SIZE)
        .cloned()
        .unwrap_or_default();
    (StatusCode::OK, listing_html(&ids))
}

fn app_record(app_id: u32, name: &str) -> Value {
    let mut data = json!({
        "type": "game",
        "name": name,
        "steam_appid": app_id,
        "short_description": format!("{} in one line.", name),
        "header_image": format!("https://cdn.example.com/{}/header.jpg", app_id),
        "genres": [{"id": "1", "description": FAKE_GENRE}],
        "screenshots": [
            {"id": 0, "path_thumbnail": "thumb.jpg", "path_full": format!("https://cdn.example.com/{}/0.jpg", app_id)}
        ],
        "platforms": {"windows": true, "mac": false, "linux": true},
    });
    if app_id != UNDATED_APP_ID {
        data["release_date"] = json!({"coming_soon": false, "date": FAKE_RELEASE_DATE});
    }
    json!({"success": true, "data": data})
}

async fn appdetails(
    State(state): State<Arc<FakeSteamState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(app_id) = params.get("appids").and_then(|s| s.parse::<u32>().ok()) else {
        return (StatusCode::BAD_REQUEST, String::new());
    };
    state.details_calls.lock().unwrap().push(app_id);

    let delay = *state.details_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    if state.failing_apps.lock().unwrap().contains(&app_id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    }

    let record = match state.apps.lock().unwrap().get(&app_id) {
        Some(name) => app_record(app_id, name),
        None => json!({"success": false}),
    };
    let mut body = Map::new();
    body.insert(app_id.to_string(), record);
    (StatusCode::OK, Value::Object(body).to_string())
}
