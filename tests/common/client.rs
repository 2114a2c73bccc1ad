//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP test client with cookie-based session management
#[allow(dead_code)]
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Creates a new client without a session
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true) // Automatically handle session cookies
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client logged in as `username`
    ///
    /// # Panics
    ///
    /// Panics if login fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String, username: &str) -> Self {
        let client = Self::new(base_url);

        let response = client.login(username).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Test user login failed: {:?}",
            response.text().await
        );

        client
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /api/auth/login
    pub async fn login(&self, username: &str) -> Response {
        self.client
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username }))
            .send()
            .await
            .expect("Login request failed")
    }

    /// POST /api/auth/logout
    pub async fn logout(&self) -> Response {
        self.client
            .post(self.url("/auth/logout"))
            .send()
            .await
            .expect("Logout request failed")
    }

    /// GET /api/auth/me
    pub async fn me(&self) -> Response {
        self.client
            .get(self.url("/auth/me"))
            .send()
            .await
            .expect("Me request failed")
    }

    // ========================================================================
    // Library Endpoints
    // ========================================================================

    /// GET /api/library
    pub async fn get_library(&self) -> Response {
        self.get_library_with_query("").await
    }

    /// GET /api/library?{query}
    pub async fn get_library_with_query(&self, query: &str) -> Response {
        let url = if query.is_empty() {
            self.url("/library")
        } else {
            format!("{}?{}", self.url("/library"), query)
        };
        self.client
            .get(url)
            .send()
            .await
            .expect("Get library request failed")
    }

    /// POST /api/library
    pub async fn add_game(&self, body: Value) -> Response {
        self.client
            .post(self.url("/library"))
            .json(&body)
            .send()
            .await
            .expect("Add game request failed")
    }

    /// Adds a game by name and returns its library id
    pub async fn add_game_named(&self, game_name: &str) -> u64 {
        let response = self.add_game(json!({ "gameName": game_name })).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Invalid add game body");
        body["id"].as_u64().expect("Library entry without id")
    }

    /// GET /api/library/stats
    pub async fn get_library_stats(&self) -> Response {
        self.client
            .get(self.url("/library/stats"))
            .send()
            .await
            .expect("Get library stats request failed")
    }

    /// GET /api/library/{id}
    pub async fn get_library_entry(&self, id: u64) -> Response {
        self.client
            .get(self.url(&format!("/library/{}", id)))
            .send()
            .await
            .expect("Get library entry request failed")
    }

    /// PATCH /api/library/{id}
    pub async fn update_game(&self, id: u64, body: Value) -> Response {
        self.client
            .patch(self.url(&format!("/library/{}", id)))
            .json(&body)
            .send()
            .await
            .expect("Update game request failed")
    }

    /// DELETE /api/library/{id}
    pub async fn delete_game(&self, id: u64) -> Response {
        self.client
            .delete(self.url(&format!("/library/{}", id)))
            .send()
            .await
            .expect("Delete game request failed")
    }

    // ========================================================================
    // Journal Endpoints
    // ========================================================================

    /// GET /api/journal/game/{library_id}
    pub async fn get_game_journal(&self, library_id: u64) -> Response {
        self.client
            .get(self.url(&format!("/journal/game/{}", library_id)))
            .send()
            .await
            .expect("Get game journal request failed")
    }

    /// GET /api/journal/{id}
    pub async fn get_journal_entry(&self, id: u64) -> Response {
        self.client
            .get(self.url(&format!("/journal/{}", id)))
            .send()
            .await
            .expect("Get journal entry request failed")
    }

    /// POST /api/journal
    pub async fn add_journal_entry(&self, body: Value) -> Response {
        self.client
            .post(self.url("/journal"))
            .json(&body)
            .send()
            .await
            .expect("Add journal entry request failed")
    }

    /// PUT /api/journal/{id}
    pub async fn update_journal_entry(&self, id: u64, body: Value) -> Response {
        self.client
            .put(self.url(&format!("/journal/{}", id)))
            .json(&body)
            .send()
            .await
            .expect("Update journal entry request failed")
    }

    /// DELETE /api/journal/{id}
    pub async fn delete_journal_entry(&self, id: u64) -> Response {
        self.client
            .delete(self.url(&format!("/journal/{}", id)))
            .send()
            .await
            .expect("Delete journal entry request failed")
    }

    // ========================================================================
    // Review Endpoints
    // ========================================================================

    /// GET /api/reviews/summaries?steamIds={ids}
    pub async fn get_review_summaries(&self, steam_ids: &str) -> Response {
        self.client
            .get(self.url(&format!("/reviews/summaries?steamIds={}", steam_ids)))
            .send()
            .await
            .expect("Get review summaries request failed")
    }

    /// GET /api/reviews/game/{steam_id}/summary
    pub async fn get_review_summary(&self, steam_id: u32) -> Response {
        self.client
            .get(self.url(&format!("/reviews/game/{}/summary", steam_id)))
            .send()
            .await
            .expect("Get review summary request failed")
    }

    /// GET /api/reviews/game/{steam_id}?{query}
    pub async fn get_game_reviews(&self, steam_id: u32, query: &str) -> Response {
        self.client
            .get(self.url(&format!("/reviews/game/{}?{}", steam_id, query)))
            .send()
            .await
            .expect("Get game reviews request failed")
    }

    /// POST /api/reviews
    pub async fn add_review(&self, body: Value) -> Response {
        self.client
            .post(self.url("/reviews"))
            .json(&body)
            .send()
            .await
            .expect("Add review request failed")
    }

    /// PATCH /api/reviews/{id}
    pub async fn update_review(&self, id: u64, body: Value) -> Response {
        self.client
            .patch(self.url(&format!("/reviews/{}", id)))
            .json(&body)
            .send()
            .await
            .expect("Update review request failed")
    }

    /// DELETE /api/reviews/{id}
    pub async fn delete_review(&self, id: u64) -> Response {
        self.client
            .delete(self.url(&format!("/reviews/{}", id)))
            .send()
            .await
            .expect("Delete review request failed")
    }

    // ========================================================================
    // Game Catalog Endpoints
    // ========================================================================

    /// GET /api/games?{query}
    pub async fn list_games(&self, query: &str) -> Response {
        self.client
            .get(self.url(&format!("/games?{}", query)))
            .send()
            .await
            .expect("List games request failed")
    }

    /// GET /api/games/search?q={q}
    pub async fn search_games(&self, q: &str) -> Response {
        self.client
            .get(self.url("/games/search"))
            .query(&[("q", q)])
            .send()
            .await
            .expect("Search games request failed")
    }

    /// GET /api/games/{steam_id}
    pub async fn fetch_game(&self, steam_id: &str) -> Response {
        self.client
            .get(self.url(&format!("/games/{}", steam_id)))
            .send()
            .await
            .expect("Fetch game request failed")
    }

    /// GET /api/games/{steam_id}/details
    pub async fn get_game_details(&self, steam_id: &str) -> Response {
        self.client
            .get(self.url(&format!("/games/{}/details", steam_id)))
            .send()
            .await
            .expect("Get game details request failed")
    }

    // ========================================================================
    // Sync and Server Endpoints
    // ========================================================================

    /// POST /api/sync/topsellers
    pub async fn sync_top_sellers(&self, count: Option<&str>) -> Response {
        let mut request = self.client.post(self.url("/sync/topsellers"));
        if let Some(count) = count {
            request = request.query(&[("count", count)]);
        }
        request.send().await.expect("Sync request failed")
    }

    /// GET /api/statics
    pub async fn get_statics(&self) -> Response {
        self.client
            .get(self.url("/statics"))
            .send()
            .await
            .expect("Statics request failed")
    }

    /// GET /metrics
    pub async fn get_metrics(&self) -> Response {
        self.client
            .get(format!("{}/metrics", self.base_url))
            .send()
            .await
            .expect("Metrics request failed")
    }
}
