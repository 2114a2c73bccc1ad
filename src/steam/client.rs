//! HTTP client for the public Steam store endpoints.

use super::details::{parse_app_details, AppDetails, AppDetailsFetcher};
use super::error::SteamError;
use super::listing::ListingPageSource;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client};
use std::time::Duration;
use tracing::debug;

/// Client for the Steam store.
///
/// Listing pages are requested with a browser user agent, since the search
/// page serves reduced markup to unknown clients.
#[derive(Clone)]
pub struct SteamStoreClient {
    client: Client,
    store_base_url: String,
    user_agent: String,
}

impl SteamStoreClient {
    /// Create a new SteamStoreClient.
    ///
    /// # Arguments
    /// * `store_base_url` - Base URL of the store (e.g., "https://store.steampowered.com")
    /// * `user_agent` - User agent sent with listing requests
    /// * `timeout` - Optional per-request timeout, none means wait forever
    pub fn new(
        store_base_url: String,
        user_agent: String,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            store_base_url: store_base_url.trim_end_matches('/').to_string(),
            user_agent,
        })
    }
}

#[async_trait]
impl ListingPageSource for SteamStoreClient {
    async fn fetch_listing_page(&self, start: usize, count: usize) -> Result<String, SteamError> {
        let url = format!(
            "{}/search/?filter=globaltopsellers&category1=998&start={}&count={}",
            self.store_base_url, start, count
        );
        debug!("Fetching top sellers page: {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SteamError::Http {
                status: response.status().as_u16(),
                context: format!("top sellers page at {}", start),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl AppDetailsFetcher for SteamStoreClient {
    async fn fetch_app_details(&self, app_id: u32) -> Result<AppDetails, SteamError> {
        let url = format!("{}/api/appdetails?appids={}", self.store_base_url, app_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SteamError::Http {
                status: response.status().as_u16(),
                context: format!("app details of {}", app_id),
            });
        }

        let body = response.text().await?;
        parse_app_details(app_id, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
        Router,
    };
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn search(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        if headers.get("user-agent").and_then(|v| v.to_str().ok()) != Some("TestAgent/1.0") {
            return (StatusCode::FORBIDDEN, String::new());
        }
        match params.get("start").map(String::as_str) {
            Some("0") => (
                StatusCode::OK,
                r#"<a data-ds-appid="10"></a><a data-ds-appid="20"></a>"#.to_string(),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
        }
    }

    async fn appdetails(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        match params.get("appids").map(String::as_str) {
            Some("10") => (
                StatusCode::OK,
                r#"{"10":{"success":true,"data":{"name":"Ten"}}}"#.to_string(),
            ),
            Some("11") => (StatusCode::OK, r#"{"11":{"success":false}}"#.to_string()),
            _ => (StatusCode::BAD_GATEWAY, String::new()),
        }
    }

    async fn spawn_fake_store() -> String {
        let app = Router::new()
            .route("/search/", get(search))
            .route("/api/appdetails", get(appdetails));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    async fn make_client() -> SteamStoreClient {
        let base_url = spawn_fake_store().await;
        SteamStoreClient::new(
            base_url,
            "TestAgent/1.0".to_string(),
            Some(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_listing_page_with_user_agent() {
        let client = make_client().await;

        let html = client.fetch_listing_page(0, 50).await.unwrap();
        assert!(html.contains(r#"data-ds-appid="20""#));
    }

    #[tokio::test]
    async fn listing_page_error_status_is_http_error() {
        let client = make_client().await;

        let err = client.fetch_listing_page(50, 50).await.unwrap_err();
        assert!(matches!(err, SteamError::Http { status: 500, .. }));
    }

    #[tokio::test]
    async fn fetches_and_decodes_app_details() {
        let client = make_client().await;

        let details = client.fetch_app_details(10).await.unwrap();
        assert_eq!(details.name, "Ten");

        let err = client.fetch_app_details(11).await.unwrap_err();
        assert!(err.is_not_found());

        let err = client.fetch_app_details(12).await.unwrap_err();
        assert!(matches!(err, SteamError::Http { status: 502, .. }));
    }
}
