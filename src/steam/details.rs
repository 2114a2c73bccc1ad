//! App details records as served by the Steam `appdetails` endpoint.

use super::error::SteamError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Raw app details. Only the fields the catalog keeps are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct AppDetails {
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub header_image: String,
    pub genres: Option<Vec<Genre>>,
    pub screenshots: Option<Vec<Screenshot>>,
    pub platforms: Option<BTreeMap<String, bool>>,
    pub release_date: Option<ReleaseDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Screenshot {
    pub path_full: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,
    pub date: Option<String>,
}

#[derive(Deserialize)]
struct AppDetailsEnvelope {
    success: bool,
    data: Option<AppDetails>,
}

/// Looks up the details of a single app.
#[async_trait]
pub trait AppDetailsFetcher: Send + Sync {
    async fn fetch_app_details(&self, app_id: u32) -> Result<AppDetails, SteamError>;
}

/// Decodes an `appdetails` body, which is keyed by the app id as a string.
///
/// A missing entry, `success: false` or a `null` body mean the app is unknown.
pub fn parse_app_details(app_id: u32, body: &str) -> Result<AppDetails, SteamError> {
    let mut entries: Option<HashMap<String, AppDetailsEnvelope>> =
        serde_json::from_str(body).map_err(|e| SteamError::Decode(e.to_string()))?;

    match entries
        .as_mut()
        .and_then(|entries| entries.remove(&app_id.to_string()))
    {
        Some(AppDetailsEnvelope {
            success: true,
            data: Some(details),
        }) => Ok(details),
        _ => Err(SteamError::NotFound(app_id)),
    }
}
