//! Steam store integration: top sellers scraping and app details lookups.

mod client;
mod details;
mod error;
mod listing;

pub use client::SteamStoreClient;
pub use details::{
    parse_app_details, AppDetails, AppDetailsFetcher, Genre, ReleaseDate, Screenshot,
};
pub use error::SteamError;
pub use listing::{
    extract_app_ids, IdentifierScraper, ListingPageSource, TopSellersScraper, LISTING_PAGE_SIZE,
};
