use crate::catalog_store::CatalogEntry;
use crate::steam::AppDetails;

/// Maps a raw app details record to the stored catalog shape.
///
/// Missing genres, screenshots and platforms become empty. A missing
/// `release_date` object or date string is stored as `None`.
pub fn normalize_app_details(app_id: u32, details: AppDetails) -> CatalogEntry {
    CatalogEntry {
        steam_id: app_id,
        name: details.name,
        description: details.short_description,
        header_image: details.header_image,
        genres: details
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|genre| genre.description)
            .collect(),
        screenshots: details
            .screenshots
            .unwrap_or_default()
            .into_iter()
            .map(|shot| shot.path_full)
            .collect(),
        platforms: details.platforms.unwrap_or_default(),
        release_date: details
            .release_date
            .and_then(|release| release.date)
            .filter(|date| !date.trim().is_empty()),
    }
}
