use clampsite_models::search::CatalogEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ApiSearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct ApiSearchResponse {
    pub results: Vec<ApiSearchResult>,
}

#[derive(Serialize)]
pub struct ApiSearchResult {
    pub title: String,
    pub path: String,
}

impl From<CatalogEntry> for ApiSearchResult {
    fn from(value: CatalogEntry) -> Self {
        Self {
            title: value.title,
            path: value.path,
        }
    }
}
