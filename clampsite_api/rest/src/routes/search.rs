use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing, Json, Router,
};
use clampsite_core_search_contracts::SearchService;
use tracing::debug;

use crate::models::search::{ApiSearchQuery, ApiSearchResponse};

pub const SEARCH_ROUTE: &str = "/api/search";

pub fn router(service: Arc<impl SearchService>) -> Router<()> {
    Router::new()
        .route(SEARCH_ROUTE, routing::get(search))
        .with_state(service)
}

async fn search(
    service: State<Arc<impl SearchService>>,
    query: Result<Query<ApiSearchQuery>, QueryRejection>,
) -> Json<ApiSearchResponse> {
    let ApiSearchQuery { q } = query
        .map(|Query(query)| query)
        .unwrap_or_else(|rejection| {
            debug!("undecodable search query, browsing instead: {rejection}");
            ApiSearchQuery::default()
        });
    let results = service.search(&q);
    debug!(query = %q, results = results.len(), "search");

    Json(ApiSearchResponse {
        results: results.into_iter().map(Into::into).collect(),
    })
}
