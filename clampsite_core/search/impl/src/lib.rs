use std::sync::Arc;

use clampsite_core_search_contracts::SearchService;
use clampsite_di::Build;
use clampsite_models::search::{Catalog, CatalogEntry};

pub mod palette;

const TITLE_WEIGHT: u8 = 3;
const KEYWORD_WEIGHT: u8 = 2;
const PATH_WEIGHT: u8 = 1;

#[derive(Debug, Clone, Build)]
pub struct SearchFeatureServiceImpl {
    config: SearchFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct SearchFeatureConfig {
    pub catalog: Arc<Catalog>,
    /// Number of entries listed for a blank query
    pub empty_query_limit: usize,
    /// Maximum number of ranked entries
    pub result_limit: usize,
}

impl SearchService for SearchFeatureServiceImpl {
    fn search(&self, query: &str) -> Vec<CatalogEntry> {
        let query = normalize(query);
        if query.is_empty() {
            return self
                .config
                .catalog
                .iter()
                .take(self.config.empty_query_limit)
                .cloned()
                .collect();
        }

        let mut ranked = self
            .config
            .catalog
            .iter()
            .map(|entry| (score(entry, &query), entry))
            .filter(|&(score, _)| score > 0)
            .collect::<Vec<_>>();

        // stable, equal scores keep catalog order
        ranked.sort_by(|(a, _), (b, _)| b.cmp(a));

        ranked
            .into_iter()
            .take(self.config.result_limit)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Weighted substring match of an already normalized, non-empty query.
fn score(entry: &CatalogEntry, query: &str) -> u8 {
    let mut score = 0;
    if normalize(&entry.title).contains(query) {
        score += TITLE_WEIGHT;
    }
    if entry
        .keywords
        .iter()
        .any(|keyword| normalize(keyword).contains(query))
    {
        score += KEYWORD_WEIGHT;
    }
    if normalize(&entry.path).contains(query) {
        score += PATH_WEIGHT;
    }
    score
}
