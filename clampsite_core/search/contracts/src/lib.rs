use clampsite_models::search::CatalogEntry;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SearchService: Send + Sync + 'static {
    /// Rank the catalog for a raw query.
    ///
    /// A blank query returns the first entries of the catalog in their
    /// original order. Otherwise only matching entries are returned, best
    /// match first, ties in catalog order.
    fn search(&self, query: &str) -> Vec<CatalogEntry>;
}

#[cfg(feature = "mock")]
impl MockSearchService {
    pub fn with_search(mut self, query: String, result: Vec<CatalogEntry>) -> Self {
        self.expect_search()
            .once()
            .with(mockall::predicate::eq(query))
            .return_once(move |_| result);
        self
    }
}
