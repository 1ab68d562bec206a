use clampsite_config::Config;
use clampsite_core_search_contracts::SearchService;
use clampsite_di::Provides;

use crate::environment::{types::SearchFeature, Provider};

/// Print the ranked catalog entries for `query`, one per line.
pub fn search(config: Config, query: &str) -> anyhow::Result<()> {
    let mut provider = Provider::new(&config)?;
    let search: SearchFeature = provider.provide();

    let results = search.search(query);
    if results.is_empty() {
        println!("No matches");
    }
    for entry in results {
        println!("{}\t{}", entry.title, entry.path);
    }

    Ok(())
}
