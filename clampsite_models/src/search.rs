use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A navigable page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display text
    pub title: String,
    /// Navigation target, unique within a catalog
    pub path: String,
    /// Auxiliary terms that should also find this page
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The fixed, ordered list of pages the search runs over. The order of the
/// entries is significant, it is used for browsing and to break ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog(Vec<CatalogEntry>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate catalog path: {0}")]
    DuplicatePath(String),
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut paths = HashSet::with_capacity(entries.len());
        if let Some(duplicate) = entries.iter().find(|entry| !paths.insert(&entry.path)) {
            return Err(CatalogError::DuplicatePath(duplicate.path.clone()));
        }

        Ok(Self(entries))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
