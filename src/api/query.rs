//! Query-string parameters shared by list endpoints

use crate::neo4j::NameFilter;
use serde::Deserialize;

/// `?searchTerm=` filter accepted by `GET /api/tags` and `GET /api/folders`
#[derive(Debug, Deserialize, Default, Clone)]
pub struct NameSearchQuery {
    /// Case-insensitive substring to look for in `name`
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl NameSearchQuery {
    /// Check if a non-empty search term was given
    pub fn is_set(&self) -> bool {
        self.search_term.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Convert to a store filter
    pub fn to_filter(&self) -> NameFilter {
        NameFilter::search(self.search_term.as_deref())
    }
}
