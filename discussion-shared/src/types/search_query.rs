//! Search query types.
//!
//! This module defines the query structure used to search protocols and
//! threads together.

use serde::{Deserialize, Serialize};

/// Default number of items per sub-collection page.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound on items per sub-collection page.
pub const MAX_PER_PAGE: u32 = 100;

/// Search query parameters.
///
/// Protocols and threads paginate independently, so the query carries one
/// page cursor for each.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    /// The search query string.
    pub query: String,

    /// Page of protocol results to fetch (1-based).
    #[serde(default = "first_page")]
    pub protocols_page: u32,

    /// Page of thread results to fetch (1-based).
    #[serde(default = "first_page")]
    pub threads_page: u32,

    /// Items per page for each sub-collection.
    /// Default is 10, maximum is 100.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn first_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl SearchQuery {
    /// Create a query for the first page of both sub-collections.
    ///
    /// # Example
    ///
    /// ```
    /// use discussion_shared::SearchQuery;
    ///
    /// let query = SearchQuery::new("pcr");
    /// assert_eq!(query.protocols_page, 1);
    /// assert_eq!(query.threads_page, 1);
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            protocols_page: first_page(),
            threads_page: first_page(),
            per_page: default_per_page(),
        }
    }

    /// Set the page size, clamped to `1..=100`.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn with_protocols_page(mut self, page: u32) -> Self {
        self.protocols_page = page.max(1);
        self
    }

    pub fn with_threads_page(mut self, page: u32) -> Self {
        self.threads_page = page.max(1);
        self
    }

    /// The query text without surrounding whitespace.
    pub fn text(&self) -> &str {
        self.query.trim()
    }

    /// True for an empty or whitespace-only query.
    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }
}
