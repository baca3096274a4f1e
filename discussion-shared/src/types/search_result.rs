//! Search and suggestion response types.

use serde::{Deserialize, Serialize};

use crate::types::{Page, Protocol, Tag, Thread};

/// Combined search response over protocols and threads.
///
/// Each sub-collection keeps its own pagination. `grand_total` is the sum of
/// both sub-collection totals for the query, not a count of the items on the
/// pages currently held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The query text the result was produced for.
    pub query: String,

    /// Current page of matching protocols.
    pub protocols: Page<Protocol>,

    /// Current page of matching threads.
    pub threads: Page<Thread>,

    /// Total matches across both sub-collections.
    pub grand_total: u64,
}

impl SearchResult {
    /// Create an empty search result.
    pub fn empty(query: impl Into<String>, per_page: u32) -> Self {
        Self {
            query: query.into(),
            protocols: Page::empty(per_page),
            threads: Page::empty(per_page),
            grand_total: 0,
        }
    }

    /// Returns true if neither sub-collection matched anything.
    pub fn is_empty(&self) -> bool {
        self.grand_total == 0
    }

    /// Replace the protocols cursor, leaving the threads page untouched.
    pub fn with_protocols_page(mut self, protocols: Page<Protocol>) -> Self {
        self.protocols = protocols;
        self.grand_total = self.protocols.total + self.threads.total;
        self
    }

    /// Replace the threads cursor, leaving the protocols page untouched.
    pub fn with_threads_page(mut self, threads: Page<Thread>) -> Self {
        self.threads = threads;
        self.grand_total = self.protocols.total + self.threads.total;
        self
    }
}

/// Lightweight protocol entry for type-ahead suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtocolSuggestion {
    pub id: u64,
    pub title: String,
}

/// Lightweight thread entry for type-ahead suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreadSuggestion {
    pub id: u64,
    pub protocol_id: u64,
    pub title: String,
}

/// Unpaginated, unranked type-ahead suggestions.
///
/// Each list is already capped upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestions {
    pub protocols: Vec<ProtocolSuggestion>,
    pub threads: Vec<ThreadSuggestion>,
    pub tags: Vec<Tag>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty() && self.threads.is_empty() && self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.protocols.len() + self.threads.len() + self.tags.len()
    }
}
