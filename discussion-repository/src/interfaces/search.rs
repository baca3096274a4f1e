//! This module defines the `SearchRepository` trait, which fronts the
//! protocol and thread listing endpoints used for search and type-ahead.
use discussion_shared::{Page, Protocol, ProtocolSuggestion, Tag, Thread, ThreadSuggestion};

use crate::errors::RepositoryError;

/// Upstream search over protocols and threads.
///
/// Relevance ranking happens behind this seam. Callers must not pass blank
/// query text: the listing endpoints are not guaranteed to accept it.
#[async_trait::async_trait]
pub trait SearchRepository: Send + Sync {
    /// Fetches one page of protocols matching `text`.
    async fn search_protocols(
        &self,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Protocol>, RepositoryError>;

    /// Fetches one page of threads matching `text`.
    async fn search_threads(
        &self,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Thread>, RepositoryError>;

    /// Fetches at most `limit` protocol suggestions for `text`.
    async fn suggest_protocols(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<ProtocolSuggestion>, RepositoryError>;

    /// Fetches at most `limit` thread suggestions for `text`.
    async fn suggest_threads(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<ThreadSuggestion>, RepositoryError>;

    /// Fetches at most `limit` tag suggestions for `text`.
    async fn suggest_tags(&self, text: &str, limit: usize) -> Result<Vec<Tag>, RepositoryError>;
}
