//! Search service over a `SearchRepository`.
use std::sync::Arc;

use discussion_repository::SearchRepository;
use discussion_shared::{SearchQuery, SearchResult, Suggestions};
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::search::{merge_search, merge_suggestions};

/// Runs searches and type-ahead suggestions against the search collaborator.
///
/// Blank queries never reach the repository.
pub struct SearchService {
    repository: Arc<dyn SearchRepository>,
    suggestions_limit: usize,
}

impl SearchService {
    /// Creates a new `SearchService` instance.
    ///
    /// # Arguments
    ///
    /// * `repository` - The `SearchRepository` results are fetched from
    /// * `suggestions_limit` - Cap passed upstream for each suggestion list
    pub fn new(repository: Arc<dyn SearchRepository>, suggestions_limit: usize) -> Self {
        Self {
            repository,
            suggestions_limit,
        }
    }

    /// Fetch both sub-collections concurrently and merge them.
    #[instrument(skip_all, fields(query = %query.text()))]
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, ServiceError> {
        if query.is_blank() {
            debug!("Blank query, skipping upstream");
            return Ok(SearchResult::empty(query.text(), query.per_page));
        }

        let text = query.text();
        let (protocols, threads) = tokio::try_join!(
            self.repository
                .search_protocols(text, query.protocols_page, query.per_page),
            self.repository
                .search_threads(text, query.threads_page, query.per_page),
        )?;

        let result = merge_search(text, protocols, threads);
        debug!(grand_total = result.grand_total, "Search merged");
        Ok(result)
    }

    /// Advance the threads cursor. The protocols page is left untouched.
    ///
    /// Returns `current` unchanged when there is no further page.
    pub async fn next_threads_page(&self, current: SearchResult) -> Result<SearchResult, ServiceError> {
        let Some(page) = current.threads.next_page() else {
            return Ok(current);
        };
        let threads = self
            .repository
            .search_threads(&current.query, page, current.threads.per_page)
            .await?;
        Ok(current.with_threads_page(threads))
    }

    /// Advance the protocols cursor. The threads page is left untouched.
    pub async fn next_protocols_page(&self, current: SearchResult) -> Result<SearchResult, ServiceError> {
        let Some(page) = current.protocols.next_page() else {
            return Ok(current);
        };
        let protocols = self
            .repository
            .search_protocols(&current.query, page, current.protocols.per_page)
            .await?;
        Ok(current.with_protocols_page(protocols))
    }

    /// Type-ahead suggestions for `text`, each list capped upstream.
    #[instrument(skip(self))]
    pub async fn suggest(&self, text: &str) -> Result<Suggestions, ServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Suggestions::default());
        }

        let limit = self.suggestions_limit;
        let (protocols, threads, tags) = tokio::try_join!(
            self.repository.suggest_protocols(text, limit),
            self.repository.suggest_threads(text, limit),
            self.repository.suggest_tags(text, limit),
        )?;

        Ok(merge_suggestions(protocols, threads, tags))
    }
}
