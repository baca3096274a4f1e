//! Integration tests for the search service with a mock search collaborator.

use std::sync::{Arc, Mutex};

use discussion_core::{SearchService, ServiceError};
use discussion_repository::{RepositoryError, SearchRepository};
use discussion_shared::{Page, Protocol, ProtocolSuggestion, SearchQuery, Tag, Thread, ThreadSuggestion};

#[derive(Default)]
struct MockSearch {
    calls: Mutex<Vec<String>>,
    protocols_total: u64,
    threads_total: u64,
    fail_threads: bool,
}

impl MockSearch {
    fn new(protocols_total: u64, threads_total: u64) -> Self {
        Self {
            protocols_total,
            threads_total,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl SearchRepository for MockSearch {
    async fn search_protocols(
        &self,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Protocol>, RepositoryError> {
        self.record(format!("protocols:{}:{}:{}", text, page, per_page));
        Ok(Page::new(Vec::new(), page, per_page, self.protocols_total))
    }

    async fn search_threads(
        &self,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Thread>, RepositoryError> {
        self.record(format!("threads:{}:{}:{}", text, page, per_page));
        if self.fail_threads {
            return Err(RepositoryError::unavailable("threads index down"));
        }
        Ok(Page::new(Vec::new(), page, per_page, self.threads_total))
    }

    async fn suggest_protocols(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<ProtocolSuggestion>, RepositoryError> {
        self.record(format!("suggest_protocols:{}:{}", text, limit));
        Ok((0..limit as u64)
            .map(|id| ProtocolSuggestion {
                id,
                title: format!("{} {}", text, id),
            })
            .collect())
    }

    async fn suggest_threads(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<ThreadSuggestion>, RepositoryError> {
        self.record(format!("suggest_threads:{}:{}", text, limit));
        Ok(Vec::new())
    }

    async fn suggest_tags(&self, text: &str, limit: usize) -> Result<Vec<Tag>, RepositoryError> {
        self.record(format!("suggest_tags:{}:{}", text, limit));
        Ok(vec![Tag {
            id: 1,
            name: text.to_string(),
        }])
    }
}

#[tokio::test]
async fn test_search_merges_totals() {
    let repository = Arc::new(MockSearch::new(12, 7));
    let service = SearchService::new(repository.clone(), 5);

    let result = service.search(&SearchQuery::new("protocol")).await.unwrap();

    assert_eq!(result.grand_total, 19);
    assert_eq!(result.protocols.total_pages, 2);
    assert_eq!(result.threads.total_pages, 1);
    let mut calls = repository.calls();
    calls.sort();
    assert_eq!(calls, vec!["protocols:protocol:1:10", "threads:protocol:1:10"]);
}

#[tokio::test]
async fn test_blank_query_skips_upstream() {
    let repository = Arc::new(MockSearch::new(12, 7));
    let service = SearchService::new(repository.clone(), 5);

    let result = service.search(&SearchQuery::new("  \t")).await.unwrap();
    let suggestions = service.suggest("   ").await.unwrap();

    assert!(result.is_empty());
    assert!(suggestions.is_empty());
    assert!(repository.calls().is_empty());
}

#[tokio::test]
async fn test_advancing_one_cursor_leaves_the_other() {
    let repository = Arc::new(MockSearch::new(25, 25));
    let service = SearchService::new(repository.clone(), 5);

    let first = service.search(&SearchQuery::new("pcr")).await.unwrap();
    let advanced = service.next_threads_page(first.clone()).await.unwrap();

    assert_eq!(advanced.threads.page, 2);
    assert_eq!(advanced.protocols, first.protocols);
    assert_eq!(advanced.grand_total, first.grand_total);
    assert_eq!(repository.calls().last().map(String::as_str), Some("threads:pcr:2:10"));

    let advanced = service.next_protocols_page(advanced).await.unwrap();
    assert_eq!(advanced.protocols.page, 2);
    assert_eq!(advanced.threads.page, 2);
}

#[tokio::test]
async fn test_last_page_does_not_fetch() {
    let repository = Arc::new(MockSearch::new(3, 3));
    let service = SearchService::new(repository.clone(), 5);

    let first = service.search(&SearchQuery::new("pcr")).await.unwrap();
    let same = service.next_threads_page(first.clone()).await.unwrap();

    assert_eq!(same, first);
    assert_eq!(repository.calls().len(), 2);
}

#[tokio::test]
async fn test_suggest_passes_cap_and_trims() {
    let repository = Arc::new(MockSearch::new(0, 0));
    let service = SearchService::new(repository.clone(), 3);

    let suggestions = service.suggest(" elisa ").await.unwrap();

    assert_eq!(suggestions.protocols.len(), 3);
    assert_eq!(suggestions.tags[0].name, "elisa");
    assert!(repository.calls().contains(&"suggest_tags:elisa:3".to_string()));
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let repository = Arc::new(MockSearch {
        fail_threads: true,
        ..MockSearch::new(1, 1)
    });
    let service = SearchService::new(repository, 5);

    let err = service.search(&SearchQuery::new("pcr")).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}
