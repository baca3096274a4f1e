use discussion_shared::{
    Page, Protocol, ProtocolSuggestion, SearchResult, Suggestions, Tag, Thread, ThreadSuggestion,
};

/// Merges two independently paginated sub-results into one `SearchResult`.
///
/// `grand_total` is the sum of both sub-collection totals. The pages keep
/// their own cursors and are not touched.
///
/// # Arguments
///
/// * `query` - The query text the pages were fetched for
/// * `protocols` - The current page of matching protocols
/// * `threads` - The current page of matching threads
pub fn merge_search(query: &str, protocols: Page<Protocol>, threads: Page<Thread>) -> SearchResult {
    let grand_total = protocols.total + threads.total;
    SearchResult {
        query: query.to_string(),
        protocols,
        threads,
        grand_total,
    }
}

/// Combines type-ahead lists as given. Capping is the caller's job.
pub fn merge_suggestions(
    protocols: Vec<ProtocolSuggestion>,
    threads: Vec<ThreadSuggestion>,
    tags: Vec<Tag>,
) -> Suggestions {
    Suggestions {
        protocols,
        threads,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grand_total_is_sum_of_totals() {
        let result = merge_search(
            "protocol",
            Page::new(Vec::new(), 1, 10, 12),
            Page::new(Vec::new(), 1, 10, 7),
        );
        assert_eq!(result.grand_total, 19);
        assert_eq!(result.query, "protocol");
    }

    #[test]
    fn test_grand_total_ignores_current_page() {
        let first = merge_search("x", Page::new(Vec::new(), 1, 5, 12), Page::new(Vec::new(), 1, 5, 7));
        let later = first.clone().with_threads_page(Page::new(Vec::new(), 2, 5, 7));
        let latest = later.clone().with_protocols_page(Page::new(Vec::new(), 3, 5, 12));

        assert_eq!(later.grand_total, 19);
        assert_eq!(latest.grand_total, 19);
        assert_eq!(later.protocols, first.protocols);
        assert_eq!(latest.threads, later.threads);
    }

    #[test]
    fn test_suggestions_are_not_truncated() {
        let tags: Vec<Tag> = (0..50)
            .map(|id| Tag {
                id,
                name: format!("tag-{}", id),
            })
            .collect();
        let suggestions = merge_suggestions(Vec::new(), Vec::new(), tags.clone());
        assert_eq!(suggestions.tags, tags);
        assert_eq!(suggestions.len(), 50);
    }
}
