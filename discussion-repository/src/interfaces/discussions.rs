//! This module defines the `DiscussionRepository` trait, which lists the
//! comments, replies, and nested replies under a thread.
use discussion_shared::{Comment, Page, Reply};

use crate::errors::RepositoryError;

/// Paginated listing of the discussion hierarchy under a thread.
///
/// Comments are returned in server order with a first batch of replies
/// embedded; the reply listings serve "load more" requests.
#[async_trait::async_trait]
pub trait DiscussionRepository: Send + Sync {
    /// Lists one page of comments on a thread.
    ///
    /// # Arguments
    ///
    /// * `thread_id` - The thread whose comments to list
    /// * `page` - 1-based page number
    /// * `per_page` - Page size
    async fn list_comments(
        &self,
        thread_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Comment>, RepositoryError>;

    /// Lists one page of replies to a comment.
    async fn list_replies(
        &self,
        comment_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Reply>, RepositoryError>;

    /// Lists one page of nested replies under a reply.
    async fn list_nested_replies(
        &self,
        reply_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Reply>, RepositoryError>;
}
