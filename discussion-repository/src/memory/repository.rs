use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use discussion_shared::{
    Comment, Page, Protocol, ProtocolSuggestion, Reply, Tag, Thread, ThreadSuggestion, ViewerVote,
    Votable, VotableId, VoteCounters, VoteDirection, VotesDelta,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::errors::RepositoryError;
use crate::interfaces::{DiscussionRepository, SearchRepository, VotesRepository};
use crate::memory::Fixture;
use crate::types::{VoteAck, VoteSubmission};

/// In-memory store of record.
///
/// Holds one live vote per `(user, target)` and keeps every entity's counters
/// in step with the votes it has applied. All listings are served from the
/// viewpoint of a single viewer.
pub struct MemoryRepository {
    viewer_id: u64,
    embedded_replies: Option<usize>,
    state: RwLock<MemoryState>,
}

struct MemoryState {
    fixture: Fixture,
    counters: HashMap<VotableId, VoteCounters>,
    votes: HashMap<(u64, VotableId), VoteDirection>,
    rejected: HashSet<VotableId>,
}

impl MemoryRepository {
    /// Create a repository serving `fixture` to the user `viewer_id`.
    pub fn new(fixture: Fixture, viewer_id: u64) -> Self {
        let mut counters = HashMap::new();
        for thread in &fixture.threads {
            counters.insert(thread.votable_id(), thread.counters());
        }
        for review in &fixture.reviews {
            counters.insert(review.votable_id(), review.counters());
        }
        for comment in &fixture.comments {
            counters.insert(comment.votable_id(), comment.counters());
            for reply in &comment.replies {
                counters.insert(reply.votable_id(), reply.counters());
                for nested in &reply.nested_replies {
                    counters.insert(nested.votable_id(), nested.counters());
                }
            }
        }

        let votes = fixture
            .votes
            .iter()
            .map(|vote| ((vote.user_id, vote.votable), vote.direction))
            .collect();

        Self {
            viewer_id,
            embedded_replies: None,
            state: RwLock::new(MemoryState {
                fixture,
                counters,
                votes,
                rejected: HashSet::new(),
            }),
        }
    }

    /// Embed at most `limit` replies (and nested replies) in listings, the
    /// rest being reachable through the reply listings.
    pub fn with_embedded_replies(mut self, limit: usize) -> Self {
        self.embedded_replies = Some(limit);
        self
    }

    /// Refuse every subsequent vote on `target`.
    pub async fn reject_votes_on(&self, target: VotableId) {
        self.state.write().await.rejected.insert(target);
    }

    /// Current counters for `target`, if it exists.
    pub async fn counters(&self, target: VotableId) -> Option<VoteCounters> {
        self.state.read().await.counters.get(&target).copied()
    }

    /// Counters and the viewer's vote for `target`, as a listing would report
    /// them.
    pub async fn viewer_state(&self, target: VotableId) -> Option<(VoteCounters, ViewerVote)> {
        let state = self.state.read().await;
        let counters = state.counters.get(&target).copied()?;
        let direction = state.votes.get(&(self.viewer_id, target)).copied();
        Some((counters, ViewerVote::from_direction(direction)))
    }

    /// The live vote of `user_id` on `target`, if any.
    pub async fn vote_of(&self, user_id: u64, target: VotableId) -> Option<VoteDirection> {
        self.state.read().await.votes.get(&(user_id, target)).copied()
    }

    fn truncate(&self, replies: &mut Vec<Reply>) {
        if let Some(limit) = self.embedded_replies {
            replies.truncate(limit);
        }
    }

    fn present_reply(&self, state: &MemoryState, mut reply: Reply) -> Reply {
        (reply.counters, reply.viewer_vote) = state.current(&reply, self.viewer_id);
        self.truncate(&mut reply.nested_replies);
        reply.nested_replies = reply
            .nested_replies
            .into_iter()
            .map(|mut nested| {
                (nested.counters, nested.viewer_vote) = state.current(&nested, self.viewer_id);
                nested
            })
            .collect();
        reply
    }

    fn present_comment(&self, state: &MemoryState, mut comment: Comment) -> Comment {
        (comment.counters, comment.viewer_vote) = state.current(&comment, self.viewer_id);
        self.truncate(&mut comment.replies);
        comment.replies = comment
            .replies
            .into_iter()
            .map(|reply| self.present_reply(state, reply))
            .collect();
        comment
    }
}

impl MemoryState {
    /// Live counters and the viewer's vote for `votable`.
    fn current(&self, votable: &impl Votable, viewer_id: u64) -> (VoteCounters, ViewerVote) {
        let target = votable.votable_id();
        let counters = self
            .counters
            .get(&target)
            .copied()
            .unwrap_or_else(|| votable.counters());
        let direction = self.votes.get(&(viewer_id, target)).copied();
        (counters, ViewerVote::from_direction(direction))
    }

    fn find_reply(&self, reply_id: u64) -> Option<&Reply> {
        self.fixture
            .comments
            .iter()
            .flat_map(|comment| comment.replies.iter())
            .find(|reply| reply.id == reply_id)
    }
}

fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total = items.len() as u64;
    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let items = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();
    Page::new(items, page, per_page, total)
}

fn normalized(text: &str) -> Result<String, RepositoryError> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return Err(RepositoryError::rejected("Search text cannot be empty"));
    }
    Ok(text)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn protocol_matches(protocol: &Protocol, needle: &str) -> bool {
    contains(&protocol.title, needle)
        || contains(&protocol.description, needle)
        || protocol.tags.iter().any(|tag| contains(&tag.name, needle))
}

fn thread_matches(thread: &Thread, needle: &str) -> bool {
    contains(&thread.title, needle) || contains(&thread.body, needle)
}

#[async_trait]
impl VotesRepository for MemoryRepository {
    async fn submit_vote(&self, submission: &VoteSubmission) -> Result<VoteAck, RepositoryError> {
        let mut state = self.state.write().await;
        let target = submission.target;

        if state.rejected.contains(&target) {
            warn!(votable = %target, "Refusing vote on rejected target");
            return Err(RepositoryError::rejected(format!(
                "Votes on {} are not accepted",
                target
            )));
        }

        let current = state
            .counters
            .get(&target)
            .copied()
            .ok_or_else(|| RepositoryError::not_found(target.to_string()))?;

        let key = (self.viewer_id, target);
        let previous = state.votes.get(&key).copied();
        let next = submission.value.direction();
        let counters = current
            .apply(VotesDelta::between(previous, next))
            .ok_or_else(|| {
                RepositoryError::invalid_data(format!("Counters for {} out of range", target))
            })?;

        state.counters.insert(target, counters);
        match next {
            Some(direction) => {
                state.votes.insert(key, direction);
            }
            None => {
                state.votes.remove(&key);
            }
        }

        debug!(
            votable = %target,
            user_id = self.viewer_id,
            value = ?submission.value,
            upvotes = counters.upvotes,
            downvotes = counters.downvotes,
            "Vote applied"
        );

        Ok(VoteAck {
            target,
            counters,
            viewer_vote: ViewerVote::from_direction(next),
        })
    }
}

#[async_trait]
impl DiscussionRepository for MemoryRepository {
    async fn list_comments(
        &self,
        thread_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Comment>, RepositoryError> {
        let state = self.state.read().await;
        if !state.fixture.threads.iter().any(|thread| thread.id == thread_id) {
            return Err(RepositoryError::not_found(format!("thread {}", thread_id)));
        }

        let comments = state
            .fixture
            .comments
            .iter()
            .filter(|comment| comment.thread_id == thread_id)
            .cloned()
            .map(|comment| self.present_comment(&state, comment))
            .collect();

        debug!(thread_id, page, per_page, "Listing comments");
        Ok(paginate(comments, page, per_page))
    }

    async fn list_replies(
        &self,
        comment_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Reply>, RepositoryError> {
        let state = self.state.read().await;
        let comment = state
            .fixture
            .comments
            .iter()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| RepositoryError::not_found(format!("comment {}", comment_id)))?;

        let replies = comment
            .replies
            .iter()
            .cloned()
            .map(|reply| self.present_reply(&state, reply))
            .collect();

        debug!(comment_id, page, per_page, "Listing replies");
        Ok(paginate(replies, page, per_page))
    }

    async fn list_nested_replies(
        &self,
        reply_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Reply>, RepositoryError> {
        let state = self.state.read().await;
        let reply = state
            .find_reply(reply_id)
            .ok_or_else(|| RepositoryError::not_found(format!("reply {}", reply_id)))?;

        let nested = reply
            .nested_replies
            .iter()
            .cloned()
            .map(|nested| self.present_reply(&state, nested))
            .collect();

        debug!(reply_id, page, per_page, "Listing nested replies");
        Ok(paginate(nested, page, per_page))
    }
}

#[async_trait]
impl SearchRepository for MemoryRepository {
    async fn search_protocols(
        &self,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Protocol>, RepositoryError> {
        let needle = normalized(text)?;
        let state = self.state.read().await;
        let protocols = state
            .fixture
            .protocols
            .iter()
            .filter(|protocol| protocol_matches(protocol, &needle))
            .cloned()
            .collect();
        Ok(paginate(protocols, page, per_page))
    }

    async fn search_threads(
        &self,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Thread>, RepositoryError> {
        let needle = normalized(text)?;
        let state = self.state.read().await;
        let threads = state
            .fixture
            .threads
            .iter()
            .filter(|thread| thread_matches(thread, &needle))
            .cloned()
            .map(|mut thread| {
                (thread.counters, thread.viewer_vote) = state.current(&thread, self.viewer_id);
                thread
            })
            .collect();
        Ok(paginate(threads, page, per_page))
    }

    async fn suggest_protocols(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<ProtocolSuggestion>, RepositoryError> {
        let needle = normalized(text)?;
        let state = self.state.read().await;
        Ok(state
            .fixture
            .protocols
            .iter()
            .filter(|protocol| contains(&protocol.title, &needle))
            .take(limit)
            .map(|protocol| ProtocolSuggestion {
                id: protocol.id,
                title: protocol.title.clone(),
            })
            .collect())
    }

    async fn suggest_threads(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<ThreadSuggestion>, RepositoryError> {
        let needle = normalized(text)?;
        let state = self.state.read().await;
        Ok(state
            .fixture
            .threads
            .iter()
            .filter(|thread| contains(&thread.title, &needle))
            .take(limit)
            .map(|thread| ThreadSuggestion {
                id: thread.id,
                protocol_id: thread.protocol_id,
                title: thread.title.clone(),
            })
            .collect())
    }

    async fn suggest_tags(&self, text: &str, limit: usize) -> Result<Vec<Tag>, RepositoryError> {
        let needle = normalized(text)?;
        let state = self.state.read().await;
        Ok(state
            .fixture
            .tags
            .iter()
            .filter(|tag| contains(&tag.name, &needle))
            .take(limit)
            .cloned()
            .collect())
    }
}
