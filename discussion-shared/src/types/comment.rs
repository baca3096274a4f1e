//! Comment and reply types.
//!
//! The discussion hierarchy under a thread is bounded: comment → reply →
//! nested reply. Nested replies do not recurse further.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{VotableId, Votable, VoteCounters, ViewerVote};

/// The public profile of a content author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Non-owning back-reference used to render a "replying to X" line.
///
/// It never participates in building the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyingTo {
    pub id: u64,
    pub author: Author,
    pub snippet: String,
}

/// A comment posted under a thread.
///
/// `parent_id = None` marks a top-level comment. `replies_count` is the
/// authoritative number of replies on the server; `replies` may hold fewer
/// when replies are paginated separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub thread_id: u64,
    #[serde(default)]
    pub parent_id: Option<u64>,
    pub body: String,
    pub author: Author,
    #[serde(flatten)]
    pub counters: VoteCounters,
    #[serde(flatten)]
    pub viewer_vote: ViewerVote,
    #[serde(default)]
    pub replies_count: u32,
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// Presentation flag (e.g. the comment was linked from a permalink).
    #[serde(default)]
    pub is_highlighted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reply to a comment, or a nested reply to a reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    pub id: u64,
    pub body: String,
    pub author: Author,
    #[serde(default)]
    pub replying_to: Option<ReplyingTo>,
    #[serde(flatten)]
    pub counters: VoteCounters,
    #[serde(flatten)]
    pub viewer_vote: ViewerVote,
    #[serde(default)]
    pub nested_replies_count: u32,
    #[serde(default)]
    pub nested_replies: Vec<Reply>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Votable for Comment {
    fn votable_id(&self) -> VotableId {
        VotableId::comment(self.id)
    }

    fn counters(&self) -> VoteCounters {
        self.counters
    }

    fn viewer_vote(&self) -> ViewerVote {
        self.viewer_vote
    }
}

impl Votable for Reply {
    fn votable_id(&self) -> VotableId {
        VotableId::reply(self.id)
    }

    fn counters(&self) -> VoteCounters {
        self.counters
    }

    fn viewer_vote(&self) -> ViewerVote {
        self.viewer_vote
    }
}
