//! Protocols and the entities attached to them: threads, reviews, and tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Author, VotableId, Votable, VoteCounters, ViewerVote};

/// A tag attached to a protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

/// A shared procedure that threads and reviews are attached to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Protocol {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: Author,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub threads_count: u32,
    #[serde(default)]
    pub reviews_count: u32,
    /// Mean review rating; `None` until the protocol has been reviewed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A discussion thread attached to a protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    pub id: u64,
    pub protocol_id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub author: Author,
    #[serde(flatten)]
    pub counters: VoteCounters,
    #[serde(flatten)]
    pub viewer_vote: ViewerVote,
    #[serde(default)]
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rated review of a protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: u64,
    pub protocol_id: u64,
    /// Star rating, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub body: String,
    pub author: Author,
    #[serde(flatten)]
    pub counters: VoteCounters,
    #[serde(flatten)]
    pub viewer_vote: ViewerVote,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    pub fn has_valid_rating(&self) -> bool {
        (Self::MIN_RATING..=Self::MAX_RATING).contains(&self.rating)
    }
}

impl Votable for Thread {
    fn votable_id(&self) -> VotableId {
        VotableId::thread(self.id)
    }

    fn counters(&self) -> VoteCounters {
        self.counters
    }

    fn viewer_vote(&self) -> ViewerVote {
        self.viewer_vote
    }
}

impl Votable for Review {
    fn votable_id(&self) -> VotableId {
        VotableId::review(self.id)
    }

    fn counters(&self) -> VoteCounters {
        self.counters
    }

    fn viewer_vote(&self) -> ViewerVote {
        self.viewer_vote
    }
}
