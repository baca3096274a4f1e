//! Votable identity types.
//!
//! A `VotableId` pairs the kind of a votable entity with its numeric id and is
//! used as the aggregation key everywhere votes are tracked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{VoteCounters, ViewerVote};

/// The kinds of entity that can receive up/down votes.
///
/// The set is closed: adding a kind means extending every exhaustive match
/// over it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum VotableKind {
    /// A discussion thread attached to a protocol.
    Thread,
    /// A comment posted under a thread.
    Comment,
    /// A reply to a comment, or a nested reply to a reply.
    Reply,
    /// A rated review of a protocol.
    Review,
}

impl VotableKind {
    /// Every votable kind, in declaration order.
    pub const ALL: [VotableKind; 4] = [
        VotableKind::Thread,
        VotableKind::Comment,
        VotableKind::Reply,
        VotableKind::Review,
    ];

    /// Returns the wire name of the kind (the `votable_type` string).
    pub fn as_str(&self) -> &'static str {
        match self {
            VotableKind::Thread => "thread",
            VotableKind::Comment => "comment",
            VotableKind::Reply => "reply",
            VotableKind::Review => "review",
        }
    }
}

impl fmt::Display for VotableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VotableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thread" => Ok(VotableKind::Thread),
            "comment" => Ok(VotableKind::Comment),
            "reply" => Ok(VotableKind::Reply),
            "review" => Ok(VotableKind::Review),
            other => Err(format!("Unknown votable type: {}", other)),
        }
    }
}

/// Identity of a single votable entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VotableId {
    #[serde(rename = "votable_type")]
    pub kind: VotableKind,
    #[serde(rename = "votable_id")]
    pub id: u64,
}

impl VotableId {
    pub fn new(kind: VotableKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn thread(id: u64) -> Self {
        Self::new(VotableKind::Thread, id)
    }

    pub fn comment(id: u64) -> Self {
        Self::new(VotableKind::Comment, id)
    }

    pub fn reply(id: u64) -> Self {
        Self::new(VotableKind::Reply, id)
    }

    pub fn review(id: u64) -> Self {
        Self::new(VotableKind::Review, id)
    }
}

impl fmt::Display for VotableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// An entity that carries vote counters and the server's view of the current
/// user's vote on it.
///
/// Implemented by threads, comments, replies, and reviews, so the vote
/// machinery can treat all four kinds uniformly.
pub trait Votable {
    /// The aggregation key of this entity.
    fn votable_id(&self) -> VotableId;

    /// The entity's current up/down counters.
    fn counters(&self) -> VoteCounters;

    /// The current user's vote as embedded in the server response.
    fn viewer_vote(&self) -> ViewerVote;
}
