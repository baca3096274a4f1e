use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::VotableId;

/// The direction of a user's vote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    /// A positive endorsement.
    Upvote,
    /// A negative endorsement.
    Downvote,
}

impl VoteDirection {
    pub fn opposite(self) -> Self {
        match self {
            VoteDirection::Upvote => VoteDirection::Downvote,
            VoteDirection::Downvote => VoteDirection::Upvote,
        }
    }
}

/// The state-setting value sent upstream for a vote.
///
/// Unlike a click intent, a `VoteValue` names the state the user's vote should
/// end up in, so resubmitting the same value is harmless on the server side.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    /// Indicates an upvote or positive endorsement.
    Up,
    /// Indicates a downvote or negative endorsement.
    Down,
    /// Indicates the removal or retraction of a previous vote.
    Remove,
}

impl VoteValue {
    /// The direction this value leaves the user's vote in.
    pub fn direction(&self) -> Option<VoteDirection> {
        match self {
            VoteValue::Up => Some(VoteDirection::Upvote),
            VoteValue::Down => Some(VoteDirection::Downvote),
            VoteValue::Remove => None,
        }
    }
}

impl From<Option<VoteDirection>> for VoteValue {
    fn from(direction: Option<VoteDirection>) -> Self {
        match direction {
            Some(VoteDirection::Upvote) => VoteValue::Up,
            Some(VoteDirection::Downvote) => VoteValue::Down,
            None => VoteValue::Remove,
        }
    }
}

/// A live vote record as held by the store of record.
///
/// At most one live `Vote` exists per `(user_id, votable)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote {
    pub id: u64,
    #[serde(flatten)]
    pub votable: VotableId,
    pub user_id: u64,
    pub direction: VoteDirection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The current user's vote on an entity, as embedded in a server response.
///
/// The server reports two independent flags. Both being set is impossible for
/// a consistent store and is surfaced by [`ViewerVote::direction`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewerVote {
    #[serde(default)]
    pub has_upvoted: bool,
    #[serde(default)]
    pub has_downvoted: bool,
}

impl ViewerVote {
    pub fn from_direction(direction: Option<VoteDirection>) -> Self {
        Self {
            has_upvoted: direction == Some(VoteDirection::Upvote),
            has_downvoted: direction == Some(VoteDirection::Downvote),
        }
    }

    /// Resolve the flags into a single direction.
    ///
    /// Returns an error message if both flags are set.
    pub fn direction(&self) -> Result<Option<VoteDirection>, String> {
        match (self.has_upvoted, self.has_downvoted) {
            (false, false) => Ok(None),
            (true, false) => Ok(Some(VoteDirection::Upvote)),
            (false, true) => Ok(Some(VoteDirection::Downvote)),
            (true, true) => Err("viewer vote reports both an upvote and a downvote".to_string()),
        }
    }
}
