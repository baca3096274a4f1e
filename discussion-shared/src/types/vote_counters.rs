use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::types::VoteDirection;

/// The up/down tallies attached to a votable entity.
///
/// The score is always derived from the two counters and never stored next
/// to them, so it cannot drift.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VoteCounters {
    pub upvotes: u32,
    pub downvotes: u32,
}

impl VoteCounters {
    pub fn new(upvotes: u32, downvotes: u32) -> Self {
        Self { upvotes, downvotes }
    }

    /// `upvotes - downvotes`; may be negative.
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    /// The counter tracking the given direction.
    pub fn count(&self, direction: VoteDirection) -> u32 {
        match direction {
            VoteDirection::Upvote => self.upvotes,
            VoteDirection::Downvote => self.downvotes,
        }
    }

    /// Apply a delta to both counters at once.
    ///
    /// Returns `None` if either counter would leave the `u32` range. Callers
    /// decide what an out-of-range result means; it is never clamped here.
    pub fn apply(&self, delta: VotesDelta) -> Option<VoteCounters> {
        let upvotes = u32::try_from(i64::from(self.upvotes) + delta.upvotes).ok()?;
        let downvotes = u32::try_from(i64::from(self.downvotes) + delta.downvotes).ok()?;
        Some(VoteCounters { upvotes, downvotes })
    }
}

/// Signed change to a pair of vote counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VotesDelta {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VotesDelta {
    pub const ZERO: VotesDelta = VotesDelta {
        upvotes: 0,
        downvotes: 0,
    };

    /// The counter change implied by moving one user's vote from `previous`
    /// to `next`.
    ///
    /// # Arguments
    ///
    /// * `previous` - The user's vote before the change (`None` = no vote)
    /// * `next` - The user's vote after the change (`None` = no vote)
    ///
    /// # Returns
    ///
    /// The delta to add to the entity's counters. Each component is -1, 0 or 1.
    pub fn between(previous: Option<VoteDirection>, next: Option<VoteDirection>) -> Self {
        use VoteDirection::{Downvote, Upvote};

        let (upvotes, downvotes) = match (previous, next) {
            (Some(Upvote), Some(Downvote)) => (-1, 1),
            (Some(Upvote), None) => (-1, 0),
            (Some(Downvote), Some(Upvote)) => (1, -1),
            (Some(Downvote), None) => (0, -1),
            (None, Some(Upvote)) => (1, 0),
            (None, Some(Downvote)) => (0, 1),
            (Some(Upvote), Some(Upvote)) | (Some(Downvote), Some(Downvote)) | (None, None) => {
                (0, 0)
            }
        };

        VotesDelta { upvotes, downvotes }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for VotesDelta {
    type Output = VotesDelta;

    fn add(self, rhs: VotesDelta) -> VotesDelta {
        VotesDelta {
            upvotes: self.upvotes + rhs.upvotes,
            downvotes: self.downvotes + rhs.downvotes,
        }
    }
}
