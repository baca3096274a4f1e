use discussion_shared::{VoteCounters, VoteDirection, VotesDelta};
use serde::Serialize;

use crate::errors::VoteError;

/// A votable's counters together with the current user's vote on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteState {
    pub counters: VoteCounters,
    pub direction: Option<VoteDirection>,
}

impl VoteState {
    pub fn new(counters: VoteCounters, direction: Option<VoteDirection>) -> Self {
        Self {
            counters,
            direction,
        }
    }
}

/// One user's vote moving from `previous` to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub previous: VoteState,
    pub next: VoteState,
    pub delta: VotesDelta,
}

/// Computes the state a votable moves to when the current user clicks a vote
/// button.
///
/// Clicking the direction already held retracts the vote. Clicking the other
/// direction switches it, moving both counters in the same transition.
///
/// # Arguments
///
/// * `current` - The votable's counters before the click
/// * `current_direction` - The user's vote before the click
/// * `intent` - The direction the user clicked
///
/// # Returns
///
/// The `VoteTransition` to apply, or `VoteError::CounterUnderflow` when the
/// counters cannot contain the vote being retracted.
pub fn apply_vote(
    current: VoteCounters,
    current_direction: Option<VoteDirection>,
    intent: VoteDirection,
) -> Result<VoteTransition, VoteError> {
    let next_direction = if current_direction == Some(intent) {
        None
    } else {
        Some(intent)
    };

    let delta = VotesDelta::between(current_direction, next_direction);
    let counters = current.apply(delta).ok_or_else(|| {
        let underflow = (delta.upvotes < 0 && current.upvotes == 0)
            || (delta.downvotes < 0 && current.downvotes == 0);
        if underflow {
            VoteError::CounterUnderflow {
                counters: current,
                direction: current_direction.unwrap_or(intent),
            }
        } else {
            VoteError::CounterOverflow { counters: current }
        }
    })?;

    Ok(VoteTransition {
        previous: VoteState::new(current, current_direction),
        next: VoteState::new(counters, next_direction),
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use VoteDirection::{Downvote, Upvote};

    #[test]
    fn test_fresh_toggle_and_switch_sequence() {
        let start = VoteCounters::new(5, 2);

        let first = apply_vote(start, None, Upvote).unwrap();
        assert_eq!(first.next, VoteState::new(VoteCounters::new(6, 2), Some(Upvote)));

        let second = apply_vote(first.next.counters, first.next.direction, Upvote).unwrap();
        assert_eq!(second.next, VoteState::new(VoteCounters::new(5, 2), None));

        let third = apply_vote(second.next.counters, second.next.direction, Downvote).unwrap();
        assert_eq!(third.next, VoteState::new(VoteCounters::new(5, 3), Some(Downvote)));
    }

    #[test]
    fn test_switch_moves_both_counters() {
        let transition = apply_vote(VoteCounters::new(3, 3), Some(Downvote), Upvote).unwrap();
        assert_eq!(transition.next.counters, VoteCounters::new(4, 2));
        assert_eq!(transition.delta, VotesDelta { upvotes: 1, downvotes: -1 });
        assert_eq!(transition.previous, VoteState::new(VoteCounters::new(3, 3), Some(Downvote)));
    }

    #[test]
    fn test_retract_from_zero_is_underflow() {
        let err = apply_vote(VoteCounters::new(0, 4), Some(Upvote), Upvote).unwrap_err();
        assert_eq!(
            err,
            VoteError::CounterUnderflow {
                counters: VoteCounters::new(0, 4),
                direction: Upvote,
            }
        );
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_switch_from_zero_is_underflow() {
        let err = apply_vote(VoteCounters::new(2, 0), Some(Downvote), Upvote).unwrap_err();
        assert!(matches!(
            err,
            VoteError::CounterUnderflow {
                direction: Downvote,
                ..
            }
        ));
    }

    #[test]
    fn test_overflow() {
        let err = apply_vote(VoteCounters::new(u32::MAX, 0), None, Upvote).unwrap_err();
        assert!(matches!(err, VoteError::CounterOverflow { .. }));
        assert!(!err.is_invariant_violation());
    }

    fn direction() -> impl Strategy<Value = VoteDirection> {
        prop_oneof![Just(Upvote), Just(Downvote)]
    }

    proptest! {
        #[test]
        fn counters_match_deduplicated_votes(
            clicks in prop::collection::vec((0u64..5, direction()), 0..64)
        ) {
            let mut counters = VoteCounters::default();
            let mut votes: HashMap<u64, VoteDirection> = HashMap::new();

            for (user, intent) in clicks {
                let transition = apply_vote(counters, votes.get(&user).copied(), intent).unwrap();
                counters = transition.next.counters;
                match transition.next.direction {
                    Some(direction) => votes.insert(user, direction),
                    None => votes.remove(&user),
                };

                let upvotes = votes.values().filter(|d| **d == Upvote).count() as u32;
                let downvotes = votes.values().filter(|d| **d == Downvote).count() as u32;
                prop_assert_eq!(counters, VoteCounters::new(upvotes, downvotes));
            }
        }

        #[test]
        fn same_click_twice_round_trips(
            upvotes in 0u32..1000,
            downvotes in 0u32..1000,
            intent in direction(),
        ) {
            let start = VoteCounters::new(upvotes, downvotes);
            let on = apply_vote(start, None, intent).unwrap();
            let off = apply_vote(on.next.counters, on.next.direction, intent).unwrap();
            prop_assert_eq!(off.next, VoteState::new(start, None));
        }

        #[test]
        fn switching_changes_each_counter_by_one(
            upvotes in 1u32..1000,
            downvotes in 1u32..1000,
            from in direction(),
        ) {
            let start = VoteCounters::new(upvotes, downvotes);
            let to = from.opposite();
            let switched = apply_vote(start, Some(from), to).unwrap();
            prop_assert_eq!(switched.next.counters.count(to), start.count(to) + 1);
            prop_assert_eq!(switched.next.counters.count(from), start.count(from) - 1);
        }
    }
}
