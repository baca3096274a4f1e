//! The voting model shared by every votable kind.
//!
//! `apply_vote` is the pure aggregator. `VoteLedger` remembers the current
//! user's vote per identity, `PendingVotes` tracks optimistic transitions
//! awaiting the server, and `VoteCoordinator` ties them to a
//! `VotesRepository`.
mod aggregator;
mod coordinator;
mod ledger;
mod pending;

pub use aggregator::{apply_vote, VoteState, VoteTransition};
pub use coordinator::VoteCoordinator;
pub use ledger::VoteLedger;
pub use pending::{PendingState, PendingVotes};
