//! # Discussion Core
//! This crate holds the parts of the discussion client that carry invariants:
//! the vote aggregator and ledger with their optimistic coordinator, the
//! discussion tree assembler, and the search and suggestion aggregator with
//! the service that feeds it.
//!
//! The aggregation functions are pure. Only `VoteCoordinator` and
//! `SearchService` talk to collaborators, and only through the traits in
//! `discussion_repository`.
pub mod errors;
pub mod search;
pub mod tree;
pub mod voting;

pub use errors::{ServiceError, TreeError, VoteError};
pub use search::{merge_search, merge_suggestions, SearchService};
pub use tree::{assemble, CommentNode, DiscussionTree, NodeId, Placement, ReplyLoading};
pub use voting::{
    apply_vote, PendingState, PendingVotes, VoteCoordinator, VoteLedger, VoteState, VoteTransition,
};
