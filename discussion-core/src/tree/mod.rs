//! Discussion tree assembly.
mod assembler;

pub use assembler::{assemble, CommentNode, DiscussionTree, NodeId, Placement, ReplyLoading};
