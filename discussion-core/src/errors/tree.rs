//! Error types for discussion tree assembly.
use thiserror::Error;

use crate::tree::NodeId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Replies were expected to be fully embedded but the count disagrees.
    #[error("{node} reports {expected} replies but carries {actual}")]
    CountMismatch {
        node: NodeId,
        expected: u32,
        actual: usize,
    },

    #[error("{node} would hold {actual} replies, more than its total of {expected}")]
    CountExceeded {
        node: NodeId,
        expected: u32,
        actual: usize,
    },

    #[error("{0} appears more than once")]
    DuplicateNode(NodeId),

    #[error("{0} is not part of this discussion")]
    UnknownNode(NodeId),
}
