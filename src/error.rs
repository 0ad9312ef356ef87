use thiserror::Error;

use crate::layout::LayoutId;
use crate::tree::NodeId;

/// Errors raised by treemap construction and queries.
///
/// Every variant is a precondition violation by the caller; none are retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreemapError {
    #[error("cannot add a child to leaf node {0:?}")]
    LeafMutation(LayoutId),

    #[error("more nodes to size ({needed}) than slots in the scratch buffer ({available})")]
    Argument { needed: usize, available: usize },

    #[error("bounds for node {0:?} are still unset after regeneration (node unreachable from the root)")]
    BoundsUnavailable(LayoutId),

    #[error("child index {index} out of range for node {parent:?} with {count} children")]
    ChildIndexOutOfRange {
        parent: LayoutId,
        index: usize,
        count: usize,
    },

    #[error("node {0:?} is not part of this treemap")]
    UnknownNode(LayoutId),

    #[error("node {0:?} is not part of this weighted tree")]
    UnknownSourceNode(NodeId),
}

pub type Result<T, E = TreemapError> = std::result::Result<T, E>;
