// Public library interface for the squarified treemap
// The debug-layout tool uses the same modules

pub mod error;
pub mod geometry;
pub mod layout;
pub mod pool;
pub mod tree;

pub use error::{Result, TreemapError};
pub use geometry::Rect;
pub use layout::{LayoutId, LayoutNode, LayoutTree, NodeShape, SquarifyConfig};
pub use pool::ScratchPool;
pub use tree::{Branch, NamedWeight, NodeId, Weighted, WeightedTree};
