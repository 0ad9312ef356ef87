//! Squarified layout: turns a [`WeightedTree`](crate::tree::WeightedTree)
//! into a [`LayoutTree`] whose rectangles have areas proportional to weight.
//!
//! The layout pass only decides split axes and lengths. Absolute rectangles
//! are derived on demand, either cached per node ([`LayoutTree::bounds`]) or
//! streamed without caching ([`LayoutTree::rectangles`]).

pub mod config;
pub mod squarify;
pub mod treemap;
pub mod walk;

pub use self::config::SquarifyConfig;
pub use self::treemap::{LayoutId, LayoutNode, LayoutTree, NodeShape};
pub use self::walk::{Rectangles, TopDown};
