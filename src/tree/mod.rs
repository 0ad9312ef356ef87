pub mod aggregate;
pub mod arena;
pub mod builder;

use compact_str::CompactString;

pub use self::arena::{ChildIter, NodeId, WeightedNode, WeightedTree};
pub use self::builder::Branch;

/// The one capability a payload needs to take part in a layout.
pub trait Weighted {
    /// The weight (area) this node demands, or `None` to use the sum of its
    /// children.
    fn explicit_weight(&self) -> Option<f64>;
}

impl Weighted for f64 {
    fn explicit_weight(&self) -> Option<f64> {
        Some(*self)
    }
}

/// A labelled payload with an optional explicit weight.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedWeight {
    pub name: CompactString,
    pub weight: Option<f64>,
}

impl NamedWeight {
    /// A named node demanding `weight`.
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: CompactString::new(name),
            weight: Some(weight),
        }
    }

    /// A named node whose weight is the sum of its children.
    pub fn group(name: &str) -> Self {
        Self {
            name: CompactString::new(name),
            weight: None,
        }
    }
}

impl Weighted for NamedWeight {
    fn explicit_weight(&self) -> Option<f64> {
        self.weight
    }
}
