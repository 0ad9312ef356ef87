use super::arena::{NodeId, WeightedTree};

/// Nested literal form of a weighted tree.
///
/// ```
/// use squarified_treemap::tree::{Branch, WeightedTree};
///
/// let tree: WeightedTree<f64> = Branch::unnamed()
///     .with(Branch::new(1.0))
///     .with(Branch::unnamed().with(Branch::new(2.0)).with(Branch::new(3.0)))
///     .into();
/// assert_eq!(tree.weight(tree.root()), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct Branch<T> {
    payload: Option<T>,
    children: Vec<Branch<T>>,
}

impl<T> Branch<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload: Some(payload),
            children: Vec::new(),
        }
    }

    /// A node without a payload; its weight is the sum of its children.
    pub fn unnamed() -> Self {
        Self {
            payload: None,
            children: Vec::new(),
        }
    }

    /// Append a child (layout order is append order).
    pub fn with(mut self, child: Branch<T>) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Branch<T>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Flatten into an arena tree.
    pub fn build(self) -> WeightedTree<T> {
        let mut tree = WeightedTree::new(self.payload);
        let root = tree.root();

        // Stack of pending child iterators so deep literals don't recurse.
        let mut stack: Vec<(NodeId, std::vec::IntoIter<Branch<T>>)> =
            vec![(root, self.children.into_iter())];
        while let Some((parent, pending)) = stack.last_mut() {
            let parent = *parent;
            match pending.next() {
                Some(child) => {
                    let id = tree.push_child(parent, child.payload);
                    stack.push((id, child.children.into_iter()));
                }
                None => {
                    stack.pop();
                }
            }
        }

        tree
    }
}

impl<T> From<Branch<T>> for WeightedTree<T> {
    fn from(branch: Branch<T>) -> Self {
        branch.build()
    }
}
