use std::cell::Cell;

use crate::error::{Result, TreemapError};

/// Index into the arena `Vec<WeightedNode>`. Uses u32 to save memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node of the weighted input hierarchy, stored in a flat arena.
#[derive(Debug, Clone)]
pub struct WeightedNode<T> {
    /// Domain payload (None for anonymous grouping nodes)
    pub payload: Option<T>,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// Children in layout order
    pub(crate) children: Vec<NodeId>,
    /// Memoized weight, filled on first read
    pub(crate) weight: Cell<Option<f64>>,
}

impl<T> WeightedNode<T> {
    fn new(payload: Option<T>, parent: Option<NodeId>) -> Self {
        Self {
            payload,
            parent,
            children: Vec::new(),
            weight: Cell::new(None),
        }
    }

    /// Children in insertion (layout) order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The weighted input tree stored as a flat arena of nodes.
///
/// Children always have larger indices than their parent. Children must be
/// fully populated before a node's weight is first read; adding children
/// afterwards leaves a stale memoized weight.
#[derive(Debug, Clone)]
pub struct WeightedTree<T> {
    pub(crate) nodes: Vec<WeightedNode<T>>,
    root: NodeId,
}

impl<T> WeightedTree<T> {
    /// Create a tree holding only a root node.
    pub fn new(root_payload: Option<T>) -> Self {
        WeightedTree {
            nodes: vec![WeightedNode::new(root_payload, None)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a child under the given parent. Returns the new node's ID.
    pub fn add_child(&mut self, parent: NodeId, payload: Option<T>) -> Result<NodeId> {
        if parent.index() >= self.nodes.len() {
            return Err(TreemapError::UnknownSourceNode(parent));
        }
        Ok(self.push_child(parent, payload))
    }

    /// Append a child under a parent already known to be in the arena.
    pub(crate) fn push_child(&mut self, parent: NodeId, payload: Option<T>) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(WeightedNode::new(payload, Some(parent)));
        self.nodes[parent.index()].children.push(new_id);
        new_id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&WeightedNode<T>> {
        self.nodes.get(id.index())
    }

    /// Payload of a node, if it carries one.
    pub fn payload(&self, id: NodeId) -> Option<&T> {
        self.get(id)?.payload.as_ref()
    }

    /// Child IDs in layout order; empty for an ID outside this tree.
    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[][..], |node| node.children())
    }

    /// Number of direct children.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.child_ids(id).len()
    }

    /// The `index`-th child of a node.
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.child_ids(id).get(index).copied()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_, T> {
        ChildIter {
            tree: self,
            ids: self.child_ids(parent).iter(),
        }
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a, T> {
    tree: &'a WeightedTree<T>,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a, T> Iterator for ChildIter<'a, T> {
    type Item = (NodeId, &'a WeightedNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        Some((id, &self.tree.nodes[id.index()]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<T> ExactSizeIterator for ChildIter<'_, T> {}
