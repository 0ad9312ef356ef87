use std::cell::Cell;

use crate::error::{Result, TreemapError};
use crate::geometry::Rect;

/// Index of a node in a [`LayoutTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutId(pub u32);

impl LayoutId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a node is created: as a leaf, or as a split laying its children out
/// along one axis. `length` is the node's extent along its parent's split axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeShape {
    Leaf { length: f64 },
    Split { vertical: bool, length: f64 },
}

impl NodeShape {
    pub fn leaf(length: f64) -> Self {
        NodeShape::Leaf { length }
    }

    pub fn split(vertical: bool, length: f64) -> Self {
        NodeShape::Split { vertical, length }
    }
}

/// One node of the output hierarchy.
#[derive(Debug)]
pub struct LayoutNode<'a, T> {
    payload: Option<&'a T>,
    is_leaf: bool,
    /// Children run along X (vertical split lines) when true, along Y otherwise
    split_vertical: bool,
    length: f64,
    parent: Option<LayoutId>,
    children: Vec<LayoutId>,
    /// Absolute rectangle, None until (re)generated
    bounds: Cell<Option<Rect>>,
}

impl<'a, T> LayoutNode<'a, T> {
    fn new(shape: NodeShape, payload: Option<&'a T>, parent: Option<LayoutId>) -> Self {
        let (is_leaf, split_vertical, length) = match shape {
            NodeShape::Leaf { length } => (true, false, length),
            NodeShape::Split { vertical, length } => (false, vertical, length),
        };
        Self {
            payload,
            is_leaf,
            split_vertical,
            length,
            parent,
            children: Vec::new(),
            bounds: Cell::new(None),
        }
    }

    /// The payload shared with the source node.
    pub fn payload(&self) -> Option<&'a T> {
        self.payload
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Meaningful only for non-leaf nodes.
    pub fn split_vertical(&self) -> bool {
        self.split_vertical
    }

    /// Extent along the axis the parent split on.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn parent(&self) -> Option<LayoutId> {
        self.parent
    }

    pub fn children(&self) -> &[LayoutId] {
        &self.children
    }

    /// Cached bounds without triggering regeneration.
    pub fn cached_bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }
}

/// The laid-out treemap: a flat arena of [`LayoutNode`]s plus the space the
/// root fills.
///
/// Absolute rectangles are derived lazily. Reading [`LayoutTree::bounds`] on
/// a node with no cached rectangle regenerates bounds for the whole tree,
/// since a node's offset depends on every preceding sibling of every
/// ancestor. Not `Sync`: bounds live in `Cell`s.
#[derive(Debug)]
pub struct LayoutTree<'a, T> {
    start_space: Rect,
    nodes: Vec<LayoutNode<'a, T>>,
    root: LayoutId,
}

impl<'a, T> LayoutTree<'a, T> {
    /// Create a tree holding only a root node that fills `start_space`.
    pub fn new(start_space: Rect, root: NodeShape, payload: Option<&'a T>) -> Self {
        Self {
            start_space,
            nodes: vec![LayoutNode::new(root, payload, None)],
            root: LayoutId(0),
        }
    }

    pub fn root(&self) -> LayoutId {
        self.root
    }

    pub fn start_space(&self) -> Rect {
        self.start_space
    }

    /// Get a node by ID.
    pub fn node(&self, id: LayoutId) -> Option<&LayoutNode<'a, T>> {
        self.nodes.get(id.index())
    }

    /// Total number of nodes (always at least the root).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Child IDs in layout order; empty for an ID outside this tree.
    pub fn children(&self, id: LayoutId) -> &[LayoutId] {
        self.node(id).map_or(&[][..], |node| node.children())
    }

    pub fn child_count(&self, id: LayoutId) -> usize {
        self.children(id).len()
    }

    /// The `index`-th child of a node.
    pub fn child(&self, id: LayoutId, index: usize) -> Option<LayoutId> {
        self.children(id).get(index).copied()
    }

    /// Append a child to a non-leaf node. Returns the new node's ID.
    pub fn add_child(
        &mut self,
        parent: LayoutId,
        shape: NodeShape,
        payload: Option<&'a T>,
    ) -> Result<LayoutId> {
        let id = LayoutId(self.nodes.len() as u32);
        let node = self
            .nodes
            .get_mut(parent.index())
            .ok_or(TreemapError::UnknownNode(parent))?;
        if node.is_leaf {
            return Err(TreemapError::LeafMutation(parent));
        }

        node.children.push(id);
        self.nodes.push(LayoutNode::new(shape, payload, Some(parent)));
        Ok(id)
    }

    /// Choose the split axis of a node; this also makes it a non-leaf.
    pub(crate) fn set_split_vertical(&mut self, id: LayoutId, vertical: bool) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.split_vertical = vertical;
            node.is_leaf = false;
        }
    }

    pub(crate) fn set_length(&mut self, id: LayoutId, length: f64) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.length = length;
            self.invalidate_subtree(id);
        }
    }

    /// Absolute rectangle of a node, regenerating the whole tree's bounds if
    /// this node's cache is empty.
    pub fn bounds(&self, id: LayoutId) -> Result<Rect> {
        let node = self
            .nodes
            .get(id.index())
            .ok_or(TreemapError::BoundsUnavailable(id))?;
        if let Some(bounds) = node.bounds.get() {
            return Ok(bounds);
        }

        self.generate_bounds();
        node.bounds.get().ok_or(TreemapError::BoundsUnavailable(id))
    }

    /// Re-derive every node's bounds from the top.
    pub fn generate_bounds(&self) {
        tracing::trace!("Regenerating bounds for {} nodes", self.nodes.len());
        let root = &self.nodes[self.root.index()];
        let mut stack = vec![(
            self.root,
            slice(self.start_space, root.split_vertical, 0.0, root.length),
        )];

        while let Some((id, bounds)) = stack.pop() {
            let node = &self.nodes[id.index()];
            node.bounds.set(Some(bounds));

            // Children sit side by side along this node's split axis
            let mut total = 0.0;
            for &child in &node.children {
                let length = self.nodes[child.index()].length;
                stack.push((child, slice(bounds, node.split_vertical, total, length)));
                total += length;
            }
        }
    }

    /// Exchange two children of `parent`.
    ///
    /// Lengths are untouched; every child subtree whose position changes
    /// (the two swapped ones and any between them) loses its cached bounds.
    pub fn swap(&mut self, parent: LayoutId, a: usize, b: usize) -> Result<()> {
        let children = &mut self
            .nodes
            .get_mut(parent.index())
            .ok_or(TreemapError::UnknownNode(parent))?
            .children;
        let count = children.len();
        for index in [a, b] {
            if index >= count {
                return Err(TreemapError::ChildIndexOutOfRange {
                    parent,
                    index,
                    count,
                });
            }
        }
        if a == b {
            return Ok(());
        }

        children.swap(a, b);
        let shifted = children[a.min(b)..=a.max(b)].to_vec();
        for id in shifted {
            self.invalidate_subtree(id);
        }
        Ok(())
    }

    /// Clear the cached bounds of `id` and all of its descendants.
    pub fn invalidate_subtree(&self, id: LayoutId) {
        for n in self.walk_bottom_up(id) {
            self.nodes[n.index()].bounds.set(None);
        }
    }
}

/// The part of `space` running from `offset` to `offset + length` along the
/// split axis and spanning it fully across.
pub(crate) fn slice(space: Rect, vertical: bool, offset: f64, length: f64) -> Rect {
    if vertical {
        let x0 = space.x0 + offset;
        Rect::new(x0, space.y0, x0 + length, space.y1)
    } else {
        let y0 = space.y0 + offset;
        Rect::new(space.x0, y0, space.x1, y0 + length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NamedWeight;

    fn label(name: &str) -> NamedWeight {
        NamedWeight::group(name)
    }

    fn square() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn adding_child_to_leaf_fails() {
        let one = label("1");
        let mut map = LayoutTree::new(square(), NodeShape::leaf(10.0), Some(&one));
        let root = map.root();
        assert_eq!(
            map.add_child(root, NodeShape::leaf(1.0), None),
            Err(TreemapError::LeafMutation(root))
        );
        assert_eq!(map.child_count(root), 0);
    }

    #[test]
    fn adding_child_to_split_node_adds_to_collection() {
        let one = label("1");
        let mut map = LayoutTree::new(square(), NodeShape::split(true, 10.0), Some(&one));
        let root = map.root();
        let child = map.add_child(root, NodeShape::leaf(1.0), None).unwrap();
        assert_eq!(map.child_count(root), 1);
        assert_eq!(map.child(root, 0), Some(child));
        assert_eq!(map.node(child).unwrap().parent(), Some(root));
    }

    #[test]
    fn childless_root_fills_start_space() {
        let hundred = label("100");
        let map = LayoutTree::new(square(), NodeShape::leaf(10.0), Some(&hundred));
        assert_eq!(map.bounds(map.root()).unwrap(), square());
    }

    #[test]
    fn two_children_split_along_x() {
        let (l, r) = (label("0"), label("1"));
        let mut map: LayoutTree<'_, NamedWeight> =
            LayoutTree::new(square(), NodeShape::split(true, 10.0), None);
        let root = map.root();
        let a = map.add_child(root, NodeShape::leaf(4.0), Some(&l)).unwrap();
        let b = map.add_child(root, NodeShape::leaf(6.0), Some(&r)).unwrap();

        assert_eq!(map.bounds(root).unwrap(), square());
        assert_eq!(map.bounds(a).unwrap(), Rect::new(0.0, 0.0, 4.0, 10.0));
        assert_eq!(map.bounds(b).unwrap(), Rect::new(4.0, 0.0, 10.0, 10.0));
    }

    fn three_level<'a>(
        names: &'a [NamedWeight; 4],
    ) -> (LayoutTree<'a, NamedWeight>, [LayoutId; 4]) {
        let mut map = LayoutTree::new(square(), NodeShape::split(true, 10.0), None);
        let root = map.root();
        let a = map
            .add_child(root, NodeShape::split(false, 4.0), Some(&names[0]))
            .unwrap();
        let a1 = map.add_child(a, NodeShape::leaf(2.0), Some(&names[1])).unwrap();
        let a2 = map.add_child(a, NodeShape::leaf(8.0), Some(&names[2])).unwrap();
        let b = map.add_child(root, NodeShape::leaf(6.0), Some(&names[3])).unwrap();
        (map, [a, a1, a2, b])
    }

    #[test]
    fn splits_alternate_by_depth() {
        let names = [label("0"), label("1"), label("2"), label("3")];
        let (map, [a, a1, a2, b]) = three_level(&names);

        assert_eq!(map.bounds(map.root()).unwrap(), square());
        assert_eq!(map.bounds(a).unwrap(), Rect::new(0.0, 0.0, 4.0, 10.0));
        assert_eq!(map.bounds(a1).unwrap(), Rect::new(0.0, 0.0, 4.0, 2.0));
        assert_eq!(map.bounds(a2).unwrap(), Rect::new(0.0, 2.0, 4.0, 10.0));
        assert_eq!(map.bounds(b).unwrap(), Rect::new(4.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn reading_one_node_fills_every_cache() {
        let names = [label("0"), label("1"), label("2"), label("3")];
        let (map, ids) = three_level(&names);
        assert!(ids.iter().all(|&id| map.node(id).unwrap().cached_bounds().is_none()));

        map.bounds(ids[1]).unwrap();
        assert!(ids.iter().all(|&id| map.node(id).unwrap().cached_bounds().is_some()));
    }

    #[test]
    fn swap_moves_subtrees_and_regenerates() {
        let names = [label("0"), label("1"), label("2"), label("3")];
        let (mut map, [a, a1, a2, b]) = three_level(&names);
        let root = map.root();
        map.bounds(root).unwrap();

        map.swap(root, 0, 1).unwrap();
        for id in [a, a1, a2, b] {
            assert_eq!(map.node(id).unwrap().cached_bounds(), None);
        }
        assert!(map.node(root).unwrap().cached_bounds().is_some());
        assert_eq!(map.node(a).unwrap().length(), 4.0);

        assert_eq!(map.children(root), &[b, a]);
        assert_eq!(map.bounds(b).unwrap(), Rect::new(0.0, 0.0, 6.0, 10.0));
        assert_eq!(map.bounds(a).unwrap(), Rect::new(6.0, 0.0, 10.0, 10.0));
        assert_eq!(map.bounds(a1).unwrap(), Rect::new(6.0, 0.0, 10.0, 2.0));
        assert_eq!(map.bounds(a2).unwrap(), Rect::new(6.0, 2.0, 10.0, 10.0));
    }

    #[test]
    fn swap_invalidates_siblings_in_between() {
        let mut map: LayoutTree<'_, NamedWeight> =
            LayoutTree::new(square(), NodeShape::split(true, 10.0), None);
        let root = map.root();
        let ids: Vec<_> = [1.0, 2.0, 3.0, 4.0]
            .into_iter()
            .map(|len| map.add_child(root, NodeShape::leaf(len), None).unwrap())
            .collect();
        map.bounds(root).unwrap();

        map.swap(root, 0, 2).unwrap();
        assert_eq!(map.node(ids[3]).unwrap().cached_bounds(), Some(Rect::new(6.0, 0.0, 10.0, 10.0)));
        assert_eq!(map.bounds(ids[1]).unwrap(), Rect::new(3.0, 0.0, 5.0, 10.0));
        assert_eq!(map.bounds(ids[2]).unwrap(), Rect::new(0.0, 0.0, 3.0, 10.0));
        assert_eq!(map.bounds(ids[0]).unwrap(), Rect::new(5.0, 0.0, 6.0, 10.0));
    }

    #[test]
    fn swap_rejects_out_of_range_index() {
        let names = [label("0"), label("1"), label("2"), label("3")];
        let (mut map, _) = three_level(&names);
        let root = map.root();
        assert_eq!(
            map.swap(root, 0, 2),
            Err(TreemapError::ChildIndexOutOfRange {
                parent: root,
                index: 2,
                count: 2
            })
        );
    }

    #[test]
    fn unknown_node_has_no_bounds() {
        let map: LayoutTree<'_, NamedWeight> =
            LayoutTree::new(square(), NodeShape::leaf(10.0), None);
        let stray = LayoutId(7);
        assert_eq!(map.bounds(stray), Err(TreemapError::BoundsUnavailable(stray)));
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let names = [label("0"), label("1"), label("2"), label("3")];
        let (mut map, _) = three_level(&names);
        let count = map.node_count();
        let stray = LayoutId(99);

        assert_eq!(
            map.add_child(stray, NodeShape::leaf(1.0), None),
            Err(TreemapError::UnknownNode(stray))
        );
        assert_eq!(map.swap(stray, 0, 1), Err(TreemapError::UnknownNode(stray)));
        assert_eq!(map.node_count(), count);

        assert!(map.node(stray).is_none());
        assert!(map.children(stray).is_empty());
        assert_eq!(map.child_count(stray), 0);
        assert_eq!(map.child(stray, 0), None);
        map.invalidate_subtree(stray);
    }

    #[test]
    fn offsets_start_at_parent_minimum() {
        let space = Rect::new(5.0, 5.0, 15.0, 9.0);
        let mut map: LayoutTree<'_, NamedWeight> =
            LayoutTree::new(space, NodeShape::split(true, 10.0), None);
        let root = map.root();
        let a = map.add_child(root, NodeShape::split(false, 4.0), None).unwrap();
        let b = map.add_child(root, NodeShape::split(false, 6.0), None).unwrap();
        let b1 = map.add_child(b, NodeShape::leaf(1.0), None).unwrap();
        let b2 = map.add_child(b, NodeShape::leaf(3.0), None).unwrap();

        assert_eq!(map.bounds(a).unwrap(), Rect::new(5.0, 5.0, 9.0, 9.0));
        assert_eq!(map.bounds(b1).unwrap(), Rect::new(9.0, 5.0, 15.0, 6.0));
        assert_eq!(map.bounds(b2).unwrap(), Rect::new(9.0, 6.0, 15.0, 9.0));
    }
}
