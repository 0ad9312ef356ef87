use super::treemap::{slice, LayoutId, LayoutTree};
use crate::geometry::Rect;

impl<'a, T> LayoutTree<'a, T> {
    /// Depth-first, pre-order enumeration of `(rectangle, payload)` pairs.
    ///
    /// Rectangles are re-derived from the current shape and lengths exactly
    /// as bounds generation does, without reading or touching the cached
    /// bounds. Each call starts a fresh, independent traversal.
    pub fn rectangles(&self, only_leaves: bool) -> Rectangles<'_, 'a, T> {
        let stack: Vec<(LayoutId, Rect)> = self
            .node(self.root())
            .map(|root| {
                let rect = slice(self.start_space(), root.split_vertical(), 0.0, root.length());
                (self.root(), rect)
            })
            .into_iter()
            .collect();
        Rectangles {
            tree: self,
            only_leaves,
            stack,
        }
    }

    /// Nodes of the subtree under `id`, parents before children. Empty for
    /// an ID outside this tree.
    pub fn walk_top_down(&self, id: LayoutId) -> TopDown<'_, 'a, T> {
        TopDown {
            tree: self,
            stack: self.node(id).map(|_| id).into_iter().collect(),
        }
    }

    /// Nodes of the subtree under `id`, children before parents.
    pub fn walk_bottom_up(&self, id: LayoutId) -> std::vec::IntoIter<LayoutId> {
        // Pre-order with siblings visited right to left, reversed.
        let mut order = Vec::new();
        let mut stack: Vec<LayoutId> = self.node(id).map(|_| id).into_iter().collect();
        while let Some(n) = stack.pop() {
            order.push(n);
            stack.extend_from_slice(self.children(n));
        }
        order.reverse();
        order.into_iter()
    }
}

/// Iterator returned by [`LayoutTree::rectangles`].
#[derive(Debug)]
pub struct Rectangles<'t, 'a, T> {
    tree: &'t LayoutTree<'a, T>,
    only_leaves: bool,
    stack: Vec<(LayoutId, Rect)>,
}

impl<'a, T> Iterator for Rectangles<'_, 'a, T> {
    type Item = (Rect, Option<&'a T>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, rect) = self.stack.pop()?;
            let Some(node) = self.tree.node(id) else {
                continue;
            };

            let start = self.stack.len();
            let mut total = 0.0;
            for &child in node.children() {
                let length = self.tree.node(child).map_or(0.0, |c| c.length());
                self.stack
                    .push((child, slice(rect, node.split_vertical(), total, length)));
                total += length;
            }
            self.stack[start..].reverse();

            if !self.only_leaves || node.is_leaf() {
                return Some((rect, node.payload()));
            }
        }
    }
}

/// Iterator returned by [`LayoutTree::walk_top_down`].
#[derive(Debug)]
pub struct TopDown<'t, 'a, T> {
    tree: &'t LayoutTree<'a, T>,
    stack: Vec<LayoutId>,
}

impl<T> Iterator for TopDown<'_, '_, T> {
    type Item = LayoutId;

    fn next(&mut self) -> Option<LayoutId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}
