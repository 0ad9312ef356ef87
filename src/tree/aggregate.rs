use super::arena::{NodeId, WeightedNode, WeightedTree};
use super::Weighted;

impl<T: Weighted> WeightedTree<T> {
    /// Weight of a node: the payload's explicit weight if it declares one,
    /// otherwise the sum of its children's weights. Memoized on first read.
    ///
    /// An ID outside this tree weighs nothing.
    pub fn weight(&self, id: NodeId) -> f64 {
        let Some(node) = self.get(id) else {
            return 0.0;
        };
        if let Some(w) = node.weight.get() {
            return w;
        }

        // Post-order over the not yet memoized part of the subtree, so deep
        // chains don't grow the call stack.
        let mut stack = vec![(id, false)];
        while let Some((n, expanded)) = stack.pop() {
            let current = &self.nodes[n.index()];
            if current.weight.get().is_some() {
                continue;
            }
            if let Some(explicit) = current.payload.as_ref().and_then(Weighted::explicit_weight) {
                current.weight.set(Some(explicit));
            } else if expanded {
                current.weight.set(Some(self.children_total(current)));
            } else {
                stack.push((n, true));
                stack.extend(current.children.iter().map(|&c| (c, false)));
            }
        }
        node.weight.get().unwrap_or(0.0)
    }

    /// Compute and memoize the weight of every node (bottom-up).
    ///
    /// Processes nodes in reverse order (children before parents) since
    /// children always have higher indices than their parents in the arena,
    /// so no recursion is needed.
    pub fn aggregate_weights(&self) {
        for node in self.nodes.iter().rev() {
            if node.weight.get().is_some() {
                continue;
            }
            let w = match node.payload.as_ref().and_then(Weighted::explicit_weight) {
                Some(explicit) => explicit,
                None => self.children_total(node),
            };
            node.weight.set(Some(w));
        }
    }

    fn children_total(&self, node: &WeightedNode<T>) -> f64 {
        node.children
            .iter()
            .map(|c| self.nodes[c.index()].weight.get().unwrap_or(0.0))
            .sum()
    }
}
