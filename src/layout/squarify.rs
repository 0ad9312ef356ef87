use crate::error::{Result, TreemapError};
use crate::geometry::{size_along, Rect};
use crate::pool::ScratchPool;
use crate::tree::{NodeId, Weighted, WeightedTree};

use super::config::SquarifyConfig;
use super::treemap::{LayoutId, LayoutTree, NodeShape};

impl<'a, T: Weighted> LayoutTree<'a, T> {
    /// Lay `tree` out inside `space` with the default configuration.
    pub fn build(space: Rect, tree: &'a WeightedTree<T>) -> Result<Self> {
        Self::build_with(space, tree, &SquarifyConfig::default())
    }

    pub fn build_with(space: Rect, tree: &'a WeightedTree<T>, config: &SquarifyConfig) -> Result<Self> {
        let mut pool = ScratchPool::with_slots(config.scratch_slots);
        Self::build_in(space, tree, &mut pool)
    }

    /// Lay `tree` out inside `space`, drawing scratch arrays from a pool the
    /// caller may share across builds.
    ///
    /// Each node gets one split for all of its children: whichever of a
    /// horizontal or vertical split has the smaller worst aspect ratio, with
    /// ties going vertical.
    pub fn build_in(space: Rect, tree: &'a WeightedTree<T>, pool: &mut ScratchPool<f64>) -> Result<Self> {
        let source_root = tree.root();

        // Length is unknown until the root has picked its own split axis
        let mut map = LayoutTree::new(space, NodeShape::leaf(-1.0), tree.payload(source_root));
        let root = map.root();

        let mut pending = vec![(space, source_root, root)];
        while let Some((space, input, output)) = pending.pop() {
            divide_node(space, tree, input, &mut map, output, pool, &mut pending)?;
        }

        let vertical = map.node(root).is_some_and(|n| n.split_vertical());
        map.set_length(root, size_along(space, !vertical));

        tracing::debug!(
            "Built treemap of {} nodes in {:.1}x{:.1} (root split {})",
            map.node_count(),
            space.width(),
            space.height(),
            if vertical { "vertical" } else { "horizontal" }
        );

        Ok(map)
    }
}

/// Nodes still to divide: the space sized for each, its source node and its
/// output node.
type Pending = Vec<(Rect, NodeId, LayoutId)>;

/// Choose the split for `output` and queue its children for division.
fn divide_node<'a, T: Weighted>(
    space: Rect,
    tree: &'a WeightedTree<T>,
    input: NodeId,
    map: &mut LayoutTree<'a, T>,
    output: LayoutId,
    pool: &mut ScratchPool<f64>,
    pending: &mut Pending,
) -> Result<()> {
    let children = tree.child_ids(input);
    if children.is_empty() {
        return Ok(());
    }

    let mut h = pool.allocate(children.len());
    let mut v = pool.allocate(children.len());

    // Take the split with the least bad aspect ratio
    let worst_h = measure_sizes(false, space, tree, children, &mut h)?;
    let worst_v = measure_sizes(true, space, tree, children, &mut v)?;
    tracing::trace!(
        "Dividing {:?}: {} children, worst aspect horizontal={:.3} vertical={:.3}",
        output,
        children.len(),
        worst_h,
        worst_v
    );

    if worst_h < worst_v {
        pool.free(v);
        apply_split(false, space, tree, input, map, output, h, pool, pending)
    } else {
        pool.free(h);
        apply_split(true, space, tree, input, map, output, v, pool, pending)
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_split<'a, T: Weighted>(
    vertical: bool,
    space: Rect,
    tree: &'a WeightedTree<T>,
    input: NodeId,
    map: &mut LayoutTree<'a, T>,
    output: LayoutId,
    sizes: Vec<f64>,
    pool: &mut ScratchPool<f64>,
    pending: &mut Pending,
) -> Result<()> {
    map.set_split_vertical(output, vertical);

    let children = tree.child_ids(input);
    let queued = pending.len();
    for (&child, &length) in children.iter().zip(sizes.iter()) {
        let out = map.add_child(output, NodeShape::leaf(length), tree.payload(child))?;

        // Right size, wrong place: only the size matters further down,
        // placement is left to bounds generation.
        let sized = if vertical {
            Rect::new(0.0, space.y0, length, space.y1)
        } else {
            Rect::new(space.x0, 0.0, space.x1, length)
        };
        pending.push((sized, child, out));
    }
    pool.free(sizes);

    // First child on top so siblings are divided in order
    pending[queued..].reverse();
    Ok(())
}

/// Measure every node's extent along the split axis for a split in the given
/// direction, writing them into `sizes`. Returns the worst (largest) aspect
/// ratio the split would produce.
pub(crate) fn measure_sizes<T: Weighted>(
    vertical: bool,
    space: Rect,
    tree: &WeightedTree<T>,
    nodes: &[NodeId],
    sizes: &mut [f64],
) -> Result<f64> {
    if nodes.len() > sizes.len() {
        return Err(TreemapError::Argument {
            needed: nodes.len(),
            available: sizes.len(),
        });
    }

    // Every node spans the whole way across the split line
    let across = size_along(space, vertical);

    let mut worst_aspect_ratio = f64::NEG_INFINITY;
    for (slot, &node) in sizes.iter_mut().zip(nodes) {
        let weight = tree.weight(node);
        // Zero weight or zero room leaves a zero-length sliver, the worst shape
        // there is.
        let (length, aspect) = if weight == 0.0 || across == 0.0 {
            (0.0, f64::INFINITY)
        } else {
            let length = weight / across;
            (length, across / length)
        };
        *slot = length;

        if aspect > worst_aspect_ratio {
            worst_aspect_ratio = aspect;
        }
    }

    Ok(worst_aspect_ratio)
}
