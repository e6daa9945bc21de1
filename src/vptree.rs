//! Vantage-Point Trees are a data structure for fast
//! nearest-neighbor searches.
//!
//! Every walk over the tree uses an explicit stack: duplicate items all
//! fall inside the radius, so a tree can be as deep as it has items.
use std::fmt::{self, Debug, Display};

use crate::error::{Error, Result};
use crate::partition::{partition, Partition};
use crate::pivot::{PivotSelector, RandomPivot};
use crate::point::{MetricItem, Scalar};

/// One node of the tree: a center, and the items split around it.
pub struct VPNode<F: Scalar, T: MetricItem<F>> {
    inner: Option<Box<VPNode<F, T>>>,
    outer: Option<Box<VPNode<F, T>>>,
    center: T,
    mu: F,
}

/// A node whose children are still slots of the build arena.
struct Pending<F, T> {
    center: T,
    mu: F,
    inner: Option<usize>,
    outer: Option<usize>,
}

/// Where a subtree hangs once built.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Inner(usize),
    Outer(usize),
}

impl<F: Scalar, T: MetricItem<F>> VPNode<F, T> {
    /// Split `items` in pre-order (node, inner subtree, outer subtree),
    /// then link the boxes bottom-up.
    fn build<S: PivotSelector<T>>(items: Vec<T>, selector: &mut S) -> Result<VPNode<F, T>> {
        let mut arena: Vec<Pending<F, T>> = Vec::new();
        let mut work = vec![(items, Slot::Root)];

        while let Some((mut items, slot)) = work.pop() {
            let len = items.len();
            let index = selector.select(&items);
            if index >= len {
                return Err(Error::InvalidPivot { index, len });
            }

            // keep the relative order of the rest, so ties split the same way
            // for the same input
            let center = items.remove(index);
            let Partition { inner, outer, radius } = partition(&center, items);

            let id = arena.len();
            match slot {
                Slot::Root => {}
                Slot::Inner(parent) => arena[parent].inner = Some(id),
                Slot::Outer(parent) => arena[parent].outer = Some(id),
            }
            arena.push(Pending { center, mu: radius, inner: None, outer: None });

            if !outer.is_empty() {
                work.push((outer, Slot::Outer(id)));
            }
            if !inner.is_empty() {
                work.push((inner, Slot::Inner(id)));
            }
        }

        // children always sit after their parent in the arena
        let mut built: Vec<Option<Box<VPNode<F, T>>>> = Vec::with_capacity(arena.len());
        built.resize_with(arena.len(), || None);
        while let Some(p) = arena.pop() {
            let id = arena.len();
            let inner = p.inner.and_then(|i| built[i].take());
            let outer = p.outer.and_then(|i| built[i].take());
            built[id] = Some(Box::new(VPNode { inner, outer, center: p.center, mu: p.mu }));
        }

        built
            .first_mut()
            .and_then(Option::take)
            .map(|root| *root)
            .ok_or(Error::EmptyPointSet)
    }

    /// Closest item to `obj` within this subtree.
    ///
    /// The outer subtree is only visited when `obj` is at least half the
    /// radius away from the center; closer than that, the center itself
    /// beats anything beyond the radius. Visiting in pre-order and only
    /// replacing the best on a strictly smaller distance keeps the first
    /// of several equally close items.
    fn nearest<'a>(&'a self, obj: &T) -> &'a T {
        let mut closest = &self.center;
        let mut closest_dist = obj.distance(&self.center);
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            let center_to_obj = obj.distance(&node.center);
            if center_to_obj < closest_dist {
                closest_dist = center_to_obj;
                closest = &node.center;
            }

            let obj_to_circumference = node.mu - center_to_obj;
            if obj_to_circumference <= center_to_obj {
                if let Some(ref outer) = node.outer {
                    stack.push(outer);
                }
            }
            if let Some(ref inner) = node.inner {
                stack.push(inner);
            }
        }

        closest
    }

    /// The vantage point of this node.
    pub fn center(&self) -> &T {
        &self.center
    }

    /// Distance from the center to the farthest item of the inner subtree,
    /// or zero for a leaf.
    pub fn radius(&self) -> F {
        self.mu
    }

    /// Items within `radius` of the center.
    pub fn inner(&self) -> Option<&VPNode<F, T>> {
        self.inner.as_deref()
    }

    /// Items beyond `radius`.
    pub fn outer(&self) -> Option<&VPNode<F, T>> {
        self.outer.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.inner.is_none() && self.outer.is_none()
    }
}

impl<F: Scalar, T: MetricItem<F>> Drop for VPNode<F, T> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<VPNode<F, T>>> = Vec::new();
        stack.extend(self.inner.take());
        stack.extend(self.outer.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.inner.take());
            stack.extend(node.outer.take());
        }
    }
}

/// An immutable vantage point tree.
pub struct VPTree<F: Scalar, T: MetricItem<F>> {
    root: VPNode<F, T>,
    len: usize,
}

impl<F: Scalar, T: MetricItem<F>> VPTree<F, T> {
    /// Construct a new vantage point tree from a set of elements,
    /// choosing every vantage point at random.
    pub fn new(items: Vec<T>) -> Result<VPTree<F, T>> {
        VPTree::with_selector(items, &mut RandomPivot)
    }

    /// Construct a tree, letting `selector` choose the vantage point of
    /// every node.
    pub fn with_selector<S: PivotSelector<T>>(items: Vec<T>, selector: &mut S) -> Result<VPTree<F, T>> {
        let len = items.len();
        if len == 0 {
            return Err(Error::EmptyPointSet);
        }

        let tree = VPTree { root: VPNode::build(items, selector)?, len };
        tracing::debug!(items = len, depth = tree.depth(), "built vantage point tree");

        Ok(tree)
    }

    /// find the nearest neighbor
    pub fn nearest_neighbor(&self, obj: &T) -> &T {
        self.root.nearest(obj)
    }

    pub fn root(&self) -> &VPNode<F, T> {
        &self.root
    }

    /// Number of items stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a tree can only be built from at least one item.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.inner().map(|n| (n, level + 1)));
            stack.extend(node.outer().map(|n| (n, level + 1)));
        }
        deepest
    }

    /// Every stored item, in pre-order.
    pub fn iter(&self) -> Iter<'_, F, T> {
        Iter { stack: vec![&self.root] }
    }

    /// Indented rendering of the tree, for debugging.
    pub fn dump(&self) -> String
    where
        T: Debug,
    {
        self.to_string()
    }
}

/// One line per node, children indented under an `inner:` or `outer:` label.
impl<F: Scalar, T: MetricItem<F> + Debug> Display for VPTree<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(&self.root, 0, None)];
        while let Some((node, level, label)) = stack.pop() {
            if let Some(label) = label {
                writeln!(f, "{:indent$}{}:", "", label, indent = level * 2 - 1)?;
            }
            writeln!(f, "{:indent$}{:?} (mu = {})", "", node.center, node.mu, indent = level * 2)?;
            if let Some(outer) = node.outer() {
                stack.push((outer, level + 1, Some("outer")));
            }
            if let Some(inner) = node.inner() {
                stack.push((inner, level + 1, Some("inner")));
            }
        }
        Ok(())
    }
}

/// Pre-order iterator over the items of a [`VPTree`].
pub struct Iter<'a, F: Scalar, T: MetricItem<F>> {
    stack: Vec<&'a VPNode<F, T>>,
}

impl<'a, F: Scalar, T: MetricItem<F>> Iterator for Iter<'a, F, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        if let Some(outer) = node.outer() {
            self.stack.push(outer);
        }
        if let Some(inner) = node.inner() {
            self.stack.push(inner);
        }
        Some(&node.center)
    }
}

impl<'a, F: Scalar, T: MetricItem<F>> IntoIterator for &'a VPTree<F, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, F, T>;

    fn into_iter(self) -> Iter<'a, F, T> {
        self.iter()
    }
}
