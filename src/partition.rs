//! Median-distance split of the items around a vantage point.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::point::{MetricItem, Scalar};

/// The two halves of a node's items, and the boundary between them.
pub struct Partition<F, T> {
    /// Items within `radius` of the center, in extraction order.
    pub inner: Vec<T>,
    /// Items strictly further than `radius`.
    pub outer: Vec<T>,
    pub radius: F,
}

/// Heap entry ordered so that `BinaryHeap` pops the closest item first.
struct HeapElem<F: Scalar, T> {
    dist: OrderedFloat<F>,
    item: T,
}

impl<F: Scalar, T> PartialEq for HeapElem<F, T> {
    fn eq(&self, other: &Self) -> bool {
        self.dist.eq(&other.dist)
    }
}

impl<F: Scalar, T> Eq for HeapElem<F, T> {}

impl<F: Scalar, T> PartialOrd for HeapElem<F, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Scalar, T> Ord for HeapElem<F, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.cmp(&self.dist)
    }
}

/// Split `items` around `center`.
///
/// The closest `ceil(n/2)` items go inner, and the distance of the last
/// of them becomes the radius. Everything left over that still lies
/// within the radius (ties at the boundary) also goes inner; the rest go
/// outer. Ties are broken by heap extraction order.
pub fn partition<F, T>(center: &T, items: Vec<T>) -> Partition<F, T>
where
    F: Scalar,
    T: MetricItem<F>,
{
    let n = items.len();
    let mut heap: BinaryHeap<HeapElem<F, T>> = items
        .into_iter()
        .map(|item| HeapElem {
            dist: OrderedFloat(center.distance(&item)),
            item,
        })
        .collect();

    let mut inner = Vec::with_capacity(n);
    let mut outer = Vec::new();
    let mut radius = F::zero();

    for _ in 0..(n + 1) / 2 {
        if let Some(next) = heap.pop() {
            radius = next.dist.into_inner();
            inner.push(next.item);
        }
    }

    while let Some(next) = heap.pop() {
        if next.dist.into_inner() <= radius {
            inner.push(next.item);
        } else {
            outer.push(next.item);
        }
    }

    Partition { inner, outer, radius }
}
