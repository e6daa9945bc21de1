//! Strategies for choosing the vantage point of each tree node.
use rand::Rng;

/// Chooses which of `items` becomes the center of the node being built.
///
/// Called once per node, in pre-order (node, inner subtree, outer
/// subtree). The returned index must be smaller than `items.len()`.
pub trait PivotSelector<T> {
    fn select(&mut self, items: &[T]) -> usize;
}

impl<T, G> PivotSelector<T> for G
where
    G: FnMut(&[T]) -> usize,
{
    fn select(&mut self, items: &[T]) -> usize {
        self(items)
    }
}

/// Uniformly random pivot. Uses the thread-local rng, so concurrent
/// builds never share state.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPivot;

impl<T> PivotSelector<T> for RandomPivot {
    fn select(&mut self, items: &[T]) -> usize {
        rand::thread_rng().gen_range(0..items.len())
    }
}

/// Replays a fixed sequence of pivot indices, one per node.
///
/// Once the sequence runs out every further node picks index 0.
#[derive(Clone, Debug)]
pub struct SequencePivot {
    picks: Vec<usize>,
    next: usize,
}

impl SequencePivot {
    pub fn new<I: IntoIterator<Item = usize>>(picks: I) -> Self {
        SequencePivot {
            picks: picks.into_iter().collect(),
            next: 0,
        }
    }

    /// Number of picks not yet consumed.
    pub fn remaining(&self) -> usize {
        self.picks.len().saturating_sub(self.next)
    }
}

impl<T> PivotSelector<T> for SequencePivot {
    fn select(&mut self, _items: &[T]) -> usize {
        let pick = self.picks.get(self.next).copied().unwrap_or(0);
        self.next += 1;
        pick
    }
}
