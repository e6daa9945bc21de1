//! Two small in-memory primitives: nearest-point lookup through a
//! vantage point tree, and single-source shortest paths over a weighted
//! directed graph.

mod error;
pub mod graph;
pub mod partition;
pub mod pivot;
pub mod point;
pub mod vptree;

pub use error::{Error, Result};
pub use graph::{Edge, Graph, Node, ShortestPath};
pub use pivot::{PivotSelector, RandomPivot, SequencePivot};
pub use point::{MetricItem, Point, Scalar};
pub use vptree::{VPNode, VPTree};
