use thiserror::Error;

/// Errors raised while building a tree or resolving a shortest path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cannot build a vantage point tree from an empty point set")]
    EmptyPointSet,

    #[error("pivot selector returned index {index} for {len} items")]
    InvalidPivot { index: usize, len: usize },

    #[error("invalid node index: {0}")]
    InvalidNode(usize),

    #[error("edge from node {from} targets missing node {target}")]
    InvalidEdge { from: usize, target: usize },

    #[error("node {to} is unreachable from node {from}")]
    Unreachable { from: usize, to: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
