//! Weighted directed graphs and array-based Dijkstra.
use crate::error::{Error, Result};

/// A directed, weighted edge to the node at index `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub weight: u64,
    pub target: usize,
}

impl Edge {
    pub fn new(target: usize, weight: u64) -> Self {
        Edge { weight, target }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub edges: Vec<Edge>,
}

impl Node {
    pub fn new(edges: Vec<Edge>) -> Self {
        Node { edges }
    }
}

/// An adjacency list. Nodes are identified by their position in `nodes`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: Vec<Node>,
}

/// Result of a shortest path query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPath {
    /// Sum of the edge weights along `path`.
    pub weight: u64,
    /// Node indices from the target back to the source, both included.
    pub path: Vec<usize>,
}

impl ShortestPath {
    /// The path ordered from source to target.
    pub fn source_to_target(&self) -> Vec<usize> {
        self.path.iter().rev().copied().collect()
    }
}

/// Working arrays of one Dijkstra run. `None` marks an unreached node.
struct Relaxation {
    weights: Vec<Option<u64>>,
    previous: Vec<Option<usize>>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>) -> Self {
        Graph { nodes }
    }

    /// A graph of `n` nodes and no edges.
    pub fn with_nodes(n: usize) -> Self {
        Graph {
            nodes: vec![Node::default(); n],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add an edge `from -> target`. Both ends must already exist.
    pub fn add_edge(&mut self, from: usize, target: usize, weight: u64) -> Result<()> {
        if target >= self.nodes.len() {
            return Err(Error::InvalidEdge { from, target });
        }
        let node = self.nodes.get_mut(from).ok_or(Error::InvalidNode(from))?;
        node.edges.push(Edge::new(target, weight));
        Ok(())
    }

    /// Minimum total weight from `source` to `target`, and the path that
    /// achieves it.
    pub fn shortest_path(&self, source: usize, target: usize) -> Result<ShortestPath> {
        self.check_node(target)?;
        let Relaxation { weights, previous } = self.relax(source)?;

        let weight = match weights[target] {
            Some(w) => w,
            None => {
                tracing::debug!(from = source, to = target, "target unreachable");
                return Err(Error::Unreachable { from: source, to: target });
            }
        };

        let mut path = vec![target];
        let mut n = target;
        while n != source {
            n = previous[n].ok_or(Error::Unreachable { from: source, to: target })?;
            path.push(n);
        }

        tracing::debug!(from = source, to = target, weight, hops = path.len() - 1, "resolved shortest path");
        Ok(ShortestPath { weight, path })
    }

    /// Shortest distance from `source` to every node; `None` where no path
    /// exists.
    pub fn distances(&self, source: usize) -> Result<Vec<Option<u64>>> {
        Ok(self.relax(source)?.weights)
    }

    fn check_node(&self, index: usize) -> Result<()> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::InvalidNode(index))
        }
    }

    fn check_edges(&self) -> Result<()> {
        for (from, node) in self.nodes.iter().enumerate() {
            if let Some(edge) = node.edges.iter().find(|e| e.target >= self.nodes.len()) {
                return Err(Error::InvalidEdge { from, target: edge.target });
            }
        }
        Ok(())
    }

    /// Unvisited node with the smallest known weight, by linear scan.
    fn frontier(weights: &[Option<u64>], visited: &[bool]) -> Option<(usize, u64)> {
        let mut best: Option<(usize, u64)> = None;
        for (i, w) in weights.iter().enumerate() {
            if let (false, Some(w)) = (visited[i], *w) {
                if best.map_or(true, |(_, b)| w < b) {
                    best = Some((i, w));
                }
            }
        }
        best
    }

    fn relax(&self, source: usize) -> Result<Relaxation> {
        self.check_node(source)?;
        self.check_edges()?;

        let n = self.nodes.len();
        let mut weights = vec![None; n];
        let mut previous = vec![None; n];
        let mut visited = vec![false; n];
        weights[source] = Some(0);

        while let Some((f, frontier_weight)) = Graph::frontier(&weights, &visited) {
            tracing::trace!(node = f, weight = frontier_weight, "visiting frontier node");

            for edge in &self.nodes[f].edges {
                // a sum past u64::MAX can never beat a weight already recorded
                let path_weight = match frontier_weight.checked_add(edge.weight) {
                    Some(w) => w,
                    None => continue,
                };
                if weights[edge.target].map_or(true, |w| path_weight < w) {
                    weights[edge.target] = Some(path_weight);
                    previous[edge.target] = Some(f);
                }
            }
            visited[f] = true;
        }

        Ok(Relaxation { weights, previous })
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, Graph, Node};
    use crate::error::Error;

    fn sample() -> Graph {
        Graph::new(vec![
            Node::new(vec![Edge::new(1, 2), Edge::new(2, 4)]),
            Node::new(vec![Edge::new(3, 7), Edge::new(2, 1)]),
            Node::new(vec![Edge::new(4, 3)]),
            Node::new(vec![Edge::new(5, 1)]),
            Node::new(vec![Edge::new(3, 2), Edge::new(5, 5)]),
            Node::new(vec![]),
        ])
    }

    #[test]
    fn shortest() {
        let sp = sample().shortest_path(0, 5).unwrap();
        assert_eq!(sp.weight, 9);
        assert_eq!(sp.path, vec![5, 3, 4, 2, 1, 0]);
        assert_eq!(sp.source_to_target(), vec![0, 1, 2, 4, 3, 5]);
    }

    #[test]
    fn source_is_target() {
        let sp = sample().shortest_path(2, 2).unwrap();
        assert_eq!(sp.weight, 0);
        assert_eq!(sp.path, vec![2]);
    }

    #[test]
    fn unreachable() {
        let r = sample().shortest_path(5, 0);
        assert_eq!(r, Err(Error::Unreachable { from: 5, to: 0 }));
    }

    #[test]
    fn invalid_indices() {
        let g = sample();
        assert_eq!(g.shortest_path(6, 0), Err(Error::InvalidNode(6)));
        assert_eq!(g.shortest_path(0, 9), Err(Error::InvalidNode(9)));

        let mut bad = sample();
        bad.nodes[3].edges.push(Edge::new(6, 1));
        assert_eq!(bad.shortest_path(0, 5), Err(Error::InvalidEdge { from: 3, target: 6 }));
    }

    #[test]
    fn overflowing_detour_is_skipped() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 2, 5).unwrap();
        g.add_edge(0, 1, u64::MAX).unwrap();
        g.add_edge(1, 2, 1).unwrap();
        let sp = g.shortest_path(0, 2).unwrap();
        assert_eq!(sp.weight, 5);
        assert_eq!(sp.path, vec![2, 0]);
    }

    #[test]
    fn max_weight_target() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 1, u64::MAX).unwrap();
        g.add_edge(1, 2, 1).unwrap();
        let sp = g.shortest_path(0, 1).unwrap();
        assert_eq!(sp.weight, u64::MAX);
        assert_eq!(sp.path, vec![1, 0]);

        // every path to 2 weighs more than u64::MAX
        assert_eq!(g.shortest_path(0, 2), Err(Error::Unreachable { from: 0, to: 2 }));
        assert_eq!(g.distances(0).unwrap(), vec![Some(0), Some(u64::MAX), None]);
    }

    #[test]
    fn zero_weights() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 1, 0).unwrap();
        g.add_edge(1, 2, 0).unwrap();
        g.add_edge(0, 2, 1).unwrap();
        let sp = g.shortest_path(0, 2).unwrap();
        assert_eq!(sp.weight, 0);
        assert_eq!(sp.path, vec![2, 1, 0]);
    }

    #[test]
    fn add_edge_checks_ends() {
        let mut g = Graph::with_nodes(2);
        assert_eq!(g.add_edge(0, 2, 1), Err(Error::InvalidEdge { from: 0, target: 2 }));
        assert_eq!(g.add_edge(3, 1, 1), Err(Error::InvalidNode(3)));
        assert!(g.add_edge(1, 0, 1).is_ok());
        assert_eq!(g.nodes[1].edges, vec![Edge::new(0, 1)]);
    }

    #[test]
    fn distance_table() {
        let d = sample().distances(0).unwrap();
        assert_eq!(d, vec![Some(0), Some(2), Some(3), Some(8), Some(6), Some(9)]);
        let d = sample().distances(3).unwrap();
        assert_eq!(d, vec![None, None, None, Some(0), None, Some(1)]);
    }
}
