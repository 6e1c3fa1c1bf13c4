//! Parallel Prim's algorithm over the distance graph
//!
//! The tree grows one node per round. Each round the columns of the matrix
//! are split between the pool's workers; every worker reports the cheapest
//! edge from a node outside the tree into a tree node within its columns, and
//! the coordinator keeps the overall cheapest. Only the coordinator mutates
//! the tree between rounds.

use std::sync::Arc;

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use super::graph::DistanceGraph;
use super::pool::{ColumnRange, WorkerPool};
use crate::config::PartitionMode;
use crate::error::GenError;

/// Graph edge between two node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

/// Symmetric adjacency matrix of the spanning tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree {
    size: usize,
    adjacency: Vec<bool>,
}

impl SpanningTree {
    /// Tree over `size` nodes with no edges yet
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            adjacency: vec![false; size * size],
        }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn link(&mut self, edge: Edge) {
        self.adjacency[edge.from * self.size + edge.to] = true;
        self.adjacency[edge.to * self.size + edge.from] = true;
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        a < self.size && b < self.size && self.adjacency[a * self.size + b]
    }

    /// Number of tree edges touching `node`
    pub fn degree(&self, node: usize) -> usize {
        (0..self.size)
            .filter(|&other| other != node && self.contains(node, other))
            .count()
    }

    /// Each undirected edge once, as `from < to`, row-major
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for from in 0..self.size {
            for to in from + 1..self.size {
                if self.contains(from, to) {
                    edges.push(Edge { from, to });
                }
            }
        }
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Sum of squared-distance weights of the tree edges
    pub fn total_weight(&self, graph: &DistanceGraph) -> i64 {
        self.edges()
            .iter()
            .filter_map(|e| graph.weight(e.from, e.to))
            .sum()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size)
            .all(|a| (0..self.size).all(|b| self.contains(a, b) == self.contains(b, a)))
    }
}

/// Split `[0, n)` into one inclusive column range per worker
///
/// Every worker gets `floor(n / workers)` columns. `Faithful` leaves the
/// highest `n % workers` columns unassigned; `Strict` hands them to the last
/// worker. A worker with no columns gets `None`.
pub fn partition(n: usize, workers: usize, mode: PartitionMode) -> Vec<Option<ColumnRange>> {
    if workers == 0 {
        return Vec::new();
    }
    let size = n / workers;

    (0..workers)
        .map(|i| {
            let start = i * size;
            let end = if mode == PartitionMode::Strict && i + 1 == workers {
                n
            } else {
                start + size
            };
            (end > start).then(|| (start, end - 1))
        })
        .collect()
}

/// Compute the spanning tree of `graph` on `pool`
///
/// Runs exactly `n - 1` rounds. Zero or one node gives an empty tree. A round
/// in which no worker finds an edge means the remaining nodes cannot reach the
/// tree (or, in `Faithful` mode, only through unassigned columns) and fails
/// with [`GenError::MstStalled`].
pub fn find_mst(
    pool: &WorkerPool,
    graph: &Arc<DistanceGraph>,
    mode: PartitionMode,
) -> Result<SpanningTree, GenError> {
    let n = graph.len();
    let mut tree = SpanningTree::empty(n);
    if n <= 1 {
        return Ok(tree);
    }

    let ranges = partition(n, pool.size(), mode);
    let covered = ranges.iter().flatten().map(|(s, e)| e - s + 1).sum::<usize>();
    if covered < n {
        warn!(
            "{} of {n} columns are not assigned to any worker ({mode} partition)",
            n - covered
        );
    }

    let mut labelled = vec![false; n];
    let mut deleted = vec![false; n];
    labelled[0] = true;

    for round in 0..n - 1 {
        let labelled_snapshot: Arc<[bool]> = labelled.as_slice().into();
        let deleted_snapshot: Arc<[bool]> = deleted.as_slice().into();

        let Some((edge, weight)) =
            pool.find_minimum(graph, &labelled_snapshot, &deleted_snapshot, &ranges)?
        else {
            let remaining = labelled.iter().filter(|&&l| !l).count();
            return Err(GenError::MstStalled { round, remaining });
        };

        trace!("round {round}: {} -> {} (weight {weight})", edge.from, edge.to);
        tree.link(edge);
        deleted[edge.from] = true;
        labelled[edge.from] = true;
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::sampler::Point;

    #[test]
    fn test_partition_faithful_leaves_gap() {
        assert_eq!(
            partition(5, 4, PartitionMode::Faithful),
            vec![Some((0, 0)), Some((1, 1)), Some((2, 2)), Some((3, 3))]
        );
        assert_eq!(
            partition(3, 4, PartitionMode::Faithful),
            vec![None, None, None, None]
        );
    }

    #[test]
    fn test_partition_strict_covers_all() {
        assert_eq!(
            partition(5, 4, PartitionMode::Strict),
            vec![Some((0, 0)), Some((1, 1)), Some((2, 2)), Some((3, 4))]
        );
        assert_eq!(
            partition(3, 4, PartitionMode::Strict),
            vec![None, None, None, Some((0, 2))]
        );
        assert_eq!(partition(8, 1, PartitionMode::Strict), vec![Some((0, 7))]);
    }

    #[test]
    fn test_degenerate_trees() {
        let pool = WorkerPool::new(2).unwrap();
        let none = Arc::new(DistanceGraph::build(&[]));
        assert!(find_mst(&pool, &none, PartitionMode::Strict).unwrap().is_empty());

        let one = Arc::new(DistanceGraph::build(&[Point::new(8, 8)]));
        let tree = find_mst(&pool, &one, PartitionMode::Strict).unwrap();
        assert_eq!(tree.edge_count(), 0);
        assert_eq!(tree.degree(0), 0);
    }

    #[test]
    fn test_picks_short_edges() {
        // A row of three points plus one far above the middle one
        let points = [
            Point::new(8, 8),
            Point::new(16, 8),
            Point::new(40, 8),
            Point::new(16, 32),
        ];
        let graph = Arc::new(DistanceGraph::build(&points));
        let pool = WorkerPool::new(3).unwrap();
        let tree = find_mst(&pool, &graph, PartitionMode::Strict).unwrap();

        assert!(tree.contains(0, 1));
        assert!(tree.contains(1, 2));
        assert!(tree.contains(1, 3));
        assert_eq!(tree.total_weight(&graph), 64 + 576 + 576);
        assert_eq!(tree.degree(1), 3);
        assert!(tree.is_symmetric());
    }

    #[test]
    fn test_disconnected_graph_stalls() {
        let points = [Point::new(8, 8), Point::new(8, 16), Point::new(24, 24)];
        let graph = Arc::new(DistanceGraph::build(&points));
        let pool = WorkerPool::new(1).unwrap();
        let err = find_mst(&pool, &graph, PartitionMode::Strict).unwrap_err();
        assert_eq!(
            err,
            GenError::MstStalled {
                round: 1,
                remaining: 1
            }
        );
    }
}
