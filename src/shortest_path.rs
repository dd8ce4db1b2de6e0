//! All-pairs shortest paths by repeated Dijkstra.
//!
//! One single-source run per node, each \(O((V + E) \log V)\) with a binary-heap min-queue
//! and lazy invalidation. Sources are independent and each produces only its own output
//! row, so they fan out across the rayon pool.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rayon::prelude::*;
use tracing::debug;

use crate::distance::{Distance, DistanceMatrix};
use crate::{Error, Result};

/// Entry in the Dijkstra priority queue.
///
/// Ordered in reverse so `BinaryHeap` (a max-heap) pops the smallest distance first.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Construction rejects inputs whose simple paths can sum to infinity.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Shortest-path engine over a borrowed adjacency list.
#[derive(Debug, Clone, Copy)]
pub struct ShortestPaths<'a> {
    adjacency: &'a [Vec<(usize, f64)>],
}

impl<'a> ShortestPaths<'a> {
    /// Validate the adjacency list: neighbors in range, weights finite and non-negative, and
    /// no simple path longer than `f64::MAX`.
    pub fn new(adjacency: &'a [Vec<(usize, f64)>]) -> Result<Self> {
        let n = adjacency.len();
        // Heaviest outgoing edge per node, as (u, v, w).
        let mut heaviest: Vec<(usize, usize, f64)> = Vec::new();
        for (u, neighbors) in adjacency.iter().enumerate() {
            let mut top: Option<(usize, f64)> = None;
            for &(v, w) in neighbors {
                if v >= n {
                    return Err(Error::NodeOutOfRange { index: v, len: n });
                }
                if !w.is_finite() || w < 0.0 {
                    return Err(Error::InvalidWeight {
                        edge: format!("{u}-{v}"),
                        weight: w,
                    });
                }
                if top.map_or(true, |(_, t)| w > t) {
                    top = Some((v, w));
                }
            }
            if let Some((v, w)) = top {
                heaviest.push((u, v, w));
            }
        }

        // A simple path leaves at most n - 1 distinct nodes, each by at most its heaviest
        // edge, so the n - 1 heaviest of those bound every shortest distance.
        heaviest.sort_by(|a, b| b.2.total_cmp(&a.2));
        heaviest.truncate(n.saturating_sub(1));
        let mut bound = 0.0_f64;
        for (u, v, w) in heaviest {
            bound += w;
            if !bound.is_finite() {
                return Err(Error::PathLengthOverflow {
                    edge: format!("{u}-{v}"),
                    weight: w,
                });
            }
        }
        Ok(Self { adjacency })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Check if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Distances from `source` to every node.
    pub fn single_source(&self, source: usize) -> Result<Vec<Distance>> {
        if source >= self.len() {
            return Err(Error::NodeOutOfRange {
                index: source,
                len: self.len(),
            });
        }
        Ok(self.dijkstra(source))
    }

    /// The full `n × n` distance matrix.
    pub fn compute_all_pairs(&self) -> DistanceMatrix {
        let n = self.len();
        let mut data = vec![Distance::Unreachable; n * n];
        if n > 0 {
            data.par_chunks_mut(n)
                .enumerate()
                .for_each(|(source, row)| row.copy_from_slice(&self.dijkstra(source)));
        }
        debug!(nodes = n, "computed all-pairs shortest paths");
        DistanceMatrix::from_row_major_unchecked(n, data)
    }

    fn dijkstra(&self, source: usize) -> Vec<Distance> {
        let mut dist = vec![f64::INFINITY; self.len()];
        let mut queue = BinaryHeap::new();

        dist[source] = 0.0;
        queue.push(QueueEntry {
            distance: 0.0,
            node: source,
        });

        while let Some(QueueEntry { distance, node }) = queue.pop() {
            // Stale entry: a shorter path was settled after this one was pushed.
            if distance > dist[node] {
                continue;
            }
            for &(next, weight) in &self.adjacency[node] {
                let candidate = distance + weight;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    queue.push(QueueEntry {
                        distance: candidate,
                        node: next,
                    });
                }
            }
        }

        dist.into_iter().map(Distance::from_f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn path_graph(n: usize) -> Graph {
        let names: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        Graph::from_edges(names.windows(2).map(|w| (w[0].as_str(), w[1].as_str(), 1.0))).unwrap()
    }

    #[test]
    fn path_graph_distances_are_hop_counts() {
        let g = path_graph(5);
        let d = ShortestPaths::new(g.adjacency()).unwrap().compute_all_pairs();
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(d.get(i, j), Distance::Finite((i as f64 - j as f64).abs()));
            }
        }
    }

    #[test]
    fn prefers_lighter_detour() {
        // a-b direct costs 10; a-c-b costs 3.
        let g = Graph::from_edges([("a", "b", 10.0), ("a", "c", 1.0), ("c", "b", 2.0)]).unwrap();
        let sp = ShortestPaths::new(g.adjacency()).unwrap();
        let row = sp.single_source(0).unwrap();
        assert_eq!(row, vec![Distance::ZERO, Distance::Finite(3.0), Distance::Finite(1.0)]);
    }

    #[test]
    fn complete_metric_graph_is_unchanged() {
        // Weights already satisfy the triangle inequality.
        let w = [[0.0, 2.0, 3.0, 4.0], [2.0, 0.0, 2.0, 3.0], [3.0, 2.0, 0.0, 2.0], [4.0, 3.0, 2.0, 0.0]];
        let mut g = Graph::new();
        for i in 0..4 {
            g.add_node(&i.to_string());
        }
        for i in 0..4 {
            for j in i + 1..4 {
                g.add_edge(&i.to_string(), &j.to_string(), w[i][j]).unwrap();
            }
        }
        let d = ShortestPaths::new(g.adjacency()).unwrap().compute_all_pairs();
        assert_eq!(d, DistanceMatrix::from_rows(&w).unwrap());
    }

    #[test]
    fn isolated_node_row_is_unreachable_except_self() {
        let mut g = Graph::from_edges([("a", "b", 1.0)]).unwrap();
        g.add_node("lonely");
        let d = ShortestPaths::new(g.adjacency()).unwrap().compute_all_pairs();
        assert_eq!(d.row(2), [Distance::Unreachable, Distance::Unreachable, Distance::ZERO]);
        assert_eq!(d.get(0, 2), Distance::Unreachable);
        assert!(d.is_symmetric());
        d.check_zero_diagonal().unwrap();
    }

    #[test]
    fn zero_weight_edges_are_allowed() {
        let g = Graph::from_edges([("a", "b", 0.0), ("b", "c", 1.0)]).unwrap();
        let d = ShortestPaths::new(g.adjacency()).unwrap().compute_all_pairs();
        assert_eq!(d.get(0, 2), Distance::Finite(1.0));
        assert_eq!(d.get(0, 1), Distance::ZERO);
    }

    #[test]
    fn rejects_out_of_range_neighbor() {
        let adjacency: Vec<Vec<(usize, f64)>> = vec![vec![(1, 1.0)], vec![(7, 1.0)]];
        assert!(matches!(
            ShortestPaths::new(&adjacency),
            Err(Error::NodeOutOfRange { index: 7, len: 2 })
        ));
    }

    #[test]
    fn rejects_negative_weight() {
        let adjacency: Vec<Vec<(usize, f64)>> = vec![vec![(1, -2.0)], vec![(0, -2.0)]];
        assert!(matches!(
            ShortestPaths::new(&adjacency),
            Err(Error::InvalidWeight { .. })
        ));
    }

    #[test]
    fn rejects_weights_whose_paths_overflow() {
        // Each weight is finite but d(a, c) would be 2e308.
        let g = Graph::from_edges([("a", "b", 1e308), ("b", "c", 1e308)]).unwrap();
        assert!(matches!(
            ShortestPaths::new(g.adjacency()),
            Err(Error::PathLengthOverflow { weight, .. }) if weight == 1e308
        ));
    }

    #[test]
    fn single_huge_edge_stays_reachable() {
        let g = Graph::from_edges([("a", "b", 1e308)]).unwrap();
        let d = ShortestPaths::new(g.adjacency()).unwrap().compute_all_pairs();
        assert_eq!(d.get(0, 1), Distance::Finite(1e308));
        assert_eq!(d.unreachable_pairs(), 0);
    }

    #[test]
    fn single_source_out_of_range() {
        let adjacency: Vec<Vec<(usize, f64)>> = vec![vec![]];
        let sp = ShortestPaths::new(&adjacency).unwrap();
        assert!(matches!(
            sp.single_source(1),
            Err(Error::NodeOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn empty_graph_gives_empty_matrix() {
        let adjacency: Vec<Vec<(usize, f64)>> = Vec::new();
        let d = ShortestPaths::new(&adjacency).unwrap().compute_all_pairs();
        assert!(d.is_empty());
    }
}
