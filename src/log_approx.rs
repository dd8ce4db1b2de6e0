//! Tree-based \(O(\log n)\) approximation (Chepoi–Dragan level decomposition).
//!
//! Build an unweighted tree `T` over the same nodes whose distances track the graph's, then
//! bound δ by the worst additive distortion:
//!
//! 1. **Leveling**: `level(v) = round(d(0, v))`, saturating at `u64::MAX`. Only occupied
//!    levels are stored.
//! 2. **Level components**: connected pieces of each level, using only graph edges whose
//!    endpoints share the level. The first node visited represents the piece.
//! 3. **Parent links**: each component at level `k ≥ 1` attaches its representative to the
//!    representative of a component at level `k − 1` that it has an edge to.
//! 4. **Stars**: every other member attaches directly to its representative.
//! 5. **Tree distances**: one BFS per node over `T`.
//! 6. **Bound**: `4 · max |d_G(u,v) − d_T(u,v)|` over pairs finite in both.
//!
//! On weighted graphs, rounding can leave a level with no neighbor one level down, and nodes
//! unreachable from the base get no level at all. Both cases are recorded on the
//! [`ApproximationTree`] and the [`TreeApproximation`] rather than silently producing a
//! forest.

use std::collections::{BTreeMap, VecDeque};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::distance::{Distance, DistanceMatrix};
use crate::{Error, Result};

/// The leveling root.
const BASE_NODE: usize = 0;

/// Multiplicative constant of the approximation theorem.
const DISTORTION_FACTOR: f64 = 4.0;

/// Level of a node at distance `d` from the base.
///
/// Float-to-integer `as` saturates, so distances beyond `u64::MAX` share the top level.
fn level_of(d: f64) -> u64 {
    d.round() as u64
}

/// A level component that found no edge to the level below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnlinkedComponent {
    /// Level of the component.
    pub level: u64,
    /// Its representative node.
    pub representative: usize,
    /// Number of member nodes.
    pub size: usize,
}

/// Unweighted tree over the graph's node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproximationTree {
    adjacency: Vec<Vec<usize>>,
    unlinked: Vec<UnlinkedComponent>,
    unleveled: usize,
}

impl ApproximationTree {
    fn with_nodes(n: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); n],
            unlinked: Vec::new(),
            unleveled: 0,
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Tree neighbors of `node`.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Number of undirected tree edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Components left without a parent link.
    pub fn unlinked_components(&self) -> &[UnlinkedComponent] {
        &self.unlinked
    }

    /// Nodes with no path from the base, which received no level.
    pub fn unleveled_nodes(&self) -> usize {
        self.unleveled
    }

    /// True when every node hangs off the base: `n − 1` edges, connected, acyclic.
    pub fn is_complete(&self) -> bool {
        self.unlinked.is_empty() && self.unleveled == 0
    }

    /// Hop distances from `source` over tree edges.
    pub fn bfs_from(&self, source: usize) -> Result<Vec<Distance>> {
        let n = self.num_nodes();
        if source >= n {
            return Err(Error::NodeOutOfRange {
                index: source,
                len: n,
            });
        }

        let mut hops: Vec<Option<usize>> = vec![None; n];
        let mut queue = VecDeque::new();
        hops[source] = Some(0);
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            let next = hops[u].map_or(0, |h| h + 1);
            for &v in &self.adjacency[u] {
                if v >= n {
                    return Err(Error::NodeOutOfRange { index: v, len: n });
                }
                if hops[v].is_none() {
                    hops[v] = Some(next);
                    queue.push_back(v);
                }
            }
        }

        Ok(hops
            .into_iter()
            .map(|h| h.map_or(Distance::Unreachable, |h| Distance::Finite(h as f64)))
            .collect())
    }
}

/// Outcome of the log approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TreeApproximation {
    /// `4 · max_diff`.
    pub value: f64,
    /// Components of the tree without a parent link.
    pub unlinked_components: usize,
    /// Nodes unreachable from the base.
    pub unleveled_nodes: usize,
}

impl TreeApproximation {
    fn trivial() -> Self {
        Self {
            value: 0.0,
            unlinked_components: 0,
            unleveled_nodes: 0,
        }
    }

    /// True when the value was computed on a spanning tree.
    pub fn is_complete(&self) -> bool {
        self.unlinked_components == 0 && self.unleveled_nodes == 0
    }

    /// The value, or [`Error::IncompleteTree`] if the tree was degraded.
    pub fn require_complete(self) -> Result<f64> {
        if self.is_complete() {
            Ok(self.value)
        } else {
            Err(Error::IncompleteTree {
                unlinked_components: self.unlinked_components,
                unleveled_nodes: self.unleveled_nodes,
            })
        }
    }
}

/// A connected piece of one level.
#[derive(Debug)]
struct LevelComponent {
    level: u64,
    /// BFS discovery order; `members[0]` is the representative.
    members: Vec<usize>,
}

/// Log-approximation over a borrowed distance matrix and the graph it came from.
#[derive(Debug, Clone, Copy)]
pub struct LogApproximation<'a> {
    distances: &'a DistanceMatrix,
    adjacency: &'a [Vec<(usize, f64)>],
}

impl<'a> LogApproximation<'a> {
    /// Check that matrix and adjacency list describe the same `n` nodes.
    pub fn new(distances: &'a DistanceMatrix, adjacency: &'a [Vec<(usize, f64)>]) -> Result<Self> {
        let n = distances.len();
        if adjacency.len() != n {
            return Err(Error::SizeMismatch {
                what: "adjacency list",
                expected: n,
                actual: adjacency.len(),
            });
        }
        if let Some(&(index, _)) = adjacency.iter().flatten().find(|&&(v, _)| v >= n) {
            return Err(Error::NodeOutOfRange { index, len: n });
        }
        Ok(Self {
            distances,
            adjacency,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Build the level-decomposition tree.
    pub fn construct_approximation_tree(&self) -> ApproximationTree {
        let n = self.len();
        let mut tree = ApproximationTree::with_nodes(n);
        if n == 0 {
            return tree;
        }

        // Sparse: only occupied levels are stored, however large the distances.
        let mut level: Vec<Option<u64>> = vec![None; n];
        let mut levels: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
        for (v, d) in self.distances.row(BASE_NODE).iter().enumerate() {
            let Some(d) = d.finite() else {
                tree.unleveled += 1;
                continue;
            };
            let k = level_of(d);
            levels.entry(k).or_default().push(v);
            level[v] = Some(k);
        }

        let (components, component_of) = self.level_components(&levels, &level);

        let adjacency = self.adjacency;
        for component in &components {
            let rep = component.members[0];
            if let Some(below) = component.level.checked_sub(1) {
                let below = Some(below);
                let parent = component
                    .members
                    .iter()
                    .flat_map(move |&u| &adjacency[u])
                    .find(|&&(v, _)| level[v] == below)
                    .and_then(|&(v, _)| component_of[v])
                    .map(|id| components[id].members[0]);
                match parent {
                    Some(parent_rep) => tree.add_edge(rep, parent_rep),
                    None => self.record_unlinked(&mut tree, component),
                }
            } else if rep != BASE_NODE {
                self.record_unlinked(&mut tree, component);
            }

            for &member in &component.members[1..] {
                tree.add_edge(rep, member);
            }
        }

        debug!(
            nodes = n,
            levels = levels.len(),
            components = components.len(),
            edges = tree.edge_count(),
            complete = tree.is_complete(),
            "approximation tree built"
        );
        tree
    }

    /// All-pairs hop distances in `tree`, one parallel BFS per source.
    pub fn tree_distances(&self, tree: &ApproximationTree) -> Result<DistanceMatrix> {
        let n = self.len();
        if tree.num_nodes() != n {
            return Err(Error::SizeMismatch {
                what: "approximation tree",
                expected: n,
                actual: tree.num_nodes(),
            });
        }
        let rows = (0..n)
            .into_par_iter()
            .map(|source| tree.bfs_from(source))
            .collect::<Result<Vec<_>>>()?;
        DistanceMatrix::from_distance_rows(rows)
    }

    /// `4 · max |d_G − d_T|`, with the tree's completeness. Zero for `n ≤ 1`.
    pub fn compute_approximate_hyperbolicity(&self) -> Result<TreeApproximation> {
        let n = self.len();
        if n <= 1 {
            return Ok(TreeApproximation::trivial());
        }

        let tree = self.construct_approximation_tree();
        let tree_distances = self.tree_distances(&tree)?;

        let max_diff = (0..n)
            .into_par_iter()
            .map(|i| {
                self.distances
                    .row(i)
                    .iter()
                    .zip(tree_distances.row(i))
                    .filter_map(|(g, t)| Some((g.finite()? - t.finite()?).abs()))
                    .fold(0.0, f64::max)
            })
            .reduce(|| 0.0, f64::max);

        let result = TreeApproximation {
            value: DISTORTION_FACTOR * max_diff,
            unlinked_components: tree.unlinked_components().len(),
            unleveled_nodes: tree.unleveled_nodes(),
        };
        debug!(max_diff, value = result.value, "log approximation");
        Ok(result)
    }

    /// Split each level into components connected by same-level edges.
    ///
    /// Returns the components and, per node, the index of its component.
    fn level_components(
        &self,
        levels: &BTreeMap<u64, Vec<usize>>,
        level: &[Option<u64>],
    ) -> (Vec<LevelComponent>, Vec<Option<usize>>) {
        let mut components = Vec::new();
        let mut component_of: Vec<Option<usize>> = vec![None; level.len()];

        for (&k, nodes) in levels {
            for &start in nodes {
                if component_of[start].is_some() {
                    continue;
                }
                let id = components.len();
                let mut members = Vec::new();
                let mut queue = VecDeque::from([start]);
                component_of[start] = Some(id);

                while let Some(u) = queue.pop_front() {
                    members.push(u);
                    for &(v, _) in &self.adjacency[u] {
                        if level[v] == Some(k) && component_of[v].is_none() {
                            component_of[v] = Some(id);
                            queue.push_back(v);
                        }
                    }
                }
                components.push(LevelComponent { level: k, members });
            }
        }
        (components, component_of)
    }

    fn record_unlinked(&self, tree: &mut ApproximationTree, component: &LevelComponent) {
        let unlinked = UnlinkedComponent {
            level: component.level,
            representative: component.members[0],
            size: component.members.len(),
        };
        warn!(
            level = unlinked.level,
            representative = unlinked.representative,
            size = unlinked.size,
            "level component has no parent one level down; approximation tree is incomplete"
        );
        tree.unlinked.push(unlinked);
    }
}
