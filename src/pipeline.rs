//! End-to-end computation: graph → distance matrix → chosen algorithm → report.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::distance::DistanceMatrix;
use crate::exact::ExactHyperbolicity;
use crate::graph::Graph;
use crate::log_approx::{LogApproximation, TreeApproximation};
use crate::shortest_path::ShortestPaths;
use crate::two_factor::TwoFactorApproximation;
use crate::{Error, Result};

/// Which hyperbolicity algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Algorithm {
    /// All bases, \(O(n^4)\).
    #[default]
    #[serde(rename = "Exact Algorithm")]
    Exact,
    /// One base, within a factor of two, \(O(n^3)\).
    #[serde(rename = "Factor-2 Approximation")]
    FactorTwo,
    /// Tree distortion bound, \(O(n^2)\) after shortest paths.
    #[serde(rename = "Log Approximation")]
    Log,
}

impl Algorithm {
    /// All algorithms, in display order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Exact, Algorithm::FactorTwo, Algorithm::Log];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Exact => "Exact Algorithm",
            Algorithm::FactorTwo => "Factor-2 Approximation",
            Algorithm::Log => "Log Approximation",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "exact" | "exact algorithm" => Ok(Algorithm::Exact),
            "factor-2" | "two-factor" | "factor-2 approximation" => Ok(Algorithm::FactorTwo),
            "log" | "log approximation" => Ok(Algorithm::Log),
            _ => Err(Error::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Result of [`compute_hyperbolicity`].
#[derive(Debug, Clone, Serialize)]
pub struct HyperbolicityReport {
    /// Algorithm that produced the value.
    pub algorithm: Algorithm,
    /// δ, or its approximation.
    pub hyperbolicity: f64,
    /// Node names in matrix row order.
    pub node_order: Vec<String>,
    /// All-pairs shortest-path distances.
    pub distance_matrix: DistanceMatrix,
    /// Wall time for shortest paths plus the algorithm.
    #[serde(rename = "elapsed_us", serialize_with = "serialize_micros")]
    pub elapsed: Duration,
    /// Tree completeness record; `None` unless the log approximation ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeApproximation>,
}

impl HyperbolicityReport {
    /// Whether the approximation tree spanned every node, for the log approximation.
    pub fn tree_complete(&self) -> Option<bool> {
        self.tree.as_ref().map(TreeApproximation::is_complete)
    }
}

fn serialize_micros<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
}

/// Compute the hyperbolicity of `graph` with `algorithm`.
pub fn compute_hyperbolicity(graph: &Graph, algorithm: Algorithm) -> Result<HyperbolicityReport> {
    let start = Instant::now();
    let distances = ShortestPaths::new(graph.adjacency())?.compute_all_pairs();
    debug!(
        nodes = distances.len(),
        unreachable_pairs = distances.unreachable_pairs(),
        elapsed = ?start.elapsed(),
        "distance matrix ready"
    );

    let (hyperbolicity, tree) = match algorithm {
        Algorithm::Exact => (
            ExactHyperbolicity::new(&distances)?.compute_exact_hyperbolicity(),
            None,
        ),
        Algorithm::FactorTwo => (
            TwoFactorApproximation::new(&distances)?.compute_approximate_hyperbolicity(),
            None,
        ),
        Algorithm::Log => {
            let result = LogApproximation::new(&distances, graph.adjacency())?
                .compute_approximate_hyperbolicity()?;
            (result.value, Some(result))
        }
    };

    let elapsed = start.elapsed();
    info!(
        %algorithm,
        nodes = graph.len(),
        edges = graph.edge_count(),
        hyperbolicity,
        ?elapsed,
        "hyperbolicity computed"
    );

    Ok(HyperbolicityReport {
        algorithm,
        hyperbolicity,
        node_order: graph.nodes().to_vec(),
        distance_matrix: distances,
        elapsed,
        tree,
    })
}
