//! Gromov hyperbolicity of weighted graphs.
//!
//! Measure how *tree-like* a graph's shortest-path metric is. Trees have δ = 0; the larger δ,
//! the further the graph is from embedding isometrically into a tree (and the worse a
//! low-dimensional hyperbolic embedding is likely to do).
//!
//! # Which Algorithm Should I Use?
//!
//! | Task | Algorithm | Cost |
//! |------|-----------|------|
//! | **Exact value, small graphs** | [`ExactHyperbolicity`] | \(O(n^4)\) |
//! | **Quick estimate** | [`TwoFactorApproximation`] | \(O(n^3)\) |
//! | **Large graphs, coarse bound** | [`LogApproximation`] | \(O(n^2)\) after APSP |
//! | **Cross-checking on tiny inputs** | [`four_point::four_point_delta`] | \(O(n^4)\), no algebra |
//!
//! All three start from the same [`DistanceMatrix`], computed once by [`ShortestPaths`]
//! (Dijkstra from every source).
//!
//! # Pipeline
//!
//! ```text
//! edge list ──► Graph ──► ShortestPaths ──► DistanceMatrix ──► { Exact | Factor-2 | Log } ──► δ
//! ```
//!
//! [`compute_hyperbolicity`] runs the whole thing for a [`Graph`] and an [`Algorithm`], and
//! returns a [`HyperbolicityReport`] that keeps the distance matrix for inspection.
//!
//! # Mathematical Background
//!
//! For points \(x, y\) and a base \(r\), the Gromov product is
//!
//! ```text
//! (x|y)_r = ½ (d(r,x) + d(r,y) − d(x,y))
//! ```
//!
//! A metric space is δ-hyperbolic when, for every base \(r\) and all \(x, y, z\),
//! \((x|y)_r \ge \min((x|z)_r, (z|y)_r) - δ\). Fixing \(r\) and writing \(A\) for the matrix of
//! Gromov products, the worst violation is read off the (max, min) tropical square of \(A\):
//!
//! ```text
//! δ_r = max_{i,j} ( (A ⊗ A)(i,j) − A(i,j) ),      δ = max_r δ_r
//! ```
//!
//! This is the same quantity as the classical four-point condition: for sums
//! \(S_1 \ge S_2 \ge S_3\) of opposite pair distances, δ is the maximum of \((S_1 - S_2)/2\).
//!
//! # Unreachable Pairs
//!
//! Disconnected graphs are fine. Unreachable pairs are [`Distance::Unreachable`], Gromov
//! products touching them are undefined, and every maximization skips them.
//!
//! # References
//!
//! - Gromov (1987), "Hyperbolic groups" -- δ-hyperbolicity and the four-point condition.
//! - Fournier, Ismail, Vigneron (2015), "Computing the Gromov hyperbolicity of a discrete
//!   metric space" -- the (max, min) product formulation and the factor-2 approximation.
//! - Chepoi, Dragan (2000), "A note on distance approximating trees in graphs" -- the
//!   level-decomposition tree behind [`LogApproximation`].
//! - Chepoi, Dragan, Estellon, Habib, Vaxès (2008), "Diameters, centers, and approximating
//!   trees of δ-hyperbolic geodesic spaces and graphs".

pub mod distance;
pub mod exact;
pub mod four_point;
pub mod graph;
pub mod log_approx;
pub mod parse;
pub mod pipeline;
pub mod shortest_path;
pub mod tropical;
pub mod two_factor;

pub use distance::{Distance, DistanceMatrix};
pub use exact::ExactHyperbolicity;
pub use graph::Graph;
pub use log_approx::{ApproximationTree, LogApproximation, TreeApproximation, UnlinkedComponent};
pub use parse::{load_graph, parse_csv, parse_json};
pub use pipeline::{compute_hyperbolicity, Algorithm, HyperbolicityReport};
pub use shortest_path::ShortestPaths;
pub use tropical::TropicalMatrix;
pub use two_factor::TwoFactorApproximation;

/// Errors raised while loading a graph or setting up a computation.
///
/// Every algorithm validates its input on construction; once construction succeeds the
/// computation itself runs to completion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A row of the distance matrix has the wrong number of entries.
    #[error("distance matrix must be square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Flat matrix storage of the wrong size.
    #[error("matrix storage has {actual} entries, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    /// A node's distance to itself is not zero.
    #[error("diagonal entry ({index}, {index}) must be zero, got {value}")]
    NonZeroDiagonal { index: usize, value: f64 },

    /// Distance matrix and adjacency list (or tree) disagree on the node count.
    #[error("size mismatch: {what} has {actual} nodes, expected {expected}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A node index outside `[0, n)`.
    #[error("node index {index} out of range for {len} nodes")]
    NodeOutOfRange { index: usize, len: usize },

    /// Negative, NaN or infinite edge weight.
    #[error("invalid weight {weight} on edge {edge}: weights must be finite and non-negative")]
    InvalidWeight { edge: String, weight: f64 },

    /// Finite weights whose sum along some simple path exceeds `f64::MAX`.
    #[error("edge {edge} with weight {weight} lets path lengths overflow f64")]
    PathLengthOverflow { edge: String, weight: f64 },

    /// The approximation tree left components without a parent link.
    #[error(
        "approximation tree is incomplete: {unlinked_components} unlinked components, \
         {unleveled_nodes} nodes unreachable from the base"
    )]
    IncompleteTree {
        unlinked_components: usize,
        unleveled_nodes: usize,
    },

    /// Reading a graph file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Graph file is not valid JSON or lacks the `edges` array.
    #[error("malformed JSON graph: {0}")]
    Json(#[from] serde_json::Error),

    /// Graph file extension is neither `.csv` nor `.json`.
    #[error("unsupported graph file format: {0}")]
    UnsupportedFormat(String),

    /// A CSV line that cannot be an edge record.
    #[error("malformed edge record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Algorithm name not recognised.
    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),
}

/// Result type for hyperbolicity computations.
pub type Result<T> = std::result::Result<T, Error>;
