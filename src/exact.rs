//! Exact δ-hyperbolicity via Gromov products and (max, min) matrix squaring.
//!
//! For a fixed base `r`, build the Gromov product matrix
//!
//! ```text
//! A_r(i, j) = ½ (d(r,i) + d(r,j) − d(i,j))
//! ```
//!
//! and its tropical square. The largest gap `(A_r ⊗ A_r)(i,j) − A_r(i,j)` is the worst
//! four-point violation with `r` as one of the four points. Maximizing over every base gives δ.
//!
//! Cost: \(O(n^3)\) per base, \(O(n^4)\) overall.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::distance::{Distance, DistanceMatrix};
use crate::tropical::TropicalMatrix;
use crate::{Error, Result};

/// Exact hyperbolicity engine over a borrowed distance matrix.
#[derive(Debug, Clone, Copy)]
pub struct ExactHyperbolicity<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> ExactHyperbolicity<'a> {
    /// Validate the matrix (zero diagonal) and wrap it.
    ///
    /// Squareness is guaranteed by [`DistanceMatrix`] itself.
    pub fn new(distances: &'a DistanceMatrix) -> Result<Self> {
        distances.check_zero_diagonal()?;
        Ok(Self { distances })
    }

    /// The borrowed distance matrix.
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Gromov products with respect to base `r`.
    ///
    /// Entries involving an unreachable pair are `None`.
    pub fn gromov_product_matrix(&self, r: usize) -> Result<TropicalMatrix> {
        self.check_base(r)?;
        Ok(self.gromov_products(r))
    }

    /// Tropical self-product `max_k min(A(i,k), A(k,j))`.
    pub fn max_min_product(&self, a: &TropicalMatrix) -> TropicalMatrix {
        a.max_min_square()
    }

    /// δ_r: the worst four-point violation with `r` fixed as one of the points.
    pub fn compute_for_base(&self, r: usize) -> Result<f64> {
        self.check_base(r)?;
        Ok(self.delta_for_base(r))
    }

    /// δ = max over all bases of δ_r. Zero for an empty matrix.
    pub fn compute_exact_hyperbolicity(&self) -> f64 {
        let n = self.len();
        let delta = (0..n)
            .map(|r| {
                let delta_r = self.delta_for_base(r);
                trace!(base = r, delta_r, "base done");
                delta_r
            })
            .fold(0.0, f64::max);
        debug!(nodes = n, delta, "exact hyperbolicity");
        delta
    }

    fn check_base(&self, r: usize) -> Result<()> {
        if r >= self.len() {
            return Err(Error::NodeOutOfRange {
                index: r,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn gromov_products(&self, r: usize) -> TropicalMatrix {
        let d = self.distances;
        let from_r = d.row(r);
        TropicalMatrix::from_fn(d.len(), |i, j| {
            match (from_r[i], from_r[j], d.row(i)[j]) {
                (Distance::Finite(ri), Distance::Finite(rj), Distance::Finite(ij)) => {
                    Some(0.5 * (ri + rj - ij))
                }
                _ => None,
            }
        })
    }

    /// δ_r for a base already known to be in range.
    pub(crate) fn delta_for_base(&self, r: usize) -> f64 {
        let a = self.gromov_products(r);
        let squared = a.max_min_square();
        (0..a.len())
            .into_par_iter()
            .map(|i| {
                a.row(i)
                    .iter()
                    .zip(squared.row(i))
                    .filter_map(|(&a_ij, &sq_ij)| Some(sq_ij? - a_ij?))
                    .fold(0.0, f64::max)
            })
            .reduce(|| 0.0, f64::max)
    }
}
