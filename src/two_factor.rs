//! Factor-2 approximation: a single well-chosen base.
//!
//! For any base `r`, `δ_r ≤ δ ≤ 2·δ_r`, so one tropical square (\(O(n^3)\)) instead of `n`
//! gives an estimate within a factor of two. The base is the node of largest eccentricity;
//! that choice is a heuristic and only affects how tight the estimate is.

use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::exact::ExactHyperbolicity;
use crate::Result;

/// Factor-2 hyperbolicity estimate.
#[derive(Debug, Clone, Copy)]
pub struct TwoFactorApproximation<'a> {
    engine: ExactHyperbolicity<'a>,
}

impl<'a> TwoFactorApproximation<'a> {
    /// Validate the matrix the same way the exact engine does.
    pub fn new(distances: &'a DistanceMatrix) -> Result<Self> {
        Ok(Self {
            engine: ExactHyperbolicity::new(distances)?,
        })
    }

    /// Largest finite distance from each node. Unreachable pairs are skipped.
    pub fn eccentricities(&self) -> Vec<f64> {
        let d = self.engine.distances();
        (0..d.len()).map(|i| d.eccentricity(i)).collect()
    }

    /// Node with maximum eccentricity (lowest index on ties); `None` for an empty graph.
    pub fn select_base(&self) -> Option<usize> {
        let ecc = self.eccentricities();
        let mut best: Option<(usize, f64)> = None;
        for (i, e) in ecc.into_iter().enumerate() {
            match best {
                Some((_, top)) if e <= top => {}
                _ => best = Some((i, e)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// `2 · δ_r*` for the selected base `r*`; zero for an empty graph.
    pub fn compute_approximate_hyperbolicity(&self) -> f64 {
        let Some(base) = self.select_base() else {
            return 0.0;
        };
        let delta_r = self.engine.delta_for_base(base);
        debug!(base, delta_r, "factor-2 approximation");
        2.0 * delta_r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn c4_is_twice_single_base() {
        let d = DistanceMatrix::from_rows(&[
            [0.0, 1.0, 2.0, 1.0],
            [1.0, 0.0, 1.0, 2.0],
            [2.0, 1.0, 0.0, 1.0],
            [1.0, 2.0, 1.0, 0.0],
        ])
        .unwrap();
        let approx = TwoFactorApproximation::new(&d).unwrap();
        // Every node has eccentricity 2; ties go to the first index.
        assert_eq!(approx.select_base(), Some(0));
        assert_eq!(approx.compute_approximate_hyperbolicity(), 2.0);
    }

    #[test]
    fn picks_first_node_of_maximum_eccentricity() {
        // Path 0-1-2-3 with a pendant 4 on node 1: ends 3 and 4 are at eccentricity 3,
        // node 0 at 3 as well; node 0 comes first.
        let d = DistanceMatrix::from_rows(&[
            [0.0, 1.0, 2.0, 3.0, 2.0],
            [1.0, 0.0, 1.0, 2.0, 1.0],
            [2.0, 1.0, 0.0, 1.0, 2.0],
            [3.0, 2.0, 1.0, 0.0, 3.0],
            [2.0, 1.0, 2.0, 3.0, 0.0],
        ])
        .unwrap();
        let approx = TwoFactorApproximation::new(&d).unwrap();
        assert_eq!(approx.eccentricities(), vec![3.0, 2.0, 2.0, 3.0, 3.0]);
        assert_eq!(approx.select_base(), Some(0));
        // A tree: every base sees δ_r = 0.
        assert_eq!(approx.compute_approximate_hyperbolicity(), 0.0);
    }

    #[test]
    fn equals_twice_compute_for_base_of_selected_node() {
        // Weighted 5-cycle: unequal eccentricities.
        let d = DistanceMatrix::from_rows(&[
            [0.0, 1.0, 3.0, 4.0, 2.0],
            [1.0, 0.0, 2.0, 4.0, 3.0],
            [3.0, 2.0, 0.0, 2.0, 4.0],
            [4.0, 4.0, 2.0, 0.0, 2.0],
            [2.0, 3.0, 4.0, 2.0, 0.0],
        ])
        .unwrap();
        let approx = TwoFactorApproximation::new(&d).unwrap();
        let base = approx.select_base().unwrap();
        let engine = ExactHyperbolicity::new(&d).unwrap();
        assert_eq!(
            approx.compute_approximate_hyperbolicity(),
            2.0 * engine.compute_for_base(base).unwrap()
        );
    }

    #[test]
    fn empty_graph_has_no_base() {
        let d = DistanceMatrix::unreachable(0);
        let approx = TwoFactorApproximation::new(&d).unwrap();
        assert_eq!(approx.select_base(), None);
        assert_eq!(approx.compute_approximate_hyperbolicity(), 0.0);
    }

    #[test]
    fn disconnected_graph_uses_finite_eccentricities() {
        let inf = f64::INFINITY;
        let d = DistanceMatrix::from_rows(&[
            [0.0, 1.0, inf],
            [1.0, 0.0, inf],
            [inf, inf, 0.0],
        ])
        .unwrap();
        let approx = TwoFactorApproximation::new(&d).unwrap();
        assert_eq!(approx.eccentricities(), vec![1.0, 1.0, 0.0]);
        assert_eq!(approx.select_base(), Some(0));
        assert_eq!(approx.compute_approximate_hyperbolicity(), 0.0);
    }

    #[test]
    fn rejects_nonzero_diagonal() {
        let d = DistanceMatrix::from_rows(&[[1.0]]).unwrap();
        assert!(matches!(
            TwoFactorApproximation::new(&d),
            Err(Error::NonZeroDiagonal { index: 0, .. })
        ));
    }
}
