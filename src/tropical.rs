//! Square matrices over the (max, min) tropical semiring.
//!
//! Entries are `Option<f64>`: `None` is the semiring zero (\(-\infty\)). It is the identity
//! of `max` and absorbing for `min`, which is exactly the "undefined / disconnected"
//! sentinel a Gromov product needs: it can never win a maximization.
//!
//! The self-product
//!
//! ```text
//! (A ⊗ A)(i, j) = max_k min(A(i, k), A(k, j))
//! ```
//!
//! is \(O(n^3)\). Output row `i` reads only the (shared, immutable) input, so rows are
//! computed independently on the rayon pool.

use rayon::prelude::*;

use crate::{Error, Result};

/// Dense `n × n` matrix over (max, min), row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TropicalMatrix {
    n: usize,
    data: Vec<Option<f64>>,
}

impl TropicalMatrix {
    /// Build entry-by-entry; rows are filled in parallel.
    pub fn from_fn<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> Option<f64> + Sync,
    {
        let mut data = vec![None; n * n];
        if n > 0 {
            data.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = f(i, j);
                }
            });
        }
        Self { n, data }
    }

    /// Wrap row-major data. Fails unless `data.len() == n * n`.
    pub fn from_row_major(n: usize, data: Vec<Option<f64>>) -> Result<Self> {
        if data.len() != n * n {
            return Err(Error::InvalidLength {
                expected: n * n,
                actual: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Number of rows (= columns).
    pub fn len(&self) -> usize {
        self.n
    }

    /// Check if the matrix is `0 × 0`.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Entry `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[Option<f64>] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Tropical self-product `A ⊗ A`.
    pub fn max_min_square(&self) -> TropicalMatrix {
        let n = self.n;
        let mut out = vec![None; n * n];
        if n == 0 {
            return Self { n, data: out };
        }

        let a = &self.data;
        out.par_chunks_mut(n).enumerate().for_each(|(i, out_row)| {
            let a_row = &a[i * n..(i + 1) * n];
            for (k, a_ik) in a_row.iter().enumerate() {
                // min(None, _) = None never raises the max.
                let Some(a_ik) = *a_ik else { continue };
                let a_k = &a[k * n..(k + 1) * n];
                for (cell, &a_kj) in out_row.iter_mut().zip(a_k) {
                    *cell = tropical_max(*cell, tropical_min(Some(a_ik), a_kj));
                }
            }
        });

        Self { n, data: out }
    }
}

/// `min` in the semiring: undefined if either side is.
#[inline]
fn tropical_min(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        _ => None,
    }
}

/// `max` in the semiring: `None` is the identity.
#[inline]
fn tropical_max(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straightforward triple loop written with the scalar semiring ops.
    fn naive_square(a: &TropicalMatrix) -> TropicalMatrix {
        let n = a.len();
        TropicalMatrix::from_fn(n, |i, j| {
            (0..n).fold(None, |acc, k| tropical_max(acc, tropical_min(a.get(i, k), a.get(k, j))))
        })
    }

    #[test]
    fn semiring_identities() {
        assert_eq!(tropical_max(None, Some(-5.0)), Some(-5.0));
        assert_eq!(tropical_max(Some(1.0), None), Some(1.0));
        assert_eq!(tropical_min(None, Some(3.0)), None);
        assert_eq!(tropical_min(Some(2.0), Some(3.0)), Some(2.0));
    }

    #[test]
    fn square_matches_naive_triple_loop() {
        let vals = [
            Some(0.0),
            Some(1.5),
            None,
            Some(2.0),
            Some(1.5),
            Some(3.0),
            Some(0.5),
            None,
            None,
            Some(0.5),
            Some(4.0),
            Some(1.0),
            Some(2.0),
            None,
            Some(1.0),
            Some(2.5),
        ];
        let a = TropicalMatrix::from_row_major(4, vals.to_vec()).unwrap();
        assert_eq!(a.max_min_square(), naive_square(&a));
    }

    #[test]
    fn square_of_all_undefined_stays_undefined() {
        let a = TropicalMatrix::from_fn(3, |_, _| None);
        let sq = a.max_min_square();
        assert!((0..3).all(|i| sq.row(i).iter().all(Option::is_none)));
    }

    #[test]
    fn square_of_empty_matrix_is_empty() {
        let a = TropicalMatrix::from_fn(0, |_, _| Some(1.0));
        assert!(a.max_min_square().is_empty());
    }

    #[test]
    fn from_row_major_checks_length() {
        let err = TropicalMatrix::from_row_major(2, vec![None; 5]).unwrap_err();
        assert!(matches!(err, Error::InvalidLength { expected: 4, actual: 5 }));
    }
}
