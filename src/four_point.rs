//! Brute-force four-point condition.
//!
//! For every quadruple, form the three pair sums
//!
//! ```text
//! S1 = d(x,y) + d(z,w),  S2 = d(x,z) + d(y,w),  S3 = d(x,w) + d(y,z)
//! ```
//!
//! and take half the gap between the two largest. δ is the maximum over all quadruples.
//!
//! \(O(n^4)\) and serial. Intended for small inputs and for cross-checking
//! [`crate::ExactHyperbolicity`].

use crate::distance::DistanceMatrix;

/// δ by direct enumeration of unordered quadruples.
///
/// Quadruples with any unreachable pair are skipped; fewer than four nodes gives 0.
pub fn four_point_delta(dist: &DistanceMatrix) -> f64 {
    let n = dist.len();
    let d = |i: usize, j: usize| dist.get(i, j).finite();
    let mut max_delta = 0.0f64;

    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for e in c + 1..n {
                    let sums = (|| {
                        Some([
                            d(a, b)? + d(c, e)?,
                            d(a, c)? + d(b, e)?,
                            d(a, e)? + d(b, c)?,
                        ])
                    })();
                    let Some([mut m1, mut m2, m3]) = sums else {
                        continue;
                    };

                    // Two largest of three.
                    if m1 < m2 {
                        std::mem::swap(&mut m1, &mut m2);
                    }
                    if m2 < m3 {
                        m2 = m3;
                        if m1 < m2 {
                            std::mem::swap(&mut m1, &mut m2);
                        }
                    }

                    max_delta = max_delta.max(0.5 * (m1 - m2));
                }
            }
        }
    }
    max_delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_c4_is_one() {
        let d = DistanceMatrix::from_rows(&[
            [0.0, 1.0, 2.0, 1.0],
            [1.0, 0.0, 1.0, 2.0],
            [2.0, 1.0, 0.0, 1.0],
            [1.0, 2.0, 1.0, 0.0],
        ])
        .unwrap();
        assert_eq!(four_point_delta(&d), 1.0);
    }

    #[test]
    fn star_is_zero() {
        // Center 0 with three leaves.
        let d = DistanceMatrix::from_rows(&[
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 0.0, 2.0, 2.0],
            [1.0, 2.0, 0.0, 2.0],
            [1.0, 2.0, 2.0, 0.0],
        ])
        .unwrap();
        assert_eq!(four_point_delta(&d), 0.0);
    }

    #[test]
    fn cycle_c6_is_one() {
        let n = 6;
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let k = (i as i64 - j as i64).unsigned_abs() as usize;
                        k.min(n - k) as f64
                    })
                    .collect()
            })
            .collect();
        let d = DistanceMatrix::from_rows(&rows).unwrap();
        assert_eq!(four_point_delta(&d), 1.0);
    }

    #[test]
    fn unreachable_quadruples_are_skipped() {
        let inf = f64::INFINITY;
        let d = DistanceMatrix::from_rows(&[
            [0.0, 1.0, 2.0, 1.0, inf],
            [1.0, 0.0, 1.0, 2.0, inf],
            [2.0, 1.0, 0.0, 1.0, inf],
            [1.0, 2.0, 1.0, 0.0, inf],
            [inf, inf, inf, inf, 0.0],
        ])
        .unwrap();
        assert_eq!(four_point_delta(&d), 1.0);
    }

    #[test]
    fn fewer_than_four_nodes_is_zero() {
        let d = DistanceMatrix::from_rows(&[[0.0, 5.0, 1.0], [5.0, 0.0, 9.0], [1.0, 9.0, 0.0]]).unwrap();
        assert_eq!(four_point_delta(&d), 0.0);
    }
}
