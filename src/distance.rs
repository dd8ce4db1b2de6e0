//! Shortest-path distances and the dense distance matrix.
//!
//! Unreachable pairs are a first-class value ([`Distance::Unreachable`]) instead of a floating
//! point infinity, so reductions can skip them by pattern matching and no `∞ - ∞` ever
//! produces a NaN.

use std::cmp::Ordering;
use std::fmt;

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use crate::{Error, Result};

/// A graph distance: finite, or no path at all.
///
/// `Unreachable` compares greater than every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Distance {
    /// Length of a shortest path.
    Finite(f64),
    /// No path exists between the two nodes.
    #[default]
    Unreachable,
}

impl Distance {
    /// Distance from a node to itself.
    pub const ZERO: Distance = Distance::Finite(0.0);

    /// Convert a raw value; any non-finite input (±∞, NaN) becomes `Unreachable`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Distance::Finite(value)
        } else {
            Distance::Unreachable
        }
    }

    /// Check if the target is reachable.
    pub const fn is_reachable(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The finite value, if any.
    pub const fn finite(&self) -> Option<f64> {
        match *self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    /// Raw value with `f64::INFINITY` for unreachable pairs (display/export only).
    pub const fn to_f64(&self) -> f64 {
        match *self {
            Distance::Finite(d) => d,
            Distance::Unreachable => f64::INFINITY,
        }
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.partial_cmp(b),
            (Distance::Finite(_), Distance::Unreachable) => Some(Ordering::Less),
            (Distance::Unreachable, Distance::Finite(_)) => Some(Ordering::Greater),
            (Distance::Unreachable, Distance::Unreachable) => Some(Ordering::Equal),
        }
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Distance::from_f64(value)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => fmt::Display::fmt(d, f),
            Distance::Unreachable => f.write_str("inf"),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            Distance::Finite(d) => serializer.serialize_f64(d),
            Distance::Unreachable => serializer.serialize_none(),
        }
    }
}

/// Dense `n × n` all-pairs distance matrix, row-major.
///
/// Built once per computation and then only borrowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<Distance>,
}

impl DistanceMatrix {
    /// Matrix over `n` nodes with every off-diagonal pair unreachable.
    pub fn unreachable(n: usize) -> Self {
        let mut data = vec![Distance::Unreachable; n * n];
        for i in 0..n {
            data[i * n + i] = Distance::ZERO;
        }
        Self { n, data }
    }

    /// Wrap row-major data. Fails unless `data.len() == n * n`.
    pub fn from_row_major(n: usize, data: Vec<Distance>) -> Result<Self> {
        if data.len() != n * n {
            return Err(Error::InvalidLength {
                expected: n * n,
                actual: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Row-major data whose length the caller has already guaranteed.
    pub(crate) fn from_row_major_unchecked(n: usize, data: Vec<Distance>) -> Self {
        debug_assert_eq!(data.len(), n * n);
        Self { n, data }
    }

    /// Assemble from per-source rows; each row needs one entry per node.
    pub fn from_distance_rows(rows: Vec<Vec<Distance>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(Error::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            data.extend(values);
        }
        Ok(Self { n, data })
    }

    /// Build from raw rows, mapping non-finite entries to [`Distance::Unreachable`].
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|r| r.as_ref().iter().copied().map(Distance::from_f64).collect())
            .collect();
        Self::from_distance_rows(rows)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Check if the matrix has no nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Distance {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of range");
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[Distance] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> {
        // chunks_exact(0) panics; an empty matrix simply has no rows.
        self.data.chunks_exact(self.n.max(1))
    }

    /// The underlying row-major storage.
    pub fn as_slice(&self) -> &[Distance] {
        &self.data
    }

    /// Ensure every diagonal entry is exactly zero.
    pub fn check_zero_diagonal(&self) -> Result<()> {
        match (0..self.n).find(|&i| self.get(i, i) != Distance::ZERO) {
            Some(index) => Err(Error::NonZeroDiagonal {
                index,
                value: self.get(index, index).to_f64(),
            }),
            None => Ok(()),
        }
    }

    /// Check `d(i, j) == d(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Largest finite distance from `i`; 0 for a node that reaches nothing.
    pub fn eccentricity(&self, i: usize) -> f64 {
        self.row(i)
            .iter()
            .filter_map(Distance::finite)
            .fold(0.0, f64::max)
    }

    /// Number of ordered pairs `(i, j)`, `i != j`, with no path.
    pub fn unreachable_pairs(&self) -> usize {
        self.rows()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(j, d)| i != j && !d.is_reachable())
                    .count()
            })
            .sum()
    }

    /// Export as nested rows with `f64::INFINITY` for unreachable pairs.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows()
            .map(|row| row.iter().map(Distance::to_f64).collect())
            .collect()
    }

    /// Convert to an `ndarray` matrix, `f64::INFINITY` for unreachable pairs.
    #[cfg(feature = "ndarray")]
    pub fn to_array2(&self) -> ndarray::Array2<f64> {
        ndarray::Array2::from_shape_fn((self.n, self.n), |(i, j)| self.get(i, j).to_f64())
    }

    /// Build from an `ndarray` matrix; non-finite entries become unreachable.
    #[cfg(feature = "ndarray")]
    pub fn from_array2(a: &ndarray::ArrayView2<'_, f64>) -> Result<Self> {
        let (rows, cols) = a.dim();
        if rows != cols {
            return Err(Error::NotSquare {
                row: 0,
                len: cols,
                expected: rows,
            });
        }
        let data = a.iter().copied().map(Distance::from_f64).collect();
        Self::from_row_major(rows, data)
    }
}

impl Serialize for DistanceMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.n))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for d in row {
                if !first {
                    f.write_str("\t")?;
                }
                first = false;
                match d {
                    Distance::Finite(v) => write!(f, "{v:.2}")?,
                    Distance::Unreachable => f.write_str("inf")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
