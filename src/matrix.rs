//! Dense symmetric distance matrix and tour cost evaluation.
//!
//! The matrix is the only input of both solvers. It is validated once at
//! construction (every row must have exactly `n` entries) and is read-only
//! afterwards.

use crate::error::{TspError, TspResult};
use serde::{Deserialize, Serialize};

/// An n×n table of edge weights.
///
/// Weights are `f64` even when the input looks integral. The diagonal is
/// conventionally 0 and only ever read for the single-vertex tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build a matrix from its rows.
    ///
    /// Ragged rows fail with [`TspError::DimensionMismatch`], a rectangular
    /// table with more rows than columns (or the reverse) with
    /// [`TspError::NonSquareMatrix`]. An empty table is accepted here; the
    /// solvers reject it with [`TspError::EmptyMatrix`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> TspResult<Self> {
        let columns = rows.first().map_or(0, Vec::len);

        if let Some(row) = rows.iter().find(|r| r.len() != columns) {
            return Err(TspError::DimensionMismatch {
                expected: columns,
                found: row.len(),
            });
        }

        if !rows.is_empty() && columns != rows.len() {
            return Err(TspError::NonSquareMatrix {
                rows: rows.len(),
                columns,
            });
        }

        Ok(DistanceMatrix { rows })
    }

    /// Wrap rows that are square by construction.
    pub(crate) fn from_square_rows(rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == rows.len()));
        DistanceMatrix { rows }
    }

    /// Number of vertices.
    #[inline]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Weight of the edge between `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Fail with [`TspError::EmptyMatrix`] when there is nothing to solve.
    pub fn ensure_not_empty(&self) -> TspResult<()> {
        if self.is_empty() {
            Err(TspError::EmptyMatrix)
        } else {
            Ok(())
        }
    }

    /// Cost of the closed tour visiting `tour` in order and returning to
    /// `tour[0]`.
    ///
    /// The tour must contain exactly `size()` vertices, each in `[0, size())`.
    pub fn tour_cost(&self, tour: &[usize]) -> TspResult<f64> {
        self.ensure_not_empty()?;

        let n = self.size();
        if tour.len() != n {
            return Err(TspError::DimensionMismatch {
                expected: n,
                found: tour.len(),
            });
        }
        if let Some(&index) = tour.iter().find(|&&v| v >= n) {
            return Err(TspError::InvalidIndex { index, size: n });
        }

        Ok(self.cycle_cost(tour))
    }

    /// Unchecked variant of [`tour_cost`](Self::tour_cost) for callers that
    /// build their candidates from `0..size()`.
    #[inline]
    pub(crate) fn cycle_cost(&self, tour: &[usize]) -> f64 {
        let Some((&first, _)) = tour.split_first() else {
            return 0.0;
        };

        let open: f64 = tour
            .windows(2)
            .map(|w| self.distance(w[0], w[1]))
            .sum();

        open + self.distance(tour[tour.len() - 1], first)
    }

    /// `true` if `weight(i, j)` and `weight(j, i)` differ by at most `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.size();
        (0..n).all(|i| (i + 1..n).all(|j| (self.distance(i, j) - self.distance(j, i)).abs() <= tol))
    }

    /// First triple `(i, j, k)` with `w(i, k) > w(i, j) + w(j, k) + tol`, if any.
    ///
    /// The MST heuristic is only guaranteed to stay within twice the optimum
    /// when this returns `None`.
    pub fn triangle_violation(&self, tol: f64) -> Option<(usize, usize, usize)> {
        let n = self.size();
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    if i == j || j == k || i == k {
                        continue;
                    }
                    if self.distance(i, k) > self.distance(i, j) + self.distance(j, k) + tol {
                        return Some((i, j, k));
                    }
                }
            }
        }
        None
    }

    /// Off-diagonal weights of the upper triangle, row by row.
    pub fn upper_triangle(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.size();
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| self.distance(i, j)))
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = TspError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        DistanceMatrix::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line3() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_tour_cost_closes_cycle() {
        let m = line3();
        assert!((m.tour_cost(&[0, 1, 2]).unwrap() - 4.0).abs() < 1e-9);
        assert!((m.tour_cost(&[2, 0, 1]).unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_tour_cost_single_vertex_uses_diagonal() {
        let m = DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap();
        assert_eq!(m.tour_cost(&[0]).unwrap(), 0.0);
    }

    #[test]
    fn test_tour_cost_rejects_bad_tours() {
        let m = line3();
        assert_eq!(
            m.tour_cost(&[0, 1]),
            Err(TspError::DimensionMismatch { expected: 3, found: 2 })
        );
        assert_eq!(
            m.tour_cost(&[0, 1, 5]),
            Err(TspError::InvalidIndex { index: 5, size: 3 })
        );

        let empty = DistanceMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(empty.tour_cost(&[]), Err(TspError::EmptyMatrix));
    }

    #[test]
    fn test_from_rows_shape_errors() {
        let ragged = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]);
        assert_eq!(ragged, Err(TspError::DimensionMismatch { expected: 2, found: 1 }));

        let wide = DistanceMatrix::from_rows(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0]]);
        assert_eq!(wide, Err(TspError::NonSquareMatrix { rows: 2, columns: 3 }));
    }

    #[test]
    fn test_symmetry_and_triangle() {
        let m = line3();
        assert!(m.is_symmetric(1e-12));
        assert_eq!(m.triangle_violation(1e-12), None);

        let skewed = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 9.0],
            vec![1.0, 0.0, 1.0],
            vec![9.0, 2.0, 0.0],
        ])
        .unwrap();
        assert!(!skewed.is_symmetric(1e-12));
        assert!(skewed.triangle_violation(1e-12).is_some());
    }

    #[test]
    fn test_serde_validates_shape() {
        let m = line3();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[0.0,1.0,2.0],[1.0,0.0,1.0],[2.0,1.0,0.0]]");
        let back: DistanceMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        assert!(serde_json::from_str::<DistanceMatrix>("[[0.0,1.0],[1.0]]").is_err());
    }

    #[test]
    fn test_upper_triangle_order() {
        let weights: Vec<f64> = line3().upper_triangle().collect();
        assert_eq!(weights, vec![1.0, 2.0, 1.0]);
    }
}
