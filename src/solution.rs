//! Solution representation for the symmetric TSP.
//!
//! A solution is a closed tour over every vertex of a [`DistanceMatrix`]
//! together with its cost and some bookkeeping about how it was produced.

use crate::error::TspResult;
use crate::matrix::DistanceMatrix;
use serde::{Deserialize, Serialize};

/// Represents a solution to the TSP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// The tour as a sequence of vertex indices (implicitly closed back to `tour[0]`)
    pub tour: Vec<usize>,
    /// Total tour cost, including the closing edge
    pub cost: f64,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Number of candidate tours evaluated (if applicable)
    pub iterations: Option<usize>,
}

impl Solution {
    /// Create a solution from a tour, evaluating its cost on `matrix`
    pub fn from_tour(matrix: &DistanceMatrix, tour: Vec<usize>, algorithm: &str) -> TspResult<Self> {
        let cost = matrix.tour_cost(&tour)?;

        Ok(Solution {
            tour,
            cost,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
            iterations: None,
        })
    }

    /// Check if every vertex of an `n`-vertex instance is visited exactly once
    pub fn is_complete(&self, n: usize) -> bool {
        if self.tour.len() != n {
            return false;
        }

        let mut seen = vec![false; n];
        for &v in &self.tour {
            if v >= n || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Time: {:.8}s", self.computation_time)?;
        if let Some(iter) = self.iterations {
            writeln!(f, "  Iterations: {}", iter)?;
        }
        writeln!(f, "  Tour: {:?}", self.tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;

    fn square() -> DistanceMatrix {
        let d = std::f64::consts::SQRT_2;
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, d, 1.0],
            vec![1.0, 0.0, 1.0, d],
            vec![d, 1.0, 0.0, 1.0],
            vec![1.0, d, 1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_solution_from_tour() {
        let sol = Solution::from_tour(&square(), vec![0, 1, 2, 3], "test").unwrap();
        assert!((sol.cost - 4.0).abs() < 1e-9);
        assert!(sol.is_complete(4));
        assert_eq!(sol.algorithm, "test");
        assert_eq!(sol.iterations, None);
    }

    #[test]
    fn test_solution_from_invalid_tour() {
        let err = Solution::from_tour(&square(), vec![0, 1, 2], "test").unwrap_err();
        assert_eq!(err, TspError::DimensionMismatch { expected: 4, found: 3 });
    }

    #[test]
    fn test_display() {
        let mut sol = Solution::from_tour(&square(), vec![0, 1, 2, 3], "BruteForce").unwrap();
        sol.iterations = Some(6);
        let text = sol.to_string();
        assert!(text.starts_with("Solution (BruteForce)"));
        assert!(text.contains("Cost: 4.00"));
        assert!(text.contains("Iterations: 6"));
        assert!(text.contains("Tour: [0, 1, 2, 3]"));
    }

    #[test]
    fn test_is_complete_detects_repeats() {
        let mut sol = Solution::from_tour(&square(), vec![0, 1, 2, 3], "test").unwrap();
        sol.tour = vec![0, 1, 1, 3];
        assert!(!sol.is_complete(4));
        sol.tour = vec![0, 1, 2];
        assert!(!sol.is_complete(4));
    }
}
