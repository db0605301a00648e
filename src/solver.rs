//! Common interface of the exact and approximate solvers.

use crate::error::TspResult;
use crate::matrix::DistanceMatrix;
use crate::solution::Solution;

/// A TSP solver: a deterministic function from a distance matrix to a closed tour.
pub trait TspSolver {
    fn solve(&self, matrix: &DistanceMatrix) -> TspResult<Solution>;
    fn name(&self) -> &str;
}
