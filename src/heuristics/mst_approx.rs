//! MST-based 2-approximation (double-tree heuristic without the doubling).
//!
//! Kruskal's tree, walked in preorder from a fixed root, gives a tour costing
//! at most twice the optimum when the matrix satisfies the triangle
//! inequality. No improvement step is applied afterwards.

use crate::error::TspResult;
use crate::heuristics::mst::build_mst;
use crate::heuristics::tree_tour::preorder_tour;
use crate::matrix::DistanceMatrix;
use crate::solution::Solution;
use crate::solver::TspSolver;
use std::time::Instant;

pub struct MstApproximation {
    /// Vertex the preorder traversal starts from
    pub root: usize,
}

impl MstApproximation {
    pub fn new() -> Self {
        MstApproximation { root: 0 }
    }

    pub fn rooted_at(root: usize) -> Self {
        MstApproximation { root }
    }
}

impl Default for MstApproximation {
    fn default() -> Self {
        Self::new()
    }
}

impl TspSolver for MstApproximation {
    fn solve(&self, matrix: &DistanceMatrix) -> TspResult<Solution> {
        let start = Instant::now();

        let tree = build_mst(matrix)?;
        let tour = preorder_tour(&tree, self.root)?;

        let mut solution = Solution::from_tour(matrix, tour, self.name())?;
        solution.computation_time = start.elapsed().as_secs_f64();

        log::debug!(
            "mst approximation: n={} tree={:.4} tour={:.4}",
            matrix.size(),
            tree.total_weight(),
            solution.cost
        );

        Ok(solution)
    }

    fn name(&self) -> &str {
        "MST-Approximation"
    }
}

/// Heuristic tour from the minimum spanning tree, rooted at vertex 0.
pub fn solve_approx(matrix: &DistanceMatrix) -> TspResult<Solution> {
    MstApproximation::new().solve(matrix)
}
