//! Exhaustive search over all tours starting at vertex 0.
//!
//! Tour cost is rotation invariant, so vertex 0 is fixed in front and the
//! remaining `n - 1` vertices are permuted in lexicographic order. The first
//! candidate with the lowest cost wins.
//!
//! The search space is split by the second vertex of the tour. Each partition
//! is an independent lexicographic block of the full enumeration, so running
//! the partitions on a rayon pool and keeping the first minimum in partition
//! order yields exactly the sequential answer.

use crate::error::TspResult;
use crate::matrix::DistanceMatrix;
use crate::solution::Solution;
use crate::solver::TspSolver;
use itertools::Itertools;
use rayon::prelude::*;
use std::time::Instant;

/// Above this many vertices the exhaustive search stops being practical.
pub const PRACTICAL_MAX_VERTICES: usize = 12;

/// Configuration for the brute-force solver
#[derive(Debug, Clone)]
pub struct ExactConfig {
    /// Search the partitions on the rayon thread pool
    pub parallel: bool,
}

impl Default for ExactConfig {
    fn default() -> Self {
        ExactConfig { parallel: false }
    }
}

/// Best tour found inside one partition of the search space
#[derive(Debug, Clone)]
struct Candidate {
    tour: Vec<usize>,
    cost: f64,
    evaluated: usize,
}

/// Exact solver enumerating all `(n - 1)!` tours
pub struct BruteForceSolver {
    pub config: ExactConfig,
}

impl BruteForceSolver {
    pub fn new() -> Self {
        BruteForceSolver {
            config: ExactConfig::default(),
        }
    }

    pub fn parallel() -> Self {
        BruteForceSolver {
            config: ExactConfig { parallel: true },
        }
    }

    pub fn with_config(config: ExactConfig) -> Self {
        BruteForceSolver { config }
    }

    /// Search every tour of the form `[0, second, ..]`.
    fn search_partition(matrix: &DistanceMatrix, second: usize) -> Candidate {
        let n = matrix.size();
        let rest: Vec<usize> = (1..n).filter(|&v| v != second).collect();

        if rest.is_empty() {
            let tour = vec![0, second];
            return Candidate {
                cost: matrix.cycle_cost(&tour),
                tour,
                evaluated: 1,
            };
        }

        let mut tour = Vec::with_capacity(n);
        let mut best: Option<(Vec<usize>, f64)> = None;
        let mut evaluated = 0;

        for perm in rest.iter().copied().permutations(rest.len()) {
            tour.clear();
            tour.push(0);
            tour.push(second);
            tour.extend(perm);

            let cost = matrix.cycle_cost(&tour);
            evaluated += 1;

            if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
                best = Some((tour.clone(), cost));
            }
        }

        // `rest` is non-empty, so at least one permutation was evaluated
        let (tour, cost) = best.unwrap_or_default();
        Candidate { tour, cost, evaluated }
    }

    fn search(&self, matrix: &DistanceMatrix) -> Candidate {
        let n = matrix.size();
        if n == 1 {
            return Candidate {
                tour: vec![0],
                cost: matrix.cycle_cost(&[0]),
                evaluated: 1,
            };
        }

        let partitions: Vec<Candidate> = if self.config.parallel {
            (1..n)
                .into_par_iter()
                .map(|second| Self::search_partition(matrix, second))
                .collect()
        } else {
            (1..n)
                .map(|second| Self::search_partition(matrix, second))
                .collect()
        };

        let evaluated = partitions.iter().map(|c| c.evaluated).sum();
        let mut best = partitions
            .into_iter()
            .reduce(|best, c| if c.cost < best.cost { c } else { best })
            .unwrap_or(Candidate {
                tour: Vec::new(),
                cost: f64::INFINITY,
                evaluated: 0,
            });
        best.evaluated = evaluated;
        best
    }
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TspSolver for BruteForceSolver {
    fn solve(&self, matrix: &DistanceMatrix) -> TspResult<Solution> {
        matrix.ensure_not_empty()?;

        let start = Instant::now();
        let best = self.search(matrix);
        let elapsed = start.elapsed().as_secs_f64();

        log::debug!(
            "brute force: n={} evaluated={} best={:.4} parallel={}",
            matrix.size(),
            best.evaluated,
            best.cost,
            self.config.parallel
        );

        Ok(Solution {
            tour: best.tour,
            cost: best.cost,
            algorithm: self.name().to_string(),
            computation_time: elapsed,
            iterations: Some(best.evaluated),
        })
    }

    fn name(&self) -> &str {
        if self.config.parallel {
            "BruteForce-Parallel"
        } else {
            "BruteForce"
        }
    }
}

/// Optimal tour by exhaustive sequential search.
pub fn solve_exact(matrix: &DistanceMatrix) -> TspResult<Solution> {
    BruteForceSolver::new().solve(matrix)
}
