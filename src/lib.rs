//! TSP Solver Library
//!
//! Exact and approximate solvers for the symmetric Traveling Salesman Problem
//! on an explicit distance matrix.
//!
//! # Features
//!
//! - Brute-force exact solver (vertex 0 fixed, `(n - 1)!` tours), optionally
//!   parallel with rayon
//! - MST-based 2-approximation (Kruskal + depth-first preorder)
//! - Union-find, minimum spanning tree and preorder traversal primitives
//! - Matrix file loading, reference-optimum extraction, benchmarking
//!
//! # Example
//!
//! ```
//! use tsp_solver::matrix::DistanceMatrix;
//! use tsp_solver::exact::BruteForceSolver;
//! use tsp_solver::heuristics::MstApproximation;
//! use tsp_solver::solver::TspSolver;
//!
//! let matrix = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 1.0, 2.0],
//!     vec![1.0, 0.0, 1.0],
//!     vec![2.0, 1.0, 0.0],
//! ]).unwrap();
//!
//! let exact = BruteForceSolver::new().solve(&matrix).unwrap();
//! let approx = MstApproximation::new().solve(&matrix).unwrap();
//!
//! assert_eq!(exact.cost, 4.0);
//! assert!(approx.cost <= 2.0 * exact.cost);
//! ```

pub mod error;
pub mod matrix;
pub mod solution;
pub mod solver;
pub mod heuristics;
pub mod exact;
pub mod instance;
pub mod report;
pub mod benchmark;

pub use error::{LoadError, TspError, TspResult};
pub use matrix::DistanceMatrix;
pub use solution::Solution;
pub use solver::TspSolver;
pub use instance::TspInstance;
