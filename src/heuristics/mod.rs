//! Heuristics module.
//!
//! The MST approximation and the graph primitives it is built from.

pub mod disjoint_set;
pub mod mst;
pub mod tree_tour;
pub mod mst_approx;

pub use disjoint_set::DisjointSet;
pub use mst::{build_mst, Edge, SpanningTree};
pub use tree_tour::preorder_tour;
pub use mst_approx::*;
