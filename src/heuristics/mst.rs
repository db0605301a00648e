//! Minimum spanning tree of the complete graph with Kruskal's algorithm.
//!
//! Candidate edges are all pairs `(i, j)` with `i < j`, enumerated row by row
//! and stable-sorted by weight, so equal weights keep lexicographic `(i, j)`
//! order. This pins down which tree is produced when weights tie.

use crate::error::TspResult;
use crate::heuristics::disjoint_set::DisjointSet;
use crate::matrix::DistanceMatrix;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Undirected weighted edge, `u < v`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub weight: f64,
    pub u: usize,
    pub v: usize,
}

/// Spanning tree stored as adjacency lists.
///
/// Each adjacency list holds neighbors in the order their edges were accepted
/// by Kruskal's algorithm (increasing weight, then lexicographic `(u, v)`).
#[derive(Debug, Clone, Default)]
pub struct SpanningTree {
    adjacency: Vec<Vec<usize>>,
    edges: Vec<Edge>,
}

impl SpanningTree {
    fn with_vertices(n: usize) -> Self {
        SpanningTree {
            adjacency: vec![Vec::new(); n],
            edges: Vec::with_capacity(n.saturating_sub(1)),
        }
    }

    fn add_edge(&mut self, edge: Edge) {
        self.adjacency[edge.u].push(edge.v);
        self.adjacency[edge.v].push(edge.u);
        self.edges.push(edge);
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    /// Accepted edges, in acceptance order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

/// Build a minimum spanning tree over all vertices of `matrix`.
pub fn build_mst(matrix: &DistanceMatrix) -> TspResult<SpanningTree> {
    matrix.ensure_not_empty()?;

    let n = matrix.size();
    let mut candidates: Vec<Edge> = Vec::with_capacity(n * (n - 1) / 2);
    for u in 0..n {
        for v in u + 1..n {
            candidates.push(Edge {
                weight: matrix.distance(u, v),
                u,
                v,
            });
        }
    }

    // stable: ties keep enumeration order
    candidates.sort_by_key(|e| OrderedFloat(e.weight));

    let mut components = DisjointSet::new(n);
    let mut tree = SpanningTree::with_vertices(n);

    for edge in candidates {
        if tree.edges.len() == n - 1 {
            break;
        }
        if components.union(edge.u, edge.v) {
            tree.add_edge(edge);
        }
    }

    log::debug!(
        "kruskal: n={} edges={} weight={:.4}",
        n,
        tree.edges.len(),
        tree.total_weight()
    );

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn five_d() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 3.0, 4.0, 2.0, 7.0],
            vec![3.0, 0.0, 4.0, 6.0, 3.0],
            vec![4.0, 4.0, 0.0, 5.0, 8.0],
            vec![2.0, 6.0, 5.0, 0.0, 6.0],
            vec![7.0, 3.0, 8.0, 6.0, 0.0],
        ])
        .unwrap()
    }

    fn assert_spanning_tree(tree: &SpanningTree, n: usize) {
        assert_eq!(tree.num_vertices(), n);
        assert_eq!(tree.edges().len(), n - 1);

        // n - 1 merging unions over n vertices: connected and acyclic
        let mut ds = DisjointSet::new(n);
        for e in tree.edges() {
            assert!(ds.union(e.u, e.v), "edge {:?} closes a cycle", e);
        }
        assert_eq!(ds.count_sets(), 1);
    }

    #[test]
    fn test_five_d_tree() {
        let tree = build_mst(&five_d()).unwrap();
        assert_spanning_tree(&tree, 5);

        let pairs: Vec<(usize, usize)> = tree.edges().iter().map(|e| (e.u, e.v)).collect();
        assert_eq!(pairs, vec![(0, 3), (0, 1), (1, 4), (0, 2)]);
        assert!((tree.total_weight() - 12.0).abs() < 1e-9);
        assert_eq!(tree.neighbors(0), &[3, 1, 2]);
        assert_eq!(tree.neighbors(1), &[0, 4]);
    }

    #[test]
    fn test_ties_follow_enumeration_order() {
        let m = DistanceMatrix::from_rows(vec![vec![1.0; 4]; 4]).unwrap();
        let tree = build_mst(&m).unwrap();
        let pairs: Vec<(usize, usize)> = tree.edges().iter().map(|e| (e.u, e.v)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_random_trees_are_spanning() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for n in 1..12 {
            let mut rows = vec![vec![0.0; n]; n];
            for i in 0..n {
                for j in i + 1..n {
                    let w: f64 = rng.gen_range(0.0..50.0);
                    rows[i][j] = w;
                    rows[j][i] = w;
                }
            }
            let tree = build_mst(&DistanceMatrix::from_rows(rows).unwrap()).unwrap();
            assert_spanning_tree(&tree, n);
        }
    }

    #[test]
    fn test_single_vertex_and_empty() {
        let tree = build_mst(&DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap()).unwrap();
        assert!(tree.edges().is_empty());
        assert_eq!(tree.num_vertices(), 1);

        let empty = DistanceMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(build_mst(&empty).unwrap_err(), TspError::EmptyMatrix);
    }
}
