//! Hamiltonian tour from a spanning tree by depth-first preorder.
//!
//! Walking the tree depth-first traverses each edge twice; keeping only the
//! first visit of every vertex shortcuts that walk into a tour. Neighbors are
//! explored in adjacency-list order, which for trees built by
//! [`build_mst`](super::mst::build_mst) is edge acceptance order.

use crate::error::{TspError, TspResult};
use crate::heuristics::mst::SpanningTree;

/// Vertices of `tree` in depth-first preorder from `root`.
///
/// Uses an explicit stack: children are pushed in reverse so the first
/// neighbor is explored first, matching the recursive traversal.
pub fn preorder_tour(tree: &SpanningTree, root: usize) -> TspResult<Vec<usize>> {
    let n = tree.num_vertices();
    if n == 0 {
        return Err(TspError::EmptyMatrix);
    }
    if root >= n {
        return Err(TspError::InvalidIndex { index: root, size: n });
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut stack = vec![root];

    while let Some(u) = stack.pop() {
        if visited[u] {
            continue;
        }
        visited[u] = true;
        tour.push(u);

        stack.extend(tree.neighbors(u).iter().rev().filter(|&&v| !visited[v]));
    }

    // a disconnected tree would leave vertices behind
    if tour.len() != n {
        return Err(TspError::DimensionMismatch {
            expected: n,
            found: tour.len(),
        });
    }

    Ok(tour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::mst::build_mst;
    use crate::matrix::DistanceMatrix;

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

    /// Recursive reference traversal.
    fn recursive_preorder(tree: &SpanningTree, root: usize) -> Vec<usize> {
        fn visit(tree: &SpanningTree, u: usize, visited: &mut Vec<bool>, tour: &mut Vec<usize>) {
            visited[u] = true;
            tour.push(u);
            for &v in tree.neighbors(u) {
                if !visited[v] {
                    visit(tree, v, visited, tour);
                }
            }
        }

        let mut tour = Vec::new();
        visit(tree, root, &mut vec![false; tree.num_vertices()], &mut tour);
        tour
    }

    #[test]
    fn test_five_d_preorder() {
        let tree = build_mst(&five_d()).unwrap();
        assert_eq!(preorder_tour(&tree, 0).unwrap(), vec![0, 3, 1, 4, 2]);
        assert_eq!(preorder_tour(&tree, 4).unwrap(), vec![4, 1, 0, 3, 2]);
    }

    #[test]
    fn test_matches_recursive_traversal() {
        // star-heavy tree with deep branches
        let n = 9;
        let mut rows = vec![vec![100.0; n]; n];
        for (u, v, w) in [(0, 4, 1.0), (4, 2, 2.0), (0, 1, 3.0), (2, 8, 4.0), (1, 7, 5.0), (4, 5, 6.0), (7, 3, 7.0), (0, 6, 8.0)] {
            rows[u][v] = w;
            rows[v][u] = w;
        }
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        let tree = build_mst(&DistanceMatrix::from_rows(rows).unwrap()).unwrap();

        for root in 0..n {
            assert_eq!(preorder_tour(&tree, root).unwrap(), recursive_preorder(&tree, root));
        }
    }

    #[test]
    fn test_invalid_root() {
        let tree = build_mst(&five_d()).unwrap();
        assert_eq!(
            preorder_tour(&tree, 5),
            Err(TspError::InvalidIndex { index: 5, size: 5 })
        );
        assert_eq!(
            preorder_tour(&SpanningTree::default(), 0),
            Err(TspError::EmptyMatrix)
        );
    }
}
