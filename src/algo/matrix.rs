//! Matrices for display
//!
//! `H`, `H'` and `G` for graphs small enough to show, with rows and columns
//! in graph order.

use super::common::GraphProjection;
use crate::graph::{Graph, NodeId};
use ndarray::Array2;
use rankwalk_algorithms::{corrected_matrix, google_matrix, hyperlink_matrix};

/// The three matrices of the PageRank model for one graph
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSet {
    /// Row/column labels
    pub ids: Vec<NodeId>,
    pub h: Array2<f64>,
    pub h_prime: Array2<f64>,
    pub g: Array2<f64>,
}

/// Build the matrices, or `None` if the graph has more than `cap` nodes.
pub fn build_matrices(graph: &Graph, alpha: f64, cap: usize) -> Option<MatrixSet> {
    let projection = GraphProjection::new(graph);
    if projection.node_count() > cap {
        return None;
    }

    let h = hyperlink_matrix(&projection.view);
    let h_prime = corrected_matrix(&h);
    let g = google_matrix(&h_prime, alpha);

    Some(MatrixSet {
        ids: projection.index_to_node,
        h,
        h_prime,
        g,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::preset;
    use rankwalk_algorithms::is_column_stochastic;

    #[test]
    fn test_matrices_for_paper_example() {
        let graph = preset::paper_example().graph;
        let set = build_matrices(&graph, 0.85, 8).unwrap();

        assert_eq!(set.ids.len(), 4);
        assert_eq!(set.h[[1, 0]], 0.5);
        // No dangling column, so H' == H
        assert_eq!(set.h, set.h_prime);
        assert!(is_column_stochastic(&set.g, 1e-9));
        assert!((set.g[[0, 0]] - 0.0375).abs() < 1e-12);
    }

    #[test]
    fn test_display_cap() {
        let graph = preset::star().graph;
        assert!(build_matrices(&graph, 0.85, 4).is_none());
        assert!(build_matrices(&graph, 0.85, 5).is_some());
    }
}
