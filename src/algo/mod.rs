//! Graph algorithms module
//!
//! Algorithms are implemented in the `rankwalk-algorithms` crate over dense
//! indices. This module provides the integration/adapter layer: it projects a
//! [`Graph`](crate::graph::Graph), validates configuration, and maps results
//! back to node identifiers.

pub mod centrality;
pub mod common;
pub mod matrix;
pub mod pagerank;

pub use centrality::{
    eigenvector_centrality, in_degree_centrality, ranking, rankings_differ, CentralityMode,
    RankedNode,
};
pub use common::{GraphProjection, RankVector};
pub use matrix::{build_matrices, MatrixSet};
pub use pagerank::{compute_page_rank, rank_sum, PageRankOutcome, RankRecord};

// Re-export the index-level building blocks
pub use rankwalk_algorithms::{format_value, is_column_stochastic, mat_vec, GraphView};
