//! Rankwalk algorithms
//!
//! Index-based topology algorithms over a CSR [`GraphView`]: the
//! power-iteration PageRank engine (run-to-completion and stepwise), the dense
//! `H` / `H'` / `G` matrices used to explain it, and the in-degree and
//! eigenvector centralities used to compare against it.

pub mod common;
pub mod pagerank;
pub mod matrix;
pub mod centrality;

pub use common::GraphView;
pub use pagerank::{
    l1_delta, page_rank, power_step, uniform_scores, IterationRecord, PageRankConfig,
    PageRankResult, PageRankState, PageRankSteps, INITIAL_DELTA,
};
pub use matrix::{
    corrected_matrix, format_value, google_matrix, hyperlink_matrix, is_column_stochastic,
    mat_vec,
};
pub use centrality::{eigenvector_centrality, in_degree_centrality, EigenvectorConfig};
