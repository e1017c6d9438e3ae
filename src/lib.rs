//! Rankwalk
//!
//! An interactive PageRank engine: power iteration over a small, user-editable
//! directed graph, run either to completion or one iteration at a time, with
//! dangling-node handling, convergence tracking, the `H` / `H'` / `G` matrices
//! for explanation, and in-degree / eigenvector centrality for comparison.
//!
//! # Architecture
//!
//! - `rankwalk-algorithms`: pure, index-based algorithms over a CSR view
//! - [`graph`]: the graph value, adjacency facts and preset graphs
//! - [`algo`]: adapter mapping identifiers to dense indices and back
//! - [`session`]: the run state machine and the periodic auto-advance task
//! - [`config`] / [`error`]: run configuration and error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rankwalk::graph::{Graph, Node, NodeId};
//! use rankwalk::{compute_page_rank, RankConfig, RankSession, RunState};
//!
//! let mut graph = Graph::new();
//! for id in ["A", "B", "C"] {
//!     graph.add_node(Node::new(id));
//! }
//! graph.add_edge("A", "B");
//! graph.add_edge("B", "C");
//! graph.add_edge("C", "A");
//!
//! // Run to completion
//! let outcome = compute_page_rank(&graph, &RankConfig::default()).unwrap();
//! assert!(outcome.converged);
//! assert!((outcome.ranks[&NodeId::new("A")] - 1.0 / 3.0).abs() < 1e-4);
//!
//! // Or one iteration at a time
//! let mut session = RankSession::with_graph(graph, RankConfig::default()).unwrap();
//! session.step();
//! assert_eq!(session.state(), RunState::Converged);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod graph;
pub mod session;

// Re-export main types for convenience
pub use algo::{
    build_matrices, compute_page_rank, eigenvector_centrality, in_degree_centrality, rank_sum,
    CentralityMode, MatrixSet, PageRankOutcome, RankRecord, RankVector,
};
pub use config::{RankConfig, Speed};
pub use error::{RankError, RankResult};
pub use graph::{Edge, Graph, Node, NodeId, Position};
pub use session::{AutoAdvance, RankSession, RunState, SessionSnapshot, SharedSession};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
