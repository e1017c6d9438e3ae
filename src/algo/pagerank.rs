//! PageRank over an identifier-keyed graph
//!
//! Validates the configuration, runs the power iteration from
//! `rankwalk-algorithms` to completion and maps every record back to node ids.

use super::common::{GraphProjection, RankVector};
use crate::config::RankConfig;
use crate::error::RankResult;
use crate::graph::Graph;
use rankwalk_algorithms::{page_rank, IterationRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One iteration of a run, keyed by node id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRecord {
    pub iteration: usize,
    pub ranks: RankVector,
    /// L1 distance to the previous iteration (1.0 at iteration 0)
    pub delta: f64,
    pub converged: bool,
}

impl RankRecord {
    pub fn from_iteration(projection: &GraphProjection, record: &IterationRecord) -> Self {
        RankRecord {
            iteration: record.iteration,
            ranks: projection.to_rank_vector(&record.scores),
            delta: record.delta,
            converged: record.converged,
        }
    }
}

/// Result of a run-to-completion computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankOutcome {
    /// Final vector; best effort when `converged` is false
    pub ranks: RankVector,
    pub iterations: usize,
    pub converged: bool,
    pub delta: f64,
    pub history: Vec<RankRecord>,
}

/// Run PageRank until convergence or the iteration cap.
///
/// Fails only on an invalid configuration. An empty graph yields an empty,
/// converged outcome.
pub fn compute_page_rank(graph: &Graph, config: &RankConfig) -> RankResult<PageRankOutcome> {
    config.validate()?;

    let projection = GraphProjection::new(graph);
    let result = page_rank(&projection.view, config.page_rank_config());

    info!(
        "PageRank on {} nodes finished after {} iterations (converged: {}, delta: {:e})",
        projection.node_count(),
        result.iterations,
        result.converged,
        result.delta
    );

    Ok(PageRankOutcome {
        ranks: projection.to_rank_vector(&result.scores),
        iterations: result.iterations,
        converged: result.converged,
        delta: result.delta,
        history: result
            .history
            .iter()
            .map(|r| RankRecord::from_iteration(&projection, r))
            .collect(),
    })
}

/// Total mass of a rank vector; 1 for any non-empty run
pub fn rank_sum(ranks: &RankVector) -> f64 {
    ranks.values().sum()
}
