//! Centrality comparison
//!
//! In-degree and eigenvector centrality keyed by node id, and the rankings
//! used to put them side by side with PageRank.

use super::common::{GraphProjection, RankVector};
use crate::graph::{Graph, NodeId};
use rankwalk_algorithms::EigenvectorConfig;
use serde::{Deserialize, Serialize};

/// Which score a ranking is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityMode {
    #[default]
    PageRank,
    InDegree,
    Eigenvector,
}

impl CentralityMode {
    pub const ALL: [CentralityMode; 3] = [
        CentralityMode::PageRank,
        CentralityMode::InDegree,
        CentralityMode::Eigenvector,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CentralityMode::PageRank => "PageRank",
            CentralityMode::InDegree => "In-Degree",
            CentralityMode::Eigenvector => "Eigenvector",
        }
    }
}

/// Normalized in-degree (top node = 1, all zeros without edges)
pub fn in_degree_centrality(graph: &Graph) -> RankVector {
    let projection = GraphProjection::new(graph);
    projection.to_rank_vector(&rankwalk_algorithms::in_degree_centrality(&projection.view))
}

/// Undamped eigenvector centrality rescaled to [0, 1]
pub fn eigenvector_centrality(graph: &Graph) -> RankVector {
    let projection = GraphProjection::new(graph);
    projection.to_rank_vector(&rankwalk_algorithms::eigenvector_centrality(
        &projection.view,
        EigenvectorConfig::default(),
    ))
}

/// A node's place in a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    /// 1-based position
    pub position: usize,
    pub id: NodeId,
    pub value: f64,
}

/// Nodes by descending value; ties keep their original order
pub fn ranking(values: &RankVector) -> Vec<RankedNode> {
    let mut entries: Vec<(&NodeId, f64)> = values.iter().map(|(id, &v)| (id, v)).collect();
    // Stable sort keeps graph order among equal values
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (id, value))| RankedNode {
            position: i + 1,
            id: id.clone(),
            value,
        })
        .collect()
}

/// Whether the three orderings disagree anywhere (never for fewer than two nodes)
pub fn rankings_differ(page_rank: &RankVector, in_degree: &RankVector, eigenvector: &RankVector) -> bool {
    if page_rank.len() < 2 {
        return false;
    }
    let order = |values: &RankVector| -> Vec<NodeId> {
        ranking(values).into_iter().map(|r| r.id).collect()
    };
    let reference = order(page_rank);
    reference != order(in_degree) || reference != order(eigenvector)
}
