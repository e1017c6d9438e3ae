//! Projection of an identifier-keyed graph onto the index-based view
//!
//! Algorithms like PageRank iterate over nodes and edges densely. The
//! projection assigns each node a dense index (0..N) in graph order and builds
//! the CSR [`GraphView`] from the edges, so algorithms never touch identifiers.

use crate::graph::{Graph, NodeId};
use indexmap::IndexMap;
use rankwalk_algorithms::GraphView;
use std::collections::HashMap;
use tracing::warn;

/// Mapping nodeId -> value, in graph order
pub type RankVector = IndexMap<NodeId, f64>;

/// A dense, integer-indexed projection of a [`Graph`].
#[derive(Debug, Clone)]
pub struct GraphProjection {
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,
    /// CSR topology over the dense indices
    pub view: GraphView,
}

impl GraphProjection {
    /// Project a graph.
    ///
    /// Nodes with an empty identifier and repeated identifiers are skipped,
    /// as are edges whose endpoints are unknown. Duplicate edges collapse.
    pub fn new(graph: &Graph) -> Self {
        // 1. Build index mappings
        let mut index_to_node = Vec::with_capacity(graph.node_count());
        let mut node_to_index = HashMap::with_capacity(graph.node_count());

        for node in &graph.nodes {
            if !node.id.is_valid() {
                warn!("Skipping node with empty identifier");
                continue;
            }
            if node_to_index.contains_key(&node.id) {
                warn!("Skipping duplicate node identifier {}", node.id);
                continue;
            }
            node_to_index.insert(node.id.clone(), index_to_node.len());
            index_to_node.push(node.id.clone());
        }

        // 2. Resolve edges, dropping the ones we cannot place
        let mut pairs = Vec::with_capacity(graph.edge_count());
        for edge in &graph.edges {
            match (node_to_index.get(&edge.source), node_to_index.get(&edge.target)) {
                (Some(&s), Some(&t)) => pairs.push((s, t)),
                _ => warn!("Ignoring edge {} with unknown endpoint", edge),
            }
        }

        let view = GraphView::from_edges(index_to_node.len(), pairs);

        Self {
            index_to_node,
            node_to_index,
            view,
        }
    }

    pub fn node_count(&self) -> usize {
        self.view.node_count
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.node_to_index.get(id).copied()
    }

    /// Attach identifiers to an index-aligned score vector
    pub fn to_rank_vector(&self, scores: &[f64]) -> RankVector {
        self.index_to_node
            .iter()
            .cloned()
            .zip(scores.iter().copied())
            .collect()
    }

    /// Identifiers for a list of indices
    pub fn ids(&self, indices: &[usize]) -> Vec<NodeId> {
        indices.iter().map(|&i| self.index_to_node[i].clone()).collect()
    }
}
