//! Adjacency facts derived from a graph
//!
//! Out-degree, in-links and the dangling set, keyed by identifier in graph
//! order. Edges are counted as distinct `(source, target)` pairs and edges
//! with unknown endpoints contribute nothing.

use super::model::Graph;
use super::types::NodeId;
use crate::algo::GraphProjection;
use indexmap::IndexMap;

/// Adjacency facts for one structural version of a graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    pub out_degree: IndexMap<NodeId, usize>,
    pub in_links: IndexMap<NodeId, Vec<NodeId>>,
    pub dangling: Vec<NodeId>,
}

impl Adjacency {
    pub fn new(graph: &Graph) -> Self {
        Self::from_projection(&GraphProjection::new(graph))
    }

    pub fn from_projection(projection: &GraphProjection) -> Self {
        let view = &projection.view;
        let mut out_degree = IndexMap::with_capacity(view.node_count);
        let mut in_links = IndexMap::with_capacity(view.node_count);

        for (idx, id) in projection.index_to_node.iter().enumerate() {
            out_degree.insert(id.clone(), view.out_degree(idx));
            in_links.insert(id.clone(), projection.ids(view.predecessors(idx)));
        }

        Adjacency {
            out_degree,
            in_links,
            dangling: projection.ids(&view.dangling()),
        }
    }

    pub fn is_dangling(&self, id: &NodeId) -> bool {
        self.dangling.contains(id)
    }
}

/// Count of distinct outgoing edges per node
pub fn out_degree(graph: &Graph) -> IndexMap<NodeId, usize> {
    Adjacency::new(graph).out_degree
}

/// Sources of the edges into each node
pub fn in_links(graph: &Graph) -> IndexMap<NodeId, Vec<NodeId>> {
    Adjacency::new(graph).in_links
}

/// Nodes without outgoing edges, in graph order
pub fn dangling_nodes(graph: &Graph) -> Vec<NodeId> {
    Adjacency::new(graph).dangling
}
