//! The graph value handed to the engine
//!
//! Nodes are kept in insertion order (display order only). Editing helpers
//! apply the default editing policy: no self-loops, no duplicate edges, no
//! edges to unknown nodes. The engine tolerates graphs that break that policy.

use super::edge::Edge;
use super::node::Node;
use super::types::{NodeId, Position};
use crate::error::RankResult;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Directed graph: ordered nodes plus a collection of edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// The part of a graph that determines computation results
///
/// Sorted distinct valid node identifiers and sorted distinct edges between
/// them. Node order, labels and positions do not take part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GraphStructure {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Graph { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn has_edge(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edges
            .iter()
            .any(|e| &e.source == source && &e.target == target)
    }

    /// Add a node. Returns `false` if the identifier is empty or already taken.
    pub fn add_node(&mut self, node: Node) -> bool {
        if !node.id.is_valid() || self.contains(&node.id) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Add an edge under the default editing policy.
    ///
    /// Returns `false` for self-loops, duplicates and unknown endpoints.
    pub fn add_edge(&mut self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> bool {
        let edge = Edge::new(source, target);
        if edge.is_self_loop()
            || self.has_edge(&edge.source, &edge.target)
            || !self.contains(&edge.source)
            || !self.contains(&edge.target)
        {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Remove a node together with every edge touching it
    pub fn remove_node(&mut self, id: &NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| &n.id != id);
        self.edges.retain(|e| &e.source != id && &e.target != id);
        self.nodes.len() != before
    }

    pub fn remove_edge(&mut self, source: &NodeId, target: &NodeId) -> bool {
        let before = self.edges.len();
        self.edges
            .retain(|e| !(&e.source == source && &e.target == target));
        self.edges.len() != before
    }

    pub fn set_position(&mut self, id: &NodeId, position: Position) -> bool {
        match self.nodes.iter_mut().find(|n| &n.id == id) {
            Some(node) => {
                node.position = Some(position);
                true
            }
            None => false,
        }
    }

    pub fn set_label(&mut self, id: &NodeId, label: impl Into<String>) -> bool {
        match self.nodes.iter_mut().find(|n| &n.id == id) {
            Some(node) => {
                node.label = Some(label.into());
                true
            }
            None => false,
        }
    }

    /// Structural fingerprint used to decide whether a run must restart
    pub fn structure(&self) -> GraphStructure {
        let known: FxHashSet<&NodeId> = self
            .nodes
            .iter()
            .map(|n| &n.id)
            .filter(|id| id.is_valid())
            .collect();

        let mut nodes: Vec<NodeId> = known.iter().map(|id| (*id).clone()).collect();
        nodes.sort();

        let mut edges: Vec<(NodeId, NodeId)> = self
            .edges
            .iter()
            .filter(|e| known.contains(&e.source) && known.contains(&e.target))
            .map(|e| (e.source.clone(), e.target.clone()))
            .collect();
        edges.sort();
        edges.dedup();

        GraphStructure { nodes, edges }
    }

    pub fn from_json_str(json: &str) -> RankResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> RankResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json(&self) -> RankResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
