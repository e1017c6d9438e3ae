//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::BTreeSet;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Nodes are the dense indices `0..node_count`. The edge set is a set of
/// distinct `(source, target)` pairs: duplicates collapse into one edge, so
/// they never inflate an out-degree.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Build a view from `(source, target)` index pairs.
    ///
    /// Pairs with an endpoint outside `0..node_count` are ignored, as are
    /// repeated pairs. Self-loops are kept.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let distinct: BTreeSet<(usize, usize)> = edges
            .into_iter()
            .filter(|&(s, t)| s < node_count && t < node_count)
            .collect();

        let mut outgoing = vec![Vec::new(); node_count];
        let mut incoming = vec![Vec::new(); node_count];
        for (s, t) in distinct {
            outgoing[s].push(t);
            incoming[t].push(s);
        }

        Self::from_adjacency_list(node_count, outgoing, incoming)
    }

    /// Helper to create GraphView from adjacency lists (legacy/test support)
    ///
    /// The lists are taken as-is; callers are responsible for deduplication.
    pub fn from_adjacency_list(
        node_count: usize,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
    ) -> Self {
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Whether the edge `source -> target` exists
    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.successors(source).binary_search(&target).is_ok()
    }

    /// Indices of dangling nodes (out-degree zero), ascending
    pub fn dangling(&self) -> Vec<usize> {
        (0..self.node_count)
            .filter(|&i| self.out_degree(i) == 0)
            .collect()
    }
}
