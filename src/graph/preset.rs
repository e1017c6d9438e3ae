//! Preset graphs
//!
//! Small graphs that each show one PageRank effect, with the ranks the engine
//! converges to at alpha = 0.85 (three decimals).

use super::edge::Edge;
use super::model::Graph;
use super::node::Node;
use super::types::NodeId;
use crate::error::{RankError, RankResult};
use indexmap::IndexMap;

/// A named example graph
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub graph: Graph,
    pub expected_ranks: IndexMap<NodeId, f64>,
}

pub const PRESET_NAMES: [&str; 4] = ["paper-example", "simple-cycle", "star", "rank-sink"];

/// Look up a preset by name
pub fn by_name(name: &str) -> RankResult<Preset> {
    match name {
        "paper-example" => Ok(paper_example()),
        "simple-cycle" => Ok(simple_cycle()),
        "star" => Ok(star()),
        "rank-sink" => Ok(rank_sink()),
        _ => Err(RankError::UnknownPreset(name.to_string())),
    }
}

pub fn all() -> Vec<Preset> {
    vec![paper_example(), simple_cycle(), star(), rank_sink()]
}

fn build(
    nodes: &[(&str, &str, f64, f64)],
    edges: &[(&str, &str)],
    expected: &[(&str, f64)],
) -> (Graph, IndexMap<NodeId, f64>) {
    let nodes = nodes
        .iter()
        .map(|&(id, label, x, y)| Node::new(id).with_label(label).with_position(x, y))
        .collect();
    let edges = edges.iter().map(|&(s, t)| Edge::new(s, t)).collect();
    let expected = expected.iter().map(|&(id, r)| (NodeId::new(id), r)).collect();
    (Graph::from_parts(nodes, edges), expected)
}

/// Four nodes; node 4 only links out and receives teleport mass alone
pub fn paper_example() -> Preset {
    let (graph, expected_ranks) = build(
        &[
            ("1", "1", 100.0, 100.0),
            ("2", "2", 300.0, 100.0),
            ("3", "3", 200.0, 280.0),
            ("4", "4", 400.0, 280.0),
        ],
        &[("1", "2"), ("1", "3"), ("2", "3"), ("3", "1"), ("4", "3")],
        &[("1", 0.373), ("2", 0.196), ("3", 0.394), ("4", 0.038)],
    );
    Preset {
        name: "paper-example",
        description: "4-node graph from the PageRank & Markov chains paper",
        graph,
        expected_ranks,
    }
}

pub fn simple_cycle() -> Preset {
    let (graph, expected_ranks) = build(
        &[
            ("A", "A", 200.0, 80.0),
            ("B", "B", 100.0, 250.0),
            ("C", "C", 300.0, 250.0),
        ],
        &[("A", "B"), ("B", "C"), ("C", "A")],
        &[("A", 0.333), ("B", 0.333), ("C", 0.333)],
    );
    Preset {
        name: "simple-cycle",
        description: "3-node cycle where every node ends with equal rank",
        graph,
        expected_ranks,
    }
}

pub fn star() -> Preset {
    let (graph, expected_ranks) = build(
        &[
            ("hub", "Hub", 220.0, 180.0),
            ("1", "1", 80.0, 80.0),
            ("2", "2", 360.0, 80.0),
            ("3", "3", 80.0, 280.0),
            ("4", "4", 360.0, 280.0),
        ],
        &[("1", "hub"), ("2", "hub"), ("3", "hub"), ("4", "hub")],
        &[("hub", 0.524), ("1", 0.119), ("2", 0.119), ("3", 0.119), ("4", 0.119)],
    );
    Preset {
        name: "star",
        description: "Hub and spokes; the hub collects every spoke's link and is itself dangling",
        graph,
        expected_ranks,
    }
}

pub fn rank_sink() -> Preset {
    let (graph, expected_ranks) = build(
        &[
            ("A", "A", 80.0, 180.0),
            ("B", "B", 200.0, 180.0),
            ("C", "C", 320.0, 180.0),
            ("D", "D (sink)", 440.0, 180.0),
        ],
        &[("A", "B"), ("B", "C"), ("C", "D")],
        &[("A", 0.116), ("B", 0.215), ("C", 0.299), ("D", 0.370)],
    );
    Preset {
        name: "rank-sink",
        description: "Chain ending in a dangling node, which needs teleportation to not swallow all rank",
        graph,
        expected_ranks,
    }
}
