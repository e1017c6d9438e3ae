//! Run control
//!
//! [`RankSession`] owns the only long-lived mutable state: the graph snapshot,
//! the in-progress PageRank run and its history. Everything it delegates to is
//! a pure function of the graph.
//!
//! ```text
//! Idle ──set_graph──► Ready ──step──► Stepping ◄──pause── Running
//!                       │                │  └────start────►  │
//!                       └─────start──────┼──────────────────►│
//!                                        ▼                   ▼
//!                              Converged / Exhausted (terminal until reset)
//! ```
//!
//! `reset` returns to `Ready` from any state. Changing the graph structure or
//! the damping factor resets implicitly; moving nodes or changing the speed
//! does not.

pub mod driver;

pub use driver::{AutoAdvance, SharedSession};

use crate::algo::{
    build_matrices, eigenvector_centrality, in_degree_centrality, CentralityMode, GraphProjection,
    MatrixSet, RankRecord, RankVector,
};
use crate::config::{validate_alpha, RankConfig, Speed};
use crate::error::RankResult;
use crate::graph::{Adjacency, Graph, GraphStructure, NodeId, Position};
use rankwalk_algorithms::PageRankState;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// No graph loaded yet
    Idle,
    /// Uniform ranks, iteration 0
    Ready,
    /// Advanced manually, not auto-running
    Stepping,
    /// Auto-advancing on the periodic trigger
    Running,
    /// Converged; no further advances
    Converged,
    /// Iteration cap reached without convergence
    Exhausted,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Converged | RunState::Exhausted)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Ready => "ready",
            RunState::Stepping => "stepping",
            RunState::Running => "running",
            RunState::Converged => "converged",
            RunState::Exhausted => "exhausted",
        };
        write!(f, "{}", name)
    }
}

/// What the display layer needs after each change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: RunState,
    pub iteration: usize,
    pub delta: f64,
    pub converged: bool,
    pub speed: Speed,
    pub ranks: RankVector,
}

/// Stepwise PageRank run over one graph
#[derive(Debug, Clone)]
pub struct RankSession {
    graph: Graph,
    structure: GraphStructure,
    config: RankConfig,
    projection: GraphProjection,
    adjacency: Adjacency,
    in_degree: RankVector,
    eigenvector: RankVector,
    run: PageRankState,
    current: RankRecord,
    history: Vec<RankRecord>,
    state: RunState,
}

impl RankSession {
    /// A session with no graph loaded
    pub fn new(config: RankConfig) -> RankResult<Self> {
        config.validate()?;
        let graph = Graph::new();
        let projection = GraphProjection::new(&graph);
        let run = PageRankState::new(&projection.view);

        Ok(Self {
            structure: graph.structure(),
            adjacency: Adjacency::from_projection(&projection),
            current: RankRecord::from_iteration(&projection, &run.record()),
            graph,
            config,
            projection,
            in_degree: RankVector::new(),
            eigenvector: RankVector::new(),
            run,
            history: Vec::new(),
            state: RunState::Idle,
        })
    }

    /// A session ready to run on `graph`
    pub fn with_graph(graph: Graph, config: RankConfig) -> RankResult<Self> {
        let mut session = Self::new(config)?;
        session.set_graph(graph);
        Ok(session)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn iteration(&self) -> usize {
        self.current.iteration
    }

    pub fn delta(&self) -> f64 {
        self.current.delta
    }

    pub fn is_converged(&self) -> bool {
        self.state == RunState::Converged
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Current vector, in node order as of the last reset. Reordering nodes
    /// in [`set_graph`](Self::set_graph) does not reorder it.
    pub fn ranks(&self) -> &RankVector {
        &self.current.ranks
    }

    pub fn current(&self) -> &RankRecord {
        &self.current
    }

    /// Records from iteration 0 up to the current one
    pub fn history(&self) -> &[RankRecord] {
        &self.history
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn dangling_nodes(&self) -> &[NodeId] {
        &self.adjacency.dangling
    }

    /// Scores for the chosen measure; in-degree and eigenvector do not depend on the run
    pub fn centrality(&self, mode: CentralityMode) -> &RankVector {
        match mode {
            CentralityMode::PageRank => &self.current.ranks,
            CentralityMode::InDegree => &self.in_degree,
            CentralityMode::Eigenvector => &self.eigenvector,
        }
    }

    /// `H`, `H'` and `G` for the current graph, if it is within the display cap
    pub fn matrices(&self) -> Option<MatrixSet> {
        build_matrices(&self.graph, self.config.alpha, self.config.matrix_display_cap)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            iteration: self.current.iteration,
            delta: self.current.delta,
            converged: self.current.converged,
            speed: self.config.speed,
            ranks: self.current.ranks.clone(),
        }
    }

    /// Begin auto-advancing. Returns whether the session is now running.
    pub fn start(&mut self) -> bool {
        match self.state {
            RunState::Ready | RunState::Stepping => {
                debug!("Starting auto-advance at {} speed", self.config.speed);
                self.state = RunState::Running;
                true
            }
            RunState::Running => true,
            RunState::Idle | RunState::Converged | RunState::Exhausted => false,
        }
    }

    /// Stop auto-advancing, keeping the current vector
    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            debug!("Pausing at iteration {}", self.current.iteration);
            self.state = RunState::Stepping;
        }
    }

    /// One manual advance. Ignored while running or once terminal.
    pub fn step(&mut self) -> Option<RankRecord> {
        match self.state {
            RunState::Ready | RunState::Stepping => {
                self.state = RunState::Stepping;
                self.advance()
            }
            _ => None,
        }
    }

    /// One advance on behalf of the periodic trigger; only acts while running.
    pub fn tick(&mut self) -> Option<RankRecord> {
        if self.state != RunState::Running {
            return None;
        }
        self.advance()
    }

    /// Advance until the run converges or exhausts its cap.
    pub fn run_to_convergence(&mut self) -> &RankRecord {
        if matches!(self.state, RunState::Ready | RunState::Stepping | RunState::Running) {
            while self.advance().is_some() {}
        }
        &self.current
    }

    /// Throw the run away and start again from the uniform vector.
    /// Does nothing before a graph is loaded.
    pub fn reset(&mut self) {
        if self.state != RunState::Idle {
            self.restart();
        }
    }

    fn restart(&mut self) {
        self.run = PageRankState::new(&self.projection.view);
        self.current = RankRecord::from_iteration(&self.projection, &self.run.record());
        self.history = vec![self.current.clone()];
        self.state = if self.run.is_converged() {
            RunState::Converged
        } else {
            RunState::Ready
        };
        debug!("Reset run on {} nodes", self.projection.node_count());
    }

    /// Replace the graph snapshot. Returns whether the run was reset.
    ///
    /// Only a change of node identifiers or edges resets; edits to positions,
    /// labels or node order keep the run going.
    pub fn set_graph(&mut self, graph: Graph) -> bool {
        let structure = graph.structure();
        let changed = self.state == RunState::Idle || structure != self.structure;
        self.graph = graph;
        if !changed {
            return false;
        }

        self.structure = structure;
        self.projection = GraphProjection::new(&self.graph);
        self.adjacency = Adjacency::from_projection(&self.projection);
        self.in_degree = in_degree_centrality(&self.graph);
        self.eigenvector = eigenvector_centrality(&self.graph);
        debug!("Graph structure changed");
        self.restart();
        true
    }

    /// Move a node on the canvas; never resets the run
    pub fn set_position(&mut self, id: &NodeId, position: Position) -> bool {
        self.graph.set_position(id, position)
    }

    /// Change the damping factor. Resets when the value changes.
    pub fn set_alpha(&mut self, alpha: f64) -> RankResult<bool> {
        validate_alpha(alpha)?;
        if alpha == self.config.alpha {
            return Ok(false);
        }
        self.config.alpha = alpha;
        self.reset();
        Ok(true)
    }

    /// Replace the configuration. Resets when any run parameter changes;
    /// speed and display cap apply in place.
    pub fn set_config(&mut self, config: RankConfig) -> RankResult<bool> {
        config.validate()?;
        let rerun = config.page_rank_config() != self.config.page_rank_config();
        self.config = config;
        if rerun {
            self.reset();
        }
        Ok(rerun)
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.config.speed = speed;
    }


    fn advance(&mut self) -> Option<RankRecord> {
        let config = self.config.page_rank_config();
        let record = self.run.advance(&self.projection.view, &config)?;
        let record = RankRecord::from_iteration(&self.projection, &record);
        debug!("Iteration {}: delta {:e}", record.iteration, record.delta);

        self.current = record.clone();
        self.history.push(record.clone());

        if self.run.is_converged() {
            info!("Converged after {} iterations", record.iteration);
            self.state = RunState::Converged;
        } else if self.run.is_exhausted() {
            info!(
                "Stopped at the iteration cap ({}) without converging, delta {:e}",
                record.iteration, record.delta
            );
            self.state = RunState::Exhausted;
        }
        Some(record)
    }
}
