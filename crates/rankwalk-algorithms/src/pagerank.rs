//! PageRank algorithm implementation
//!
//! Power iteration on the column-stochastic Google matrix
//! `G = αH' + (1-α)(1/n)11ᵀ`, evaluated sparsely over the CSR view:
//!
//! ```text
//! incoming(i) = Σ_{s→i} r(s) / out(s)
//! dangling    = Σ_{d : out(d) = 0} r(d)
//! r'(i)       = α (incoming(i) + dangling / n) + (1 - α) / n
//! ```
//!
//! Two access modes share the same update rule: [`page_rank`] runs to
//! completion, while [`PageRankState`] / [`PageRankSteps`] advance one
//! iteration per call for callers that render intermediate vectors.

use super::common::GraphView;

/// Delta reported for iteration 0, before any iteration has been measured.
pub const INITIAL_DELTA: f64 = 1.0;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// L1 tolerance for convergence
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// One point of a run: the vector after `iteration` applications of the update rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationRecord {
    pub iteration: usize,
    /// Scores indexed like the view's nodes
    pub scores: Vec<f64>,
    /// L1 distance to the previous vector
    pub delta: f64,
    pub converged: bool,
}

/// Result of a run-to-completion computation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankResult {
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub delta: f64,
    /// Records from iteration 0 to the stopping point
    pub history: Vec<IterationRecord>,
}

/// Uniform starting distribution `1/n`
pub fn uniform_scores(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Apply the update rule once.
pub fn power_step(view: &GraphView, scores: &[f64], damping: f64) -> Vec<f64> {
    let n = view.node_count;
    if n == 0 {
        return Vec::new();
    }
    let n_f64 = n as f64;

    let dangling_sum: f64 = (0..n)
        .filter(|&i| view.out_degree(i) == 0)
        .map(|i| scores[i])
        .sum();
    let teleport = (1.0 - damping) / n_f64;

    (0..n)
        .map(|i| {
            let mut sum_incoming = 0.0;

            // Iterate over incoming edges
            for &source_idx in view.predecessors(i) {
                let out_degree = view.out_degree(source_idx);
                if out_degree > 0 {
                    sum_incoming += scores[source_idx] / out_degree as f64;
                }
            }

            damping * (sum_incoming + dangling_sum / n_f64) + teleport
        })
        .collect()
}

/// Sum of absolute per-entry differences
pub fn l1_delta(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Resumable state of a run: the current vector plus the iteration counter.
///
/// Each [`advance`](PageRankState::advance) performs exactly one iteration.
/// Once the run has converged or hit the cap, further advances do nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankState {
    scores: Vec<f64>,
    iteration: usize,
    delta: f64,
    converged: bool,
    exhausted: bool,
}

impl PageRankState {
    /// Iteration 0 for the given view. An empty view starts out converged.
    pub fn new(view: &GraphView) -> Self {
        let n = view.node_count;
        Self {
            scores: uniform_scores(n),
            iteration: 0,
            delta: if n == 0 { 0.0 } else { INITIAL_DELTA },
            converged: n == 0,
            exhausted: false,
        }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// The cap was reached without convergence
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_finished(&self) -> bool {
        self.converged || self.exhausted
    }

    /// Snapshot of the current point. The vector is copied.
    pub fn record(&self) -> IterationRecord {
        IterationRecord {
            iteration: self.iteration,
            scores: self.scores.clone(),
            delta: self.delta,
            converged: self.converged,
        }
    }

    /// Perform one iteration, or return `None` if the run is finished.
    ///
    /// `view` must be the view this state was created for.
    pub fn advance(&mut self, view: &GraphView, config: &PageRankConfig) -> Option<IterationRecord> {
        if self.is_finished() {
            return None;
        }

        let next = power_step(view, &self.scores, config.damping_factor);
        self.delta = l1_delta(&next, &self.scores);
        self.scores = next;
        self.iteration += 1;
        self.converged = self.delta < config.tolerance;
        if !self.converged && self.iteration >= config.max_iterations {
            self.exhausted = true;
        }

        Some(self.record())
    }
}

/// Lazy, finite sequence of iteration records over a borrowed view.
///
/// Yields iterations `1..`; iteration 0 is available from
/// [`initial`](PageRankSteps::initial). The sequence ends after the record
/// that reports convergence or the one that reaches the cap.
pub struct PageRankSteps<'a> {
    view: &'a GraphView,
    config: PageRankConfig,
    state: PageRankState,
}

impl<'a> PageRankSteps<'a> {
    pub fn new(view: &'a GraphView, config: PageRankConfig) -> Self {
        Self {
            view,
            config,
            state: PageRankState::new(view),
        }
    }

    pub fn initial(&self) -> IterationRecord {
        self.state.record()
    }

    pub fn state(&self) -> &PageRankState {
        &self.state
    }

    pub fn into_state(self) -> PageRankState {
        self.state
    }
}

impl Iterator for PageRankSteps<'_> {
    type Item = IterationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.advance(self.view, &self.config)
    }
}

/// Calculate PageRank for the graph view, running until convergence or the cap.
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> PageRankResult {
    let mut steps = PageRankSteps::new(view, config);
    let mut history = vec![steps.initial()];
    history.extend(&mut steps);

    let state = steps.into_state();
    PageRankResult {
        iterations: state.iteration(),
        converged: state.is_converged(),
        delta: state.delta(),
        scores: state.scores,
        history,
    }
}
