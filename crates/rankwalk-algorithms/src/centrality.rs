//! Alternative centrality measures, for comparison against PageRank
//!
//! Neither measure damps or corrects for dangling nodes. Eigenvector
//! centrality in particular may oscillate, or collapse to all zeros, on
//! graphs whose adjacency matrix is not irreducible (e.g. a DAG); that is the
//! expected behavior of the plain power method and is left as-is.

use super::common::GraphView;

/// Smallest divisor used when rescaling eigenvector scores to [0, 1]
const EIGENVECTOR_MAX_FLOOR: f64 = 1e-3;

/// In-degree divided by the maximum in-degree (divisor floored at 1).
pub fn in_degree_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    let max_degree = (0..n).map(|i| view.in_degree(i)).max().unwrap_or(0).max(1);

    (0..n)
        .map(|i| view.in_degree(i) as f64 / max_degree as f64)
        .collect()
}

/// Eigenvector centrality configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenvectorConfig {
    pub max_iterations: usize,
    /// L1 tolerance between successive unit vectors
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Eigenvector centrality via power iteration over in-links, rescaled so the top node is 1.
pub fn eigenvector_centrality(view: &GraphView, config: EigenvectorConfig) -> Vec<f64> {
    let n = view.node_count;
    if n == 0 {
        return Vec::new();
    }

    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0; n];

    for _ in 0..config.max_iterations {
        for (i, value) in next.iter_mut().enumerate() {
            *value = view.predecessors(i).iter().map(|&s| scores[s]).sum();
        }

        let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
        let norm = if norm > 0.0 { norm } else { 1.0 };

        let mut diff = 0.0;
        for (value, old) in next.iter_mut().zip(&scores) {
            *value /= norm;
            diff += (*value - old).abs();
        }

        std::mem::swap(&mut scores, &mut next);

        if diff < config.tolerance {
            break;
        }
    }

    let max = scores.iter().cloned().fold(EIGENVECTOR_MAX_FLOOR, f64::max);
    scores.into_iter().map(|v| v / max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_in_degree_normalized() {
        // 0 -> 2, 1 -> 2, 2 -> 0
        let view = GraphView::from_edges(3, vec![(0, 2), (1, 2), (2, 0)]);
        let scores = in_degree_centrality(&view);

        assert_eq!(scores, vec![0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_in_degree_no_edges() {
        let view = GraphView::from_edges(4, Vec::new());
        assert_eq!(in_degree_centrality(&view), vec![0.0; 4]);
    }

    #[test]
    fn test_in_degree_bounds_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in 1..=12 {
            let edges: Vec<_> = (0..n * 2)
                .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
                .collect();
            let view = GraphView::from_edges(n, edges);
            let scores = in_degree_centrality(&view);

            assert!(scores.iter().all(|&s| (0.0..=1.0).contains(&s)));
            if view.edge_count() > 0 {
                assert!(scores.iter().any(|&s| s == 1.0));
            }
        }
    }

    #[test]
    fn test_eigenvector_symmetric_cycle() {
        let view = GraphView::from_edges(3, vec![(0, 1), (1, 2), (2, 0)]);
        let scores = eigenvector_centrality(&view, EigenvectorConfig::default());

        for s in scores {
            assert!((s - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_eigenvector_favors_well_linked_node() {
        // Bidirectional triangle 0,1,2 plus 3 <-> 0
        let view = GraphView::from_edges(
            4,
            vec![(0, 1), (1, 0), (1, 2), (2, 1), (0, 2), (2, 0), (0, 3), (3, 0)],
        );
        let scores = eigenvector_centrality(&view, EigenvectorConfig::default());

        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert!(scores[0] > scores[1]);
        assert!(scores[3] < scores[1]);
        assert!(scores.iter().all(|&s| (0.0..=1.0 + 1e-12).contains(&s)));
    }

    #[test]
    fn test_eigenvector_dag_collapses_to_zero() {
        // 0 -> 1 -> 2: mass drains out after a few iterations
        let view = GraphView::from_edges(3, vec![(0, 1), (1, 2)]);
        let scores = eigenvector_centrality(&view, EigenvectorConfig::default());

        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_eigenvector_empty() {
        let view = GraphView::from_edges(0, Vec::new());
        assert!(eigenvector_centrality(&view, EigenvectorConfig::default()).is_empty());
    }
}
