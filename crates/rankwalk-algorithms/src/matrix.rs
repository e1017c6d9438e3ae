//! Dense matrix forms of the PageRank model
//!
//! `H` (hyperlink), `H'` (dangling-corrected) and `G` (Google matrix), all
//! column-oriented: column `j` holds the transition probabilities out of node `j`.
//! These are for inspection of small graphs; the iterative engine works on the
//! sparse view and agrees with `G · r` numerically.

use super::common::GraphView;
use ndarray::{Array1, Array2};

/// `H[i][j] = 1/out(j)` if `j -> i`, else 0.
pub fn hyperlink_matrix(view: &GraphView) -> Array2<f64> {
    let n = view.node_count;
    let mut h = Array2::zeros((n, n));

    for j in 0..n {
        let out_degree = view.out_degree(j);
        if out_degree == 0 {
            continue;
        }
        let share = 1.0 / out_degree as f64;
        for &i in view.successors(j) {
            h[[i, j]] = share;
        }
    }

    h
}

/// Replace every all-zero column (a dangling node) with the uniform column `1/n`.
pub fn corrected_matrix(h: &Array2<f64>) -> Array2<f64> {
    let n = h.nrows();
    let mut h_prime = h.clone();
    if n == 0 {
        return h_prime;
    }

    let uniform = 1.0 / n as f64;
    for mut column in h_prime.columns_mut() {
        if column.sum() == 0.0 {
            column.fill(uniform);
        }
    }

    h_prime
}

/// `G[i][j] = α·H'[i][j] + (1-α)/n`
pub fn google_matrix(h_prime: &Array2<f64>, damping: f64) -> Array2<f64> {
    let n = h_prime.nrows();
    if n == 0 {
        return h_prime.clone();
    }
    let teleport = (1.0 - damping) / n as f64;
    h_prime.mapv(|value| damping * value + teleport)
}

/// Every column sums to 1 within `tolerance`. An empty matrix qualifies.
pub fn is_column_stochastic(matrix: &Array2<f64>, tolerance: f64) -> bool {
    matrix
        .columns()
        .into_iter()
        .all(|column| (column.sum() - 1.0).abs() <= tolerance)
}

/// Dense `matrix · vector`
pub fn mat_vec(matrix: &Array2<f64>, vector: &[f64]) -> Vec<f64> {
    matrix.dot(&Array1::from(vector.to_vec())).to_vec()
}

/// Display helper: exact 0 and 1 print bare, everything else with `decimals` places.
pub fn format_value(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value == 1.0 {
        "1".to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagerank::{power_step, uniform_scores, page_rank, PageRankConfig};
    use rand::prelude::*;

    fn paper_example() -> GraphView {
        GraphView::from_edges(4, vec![(0, 1), (0, 2), (1, 2), (2, 0), (3, 2)])
    }

    fn random_view(rng: &mut StdRng, n: usize) -> GraphView {
        let mut edges = Vec::new();
        for s in 0..n {
            for t in 0..n {
                if rng.gen_bool(0.3) {
                    edges.push((s, t));
                }
            }
        }
        GraphView::from_edges(n, edges)
    }

    #[test]
    fn test_hyperlink_matrix_paper_example() {
        let h = hyperlink_matrix(&paper_example());

        // Column 0 (node 1) splits between nodes 2 and 3
        assert_eq!(h[[1, 0]], 0.5);
        assert_eq!(h[[2, 0]], 0.5);
        assert_eq!(h[[0, 0]], 0.0);
        assert_eq!(h[[2, 1]], 1.0);
        assert_eq!(h[[0, 2]], 1.0);
        assert_eq!(h[[2, 3]], 1.0);
    }

    #[test]
    fn test_corrected_matrix_fills_dangling_columns() {
        // 0 -> 1, node 1 and 2 dangling
        let view = GraphView::from_edges(3, vec![(0, 1)]);
        let h_prime = corrected_matrix(&hyperlink_matrix(&view));

        assert_eq!(h_prime[[1, 0]], 1.0);
        for i in 0..3 {
            assert_eq!(h_prime[[i, 1]], 1.0 / 3.0);
            assert_eq!(h_prime[[i, 2]], 1.0 / 3.0);
        }
        assert!(is_column_stochastic(&h_prime, 1e-12));
    }

    #[test]
    fn test_google_matrix_column_stochastic() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=8 {
            let view = random_view(&mut rng, n);
            let h_prime = corrected_matrix(&hyperlink_matrix(&view));
            for alpha in [0.05, 0.5, 0.85, 0.99] {
                let g = google_matrix(&h_prime, alpha);
                assert!(is_column_stochastic(&g, 1e-9), "n={n} alpha={alpha}");
            }
        }
    }

    #[test]
    fn test_dense_and_sparse_iterations_agree() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=8 {
            let view = random_view(&mut rng, n);
            let g = google_matrix(&corrected_matrix(&hyperlink_matrix(&view)), 0.85);

            let mut scores = uniform_scores(n);
            for _ in 0..5 {
                let dense = mat_vec(&g, &scores);
                let sparse = power_step(&view, &scores, 0.85);
                for (d, s) in dense.iter().zip(&sparse) {
                    assert!((d - s).abs() < 1e-9, "dense {d} sparse {s}");
                }
                scores = sparse;
            }
        }
    }

    #[test]
    fn test_converged_vector_is_fixed_point_of_g() {
        let view = paper_example();
        let result = page_rank(&view, PageRankConfig { tolerance: 1e-12, ..Default::default() });
        let g = google_matrix(&corrected_matrix(&hyperlink_matrix(&view)), 0.85);

        let next = mat_vec(&g, &result.scores);
        for (a, b) in next.iter().zip(&result.scores) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_matrices() {
        let view = GraphView::from_edges(0, Vec::new());
        let h = hyperlink_matrix(&view);
        let g = google_matrix(&corrected_matrix(&h), 0.85);

        assert_eq!(g.dim(), (0, 0));
        assert!(is_column_stochastic(&g, 1e-9));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0, 3), "0");
        assert_eq!(format_value(1.0, 3), "1");
        assert_eq!(format_value(0.5, 2), "0.50");
        assert_eq!(format_value(1.0 / 3.0, 3), "0.333");
        assert_eq!(format_value(0.0375, 4), "0.0375");
    }
}
