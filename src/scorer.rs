use rayon::prelude::*;

/// Pairwise cosine similarity between a query matrix and a corpus matrix.
#[derive(Debug, Default)]
pub struct SimilarityScorer;

impl SimilarityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score every corpus vector against every query vector.
    ///
    /// `query_vectors` is M x D, `corpus_vectors` is N x D; the result is
    /// N x M (corpus-major — callers index by corpus row first, this
    /// orientation is part of the contract). Cell `[i][j]` is
    /// `dot(C_i, Q_j) / (|C_i| * |Q_j|)`, defined as exactly `0.0` when
    /// either norm is zero.
    ///
    /// Corpus rows are scored in parallel; each row only reads shared input
    /// and owns its output slot, so the result does not depend on scheduling.
    pub fn cosine_similarity(
        &self,
        query_vectors: &[Vec<f64>],
        corpus_vectors: &[Vec<f64>],
    ) -> Vec<Vec<f64>> {
        let query_norms: Vec<f64> = query_vectors.iter().map(|q| norm(q)).collect();

        corpus_vectors
            .par_iter()
            .map(|corpus_vec| {
                let corpus_norm = norm(corpus_vec);
                query_vectors
                    .iter()
                    .zip(&query_norms)
                    .map(|(query_vec, &query_norm)| {
                        if corpus_norm == 0.0 || query_norm == 0.0 {
                            0.0
                        } else {
                            dot(corpus_vec, query_vec) / (corpus_norm * query_norm)
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round2(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }

    #[test]
    fn known_matrix() {
        let scorer = SimilarityScorer::new();
        let query = vec![vec![1.0, 1.0, 2.0], vec![2.0, 2.0, 1.0]];
        let corpus = vec![
            vec![1.0, 1.0, 2.0],
            vec![2.0, 2.0, 1.0],
            vec![1.0, 1.0, 2.0],
        ];
        let sims = scorer.cosine_similarity(&query, &corpus);

        assert_eq!(sims.len(), 3);
        assert!(sims.iter().all(|row| row.len() == 2));
        let rounded: Vec<Vec<f64>> = sims
            .iter()
            .map(|row| row.iter().copied().map(round2).collect())
            .collect();
        assert_eq!(
            rounded,
            vec![vec![1.0, 0.82], vec![0.82, 1.0], vec![1.0, 0.82]]
        );
    }

    #[test]
    fn zero_norm_vectors_score_zero() {
        let scorer = SimilarityScorer::new();
        let zero = vec![vec![0.0, 0.0, 0.0]];
        let unit = vec![vec![1.0, 0.0, 0.0]];
        assert_eq!(scorer.cosine_similarity(&zero, &unit), vec![vec![0.0]]);
        assert_eq!(scorer.cosine_similarity(&unit, &zero), vec![vec![0.0]]);
        assert_eq!(scorer.cosine_similarity(&zero, &zero), vec![vec![0.0]]);
    }

    #[test]
    fn scores_stay_within_bounds() {
        let scorer = SimilarityScorer::new();
        let query = vec![vec![3.0, -1.0, 2.5], vec![-2.0, 0.0, 4.0]];
        let corpus = vec![
            vec![1.0, 1.0, 1.0],
            vec![-3.0, 1.0, -2.5],
            vec![0.0, 0.0, 0.0],
        ];
        for row in scorer.cosine_similarity(&query, &corpus) {
            for score in row {
                assert!((-1.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn opposite_vectors_score_minus_one() {
        let scorer = SimilarityScorer::new();
        let sims = scorer.cosine_similarity(&[vec![1.0, 2.0]], &[vec![-1.0, -2.0]]);
        assert!((sims[0][0] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn orientation_is_a_transpose() {
        let scorer = SimilarityScorer::new();
        let a = vec![vec![1.0, 2.0, 3.0], vec![0.5, 0.0, 1.5]];
        let b = vec![
            vec![2.0, 1.0, 0.0],
            vec![1.0, 1.0, 1.0],
            vec![0.0, 3.0, 1.0],
        ];
        let ab = scorer.cosine_similarity(&a, &b);
        let ba = scorer.cosine_similarity(&b, &a);
        for (i, row) in ab.iter().enumerate() {
            for (j, &score) in row.iter().enumerate() {
                assert!((score - ba[j][i]).abs() < 1e-12);
            }
        }
    }
}
