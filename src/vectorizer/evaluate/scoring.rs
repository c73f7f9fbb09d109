use std::fmt::{self, Debug, Display};

use num::Num;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizerError};
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::matrix::DocumentTermMatrix;

/// One ranked document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    /// position of the document in the corpus
    pub doc_index: usize,
    /// cosine similarity to the query, in `[0, 1]`
    pub score: f64,
}

/// Ranked search results
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort by descending score, ties by ascending document index.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.doc_index.cmp(&b.doc_index))
        });
        self
    }

    /// Keep the first `k` entries.
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<&HitEntry> {
        self.list.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry> {
        self.list.iter()
    }

    /// Document indices in rank order
    pub fn doc_indices(&self) -> Vec<usize> {
        self.list.iter().map(|hit| hit.doc_index).collect()
    }
}

impl<'a> IntoIterator for &'a Hits {
    type Item = &'a HitEntry;
    type IntoIter = std::slice::Iter<'a, HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {}: {:.6}", hit.doc_index, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (hit.doc_index, hit.score)))
                .finish()
        }
    }
}

impl Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(f, "{:>4}. doc {:<8} {:.6}", rank + 1, hit.doc_index, hit.score)?;
        }
        Ok(())
    }
}

/// Cosine similarity of `query` against every row, in corpus order.
///
/// Rows or queries with zero magnitude score 0.0. Fails with
/// `VocabularyMismatch` when the query was built over another vocabulary.
pub fn similarities<N>(matrix: &DocumentTermMatrix<N>, query: &SparseVec<N>) -> Result<Vec<f64>>
where
    N: Num + Copy + Into<f64> + Send + Sync,
{
    matrix.check_dim(query)?;
    // query norm is shared by every row
    let query_norm = query.scaled_norm();
    let scores = matrix
        .rows()
        .par_iter()
        .map(|row| row.cosine_with_scaled_norm(query, query_norm))
        .collect();
    Ok(scores)
}

/// The `top_k` rows most similar to `query`.
///
/// Ordered by descending score, ties by ascending document index. A `top_k`
/// larger than the corpus returns the full ranking.
pub fn rank<N>(matrix: &DocumentTermMatrix<N>, query: &SparseVec<N>, top_k: usize) -> Result<Hits>
where
    N: Num + Copy + Into<f64> + Send + Sync,
{
    if top_k == 0 {
        return Err(VectorizerError::InvalidTopK(top_k));
    }
    let scores = similarities(matrix, query)?;
    let mut hits = Hits::new(
        scores
            .into_iter()
            .enumerate()
            .map(|(doc_index, score)| HitEntry { doc_index, score })
            .collect(),
    );
    hits.sort_by_score_desc().truncate(top_k);
    tracing::trace!(
        docs = matrix.n_docs(),
        top_k,
        best = hits.first().map(|h| h.score),
        "ranked"
    );
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix() -> DocumentTermMatrix<u32> {
        // terms: 0 birds, 1 cat, 2 dog, 3 fly, 4 sat, 5 the
        DocumentTermMatrix::from_rows(
            6,
            vec![
                SparseVec::from_pairs(6, vec![(1, 1), (4, 1), (5, 1)]),
                SparseVec::from_pairs(6, vec![(2, 1), (4, 1), (5, 1)]),
                SparseVec::from_pairs(6, vec![(0, 1), (3, 1)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn best_match_first_and_unrelated_last() {
        let query = SparseVec::from_pairs(6, vec![(1, 1u32)]);
        let hits = rank(&matrix(), &query, 10).unwrap();
        assert_eq!(hits.doc_indices(), vec![0, 1, 2]);
        assert!(hits.list[0].score > 0.0);
        assert_eq!(hits.list[1].score, 0.0);
        assert_eq!(hits.list[2].score, 0.0);
    }

    #[test]
    fn ties_are_broken_by_document_index() {
        let query = SparseVec::from_pairs(6, vec![(4, 1u32)]);
        let hits = rank(&matrix(), &query, 3).unwrap();
        assert_eq!(hits.doc_indices(), vec![0, 1, 2]);
        assert_eq!(hits.list[0].score, hits.list[1].score);
    }

    #[test]
    fn top_k_selects_a_prefix() {
        let query = SparseVec::from_pairs(6, vec![(2, 1u32), (5, 1)]);
        let hits = rank(&matrix(), &query, 1).unwrap();
        assert_eq!(hits.doc_indices(), vec![1]);
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let query = SparseVec::from_pairs(6, vec![(1, 1u32)]);
        assert_eq!(rank(&matrix(), &query, 0), Err(VectorizerError::InvalidTopK(0)));
    }

    #[test]
    fn zero_query_scores_zero_everywhere() {
        let scores = similarities(&matrix(), &SparseVec::new(6)).unwrap();
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn foreign_query_is_rejected() {
        let query = SparseVec::from_pairs(9, vec![(1, 1u32)]);
        assert_eq!(
            similarities(&matrix(), &query),
            Err(VectorizerError::VocabularyMismatch { expected: 6, found: 9 })
        );
    }

    #[test]
    fn display_lists_one_hit_per_line() {
        let hits = Hits::new(vec![HitEntry { doc_index: 3, score: 0.5 }]);
        assert_eq!(hits.to_string(), "   1. doc 3        0.500000\n");
    }

    #[test]
    fn huge_weights_still_score_in_unit_interval() {
        let m = DocumentTermMatrix::from_rows(
            2,
            vec![
                SparseVec::from_pairs(2, vec![(0, 1e200)]),
                SparseVec::from_pairs(2, vec![(1, 1.0)]),
            ],
        )
        .unwrap();
        let query = SparseVec::from_pairs(2, vec![(0, 1e200)]);
        let scores = similarities(&m, &query).unwrap();
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert_eq!(scores[1], 0.0);
        assert_eq!(rank(&m, &query, 2).unwrap().doc_indices(), vec![0, 1]);
    }

    fn weight() -> impl Strategy<Value = f64> {
        prop_oneof![0.001f64..100.0, 1e-300f64..1e-250, 1e150f64..1e300]
    }

    fn sparse(dim: usize) -> impl Strategy<Value = SparseVec<f64>> {
        prop::collection::vec((0..dim, weight()), 0..dim)
            .prop_map(move |pairs| SparseVec::from_pairs(dim, pairs))
    }

    proptest! {
        #[test]
        fn scores_stay_in_unit_interval(
            rows in prop::collection::vec(sparse(8), 1..6),
            query in sparse(8),
        ) {
            let m = DocumentTermMatrix::from_rows(8, rows).unwrap();
            for s in similarities(&m, &query).unwrap() {
                prop_assert!((0.0..=1.0).contains(&s));
            }
            for row in &m {
                let own = row.cosine_similarity(row);
                if row.is_zero() {
                    prop_assert_eq!(own, 0.0);
                } else {
                    prop_assert!((own - 1.0).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn ranking_is_repeatable_and_tie_ordered(
            rows in prop::collection::vec(sparse(5), 1..8),
            query in sparse(5),
        ) {
            let m = DocumentTermMatrix::from_rows(5, rows).unwrap();
            let first = rank(&m, &query, m.n_docs()).unwrap();
            let second = rank(&m, &query, m.n_docs()).unwrap();
            prop_assert_eq!(&first, &second);
            for pair in first.list.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    prop_assert!(pair[0].doc_index < pair[1].doc_index);
                }
            }
        }
    }
}
