use rayon::prelude::*;

use crate::utils::math::vector::SparseVec;
use crate::vectorizer::matrix::DocumentTermMatrix;
use crate::vectorizer::token::TokenFrequency;
use crate::vectorizer::vocabulary::Vocabulary;

/// Raw-count vectors over a frozen vocabulary.
///
/// Tokens are folded with the vocabulary's case rule; tokens the
/// vocabulary never saw are dropped.
#[derive(Debug, Clone, Copy)]
pub struct CountVectorizer<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> CountVectorizer<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    #[inline]
    pub fn vocabulary(&self) -> &'v Vocabulary {
        self.vocabulary
    }

    /// Count vector of one tokenized document.
    ///
    /// The weights sum to the number of in-vocabulary tokens.
    pub fn transform<T>(&self, doc: &[T]) -> SparseVec<u32>
    where
        T: AsRef<str>,
    {
        let (vec, dropped) = self.transform_counted(doc);
        if dropped > 0 {
            tracing::trace!(dropped, "out-of-vocabulary tokens dropped");
        }
        vec
    }

    /// Count matrix of `docs`, one row per document in input order.
    pub fn transform_many<D, T>(&self, docs: &[D]) -> DocumentTermMatrix<u32>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let (rows, dropped): (Vec<SparseVec<u32>>, Vec<usize>) = docs
            .par_iter()
            .map(|doc| self.transform_counted(doc.as_ref()))
            .unzip();
        let dropped: usize = dropped.iter().sum();
        tracing::debug!(
            docs = rows.len(),
            dim = self.vocabulary.len(),
            dropped,
            "count matrix built"
        );
        DocumentTermMatrix::from_rows_unchecked(self.vocabulary.len(), rows)
    }

    /// Number of tokens in `doc` that `transform` would drop.
    pub fn oov_count<T>(&self, doc: &[T]) -> usize
    where
        T: AsRef<str>,
    {
        doc.iter()
            .filter(|tok| !self.vocabulary.contains(tok.as_ref()))
            .count()
    }

    fn transform_counted<T>(&self, doc: &[T]) -> (SparseVec<u32>, usize)
    where
        T: AsRef<str>,
    {
        let freq = TokenFrequency::from_tokens(doc, self.vocabulary.folding());
        let mut dropped = 0usize;
        let pairs: Vec<(usize, u32)> = freq
            .iter()
            .filter_map(|(tok, count)| match self.vocabulary.index_of(tok) {
                Some(idx) => Some((idx, count)),
                None => {
                    dropped += count as usize;
                    None
                }
            })
            .collect();
        (SparseVec::from_pairs(self.vocabulary.len(), pairs), dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalizer::CaseFolding;
    use proptest::prelude::*;

    fn vocab() -> Vocabulary {
        let corpus = vec![vec!["the", "cat", "sat"], vec!["the", "dog", "sat"], vec!["birds", "fly"]];
        Vocabulary::fit(&corpus, CaseFolding::Lowercase).unwrap()
    }

    #[test]
    fn counts_in_vocabulary_tokens() {
        let vocab = vocab();
        let counter = CountVectorizer::new(&vocab);
        let v = counter.transform(&["The", "cat", "sat", "the"]);
        assert_eq!(v.len(), 6);
        assert_eq!(v.to_dense(), vec![0, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn unknown_tokens_are_dropped_and_reported() {
        let vocab = vocab();
        let counter = CountVectorizer::new(&vocab);
        let doc = ["a", "cat", "named", "Holmes"];
        let v = counter.transform(&doc);
        assert_eq!(v.sum::<u64>(), 1);
        assert_eq!(counter.oov_count(&doc), 3);
    }

    #[test]
    fn empty_vocabulary_gives_empty_vectors() {
        let docs: Vec<Vec<&str>> = vec![vec![], vec![]];
        let vocab = Vocabulary::fit(&docs, CaseFolding::Lowercase).unwrap();
        let m = CountVectorizer::new(&vocab).transform_many(&[vec!["anything"]]);
        assert_eq!(m.shape(), (1, 0));
        assert!(m.row(0).unwrap().is_zero());
    }

    #[test]
    fn transform_many_keeps_document_order() {
        let vocab = vocab();
        let docs = vec![vec!["fly"], vec!["dog", "dog"], vec![]];
        let m = CountVectorizer::new(&vocab).transform_many(&docs);
        assert_eq!(m.n_docs(), 3);
        assert_eq!(m.row(0).unwrap().indices(), &[3]);
        assert_eq!(m.row(1).unwrap().values(), &[2]);
        assert!(m.row(2).unwrap().is_zero());
    }

    proptest! {
        #[test]
        fn weights_sum_to_in_vocabulary_token_count(
            corpus in prop::collection::vec(prop::collection::vec("[a-dA-D]{1,2}", 0..6), 1..5),
            doc in prop::collection::vec("[a-fA-F]{1,2}", 0..12),
        ) {
            let vocab = Vocabulary::fit(&corpus, CaseFolding::Lowercase).unwrap();
            let counter = CountVectorizer::new(&vocab);
            let v = counter.transform(&doc);
            let in_vocab = doc.iter().filter(|t| vocab.contains(t)).count();
            prop_assert_eq!(v.sum::<u64>() as usize, in_vocab);
            prop_assert_eq!(in_vocab + counter.oov_count(&doc), doc.len());
        }
    }
}
