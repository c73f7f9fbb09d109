use crate::config::VectorizerConfig;
use crate::engine::tokenizer::Tokenizer;
use crate::error::{Result, VectorizerError};
use crate::vectorizer::{
    evaluate::scoring::{self, Hits},
    matrix::DocumentTermMatrix,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    Vectorizer,
};

/// A fitted vectorizer together with the vectors of the corpus it was
/// fitted on. Queries go through the same vectorizer, so they always share
/// the corpus index space.
#[derive(Debug, Clone)]
pub struct SearchIndex<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    vectorizer: Vectorizer<E>,
    matrix: DocumentTermMatrix<f64>,
}

impl<E> SearchIndex<E>
where
    E: TFIDFEngine + Sync,
{
    /// Fit on `corpus` and keep its document vectors.
    pub fn build<D, T>(corpus: &[D], config: VectorizerConfig) -> Result<Self>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let (vectorizer, matrix) = Vectorizer::fit_transform(corpus, config)?;
        Ok(Self { vectorizer, matrix })
    }

    /// Tokenize raw texts with `tokenizer`, then `build`.
    pub fn build_text<S>(texts: &[S], tokenizer: &dyn Tokenizer, config: VectorizerConfig) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let corpus: Vec<Vec<String>> = texts.iter().map(|t| tokenizer.tokenize(t.as_ref())).collect();
        Self::build(&corpus, config)
    }

    /// Pair a vectorizer with a matrix produced elsewhere.
    ///
    /// Fails with `VocabularyMismatch` unless the matrix uses the
    /// vectorizer's vocabulary size.
    pub fn from_parts(vectorizer: Vectorizer<E>, matrix: DocumentTermMatrix<f64>) -> Result<Self> {
        let dim = vectorizer.vocabulary().len();
        if matrix.dim() != dim {
            return Err(VectorizerError::VocabularyMismatch {
                expected: dim,
                found: matrix.dim(),
            });
        }
        Ok(Self { vectorizer, matrix })
    }

    #[inline]
    pub fn vectorizer(&self) -> &Vectorizer<E> {
        &self.vectorizer
    }

    #[inline]
    pub fn matrix(&self) -> &DocumentTermMatrix<f64> {
        &self.matrix
    }

    #[inline]
    pub fn n_docs(&self) -> usize {
        self.matrix.n_docs()
    }

    /// Score of every document against a tokenized query, in corpus order.
    pub fn similarities<T>(&self, query: &[T]) -> Result<Vec<f64>>
    where
        T: AsRef<str>,
    {
        let query_vec = self.vectorizer.transform(query)?;
        scoring::similarities(&self.matrix, &query_vec)
    }

    /// The `top_k` documents most similar to a tokenized query.
    pub fn search<T>(&self, query: &[T], top_k: usize) -> Result<Hits>
    where
        T: AsRef<str>,
    {
        let query_vec = self.vectorizer.transform(query)?;
        scoring::rank(&self.matrix, &query_vec, top_k)
    }

    pub fn search_text(&self, query: &str, tokenizer: &dyn Tokenizer, top_k: usize) -> Result<Hits> {
        self.search(&tokenizer.tokenize(query), top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tokenizer::SimpleTokenizer;

    const TEXTS: [&str; 4] = [
        "Black holes swallow light.",
        "Pasta with garlic and olive oil.",
        "Garlic bread goes with pasta.",
        "Notre Dame in Paris.",
    ];

    #[test]
    fn query_finds_relevant_documents() {
        let index: SearchIndex = SearchIndex::build_text(&TEXTS, &SimpleTokenizer, VectorizerConfig::default()).unwrap();
        let hits = index.search_text("pasta garlic", &SimpleTokenizer, 2).unwrap();
        let mut top = hits.doc_indices();
        top.sort_unstable();
        assert_eq!(top, vec![1, 2]);
        let scores = index.similarities(&["black", "hole"]).unwrap();
        assert_eq!(scores.len(), 4);
        assert!(scores[0] > 0.0);
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn raw_count_index_ranks_too() {
        let index: SearchIndex = SearchIndex::build_text(&TEXTS, &SimpleTokenizer, VectorizerConfig::raw_count()).unwrap();
        let hits = index.search(&["notre", "dame"], 10).unwrap();
        assert_eq!(hits.len(), 4);
        assert_eq!(hits.first().map(|h| h.doc_index), Some(3));
    }

    #[test]
    fn from_parts_checks_dimension() {
        let index: SearchIndex = SearchIndex::build_text(&TEXTS, &SimpleTokenizer, VectorizerConfig::default()).unwrap();
        let other = DocumentTermMatrix::from_rows(2, vec![]).unwrap();
        let err = SearchIndex::from_parts(index.vectorizer().clone(), other).unwrap_err();
        assert!(matches!(err, VectorizerError::VocabularyMismatch { found: 2, .. }));
        assert!(SearchIndex::from_parts(index.vectorizer().clone(), index.matrix().clone()).is_ok());
    }
}
