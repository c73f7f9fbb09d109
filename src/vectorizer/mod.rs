pub mod count;
pub mod evaluate;
pub mod matrix;
pub mod search;
pub mod serde;
pub mod tfidf;
pub mod token;
pub mod vocabulary;

use crate::config::{VectorizerConfig, Weighting};
use crate::engine::tokenizer::Tokenizer;
use crate::error::Result;
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::{
    count::CountVectorizer,
    matrix::DocumentTermMatrix,
    tfidf::{DefaultTFIDFEngine, IdfTable, TFIDFEngine, TfidfTransformer},
    vocabulary::Vocabulary,
};

/// Fitted bag-of-words model: a frozen vocabulary, the config it was fitted
/// with and, for TF-IDF weighting, the fitted IDF table.
///
/// Nothing here changes after fit, so one instance can serve transforms from
/// many threads at once.
#[derive(Debug, Clone)]
pub struct Vectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    pub(crate) config: VectorizerConfig,
    pub(crate) vocabulary: Vocabulary,
    /// present iff `config.weighting` is TF-IDF
    pub(crate) tfidf: Option<TfidfTransformer<E>>,
}

impl<E> Vectorizer<E>
where
    E: TFIDFEngine + Sync,
{
    /// Fit the vocabulary (and IDF table) on a tokenized corpus.
    pub fn fit<D, T>(corpus: &[D], config: VectorizerConfig) -> Result<Self>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        Self::fit_counts(corpus, config).map(|(vectorizer, _)| vectorizer)
    }

    /// `fit` followed by `transform_many` over the same corpus.
    pub fn fit_transform<D, T>(
        corpus: &[D],
        config: VectorizerConfig,
    ) -> Result<(Self, DocumentTermMatrix<f64>)>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let (vectorizer, counts) = Self::fit_counts(corpus, config)?;
        let matrix = vectorizer.weigh_many(&counts)?;
        Ok((vectorizer, matrix))
    }

    /// Tokenize raw texts with `tokenizer`, then `fit`.
    pub fn fit_text<S>(texts: &[S], tokenizer: &dyn Tokenizer, config: VectorizerConfig) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let corpus: Vec<Vec<String>> = texts.iter().map(|t| tokenizer.tokenize(t.as_ref())).collect();
        Self::fit(&corpus, config)
    }

    fn fit_counts<D, T>(corpus: &[D], config: VectorizerConfig) -> Result<(Self, DocumentTermMatrix<u32>)>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let vocabulary = Vocabulary::fit(corpus, config.folding())?;
        let counts = CountVectorizer::new(&vocabulary).transform_many(corpus);
        let tfidf = match config.weighting {
            Weighting::RawCount => None,
            Weighting::TfIdf => {
                let mut transformer = TfidfTransformer::new(config.term_freq, config.norm);
                transformer.fit(&counts)?;
                Some(transformer)
            }
        };
        tracing::info!(
            docs = counts.n_docs(),
            vocabulary = vocabulary.len(),
            weighting = ?config.weighting,
            "vectorizer fitted"
        );
        Ok((
            Vectorizer {
                config,
                vocabulary,
                tfidf,
            },
            counts,
        ))
    }
}

impl<E> Vectorizer<E>
where
    E: TFIDFEngine + Sync,
{
    #[inline]
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Fitted IDF table, `None` under raw-count weighting
    pub fn idf(&self) -> Option<&IdfTable> {
        self.tfidf.as_ref().and_then(|t| t.idf().ok())
    }

    /// IDF weight of `term`, `None` when out of vocabulary or under
    /// raw-count weighting.
    pub fn idf_of(&self, term: &str) -> Option<f64> {
        let index = self.vocabulary.index_of(term)?;
        self.idf()?.get(index)
    }

    /// Raw-count view over the same vocabulary
    #[inline]
    pub fn count_vectorizer(&self) -> CountVectorizer<'_> {
        CountVectorizer::new(&self.vocabulary)
    }

    /// Vector of one tokenized document (or query).
    pub fn transform<T>(&self, doc: &[T]) -> Result<SparseVec<f64>>
    where
        T: AsRef<str>,
    {
        let counts = self.count_vectorizer().transform(doc);
        self.weigh(&counts)
    }

    pub fn transform_many<D, T>(&self, docs: &[D]) -> Result<DocumentTermMatrix<f64>>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let counts = self.count_vectorizer().transform_many(docs);
        self.weigh_many(&counts)
    }

    pub fn transform_text(&self, text: &str, tokenizer: &dyn Tokenizer) -> Result<SparseVec<f64>> {
        self.transform(&tokenizer.tokenize(text))
    }

    /// Tokens of `doc` that `transform` drops.
    pub fn oov_count<T>(&self, doc: &[T]) -> usize
    where
        T: AsRef<str>,
    {
        self.count_vectorizer().oov_count(doc)
    }

    fn weigh(&self, counts: &SparseVec<u32>) -> Result<SparseVec<f64>> {
        match &self.tfidf {
            Some(transformer) => transformer.transform(counts),
            None => Ok(counts.map_values(|_, c| c as f64)),
        }
    }

    fn weigh_many(&self, counts: &DocumentTermMatrix<u32>) -> Result<DocumentTermMatrix<f64>> {
        match &self.tfidf {
            Some(transformer) => transformer.transform_many(counts),
            None => DocumentTermMatrix::from_rows(
                counts.dim(),
                counts.iter().map(|row| row.map_values(|_, c| c as f64)).collect(),
            ),
        }
    }
}
