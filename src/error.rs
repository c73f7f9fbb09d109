use thiserror::Error;

/// Errors raised by fitting, transforming and ranking.
///
/// Every variant is an input-validation failure detected before any output
/// is produced, so none of them is worth retrying with the same input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VectorizerError {
    /// `fit` received a corpus with zero documents
    #[error("cannot fit a vocabulary on an empty corpus")]
    EmptyCorpus,
    /// TF-IDF transform requested before the IDF table was fitted
    #[error("TF-IDF transformer used before fit")]
    UnfittedTransformer,
    /// IDF fit received a matrix with zero rows
    #[error("cannot fit IDF weights on a zero-document matrix")]
    EmptyFitMatrix,
    #[error("top_k must be at least 1, got {0}")]
    InvalidTopK(usize),
    /// vectors were built against different vocabularies
    #[error("vocabulary mismatch: expected dimension {expected}, found {found}")]
    VocabularyMismatch { expected: usize, found: usize },
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<serde_cbor::Error> for VectorizerError {
    fn from(err: serde_cbor::Error) -> Self {
        VectorizerError::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VectorizerError>;
