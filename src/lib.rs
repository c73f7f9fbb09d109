//! This crate turns tokenized documents into bag-of-words vectors and ranks
//! documents against queries by cosine similarity.

pub mod config;
pub mod engine;
pub mod error;
pub mod utils;
pub mod vectorizer;

/// Bag-of-Words Vectorizer
/// The top-level struct of this crate.
/// It fits a vocabulary (and, for TF-IDF weighting, an IDF table) on a corpus
/// and then converts documents or queries into sparse vectors over that
/// vocabulary.
///
/// Internally, it holds:
/// - The settings it was fitted with
/// - The frozen vocabulary
/// - The fitted TF-IDF transformer (TF-IDF weighting only)
///
/// `Vectorizer<E>` takes one generic parameter:
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// # Serialization
/// Supported through `VectorizerData`, or directly with `to_cbor` / `from_cbor`.
pub use vectorizer::Vectorizer;

/// Search Index
/// A fitted `Vectorizer` bundled with the vectors of its corpus.
/// Queries are vectorized with the same vectorizer and ranked against every
/// document.
pub use vectorizer::search::SearchIndex;

/// Vectorizer Data Structure for Serialization
/// A serializable snapshot of a `Vectorizer` that does not carry the engine
/// type. Convert it back with `into_vectorizer`.
///
/// `MatrixTriples` is the matching snapshot of a document-term matrix as
/// `(document, term, weight)` triples.
pub use vectorizer::serde::{MatrixTriples, VectorizerData};

/// Vocabulary
/// Ordered set of distinct terms. A term's index is its position in
/// ascending order, so two fits over the same corpus agree on every index.
pub use vectorizer::vocabulary::Vocabulary;

/// Token Frequency structure
/// A struct for analyzing/managing token occurrence frequency within a document.
/// It manages:
/// - The count of occurrences of each token
/// - The total number of tokens in the document
pub use vectorizer::token::TokenFrequency;

/// Count Vectorizer and Document-Term Matrix
/// `CountVectorizer` turns tokenized documents into raw occurrence counts over
/// a fixed vocabulary. `DocumentTermMatrix` holds one sparse row per document.
pub use vectorizer::count::CountVectorizer;
pub use vectorizer::matrix::DocumentTermMatrix;

/// TF IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// By implementing this trait, you can plug different TF-IDF calculation strategies
/// into `Vectorizer<E>`.
/// A default implementation, `DefaultTFIDFEngine`, is provided and uses the
/// smoothed IDF `ln((1 + n) / (1 + df)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// TF-IDF Transformer
/// Fits an `IdfTable` on a count matrix and reweights count vectors with it.
pub use vectorizer::tfidf::{
    tfidf_transform, IdfTable, TermFrequencyMode, TfidfTransformer, VectorNorm,
};

/// Search Hits and Hit Entry structures
/// Data structures for managing search results.
/// - `Hits`: holds a list of search results and provides features such as sorting by score
/// - `HitEntry`: represents a single result entry, containing the document index and score
pub use vectorizer::evaluate::scoring::{rank, similarities, HitEntry, Hits};

pub use config::{VectorizerConfig, Weighting};
pub use engine::tokenizer::{SimpleTokenizer, Tokenizer};
pub use error::{Result, VectorizerError};
pub use utils::math::vector::SparseVec;
pub use utils::normalizer::CaseFolding;
