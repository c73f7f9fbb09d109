use num::Num;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::{VectorizerConfig, Weighting};
use crate::error::{Result, VectorizerError};
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::{
    matrix::DocumentTermMatrix,
    tfidf::{IdfTable, TFIDFEngine, TfidfTransformer},
    vocabulary::Vocabulary,
    Vectorizer,
};

/// Serializable snapshot of a fitted `Vectorizer`.
///
/// The vocabulary is stored as its ordered term list (index = position) and
/// the IDF table as a parallel list of weights.
/// Convert back with `into_vectorizer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerData {
    pub config: VectorizerConfig,
    pub terms: Vec<String>,
    /// empty under raw-count weighting
    pub idf: Vec<f64>,
    pub idf_doc_num: u64,
}

impl VectorizerData {
    pub fn into_vectorizer<E>(self) -> Result<Vectorizer<E>>
    where
        E: TFIDFEngine,
    {
        let vocabulary = Vocabulary::from_terms(&self.terms, self.config.folding())?;
        let tfidf = match self.config.weighting {
            Weighting::RawCount => None,
            Weighting::TfIdf => {
                if self.idf.len() != vocabulary.len() {
                    return Err(VectorizerError::VocabularyMismatch {
                        expected: vocabulary.len(),
                        found: self.idf.len(),
                    });
                }
                let table = IdfTable::from_parts(self.idf, self.idf_doc_num);
                Some(TfidfTransformer::with_idf(
                    table,
                    self.config.term_freq,
                    self.config.norm,
                ))
            }
        };
        Ok(Vectorizer {
            config: self.config,
            vocabulary,
            tfidf,
        })
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}

impl<E> Vectorizer<E>
where
    E: TFIDFEngine + Sync,
{
    /// Snapshot without the engine type.
    pub fn to_data(&self) -> VectorizerData {
        let (idf, idf_doc_num) = match self.idf() {
            Some(table) => (table.as_slice().to_vec(), table.doc_num()),
            None => (Vec::new(), 0),
        };
        VectorizerData {
            config: self.config,
            terms: self.vocabulary.terms().map(str::to_string).collect(),
            idf,
            idf_doc_num,
        }
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        self.to_data().to_cbor()
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        VectorizerData::from_cbor(bytes)?.into_vectorizer()
    }
}

/// A matrix as `(document_index, term_index, weight)` triples plus its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixTriples<N> {
    pub n_docs: usize,
    pub dim: usize,
    pub triples: Vec<(usize, usize, N)>,
}

impl<N> MatrixTriples<N>
where
    N: Num + Copy,
{
    /// Rebuild the matrix. Fails on triples outside the stored shape.
    pub fn into_matrix(self) -> Result<DocumentTermMatrix<N>> {
        // n_docs comes from untrusted input
        let mut rows: Vec<Vec<(usize, N)>> = Vec::new();
        rows.try_reserve_exact(self.n_docs).map_err(|err| {
            VectorizerError::Persistence(format!("cannot allocate {} documents: {}", self.n_docs, err))
        })?;
        rows.resize_with(self.n_docs, Vec::new);
        for (doc, term, weight) in self.triples {
            if term >= self.dim {
                return Err(VectorizerError::Persistence(format!(
                    "term index {} outside dimension {}",
                    term, self.dim
                )));
            }
            let row = rows.get_mut(doc).ok_or_else(|| {
                VectorizerError::Persistence(format!(
                    "document index {} outside {} documents",
                    doc, self.n_docs
                ))
            })?;
            row.push((term, weight));
        }
        let dim = self.dim;
        DocumentTermMatrix::from_rows(
            dim,
            rows.into_iter()
                .map(|pairs| SparseVec::from_pairs(dim, pairs))
                .collect(),
        )
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>>
    where
        N: Serialize,
    {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self>
    where
        N: DeserializeOwned,
    {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}

impl<N> DocumentTermMatrix<N>
where
    N: Num + Copy,
{
    pub fn to_triples(&self) -> MatrixTriples<N> {
        let triples = self
            .iter()
            .enumerate()
            .flat_map(|(doc, row)| row.raw_iter().map(move |(term, w)| (doc, term, *w)))
            .collect();
        MatrixTriples {
            n_docs: self.n_docs(),
            dim: self.dim(),
            triples,
        }
    }
}
