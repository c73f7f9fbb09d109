use std::marker::PhantomData;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizerError};
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::matrix::DocumentTermMatrix;

/// How a raw count becomes a term frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TermFrequencyMode {
    /// `tf = count`
    #[default]
    Linear,
    /// `tf = 1 + ln(count)` for `count > 0`
    Sublinear,
}

/// Post-weighting scaling of TF-IDF vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VectorNorm {
    #[default]
    None,
    /// scale to unit Euclidean length
    L2,
}

/// TF-IDF formula plug-in.
///
/// Implement this to swap the weighting scheme used by `TfidfTransformer`.
/// `DefaultTFIDFEngine` uses the smoothed textbook formulas.
pub trait TFIDFEngine {
    /// IDF of a term seen in `doc_freq` of `doc_num` documents
    fn idf(doc_num: u64, doc_freq: u64) -> f64;
    /// TF of a term seen `count` times in one document
    fn tf(count: u32, mode: TermFrequencyMode) -> f64;
}

/// `idf = ln((1 + D) / (1 + DF)) + 1`, `tf` per `TermFrequencyMode`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    #[inline]
    fn tf(count: u32, mode: TermFrequencyMode) -> f64 {
        if count == 0 {
            return 0.0;
        }
        match mode {
            TermFrequencyMode::Linear => count as f64,
            TermFrequencyMode::Sublinear => 1.0 + (count as f64).ln(),
        }
    }
}

/// Per-term IDF weights, index-aligned with the vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdfTable {
    /// dense because every vocabulary term has a weight
    idf_vec: Vec<f64>,
    /// documents the table was fitted on
    doc_num: u64,
}

impl IdfTable {
    /// Count document frequencies in `matrix` and derive one weight per
    /// column.
    pub fn fit<E>(matrix: &DocumentTermMatrix<u32>) -> Result<Self>
    where
        E: TFIDFEngine,
    {
        if matrix.is_empty() {
            return Err(VectorizerError::EmptyFitMatrix);
        }
        let dim = matrix.dim();
        let doc_freq: Vec<u64> = matrix
            .rows()
            .par_iter()
            .fold(
                || vec![0u64; dim],
                |mut df, row| {
                    for (idx, _) in row.raw_iter() {
                        df[idx] += 1;
                    }
                    df
                },
            )
            .reduce(
                || vec![0u64; dim],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                    a
                },
            );
        let doc_num = matrix.n_docs() as u64;
        let idf_vec = doc_freq.iter().map(|&df| E::idf(doc_num, df)).collect();
        tracing::debug!(docs = doc_num, dim, "idf table fitted");
        Ok(IdfTable { idf_vec, doc_num })
    }

    /// Restore a table from stored weights.
    pub fn from_parts(idf_vec: Vec<f64>, doc_num: u64) -> Self {
        IdfTable { idf_vec, doc_num }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.idf_vec.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.idf_vec
    }
}

/// Re-weight one count vector with a fitted IDF table.
///
/// Fails with `VocabularyMismatch` when the vector and the table do not
/// share an index space.
pub fn tfidf_transform<E>(
    count_vec: &SparseVec<u32>,
    idf: &IdfTable,
    mode: TermFrequencyMode,
    norm: VectorNorm,
) -> Result<SparseVec<f64>>
where
    E: TFIDFEngine,
{
    if count_vec.len() != idf.len() {
        return Err(VectorizerError::VocabularyMismatch {
            expected: idf.len(),
            found: count_vec.len(),
        });
    }
    let weighted = count_vec.map_values(|idx, count| E::tf(count, mode) * idf.idf_vec[idx]);
    Ok(match norm {
        VectorNorm::None => weighted,
        VectorNorm::L2 => weighted.l2_normalized(),
    })
}

/// Fit-once, transform-many TF-IDF weighting.
///
/// TF mode and norm are fixed at construction; `fit` learns the IDF table.
#[derive(Debug, Clone)]
pub struct TfidfTransformer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    mode: TermFrequencyMode,
    norm: VectorNorm,
    idf: Option<IdfTable>,
    _marker: PhantomData<E>,
}

impl<E> TfidfTransformer<E>
where
    E: TFIDFEngine,
{
    pub fn new(mode: TermFrequencyMode, norm: VectorNorm) -> Self {
        Self {
            mode,
            norm,
            idf: None,
            _marker: PhantomData,
        }
    }

    /// Transformer around an already fitted table.
    pub fn with_idf(idf: IdfTable, mode: TermFrequencyMode, norm: VectorNorm) -> Self {
        Self {
            mode,
            norm,
            idf: Some(idf),
            _marker: PhantomData,
        }
    }

    /// Learn IDF weights from `matrix`, replacing any previous table.
    ///
    /// On error the previous table is kept.
    pub fn fit(&mut self, matrix: &DocumentTermMatrix<u32>) -> Result<&IdfTable> {
        let table = IdfTable::fit::<E>(matrix)?;
        Ok(&*self.idf.insert(table))
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.idf.is_some()
    }

    pub fn idf(&self) -> Result<&IdfTable> {
        self.idf.as_ref().ok_or(VectorizerError::UnfittedTransformer)
    }

    #[inline]
    pub fn mode(&self) -> TermFrequencyMode {
        self.mode
    }

    #[inline]
    pub fn norm(&self) -> VectorNorm {
        self.norm
    }

    pub fn transform(&self, count_vec: &SparseVec<u32>) -> Result<SparseVec<f64>> {
        tfidf_transform::<E>(count_vec, self.idf()?, self.mode, self.norm)
    }

    /// Re-weight every row; either every row succeeds or nothing is returned.
    pub fn transform_many(&self, matrix: &DocumentTermMatrix<u32>) -> Result<DocumentTermMatrix<f64>>
    where
        E: Sync,
    {
        let idf = self.idf()?;
        let rows = matrix
            .rows()
            .par_iter()
            .map(|row| tfidf_transform::<E>(row, idf, self.mode, self.norm))
            .collect::<Result<Vec<_>>>()?;
        DocumentTermMatrix::from_rows(matrix.dim(), rows)
    }
}

impl<E> Default for TfidfTransformer<E>
where
    E: TFIDFEngine,
{
    fn default() -> Self {
        Self::new(TermFrequencyMode::default(), VectorNorm::default())
    }
}
