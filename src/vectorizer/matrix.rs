use num::Num;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{Result, VectorizerError};
use crate::utils::math::vector::SparseVec;

/// One sparse row per document, in corpus order. Shape `D × N`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentTermMatrix<N>
where
    N: Num + Copy,
{
    rows: Vec<SparseVec<N>>,
    dim: usize,
}

impl<N> DocumentTermMatrix<N>
where
    N: Num + Copy,
{
    /// Every row must have dimension `dim`.
    pub fn from_rows(dim: usize, rows: Vec<SparseVec<N>>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|row| row.len() != dim) {
            return Err(VectorizerError::VocabularyMismatch {
                expected: dim,
                found: row.len(),
            });
        }
        Ok(DocumentTermMatrix { rows, dim })
    }

    /// Caller guarantees every row has dimension `dim`.
    #[inline]
    pub(crate) fn from_rows_unchecked(dim: usize, rows: Vec<SparseVec<N>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == dim));
        DocumentTermMatrix { rows, dim }
    }

    /// Number of documents D
    #[inline]
    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    /// Vocabulary size N
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.dim)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn row(&self, doc_index: usize) -> Option<&SparseVec<N>> {
        self.rows.get(doc_index)
    }

    #[inline]
    pub fn rows(&self) -> &[SparseVec<N>] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SparseVec<N>> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<SparseVec<N>> {
        self.rows
    }

    /// Total stored entries across all rows
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseVec::nnz).sum()
    }

    /// Fails with `VocabularyMismatch` unless `vec` lives in this matrix's
    /// index space.
    #[inline]
    pub fn check_dim(&self, vec: &SparseVec<N>) -> Result<()> {
        if vec.len() != self.dim {
            return Err(VectorizerError::VocabularyMismatch {
                expected: self.dim,
                found: vec.len(),
            });
        }
        Ok(())
    }
}

impl<'a, N> IntoIterator for &'a DocumentTermMatrix<N>
where
    N: Num + Copy,
{
    type Item = &'a SparseVec<N>;
    type IntoIter = std::slice::Iter<'a, SparseVec<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<'de, N> Deserialize<'de> for DocumentTermMatrix<N>
where
    N: Num + Copy + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(bound = "N: Num + Copy + Deserialize<'de>")]
        struct MatrixRepr<N>
        where
            N: Num + Copy,
        {
            rows: Vec<SparseVec<N>>,
            dim: usize,
        }

        let repr = MatrixRepr::<N>::deserialize(deserializer)?;
        DocumentTermMatrix::from_rows(repr.dim, repr.rows).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_must_share_dimension() {
        let ok = DocumentTermMatrix::from_rows(3, vec![SparseVec::<u32>::new(3), SparseVec::new(3)]).unwrap();
        assert_eq!(ok.shape(), (2, 3));
        let err = DocumentTermMatrix::from_rows(3, vec![SparseVec::<u32>::new(3), SparseVec::new(4)]);
        assert_eq!(err, Err(VectorizerError::VocabularyMismatch { expected: 3, found: 4 }));
    }

    #[test]
    fn check_dim_reports_both_sizes() {
        let m = DocumentTermMatrix::from_rows(2, vec![SparseVec::from_pairs(2, vec![(1, 1u32)])]).unwrap();
        assert!(m.check_dim(&SparseVec::new(2)).is_ok());
        assert_eq!(
            m.check_dim(&SparseVec::new(5)),
            Err(VectorizerError::VocabularyMismatch { expected: 2, found: 5 })
        );
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    fn decoding_rejects_rows_of_another_dimension() {
        #[derive(Serialize)]
        struct Repr {
            rows: Vec<SparseVec<u32>>,
            dim: usize,
        }

        let good = DocumentTermMatrix::from_rows(3, vec![SparseVec::from_pairs(3, vec![(2, 4u32)])]).unwrap();
        let bytes = serde_cbor::to_vec(&good).unwrap();
        assert_eq!(serde_cbor::from_slice::<DocumentTermMatrix<u32>>(&bytes).unwrap(), good);

        let bad = Repr {
            rows: vec![SparseVec::from_pairs(5, vec![(4, 1u32)])],
            dim: 3,
        };
        let bytes = serde_cbor::to_vec(&bad).unwrap();
        assert!(serde_cbor::from_slice::<DocumentTermMatrix<u32>>(&bytes).is_err());
    }
}
