pub mod math;
pub mod serde;

use std::fmt::{self, Debug};

use num::Num;

/// SparseVec is a sparse vector that stores only its non-zero elements.
///
/// It keeps two parallel buffers, `inds` and `vals`, plus the logical
/// dimension `len`. Indices are kept strictly ascending and every stored
/// value is non-zero; absent indices read as zero.
#[derive(Clone, PartialEq)]
pub struct SparseVec<N>
where
    N: Num,
{
    inds: Vec<usize>,
    vals: Vec<N>,
    len: usize,
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// All-zero vector of dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        SparseVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    #[inline]
    pub fn with_capacity(len: usize, cap: usize) -> Self {
        SparseVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len,
        }
    }

    /// Build from a dense vector, dropping zero elements.
    #[inline]
    pub fn from_vec(vec: Vec<N>) -> Self {
        let mut sp_vec = SparseVec::with_capacity(0, vec.len());
        for elem in vec {
            sp_vec.push(elem);
        }
        sp_vec
    }

    /// Build from `(index, value)` pairs in any order.
    ///
    /// Pairs sharing an index are summed and zero results are dropped.
    ///
    /// # Panics
    /// If an index is not below `len`.
    pub fn from_pairs(len: usize, mut pairs: Vec<(usize, N)>) -> Self {
        pairs.sort_unstable_by_key(|(idx, _)| *idx);
        let mut sp_vec = SparseVec::with_capacity(len, pairs.len());
        for (idx, val) in pairs {
            assert!(idx < len, "index {} out of bounds for dimension {}", idx, len);
            match sp_vec.inds.last() {
                Some(&last) if last == idx => {
                    let tail = sp_vec.vals.len() - 1;
                    sp_vec.vals[tail] = sp_vec.vals[tail] + val;
                }
                _ => {
                    sp_vec.inds.push(idx);
                    sp_vec.vals.push(val);
                }
            }
        }
        sp_vec.drop_zeros();
        sp_vec
    }

    /// Append one logical element at position `len`.
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    /// Logical dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// true when no element is stored
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// `None` outside the dimension, zero for absent indices.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&index) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    /// Iterate the stored `(index, value)` pairs in ascending index order.
    #[inline]
    pub fn raw_iter(&self) -> SparseVecRawIter<'_, N> {
        SparseVecRawIter {
            vec: self,
            pos: 0,
        }
    }

    /// Iterate every logical element, zeros included.
    #[inline]
    pub fn iter(&self) -> SparseVecIter<'_, N> {
        SparseVecIter {
            vec: self,
            pos: 0,
            raw_pos: 0,
        }
    }

    /// Dense copy, `len` elements long
    pub fn to_dense(&self) -> Vec<N> {
        self.iter().collect()
    }

    /// Apply `f` to every stored value, dropping results that become zero.
    pub fn map_values<M, F>(&self, mut f: F) -> SparseVec<M>
    where
        M: Num + Copy,
        F: FnMut(usize, N) -> M,
    {
        let mut out = SparseVec::with_capacity(self.len, self.nnz());
        for (idx, val) in self.raw_iter() {
            let mapped = f(idx, *val);
            if mapped != M::zero() {
                out.inds.push(idx);
                out.vals.push(mapped);
            }
        }
        out
    }

    #[inline]
    fn drop_zeros(&mut self) {
        let mut keep = 0;
        for pos in 0..self.inds.len() {
            if self.vals[pos] != N::zero() {
                self.inds[keep] = self.inds[pos];
                self.vals[keep] = self.vals[pos];
                keep += 1;
            }
        }
        self.inds.truncate(keep);
        self.vals.truncate(keep);
    }
}

impl<N> Default for SparseVec<N>
where
    N: Num + Copy,
{
    #[inline]
    fn default() -> Self {
        SparseVec::new(0)
    }
}

impl<N> Debug for SparseVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_list().entries(self.iter()).finish()
        } else {
            f.debug_struct("SparseVec")
                .field("len", &self.len)
                .field("entries", &self.raw_iter().collect::<Vec<_>>())
                .finish()
        }
    }
}

pub struct SparseVecRawIter<'a, N>
where
    N: Num,
{
    vec: &'a SparseVec<N>,
    pos: usize,
}

impl<'a, N> Iterator for SparseVecRawIter<'a, N>
where
    N: Num,
{
    type Item = (usize, &'a N);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = *self.vec.inds.get(self.pos)?;
        let value = &self.vec.vals[self.pos];
        self.pos += 1;
        Some((index, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.vec.inds.len() - self.pos;
        (rest, Some(rest))
    }
}

impl<'a, N> ExactSizeIterator for SparseVecRawIter<'a, N> where N: Num {}

pub struct SparseVecIter<'a, N>
where
    N: Num,
{
    vec: &'a SparseVec<N>,
    pos: usize,
    raw_pos: usize,
}

impl<'a, N> Iterator for SparseVecIter<'a, N>
where
    N: Num + Copy,
{
    type Item = N;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.vec.len {
            return None;
        }
        let value = match self.vec.inds.get(self.raw_pos) {
            Some(&idx) if idx == self.pos => {
                self.raw_pos += 1;
                self.vec.vals[self.raw_pos - 1]
            }
            _ => N::zero(),
        };
        self.pos += 1;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_merges_and_drops_zeros() {
        let v = SparseVec::from_pairs(6, vec![(4, 2u32), (1, 1), (4, 1), (2, 0)]);
        assert_eq!(v.len(), 6);
        assert_eq!(v.indices(), &[1, 4]);
        assert_eq!(v.values(), &[1, 3]);
    }

    #[test]
    fn get_reads_zero_for_absent_and_none_outside() {
        let v = SparseVec::from_vec(vec![0.0, 2.5, 0.0]);
        assert_eq!(v.nnz(), 1);
        assert_eq!(v.get(0), Some(0.0));
        assert_eq!(v.get(1), Some(2.5));
        assert_eq!(v.get(3), None);
    }

    #[test]
    fn dense_view_matches_logical_elements() {
        let v = SparseVec::from_pairs(5, vec![(0, 1u32), (3, 7)]);
        assert_eq!(v.to_dense(), vec![1, 0, 0, 7, 0]);
        assert_eq!(format!("{:#?}", SparseVec::<u32>::new(2)).replace(['\n', ' '], ""), "[0,0,]");
    }

    #[test]
    fn map_values_drops_new_zeros() {
        let v = SparseVec::from_pairs(4, vec![(0, 1u32), (2, 2)]);
        let m: SparseVec<f64> = v.map_values(|idx, val| if idx == 0 { 0.0 } else { val as f64 * 0.5 });
        assert_eq!(m.indices(), &[2]);
        assert_eq!(m.values(), &[1.0]);
        assert_eq!(m.len(), 4);
    }

    #[test]
    #[should_panic]
    fn from_pairs_rejects_out_of_range_index() {
        let _ = SparseVec::from_pairs(2, vec![(2, 1u32)]);
    }
}
