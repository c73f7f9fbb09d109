use std::{cmp::Ordering, ops::AddAssign};

use num::Num;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// Dot product computed by merging the two ascending index lists.
    ///
    /// Dimensions absent from either side contribute nothing.
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let (self_inds, self_vals) = (self.indices(), self.values());
        let (other_inds, other_vals) = (other.indices(), other.values());

        let mut i = 0;
        let mut j = 0;
        while i < self_inds.len() && j < other_inds.len() {
            match self_inds[i].cmp(&other_inds[j]) {
                Ordering::Equal => {
                    result += self_vals[i].into() * other_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for val in self.values() {
            let val: R = (*val).into();
            result += val * val;
        }
        result
    }

    /// Euclidean length.
    ///
    /// Computed on values divided by the largest magnitude, so weights near
    /// `f64::MAX` do not overflow when squared.
    #[inline]
    pub fn norm(&self) -> f64
    where
        N: Into<f64>,
    {
        let (scale, unit_norm) = self.scaled_norm();
        scale * unit_norm
    }

    /// Largest stored magnitude and the length of the vector divided by it.
    ///
    /// `(0.0, 0.0)` for a zero vector.
    pub(crate) fn scaled_norm(&self) -> (f64, f64)
    where
        N: Into<f64>,
    {
        let scale = self
            .values()
            .iter()
            .map(|val| Into::<f64>::into(*val).abs())
            .fold(0.0, f64::max);
        if scale == 0.0 || !scale.is_finite() {
            return (scale, 0.0);
        }
        let sum_sq: f64 = self
            .values()
            .iter()
            .map(|val| {
                let x = Into::<f64>::into(*val) / scale;
                x * x
            })
            .sum();
        (scale, sum_sq.sqrt())
    }

    /// Sum of all stored values
    #[inline]
    pub fn sum<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for val in self.values() {
            result += (*val).into();
        }
        result
    }

    /// Cosine similarity `A·B / (|A||B|)`.
    ///
    /// Defined as 0.0 when either vector has zero magnitude. Always in
    /// `[0, 1]` for non-negative weights, whatever their size.
    pub fn cosine_similarity(&self, other: &Self) -> f64
    where
        N: Into<f64>,
    {
        self.cosine_with_scaled_norm(other, other.scaled_norm())
    }

    /// `cosine_similarity` with `other.scaled_norm()` computed by the caller.
    pub(crate) fn cosine_with_scaled_norm(&self, other: &Self, other_norm: (f64, f64)) -> f64
    where
        N: Into<f64>,
    {
        let (scale_a, unit_a) = self.scaled_norm();
        let (scale_b, unit_b) = other_norm;
        if unit_a == 0.0 || unit_b == 0.0 {
            return 0.0;
        }
        // dot product of both vectors divided by their scales
        let (self_inds, self_vals) = (self.indices(), self.values());
        let (other_inds, other_vals) = (other.indices(), other.values());
        let mut dot = 0.0f64;
        let mut i = 0;
        let mut j = 0;
        while i < self_inds.len() && j < other_inds.len() {
            match self_inds[i].cmp(&other_inds[j]) {
                Ordering::Equal => {
                    let a = Into::<f64>::into(self_vals[i]) / scale_a;
                    let b = Into::<f64>::into(other_vals[j]) / scale_b;
                    dot += a * b;
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        let score = dot / (unit_a * unit_b);
        if !score.is_finite() {
            return 0.0;
        }
        // rounding can push self-similarity a hair past 1
        score.clamp(0.0, 1.0)
    }
}

impl SparseVec<f64> {
    /// Scale to unit length. A zero vector is returned unchanged.
    pub fn l2_normalized(&self) -> SparseVec<f64> {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        self.map_values(|_, val| val / norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_skips_disjoint_indices() {
        let a = SparseVec::from_pairs(5, vec![(0, 1u32), (2, 3), (4, 1)]);
        let b = SparseVec::from_pairs(5, vec![(1, 9u32), (2, 2), (4, 5)]);
        assert_eq!(a.dot::<f64>(&b), 11.0);
        assert_eq!(a.norm_sq::<f64>(), 11.0);
        assert_eq!(a.sum::<u64>(), 5);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let a = SparseVec::from_pairs(3, vec![(1, 2.0)]);
        let z = SparseVec::<f64>::new(3);
        assert_eq!(a.cosine_similarity(&z), 0.0);
        assert_eq!(z.cosine_similarity(&z), 0.0);
    }

    #[test]
    fn cosine_of_self_is_one() {
        let a = SparseVec::from_pairs(4, vec![(0, 3u32), (3, 4)]);
        assert!((a.cosine_similarity(&a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn huge_weights_do_not_overflow() {
        let a = SparseVec::from_pairs(2, vec![(0, 1e200)]);
        let b = SparseVec::from_pairs(2, vec![(0, 1e200), (1, 1e200)]);
        assert_eq!(a.norm(), 1e200);
        assert!((a.cosine_similarity(&a) - 1.0).abs() < 1e-12);
        assert!((a.cosine_similarity(&b) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((a.l2_normalized().norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn l2_normalized_has_unit_length() {
        let a = SparseVec::from_pairs(4, vec![(0, 3.0), (3, 4.0)]);
        let n = a.l2_normalized();
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert_eq!(n.get(0), Some(0.6));
        assert!(SparseVec::<f64>::new(2).l2_normalized().is_zero());
    }
}
