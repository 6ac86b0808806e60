//! Per-species value vectors.
//!
//! Every flux, density, and rate produced by the kernels is a
//! [`SpeciesVector`]. Entry `k` always refers to species `k` in the
//! property provider's ordering.

use std::ops::{Index, Mul, Neg};

use serde::{Deserialize, Serialize};

use crate::flux::FluxError;

/// Ordered sequence of per-species scalars.
///
/// # Example
///
/// ```
/// use pemfc_transport::types::SpeciesVector;
///
/// let rho_k = SpeciesVector::from(vec![0.2, 0.8]);
/// let scaled = 2.0 * &rho_k;
/// assert_eq!(scaled.as_slice(), &[0.4, 1.6]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesVector(Vec<f64>);

impl SpeciesVector {
    /// Wrap an existing vector.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Exact zero vector for `n_species` species.
    pub fn zeros(n_species: usize) -> Self {
        Self(vec![0.0; n_species])
    }

    /// Number of species.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Sum over all species.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True if every entry is exactly zero (either sign).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// True if every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Apply `f` to each entry.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        self.0.iter().map(|&v| f(v)).collect()
    }

    /// Combine two vectors entry by entry.
    ///
    /// # Errors
    /// [`FluxError::SpeciesCountMismatch`] if the operands differ in length.
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self, FluxError> {
        if self.len() != other.len() {
            return Err(FluxError::SpeciesCountMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }

    /// Elementwise sum, failing on a species count mismatch.
    pub fn try_add(&self, other: &Self) -> Result<Self, FluxError> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Elementwise difference `self - other`, failing on a species count
    /// mismatch.
    pub fn try_sub(&self, other: &Self) -> Result<Self, FluxError> {
        self.zip_map(other, |a, b| a - b)
    }
}

impl From<Vec<f64>> for SpeciesVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for SpeciesVector {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for SpeciesVector {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl FromIterator<f64> for SpeciesVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SpeciesVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<usize> for SpeciesVector {
    type Output = f64;

    #[inline]
    fn index(&self, k: usize) -> &f64 {
        &self.0[k]
    }
}

impl Neg for &SpeciesVector {
    type Output = SpeciesVector;

    fn neg(self) -> SpeciesVector {
        self.map(|v| -v)
    }
}

impl Neg for SpeciesVector {
    type Output = SpeciesVector;

    fn neg(self) -> SpeciesVector {
        -&self
    }
}

impl Mul<f64> for &SpeciesVector {
    type Output = SpeciesVector;

    fn mul(self, scalar: f64) -> SpeciesVector {
        self.map(|v| v * scalar)
    }
}

impl Mul<f64> for SpeciesVector {
    type Output = SpeciesVector;

    fn mul(self, scalar: f64) -> SpeciesVector {
        &self * scalar
    }
}

impl Mul<&SpeciesVector> for f64 {
    type Output = SpeciesVector;

    fn mul(self, vector: &SpeciesVector) -> SpeciesVector {
        vector.map(|v| self * v)
    }
}

impl Mul<SpeciesVector> for f64 {
    type Output = SpeciesVector;

    fn mul(self, vector: SpeciesVector) -> SpeciesVector {
        self * &vector
    }
}
