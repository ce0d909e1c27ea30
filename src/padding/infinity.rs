//! Replacement of non-finite diagram values.
//!
//! Essential features (e.g. the H₀ class that never dies) come out of a
//! persistence engine with death = +∞. They are kept by swapping the
//! infinity for a large finite value, typically the largest filtration
//! value of the complex, before degenerate points are filtered.

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::diagram::{HomologyDimensions, Scalar};
use crate::error::{PaddingError, Result};

/// Finite value substituted for ±∞ and NaN
#[derive(Debug, Clone, PartialEq)]
pub enum InfinityValue<F> {
    /// Same value for every dimension
    Uniform(F),
    /// One value per homology dimension
    PerDimension(BTreeMap<usize, F>),
}

impl<F: Scalar> InfinityValue<F> {
    /// Value to use for dimension `dim`
    pub fn for_dimension(&self, dim: usize) -> Result<F> {
        match self {
            Self::Uniform(v) => Ok(*v),
            Self::PerDimension(map) => map.get(&dim).copied().ok_or_else(|| {
                PaddingError::invalid_config(format!(
                    "no infinity value given for homology dimension {}",
                    dim
                ))
            }),
        }
    }

    /// Every dimension must resolve to a finite value.
    pub fn validate(&self, dims: &HomologyDimensions) -> Result<()> {
        for dim in dims {
            let v = self.for_dimension(dim)?;
            if !v.is_finite() {
                return Err(PaddingError::invalid_config(format!(
                    "infinity value for dimension {} must be finite, got {:?}",
                    dim, v
                )));
            }
        }
        Ok(())
    }
}

impl<F: Scalar> From<F> for InfinityValue<F> {
    fn from(value: F) -> Self {
        Self::Uniform(value)
    }
}

impl<F: Scalar> From<BTreeMap<usize, F>> for InfinityValue<F> {
    fn from(map: BTreeMap<usize, F>) -> Self {
        Self::PerDimension(map)
    }
}

/// Copy of `points` with every non-finite entry set to `value`.
///
/// Returns the new array and the number of entries replaced.
pub fn substitute_non_finite<F: Scalar>(points: &Array2<F>, value: F) -> (Array2<F>, usize) {
    let mut replaced = 0;
    let out = points.mapv(|x| {
        if x.is_finite() {
            x
        } else {
            replaced += 1;
            value
        }
    });
    (out, replaced)
}
