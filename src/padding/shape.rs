//! Batch-wide shape parameters.

use std::collections::BTreeMap;

use crate::diagram::{Diagram, HomologyDimensions, Scalar};
use crate::error::{PaddingError, Result};

/// Per-dimension point budget and padding value shared by a batch.
///
/// Derived once from the cleaned batch and read-only afterwards, so it
/// can be shared by reference across padding workers.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeParameters<F> {
    dims: HomologyDimensions,
    max_n_points: BTreeMap<usize, usize>,
    min_value: BTreeMap<usize, F>,
}

impl<F: Scalar> ShapeParameters<F> {
    /// Aggregate over a batch that has already been cleaned
    /// (non-finite values substituted, degenerate points removed).
    ///
    /// - `max_n_points[d] = max(1, max over samples of n_points(d))`
    /// - `min_value[d]` = smallest birth in dimension `d`, or 0 when no
    ///   sample has a point there
    pub fn compute(batch: &[Diagram<F>], dims: &HomologyDimensions) -> Result<Self> {
        if batch.is_empty() {
            return Err(PaddingError::EmptyBatch);
        }

        let mut max_n_points = BTreeMap::new();
        let mut min_value = BTreeMap::new();

        for dim in dims {
            let mut max_n = 0usize;
            let mut min_birth = F::infinity();

            for (i, diagram) in batch.iter().enumerate() {
                let points = diagram
                    .points(dim)
                    .ok_or_else(|| PaddingError::shape_mismatch(Some(i), dim))?;
                max_n = max_n.max(points.nrows());
                min_birth = points.column(0).iter().fold(min_birth, |acc, &b| acc.min(b));
            }

            max_n_points.insert(dim, max_n.max(1));
            // Dimension empty across the whole batch
            if min_birth.is_infinite() {
                min_birth = F::zero();
            }
            min_value.insert(dim, min_birth);
        }

        Ok(Self {
            dims: dims.clone(),
            max_n_points,
            min_value,
        })
    }

    /// Assemble from explicit mappings; both must cover every dimension.
    pub fn from_parts(
        dims: HomologyDimensions,
        max_n_points: BTreeMap<usize, usize>,
        min_value: BTreeMap<usize, F>,
    ) -> Result<Self> {
        for dim in &dims {
            if !max_n_points.contains_key(&dim) || !min_value.contains_key(&dim) {
                return Err(PaddingError::invalid_config(format!(
                    "shape parameters do not cover homology dimension {}",
                    dim
                )));
            }
        }
        Ok(Self {
            dims,
            max_n_points,
            min_value,
        })
    }

    pub fn dimensions(&self) -> &HomologyDimensions {
        &self.dims
    }

    pub fn max_n_points(&self) -> &BTreeMap<usize, usize> {
        &self.max_n_points
    }

    pub fn min_value(&self) -> &BTreeMap<usize, F> {
        &self.min_value
    }

    /// Rows occupied by dimension `dim` in every padded sample
    pub fn block_len(&self, dim: usize) -> usize {
        self.max_n_points.get(&dim).map_or(0, |&n| n.max(1))
    }

    /// Rows per padded sample, N = Σ_d max_n_points[d]
    pub fn n_rows(&self) -> usize {
        self.dims.iter().map(|d| self.block_len(d)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_compute_max_and_min() {
        let dims = HomologyDimensions::up_to(1);
        let batch = vec![
            Diagram::new()
                .with(0, array![[0.0, 1.0], [0.5, 2.0]])
                .with(1, Array2::zeros((0, 2))),
            Diagram::new()
                .with(0, array![[0.0, 0.5]])
                .with(1, array![[1.0, 3.0]]),
        ];

        let shape = ShapeParameters::compute(&batch, &dims).unwrap();
        assert_eq!(shape.max_n_points()[&0], 2);
        assert_eq!(shape.max_n_points()[&1], 1);
        assert_eq!(shape.min_value()[&0], 0.0);
        assert_eq!(shape.min_value()[&1], 1.0);
        assert_eq!(shape.n_rows(), 3);
    }

    #[test]
    fn test_empty_dimension_floors() {
        let dims = HomologyDimensions::new([0, 2]).unwrap();
        let batch = vec![
            Diagram::new()
                .with(0, array![[0.25, 1.0]])
                .with(2, Array2::<f32>::zeros((0, 2))),
            Diagram::new()
                .with(0, array![[0.5, 1.0]])
                .with(2, Array2::<f32>::zeros((0, 2))),
        ];

        let shape = ShapeParameters::compute(&batch, &dims).unwrap();
        assert_eq!(shape.max_n_points()[&2], 1);
        assert_eq!(shape.min_value()[&2], 0.0);
        assert_eq!(shape.min_value()[&0], 0.25);
    }

    #[test]
    fn test_negative_births_are_the_minimum() {
        let dims = HomologyDimensions::up_to(0);
        let batch = vec![Diagram::new().with(0, array![[-3.0, -1.0], [2.0, 5.0]])];
        let shape = ShapeParameters::compute(&batch, &dims).unwrap();
        assert_eq!(shape.min_value()[&0], -3.0);
    }

    #[test]
    fn test_compute_empty_batch() {
        let batch: Vec<Diagram<f64>> = vec![];
        assert_eq!(
            ShapeParameters::compute(&batch, &HomologyDimensions::up_to(0)),
            Err(PaddingError::EmptyBatch)
        );
    }

    #[test]
    fn test_from_parts_requires_full_cover() {
        let dims = HomologyDimensions::up_to(1);
        let max_n: BTreeMap<usize, usize> = [(0, 2)].into_iter().collect();
        let min_v: BTreeMap<usize, f64> = [(0, 0.0), (1, 0.0)].into_iter().collect();
        assert!(ShapeParameters::from_parts(dims, max_n, min_v).is_err());
    }
}
