//! Padded batch: the output tensor together with its shape parameters.

use std::ops::Range;

use ndarray::{Array3, ArrayView2, Axis};

use super::ShapeParameters;
use crate::diagram::Scalar;

/// Result of normalizing a batch.
///
/// `tensor` has shape (n_samples, N, 3) with rows `(birth, death, dim)`.
#[derive(Debug, Clone)]
pub struct PaddedBatch<F> {
    tensor: Array3<F>,
    shape: ShapeParameters<F>,
}

impl<F: Scalar> PaddedBatch<F> {
    pub(crate) fn new(tensor: Array3<F>, shape: ShapeParameters<F>) -> Self {
        Self { tensor, shape }
    }

    pub fn tensor(&self) -> &Array3<F> {
        &self.tensor
    }

    pub fn shape_parameters(&self) -> &ShapeParameters<F> {
        &self.shape
    }

    pub fn n_samples(&self) -> usize {
        self.tensor.len_of(Axis(0))
    }

    /// Rows per sample (N)
    pub fn n_rows(&self) -> usize {
        self.tensor.len_of(Axis(1))
    }

    /// (N, 3) view of sample `i`
    pub fn sample(&self, i: usize) -> Option<ArrayView2<'_, F>> {
        (i < self.n_samples()).then(|| self.tensor.index_axis(Axis(0), i))
    }

    /// Row range occupied by dimension `dim` inside every sample
    pub fn dimension_block(&self, dim: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for d in self.shape.dimensions() {
            let len = self.shape.block_len(d);
            if d == dim {
                return Some(start..start + len);
            }
            start += len;
        }
        None
    }

    pub fn into_tensor(self) -> Array3<F> {
        self.tensor
    }

    pub fn into_parts(self) -> (Array3<F>, ShapeParameters<F>) {
        (self.tensor, self.shape)
    }
}
