//! Per-sample padding and dimension tagging.
//!
//! For every homology dimension d, in batch order:
//!
//! ```text
//!   [b₁ d₁]            [b₁ d₁ d]
//!   [b₂ d₂]     ──▶    [b₂ d₂ d]
//!                      [m  m  d]   ← padding, m = min_value[d]
//!                      [m  m  d]
//! ```
//!
//! The blocks are stacked vertically into one (N, 3) array. Padding rows
//! have zero persistence, so downstream vectorizations treat them as
//! points on the diagonal.

use std::collections::BTreeMap;

use ndarray::{concatenate, s, Array2, ArrayView2, Axis};

use super::ShapeParameters;
use crate::diagram::{Diagram, HomologyDimensions, Scalar};
use crate::error::{PaddingError, Result};

/// Pads single samples against a fixed set of shape parameters
#[derive(Debug, Clone, Copy)]
pub struct SamplePadder<'a, F> {
    shape: &'a ShapeParameters<F>,
}

impl<'a, F: Scalar> SamplePadder<'a, F> {
    pub fn new(shape: &'a ShapeParameters<F>) -> Self {
        Self { shape }
    }

    /// Pad one cleaned diagram to shape (N, 3)
    pub fn pad(&self, diagram: &Diagram<F>) -> Result<Array2<F>> {
        pad(
            diagram,
            self.shape.dimensions(),
            self.shape.max_n_points(),
            self.shape.min_value(),
        )
    }
}

/// Pad every dimension of `diagram` to `max_n_points[dim]` rows, tag rows
/// with their dimension and stack the blocks in `dims` order.
///
/// A dimension with no points and a budget of zero still gets one
/// padding row so that it never disappears from the output.
pub fn pad<F: Scalar>(
    diagram: &Diagram<F>,
    dims: &HomologyDimensions,
    max_n_points: &BTreeMap<usize, usize>,
    min_value: &BTreeMap<usize, F>,
) -> Result<Array2<F>> {
    let mut blocks = Vec::with_capacity(dims.len());

    for dim in dims {
        let points = diagram
            .points(dim)
            .ok_or_else(|| PaddingError::shape_mismatch(None, dim))?;
        if points.ncols() != 2 {
            return Err(PaddingError::invalid_diagram(None, dim, points.ncols()));
        }

        let (max_n, fill) = match (max_n_points.get(&dim), min_value.get(&dim)) {
            (Some(&m), Some(&v)) => (m, v),
            _ => {
                return Err(PaddingError::invalid_config(format!(
                    "shape parameters do not cover homology dimension {}",
                    dim
                )))
            }
        };

        let n = points.nrows();
        if n > max_n {
            return Err(PaddingError::invalid_config(format!(
                "dimension {} has {} points but max_n_points is {}",
                dim, n, max_n
            )));
        }

        let mut need = max_n - n;
        if n == 0 && need == 0 {
            need = 1;
        }

        blocks.push(tag_block(points.view(), need, fill, dim));
    }

    let views: Vec<ArrayView2<F>> = blocks.iter().map(|b| b.view()).collect();
    concatenate(Axis(0), &views).map_err(|e| PaddingError::worker_failure(None, e.to_string()))
}

/// Real rows, then `need` rows of (fill, fill), with a constant third column.
fn tag_block<F: Scalar>(points: ArrayView2<F>, need: usize, fill: F, dim: usize) -> Array2<F> {
    let n = points.nrows();
    let mut block = Array2::from_elem((n + need, 3), fill);
    block.slice_mut(s![..n, ..2]).assign(&points);
    block.column_mut(2).fill(F::from_dimension(dim));
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn shape(max_n: &[(usize, usize)], min_v: &[(usize, f64)]) -> ShapeParameters<f64> {
        let dims = HomologyDimensions::new(max_n.iter().map(|&(d, _)| d)).unwrap();
        ShapeParameters::from_parts(
            dims,
            max_n.iter().copied().collect(),
            min_v.iter().copied().collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_pad_appends_min_value_rows() {
        let params = shape(&[(0, 2), (1, 1)], &[(0, 0.0), (1, 1.0)]);
        let pd = Diagram::new()
            .with(0, array![[0.0, 0.5]])
            .with(1, array![[1.0, 3.0]]);

        let out = SamplePadder::new(&params).pad(&pd).unwrap();
        assert_eq!(out, array![[0.0, 0.5, 0.0], [0.0, 0.0, 0.0], [1.0, 3.0, 1.0]]);
    }

    #[test]
    fn test_pad_empty_dimension() {
        let params = shape(&[(0, 2), (1, 1)], &[(0, 0.0), (1, 1.0)]);
        let pd = Diagram::new()
            .with(0, array![[0.0, 1.0], [0.5, 2.0]])
            .with(1, Array2::zeros((0, 2)));

        let out = SamplePadder::new(&params).pad(&pd).unwrap();
        assert_eq!(out, array![[0.0, 1.0, 0.0], [0.5, 2.0, 0.0], [1.0, 1.0, 1.0]]);
    }

    #[test]
    fn test_zero_budget_still_yields_one_row() {
        let dims = HomologyDimensions::new([0, 1]).unwrap();
        let max_n: BTreeMap<usize, usize> = [(0, 1), (1, 0)].into_iter().collect();
        let min_v: BTreeMap<usize, f64> = [(0, 0.0), (1, 0.25)].into_iter().collect();
        let pd = Diagram::new()
            .with(0, array![[0.0, 1.0]])
            .with(1, Array2::zeros((0, 2)));

        let out = pad(&pd, &dims, &max_n, &min_v).unwrap();
        assert_eq!(out, array![[0.0, 1.0, 0.0], [0.25, 0.25, 1.0]]);
    }

    #[test]
    fn test_block_order_follows_dims() {
        let params = shape(&[(1, 1), (0, 1)], &[(1, 0.0), (0, 0.0)]);
        let pd = Diagram::new()
            .with(0, array![[0.0, 1.0]])
            .with(1, array![[2.0, 3.0]]);

        let out = SamplePadder::new(&params).pad(&pd).unwrap();
        assert_eq!(out, array![[2.0, 3.0, 1.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_wrong_column_count() {
        let params = shape(&[(0, 1)], &[(0, 0.0)]);
        let pd = Diagram::new().with(0, array![[0.0, 1.0, 0.0]]);

        assert_eq!(
            SamplePadder::new(&params).pad(&pd),
            Err(PaddingError::invalid_diagram(None, 0, 3))
        );
    }

    #[test]
    fn test_too_many_points_for_budget() {
        let params = shape(&[(0, 1)], &[(0, 0.0)]);
        let pd = Diagram::new().with(0, array![[0.0, 1.0], [0.0, 2.0]]);

        assert!(matches!(
            SamplePadder::new(&params).pad(&pd),
            Err(PaddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_f32_dimension_column() {
        let dims = HomologyDimensions::new([3]).unwrap();
        let max_n: BTreeMap<usize, usize> = [(3, 2)].into_iter().collect();
        let min_v: BTreeMap<usize, f32> = [(3, 0.5f32)].into_iter().collect();
        let pd = Diagram::new().with(3, array![[0.5f32, 0.75]]);

        let out = pad(&pd, &dims, &max_n, &min_v).unwrap();
        assert_eq!(out, array![[0.5f32, 0.75, 3.0], [0.5, 0.5, 3.0]]);
    }
}
