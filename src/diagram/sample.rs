//! Persistence diagram keyed by homology dimension.

use std::collections::BTreeMap;

use ndarray::Array2;

use super::{HomologyDimensions, Scalar};
use crate::error::{PaddingError, Result};

/// One sample's persistence diagram: dimension -> `[birth, death]` rows
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram<F> {
    points: BTreeMap<usize, Array2<F>>,
}

impl<F: Scalar> Diagram<F> {
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, dim: usize, points: Array2<F>) -> Self {
        self.insert(dim, points);
        self
    }

    /// Set the point collection of a dimension, replacing any previous one
    pub fn insert(&mut self, dim: usize, points: Array2<F>) -> Option<Array2<F>> {
        self.points.insert(dim, points)
    }

    /// Build from flat (birth, death, dimension) triples.
    ///
    /// Every dimension in `dims` gets an entry (possibly with zero rows);
    /// triples whose dimension is not in `dims` are ignored.
    pub fn from_intervals(intervals: &[(F, F, usize)], dims: &HomologyDimensions) -> Self {
        let mut diagram = Self::new();

        for dim in dims {
            let rows: Vec<F> = intervals
                .iter()
                .filter(|&&(_, _, d)| d == dim)
                .flat_map(|&(b, d, _)| [b, d])
                .collect();
            let n = rows.len() / 2;
            // Length is 2 * n by construction
            let block = Array2::from_shape_vec((n, 2), rows)
                .unwrap_or_else(|_| Array2::zeros((0, 2)));
            diagram.insert(dim, block);
        }

        diagram
    }

    /// Point collection for dimension `dim`
    pub fn points(&self, dim: usize) -> Option<&Array2<F>> {
        self.points.get(&dim)
    }

    /// Number of rows stored for `dim` (0 if absent)
    pub fn n_points(&self, dim: usize) -> usize {
        self.points.get(&dim).map_or(0, |p| p.nrows())
    }

    /// Dimensions present in this diagram, ascending
    pub fn dimensions(&self) -> impl Iterator<Item = usize> + '_ {
        self.points.keys().copied()
    }

    /// Check that every required dimension is present with two columns.
    ///
    /// Dimensions outside `dims` are not inspected; they are ignored by
    /// the padding pipeline.
    pub fn validate(&self, dims: &HomologyDimensions, sample: usize) -> Result<()> {
        for dim in dims {
            let points = self
                .points
                .get(&dim)
                .ok_or_else(|| PaddingError::shape_mismatch(Some(sample), dim))?;
            if points.ncols() != 2 {
                return Err(PaddingError::invalid_diagram(Some(sample), dim, points.ncols()));
            }
        }
        Ok(())
    }

    /// Replace the collection of every required dimension with `f(dim, points)`.
    pub(crate) fn map_dimensions<G>(&self, dims: &HomologyDimensions, mut f: G) -> Self
    where
        G: FnMut(usize, &Array2<F>) -> Array2<F>,
    {
        let mut out = Self::new();
        for dim in dims {
            if let Some(points) = self.points.get(&dim) {
                out.insert(dim, f(dim, points));
            }
        }
        out
    }
}

impl<F: Scalar> Default for Diagram<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a whole batch before any work is done on it.
pub fn validate_batch<F: Scalar>(batch: &[Diagram<F>], dims: &HomologyDimensions) -> Result<()> {
    if batch.is_empty() {
        return Err(PaddingError::EmptyBatch);
    }
    for (i, diagram) in batch.iter().enumerate() {
        diagram.validate(dims, i)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dims01() -> HomologyDimensions {
        HomologyDimensions::new([0, 1]).unwrap()
    }

    #[test]
    fn test_from_intervals_groups_by_dimension() {
        let intervals = [
            (0.0, 1.0, 0),
            (0.2, 0.7, 1),
            (0.0, 2.0, 0),
            (5.0, 6.0, 3), // not requested
        ];
        let pd = Diagram::<f64>::from_intervals(&intervals, &dims01());

        assert_eq!(pd.points(0).unwrap(), &array![[0.0, 1.0], [0.0, 2.0]]);
        assert_eq!(pd.points(1).unwrap(), &array![[0.2, 0.7]]);
        assert!(pd.points(3).is_none());
        assert_eq!(pd.dimensions().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_from_intervals_keeps_empty_dimensions() {
        let pd = Diagram::<f32>::from_intervals(&[(0.0, 1.0, 0)], &dims01());
        assert_eq!(pd.n_points(1), 0);
        assert_eq!(pd.points(1).unwrap().ncols(), 2);
        assert!(pd.validate(&dims01(), 0).is_ok());
    }

    #[test]
    fn test_validate_missing_dimension() {
        let pd = Diagram::new().with(0, array![[0.0, 1.0]]);
        assert_eq!(
            pd.validate(&dims01(), 4),
            Err(PaddingError::shape_mismatch(Some(4), 1))
        );
    }

    #[test]
    fn test_validate_column_count() {
        let pd = Diagram::new()
            .with(0, array![[0.0, 1.0]])
            .with(1, array![[0.0, 1.0, 1.0]]);
        assert_eq!(
            pd.validate(&dims01(), 2),
            Err(PaddingError::invalid_diagram(Some(2), 1, 3))
        );
    }

    #[test]
    fn test_validate_batch_empty() {
        let batch: Vec<Diagram<f64>> = Vec::new();
        assert_eq!(validate_batch(&batch, &dims01()), Err(PaddingError::EmptyBatch));
    }
}
