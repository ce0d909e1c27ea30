//! Ordered set of homology dimensions shared by a batch.

use std::collections::HashSet;

use crate::error::{PaddingError, Result};

/// Ordered, duplicate-free list of homology dimension labels.
///
/// Defines both the keys every diagram must provide and the order in
/// which dimension blocks appear in the padded output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomologyDimensions {
    dims: Vec<usize>,
}

impl HomologyDimensions {
    /// Create from labels in output order.
    ///
    /// Fails on an empty list or a repeated label.
    pub fn new(dims: impl IntoIterator<Item = usize>) -> Result<Self> {
        let dims: Vec<usize> = dims.into_iter().collect();
        if dims.is_empty() {
            return Err(PaddingError::invalid_config(
                "homology_dimensions must contain at least one dimension",
            ));
        }

        let mut seen = HashSet::with_capacity(dims.len());
        for &d in &dims {
            if !seen.insert(d) {
                return Err(PaddingError::invalid_config(format!(
                    "homology dimension {} listed more than once",
                    d
                )));
            }
        }

        Ok(Self { dims })
    }

    /// Dimensions 0..=max_dim, the usual choice for Vietoris-Rips output
    pub fn up_to(max_dim: usize) -> Self {
        Self {
            dims: (0..=max_dim).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.dims.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.dims
    }

    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Always false: construction rejects empty lists
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    pub fn contains(&self, dim: usize) -> bool {
        self.dims.contains(&dim)
    }
}

impl<'a> IntoIterator for &'a HomologyDimensions {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.dims.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let dims = HomologyDimensions::new([2, 0, 1]).unwrap();
        assert_eq!(dims.iter().collect::<Vec<_>>(), vec![2, 0, 1]);
        assert!(dims.contains(2));
        assert!(!dims.contains(3));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(matches!(
            HomologyDimensions::new([0, 1, 0]),
            Err(PaddingError::InvalidConfig { .. })
        ));
        assert!(HomologyDimensions::new(Vec::new()).is_err());
    }

    #[test]
    fn test_up_to() {
        let dims = HomologyDimensions::up_to(2);
        assert_eq!(dims.as_slice(), &[0, 1, 2]);
        assert_eq!(dims.len(), 3);
    }
}
