//! Numeric element type of diagrams and padded tensors.

use std::fmt::Debug;

use num_traits::{Float, NumCast};

/// Floating point type a diagram can be stored in (`f32` or `f64`).
///
/// The padded tensor keeps the element type of its input, including the
/// dimension column, so labels are converted into `Self` as well.
pub trait Scalar: Float + NumCast + Debug + Send + Sync + 'static {
    /// Homology dimension label as an element value
    fn from_dimension(dim: usize) -> Self {
        // Small labels are exactly representable in any float type
        <Self as NumCast>::from(dim).unwrap_or_else(Self::nan)
    }
}

impl Scalar for f32 {}
impl Scalar for f64 {}
