//! Padding Module: Uniform Tensors from Ragged Diagram Batches
//!
//! Persistence diagrams of different samples hold different numbers of
//! points per homology dimension. Array-based consumers (vectorizers,
//! kernels, neural networks) need one rectangular array instead.
//!
//! ## Construction
//!
//! For a batch {D₁, …, Dₙ} over dimensions H = (h₀, h₁, …):
//!
//!   max_n_points[h] = max(1, maxᵢ |Dᵢ[h]|)
//!   min_value[h]    = minᵢ min{ b : (b, d) ∈ Dᵢ[h] }   (0 if all empty)
//!
//! Every sample is padded with (min_value[h], min_value[h]) up to
//! max_n_points[h] rows per dimension, each row is tagged with h, and
//! the result is an (n, N, 3) tensor with N = Σₕ max_n_points[h].
//!
//! Padding rows lie on the diagonal (zero persistence) and carry no
//! topological signal.

mod infinity;
mod shape;
mod padder;
mod batch;
mod normalizer;

pub use infinity::{InfinityValue, substitute_non_finite};
pub use shape::ShapeParameters;
pub use padder::{SamplePadder, pad};
pub use batch::PaddedBatch;
pub use normalizer::{BatchNormalizer, postprocess_diagrams};
