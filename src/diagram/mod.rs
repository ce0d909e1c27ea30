//! Diagram Module: Per-Sample Persistence Diagrams
//!
//! A persistence diagram summarizes the topological features of one
//! sample as (birth, death) pairs, grouped by homology dimension:
//!
//! - H₀: connected components
//! - H₁: loops
//! - H₂: voids
//!
//! ## Representation
//!
//! Each dimension maps to an `Array2<F>` with exactly two columns
//! `[birth, death]`. Rows are unordered. The set of dimensions a batch
//! works with is fixed up front as a [`HomologyDimensions`]; every
//! diagram in the batch must carry every one of those keys, even if the
//! collection behind it has zero rows.

mod scalar;
mod dimensions;
mod sample;

pub use scalar::Scalar;
pub use dimensions::HomologyDimensions;
pub use sample::{Diagram, validate_batch};
