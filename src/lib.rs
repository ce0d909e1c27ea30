//! # TDA-Diagram-Padding
//!
//! Batch Normalization of Persistence Diagrams into Uniform Tensors
//!
//! ## Problem
//!
//! A persistence engine (Vietoris-Rips, Čech, cubical, ...) returns one
//! diagram per sample: for each homology dimension, a ragged list of
//! (birth, death) pairs. Two samples almost never have the same number
//! of features, yet downstream vectorizations expect a single
//! (n_samples, n_points, 3) array.
//!
//! ## Method
//!
//! 1. **Infinity substitution**: essential features (death = ∞) receive
//!    a finite death so they survive the next step
//!
//! 2. **Degenerate filtering**: points with birth ≥ death are dropped
//!
//! 3. **Shape aggregation**: per dimension, the largest point count and
//!    the smallest birth across the batch
//!
//! 4. **Padding**: every sample is filled up with diagonal points
//!    (min birth, min birth), and each row is tagged with its dimension
//!
//! The padded samples are stacked in input order:
//!
//!   X[i, :, :] = [ H₀ block | H₁ block | ... ],   row = (b, d, dim)
//!
//! Step 4 is a pure function of one sample and the batch-wide shape
//! parameters, and runs on a rayon pool when more than one worker is
//! configured.
//!
//! ## Example
//!
//! ```
//! use ndarray::{array, Array2};
//! use tda_diagram_padding::{BatchNormalizer, Diagram, HomologyDimensions};
//!
//! let dims = HomologyDimensions::up_to(1);
//! let batch = vec![
//!     Diagram::new()
//!         .with(0, array![[0.0, 1.0], [0.5, 2.0]])
//!         .with(1, Array2::zeros((0, 2))),
//!     Diagram::new()
//!         .with(0, array![[0.0, 0.5]])
//!         .with(1, array![[1.0, 3.0]]),
//! ];
//!
//! let padded = BatchNormalizer::default().normalize(&batch, &dims, 10.0).unwrap();
//! assert_eq!(padded.tensor().dim(), (2, 3, 3));
//! ```
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Tauzin et al., "giotto-tda: A Topological Data Analysis Toolkit
//!   for Machine Learning and Data Exploration", JMLR 22 (2021)

pub mod config;
pub mod diagram;
pub mod error;
pub mod padding;

// Re-exports from diagram
pub use diagram::{
    Diagram,
    HomologyDimensions,
    Scalar,
    validate_batch,
};

// Re-exports from padding
pub use padding::{
    // Orchestration
    BatchNormalizer,
    postprocess_diagrams,
    PaddedBatch,
    // Building blocks
    InfinityValue,
    ShapeParameters,
    SamplePadder,
    pad,
    substitute_non_finite,
};

pub use config::{Concurrency, NormalizerConfig, N_JOBS_ENV};
pub use error::{PaddingError, Result};
