//! Batch normalization: clean, aggregate, pad, stack.
//!
//! ## Pipeline
//!
//! 1. Validate keys and column counts of every sample
//! 2. Substitute non-finite values with the infinity value
//! 3. Drop degenerate points (birth ≥ death)
//! 4. Aggregate [`ShapeParameters`] over the cleaned batch
//! 5. Pad every sample, optionally on a rayon pool
//! 6. Stack the (N, 3) samples into an (n_samples, N, 3) tensor
//!
//! Each step finishes for the whole batch before the next begins. The
//! padding step only reads the shape parameters, so workers share them
//! by reference without locking. Results are gathered in input order.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use ndarray::{stack, Array2, Array3, ArrayView2, Axis};
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use super::infinity::substitute_non_finite;
use super::{InfinityValue, PaddedBatch, SamplePadder, ShapeParameters};
use crate::config::{Concurrency, NormalizerConfig};
use crate::diagram::{validate_batch, Diagram, HomologyDimensions, Scalar};
use crate::error::{PaddingError, Result};

/// Turns a batch of diagrams into one rectangular tensor
#[derive(Debug, Clone, Default)]
pub struct BatchNormalizer {
    config: NormalizerConfig,
}

impl BatchNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn with_concurrency(concurrency: Concurrency) -> Self {
        Self::new(NormalizerConfig::new(concurrency))
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize `batch` into a padded tensor.
    ///
    /// Fails without doing any padding work if the batch is empty, a
    /// sample lacks one of `dims`, or a collection is not two columns wide.
    pub fn normalize<F: Scalar>(
        &self,
        batch: &[Diagram<F>],
        dims: &HomologyDimensions,
        infinity: impl Into<InfinityValue<F>>,
    ) -> Result<PaddedBatch<F>> {
        let _span = info_span!("normalize", n_samples = batch.len(), n_dims = dims.len()).entered();

        let cleaned = self.clean(batch, dims, infinity)?;
        let shape = ShapeParameters::compute(&cleaned, dims)?;
        debug!(
            max_n_points = ?shape.max_n_points(),
            min_value = ?shape.min_value(),
            "shape parameters"
        );

        let samples = self.dispatch(&cleaned, &shape)?;
        let tensor = assemble(&samples)?;

        info!(
            n_samples = tensor.len_of(Axis(0)),
            n_rows = tensor.len_of(Axis(1)),
            n_jobs = self.config.concurrency.n_threads(),
            "padded diagram batch"
        );

        Ok(PaddedBatch::new(tensor, shape))
    }

    /// Validate, substitute non-finite values, then drop degenerate points.
    pub fn clean<F: Scalar>(
        &self,
        batch: &[Diagram<F>],
        dims: &HomologyDimensions,
        infinity: impl Into<InfinityValue<F>>,
    ) -> Result<Vec<Diagram<F>>> {
        let infinity = infinity.into();
        validate_batch(batch, dims)?;
        infinity.validate(dims)?;

        let replacement = dims
            .iter()
            .map(|dim| infinity.for_dimension(dim).map(|v| (dim, v)))
            .collect::<Result<BTreeMap<usize, F>>>()?;

        // Pass 1: infinity substitution
        let mut n_substituted = 0;
        let substituted: Vec<Diagram<F>> = batch
            .iter()
            .map(|diagram| {
                diagram.map_dimensions(dims, |dim, points| {
                    let (out, replaced) = substitute_non_finite(points, replacement[&dim]);
                    n_substituted += replaced;
                    out
                })
            })
            .collect();

        // Pass 2: degenerate-point filtering
        let mut n_dropped = 0;
        let cleaned: Vec<Diagram<F>> = substituted
            .iter()
            .map(|diagram| {
                diagram.map_dimensions(dims, |_, points| {
                    let kept = drop_degenerate(points);
                    n_dropped += points.nrows() - kept.nrows();
                    kept
                })
            })
            .collect();

        debug!(n_substituted, n_dropped, "cleaned diagram batch");
        Ok(cleaned)
    }

    /// Pad every sample, in input order.
    fn dispatch<F: Scalar>(
        &self,
        batch: &[Diagram<F>],
        shape: &ShapeParameters<F>,
    ) -> Result<Vec<Array2<F>>> {
        let padder = SamplePadder::new(shape);
        let requested = self.config.concurrency.n_threads();
        let n_threads = requested.min(batch.len());
        if requested > n_threads {
            warn!(requested, n_samples = batch.len(), "more workers than samples, clamping pool size");
        }

        if n_threads <= 1 {
            return batch
                .iter()
                .enumerate()
                .map(|(i, d)| run_task(&padder, i, d))
                .collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("diagram-pad-{}", i))
            .build()
            .map_err(|e| {
                PaddingError::worker_failure(None, format!("failed to build padding thread pool: {}", e))
            })?;

        debug!(n_threads, "padding samples on worker pool");
        pool.install(|| {
            batch
                .par_iter()
                .enumerate()
                .map(|(i, d)| run_task(&padder, i, d))
                .collect()
        })
    }
}

/// Pad one sample; any error or panic becomes a batch-level worker failure.
fn run_task<F: Scalar>(padder: &SamplePadder<'_, F>, index: usize, diagram: &Diagram<F>) -> Result<Array2<F>> {
    match panic::catch_unwind(AssertUnwindSafe(|| padder.pad(diagram))) {
        Ok(Ok(padded)) => Ok(padded),
        Ok(Err(e)) => Err(PaddingError::worker_failure(Some(index), e.to_string())),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "padding task panicked".to_string());
            Err(PaddingError::worker_failure(Some(index), message))
        }
    }
}

/// Rows with birth < death
fn drop_degenerate<F: Scalar>(points: &Array2<F>) -> Array2<F> {
    let kept: Vec<F> = points
        .rows()
        .into_iter()
        .filter(|row| row[0] < row[1])
        .flat_map(|row| [row[0], row[1]])
        .collect();
    let n = kept.len() / 2;
    Array2::from_shape_vec((n, 2), kept).unwrap_or_else(|_| Array2::zeros((0, 2)))
}

/// Stack equally shaped (N, 3) samples into (n_samples, N, 3)
fn assemble<F: Scalar>(samples: &[Array2<F>]) -> Result<Array3<F>> {
    let views: Vec<ArrayView2<F>> = samples.iter().map(|s| s.view()).collect();
    stack(Axis(0), &views)
        .map_err(|e| PaddingError::worker_failure(None, format!("padded samples disagree in shape: {}", e)))
}

/// One-call form: normalize with an `n_jobs` style concurrency and
/// return the bare tensor.
pub fn postprocess_diagrams<F: Scalar>(
    batch: &[Diagram<F>],
    dims: &HomologyDimensions,
    infinity: impl Into<InfinityValue<F>>,
    n_jobs: i32,
) -> Result<Array3<F>> {
    let normalizer = BatchNormalizer::new(NormalizerConfig::with_n_jobs(n_jobs)?);
    Ok(normalizer.normalize(batch, dims, infinity)?.into_tensor())
}
