//! Error types for diagram padding.
//!
//! All validation happens before any per-sample work is dispatched, so
//! the only error that can surface from the worker pool itself is
//! [`PaddingError::WorkerFailure`].

use thiserror::Error;

/// Errors that can occur while normalizing a batch of diagrams.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PaddingError {
    /// A sample's diagram has no entry for a required homology dimension.
    #[error("Shape mismatch{}: missing homology dimension {dimension}", sample_suffix(.sample))]
    ShapeMismatch {
        /// Index of the offending sample, when known
        sample: Option<usize>,
        /// The missing dimension label
        dimension: usize,
    },

    /// A point collection does not have exactly two columns (birth, death).
    #[error("Invalid diagram{}: dimension {dimension} has {n_columns} columns, expected 2", sample_suffix(.sample))]
    InvalidDiagram {
        /// Index of the offending sample, when known
        sample: Option<usize>,
        /// Dimension whose collection is malformed
        dimension: usize,
        /// Column count actually found
        n_columns: usize,
    },

    /// The batch contains no samples.
    #[error("Empty batch: at least one sample is required")]
    EmptyBatch,

    /// A per-sample task, or the pool running it, failed.
    #[error("Worker failure{}: {message}", sample_suffix(.sample))]
    WorkerFailure {
        /// Index of the sample whose task failed, when known
        sample: Option<usize>,
        /// What went wrong
        message: String,
    },

    /// A configuration or parameter value is unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the value
        message: String,
    },
}

fn sample_suffix(sample: &Option<usize>) -> String {
    match sample {
        Some(i) => format!(" in sample {}", i),
        None => String::new(),
    }
}

impl PaddingError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(sample: Option<usize>, dimension: usize) -> Self {
        Self::ShapeMismatch { sample, dimension }
    }

    /// Create an InvalidDiagram error.
    pub fn invalid_diagram(sample: Option<usize>, dimension: usize, n_columns: usize) -> Self {
        Self::InvalidDiagram {
            sample,
            dimension,
            n_columns,
        }
    }

    /// Create a WorkerFailure error.
    pub fn worker_failure(sample: Option<usize>, message: impl Into<String>) -> Self {
        Self::WorkerFailure {
            sample,
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Attach a sample index to errors raised without one.
    pub(crate) fn in_sample(self, index: usize) -> Self {
        match self {
            Self::ShapeMismatch {
                sample: None,
                dimension,
            } => Self::ShapeMismatch {
                sample: Some(index),
                dimension,
            },
            Self::InvalidDiagram {
                sample: None,
                dimension,
                n_columns,
            } => Self::InvalidDiagram {
                sample: Some(index),
                dimension,
                n_columns,
            },
            Self::WorkerFailure {
                sample: None,
                message,
            } => Self::WorkerFailure {
                sample: Some(index),
                message,
            },
            other => other,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PaddingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let errors = vec![
            PaddingError::shape_mismatch(Some(3), 1),
            PaddingError::invalid_diagram(Some(2), 0, 3),
            PaddingError::invalid_diagram(None, 1, 1),
            PaddingError::EmptyBatch,
            PaddingError::worker_failure(None, "pool exploded"),
            PaddingError::invalid_config("n_jobs must not be 0"),
        ];

        let expected = [
            "in sample 3: missing homology dimension 1",
            "in sample 2: dimension 0 has 3 columns",
            "Invalid diagram: dimension 1 has 1 columns",
            "Empty batch",
            "Worker failure: pool exploded",
            "n_jobs must not be 0",
        ];

        for (err, want) in errors.iter().zip(expected.iter()) {
            let display = err.to_string();
            assert!(display.contains(want), "{:?} -> {}", err, display);
        }
    }

    #[test]
    fn test_in_sample_fills_missing_index() {
        let err = PaddingError::invalid_diagram(None, 1, 4).in_sample(7);
        assert_eq!(err, PaddingError::invalid_diagram(Some(7), 1, 4));

        // Already-indexed errors are left alone
        let err = PaddingError::shape_mismatch(Some(1), 0).in_sample(9);
        assert_eq!(err, PaddingError::shape_mismatch(Some(1), 0));
    }
}
