//! Normalizer configuration.
//!
//! The only tunable of the normalizer is how many workers pad samples
//! concurrently. The value is usually given as an `n_jobs` integer:
//!
//! | `n_jobs` | meaning                                   |
//! |----------|-------------------------------------------|
//! | `1`      | sequential, on the calling thread         |
//! | `n > 1`  | `n` worker threads                        |
//! | `-1`     | one worker per available core             |
//! | `-k`     | `cores + 1 - k` workers (at least one)    |
//! | `0`      | rejected                                  |

use std::num::NonZeroUsize;

use crate::error::{PaddingError, Result};

/// Environment variable read by [`NormalizerConfig::from_env`].
pub const N_JOBS_ENV: &str = "TDA_PADDING_N_JOBS";

/// Degree of parallelism used for per-sample padding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Concurrency {
    /// Pad every sample on the calling thread
    #[default]
    Sequential,
    /// Dedicated pool with a fixed number of threads
    Threads(NonZeroUsize),
    /// Dedicated pool with one thread per available core
    AllCores,
}

impl Concurrency {
    /// Interpret an `n_jobs` style integer (see module docs).
    pub fn from_n_jobs(n_jobs: i32) -> Result<Self> {
        match n_jobs {
            0 => Err(PaddingError::invalid_config("n_jobs must not be 0")),
            1 => Ok(Self::Sequential),
            -1 => Ok(Self::AllCores),
            n if n > 1 => Ok(Self::threads(n as usize)),
            n => {
                // n <= -2: leave (|n| - 1) cores idle
                let idle = n.unsigned_abs() as usize - 1;
                let n_threads = available_cores().saturating_sub(idle).max(1);
                Ok(Self::threads(n_threads))
            }
        }
    }

    fn threads(n: usize) -> Self {
        match NonZeroUsize::new(n) {
            Some(n) if n.get() > 1 => Self::Threads(n),
            _ => Self::Sequential,
        }
    }

    /// Number of worker threads this setting asks for
    pub fn n_threads(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Threads(n) => n.get(),
            Self::AllCores => available_cores(),
        }
    }

    /// Does this setting run on the calling thread only?
    pub fn is_sequential(&self) -> bool {
        self.n_threads() <= 1
    }
}

fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Configuration for [`BatchNormalizer`](crate::BatchNormalizer)
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfig {
    /// Parallelism of the per-sample padding step
    pub concurrency: Concurrency,
}

impl NormalizerConfig {
    pub fn new(concurrency: Concurrency) -> Self {
        Self { concurrency }
    }

    /// Build from an `n_jobs` integer
    pub fn with_n_jobs(n_jobs: i32) -> Result<Self> {
        Ok(Self::new(Concurrency::from_n_jobs(n_jobs)?))
    }

    /// Read `TDA_PADDING_N_JOBS`; unset means the default (sequential).
    pub fn from_env() -> Result<Self> {
        match std::env::var(N_JOBS_ENV) {
            Ok(raw) => Self::parse_n_jobs(&raw),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(PaddingError::invalid_config(format!("{}: {}", N_JOBS_ENV, e))),
        }
    }

    fn parse_n_jobs(raw: &str) -> Result<Self> {
        let n_jobs = raw.trim().parse::<i32>().map_err(|e| {
            PaddingError::invalid_config(format!("{}={:?} is not an integer: {}", N_JOBS_ENV, raw, e))
        })?;
        Self::with_n_jobs(n_jobs)
    }
}
