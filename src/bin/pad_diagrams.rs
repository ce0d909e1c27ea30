//! Diagram Padding Demo: Ragged Batch → Uniform Tensor
//!
//! Generates a batch of synthetic persistence diagrams with random
//! feature counts per dimension, including essential (infinite) H₀
//! classes and degenerate points, then pads them into one tensor.
//!
//! ## Usage
//!
//! ```text
//! pad_diagrams [n_samples] [max_dim] [seed]
//! TDA_PADDING_N_JOBS=-1 RUST_LOG=debug pad_diagrams 64 2
//! ```

use std::error::Error;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Uniform};
use tracing_subscriber::EnvFilter;

use tda_diagram_padding::{
    BatchNormalizer,
    Diagram,
    HomologyDimensions,
    NormalizerConfig,
};

/// Largest filtration value; stands in for ∞
const MAX_EPSILON: f64 = 3.0;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let n_samples: usize = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(8);
    let max_dim: usize = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(1);
    let seed: u64 = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(42);

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Persistence Diagram Padding");
    println!("═══════════════════════════════════════════════════════════════\n");

    let config = NormalizerConfig::from_env()?;
    let dims = HomologyDimensions::up_to(max_dim);

    println!("Batch Parameters:");
    println!("  samples    = {}", n_samples);
    println!("  dimensions = {:?}", dims.as_slice());
    println!("  ∞ → {:.2}", MAX_EPSILON);
    println!("  workers    = {}", config.concurrency.n_threads());
    println!();

    let mut rng = StdRng::seed_from_u64(seed);
    let batch = random_batch(&mut rng, n_samples, &dims)?;

    println!("Raw point counts:");
    for (i, diagram) in batch.iter().enumerate().take(10) {
        let counts: Vec<usize> = dims.iter().map(|d| diagram.n_points(d)).collect();
        println!("  sample {:>3}: {:?}", i, counts);
    }
    if batch.len() > 10 {
        println!("  ... ({} more)", batch.len() - 10);
    }
    println!();

    let normalizer = BatchNormalizer::new(config);
    let padded = normalizer.normalize(&batch, &dims, MAX_EPSILON)?;
    let shape = padded.shape_parameters();

    println!("Shape Parameters:");
    for d in &dims {
        println!(
            "  H{}: max_n_points = {:>3}, min_value = {:.4}, rows {:?}",
            d,
            shape.max_n_points()[&d],
            shape.min_value()[&d],
            padded.dimension_block(d).unwrap_or(0..0)
        );
    }
    println!();

    let (n, rows, cols) = padded.tensor().dim();
    println!("Output tensor: ({}, {}, {})", n, rows, cols);

    if let Some(first) = padded.sample(0) {
        println!("\nSample 0 (birth, death, dim):");
        for row in first.rows() {
            println!("  ({:.4}, {:.4}, {})", row[0], row[1], row[2]);
        }
    }

    Ok(())
}

/// Random diagrams shaped like Vietoris-Rips output on small point clouds
fn random_batch<R: Rng>(
    rng: &mut R,
    n_samples: usize,
    dims: &HomologyDimensions,
) -> Result<Vec<Diagram<f64>>, Box<dyn Error>> {
    let birth = Uniform::new(0.0, MAX_EPSILON / 2.0)?;
    let lifetime = Exp::new(2.0)?;

    let mut batch = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let mut intervals = Vec::new();

        for dim in dims {
            // Fewer features in higher dimensions, sometimes none
            let n = rng.random_range(0..=(12 >> dim.min(3)));
            for _ in 0..n {
                let b = if dim == 0 { 0.0 } else { birth.sample(rng) };
                intervals.push((b, b + lifetime.sample(rng), dim));
            }
            if rng.random_bool(0.2) {
                // Zero-persistence artifact
                let b = birth.sample(rng);
                intervals.push((b, b, dim));
            }
        }
        // Essential connected component
        if dims.contains(0) {
            intervals.push((0.0, f64::INFINITY, 0));
        }

        batch.push(Diagram::from_intervals(&intervals, dims));
    }

    Ok(batch)
}
