//! Benchmark harness comparing the sequential and parallel engines.
//!
//! Reads a float32 matrix from a .npy file, clusters it `--runs` times with
//! each engine, prints the centroids of every run and the average wall-clock
//! time per engine.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin kmeans-bench -- --input iris.npy --k 3 --runs 10
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use lloydkmeans_rs::{kmeans_with_config, EngineKind, KMeansConfig, KMeansResult};
use ndarray::{Array2, ArrayView2};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "kmeans-bench")]
#[command(about = "Time the sequential and parallel Lloyd engines on a .npy dataset")]
struct Args {
    /// Input matrix of shape (n_samples, n_features), float32.
    #[arg(long)]
    input: PathBuf,

    /// Number of clusters.
    #[arg(long, default_value = "3")]
    k: usize,

    /// Runs per engine; the reported time is the average.
    #[arg(long, default_value = "10")]
    runs: usize,

    /// Maximum Lloyd iterations per run.
    #[arg(long, default_value = "300")]
    max_iters: usize,

    /// Convergence tolerance on centroid movement.
    #[arg(long, default_value = "0.0001")]
    tol: f64,

    /// Random seed for k-means++ seeding.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Worker count for the parallel engine (default: all cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Write the parallel engine's final centroids to this .npy file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn print_centers(result: &KMeansResult) {
    let centers: Vec<String> = result
        .centroids
        .outer_iter()
        .map(|c| {
            let coords: Vec<String> = c.iter().map(|v| v.to_string()).collect();
            format!("({})", coords.join(","))
        })
        .collect();
    println!("centers: {}", centers.join(", "));
}

fn profile(
    data: &ArrayView2<f32>,
    config: &KMeansConfig,
    runs: usize,
) -> Result<(Duration, KMeansResult)> {
    anyhow::ensure!(runs > 0, "--runs must be at least 1");
    println!("--- Profiling {:?} kmeans ---", config.engine);

    let mut last = None;
    let start = Instant::now();
    for _ in 0..runs {
        let result = kmeans_with_config(data, config)?;
        print_centers(&result);
        last = Some(result);
    }
    let elapsed = start.elapsed();

    let last = last.context("no run completed")?;
    Ok((average_duration(elapsed, runs), last))
}

/// Mean time per run; `runs` is not narrowed, so any count divides exactly.
fn average_duration(total: Duration, runs: usize) -> Duration {
    total.div_f64(runs as f64)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let reader = BufReader::new(
        File::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?,
    );
    let data: Array2<f32> = Array2::read_npy(reader)?;
    info!(
        n_samples = data.nrows(),
        n_features = data.ncols(),
        "loaded dataset"
    );

    let base = KMeansConfig::new(args.k)
        .with_max_iters(args.max_iters)
        .with_tol(args.tol)
        .with_seed(args.seed);

    let sequential = base.clone().with_engine(EngineKind::Sequential);
    let parallel = KMeansConfig {
        engine: EngineKind::Parallel,
        n_threads: args.threads,
        ..base
    };

    let (time_seq, _) = profile(&data.view(), &sequential, args.runs)?;
    let (time_par, par_result) = profile(&data.view(), &parallel, args.runs)?;

    println!("Sequential: {:.3}ms", time_seq.as_secs_f64() * 1e3);
    println!("Parallel: {:.3}ms", time_par.as_secs_f64() * 1e3);

    if let Some(output) = &args.output {
        let writer = File::create(output)?;
        par_result.centroids.write_npy(writer)?;
        info!(path = %output.display(), "saved centroids");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_duration() {
        assert_eq!(
            average_duration(Duration::from_secs(6), 4),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_average_duration_beyond_u32_runs() {
        let runs = u32::MAX as usize + 2;
        let avg = average_duration(Duration::from_secs(runs as u64), runs);
        assert!((avg.as_secs_f64() - 1.0).abs() < 1e-9);
    }
}
