//! # lloydkmeans-rs
//!
//! Lloyd's k-means clustering in Rust, compatible with ndarray.
//!
//! ## Features
//!
//! - **k-means++ seeding** from a caller-supplied random source, so runs are
//!   reproducible
//! - **Deterministic assignment**: squared Euclidean distance, ties broken
//!   toward the lowest cluster id
//! - **Retained empty clusters**: a cluster that loses all its points keeps
//!   its previous centroid
//! - **Two engines**: a sequential one and a fork-join parallel one (rayon)
//!   where each worker owns a contiguous range of points and a private
//!   accumulator, merged after the join
//! - **scikit-learn style API**: `train()`, `fit()`, `predict()`, `fit_predict()`
//!
//! ## Example
//!
//! ```rust
//! use lloydkmeans_rs::kmeans;
//! use ndarray::array;
//!
//! let data = array![[0.0f32, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
//! let result = kmeans(&data.view(), 2).unwrap();
//!
//! assert_eq!(result.labels.len(), 4);
//! assert_eq!(result.centroids.nrows(), 2);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use lloydkmeans_rs::{kmeans_with_config, EngineKind, KMeansConfig};
//! use ndarray::Array2;
//! use ndarray_rand::RandomExt;
//! use ndarray_rand::rand_distr::Uniform;
//!
//! let data = Array2::random((5000, 16), Uniform::new(-1.0f32, 1.0));
//!
//! let config = KMeansConfig {
//!     k: 20,
//!     max_iters: 100,
//!     tol: 1e-6,
//!     seed: 42,
//!     n_init: 1,
//!     engine: EngineKind::Parallel,
//!     n_threads: Some(4),
//! };
//!
//! let result = kmeans_with_config(&data.view(), &config).unwrap();
//! assert!(result.n_iterations <= 100);
//! ```
//!
//! ## Bringing your own engine or random source
//!
//! ```rust
//! use lloydkmeans_rs::{lloyd, KMeansConfig, PointSet, Sequential};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let flat = [0.0f32, 0.0, 0.0, 1.0, 10.0, 0.0, 10.0, 1.0];
//! let points = PointSet::from_slice(&flat, 2).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! let result = lloyd(&points, &KMeansConfig::new(2), &Sequential, &mut rng).unwrap();
//! assert_eq!(result.labels.len(), 4);
//! ```

mod accumulator;
mod algorithm;
mod config;
mod convergence;
mod distance;
mod engine;
mod error;
mod kmeans;
mod points;
mod seeding;

pub use accumulator::ClusterAccumulator;
pub use algorithm::{
    kmeans, kmeans_parallel, kmeans_with_config, lloyd, lloyd_best_of, predict_labels,
    KMeansResult,
};
pub use config::{EngineKind, KMeansConfig};
pub use convergence::{Convergence, ConvergenceCheck};
pub use distance::{nearest_centroid, squared_distance};
pub use engine::{Engine, Parallel, Sequential};
pub use error::KMeansError;
pub use kmeans::KMeans;
pub use points::PointSet;
pub use seeding::kmeans_plus_plus;
