//! Basic example demonstrating lloydkmeans-rs usage
//!
//! Run with: cargo run --example basic --release

use lloydkmeans_rs::{kmeans_with_config, EngineKind, KMeansConfig};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() {
    println!("=== lloydkmeans-rs example ===\n");

    // Synthetic data: 3 clusters in 2D for easy visualization
    let n_samples = 300;
    let n_features = 2;
    let n_clusters = 3;

    println!("Generating {} samples with {} features...", n_samples, n_features);

    let centers = [[-5.0f32, -5.0], [0.0, 5.0], [5.0, -5.0]];
    let noise = Array2::random((n_samples, n_features), Uniform::new(-1.0f32, 1.0));
    let mut data = Array2::<f32>::zeros((n_samples, n_features));

    for i in 0..n_samples {
        let cluster_idx = i % 3;
        data[[i, 0]] = centers[cluster_idx][0] + noise[[i, 0]];
        data[[i, 1]] = centers[cluster_idx][1] + noise[[i, 1]];
    }

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    for engine in [EngineKind::Sequential, EngineKind::Parallel] {
        let config = KMeansConfig::new(n_clusters)
            .with_max_iters(100)
            .with_tol(1e-6)
            .with_seed(42)
            .with_engine(engine);

        println!("Running {:?} k-means with k={}...", engine, n_clusters);
        let result = kmeans_with_config(&data.view(), &config).expect("Clustering failed");

        println!(
            "  {} iterations, converged: {}, inertia: {:.4}",
            result.n_iterations, result.converged, result.inertia
        );
        for (i, c) in result.centroids.outer_iter().enumerate() {
            println!("  Centroid {}: ({:.4}, {:.4})", i, c[0], c[1]);
        }

        println!("  Cluster distribution:");
        for (i, count) in result.cluster_sizes().iter().enumerate() {
            println!(
                "    Cluster {}: {} samples ({:.1}%)",
                i,
                count,
                (*count as f64 / n_samples as f64) * 100.0
            );
        }
        println!();
    }

    println!("=== Done! ===");
}
