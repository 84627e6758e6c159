use crate::config::{EngineKind, KMeansConfig};
use crate::convergence::{Convergence, ConvergenceCheck};
use crate::distance::inertia;
use crate::engine::{Engine, Parallel, Sequential};
use crate::error::KMeansError;
use crate::points::PointSet;
use crate::seeding::{check_cluster_count, kmeans_plus_plus};
use ndarray::{Array1, Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::{debug, info};

/// Result of the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Final centroids, shape (k, n_features)
    pub centroids: Array2<f32>,
    /// Cluster id of every input point, in input order
    pub labels: Array1<usize>,
    /// Number of completed Lloyd iterations
    pub n_iterations: usize,
    /// Whether the run stopped because centroids settled (as opposed to the
    /// iteration cap)
    pub converged: bool,
    /// Sum of squared distances from each point to its assigned centroid
    pub inertia: f64,
}

impl KMeansResult {
    pub fn k(&self) -> usize {
        self.centroids.nrows()
    }

    /// Number of points assigned to each cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &label in self.labels.iter() {
            sizes[label] += 1;
        }
        sizes
    }

    /// Indices of the points assigned to `cluster`, in input order
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == cluster)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Run Lloyd's algorithm once with a caller-supplied engine and random source.
///
/// Seeds `config.k` centroids with k-means++, then alternates assignment and
/// centroid update until no centroid moves more than `config.tol` or
/// `config.max_iters` iterations have run. The returned labels are the
/// assignment computed in the last completed iteration.
///
/// With `max_iters == 0` the seeds are returned together with a single
/// assignment against them.
///
/// # Errors
///
/// Returns `InvalidClusterCount` if `k` is 0, exceeds the number of points,
/// or there are no points. Nothing else can fail once seeding succeeded.
pub fn lloyd<E, R>(
    points: &PointSet,
    config: &KMeansConfig,
    engine: &E,
    rng: &mut R,
) -> Result<KMeansResult, KMeansError>
where
    E: Engine + ?Sized,
    R: Rng,
{
    let k = config.k;
    let mut centroids = kmeans_plus_plus(points, k, rng)?;
    debug!(
        engine = engine.name(),
        n_points = points.len(),
        n_features = points.dim(),
        k,
        "seeded centroids"
    );

    let check = ConvergenceCheck::new(config.tol, config.max_iters);
    let mut labels = vec![0usize; points.len()];
    let mut n_iterations = 0;
    let mut converged = false;

    engine.assign(points, &centroids.view(), &mut labels);

    while n_iterations < config.max_iters {
        let iter_start = Instant::now();

        let acc = engine.accumulate(points, &labels, k);
        let prev_centroids = centroids.clone();
        let empty_clusters = acc.update_centroids(&mut centroids);
        n_iterations += 1;

        let outcome = check.check(n_iterations, &prev_centroids.view(), &centroids.view());
        debug!(
            iteration = n_iterations,
            max_iters = config.max_iters,
            shift = outcome.shift(),
            empty_clusters,
            elapsed_s = iter_start.elapsed().as_secs_f64(),
            "lloyd iteration"
        );

        if outcome.should_stop() {
            converged = matches!(outcome, Convergence::Converged { .. });
            break;
        }

        engine.assign(points, &centroids.view(), &mut labels);
    }

    let inertia = inertia(points, &centroids.view(), &labels);
    info!(
        engine = engine.name(),
        iterations = n_iterations,
        converged,
        inertia,
        "k-means finished"
    );

    Ok(KMeansResult {
        centroids,
        labels: Array1::from(labels),
        n_iterations,
        converged,
        inertia,
    })
}

/// Run Lloyd's algorithm `config.n_init` times from one random stream and
/// keep the result with the lowest inertia. The earliest run wins ties.
pub fn lloyd_best_of<E, R>(
    points: &PointSet,
    config: &KMeansConfig,
    engine: &E,
    rng: &mut R,
) -> Result<KMeansResult, KMeansError>
where
    E: Engine + ?Sized,
    R: Rng,
{
    let mut best = lloyd(points, config, engine, rng)?;

    for run in 1..config.n_init {
        let candidate = lloyd(points, config, engine, rng)?;
        debug!(run, inertia = candidate.inertia, best = best.inertia, "restart");
        if candidate.inertia < best.inertia {
            best = candidate;
        }
    }

    Ok(best)
}

/// Cluster `data` (n_samples, n_features) into `k` clusters with the
/// sequential engine and default settings.
pub fn kmeans(data: &ArrayView2<f32>, k: usize) -> Result<KMeansResult, KMeansError> {
    kmeans_with_config(data, &KMeansConfig::new(k))
}

/// Same as [`kmeans`] but with the parallel engine on the global rayon pool.
pub fn kmeans_parallel(data: &ArrayView2<f32>, k: usize) -> Result<KMeansResult, KMeansError> {
    kmeans_with_config(
        data,
        &KMeansConfig::new(k).with_engine(EngineKind::Parallel),
    )
}

/// Cluster `data` according to `config`, seeding a ChaCha8 generator from
/// `config.seed`.
pub fn kmeans_with_config(
    data: &ArrayView2<f32>,
    config: &KMeansConfig,
) -> Result<KMeansResult, KMeansError> {
    let points = PointSet::new(data.view());
    check_cluster_count(&points, config.k)?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    match config.engine {
        EngineKind::Sequential => lloyd_best_of(&points, config, &Sequential, &mut rng),
        EngineKind::Parallel => {
            let engine = Parallel::new(config.n_threads)?;
            lloyd_best_of(&points, config, &engine, &mut rng)
        }
    }
}

/// Assign every row of `data` to its nearest centroid (lowest id on ties)
///
/// # Errors
///
/// Returns `InvalidClusterCount` if `centroids` has no rows and
/// `InvalidDimensions` if the two arrays disagree on the number of features.
pub fn predict_labels<E: Engine + ?Sized>(
    data: &ArrayView2<f32>,
    centroids: &ArrayView2<f32>,
    engine: &E,
) -> Result<Array1<usize>, KMeansError> {
    if centroids.nrows() == 0 {
        return Err(KMeansError::InvalidClusterCount {
            k: 0,
            n_points: data.nrows(),
        });
    }
    if centroids.ncols() != data.ncols() {
        return Err(KMeansError::InvalidDimensions(format!(
            "Expected {} features, got {}",
            centroids.ncols(),
            data.ncols()
        )));
    }

    let points = PointSet::new(data.view());
    let mut labels = vec![0usize; points.len()];
    engine.assign(&points, centroids, &mut labels);
    Ok(Array1::from(labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_kmeans_basic() {
        let data = Array2::random((500, 16), Uniform::new(-1.0f32, 1.0));

        let config = KMeansConfig::new(5).with_max_iters(10).with_seed(42);
        let result = kmeans_with_config(&data.view(), &config).unwrap();

        assert_eq!(result.centroids.nrows(), 5);
        assert_eq!(result.centroids.ncols(), 16);
        assert_eq!(result.labels.len(), 500);
        assert!(result.n_iterations <= 10);

        for &label in result.labels.iter() {
            assert!(label < 5);
        }
    }

    #[test]
    fn test_two_separated_pairs() {
        let data = array![[0.0f32, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];

        for seed in 0..10 {
            // k-means++ picks both seeds inside one pair with probability
            // 1/202; a few restarts make the outcome seed-independent.
            let config = KMeansConfig::new(2)
                .with_seed(seed)
                .with_max_iters(10)
                .with_tol(1e-6)
                .with_n_init(4);
            let result = kmeans_with_config(&data.view(), &config).unwrap();

            assert!(result.converged);
            assert_eq!(result.cluster_sizes(), vec![2, 2]);
            assert_eq!(result.labels[0], result.labels[1]);
            assert_eq!(result.labels[2], result.labels[3]);
            assert_ne!(result.labels[0], result.labels[2]);

            let left = result.centroids.row(result.labels[0]);
            let right = result.centroids.row(result.labels[2]);
            assert_relative_eq!(left[0], 0.0, epsilon = 1e-6);
            assert_relative_eq!(left[1], 0.5, epsilon = 1e-6);
            assert_relative_eq!(right[0], 10.0, epsilon = 1e-6);
            assert_relative_eq!(right[1], 0.5, epsilon = 1e-6);
            assert_relative_eq!(result.inertia, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_labels_are_nearest_centroids() {
        let data = Array2::random((300, 4), Uniform::new(-3.0f32, 3.0));
        let config = KMeansConfig::new(6).with_seed(9).with_tol(0.0);
        let result = kmeans_with_config(&data.view(), &config).unwrap();

        // With tol = 0 convergence means the last update moved nothing
        assert!(result.converged);
        let relabeled = predict_labels(&data.view(), &result.centroids.view(), &Sequential).unwrap();
        assert_eq!(relabeled, result.labels);
    }

    #[test]
    fn test_max_iters_zero_returns_seeds() {
        let data = array![[0.0f32], [1.0], [5.0], [6.0]];
        let config = KMeansConfig::new(2).with_max_iters(0).with_seed(1);
        let result = kmeans_with_config(&data.view(), &config).unwrap();

        assert_eq!(result.n_iterations, 0);
        assert!(!result.converged);
        for c in result.centroids.iter() {
            assert!(data.iter().any(|x| x == c));
        }
        let relabeled = predict_labels(&data.view(), &result.centroids.view(), &Sequential).unwrap();
        assert_eq!(relabeled, result.labels);
    }

    #[test]
    fn test_predict_labels_rejects_bad_centroids() {
        let data = array![[0.0f32, 0.0], [1.0, 1.0]];
        let no_centroids = Array2::<f32>::zeros((0, 2));
        let wide = array![[0.0f32, 0.0, 0.0]];

        assert_eq!(
            predict_labels(&data.view(), &no_centroids.view(), &Sequential),
            Err(KMeansError::InvalidClusterCount { k: 0, n_points: 2 })
        );
        assert!(matches!(
            predict_labels(&data.view(), &wide.view(), &Sequential),
            Err(KMeansError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_cluster_members() {
        let data = array![[0.0f32, 0.0], [10.0, 10.0], [0.0, 1.0], [10.0, 11.0]];
        let config = KMeansConfig::new(2).with_n_init(3);
        let result = kmeans_with_config(&data.view(), &config).unwrap();

        let first = result.labels[0];
        assert_eq!(result.members(first), vec![0, 2]);
        assert_eq!(result.members(1 - first), vec![1, 3]);
    }
}
