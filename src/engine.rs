//! Execution strategies for the two data-heavy phases of a Lloyd iteration.
//!
//! Both engines perform identical math. The sequential engine walks the point
//! set once per phase. The parallel engine splits the point set into one
//! contiguous, non-overlapping range per worker: during assignment each worker
//! writes only its own slice of the labels, and during accumulation each
//! worker fills a private `ClusterAccumulator`. The partial accumulators are
//! merged in worker order once every worker has joined, so no locking is
//! needed and the result only differs from the sequential one by the order of
//! floating-point additions.

use crate::accumulator::ClusterAccumulator;
use crate::distance::nearest_centroid;
use crate::error::KMeansError;
use crate::points::PointSet;
use ndarray::ArrayView2;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// A way of running the assignment and accumulation phases.
pub trait Engine {
    /// Write the nearest centroid id of every point into `labels`.
    ///
    /// `labels.len()` must equal `points.len()`.
    fn assign(&self, points: &PointSet, centroids: &ArrayView2<f32>, labels: &mut [usize]);

    /// Sum and count the points of every cluster under `labels`.
    fn accumulate(&self, points: &PointSet, labels: &[usize], k: usize) -> ClusterAccumulator;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

fn assign_range(points: &PointSet, centroids: &ArrayView2<f32>, labels: &mut [usize]) {
    for (i, label) in labels.iter_mut().enumerate() {
        *label = nearest_centroid(&points.point(i), centroids).0;
    }
}

/// Single-threaded engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Engine for Sequential {
    fn assign(&self, points: &PointSet, centroids: &ArrayView2<f32>, labels: &mut [usize]) {
        assign_range(points, centroids, labels);
    }

    fn accumulate(&self, points: &PointSet, labels: &[usize], k: usize) -> ClusterAccumulator {
        ClusterAccumulator::from_assignment(points, labels, k)
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

/// Fork-join engine backed by rayon.
#[derive(Debug, Default)]
pub struct Parallel {
    pool: Option<ThreadPool>,
}

impl Parallel {
    /// Build a parallel engine.
    ///
    /// With `n_threads = None` work runs on rayon's global pool; otherwise a
    /// dedicated pool of exactly `n_threads` workers is created.
    ///
    /// # Errors
    ///
    /// Returns `ThreadPool` if the dedicated pool cannot be built.
    pub fn new(n_threads: Option<usize>) -> Result<Self, KMeansError> {
        let pool = match n_threads {
            Some(n) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("kmeans-worker-{}", i))
                    .build()
                    .map_err(|e| KMeansError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { pool })
    }

    /// Number of workers the point set is split across
    pub fn n_workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn chunk_len(&self, n_points: usize) -> usize {
        n_points.div_ceil(self.n_workers()).max(1)
    }

    fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Engine for Parallel {
    fn assign(&self, points: &PointSet, centroids: &ArrayView2<f32>, labels: &mut [usize]) {
        let chunk_len = self.chunk_len(points.len());

        self.install(|| {
            labels
                .par_chunks_mut(chunk_len)
                .enumerate()
                .for_each(|(worker, out)| {
                    let start = worker * chunk_len;
                    let chunk = points.range(start, start + out.len());
                    assign_range(&chunk, centroids, out);
                });
        });
    }

    fn accumulate(&self, points: &PointSet, labels: &[usize], k: usize) -> ClusterAccumulator {
        let n_points = points.len();
        let chunk_len = self.chunk_len(n_points);
        let n_chunks = n_points.div_ceil(chunk_len);

        let partials: Vec<ClusterAccumulator> = self.install(|| {
            (0..n_chunks)
                .into_par_iter()
                .map(|worker| {
                    let start = worker * chunk_len;
                    let end = (start + chunk_len).min(n_points);
                    ClusterAccumulator::from_assignment(
                        &points.range(start, end),
                        &labels[start..end],
                        k,
                    )
                })
                .collect()
        });

        let mut total = ClusterAccumulator::new(k, points.dim());
        for partial in &partials {
            total.merge(partial);
        }
        total
    }

    fn name(&self) -> &'static str {
        "parallel"
    }
}
