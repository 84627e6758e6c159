//! k-means++ initialization.
//!
//! The first centroid is a uniformly random point. Every further centroid is
//! drawn with probability proportional to D(x)², the squared distance from a
//! point to its nearest already-chosen centroid, which spreads the initial
//! centroids out and cuts the number of Lloyd iterations needed.

use crate::distance::squared_distance;
use crate::error::KMeansError;
use crate::points::PointSet;
use ndarray::Array2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::debug;

/// Validate `k` against the point set.
pub(crate) fn check_cluster_count(points: &PointSet, k: usize) -> Result<(), KMeansError> {
    if k == 0 || points.is_empty() || k > points.len() {
        return Err(KMeansError::InvalidClusterCount {
            k,
            n_points: points.len(),
        });
    }
    Ok(())
}

/// Choose `k` initial centroids from `points` with k-means++.
///
/// The chosen point indices are always distinct. When every unchosen point
/// coincides with an already-chosen centroid (all weights zero), or the
/// weights do not sum to a finite value, the next index is drawn uniformly
/// among the unchosen ones.
///
/// # Errors
///
/// Returns `InvalidClusterCount` if `k` is 0, exceeds the number of points,
/// or the point set is empty.
pub fn kmeans_plus_plus<R: Rng>(
    points: &PointSet,
    k: usize,
    rng: &mut R,
) -> Result<Array2<f32>, KMeansError> {
    check_cluster_count(points, k)?;

    let n_points = points.len();
    let mut centroids = Array2::zeros((k, points.dim()));
    let mut chosen = vec![false; n_points];

    let first = rng.gen_range(0..n_points);
    chosen[first] = true;
    centroids.row_mut(0).assign(&points.point(first));

    // Squared distance from each point to its nearest chosen centroid
    let mut min_dists: Vec<f64> = (0..n_points)
        .map(|i| squared_distance(&points.point(i), &centroids.row(0)))
        .collect();

    for c in 1..k {
        let total: f64 = min_dists.iter().sum();
        let weighted = if total.is_finite() {
            WeightedIndex::new(&min_dists).ok()
        } else {
            None
        };

        let next = match weighted {
            Some(dist) => dist.sample(rng),
            None => {
                // No usable weight left: fall back to a uniform pick
                let unchosen: Vec<usize> = (0..n_points).filter(|&i| !chosen[i]).collect();
                debug!(
                    centroid = c,
                    candidates = unchosen.len(),
                    total,
                    "k-means++ weights unusable, drawing uniformly"
                );
                unchosen[rng.gen_range(0..unchosen.len())]
            }
        };

        chosen[next] = true;
        centroids.row_mut(c).assign(&points.point(next));

        let new_centroid = centroids.row(c);
        for (i, d) in min_dists.iter_mut().enumerate() {
            let dist = squared_distance(&points.point(i), &new_centroid);
            if dist < *d {
                *d = dist;
            }
        }
    }

    Ok(centroids)
}
