use crate::points::PointSet;
use ndarray::{ArrayView1, ArrayView2};

/// Squared Euclidean distance between two points of equal dimension.
///
/// Differences are widened to `f64` before squaring so that any pair of
/// finite `f32` points yields a finite distance.
#[inline]
pub fn squared_distance(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum()
}

/// Find the centroid nearest to `point`.
///
/// Centroids are scanned in increasing id order and only a strictly smaller
/// distance replaces the current best, so exact ties resolve to the lowest id.
///
/// # Returns
/// * `(cluster_id, squared_distance)`
#[inline]
pub fn nearest_centroid(point: &ArrayView1<f32>, centroids: &ArrayView2<f32>) -> (usize, f64) {
    let mut best_label = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_distance(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_label = j;
        }
    }

    (best_label, best_dist)
}

/// Largest L2 displacement of any single centroid between two iterations
pub fn max_centroid_shift(old_centroids: &ArrayView2<f32>, new_centroids: &ArrayView2<f32>) -> f64 {
    old_centroids
        .outer_iter()
        .zip(new_centroids.outer_iter())
        .map(|(old_c, new_c)| {
            let mut diff_sq = 0.0f64;
            for (&o, &n) in old_c.iter().zip(new_c.iter()) {
                let d = (n - o) as f64;
                diff_sq += d * d;
            }
            diff_sq.sqrt()
        })
        .fold(0.0, f64::max)
}

/// Sum of squared distances from every point to its assigned centroid
pub fn inertia(points: &PointSet, centroids: &ArrayView2<f32>, labels: &[usize]) -> f64 {
    labels
        .iter()
        .enumerate()
        .map(|(i, &label)| squared_distance(&points.point(i), &centroids.row(label)))
        .sum()
}
