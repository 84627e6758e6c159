use crate::points::PointSet;
use ndarray::{Array2, ArrayView1};

/// Per-cluster coordinate sums and point counts for one update step.
///
/// Sums are kept in `f64` so that merging partial accumulators from several
/// workers stays close to the single-pass result.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAccumulator {
    sums: Array2<f64>,
    counts: Vec<usize>,
}

impl ClusterAccumulator {
    pub fn new(k: usize, dim: usize) -> Self {
        Self {
            sums: Array2::zeros((k, dim)),
            counts: vec![0; k],
        }
    }

    /// Accumulate every point of `points` under the matching entry of `labels`.
    pub fn from_assignment(points: &PointSet, labels: &[usize], k: usize) -> Self {
        let mut acc = Self::new(k, points.dim());
        for (i, &label) in labels.iter().enumerate() {
            acc.add(label, &points.point(i));
        }
        acc
    }

    #[inline]
    pub fn add(&mut self, cluster: usize, point: &ArrayView1<f32>) {
        self.counts[cluster] += 1;
        let mut sum = self.sums.row_mut(cluster);
        for (s, &x) in sum.iter_mut().zip(point.iter()) {
            *s += x as f64;
        }
    }

    /// Fold another partial accumulator into this one.
    pub fn merge(&mut self, other: &ClusterAccumulator) {
        self.sums += &other.sums;
        for (c, &o) in self.counts.iter_mut().zip(other.counts.iter()) {
            *c += o;
        }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of points accumulated across all clusters
    pub fn total_count(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Overwrite each non-empty cluster's centroid with the mean of its points.
    ///
    /// Clusters that received no points keep their current centroid.
    ///
    /// # Returns
    /// * number of empty clusters
    pub fn update_centroids(&self, centroids: &mut Array2<f32>) -> usize {
        let mut empty = 0;
        for (cluster_idx, mut centroid) in centroids.outer_iter_mut().enumerate() {
            let count = self.counts[cluster_idx];
            if count == 0 {
                empty += 1;
                continue;
            }
            let sum = self.sums.row(cluster_idx);
            for (c, &s) in centroid.iter_mut().zip(sum.iter()) {
                *c = (s / count as f64) as f32;
            }
        }
        empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_means() {
        let data = array![[0.0f32, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
        let points = PointSet::new(data.view());

        let acc = ClusterAccumulator::from_assignment(&points, &[0, 0, 1, 1], 2);
        assert_eq!(acc.counts(), &[2, 2]);
        assert_eq!(acc.total_count(), 4);

        let mut centroids = Array2::zeros((2, 2));
        assert_eq!(acc.update_centroids(&mut centroids), 0);
        let expected = array![[0.0f32, 0.5], [10.0, 0.5]];
        for (&got, &want) in centroids.iter().zip(expected.iter()) {
            assert_relative_eq!(got, want, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let data = array![[1.0f32, 1.0], [3.0, 3.0]];
        let points = PointSet::new(data.view());

        let acc = ClusterAccumulator::from_assignment(&points, &[0, 0], 2);
        let mut centroids = array![[0.0f32, 0.0], [-7.5, 42.0]];
        assert_eq!(acc.update_centroids(&mut centroids), 1);

        assert_eq!(centroids.row(0).to_vec(), vec![2.0, 2.0]);
        assert_eq!(centroids.row(1).to_vec(), vec![-7.5, 42.0]);
    }

    #[test]
    fn test_fixed_point_is_unchanged() {
        let data = array![[0.0f32, 0.0], [2.0, 0.0], [10.0, 10.0], [12.0, 10.0]];
        let points = PointSet::new(data.view());
        let labels = [0, 0, 1, 1];

        let mut centroids = array![[1.0f32, 0.0], [11.0, 10.0]];
        let before = centroids.clone();
        ClusterAccumulator::from_assignment(&points, &labels, 2).update_centroids(&mut centroids);
        assert_eq!(centroids, before);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let data = array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0], [9.0, 10.0]];
        let points = PointSet::new(data.view());
        let labels = [0, 1, 0, 1, 1];

        let whole = ClusterAccumulator::from_assignment(&points, &labels, 2);

        let mut left = ClusterAccumulator::from_assignment(&points.range(0, 2), &labels[..2], 2);
        let right = ClusterAccumulator::from_assignment(&points.range(2, 5), &labels[2..], 2);
        left.merge(&right);

        assert_eq!(left, whole);
    }
}
