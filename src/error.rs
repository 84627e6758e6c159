use thiserror::Error;

/// Error types for the lloydkmeans-rs library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KMeansError {
    /// The requested cluster count cannot be satisfied by the input
    /// (k is 0, k exceeds the number of points, or there are no points)
    #[error("Invalid cluster count: k = {k} for {n_points} points")]
    InvalidClusterCount { k: usize, n_points: usize },

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call train() or fit() first.")]
    NotFitted,

    /// Dimension mismatch between data and model, or malformed input shape
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// The dedicated worker pool for the parallel engine could not be built
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}
