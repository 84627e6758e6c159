use crate::algorithm::{kmeans_with_config, predict_labels, KMeansResult};
use crate::config::{EngineKind, KMeansConfig};
use crate::engine::{Parallel, Sequential};
use crate::error::KMeansError;
use ndarray::{Array1, Array2, ArrayView2};

/// Lloyd's k-means model with a scikit-learn style API.
///
/// # Example
///
/// ```
/// use lloydkmeans_rs::{KMeans, KMeansConfig};
/// use ndarray::array;
///
/// let data = array![[0.0f32, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
///
/// let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_n_init(4));
/// kmeans.train(&data.view()).unwrap();
///
/// let labels = kmeans.predict(&data.view()).unwrap();
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of features (dimensions)
    d: usize,

    /// Outcome of the last training run (None if not yet fitted)
    result: Option<KMeansResult>,
}

impl KMeans {
    /// Create a new model with default configuration.
    ///
    /// # Arguments
    ///
    /// * `d` - Number of features (dimensions) in the data
    /// * `k` - Number of clusters; an invalid count is reported by `train`
    pub fn new(d: usize, k: usize) -> Self {
        Self {
            config: KMeansConfig::new(k),
            d,
            result: None,
        }
    }

    /// Create a new model with custom configuration.
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            d: 0, // Will be set on first train call
            config,
            result: None,
        }
    }

    /// Train the model on `data` of shape (n_samples, n_features).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - k is 0, the number of samples is less than k, or there are no samples
    /// - Data dimensions don't match (for subsequent calls)
    /// - A dedicated worker pool was requested and could not be built
    pub fn train(&mut self, data: &ArrayView2<f32>) -> Result<(), KMeansError> {
        let n_features = data.ncols();

        // Set dimensions on first call, validate on subsequent calls
        if self.d == 0 {
            self.d = n_features;
        } else if n_features != self.d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        let result = kmeans_with_config(data, &self.config)?;

        self.result = Some(result);
        Ok(())
    }

    /// Equivalent to `train()`, returning `&mut Self` for chaining.
    pub fn fit(&mut self, data: &ArrayView2<f32>) -> Result<&mut Self, KMeansError> {
        self.train(data)?;
        Ok(self)
    }

    /// Assign each row of `data` to the nearest trained centroid.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - Data dimensions don't match the training data
    pub fn predict(&self, data: &ArrayView2<f32>) -> Result<Array1<usize>, KMeansError> {
        let result = self.result.as_ref().ok_or(KMeansError::NotFitted)?;

        let n_features = data.ncols();
        if n_features != self.d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        let centroids = result.centroids.view();
        match self.config.engine {
            EngineKind::Sequential => predict_labels(data, &centroids, &Sequential),
            EngineKind::Parallel => {
                predict_labels(data, &centroids, &Parallel::new(self.config.n_threads)?)
            }
        }
    }

    /// Fit the model and return the training assignment.
    pub fn fit_predict(&mut self, data: &ArrayView2<f32>) -> Result<Array1<usize>, KMeansError> {
        self.train(data)?;
        self.result
            .as_ref()
            .map(|r| r.labels.clone())
            .ok_or(KMeansError::NotFitted)
    }

    /// Centroids of the fitted model, `None` before training.
    pub fn centroids(&self) -> Option<&Array2<f32>> {
        self.result.as_ref().map(|r| &r.centroids)
    }

    /// Full outcome of the last training run.
    pub fn result(&self) -> Option<&KMeansResult> {
        self.result.as_ref()
    }

    pub fn k(&self) -> usize {
        self.config.k
    }

    pub fn d(&self) -> usize {
        self.d
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
