use crate::distance::max_centroid_shift;
use ndarray::ArrayView2;

/// Outcome of comparing two consecutive centroid sets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Convergence {
    /// No centroid moved more than the tolerance
    Converged { shift: f64 },
    /// The iteration cap was reached first
    MaxIterations { shift: f64 },
    /// Keep iterating
    Continue { shift: f64 },
}

impl Convergence {
    pub fn should_stop(&self) -> bool {
        !matches!(self, Convergence::Continue { .. })
    }

    /// Largest single-centroid displacement observed in the iteration
    pub fn shift(&self) -> f64 {
        match *self {
            Convergence::Converged { shift }
            | Convergence::MaxIterations { shift }
            | Convergence::Continue { shift } => shift,
        }
    }
}

/// Stopping rule for the Lloyd loop.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceCheck {
    tol: f64,
    max_iters: usize,
}

impl ConvergenceCheck {
    pub fn new(tol: f64, max_iters: usize) -> Self {
        Self { tol, max_iters }
    }

    /// Decide whether to stop after `iterations` completed iterations.
    ///
    /// Tolerance wins over the cap when both apply. A negative tolerance never
    /// converges, so the loop runs exactly `max_iters` times.
    pub fn check(
        &self,
        iterations: usize,
        prev_centroids: &ArrayView2<f32>,
        new_centroids: &ArrayView2<f32>,
    ) -> Convergence {
        let shift = max_centroid_shift(prev_centroids, new_centroids);

        if self.tol >= 0.0 && shift <= self.tol {
            Convergence::Converged { shift }
        } else if iterations >= self.max_iters {
            Convergence::MaxIterations { shift }
        } else {
            Convergence::Continue { shift }
        }
    }
}
