/// Which Lloyd engine executes the assignment and update phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// Single-threaded, one pass per phase
    #[default]
    Sequential,
    /// Fork-join over contiguous point ranges, one per worker
    Parallel,
}

/// Configuration for the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of Lloyd iterations. The run always stops here.
    pub max_iters: usize,

    /// Convergence tolerance. The run stops once no centroid moved more than
    /// this distance in an iteration. Set to a negative value to disable
    /// early stopping.
    pub tol: f64,

    /// Random seed for k-means++ initialization
    pub seed: u64,

    /// Number of seeded runs; the one with the lowest inertia is kept
    pub n_init: usize,

    /// Engine used for assignment and centroid accumulation
    pub engine: EngineKind,

    /// Worker count for the parallel engine. `None` uses the global rayon pool.
    pub n_threads: Option<usize>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 300,
            tol: 1e-4,
            seed: 0,
            n_init: 1,
            engine: EngineKind::Sequential,
            n_threads: None,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of seeded restarts
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Select the engine
    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    /// Shorthand for the parallel engine with a fixed worker count
    pub fn with_n_threads(mut self, n_threads: usize) -> Self {
        self.engine = EngineKind::Parallel;
        self.n_threads = Some(n_threads);
        self
    }
}
