//! Execution hints and configuration

/// Which join input is hashed on the shared dimensions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildSide {
    /// Hash the input with fewer cells
    #[default]
    Auto,
    /// Always hash the left input
    Left,
    /// Always hash the right input
    Right,
}

/// Default number of cells at which map runs in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// Execution hints for controlling tensor functions.
///
/// Hints never change results, only how they are computed.
#[derive(Clone, Debug)]
pub struct ExecHints {
    /// Minimum number of dense cells before map is split across threads
    pub parallel_threshold: usize,
    /// Join build side selection
    pub build_side: BuildSide,
}

impl Default for ExecHints {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            build_side: BuildSide::Auto,
        }
    }
}

impl ExecHints {
    /// Create new execution hints with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parallel threshold
    pub fn with_parallel_threshold(mut self, cells: usize) -> Self {
        self.parallel_threshold = cells;
        self
    }

    /// Set the join build side
    pub fn with_build_side(mut self, side: BuildSide) -> Self {
        self.build_side = side;
        self
    }

    /// Whether a map over this many cells should run in parallel
    #[inline]
    pub(crate) fn should_parallelize(&self, cells: usize) -> bool {
        cfg!(feature = "parallel") && cells >= self.parallel_threshold
    }
}
