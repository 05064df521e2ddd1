//! Extraction options and configuration.

/// Default bound on shape nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Options for extracting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Deepest level whose children are still visited. Shapes normalized at
    /// this depth always have empty `sub_shapes`. This bound is also the only
    /// termination guarantee for cyclic child graphs.
    pub max_depth: usize,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum shape nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
