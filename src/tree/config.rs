//! Configuration for building the forest

/// Configuration for tree building behavior.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Reuse the last resolved parent directory when consecutive entries of
    /// a bucket share it. Turning this off changes speed, never output.
    pub path_cache: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { path_cache: true }
    }
}
