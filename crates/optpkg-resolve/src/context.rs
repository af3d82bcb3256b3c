//! Execution context for resolvers

use std::path::{Path, PathBuf};

/// Context passed to resolvers: the directory relative paths resolve
/// against (usually the directory of the resolution config).
#[derive(Debug, Clone)]
pub struct ResolveContext {
    base_dir: PathBuf,
}

impl ResolveContext {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `path` against the base directory. Absolute paths are
    /// returned unchanged.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }
}
