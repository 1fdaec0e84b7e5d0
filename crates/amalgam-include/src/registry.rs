//! Include Registry
//!
//! Tracks every absolute path loaded during a run. A path is claimed at most
//! once, whether it was reached as a root input or a nested include, so each
//! file contributes its content exactly once per run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Raw bytes of one loaded file
pub type SourceContent = Arc<[u8]>;

/// Run-wide record of claimed files
#[derive(Debug, Default)]
pub struct IncludeRegistry {
    contents: HashMap<PathBuf, SourceContent>,
    /// Claim order
    order: Vec<PathBuf>,
}

impl IncludeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` has already been claimed
    pub fn is_known(&self, path: &Path) -> bool {
        self.contents.contains_key(path)
    }

    /// Record `path` as loaded with `content`
    ///
    /// # Panics
    ///
    /// Panics if `path` was already claimed. Callers check `is_known` first.
    pub fn claim(&mut self, path: PathBuf, content: SourceContent) {
        assert!(
            !self.contents.contains_key(&path),
            "include registry: {} claimed twice",
            path.display()
        );
        self.order.push(path.clone());
        self.contents.insert(path, content);
    }

    /// Content recorded by `claim`
    pub fn lookup(&self, path: &Path) -> Option<SourceContent> {
        self.contents.get(path).cloned()
    }

    /// Claimed paths in claim order
    pub fn claimed(&self) -> &[PathBuf] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
