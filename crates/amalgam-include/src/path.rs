//! Path Resolver
//!
//! Turns raw paths into the absolute form used as include identity.

use std::path::{Component, Path, PathBuf};

/// Lexical absolute-path resolver anchored at a base directory
///
/// No filesystem access happens here: two spellings of the same file only
/// collapse to one identity when their normalized absolute forms are equal.
/// Symlinks are not followed.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    /// Create a resolver anchored at `base`
    ///
    /// A relative `base` is itself normalized, not resolved.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: normalize(&base.into()),
        }
    }

    /// Create a resolver anchored at the process working directory
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Base directory relative paths are joined onto
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Canonical absolute form of `raw`
    pub fn absolute(&self, raw: impl AsRef<Path>) -> PathBuf {
        let raw = raw.as_ref();
        if raw.is_absolute() {
            normalize(raw)
        } else {
            normalize(&self.base.join(raw))
        }
    }
}

/// Remove `.` components and fold `..` into its parent
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
