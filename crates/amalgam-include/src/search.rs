//! Search Strategy
//!
//! Finds the file an include target refers to. The working directory is
//! tried first, then each search directory in the order it was configured.
//! The directory of the including file is never consulted.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

use amalgam_core::{Error, Result};

use crate::path::PathResolver;
use crate::registry::{IncludeRegistry, SourceContent};

/// Outcome of validating a search directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirCheck {
    Directory,
    NotADirectory,
    Missing,
    /// Exists but its metadata could not be read
    Inaccessible(std::io::ErrorKind),
}

impl DirCheck {
    pub fn of(path: &Path) -> Self {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => DirCheck::Directory,
            Ok(_) => DirCheck::NotADirectory,
            Err(e) => Self::from_error(&e),
        }
    }

    fn from_error(error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => DirCheck::Missing,
            kind => DirCheck::Inaccessible(kind),
        }
    }
}

/// Outcome of probing one candidate path
#[derive(Debug)]
pub enum Probe {
    /// Already claimed in the registry
    Claimed,
    /// Unclaimed and readable
    Readable(SourceContent),
    /// Unclaimed and could not be read
    Unreadable(std::io::ErrorKind),
}

impl Probe {
    pub fn of(path: &Path, registry: &IncludeRegistry) -> Self {
        if registry.is_known(path) {
            return Probe::Claimed;
        }
        match std::fs::read(path) {
            Ok(bytes) => Probe::Readable(Arc::from(bytes)),
            Err(e) => Probe::Unreadable(e.kind()),
        }
    }
}

/// Result of a successful search
#[derive(Debug)]
pub enum Resolution {
    /// The target was claimed earlier in the run; emit nothing
    AlreadySatisfied(PathBuf),
    /// The target is unclaimed; its content has been read
    Found {
        path: PathBuf,
        content: SourceContent,
    },
}

/// Working-directory resolver plus the ordered search directories
#[derive(Debug, Clone)]
pub struct SearchPaths {
    resolver: PathResolver,
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    /// Validate and absolutize the search directories
    ///
    /// Fails on the first entry that is not an existing directory.
    pub fn new<I, P>(resolver: PathResolver, dirs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut search = Self {
            resolver,
            dirs: Vec::new(),
        };
        for dir in dirs {
            search.add_dir(dir.as_ref())?;
        }
        Ok(search)
    }

    /// Append a search directory
    pub fn add_dir(&mut self, dir: &Path) -> Result<()> {
        let absolute = self.resolver.absolute(dir);
        match DirCheck::of(&absolute) {
            DirCheck::Directory => {
                debug!("Search directory: {}", absolute.display());
                self.dirs.push(absolute);
                Ok(())
            }
            DirCheck::NotADirectory => Err(Error::Config(format!(
                "include path is not a directory: {}",
                dir.display()
            ))),
            DirCheck::Missing => Err(Error::Config(format!(
                "include path does not exist: {}",
                dir.display()
            ))),
            DirCheck::Inaccessible(kind) => Err(Error::Config(format!(
                "include path is not accessible: {} ({})",
                dir.display(),
                std::io::Error::from(kind)
            ))),
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Configured search directories, absolute, in order
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Find `target`, first success wins
    ///
    /// `included_from` only feeds the error message.
    pub fn find(
        &self,
        target: &str,
        included_from: Option<&Path>,
        registry: &IncludeRegistry,
    ) -> Result<Resolution> {
        let direct = std::iter::once(self.resolver.absolute(target));
        let searched = self
            .dirs
            .iter()
            .map(|dir| self.resolver.absolute(dir.join(target)));

        for candidate in direct.chain(searched) {
            match Probe::of(&candidate, registry) {
                Probe::Claimed => {
                    trace!("{} already satisfied by {}", target, candidate.display());
                    return Ok(Resolution::AlreadySatisfied(candidate));
                }
                Probe::Readable(content) => {
                    debug!("Resolved {} to {}", target, candidate.display());
                    return Ok(Resolution::Found {
                        path: candidate,
                        content,
                    });
                }
                Probe::Unreadable(kind) => {
                    trace!("{} not readable ({:?})", candidate.display(), kind);
                }
            }
        }

        debug!("Failed to resolve include: {}", target);
        Err(Error::Resolution {
            target: target.to_string(),
            included_from: included_from.map(Path::to_path_buf),
        })
    }
}
