//! Recursive Emitter
//!
//! Copies files to the sink line by line, expanding include directives in
//! place, depth-first and pre-order: an included file is written in full
//! before the line after its directive.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

use amalgam_core::{Error, Result};

use crate::directive::{lines, IncludeMatcher};
use crate::registry::{IncludeRegistry, SourceContent};
use crate::search::{Resolution, SearchPaths};

/// Depth-first include expander writing into `sink`
pub struct Emitter<'a, W: Write> {
    search: &'a SearchPaths,
    registry: &'a mut IncludeRegistry,
    sink: W,
    matcher: IncludeMatcher,
}

impl<'a, W: Write> Emitter<'a, W> {
    pub fn new(search: &'a SearchPaths, registry: &'a mut IncludeRegistry, sink: W) -> Self {
        Self {
            search,
            registry,
            sink,
            matcher: IncludeMatcher::new(),
        }
    }

    /// Emit a root input
    ///
    /// Roots are resolved against the working directory only. A root that
    /// was already emitted, as a root or a nested include, is skipped.
    pub fn emit_root(&mut self, raw: impl AsRef<Path>) -> Result<()> {
        let path = self.search.resolver().absolute(raw);
        self.emit(&path)
    }

    /// Emit the file at absolute `path` unless it was already claimed
    pub fn emit(&mut self, path: &Path) -> Result<()> {
        if self.registry.is_known(path) {
            trace!("Skipping {}, already emitted", path.display());
            return Ok(());
        }

        let content: SourceContent = std::fs::read(path)
            .map(Arc::from)
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
        self.expand(path.to_path_buf(), content)
    }

    /// Claim `path` and write its expansion
    fn expand(&mut self, path: PathBuf, content: SourceContent) -> Result<()> {
        debug!("Emitting {}", path.display());
        self.registry.claim(path.clone(), content.clone());

        for line in lines(&content) {
            let Some(target) = self.matcher.target(line.text) else {
                self.sink.write_all(line.text)?;
                self.sink.write_all(b"\n")?;
                continue;
            };

            match self.search.find(target, Some(&path), self.registry)? {
                Resolution::Found {
                    path: included,
                    content,
                } => self.expand(included, content)?,
                Resolution::AlreadySatisfied(included) => {
                    trace!(
                        "{} includes {}, already emitted",
                        path.display(),
                        included.display()
                    );
                }
            }
        }

        Ok(())
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
