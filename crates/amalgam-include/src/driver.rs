//! Run Driver
//!
//! Validates a configuration, then emits every root input in order through
//! one registry.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use amalgam_core::{AmalgamateConfig, MacroCaptures, Result};

use crate::emitter::Emitter;
use crate::path::PathResolver;
use crate::registry::IncludeRegistry;
use crate::search::SearchPaths;

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Emitted files, absolute, in emission order
    pub files: Vec<PathBuf>,
    /// Macro captures, reported but never substituted
    pub defines: MacroCaptures,
}

impl RunReport {
    /// Lines of the end-of-run macro report
    pub fn macro_report(&self) -> impl Iterator<Item = String> + '_ {
        self.defines.iter().map(|d| d.report_line())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One amalgamation run
pub struct Driver {
    config: AmalgamateConfig,
    search: SearchPaths,
}

impl Driver {
    /// Check the configuration and validate every search directory
    ///
    /// Nothing is read from the root inputs until `run`.
    pub fn new(config: AmalgamateConfig, resolver: PathResolver) -> Result<Self> {
        config.validate()?;
        let search = SearchPaths::new(resolver, &config.include_dirs)?;
        Ok(Self { config, search })
    }

    pub fn config(&self) -> &AmalgamateConfig {
        &self.config
    }

    /// Emit all root inputs into `sink`
    ///
    /// On error, whatever was already written stays in the sink.
    pub fn run<W: Write>(&self, sink: W) -> Result<RunReport> {
        let mut registry = IncludeRegistry::new();
        let mut emitter = Emitter::new(&self.search, &mut registry, sink);

        for input in &self.config.inputs {
            emitter.emit_root(input)?;
        }
        emitter.finish()?;

        info!(
            "Amalgamated {} file(s) from {} input(s)",
            registry.len(),
            self.config.inputs.len()
        );

        Ok(RunReport {
            files: registry.claimed().to_vec(),
            defines: self.config.defines.clone(),
        })
    }
}
