//! Error types for Amalgam

use std::path::PathBuf;
use thiserror::Error;

/// Amalgam error type
///
/// Every variant is fatal: a run either completes or aborts on the first
/// error. Output already written to the sink is left in place.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("Could not find include \"{target}\"{}", included_from_suffix(.included_from))]
    Resolution {
        /// Target exactly as written in the directive
        target: String,
        /// File containing the directive
        included_from: Option<PathBuf>,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn included_from_suffix(from: &Option<PathBuf>) -> String {
    match from {
        Some(path) => format!(" (included from {})", path.display()),
        None => String::new(),
    }
}

/// Result type alias for Amalgam
pub type Result<T> = std::result::Result<T, Error>;
