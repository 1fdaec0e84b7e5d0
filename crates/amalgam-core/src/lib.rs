//! Amalgam Core
//!
//! Error taxonomy, run configuration and macro captures shared by the
//! amalgamation engine and the command-line tool.

pub mod config;
pub mod error;
pub mod macros;

pub use config::AmalgamateConfig;
pub use error::{Error, Result};
pub use macros::{MacroCaptures, MacroDefinition};
