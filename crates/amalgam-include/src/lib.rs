//! Amalgam Include
//!
//! Expands quoted include directives into one output stream.
//!
//! ## Modules
//!
//! - `path` - Lexical absolute-path resolution (include identity)
//! - `registry` - Run-wide single-inclusion registry
//! - `directive` - Include directive matching and line splitting
//! - `search` - Working directory then search-directory lookup
//! - `emitter` - Depth-first expansion into the output sink
//! - `driver` - Root input iteration and run report
//!
//! Unlike a C preprocessor, inclusion is global: a file referenced from
//! anywhere in the run is written once, at its first reference in
//! depth-first order, and nested includes are never resolved relative to the
//! including file.

pub mod directive;
pub mod driver;
pub mod emitter;
pub mod path;
pub mod registry;
pub mod search;

pub use driver::{Driver, RunReport};
pub use emitter::Emitter;
pub use path::PathResolver;
pub use registry::{IncludeRegistry, SourceContent};
pub use search::{Resolution, SearchPaths};
