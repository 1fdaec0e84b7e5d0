//! Amalgam CLI
//!
//! Command-line interface for source amalgamation.

use amalgam_core::{AmalgamateConfig, MacroDefinition};
use amalgam_include::{Driver, PathResolver, RunReport};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "amalgamate")]
#[command(author, version, about = "Merge a source tree into a single file by expanding quoted includes", long_about = None)]
struct Cli {
    /// Output file (default: stdout)
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Capture a macro for the end-of-run report (never substituted)
    #[arg(short = 'D', value_name = "NAME[=VALUE]")]
    defines: Vec<MacroDefinition>,

    /// Search directory for includes, after the working directory
    #[arg(short = 'I', value_name = "DIR")]
    include_dirs: Vec<PathBuf>,

    /// YAML config file, command-line options are layered on top
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON list of emitted files and captured macros
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Root input files, emitted in order
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,
}

impl Cli {
    /// Merge the optional config file with the command line
    fn into_config(self) -> Result<(AmalgamateConfig, Option<PathBuf>)> {
        let base = match &self.config {
            Some(path) => AmalgamateConfig::from_yaml_file(path)?,
            None => AmalgamateConfig::default(),
        };

        let overrides = AmalgamateConfig {
            output: self.output,
            include_dirs: self.include_dirs,
            defines: self.defines.into_iter().collect(),
            inputs: self.inputs,
        };

        Ok((base.merge(overrides), self.manifest))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout may carry the amalgamation
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();

    let (config, manifest) = cli.into_config()?;
    let resolver =
        PathResolver::from_current_dir().context("Failed to determine working directory")?;
    debug!("Resolving relative paths against {}", resolver.base().display());

    let driver = Driver::new(config, resolver)?;
    let report = match &driver.config().output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let report = driver.run(BufWriter::new(file))?;
            info!("Output written to: {}", path.display());
            report
        }
        None => driver.run(BufWriter::new(io::stdout().lock()))?,
    };

    print_macro_report(&report)?;

    if let Some(path) = manifest {
        write_manifest(&report, &path)?;
    }

    Ok(())
}

/// Print captured macros to stdout, even when output went to a file
fn print_macro_report(report: &RunReport) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for line in report.macro_report() {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;
    Ok(())
}

fn write_manifest(report: &RunReport, path: &Path) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest {}", path.display()))?;
    info!("Manifest written to: {}", path.display());
    Ok(())
}
