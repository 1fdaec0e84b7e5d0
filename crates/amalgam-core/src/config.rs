//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::macros::{MacroCaptures, MacroDefinition};

/// Amalgamation run configuration
///
/// Built from the command line, optionally layered over a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmalgamateConfig {
    /// Output file (default: stdout)
    pub output: Option<PathBuf>,

    /// Search directories, consulted in order after the working directory
    pub include_dirs: Vec<PathBuf>,

    /// Macro captures reported after the run
    pub defines: MacroCaptures,

    /// Root input files, emitted in order
    pub inputs: Vec<PathBuf>,
}

impl AmalgamateConfig {
    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigFile {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Add a macro capture (last writer wins)
    pub fn define(&mut self, definition: MacroDefinition) {
        self.defines.insert(definition);
    }

    /// Layer `overrides` on top of this configuration
    ///
    /// Lists are appended, captures replace same-named values, and an
    /// explicit output replaces the current one.
    pub fn merge(mut self, overrides: AmalgamateConfig) -> Self {
        if overrides.output.is_some() {
            self.output = overrides.output;
        }
        self.include_dirs.extend(overrides.include_dirs);
        self.defines.extend(overrides.defines.iter().cloned());
        self.inputs.extend(overrides.inputs);
        self
    }

    /// Check the configuration without touching the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::Config("No input files specified".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_inputs() {
        let config = AmalgamateConfig::default();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = AmalgamateConfig {
            inputs: vec![PathBuf::from("main.c")],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
output: build/mino.c
include_dirs:
  - includes
  - project
defines:
  MINO_DEBUG:
  MINO_VERSION: "0.3"
inputs:
  - src/main.c
"#;
        let config = AmalgamateConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("build/mino.c")));
        assert_eq!(
            config.include_dirs,
            vec![PathBuf::from("includes"), PathBuf::from("project")]
        );
        assert_eq!(config.defines.get("MINO_DEBUG"), Some("1"));
        assert_eq!(config.defines.get("MINO_VERSION"), Some("0.3"));
        assert_eq!(config.inputs, vec![PathBuf::from("src/main.c")]);
    }

    #[test]
    fn test_from_yaml_file_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("amalgam.yaml");
        std::fs::write(&path, "inputs: [").unwrap();

        match AmalgamateConfig::from_yaml_file(&path) {
            Err(Error::ConfigFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected config file error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_layers_command_line_over_file() {
        let mut file = AmalgamateConfig {
            output: Some(PathBuf::from("file.c")),
            include_dirs: vec![PathBuf::from("a")],
            inputs: vec![PathBuf::from("x.c")],
            ..Default::default()
        };
        file.define(MacroDefinition::with_value("MODE", "file"));
        file.define(MacroDefinition::defined("KEEP"));

        let mut cli = AmalgamateConfig {
            include_dirs: vec![PathBuf::from("b")],
            inputs: vec![PathBuf::from("y.c")],
            ..Default::default()
        };
        cli.define(MacroDefinition::with_value("MODE", "cli"));

        let merged = file.merge(cli);
        assert_eq!(merged.output, Some(PathBuf::from("file.c")));
        assert_eq!(merged.include_dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(merged.inputs, vec![PathBuf::from("x.c"), PathBuf::from("y.c")]);
        assert_eq!(merged.defines.get("MODE"), Some("cli"));
        assert_eq!(merged.defines.get("KEEP"), Some("1"));
    }
}
