//! Configuration file support
//!
//! Settings come from three layers, later ones winning:
//! - Built-in defaults (`cargo`, `bump_versions`)
//! - `reqbump.toml` in the working directory, or the file given by `--config`
//! - Command-line flags

use crate::domain::{Ecosystem, UpdateStrategy};
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "reqbump.toml";

/// Raw contents of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Ecosystem name, e.g. "npm" or "maven"
    pub ecosystem: Option<String>,
    /// Strategy name, e.g. "widen_ranges"
    pub strategy: Option<String>,
}

impl FileConfig {
    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse configuration text; `path` is only used in error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::parse_error(path, e.to_string()))
    }

    /// Load the explicit file if given, otherwise `reqbump.toml` in `dir`
    /// when it exists, otherwise an empty configuration
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("Using configuration from {}", candidate.display());
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }
}

/// Effective settings after merging all layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Ecosystem whose grammar is used
    pub ecosystem: Ecosystem,
    /// Rewrite strategy
    pub strategy: UpdateStrategy,
}

impl Settings {
    /// Merge command-line values over file values over defaults
    pub fn resolve(
        cli_ecosystem: Option<Ecosystem>,
        cli_strategy: Option<UpdateStrategy>,
        file: &FileConfig,
    ) -> Result<Self, ConfigError> {
        let ecosystem = match (cli_ecosystem, &file.ecosystem) {
            (Some(ecosystem), _) => ecosystem,
            (None, Some(name)) => name.parse()?,
            (None, None) => Ecosystem::default(),
        };
        let strategy = match (cli_strategy, &file.strategy) {
            (Some(strategy), _) => strategy,
            (None, Some(name)) => name.parse()?,
            (None, None) => UpdateStrategy::default(),
        };
        Ok(Self {
            ecosystem,
            strategy,
        })
    }
}
