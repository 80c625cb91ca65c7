//! Ecosystem identifiers for the supported version grammars

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Supported package ecosystems
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Rust crates (Cargo.toml)
    #[default]
    Cargo,
    /// JavaScript packages (package.json)
    Npm,
    /// Elixir/Erlang packages (mix.exs)
    Hex,
    /// Java artifacts (pom.xml)
    Maven,
    /// Python packages (pyproject.toml, requirements.txt)
    Python,
}

impl Ecosystem {
    /// Returns the identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Cargo => "cargo",
            Ecosystem::Npm => "npm",
            Ecosystem::Hex => "hex",
            Ecosystem::Maven => "maven",
            Ecosystem::Python => "python",
        }
    }

    /// Returns the display name for this ecosystem
    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::Cargo => "Cargo",
            Ecosystem::Npm => "npm",
            Ecosystem::Hex => "Hex",
            Ecosystem::Maven => "Maven",
            Ecosystem::Python => "Python",
        }
    }

    /// Returns all supported ecosystems
    pub fn all() -> &'static [Ecosystem] {
        &[
            Ecosystem::Cargo,
            Ecosystem::Npm,
            Ecosystem::Hex,
            Ecosystem::Maven,
            Ecosystem::Python,
        ]
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cargo" | "rust" => Ok(Ecosystem::Cargo),
            "npm" | "npm_and_yarn" | "bun" => Ok(Ecosystem::Npm),
            "hex" | "mix" => Ok(Ecosystem::Hex),
            "maven" => Ok(Ecosystem::Maven),
            "python" | "pip" | "uv" | "poetry" => Ok(Ecosystem::Python),
            _ => Err(ConfigError::UnknownEcosystem {
                value: s.to_string(),
            }),
        }
    }
}
