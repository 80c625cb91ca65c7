//! CLI argument parsing module for reqbump

use crate::domain::{Ecosystem, UpdateStrategy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse an ecosystem name (cargo, npm, hex, maven, python or an alias)
fn parse_ecosystem(s: &str) -> Result<Ecosystem, String> {
    s.trim().parse().map_err(|e: crate::error::ConfigError| e.to_string())
}

/// Parse a strategy name in snake_case or kebab-case
fn parse_strategy(s: &str) -> Result<UpdateStrategy, String> {
    s.trim().parse().map_err(|e: crate::error::ConfigError| e.to_string())
}

/// Format-preserving version requirement rewriter
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reqbump",
    version,
    about = "Format-preserving version requirement rewriter"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Version grammar to use (cargo, npm, hex, maven, python)
    #[arg(short, long, global = true, value_parser = parse_ecosystem)]
    pub ecosystem: Option<Ecosystem>,

    /// Rewrite strategy (bump_versions, bump_versions_if_necessary, widen_ranges, lockfile_only)
    #[arg(short, long, global = true, value_parser = parse_strategy)]
    pub strategy: Option<UpdateStrategy>,

    /// Configuration file (default: ./reqbump.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    // Output options
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - no log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rewrite a requirement so it admits a target version
    Rewrite {
        /// Requirement text, e.g. "^1.2.3" or ">= 1.0, < 2.0"
        requirement: String,

        /// Version the requirement must admit
        #[arg(short, long)]
        target: String,
    },

    /// Compare two versions and print <, = or >
    Compare {
        /// Left-hand version
        left: String,

        /// Right-hand version
        right: String,
    },

    /// Check whether a version satisfies a requirement (exit 0 if it does, 1 if not)
    Satisfies {
        /// Requirement text
        requirement: String,

        /// Candidate version
        version: String,
    },

    /// Rewrite a JSON array of requirement records
    Batch {
        /// JSON file with requirement records, or "-" for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Version the requirements must admit; records are left as-is without one
        #[arg(short, long)]
        target: Option<String>,

        /// JSON value replacing the source of every record that has one
        #[arg(long)]
        updated_source: Option<String>,
    },
}

impl CliArgs {
    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && !self.json
    }
}
