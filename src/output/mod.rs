//! Output formatting for CLI results
//!
//! Every subcommand writes through an [`OutputFormatter`], chosen once from
//! the `--json`, `--verbose`, `--quiet` and `--no-color` flags.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::{Ecosystem, Requirement, RewriteResult, UpdateStrategy};
use crate::update::RecordUpdate;
use std::cmp::Ordering;
use std::io::Write;

/// How results are rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One answer per line, batch results grouped by manifest file
    #[default]
    Text,
    /// Pretty-printed JSON documents
    Json,
}

/// How much detail the formatters print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Batch summary line only
    Quiet,
    #[default]
    Normal,
    /// Echo inputs and list unchanged records too
    Verbose,
}

impl Verbosity {
    /// `--quiet` wins; clap already rejects both flags together
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }
}

/// Rendering options resolved from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    /// ANSI colors in text output; ignored for JSON
    pub color: bool,
}

impl OutputConfig {
    /// Create configuration from CLI flags
    pub fn from_cli(json: bool, verbose: bool, quiet: bool, color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        Self {
            format,
            verbosity: Verbosity::from_flags(verbose, quiet),
            color: color && format == OutputFormat::Text,
        }
    }
}

/// A single rewrite and the inputs that produced it
#[derive(Debug, Clone)]
pub struct RewriteReport<'a> {
    pub ecosystem: Ecosystem,
    pub strategy: UpdateStrategy,
    pub requirement: &'a str,
    pub target: &'a str,
    pub result: &'a RewriteResult,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the result of `rewrite`
    fn format_rewrite(&self, report: &RewriteReport<'_>, writer: &mut dyn Write)
        -> std::io::Result<()>;

    /// Format and write the result of `compare`
    fn format_comparison(
        &self,
        left: &str,
        right: &str,
        ordering: Ordering,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format and write the result of `satisfies`
    fn format_satisfaction(
        &self,
        requirement: &str,
        version: &str,
        satisfied: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format and write the result of `batch`; `originals[i]` is the input
    /// record behind `updates[i]`
    fn format_batch(
        &self,
        originals: &[Requirement],
        updates: &[RecordUpdate],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}

/// Symbol printed by `compare`
pub fn ordering_symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}
