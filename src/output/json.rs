//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON objects for `rewrite`, `compare` and `satisfies`
//! - The updated record array for `batch`, with per-record errors in
//!   verbose mode

use crate::domain::{Ecosystem, Requirement, RewriteResult, UpdateStrategy};
use crate::output::{ordering_symbol, OutputFormatter, RewriteReport, Verbosity};
use crate::update::RecordUpdate;
use serde::Serialize;
use std::cmp::Ordering;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn write_json<T: Serialize>(&self, value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// JSON representation of a rewrite
#[derive(Serialize)]
struct JsonRewrite<'a> {
    ecosystem: Ecosystem,
    strategy: UpdateStrategy,
    requirement: &'a str,
    target: &'a str,
    result: &'a RewriteResult,
}

/// JSON representation of a comparison
#[derive(Serialize)]
struct JsonComparison<'a> {
    left: &'a str,
    right: &'a str,
    /// "less", "equal" or "greater"
    ordering: &'static str,
    symbol: &'static str,
}

/// JSON representation of a satisfaction check
#[derive(Serialize)]
struct JsonSatisfaction<'a> {
    requirement: &'a str,
    version: &'a str,
    satisfied: bool,
}

/// Verbose batch output: records plus what happened to each
#[derive(Serialize)]
struct JsonBatch<'a> {
    requirements: Vec<&'a Requirement>,
    results: Vec<JsonRecordResult>,
}

/// Per-record outcome in verbose batch output
#[derive(Serialize)]
struct JsonRecordResult {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<RewriteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn ordering_name(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_rewrite(
        &self,
        report: &RewriteReport<'_>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonRewrite {
            ecosystem: report.ecosystem,
            strategy: report.strategy,
            requirement: report.requirement,
            target: report.target,
            result: report.result,
        };
        self.write_json(&output, writer)
    }

    fn format_comparison(
        &self,
        left: &str,
        right: &str,
        ordering: Ordering,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonComparison {
            left,
            right,
            ordering: ordering_name(ordering),
            symbol: ordering_symbol(ordering),
        };
        self.write_json(&output, writer)
    }

    fn format_satisfaction(
        &self,
        requirement: &str,
        version: &str,
        satisfied: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonSatisfaction {
            requirement,
            version,
            satisfied,
        };
        self.write_json(&output, writer)
    }

    fn format_batch(
        &self,
        _originals: &[Requirement],
        updates: &[RecordUpdate],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let records: Vec<&Requirement> = updates.iter().map(|update| &update.record).collect();
        if self.verbosity != Verbosity::Verbose {
            return self.write_json(&records, writer);
        }

        let results = updates
            .iter()
            .map(|update| match &update.outcome {
                Ok(result) => JsonRecordResult {
                    file: update.record.file.clone(),
                    result: Some(result.clone()),
                    error: None,
                },
                Err(e) => JsonRecordResult {
                    file: update.record.file.clone(),
                    result: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();
        self.write_json(
            &JsonBatch {
                requirements: records,
                results,
            },
            writer,
        )
    }
}
