//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Plain one-line answers for `rewrite`, `compare` and `satisfies`
//! - Per-file batch results with colors
//! - Summary with updated/unchanged/unfixable/failed counts

use crate::domain::{Requirement, RequirementField, RewriteResult};
use crate::output::{ordering_symbol, OutputFormatter, RewriteReport, Verbosity};
use crate::update::RecordUpdate;
use colored::Colorize;
use std::cmp::Ordering;
use std::io::Write;

/// Counts shown in the batch summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub updated: usize,
    pub unchanged: usize,
    pub unfixable: usize,
    pub failed: usize,
}

impl BatchCounts {
    /// Tally a batch
    pub fn from_updates(updates: &[RecordUpdate]) -> Self {
        let mut counts = Self::default();
        for update in updates {
            if update.is_error() {
                counts.failed += 1;
            } else if update.is_unfixable() {
                counts.unfixable += 1;
            } else if update.is_updated() {
                counts.updated += 1;
            } else {
                counts.unchanged += 1;
            }
        }
        counts
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn result_text(&self, result: &RewriteResult) -> String {
        let plain = result.to_string();
        if !self.color {
            return plain;
        }
        match result {
            RewriteResult::Updated(_) => plain.bright_white().bold().to_string(),
            RewriteResult::Unchanged => plain.dimmed().to_string(),
            RewriteResult::Unfixable => plain.red().to_string(),
        }
    }

    /// Format one batch line
    fn format_record_line(
        &self,
        original: &Requirement,
        update: &RecordUpdate,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let old = requirement_label(original.requirement.as_ref());
        let groups = if original.groups.is_empty() {
            String::new()
        } else {
            format!(" ({})", original.groups.join(", "))
        };

        let outcome = match &update.outcome {
            Ok(result) => self.result_text(result),
            Err(e) if self.color => format!("{} {}", "✗".red(), e),
            Err(e) => format!("error: {}", e),
        };
        let arrow = if self.color {
            "→".dimmed().to_string()
        } else {
            "->".to_string()
        };
        let groups = if self.color {
            groups.dimmed().to_string()
        } else {
            groups
        };

        writeln!(
            writer,
            "  {:width$} {} {}{}",
            old,
            arrow,
            outcome,
            groups,
            width = width
        )
    }

    fn format_batch_summary(
        &self,
        counts: BatchCounts,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return writeln!(
                writer,
                "{} updated, {} unfixable, {} failed",
                counts.updated, counts.unfixable, counts.failed
            );
        }

        let header = if self.color {
            "Summary:".bold().to_string()
        } else {
            "Summary:".to_string()
        };
        writeln!(writer, "{}", header)?;
        writeln!(writer, "  {} requirement(s) updated", counts.updated)?;
        writeln!(writer, "  {} unchanged", counts.unchanged)?;
        if counts.unfixable > 0 {
            let line = format!("  {} unfixable", counts.unfixable);
            if self.color {
                writeln!(writer, "{}", line.red())?;
            } else {
                writeln!(writer, "{}", line)?;
            }
        }
        if counts.failed > 0 {
            let line = format!("  {} failed to parse", counts.failed);
            if self.color {
                writeln!(writer, "{}", line.red())?;
            } else {
                writeln!(writer, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Requirement text for display; missing requirements show as `(none)`
fn requirement_label(field: Option<&RequirementField>) -> String {
    match field {
        Some(RequirementField::Text(text)) if text.trim().is_empty() => "\"\"".to_string(),
        Some(field) => field.to_string(),
        None => "(none)".to_string(),
    }
}

impl OutputFormatter for TextFormatter {
    fn format_rewrite(
        &self,
        report: &RewriteReport<'_>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Verbose {
            writeln!(
                writer,
                "{} [{}, {}] target {}",
                report.requirement,
                report.ecosystem,
                report.strategy,
                report.target
            )?;
        }
        writeln!(writer, "{}", self.result_text(report.result))
    }

    fn format_comparison(
        &self,
        left: &str,
        right: &str,
        ordering: Ordering,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Verbose {
            return writeln!(writer, "{} {} {}", left, ordering_symbol(ordering), right);
        }
        writeln!(writer, "{}", ordering_symbol(ordering))
    }

    fn format_satisfaction(
        &self,
        requirement: &str,
        version: &str,
        satisfied: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Verbose {
            let verdict = if satisfied { "admits" } else { "does not admit" };
            writeln!(writer, "'{}' {} {}", requirement, verdict, version)?;
        }
        writeln!(writer, "{}", satisfied)
    }

    fn format_batch(
        &self,
        originals: &[Requirement],
        updates: &[RecordUpdate],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let counts = BatchCounts::from_updates(updates);
        if self.verbosity == Verbosity::Quiet {
            return self.format_batch_summary(counts, writer);
        }

        // Group lines by file, keeping first-seen order
        let mut files: Vec<&str> = Vec::new();
        for original in originals {
            if !files.contains(&original.file.as_str()) {
                files.push(&original.file);
            }
        }

        for file in files {
            let rows: Vec<(&Requirement, &RecordUpdate)> = originals
                .iter()
                .zip(updates)
                .filter(|(original, _)| original.file == file)
                .filter(|(_, update)| {
                    self.verbosity == Verbosity::Verbose
                        || !matches!(update.outcome, Ok(RewriteResult::Unchanged))
                })
                .collect();
            if rows.is_empty() {
                continue;
            }

            if self.color {
                writeln!(writer, "{}", file.cyan().bold())?;
            } else {
                writeln!(writer, "{}", file)?;
            }
            let width = rows
                .iter()
                .map(|(original, _)| requirement_label(original.requirement.as_ref()).len())
                .max()
                .unwrap_or(0);
            for (original, update) in rows {
                self.format_record_line(original, update, width, writer)?;
            }
            writeln!(writer)?;
        }

        self.format_batch_summary(counts, writer)
    }
}
