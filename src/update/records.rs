//! Batch updating of requirement records
//!
//! Each record is rewritten independently. A record whose requirement fails
//! to parse is logged and returned as it was, so one bad entry never stops
//! the rest of the batch.

use crate::domain::{Requirement, RequirementField, RewriteResult, UpdateStrategy};
use crate::error::RequirementError;
use crate::update::RequirementRewriter;
use crate::version::Version;
use log::{debug, warn};

/// The result of updating one record
#[derive(Debug)]
pub struct RecordUpdate {
    /// The record as it should be written back
    pub record: Requirement,
    /// What happened to its requirement string
    pub outcome: Result<RewriteResult, RequirementError>,
}

impl RecordUpdate {
    /// True if the requirement text was rewritten
    pub fn is_updated(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.is_updated())
    }

    /// True if no rewrite could admit the target
    pub fn is_unfixable(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.is_unfixable())
    }

    /// True if the requirement could not be parsed
    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Rewrites every requirement record of a dependency toward one target
pub struct RequirementsUpdater {
    /// Rewriter holding the grammar and strategy
    rewriter: RequirementRewriter,
    /// Version the requirements must admit; `None` leaves records untouched
    target: Option<Version>,
    /// Replacement for each record's non-null `source`
    updated_source: Option<serde_json::Value>,
}

impl RequirementsUpdater {
    /// Create an updater for `target`
    pub fn new(rewriter: RequirementRewriter, target: Option<Version>) -> Self {
        Self {
            rewriter,
            target,
            updated_source: None,
        }
    }

    /// Replace the `source` of every record that has one
    pub fn with_updated_source(mut self, source: serde_json::Value) -> Self {
        self.updated_source = Some(source);
        self
    }

    /// Update all records, in order
    pub fn updated_requirements(&self, records: &[Requirement]) -> Vec<RecordUpdate> {
        records.iter().map(|record| self.update_record(record)).collect()
    }

    /// Update a single record
    pub fn update_record(&self, record: &Requirement) -> RecordUpdate {
        let mut updated = record.clone();
        if let Some(source) = &self.updated_source {
            if !updated.source.is_null() {
                updated.source = source.clone();
            }
        }

        let (Some(target), Some(text)) = (&self.target, record.requirement_text()) else {
            return unchanged(updated);
        };
        if self.rewriter.strategy() == UpdateStrategy::LockfileOnly {
            return unchanged(updated);
        }

        let outcome = self.rewriter.rewrite_str(text, target);
        match &outcome {
            Ok(RewriteResult::Updated(new_text)) => {
                debug!("{}: '{}' -> '{}'", record.file, text, new_text);
                updated.requirement = Some(RequirementField::Text(new_text.clone()));
            }
            Ok(RewriteResult::Unfixable) => {
                debug!("{}: '{}' cannot admit {}", record.file, text, target);
                updated.requirement = Some(RequirementField::Unfixable);
            }
            Ok(RewriteResult::Unchanged) => {}
            Err(e) => warn!("Skipping requirement in {}: {}", record.file, e),
        }

        RecordUpdate {
            record: updated,
            outcome,
        }
    }
}

fn unchanged(record: Requirement) -> RecordUpdate {
    RecordUpdate {
        record,
        outcome: Ok(RewriteResult::Unchanged),
    }
}
