//! Rewrite outcome type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of rewriting one requirement (or one OR-group of it)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum RewriteResult {
    /// The requirement text was rewritten
    Updated(String),
    /// The requirement already fits and is left as-is
    Unchanged,
    /// No textual edit can admit the target version
    Unfixable,
}

impl RewriteResult {
    /// Creates an Updated result
    pub fn updated(text: impl Into<String>) -> Self {
        RewriteResult::Updated(text.into())
    }

    /// Returns true if this is an Updated result
    pub fn is_updated(&self) -> bool {
        matches!(self, RewriteResult::Updated(_))
    }

    /// Returns true if this is an Unchanged result
    pub fn is_unchanged(&self) -> bool {
        matches!(self, RewriteResult::Unchanged)
    }

    /// Returns true if this is an Unfixable result
    pub fn is_unfixable(&self) -> bool {
        matches!(self, RewriteResult::Unfixable)
    }

    /// Returns the text to write back, falling back to `original` when nothing changed.
    /// Unfixable yields `None`.
    pub fn text_or<'a>(&'a self, original: &'a str) -> Option<&'a str> {
        match self {
            RewriteResult::Updated(text) => Some(text),
            RewriteResult::Unchanged => Some(original),
            RewriteResult::Unfixable => None,
        }
    }
}

impl fmt::Display for RewriteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteResult::Updated(text) => write!(f, "{}", text),
            RewriteResult::Unchanged => write!(f, "unchanged"),
            RewriteResult::Unfixable => write!(f, "unfixable"),
        }
    }
}
