//! Requirement records exchanged with the manifest layer
//!
//! One record describes a single declaration site of a dependency:
//! the requirement text, the file it lives in, the dependency groups it
//! belongs to, and an opaque source description (registry, git, path, ...).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Requirement text, or the marker left when no rewrite could admit the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementField {
    /// A requirement string
    Text(String),
    /// Sentinel for an unfixable requirement; never a valid requirement string
    Unfixable,
}

impl RequirementField {
    /// Returns the requirement text, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RequirementField::Text(text) => Some(text),
            RequirementField::Unfixable => None,
        }
    }

    /// Returns true for the unfixable sentinel
    pub fn is_unfixable(&self) -> bool {
        matches!(self, RequirementField::Unfixable)
    }
}

impl fmt::Display for RequirementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementField::Text(text) => write!(f, "{}", text),
            RequirementField::Unfixable => write!(f, "<unfixable>"),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct UnfixableMarker {
    unfixable: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Text(String),
    Marker(UnfixableMarker),
}

impl Serialize for RequirementField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RequirementField::Text(text) => serializer.serialize_str(text),
            RequirementField::Unfixable => UnfixableMarker { unfixable: true }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for RequirementField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawField::deserialize(deserializer)? {
            RawField::Text(text) => Ok(RequirementField::Text(text)),
            RawField::Marker(UnfixableMarker { unfixable: true }) => Ok(RequirementField::Unfixable),
            RawField::Marker(_) => Err(D::Error::custom(
                "requirement marker must be {\"unfixable\": true}",
            )),
        }
    }
}

/// A dependency requirement at one declaration site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Requirement text; `None` when the declaration has no constraint
    pub requirement: Option<RequirementField>,
    /// Manifest file the declaration lives in
    pub file: String,
    /// Dependency groups (e.g. "dependencies", "dev-dependencies")
    #[serde(default)]
    pub groups: Vec<String>,
    /// Opaque source description, passed through untouched
    #[serde(default)]
    pub source: serde_json::Value,
}

impl Requirement {
    /// Creates a new record with a requirement string
    pub fn new(requirement: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            requirement: Some(RequirementField::Text(requirement.into())),
            file: file.into(),
            groups: Vec::new(),
            source: serde_json::Value::Null,
        }
    }

    /// Sets the dependency groups (builder pattern)
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the source description (builder pattern)
    pub fn with_source(mut self, source: serde_json::Value) -> Self {
        self.source = source;
        self
    }

    /// Returns the requirement text, if present and not unfixable
    pub fn requirement_text(&self) -> Option<&str> {
        self.requirement.as_ref().and_then(RequirementField::as_text)
    }

    /// Returns true if the record carries the unfixable sentinel
    pub fn is_unfixable(&self) -> bool {
        self.requirement
            .as_ref()
            .is_some_and(RequirementField::is_unfixable)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requirement {
            Some(field) => write!(f, "{} ({})", field, self.file),
            None => write!(f, "<none> ({})", self.file),
        }
    }
}
