//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: a version string does not fit the ecosystem grammar
//! - RequirementError: a requirement string cannot be split into clauses
//! - ConfigError: issues with the configuration file or CLI values
//!
//! Rewrite outcomes such as "unchanged" or "unfixable" are not errors; see
//! [`crate::domain::RewriteResult`].

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Ecosystem;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version parsing errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Requirement parsing errors
    #[error(transparent)]
    Requirement(#[from] RequirementError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while parsing a version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The string contains characters outside the grammar's alphabet
    #[error("malformed {ecosystem} version '{raw}': {message}")]
    MalformedVersion {
        ecosystem: Ecosystem,
        raw: String,
        message: String,
    },

    /// The string is blank and the grammar does not allow it
    #[error("empty {ecosystem} version")]
    EmptyVersion { ecosystem: Ecosystem },

    /// A release segment does not fit in 64 bits
    #[error("release segment '{segment}' of {ecosystem} version '{raw}' is too large")]
    NumericOverflow {
        ecosystem: Ecosystem,
        raw: String,
        segment: String,
    },
}

/// Errors raised while parsing a requirement string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequirementError {
    /// The clause uses an operator the ecosystem does not know
    #[error("unsupported {ecosystem} operator '{operator}' in '{clause}'")]
    UnsupportedOperator {
        ecosystem: Ecosystem,
        operator: String,
        clause: String,
    },

    /// An operator with nothing after it
    #[error("operator '{operator}' in '{clause}' is missing a version")]
    MissingVersion { operator: String, clause: String },

    /// The requirement expands to more clauses than allowed
    #[error("requirement '{requirement}' has more than {limit} clauses")]
    TooManyClauses { requirement: String, limit: usize },

    /// A bracket range that is not closed or has too many bounds
    #[error("unbalanced range '{range}'")]
    UnbalancedRange { range: String },

    /// The version part of a clause failed to parse
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Unknown ecosystem name
    #[error("unknown ecosystem '{value}': expected one of cargo, npm, hex, maven, python")]
    UnknownEcosystem { value: String },

    /// Unknown update strategy name
    #[error(
        "unknown update strategy '{value}': expected bump_versions, \
         bump_versions_if_necessary, widen_ranges or lockfile_only"
    )]
    UnknownStrategy { value: String },
}

impl VersionError {
    /// Creates a new MalformedVersion error
    pub fn malformed(
        ecosystem: Ecosystem,
        raw: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        VersionError::MalformedVersion {
            ecosystem,
            raw: raw.into(),
            message: message.into(),
        }
    }

    /// Creates a new NumericOverflow error
    pub fn overflow(ecosystem: Ecosystem, raw: impl Into<String>, segment: impl Into<String>) -> Self {
        VersionError::NumericOverflow {
            ecosystem,
            raw: raw.into(),
            segment: segment.into(),
        }
    }
}

impl RequirementError {
    /// Creates a new UnsupportedOperator error
    pub fn unsupported_operator(
        ecosystem: Ecosystem,
        operator: impl Into<String>,
        clause: impl Into<String>,
    ) -> Self {
        RequirementError::UnsupportedOperator {
            ecosystem,
            operator: operator.into(),
            clause: clause.into(),
        }
    }

    /// Creates a new MissingVersion error
    pub fn missing_version(operator: impl Into<String>, clause: impl Into<String>) -> Self {
        RequirementError::MissingVersion {
            operator: operator.into(),
            clause: clause.into(),
        }
    }

    /// Creates a new UnbalancedRange error
    pub fn unbalanced(range: impl Into<String>) -> Self {
        RequirementError::UnbalancedRange {
            range: range.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}
