//! Update strategies controlling how requirements are rewritten

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How a requirement should be rewritten to admit a new version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStrategy {
    /// Always rewrite the requirement to point at the target
    #[default]
    BumpVersions,
    /// Rewrite only when the target is not already admitted
    BumpVersionsIfNecessary,
    /// Library mode: loosen upper bounds instead of raising lower bounds
    WidenRanges,
    /// Never touch requirement text
    LockfileOnly,
}

impl UpdateStrategy {
    /// Returns the snake_case identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateStrategy::BumpVersions => "bump_versions",
            UpdateStrategy::BumpVersionsIfNecessary => "bump_versions_if_necessary",
            UpdateStrategy::WidenRanges => "widen_ranges",
            UpdateStrategy::LockfileOnly => "lockfile_only",
        }
    }

    /// Returns true if an already satisfied requirement should be left alone
    pub fn keeps_satisfied(&self) -> bool {
        matches!(
            self,
            UpdateStrategy::BumpVersionsIfNecessary | UpdateStrategy::WidenRanges
        )
    }

    /// Returns all strategies
    pub fn all() -> &'static [UpdateStrategy] {
        &[
            UpdateStrategy::BumpVersions,
            UpdateStrategy::BumpVersionsIfNecessary,
            UpdateStrategy::WidenRanges,
            UpdateStrategy::LockfileOnly,
        ]
    }
}

impl fmt::Display for UpdateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UpdateStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        UpdateStrategy::all()
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownStrategy {
                value: s.to_string(),
            })
    }
}
