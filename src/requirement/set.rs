//! OR-groups of AND-clauses and the full requirement set

use std::fmt;

use crate::error::RequirementError;
use crate::grammar::GrammarProfile;
use crate::version::Version;

use super::clause::RequirementClause;
use super::parser;

/// Clauses that must all hold, with the separators written between them
#[derive(Debug, Clone)]
pub struct OrGroup {
    /// Clauses in original order
    pub clauses: Vec<RequirementClause>,
    /// `separators[i]` sits between `clauses[i]` and `clauses[i + 1]`
    pub separators: Vec<String>,
}

impl OrGroup {
    /// Creates a group; `separators` must be one shorter than `clauses`
    pub fn new(clauses: Vec<RequirementClause>, separators: Vec<String>) -> Self {
        debug_assert_eq!(separators.len() + 1, clauses.len().max(1));
        Self { clauses, separators }
    }

    /// True if no clause constrains anything
    pub fn is_any(&self) -> bool {
        self.clauses.iter().all(RequirementClause::is_any)
    }

    /// True if every clause admits `candidate` and the pre-release rule holds
    pub fn admits(&self, candidate: &Version, profile: &GrammarProfile) -> bool {
        self.clauses.iter().all(|clause| clause.admits(candidate))
            && self.prerelease_allowed(candidate, profile)
    }

    fn prerelease_allowed(&self, candidate: &Version, profile: &GrammarProfile) -> bool {
        if !profile.prerelease_requires_full_match || !candidate.is_prerelease() {
            return true;
        }
        self.clauses.iter().filter_map(RequirementClause::version).any(|version| {
            version.is_prerelease() && version.trimmed_release() == candidate.trimmed_release()
        })
    }
}

impl fmt::Display for OrGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, clause) in self.clauses.iter().enumerate() {
            if index > 0 {
                write!(f, "{}", self.separators[index - 1])?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// A parsed requirement string
#[derive(Debug, Clone)]
pub struct RequirementSet {
    original_text: String,
    pub(crate) leading: String,
    pub(crate) trailing: String,
    pub(crate) groups: Vec<OrGroup>,
    pub(crate) or_separators: Vec<String>,
    profile: &'static GrammarProfile,
}

impl RequirementSet {
    /// Parses `raw` under `profile`
    pub fn parse(raw: &str, profile: &'static GrammarProfile) -> Result<Self, RequirementError> {
        parser::parse_requirement(raw, profile)
    }

    pub(crate) fn from_parts(
        original_text: &str,
        leading: &str,
        trailing: &str,
        groups: Vec<OrGroup>,
        or_separators: Vec<String>,
        profile: &'static GrammarProfile,
    ) -> Self {
        Self {
            original_text: original_text.to_string(),
            leading: leading.to_string(),
            trailing: trailing.to_string(),
            groups,
            or_separators,
            profile,
        }
    }

    /// The verbatim source text
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// OR-groups in original order
    pub fn groups(&self) -> &[OrGroup] {
        &self.groups
    }

    /// Separators between OR-groups, as written
    pub fn or_separators(&self) -> &[String] {
        &self.or_separators
    }

    /// The grammar this set was parsed with
    pub fn profile(&self) -> &'static GrammarProfile {
        self.profile
    }

    /// Total number of clauses across all groups
    pub fn clause_count(&self) -> usize {
        self.groups.iter().map(|group| group.clauses.len()).sum()
    }

    /// True if the requirement places no constraint at all
    pub fn is_any(&self) -> bool {
        self.groups.iter().all(OrGroup::is_any)
    }

    /// True if any OR-group admits `candidate`
    pub fn is_satisfied_by(&self, candidate: &Version) -> bool {
        self.groups
            .iter()
            .any(|group| group.admits(candidate, self.profile))
    }

    /// Joins group texts with the given OR separators, keeping outer whitespace
    pub(crate) fn render(&self, groups: &[String], separators: &[String]) -> String {
        let mut text = self.leading.clone();
        for (index, group) in groups.iter().enumerate() {
            if index > 0 {
                text.push_str(&separators[index - 1]);
            }
            text.push_str(group);
        }
        text.push_str(&self.trailing);
        text
    }
}

impl fmt::Display for RequirementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self.groups.iter().map(OrGroup::to_string).collect();
        write!(f, "{}", self.render(&groups, &self.or_separators))
    }
}
