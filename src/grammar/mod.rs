//! Grammar profiles describing each ecosystem's version and requirement syntax
//!
//! A profile is plain data: qualifier vocabulary, separators, operator
//! table, range syntax and a handful of behavioral flags. The version
//! tokenizer, the requirement parser and the rewriter read these tables
//! and never branch on an ecosystem by name.

mod profiles;

use crate::domain::Ecosystem;
use crate::requirement::Operator;

pub use profiles::{CARGO, HEX, MAVEN, NPM, PYTHON};

/// How `+build` metadata takes part in ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMetadata {
    /// A `+` is a malformed character
    Unsupported,
    /// Parsed and kept for display, never compared
    Ignored,
    /// Compared only when everything else is equal; absent sorts first
    Tiebreak,
}

/// Static description of one ecosystem's grammar
#[derive(Debug)]
pub struct GrammarProfile {
    /// Ecosystem this profile belongs to
    pub ecosystem: Ecosystem,

    /// Known qualifiers and their rank relative to a plain release (0)
    pub qualifiers: &'static [(&'static str, i32)],
    /// Spelling variants mapped to a canonical qualifier
    pub aliases: &'static [(&'static str, &'static str)],
    /// Abbreviations that only apply when directly followed by a digit (`a1`)
    pub digit_aliases: &'static [(&'static str, &'static str)],
    /// Rank given to words missing from the qualifier table
    pub unknown_qualifier_rank: i32,
    /// Characters that open a nested comparison bucket
    pub bucket_separators: &'static [char],
    /// A word right after `.` opens a nested bucket (`1.0.dev1` == `1.0-dev1`)
    pub dot_qualifier_opens_bucket: bool,
    /// SemVer pre-release rules for the nested bucket: any suffix sorts below
    /// the release, identifiers compare without zero padding and words
    /// outrank numbers
    pub semver_prerelease: bool,
    /// Treatment of `+build` metadata
    pub build_metadata: BuildMetadata,
    /// Blank version strings are accepted
    pub allows_blank: bool,
    /// `2018-10-03` is read as `20181003`
    pub date_versions: bool,
    /// A leading `N!` epoch outranks the rest of the version
    pub epochs: bool,

    /// Operator spellings; the first spelling of an operator is canonical
    pub operators: &'static [(&'static str, Operator)],
    /// Operator implied by a bare version
    pub bare_operator: Operator,
    /// A bare or `=` version with fewer than three segments matches as a prefix
    pub partial_exact_matches_prefix: bool,
    /// Tokens standing for "any value" in a version segment
    pub wildcards: &'static [&'static str],
    /// Separators joining clauses of one AND-group
    pub and_separators: &'static [&'static str],
    /// Whitespace alone separates clauses of an AND-group
    pub whitespace_and: bool,
    /// Separators joining OR-groups
    pub or_separators: &'static [&'static str],
    /// `1.2.3 - 1.4.0` is an inclusive range
    pub hyphen_ranges: bool,
    /// `[1.0,2.0)` interval notation
    pub bracket_ranges: bool,
    /// A pre-release only matches if a clause names a pre-release of the same release
    pub prerelease_requires_full_match: bool,
    /// Widening turns a compatible-range clause into an explicit range
    pub widen_compatible_to_range: bool,
    /// Fewest segments a widened `>=`/`<` bound may be written with
    pub min_bound_segments: usize,
    /// Text written for a group that lost all of its clauses
    pub any_version_text: &'static str,
    /// Separator used when the rewriter introduces a new AND-clause
    pub canonical_and: &'static str,
    /// Upper limit on clauses in one requirement string
    pub max_clauses: usize,
}

impl GrammarProfile {
    /// Returns true if `+build` metadata is accepted by this grammar
    pub fn supports_build_metadata(&self) -> bool {
        self.build_metadata != BuildMetadata::Unsupported
    }

    /// Returns true if `c` opens a nested bucket
    pub fn is_bucket_separator(&self, c: char) -> bool {
        self.bucket_separators.contains(&c)
    }

    /// Returns true if `token` is a wildcard segment
    pub fn is_wildcard(&self, token: &str) -> bool {
        self.wildcards.contains(&token)
    }

    /// Ordering key of a qualifier word: (rank, canonical spelling).
    ///
    /// `word` must already be lowercase.
    pub fn qualifier_key(&self, word: &str, followed_by_digit: bool) -> (i32, String) {
        let mut canonical = word;
        if followed_by_digit {
            if let Some((_, target)) = self.digit_aliases.iter().find(|(alias, _)| *alias == word) {
                canonical = *target;
            }
        }
        if let Some((_, target)) = self.aliases.iter().find(|(alias, _)| *alias == canonical) {
            canonical = *target;
        }
        match self.qualifiers.iter().find(|(name, _)| *name == canonical) {
            Some((name, rank)) => (*rank, (*name).to_string()),
            None => (self.unknown_qualifier_rank, canonical.to_string()),
        }
    }

    /// Longest operator spelling at the start of `text`
    pub fn match_operator(&self, text: &str) -> Option<(&'static str, Operator)> {
        self.operators
            .iter()
            .filter(|(spelling, _)| text.starts_with(spelling))
            .max_by_key(|(spelling, _)| spelling.len())
            .copied()
    }

    /// Canonical spelling of `operator`, if this grammar has one
    pub fn operator_text(&self, operator: Operator) -> Option<&'static str> {
        self.operators
            .iter()
            .find(|(_, op)| *op == operator)
            .map(|(spelling, _)| *spelling)
    }
}

/// Returns the static profile for an ecosystem
pub fn get_profile(ecosystem: Ecosystem) -> &'static GrammarProfile {
    match ecosystem {
        Ecosystem::Cargo => &CARGO,
        Ecosystem::Npm => &NPM,
        Ecosystem::Hex => &HEX,
        Ecosystem::Maven => &MAVEN,
        Ecosystem::Python => &PYTHON,
    }
}
