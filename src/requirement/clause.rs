//! Atomic requirement clauses: one operator applied to one version literal

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RequirementError;
use crate::grammar::GrammarProfile;
use crate::version::Version;

/// Characters that can only start an operator
const OPERATOR_CHARS: &[char] = &['<', '>', '=', '!', '~', '^'];

/// Comparison operator of a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `=`, `==`, bare versions in most grammars, `[1.0]`
    Exact,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `^`: compatible up to the first non-zero segment
    Caret,
    /// `~`: compatible up to the minor segment
    Tilde,
    /// `~>`: compatible up to the second-to-last stated segment
    Twiddle,
    /// `~=`: PEP 440 compatible release
    Compatible,
    /// No constraint (`*`, empty requirement)
    Any,
}

impl Operator {
    /// Returns a short human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Operator::Exact => "exact",
            Operator::NotEqual => "not-equal",
            Operator::Greater => "greater",
            Operator::GreaterEq => "greater-or-equal",
            Operator::Less => "less",
            Operator::LessEq => "less-or-equal",
            Operator::Caret => "caret",
            Operator::Tilde => "tilde",
            Operator::Twiddle => "twiddle",
            Operator::Compatible => "compatible",
            Operator::Any => "any",
        }
    }

    /// `^`, `~`, `~>` and `~=`
    pub fn is_compatible_range(&self) -> bool {
        matches!(
            self,
            Operator::Caret | Operator::Tilde | Operator::Twiddle | Operator::Compatible
        )
    }

    /// `<` and `<=`
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Operator::Less | Operator::LessEq)
    }

    /// `>` and `>=`
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, Operator::Greater | Operator::GreaterEq)
    }

    /// Segment a compatible-range operator increments to form its exclusive
    /// upper bound. `segments` must not be empty.
    pub fn bump_index(&self, segments: &[u64]) -> usize {
        let last = segments.len().saturating_sub(1);
        match self {
            Operator::Caret => segments.iter().position(|s| *s != 0).unwrap_or(last),
            Operator::Tilde => last.min(1),
            _ => segments.len().saturating_sub(2),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A version literal split into an optional `v`, an optional `N!` epoch,
/// its release segments (digits or wildcard tokens) and whatever follows them
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VersionLiteral<'a> {
    pub prefix: &'a str,
    pub epoch: &'a str,
    pub segments: Vec<&'a str>,
    pub rest: &'a str,
}

fn is_segment_token(token: &str) -> bool {
    (!token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        || matches!(token, "*" | "x" | "X")
}

/// Splits `text` as `[v][N!]SEG(.SEG)*REST`
pub(crate) fn split_literal(text: &str) -> VersionLiteral<'_> {
    let mut chars = text.chars();
    let prefix_len = match (chars.next(), chars.next()) {
        (Some('v' | 'V'), Some(next)) if next.is_ascii_digit() || matches!(next, '*' | 'x' | 'X') => 1,
        _ => 0,
    };
    let (prefix, body) = text.split_at(prefix_len);
    let epoch_len = match body.find('!') {
        Some(bang) if bang > 0 && body[..bang].bytes().all(|b| b.is_ascii_digit()) => bang + 1,
        _ => 0,
    };
    let (epoch, body) = body.split_at(epoch_len);

    let mut segments = Vec::new();
    let mut consumed = 0;
    loop {
        let start = if segments.is_empty() {
            consumed
        } else if body[consumed..].starts_with('.') {
            consumed + 1
        } else {
            break;
        };
        let end = body[start..]
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '*')
            .map_or(body.len(), |offset| start + offset);
        let token = &body[start..end];
        if is_segment_token(token) {
            segments.push(token);
            consumed = end;
            continue;
        }
        let digits = token.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            segments.push(&token[..digits]);
            consumed = start + digits;
        }
        break;
    }

    VersionLiteral {
        prefix,
        epoch,
        segments,
        rest: &body[consumed..],
    }
}

/// `segments[..index]` followed by `segments[index] + 1`
pub(crate) fn bump_at(segments: &[u64], index: usize) -> Vec<u64> {
    let mut bumped: Vec<u64> = segments.iter().take(index + 1).copied().collect();
    bumped.resize(index + 1, 0);
    bumped[index] = bumped[index].saturating_add(1);
    bumped
}

/// One `operator version` pair of a requirement, with enough of its original
/// text to re-emit it byte-for-byte
#[derive(Debug, Clone)]
pub struct RequirementClause {
    /// Parsed operator
    pub operator: Operator,
    /// Operator as written (`""` for bare versions, `[` for bracket ranges)
    pub operator_text: String,
    /// Whitespace between operator and version
    pub spacing: String,
    /// Version literal as written, wildcards included
    pub version_text: String,
    /// Trailing text after the version (closing bracket)
    pub suffix: String,
    /// The literal ends in wildcard segments (`1.2.x`, `^0.*.*`)
    pub wildcard_tail: bool,
    version: Option<Version>,
    concrete: Vec<u64>,
    precision: usize,
}

impl RequirementClause {
    /// Parses one operator-prefixed clause (`>= 1.2`, `~>2.0`, `1.4.x`)
    pub fn parse(text: &str, profile: &'static GrammarProfile) -> Result<Self, RequirementError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::any(""));
        }

        if let Some((spelling, operator)) = profile.match_operator(text) {
            let rest = &text[spelling.len()..];
            let version_text = rest.trim_start();
            let spacing = &rest[..rest.len() - version_text.len()];
            if version_text.is_empty() {
                return Err(RequirementError::missing_version(spelling, text));
            }
            if version_text.starts_with(OPERATOR_CHARS) {
                return Err(RequirementError::unsupported_operator(
                    profile.ecosystem,
                    leading_operator(text),
                    text,
                ));
            }
            return Self::from_parts(operator, spelling, spacing, version_text, "", profile);
        }

        if text.starts_with(OPERATOR_CHARS) {
            return Err(RequirementError::unsupported_operator(
                profile.ecosystem,
                leading_operator(text),
                text,
            ));
        }
        if profile.is_wildcard(text) {
            return Ok(Self::any(text));
        }
        Self::from_parts(profile.bare_operator, "", "", text, "", profile)
    }

    /// An unconstrained clause that re-emits `text`
    pub fn any(text: &str) -> Self {
        Self::placeholder("", text, "")
    }

    /// An unconstrained clause with surrounding text (open side of `[1.0,)`)
    pub(crate) fn placeholder(operator_text: &str, version_text: &str, suffix: &str) -> Self {
        RequirementClause {
            operator: Operator::Any,
            operator_text: operator_text.to_string(),
            spacing: String::new(),
            version_text: version_text.to_string(),
            suffix: suffix.to_string(),
            wildcard_tail: false,
            version: None,
            concrete: Vec::new(),
            precision: 0,
        }
    }

    /// Builds a clause from its textual parts, parsing the version literal
    pub(crate) fn from_parts(
        operator: Operator,
        operator_text: &str,
        spacing: &str,
        version_text: &str,
        suffix: &str,
        profile: &'static GrammarProfile,
    ) -> Result<Self, RequirementError> {
        if profile.is_wildcard(version_text) {
            let mut clause = Self::placeholder(operator_text, version_text, suffix);
            clause.spacing = spacing.to_string();
            clause.wildcard_tail = true;
            clause.precision = 1;
            return Ok(clause);
        }

        let literal = split_literal(version_text);
        let first_wildcard = literal
            .segments
            .iter()
            .position(|segment| profile.is_wildcard(segment));
        let parse_text = match first_wildcard {
            Some(_) => {
                let substituted: Vec<&str> = literal
                    .segments
                    .iter()
                    .map(|segment| if profile.is_wildcard(segment) { "0" } else { *segment })
                    .collect();
                format!(
                    "{}{}{}{}",
                    literal.prefix,
                    literal.epoch,
                    substituted.join("."),
                    literal.rest
                )
            }
            None => version_text.to_string(),
        };
        let version = Version::parse(&parse_text, profile)?;
        let concrete = match first_wildcard {
            Some(index) => version.release().iter().take(index).copied().collect(),
            None => version.release().to_vec(),
        };

        Ok(RequirementClause {
            operator,
            operator_text: operator_text.to_string(),
            spacing: spacing.to_string(),
            version_text: version_text.to_string(),
            suffix: suffix.to_string(),
            wildcard_tail: first_wildcard.is_some(),
            precision: literal.segments.len(),
            version: Some(version),
            concrete,
        })
    }

    /// Same clause with a different version literal
    pub(crate) fn with_version_text(
        &self,
        version_text: &str,
        profile: &'static GrammarProfile,
    ) -> Result<Self, RequirementError> {
        Self::from_parts(
            self.operator,
            &self.operator_text,
            &self.spacing,
            version_text,
            &self.suffix,
            profile,
        )
    }

    /// Parsed version, with wildcard segments read as `0`
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// True if trailing segments are wildcards
    pub fn is_wildcard_tail(&self) -> bool {
        self.wildcard_tail
    }

    /// Release segments stated before the first wildcard
    pub fn concrete_segments(&self) -> &[u64] {
        &self.concrete
    }

    /// Number of release segments written, wildcards included
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// True if this clause places no constraint
    pub fn is_any(&self) -> bool {
        self.operator == Operator::Any
    }

    /// True if `candidate` satisfies this clause on its own
    pub fn admits(&self, candidate: &Version) -> bool {
        let Some(version) = &self.version else {
            return true;
        };
        match self.operator {
            Operator::Any => true,
            Operator::Exact => self.matches_exactly(version, candidate),
            Operator::NotEqual => !self.matches_exactly(version, candidate),
            Operator::Greater => candidate > version,
            Operator::GreaterEq => candidate >= version,
            Operator::Less => candidate < version,
            Operator::LessEq => candidate <= version,
            Operator::Caret | Operator::Tilde | Operator::Twiddle | Operator::Compatible => {
                if self.concrete.is_empty() {
                    return true;
                }
                let upper = bump_at(&self.concrete, self.operator.bump_index(&self.concrete));
                candidate >= version && *candidate < version.sibling(&upper)
            }
        }
    }

    fn matches_exactly(&self, version: &Version, candidate: &Version) -> bool {
        let profile = version.profile();
        let partial = profile.partial_exact_matches_prefix
            && self.precision < 3
            && version.suffix().is_empty();
        if !(self.wildcard_tail || partial) {
            return candidate == version;
        }
        if self.concrete.is_empty() {
            return true;
        }
        let lower = version.sibling(&self.concrete);
        let upper = version.sibling(&bump_at(&self.concrete, self.concrete.len() - 1));
        *candidate >= lower && *candidate < upper
    }
}

fn leading_operator(text: &str) -> &str {
    let end = text
        .find(|c: char| !OPERATOR_CHARS.contains(&c))
        .unwrap_or(text.len());
    &text[..end]
}

impl fmt::Display for RequirementClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.operator_text, self.spacing, self.version_text, self.suffix
        )
    }
}
