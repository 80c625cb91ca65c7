//! Splits requirement strings into OR-groups and AND-clauses
//!
//! Splitting never drops text: every separator is kept together with the
//! whitespace around it, so an unmodified set prints back exactly as read.

use log::debug;

use crate::error::RequirementError;
use crate::grammar::GrammarProfile;

use super::clause::{Operator, RequirementClause};
use super::set::{OrGroup, RequirementSet};

/// A slice of the input plus the separators found between its pieces
struct Split<'a> {
    pieces: Vec<&'a str>,
    separators: Vec<&'a str>,
}

/// Parses a full requirement string
pub fn parse_requirement(
    raw: &str,
    profile: &'static GrammarProfile,
) -> Result<RequirementSet, RequirementError> {
    let body = raw.trim();
    if body.is_empty() {
        let group = OrGroup::new(vec![RequirementClause::any("")], Vec::new());
        return Ok(RequirementSet::from_parts(raw, raw, "", vec![group], Vec::new(), profile));
    }
    let leading = &raw[..raw.len() - raw.trim_start().len()];
    let trailing = &raw[raw.trim_end().len()..];

    let split = split_on(body, profile.or_separators, profile.bracket_ranges);
    if split.pieces.len() > profile.max_clauses {
        return Err(too_many(raw, profile));
    }

    let mut groups = Vec::with_capacity(split.pieces.len());
    let mut clause_count = 0;
    for piece in &split.pieces {
        let group = parse_group(piece, profile)?;
        clause_count += group.clauses.len();
        if clause_count > profile.max_clauses {
            return Err(too_many(raw, profile));
        }
        groups.push(group);
    }

    debug!(
        "parsed {} requirement '{}' into {} group(s), {} clause(s)",
        profile.ecosystem,
        raw,
        groups.len(),
        clause_count
    );
    let or_separators = split.separators.iter().map(|s| s.to_string()).collect();
    Ok(RequirementSet::from_parts(
        raw,
        leading,
        trailing,
        groups,
        or_separators,
        profile,
    ))
}

fn too_many(raw: &str, profile: &GrammarProfile) -> RequirementError {
    RequirementError::TooManyClauses {
        requirement: raw.to_string(),
        limit: profile.max_clauses,
    }
}

/// Parses one AND-group
fn parse_group(piece: &str, profile: &'static GrammarProfile) -> Result<OrGroup, RequirementError> {
    if piece.is_empty() {
        return Ok(OrGroup::new(vec![RequirementClause::any("")], Vec::new()));
    }
    if profile.bracket_ranges && piece.starts_with(['[', '(']) {
        return parse_bracket_range(piece, profile);
    }
    if profile.hyphen_ranges {
        if let Some((lower, separator, upper)) = find_hyphen(piece) {
            let clauses = vec![
                RequirementClause::from_parts(Operator::GreaterEq, "", "", lower, "", profile)?,
                RequirementClause::from_parts(Operator::LessEq, "", "", upper, "", profile)?,
            ];
            return Ok(OrGroup::new(clauses, vec![separator.to_string()]));
        }
    }

    let split = if profile.whitespace_and {
        split_on_whitespace(piece, profile)
    } else {
        split_on(piece, profile.and_separators, false)
    };
    let clauses = split
        .pieces
        .iter()
        .map(|text| RequirementClause::parse(text, profile))
        .collect::<Result<Vec<_>, _>>()?;
    let separators = split.separators.iter().map(|s| s.to_string()).collect();
    Ok(OrGroup::new(clauses, separators))
}

/// Splits `text` on any of `separators` at bracket depth zero. Word
/// separators (`and`, `or`) need whitespace on both sides.
fn split_on<'a>(text: &'a str, separators: &[&str], bracket_aware: bool) -> Split<'a> {
    let mut pieces = Vec::new();
    let mut found = Vec::new();
    let mut depth: i32 = 0;
    let mut piece_start = 0;
    let mut resume_at = 0;

    for (index, c) in text.char_indices() {
        if index < resume_at {
            continue;
        }
        if bracket_aware {
            match c {
                '[' | '(' => depth += 1,
                ']' | ')' => depth -= 1,
                _ => {}
            }
        }
        if depth != 0 {
            continue;
        }
        let Some(separator) = match_separator(text, index, separators) else {
            continue;
        };
        let sep_start = piece_start + text[piece_start..index].trim_end().len();
        let after = index + separator.len();
        let sep_end = after + (text[after..].len() - text[after..].trim_start().len());
        pieces.push(&text[piece_start..sep_start]);
        found.push(&text[sep_start..sep_end]);
        piece_start = sep_end;
        resume_at = sep_end;
    }
    pieces.push(&text[piece_start..]);

    Split {
        pieces,
        separators: found,
    }
}

fn match_separator<'s>(text: &str, index: usize, separators: &[&'s str]) -> Option<&'s str> {
    let rest = &text[index..];
    separators
        .iter()
        .filter(|separator| rest.starts_with(**separator))
        .filter(|separator| {
            if !separator.chars().all(|c| c.is_ascii_alphabetic()) {
                return true;
            }
            let before = text[..index].chars().next_back();
            let after = rest[separator.len()..].chars().next();
            before.is_some_and(char::is_whitespace) && after.is_some_and(char::is_whitespace)
        })
        .max_by_key(|separator| separator.len())
        .copied()
}

/// Splits on whitespace runs; an operator standing alone is joined with the
/// version after it (`>= 1.2.3 < 2.0.0` has two clauses)
fn split_on_whitespace<'a>(text: &'a str, profile: &GrammarProfile) -> Split<'a> {
    let mut tokens: Vec<(usize, usize)> = Vec::new();
    let mut token_start: Option<usize> = None;
    for (index, c) in text.char_indices() {
        match (c.is_whitespace(), token_start) {
            (true, Some(start)) => {
                tokens.push((start, index));
                token_start = None;
            }
            (false, None) => token_start = Some(index),
            _ => {}
        }
    }
    if let Some(start) = token_start {
        tokens.push((start, text.len()));
    }

    let mut clauses: Vec<(usize, usize)> = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        let (start, mut end) = tokens[index];
        let token = &text[start..end];
        let operator_only = profile
            .match_operator(token)
            .is_some_and(|(spelling, _)| spelling.len() == token.len());
        if operator_only && index + 1 < tokens.len() {
            index += 1;
            end = tokens[index].1;
        }
        clauses.push((start, end));
        index += 1;
    }

    let pieces = clauses.iter().map(|(start, end)| &text[*start..*end]).collect();
    let separators = clauses
        .windows(2)
        .map(|pair| &text[pair[0].1..pair[1].0])
        .collect();
    Split { pieces, separators }
}

/// Finds `LOWER - UPPER`, returning the separator with its whitespace
fn find_hyphen(text: &str) -> Option<(&str, &str, &str)> {
    let bytes = text.as_bytes();
    let dash = (1..bytes.len().saturating_sub(1)).find(|&i| {
        bytes[i] == b'-' && bytes[i - 1].is_ascii_whitespace() && bytes[i + 1].is_ascii_whitespace()
    })?;
    let lower = text[..dash].trim_end();
    let upper = text[dash + 1..].trim_start();
    if lower.is_empty() || upper.is_empty() {
        return None;
    }
    let separator = &text[lower.len()..text.len() - upper.len()];
    Some((lower, separator, upper))
}

/// Parses Maven interval notation: `[1.0]`, `[1.0,2.0)`, `(,2.0]`, `[1.5,)`
fn parse_bracket_range(
    text: &str,
    profile: &'static GrammarProfile,
) -> Result<OrGroup, RequirementError> {
    let open = &text[..1];
    let close = match text.chars().next_back() {
        Some(c @ (']' | ')')) if text.len() > 1 => c,
        _ => return Err(RequirementError::unbalanced(text)),
    };
    let inner = &text[1..text.len() - 1];
    if inner.contains(['[', '(', ']', ')']) {
        return Err(RequirementError::unbalanced(text));
    }
    let close_text = &text[text.len() - 1..];

    let parts: Vec<&str> = inner.split(',').collect();
    match parts.as_slice() {
        [single] => {
            let version = single.trim();
            if open != "[" || close != ']' || version.is_empty() {
                return Err(RequirementError::unbalanced(text));
            }
            let (spacing, tail) = surrounding_whitespace(single);
            let suffix = format!("{}{}", tail, close_text);
            let clause =
                RequirementClause::from_parts(Operator::Exact, open, spacing, version, &suffix, profile)?;
            Ok(OrGroup::new(vec![clause], Vec::new()))
        }
        [lower, upper] => {
            let (lower_spacing, lower_tail) = surrounding_whitespace(lower);
            let (upper_spacing, upper_tail) = surrounding_whitespace(upper);
            let lower_version = lower.trim();
            let upper_version = upper.trim();

            let lower_clause = if lower_version.is_empty() {
                RequirementClause::placeholder(open, "", "")
            } else {
                let operator = if open == "[" {
                    Operator::GreaterEq
                } else {
                    Operator::Greater
                };
                RequirementClause::from_parts(operator, open, lower_spacing, lower_version, "", profile)?
            };
            let upper_suffix = format!("{}{}", upper_tail, close_text);
            let upper_clause = if upper_version.is_empty() {
                RequirementClause::placeholder("", "", &upper_suffix)
            } else {
                let operator = if close == ']' {
                    Operator::LessEq
                } else {
                    Operator::Less
                };
                RequirementClause::from_parts(operator, "", "", upper_version, &upper_suffix, profile)?
            };

            // whitespace around an empty side belongs to the separator
            let separator = if lower_version.is_empty() {
                format!("{},{}", lower, upper_spacing)
            } else {
                format!("{},{}", lower_tail, upper_spacing)
            };
            Ok(OrGroup::new(vec![lower_clause, upper_clause], vec![separator]))
        }
        _ => Err(RequirementError::unbalanced(text)),
    }
}

/// Leading and trailing whitespace of `text`
fn surrounding_whitespace(text: &str) -> (&str, &str) {
    let start = text.len() - text.trim_start().len();
    let end = text.trim_end().len().max(start);
    (&text[..start], &text[end..])
}
