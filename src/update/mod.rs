//! Requirement rewriting toward a target version
//!
//! This module provides:
//! - The rewriter that decides how a requirement must change to admit a target
//! - Literal helpers that keep a requirement's original precision
//! - Batch updating of requirement records

mod precision;
mod records;

pub use precision::{at_same_precision, update_greatest, WidenedBounds};
pub use records::{RecordUpdate, RequirementsUpdater};

use crate::domain::{Ecosystem, RewriteResult, UpdateStrategy};
use crate::error::RequirementError;
use crate::grammar::{get_profile, GrammarProfile};
use crate::requirement::{Operator, OrGroup, RequirementClause, RequirementSet};
use crate::version::{join_segments, Version};
use log::debug;

/// Outcome of rewriting a single OR-group
#[derive(Debug, Clone, PartialEq, Eq)]
enum GroupOutcome {
    Updated(String),
    Unchanged,
    Unfixable,
}

/// A clause after rewriting, with the version used to reduce duplicate bounds
struct RewrittenClause<'a> {
    /// Position of the source clause in its group
    index: usize,
    clause: &'a RequirementClause,
    text: String,
    bound: Option<Version>,
}

/// Rewrites requirement strings so they admit a target version
#[derive(Debug, Clone, Copy)]
pub struct RequirementRewriter {
    /// Grammar for the requirement strings
    profile: &'static GrammarProfile,
    /// How aggressively to rewrite
    strategy: UpdateStrategy,
}

impl RequirementRewriter {
    /// Create a rewriter for a grammar and strategy
    pub fn new(profile: &'static GrammarProfile, strategy: UpdateStrategy) -> Self {
        Self { profile, strategy }
    }

    /// Create a rewriter using the built-in grammar for `ecosystem`
    pub fn for_ecosystem(ecosystem: Ecosystem, strategy: UpdateStrategy) -> Self {
        Self::new(get_profile(ecosystem), strategy)
    }

    /// The grammar in use
    pub fn profile(&self) -> &'static GrammarProfile {
        self.profile
    }

    /// The strategy in use
    pub fn strategy(&self) -> UpdateStrategy {
        self.strategy
    }

    /// Parse `requirement` and rewrite it to admit `target`
    pub fn rewrite_str(
        &self,
        requirement: &str,
        target: &Version,
    ) -> Result<RewriteResult, RequirementError> {
        let set = RequirementSet::parse(requirement, self.profile)?;
        Ok(self.rewrite(&set, target))
    }

    /// Rewrite `set` so it admits `target`
    pub fn rewrite(&self, set: &RequirementSet, target: &Version) -> RewriteResult {
        if self.strategy == UpdateStrategy::LockfileOnly {
            return RewriteResult::Unchanged;
        }
        if set.is_any() {
            debug!("'{}' admits any version", set.original_text());
            return RewriteResult::Unchanged;
        }

        let satisfied = set.is_satisfied_by(target);
        if satisfied && self.strategy.keeps_satisfied() {
            debug!("'{}' already admits {}", set.original_text(), target);
            return RewriteResult::Unchanged;
        }

        if self.strategy == UpdateStrategy::WidenRanges && set.groups().len() > 1 {
            return self.append_group(set, target);
        }

        let outcomes: Vec<GroupOutcome> = set
            .groups()
            .iter()
            .map(|group| self.rewrite_group(group, target, self.strategy))
            .collect();

        if !outcomes.iter().any(|o| matches!(o, GroupOutcome::Updated(_))) {
            if !satisfied && outcomes.contains(&GroupOutcome::Unfixable) {
                return RewriteResult::Unfixable;
            }
            return RewriteResult::Unchanged;
        }

        // Identical groups collapse into the first; the later copy loses its
        // preceding separator.
        let mut texts: Vec<String> = Vec::with_capacity(outcomes.len());
        let mut separators: Vec<String> = Vec::new();
        for (index, (group, outcome)) in set.groups().iter().zip(outcomes).enumerate() {
            let text = match outcome {
                GroupOutcome::Updated(text) => text,
                _ => group.to_string(),
            };
            if texts.contains(&text) {
                continue;
            }
            if !texts.is_empty() {
                separators.push(set.or_separators()[index - 1].clone());
            }
            texts.push(text);
        }

        finish(set, set.render(&texts, &separators))
    }

    /// Widening a multi-group set keeps every group and appends a bumped
    /// copy of the last one
    fn append_group(&self, set: &RequirementSet, target: &Version) -> RewriteResult {
        let Some(last) = set.groups().last() else {
            return RewriteResult::Unchanged;
        };
        match self.rewrite_group(last, target, UpdateStrategy::BumpVersions) {
            GroupOutcome::Updated(text) => {
                let mut texts: Vec<String> = set.groups().iter().map(OrGroup::to_string).collect();
                let mut separators = set.or_separators().to_vec();
                let separator = separators.last().cloned().unwrap_or_default();
                separators.push(separator);
                texts.push(text);
                finish(set, set.render(&texts, &separators))
            }
            GroupOutcome::Unchanged => RewriteResult::Unchanged,
            GroupOutcome::Unfixable => RewriteResult::Unfixable,
        }
    }

    fn rewrite_group(
        &self,
        group: &OrGroup,
        target: &Version,
        strategy: UpdateStrategy,
    ) -> GroupOutcome {
        let satisfied = group.admits(target, self.profile);
        if group.is_any() || (satisfied && strategy.keeps_satisfied()) {
            return GroupOutcome::Unchanged;
        }

        if let Some(clause) = group.clauses.iter().find(|c| c.operator == Operator::Exact) {
            debug!("moving pinned '{}' to {}", clause, target);
            return compare_text(group, self.bumped_text(clause, target));
        }

        if let Some(clause) = group
            .clauses
            .iter()
            .find(|c| c.operator.is_compatible_range())
        {
            if strategy == UpdateStrategy::WidenRanges && self.profile.widen_compatible_to_range {
                if let Some(text) = self.widened_text(clause, target) {
                    debug!("widening '{}' to '{}'", clause, text);
                    return compare_text(group, text);
                }
            }
            debug!("moving '{}' to {}", clause, target);
            return compare_text(group, self.bumped_text(clause, target));
        }

        if satisfied && strategy == UpdateStrategy::BumpVersions {
            return GroupOutcome::Unchanged;
        }
        self.rewrite_range(group, target)
    }

    /// Rewrites a group of comparison bounds: unsatisfied upper bounds are
    /// raised, an unsatisfied lower bound makes the group unfixable
    fn rewrite_range(&self, group: &OrGroup, target: &Version) -> GroupOutcome {
        let mut kept: Vec<RewrittenClause<'_>> = Vec::new();
        for (index, clause) in group.clauses.iter().enumerate() {
            let operator = clause.operator;
            if operator == Operator::NotEqual {
                debug!("dropping exclusion '{}'", clause);
                continue;
            }
            if operator == Operator::Any || clause.admits(target) {
                kept.push(RewrittenClause {
                    index,
                    clause,
                    text: clause.to_string(),
                    bound: clause.version().cloned(),
                });
                continue;
            }
            if operator.is_lower_bound() {
                debug!("lower bound '{}' excludes {}", clause, target);
                return GroupOutcome::Unfixable;
            }
            if operator.is_upper_bound() {
                let (literal, segments) = update_greatest(&clause.version_text, target);
                kept.push(RewrittenClause {
                    index,
                    clause,
                    text: clause_text(clause, &literal),
                    bound: Some(target.sibling(&segments)),
                });
                continue;
            }
            return GroupOutcome::Unfixable;
        }

        reduce_bounds(&mut kept);
        if kept.is_empty() {
            return GroupOutcome::Updated(self.profile.any_version_text.to_string());
        }

        let mut text = String::new();
        for (position, rewritten) in kept.iter().enumerate() {
            if position > 0 {
                text.push_str(&group.separators[rewritten.index - 1]);
            }
            text.push_str(&rewritten.text);
        }
        compare_text(group, text)
    }

    fn bumped_text(&self, clause: &RequirementClause, target: &Version) -> String {
        clause_text(clause, &at_same_precision(&clause.version_text, target))
    }

    /// `>= lower<and>< upper` for a compatible clause, or `None` when the
    /// grammar cannot spell the bounds
    fn widened_text(&self, clause: &RequirementClause, target: &Version) -> Option<String> {
        let floor = clause.version()?;
        let index = clause.operator.bump_index(clause.concrete_segments());
        let bounds = WidenedBounds::new(
            floor.release(),
            index,
            target,
            self.profile.min_bound_segments,
        );
        let less = self.profile.operator_text(Operator::Less)?;
        let upper = format!(
            "{}{}{}{}",
            less,
            clause.spacing,
            target.epoch_prefix(),
            join_segments(&bounds.upper)
        );
        match bounds.lower {
            Some(lower) => {
                let greater_eq = self.profile.operator_text(Operator::GreaterEq)?;
                Some(format!(
                    "{}{}{}{}{}{}",
                    greater_eq,
                    clause.spacing,
                    floor.epoch_prefix(),
                    join_segments(&lower),
                    self.profile.canonical_and,
                    upper
                ))
            }
            None => Some(upper),
        }
    }
}

/// Keep only the tightest upper bound and the tightest lower bound
fn reduce_bounds(kept: &mut Vec<RewrittenClause<'_>>) {
    let tightest = |upper: bool, kept: &[RewrittenClause<'_>]| -> Option<usize> {
        kept.iter()
            .enumerate()
            .filter(|(_, c)| {
                let op = c.clause.operator;
                if upper {
                    op.is_upper_bound()
                } else {
                    op.is_lower_bound()
                }
            })
            .filter_map(|(position, c)| c.bound.as_ref().map(|bound| (position, bound)))
            .reduce(|best, next| {
                let better = if upper { next.1 < best.1 } else { next.1 > best.1 };
                if better {
                    next
                } else {
                    best
                }
            })
            .map(|(position, _)| position)
    };

    let upper = tightest(true, kept);
    let lower = tightest(false, kept);
    let mut position = 0;
    kept.retain(|c| {
        let current = position;
        position += 1;
        let op = c.clause.operator;
        if op.is_upper_bound() && c.bound.is_some() {
            return Some(current) == upper;
        }
        if op.is_lower_bound() && c.bound.is_some() {
            return Some(current) == lower;
        }
        true
    });
}

fn clause_text(clause: &RequirementClause, literal: &str) -> String {
    format!(
        "{}{}{}{}",
        clause.operator_text, clause.spacing, literal, clause.suffix
    )
}

fn compare_text(group: &OrGroup, text: String) -> GroupOutcome {
    if text == group.to_string() {
        GroupOutcome::Unchanged
    } else {
        GroupOutcome::Updated(text)
    }
}

fn finish(set: &RequirementSet, text: String) -> RewriteResult {
    if text == set.original_text() {
        RewriteResult::Unchanged
    } else {
        RewriteResult::Updated(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(ecosystem: Ecosystem, strategy: UpdateStrategy, req: &str, target: &str) -> RewriteResult {
        let rewriter = RequirementRewriter::for_ecosystem(ecosystem, strategy);
        let target = Version::parse(target, rewriter.profile()).unwrap();
        rewriter.rewrite_str(req, &target).unwrap()
    }

    fn bump(ecosystem: Ecosystem, req: &str, target: &str) -> RewriteResult {
        rewrite(ecosystem, UpdateStrategy::BumpVersions, req, target)
    }

    fn updated(text: &str) -> RewriteResult {
        RewriteResult::updated(text)
    }

    #[test]
    fn test_exact_keeps_precision() {
        assert_eq!(bump(Ecosystem::Npm, "1.2.3", "1.5.0"), updated("1.5.0"));
        assert_eq!(bump(Ecosystem::Cargo, "=1.2.3", "1.5.0"), updated("=1.5.0"));
        assert_eq!(bump(Ecosystem::Npm, "0.1", "1.5.0"), updated("1.5"));
        assert_eq!(bump(Ecosystem::Npm, "1", "4.0.0"), updated("4"));
        assert_eq!(bump(Ecosystem::Npm, "1.1.0.1", "1.5.0"), updated("1.5.0"));
    }

    #[test]
    fn test_v_prefix_survives() {
        assert_eq!(bump(Ecosystem::Npm, "v1.2.3", "1.5.0"), updated("v1.5.0"));
    }

    #[test]
    fn test_caret_bump() {
        assert_eq!(bump(Ecosystem::Cargo, "^1.2.3", "1.5.0"), updated("^1.5.0"));
        assert_eq!(bump(Ecosystem::Cargo, "^1.2.3-rc1", "1.5.0"), updated("^1.5.0"));
        assert_eq!(bump(Ecosystem::Cargo, "1.2.3", "1.5.0"), updated("1.5.0"));
    }

    #[test]
    fn test_prerelease_target() {
        assert_eq!(
            bump(Ecosystem::Cargo, "1.2.3-beta", "1.2.3-beta.2"),
            updated("1.2.3-beta.2")
        );
    }

    #[test]
    fn test_any_is_unchanged() {
        assert_eq!(bump(Ecosystem::Cargo, "*", "1.5.0"), RewriteResult::Unchanged);
        assert_eq!(bump(Ecosystem::Npm, "", "1.5.0"), RewriteResult::Unchanged);
    }

    #[test]
    fn test_satisfied_exact_is_unchanged() {
        assert_eq!(bump(Ecosystem::Cargo, "=1.5.0", "1.5.0"), RewriteResult::Unchanged);
    }

    #[test]
    fn test_upper_bound_raised() {
        assert_eq!(bump(Ecosystem::Cargo, "< 1.2.0", "1.5.0"), updated("< 1.6.0"));
        assert_eq!(
            bump(Ecosystem::Cargo, "> 1.0.0, < 1.2.0", "1.5.0"),
            updated("> 1.0.0, < 1.6.0")
        );
        assert_eq!(
            bump(Ecosystem::Cargo, ">=1.2.0, <1.4.0-dev", "1.5.0"),
            updated(">=1.2.0, <1.6.0")
        );
    }

    #[test]
    fn test_lower_bound_is_unfixable() {
        assert_eq!(bump(Ecosystem::Cargo, "> 99.0.0", "1.5.0"), RewriteResult::Unfixable);
    }

    #[test]
    fn test_satisfied_range_is_unchanged() {
        assert_eq!(
            bump(Ecosystem::Cargo, ">= 1.0, < 2.0", "1.5.0"),
            RewriteResult::Unchanged
        );
    }

    #[test]
    fn test_duplicate_upper_bounds_reduced() {
        assert_eq!(
            bump(Ecosystem::Cargo, ">= 1.0, < 1.2, < 1.3", "1.5.0"),
            updated(">= 1.0, < 1.6")
        );
    }

    #[test]
    fn test_not_equal_dropped() {
        assert_eq!(bump(Ecosystem::Hex, "!= 1.5.0", "1.5.0"), updated(">= 0.0.0"));
        assert_eq!(
            bump(Ecosystem::Python, ">=1.0,!=1.5.0", "1.5.0"),
            updated(">=1.0")
        );
    }

    #[test]
    fn test_wildcards_kept() {
        assert_eq!(bump(Ecosystem::Cargo, "^0.*.*", "1.5.0"), updated("^1.*.*"));
        assert_eq!(bump(Ecosystem::Npm, "0.x.x.rc1", "1.5.0"), updated("1.x.x"));
        assert_eq!(bump(Ecosystem::Npm, "^0.0.x", "0.2.0"), updated("^0.2.x"));
    }

    #[test]
    fn test_or_groups_collapse() {
        assert_eq!(
            bump(Ecosystem::Npm, "^0.5.1 || ^1.2.3", "1.5.0"),
            updated("^1.5.0")
        );
    }

    #[test]
    fn test_bump_if_necessary() {
        let strategy = UpdateStrategy::BumpVersionsIfNecessary;
        assert_eq!(
            rewrite(Ecosystem::Npm, strategy, "^0.5.1 || ^1.2.3", "1.5.0"),
            RewriteResult::Unchanged
        );
        assert_eq!(
            rewrite(Ecosystem::Npm, strategy, "^0.5.1 || ^1.2.3", "2.1.0"),
            updated("^2.1.0")
        );
        assert_eq!(
            rewrite(Ecosystem::Npm, strategy, "~2.4.x", "2.5.3"),
            updated("~2.5.x")
        );
        assert_eq!(
            rewrite(Ecosystem::Npm, strategy, "~>2.4.1", "2.5.3"),
            updated("~>2.5.3")
        );
    }

    #[test]
    fn test_widen_hyphen_range() {
        assert_eq!(
            rewrite(Ecosystem::Npm, UpdateStrategy::WidenRanges, "1.2.3 - 1.4.0", "1.5.0"),
            updated("1.2.3 - 1.6.0")
        );
    }

    #[test]
    fn test_widen_appends_group() {
        assert_eq!(
            rewrite(Ecosystem::Npm, UpdateStrategy::WidenRanges, "^0.5.1 || ^1.2.3", "2.1.0"),
            updated("^0.5.1 || ^1.2.3 || ^2.1.0")
        );
    }

    #[test]
    fn test_widen_compatible_to_range() {
        assert_eq!(
            rewrite(Ecosystem::Hex, UpdateStrategy::WidenRanges, "~> 2.4.1", "2.5.3"),
            updated(">= 2.4.1 and < 2.6.0")
        );
        assert_eq!(
            rewrite(Ecosystem::Python, UpdateStrategy::WidenRanges, "~=1.4.2", "1.6.0"),
            updated(">=1.4.2,<1.7.0")
        );
    }

    #[test]
    fn test_widen_without_range_support_bumps() {
        assert_eq!(
            rewrite(Ecosystem::Cargo, UpdateStrategy::WidenRanges, "^1.2.3", "2.1.0"),
            updated("^2.1.0")
        );
    }

    #[test]
    fn test_hex_twiddle_bump() {
        assert_eq!(bump(Ecosystem::Hex, "~> 2.4.1", "2.5.3"), updated("~> 2.5.3"));
        assert_eq!(bump(Ecosystem::Hex, "~> 2.4", "3.0.1"), updated("~> 3.0"));
    }

    #[test]
    fn test_maven_ranges() {
        assert_eq!(bump(Ecosystem::Maven, "[1.0,2.0)", "2.5"), updated("[1.0,3.0)"));
        assert_eq!(bump(Ecosystem::Maven, "[1.5]", "2.5"), updated("[2.5]"));
        assert_eq!(bump(Ecosystem::Maven, "1.5", "2.5"), updated("2.5"));
        assert_eq!(bump(Ecosystem::Maven, "[3.0,4.0)", "2.5"), RewriteResult::Unfixable);
    }

    #[test]
    fn test_lockfile_only_never_rewrites() {
        assert_eq!(
            rewrite(Ecosystem::Cargo, UpdateStrategy::LockfileOnly, "=1.0.0", "2.0.0"),
            RewriteResult::Unchanged
        );
    }

    #[test]
    fn test_python_exact() {
        assert_eq!(bump(Ecosystem::Python, "==1.4.0", "1.6.0"), updated("==1.6.0"));
        assert_eq!(bump(Ecosystem::Python, "==1.4.*", "1.6.0"), updated("==1.6.*"));
    }

    #[test]
    fn test_result_admits_target() {
        let rewriter = RequirementRewriter::for_ecosystem(Ecosystem::Cargo, UpdateStrategy::BumpVersions);
        let target = Version::parse("1.5.0", rewriter.profile()).unwrap();
        for req in ["^1.2.3", "~1.2", "< 1.2.0", ">= 1.0, < 1.2", "=1.0.0"] {
            let result = rewriter.rewrite_str(req, &target).unwrap();
            let text = result.text_or(req).unwrap();
            let set = RequirementSet::parse(text, rewriter.profile()).unwrap();
            assert!(set.is_satisfied_by(&target), "{} -> {}", req, text);
        }
    }

    #[test]
    fn test_parse_error_propagates() {
        let rewriter = RequirementRewriter::for_ecosystem(Ecosystem::Hex, UpdateStrategy::BumpVersions);
        let target = Version::parse("1.5.0", rewriter.profile()).unwrap();
        assert!(rewriter.rewrite_str("^1.2.3", &target).is_err());
    }
}
