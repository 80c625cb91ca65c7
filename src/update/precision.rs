//! Version literal rewriting helpers
//!
//! This module provides:
//! - Rewriting a literal to a target while keeping its segment count
//! - Raising an upper bound just past a target
//! - Building explicit `>= lower, < upper` bounds for compatible operators

use crate::requirement::{bump_at, split_literal};
use crate::version::{join_segments, Version};

/// Rewrites `literal` to `target`, keeping the literal's `v` prefix, segment
/// count and wildcard positions.
///
/// `1.2` with target `1.5.0` gives `1.5`, `1.2.x` gives `1.5.x`. The target's
/// pre-release suffix is carried only when the literal is at least as precise
/// as the target's release, so `1.2.3-beta` with target `1.2.3-beta.2` gives
/// `1.2.3-beta.2`. Build metadata is never copied.
pub fn at_same_precision(literal: &str, target: &Version) -> String {
    let parts = split_literal(literal);
    let release = target.release();
    if parts.segments.is_empty() || release.is_empty() {
        return format!("{}{}", parts.prefix, plain_text(target));
    }

    let mut segments = Vec::with_capacity(parts.segments.len());
    let mut wildcard = false;
    for (index, segment) in parts.segments.iter().enumerate() {
        if matches!(*segment, "*" | "x" | "X") {
            segments.push((*segment).to_string());
            wildcard = true;
            continue;
        }
        match release.get(index) {
            Some(value) => segments.push(value.to_string()),
            None => break,
        }
    }

    let mut text = format!(
        "{}{}{}",
        parts.prefix,
        epoch_text(parts.epoch, target),
        segments.join(".")
    );
    if !wildcard && parts.segments.len() >= release.len() {
        text.push_str(target.suffix());
    }
    text
}

/// Raises an upper-bound literal so the bound lies just above `target`.
///
/// The bump lands on the literal's last non-zero position, capped at the
/// target's precision; later positions become zero. `< 1.2.0` with target
/// `1.5.0` gives `1.6.0`, `< 2` gives `3`. Returns the new literal and its
/// release segments.
pub fn update_greatest(literal: &str, target: &Version) -> (String, Vec<u64>) {
    let parts = split_literal(literal);
    let release = target.release();
    let current: Vec<u64> = parts
        .segments
        .iter()
        .map(|segment| segment.parse::<u64>().unwrap_or(0))
        .collect();

    let segments = if current.is_empty() || release.is_empty() {
        bump_at(release, 0)
    } else {
        let last_nonzero = current.iter().rposition(|value| *value != 0).unwrap_or(0);
        let index = last_nonzero.min(release.len() - 1);
        (0..current.len().min(release.len()))
            .map(|position| match position.cmp(&index) {
                std::cmp::Ordering::Less => release[position],
                std::cmp::Ordering::Equal => release[position].saturating_add(1),
                std::cmp::Ordering::Greater => 0,
            })
            .collect()
    };

    let text = format!(
        "{}{}{}",
        parts.prefix,
        epoch_text(parts.epoch, target),
        join_segments(&segments)
    );
    (text, segments)
}

/// Explicit bounds replacing a compatible operator when widening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidenedBounds {
    /// Inclusive lower bound; `None` when the original floor was all zeros
    pub lower: Option<Vec<u64>>,
    /// Exclusive upper bound
    pub upper: Vec<u64>,
}

impl WidenedBounds {
    /// Bounds for a clause whose floor is `floor`, bumped at `index`, that
    /// must admit `target`.
    ///
    /// `~> 2.4.1` (index 1) with target `2.5.3` gives `>= 2.4.1` and
    /// `< 2.6.0`. Both sides are padded to the same length, and to at least
    /// `min_segments`.
    pub fn new(floor: &[u64], index: usize, target: &Version, min_segments: usize) -> Self {
        let mut upper = bump_at(target.release(), index);
        let mut lower = floor.to_vec();
        while lower.last() == Some(&0) {
            lower.pop();
        }

        let width = lower.len().max(upper.len()).max(min_segments);
        upper.resize(width, 0);
        if lower.is_empty() {
            return Self { lower: None, upper };
        }
        lower.resize(width, 0);
        Self {
            lower: Some(lower),
            upper,
        }
    }
}

/// The target's epoch, written whenever either side names one
fn epoch_text(literal_epoch: &str, target: &Version) -> String {
    if literal_epoch.is_empty() {
        target.epoch_prefix()
    } else {
        format!("{}!", target.epoch())
    }
}

/// The target as it would be written in a requirement: release plus
/// pre-release suffix, without build metadata or a `v` prefix
fn plain_text(target: &Version) -> String {
    if target.release().is_empty() {
        let raw = target.raw().trim();
        return raw.split('+').next().unwrap_or(raw).to_string();
    }
    format!(
        "{}{}{}",
        target.epoch_prefix(),
        join_segments(target.release()),
        target.suffix()
    )
}
