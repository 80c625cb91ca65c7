//! Recursive token buckets used for version ordering
//!
//! A version string is split on `.`, on the profile's bucket separators and
//! on digit/letter transitions. Dots keep tokens in the current bucket;
//! separators and transitions open a nested bucket that is only consulted
//! once everything before it compares equal:
//!
//! ```text
//! 1.0-rc1   =>  [1, [rc, [1]]]
//! 1.2.3     =>  [1, 2, 3]
//! ```

use std::cmp::Ordering;

use crate::grammar::GrammarProfile;

/// A single comparable token
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Atom {
    /// Digit run without leading zeros; compared by length, then text
    Number(String),
    /// Qualifier word with its profile rank
    Word { rank: i32, word: String },
}

impl Atom {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Atom::Number("0".to_string())
        } else {
            Atom::Number(trimmed.to_string())
        }
    }

    /// Null atoms are equivalent to a missing position
    fn is_null(&self) -> bool {
        match self {
            Atom::Number(digits) => digits == "0",
            Atom::Word { rank, word } => *rank == 0 && word.is_empty(),
        }
    }

    fn is_below_release(&self) -> bool {
        matches!(self, Atom::Word { rank, .. } if *rank < 0)
    }
}

/// One level of the bucket tree; the nested bucket always sits last
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Bucket {
    pub items: Vec<Atom>,
    pub nested: Option<Box<Bucket>>,
}

#[derive(Clone, Copy)]
enum Slot<'a> {
    Atom(&'a Atom),
    Nested(&'a Bucket),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Start,
    Dot,
    Separator,
    Transition,
}

struct Tokenizer<'p> {
    profile: &'p GrammarProfile,
    current: Bucket,
    parents: Vec<Bucket>,
}

impl<'p> Tokenizer<'p> {
    fn open_nested(&mut self) {
        self.parents.push(std::mem::take(&mut self.current));
    }

    fn push_token(&mut self, token: &str, boundary: Boundary, followed_by_digit: bool) {
        if token.is_empty() {
            self.current.items.push(Atom::number("0"));
        } else if token.as_bytes()[0].is_ascii_digit() {
            self.current.items.push(Atom::number(token));
        } else {
            if self.profile.dot_qualifier_opens_bucket
                && boundary == Boundary::Dot
                && !self.current.items.is_empty()
            {
                self.open_nested();
            }
            let (rank, word) = self.profile.qualifier_key(token, followed_by_digit);
            self.current.items.push(Atom::Word { rank, word });
        }
    }

    fn finish(self) -> Bucket {
        let mut tree = self.current;
        let mut parents = self.parents;
        while let Some(mut parent) = parents.pop() {
            parent.nested = Some(Box::new(tree));
            tree = parent;
        }
        tree
    }
}

impl Bucket {
    /// Builds a flat bucket of numbers
    pub(crate) fn from_numbers(segments: &[u64]) -> Self {
        Bucket {
            items: segments.iter().map(|n| Atom::number(&n.to_string())).collect(),
            nested: None,
        }
    }

    /// Splits lowercase `text` into a bucket tree (not yet normalized).
    ///
    /// Callers guarantee `text` only holds ASCII alphanumerics, `.` and the
    /// profile's bucket separators.
    pub(crate) fn tokenize(text: &str, profile: &GrammarProfile) -> Self {
        let mut tokenizer = Tokenizer {
            profile,
            current: Bucket::default(),
            parents: Vec::new(),
        };
        let bytes = text.as_bytes();
        let mut start = 0;
        let mut boundary = Boundary::Start;
        let mut in_digits = false;

        for (i, &b) in bytes.iter().enumerate() {
            let c = b as char;
            if c == '.' || profile.is_bucket_separator(c) {
                tokenizer.push_token(&text[start..i], boundary, false);
                start = i + 1;
                if c == '.' {
                    boundary = Boundary::Dot;
                } else {
                    boundary = Boundary::Separator;
                    tokenizer.open_nested();
                }
            } else if c.is_ascii_digit() {
                if !in_digits && i > start {
                    tokenizer.push_token(&text[start..i], boundary, true);
                    tokenizer.open_nested();
                    start = i;
                    boundary = Boundary::Transition;
                }
                in_digits = true;
            } else {
                if in_digits && i > start {
                    tokenizer.push_token(&text[start..i], boundary, false);
                    tokenizer.open_nested();
                    start = i;
                    boundary = Boundary::Transition;
                }
                in_digits = false;
            }
        }
        if start < bytes.len() {
            tokenizer.push_token(&text[start..], boundary, false);
        }
        tokenizer.finish()
    }

    /// Drops null atoms before the nested bucket, empty nested buckets and
    /// levels that only wrap another level. Under SemVer rules an all-zero
    /// release keeps a single `0` so its pre-release stays nested.
    pub(crate) fn normalize(&mut self, profile: &GrammarProfile, depth: usize) {
        if let Some(nested) = self.nested.as_mut() {
            nested.normalize(profile, depth + 1);
            if nested.is_empty() {
                self.nested = None;
            }
        }
        if profile.semver_prerelease && depth > 0 {
            return;
        }
        while self.items.last().is_some_and(Atom::is_null) {
            self.items.pop();
        }
        if self.items.is_empty() {
            if profile.semver_prerelease {
                if self.nested.is_some() {
                    self.items.push(Atom::number("0"));
                }
            } else if let Some(nested) = self.nested.take() {
                *self = *nested;
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty() && self.nested.is_none()
    }

    /// True if any word in the tree ranks below a plain release
    pub(crate) fn has_word_below_release(&self) -> bool {
        self.items.iter().any(Atom::is_below_release)
            || self
                .nested
                .as_ref()
                .is_some_and(|nested| nested.has_word_below_release())
    }

    fn len(&self) -> usize {
        self.items.len() + usize::from(self.nested.is_some())
    }

    fn slot(&self, index: usize) -> Option<Slot<'_>> {
        if let Some(atom) = self.items.get(index) {
            Some(Slot::Atom(atom))
        } else if index == self.items.len() {
            self.nested.as_deref().map(Slot::Nested)
        } else {
            None
        }
    }

    /// Position-by-position comparison; `depth` is 0 for the outermost bucket
    pub(crate) fn compare(&self, other: &Bucket, profile: &GrammarProfile, depth: usize) -> Ordering {
        let positions = self.len().max(other.len());
        for index in 0..positions {
            let ordering = match (self.slot(index), other.slot(index)) {
                (Some(a), Some(b)) => compare_slots(a, b, profile, depth),
                (Some(a), None) => compare_to_missing(a, profile, depth),
                (None, Some(b)) => compare_to_missing(b, profile, depth).reverse(),
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn word_key(rank: i32, word: &str) -> (i32, &str) {
    (rank, word)
}

fn compare_slots(a: Slot<'_>, b: Slot<'_>, profile: &GrammarProfile, depth: usize) -> Ordering {
    let words_first = profile.semver_prerelease && depth > 0;
    match (a, b) {
        (Slot::Atom(Atom::Number(x)), Slot::Atom(Atom::Number(y))) => {
            x.len().cmp(&y.len()).then_with(|| x.cmp(y))
        }
        (
            Slot::Atom(Atom::Word { rank: r1, word: w1 }),
            Slot::Atom(Atom::Word { rank: r2, word: w2 }),
        ) => word_key(*r1, w1).cmp(&word_key(*r2, w2)),
        (Slot::Atom(Atom::Number(_)), Slot::Atom(Atom::Word { .. })) => {
            if words_first {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (Slot::Atom(Atom::Word { .. }), Slot::Atom(Atom::Number(_))) => {
            if words_first {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Slot::Nested(x), Slot::Nested(y)) => x.compare(y, profile, depth + 1),
        (Slot::Atom(Atom::Number(_)), Slot::Nested(_)) => Ordering::Greater,
        (Slot::Nested(_), Slot::Atom(Atom::Number(_))) => Ordering::Less,
        (Slot::Atom(Atom::Word { .. }), Slot::Nested(_)) => Ordering::Less,
        (Slot::Nested(_), Slot::Atom(Atom::Word { .. })) => Ordering::Greater,
    }
}

/// Compares a present slot against a position the other side lacks
fn compare_to_missing(slot: Slot<'_>, profile: &GrammarProfile, depth: usize) -> Ordering {
    if profile.semver_prerelease && depth > 0 {
        // more pre-release identifiers sort later
        return Ordering::Greater;
    }
    match slot {
        Slot::Atom(Atom::Number(digits)) => {
            if digits == "0" {
                Ordering::Equal
            } else {
                Ordering::Greater
            }
        }
        Slot::Atom(Atom::Word { rank, word }) => word_key(*rank, word).cmp(&word_key(0, "")),
        Slot::Nested(nested) => {
            if profile.semver_prerelease {
                Ordering::Less
            } else {
                nested.compare(&Bucket::default(), profile, depth + 1)
            }
        }
    }
}
