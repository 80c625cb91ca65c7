//! Ecosystem-aware version values
//!
//! A [`Version`] is parsed once against a [`GrammarProfile`] and is
//! immutable afterwards. Ordering follows the profile:
//! - numeric segments compare by magnitude, missing segments count as zero
//! - qualifiers rank by the profile's table, unknown words by its fallback rank
//! - `-` (and other bucket separators) start a nested bucket compared recursively
//! - `+build` metadata is ignored or used as a final tiebreak
//! - a PEP 440 `N!` epoch, where the profile allows one, outranks everything
//!   but the ecosystem
//!
//! Versions from different ecosystems never compare equal; they are ordered
//! by ecosystem first.

mod bucket;

use log::trace;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use crate::domain::Ecosystem;
use crate::error::VersionError;
use crate::grammar::{BuildMetadata, GrammarProfile};
use bucket::Bucket;

/// `2018-10-03` style date versions
static DATE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-?\d{2}-?\d{2}$").unwrap());

/// A parsed version under one ecosystem grammar
#[derive(Clone)]
pub struct Version {
    raw: String,
    profile: &'static GrammarProfile,
    epoch: u64,
    bucket: Bucket,
    build: Option<(String, Bucket)>,
    release: Vec<u64>,
    suffix: String,
}

impl Version {
    /// Parses `raw` under `profile`
    pub fn parse(raw: &str, profile: &'static GrammarProfile) -> Result<Self, VersionError> {
        let ecosystem = profile.ecosystem;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            if profile.allows_blank {
                return Ok(Version {
                    raw: raw.to_string(),
                    profile,
                    epoch: 0,
                    bucket: Bucket::default(),
                    build: None,
                    release: Vec::new(),
                    suffix: String::new(),
                });
            }
            return Err(VersionError::EmptyVersion { ecosystem });
        }

        if let Some(c) = trimmed.chars().find(|c| !is_allowed(*c, profile)) {
            return Err(VersionError::malformed(
                ecosystem,
                raw,
                format!("unexpected character '{}'", c),
            ));
        }

        let (epoch, body) = split_epoch(strip_v_prefix(trimmed), profile, raw)?;
        let (main, build_text) = match body.split_once('+') {
            Some((main, build)) => (main, Some(build)),
            None => (body, None),
        };
        if let Some(build) = build_text {
            if !profile.supports_build_metadata() {
                return Err(VersionError::malformed(
                    ecosystem,
                    raw,
                    "build metadata is not supported",
                ));
            }
            if build.is_empty() || build.contains('+') {
                return Err(VersionError::malformed(
                    ecosystem,
                    raw,
                    "build metadata must be a single non-empty '+' suffix",
                ));
            }
        }
        if main.is_empty() {
            return Err(VersionError::malformed(ecosystem, raw, "missing version before '+'"));
        }

        let mut lowered = main.to_ascii_lowercase();
        let is_date = profile.date_versions && DATE_VERSION.is_match(&lowered);
        if is_date {
            lowered.retain(|c| c != '-');
        }

        let (release, release_end) = leading_release(&lowered, ecosystem, raw)?;
        let suffix = if is_date {
            String::new()
        } else {
            main[release_end..].to_string()
        };

        let mut bucket = Bucket::tokenize(&lowered, profile);
        bucket.normalize(profile, 0);
        trace!("{} version '{}' tokenized as {:?}", ecosystem, raw, bucket);

        let build = build_text.map(|text| {
            let mut build_bucket = Bucket::tokenize(&text.to_ascii_lowercase(), profile);
            build_bucket.normalize(profile, 0);
            (text.to_string(), build_bucket)
        });

        Ok(Version {
            raw: raw.to_string(),
            profile,
            epoch,
            bucket,
            build,
            release,
            suffix,
        })
    }

    /// Builds a plain release version from numeric segments
    pub(crate) fn from_release(segments: &[u64], profile: &'static GrammarProfile) -> Self {
        let mut bucket = Bucket::from_numbers(segments);
        bucket.normalize(profile, 0);
        Version {
            raw: join_segments(segments),
            profile,
            epoch: 0,
            bucket,
            build: None,
            release: segments.to_vec(),
            suffix: String::new(),
        }
    }

    /// Plain release `segments` in the same epoch as `self`
    pub(crate) fn sibling(&self, segments: &[u64]) -> Self {
        let mut version = Version::from_release(segments, self.profile);
        if self.epoch > 0 {
            version.epoch = self.epoch;
            version.raw = format!("{}{}", self.epoch_prefix(), version.raw);
        }
        version
    }

    /// The original text, verbatim
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The profile this version was parsed with
    pub fn profile(&self) -> &'static GrammarProfile {
        self.profile
    }

    /// The ecosystem this version belongs to
    pub fn ecosystem(&self) -> Ecosystem {
        self.profile.ecosystem
    }

    /// PEP 440 epoch; 0 when absent
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// `N!` for a non-zero epoch, empty otherwise
    pub(crate) fn epoch_prefix(&self) -> String {
        if self.epoch > 0 {
            format!("{}!", self.epoch)
        } else {
            String::new()
        }
    }

    /// Leading dot-separated numeric segments (`1.2.3-rc1` gives `[1, 2, 3]`)
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Text after the leading release segments, excluding build metadata
    /// (`1.2.3-rc1` gives `-rc1`)
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Build metadata without the `+`
    pub fn build_metadata(&self) -> Option<&str> {
        self.build.as_ref().map(|(text, _)| text.as_str())
    }

    /// True if the version ranks below its plain release
    pub fn is_prerelease(&self) -> bool {
        (self.profile.semver_prerelease && self.bucket.nested.is_some())
            || self.bucket.has_word_below_release()
    }

    /// Release segments with trailing zeros removed, for same-release checks
    pub(crate) fn trimmed_release(&self) -> &[u64] {
        let end = self
            .release
            .iter()
            .rposition(|segment| *segment != 0)
            .map_or(0, |index| index + 1);
        &self.release[..end]
    }
}

fn is_allowed(c: char, profile: &GrammarProfile) -> bool {
    c.is_ascii_alphanumeric()
        || c == '.'
        || c == '+'
        || (c == '!' && profile.epochs)
        || profile.is_bucket_separator(c)
}

/// Splits a leading `N!` epoch off `text`
fn split_epoch<'t>(
    text: &'t str,
    profile: &GrammarProfile,
    raw: &str,
) -> Result<(u64, &'t str), VersionError> {
    let ecosystem = profile.ecosystem;
    let Some((epoch, rest)) = text.split_once('!') else {
        return Ok((0, text));
    };
    if epoch.is_empty() || !epoch.bytes().all(|b| b.is_ascii_digit()) || rest.contains('!') {
        return Err(VersionError::malformed(
            ecosystem,
            raw,
            "an epoch must be a single leading 'N!'",
        ));
    }
    let value = epoch
        .parse::<u64>()
        .map_err(|_| VersionError::overflow(ecosystem, raw, epoch))?;
    Ok((value, rest))
}

fn strip_v_prefix(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('v' | 'V'), Some(next)) if next.is_ascii_digit() => &text[1..],
        _ => text,
    }
}

/// Reads the leading `N(.N)*` run; returns the segments and the byte index
/// where the run ends.
fn leading_release(
    text: &str,
    ecosystem: Ecosystem,
    raw: &str,
) -> Result<(Vec<u64>, usize), VersionError> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut pos = 0;
    loop {
        let digits = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            break;
        }
        let segment = &text[pos..pos + digits];
        let value = segment
            .parse::<u64>()
            .map_err(|_| VersionError::overflow(ecosystem, raw, segment))?;
        segments.push(value);
        pos += digits;
        let continues = bytes.get(pos) == Some(&b'.')
            && bytes.get(pos + 1).is_some_and(|b| b.is_ascii_digit());
        if !continues {
            break;
        }
        pos += 1;
    }
    Ok((segments, pos))
}

pub(crate) fn join_segments(segments: &[u64]) -> String {
    segments
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let profile = self.profile;
        self.ecosystem()
            .cmp(&other.ecosystem())
            .then_with(|| self.epoch.cmp(&other.epoch))
            .then_with(|| self.bucket.compare(&other.bucket, profile, 0))
            .then_with(|| match profile.build_metadata {
                BuildMetadata::Tiebreak => match (&self.build, &other.build) {
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                    (Some((_, a)), Some((_, b))) => a.compare(b, profile, 0),
                },
                BuildMetadata::Ignored | BuildMetadata::Unsupported => Ordering::Equal,
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Version")
            .field("ecosystem", &self.profile.ecosystem)
            .field("raw", &self.raw)
            .finish()
    }
}
