//! Static grammar tables, one per ecosystem

use super::{BuildMetadata, GrammarProfile};
use crate::domain::Ecosystem;
use crate::requirement::Operator;

const SEMVER_WILDCARDS: &[&str] = &["*", "x", "X"];
const DEFAULT_MAX_CLAUSES: usize = 64;

/// Maven ComparableVersion qualifiers
const MAVEN_QUALIFIERS: &[(&str, i32)] = &[
    ("alpha", -5),
    ("beta", -4),
    ("milestone", -3),
    ("rc", -2),
    ("snapshot", -1),
    ("", 0),
    ("sp", 1),
];

const MAVEN_ALIASES: &[(&str, &str)] = &[
    ("cr", "rc"),
    ("pr", "rc"),
    ("pre", "rc"),
    ("preview", "rc"),
    ("dev", "snapshot"),
    ("ea", "alpha"),
    ("eap", "alpha"),
    ("ga", ""),
    ("final", ""),
    ("release", ""),
];

const MAVEN_DIGIT_ALIASES: &[(&str, &str)] = &[("a", "alpha"), ("b", "beta"), ("m", "milestone")];

/// PEP 440 pre-, post- and dev-release spellings
const PYTHON_QUALIFIERS: &[(&str, i32)] = &[
    ("dev", -5),
    ("a", -4),
    ("b", -3),
    ("rc", -2),
    ("", 0),
    ("post", 1),
];

const PYTHON_ALIASES: &[(&str, &str)] = &[
    ("alpha", "a"),
    ("beta", "b"),
    ("c", "rc"),
    ("pre", "rc"),
    ("preview", "rc"),
    ("r", "post"),
    ("rev", "post"),
    ("final", ""),
    ("release", ""),
];

/// Rust crates: SemVer with Cargo's requirement syntax
pub static CARGO: GrammarProfile = GrammarProfile {
    ecosystem: Ecosystem::Cargo,
    qualifiers: &[],
    aliases: &[],
    digit_aliases: &[],
    unknown_qualifier_rank: -1,
    bucket_separators: &['-'],
    dot_qualifier_opens_bucket: false,
    semver_prerelease: true,
    build_metadata: BuildMetadata::Ignored,
    allows_blank: false,
    date_versions: false,
    epochs: false,
    operators: &[
        ("=", Operator::Exact),
        (">=", Operator::GreaterEq),
        (">", Operator::Greater),
        ("<=", Operator::LessEq),
        ("<", Operator::Less),
        ("~", Operator::Tilde),
        ("^", Operator::Caret),
    ],
    bare_operator: Operator::Caret,
    partial_exact_matches_prefix: true,
    wildcards: SEMVER_WILDCARDS,
    and_separators: &[","],
    whitespace_and: false,
    or_separators: &[],
    hyphen_ranges: false,
    bracket_ranges: false,
    prerelease_requires_full_match: true,
    widen_compatible_to_range: false,
    min_bound_segments: 0,
    any_version_text: "*",
    canonical_and: ", ",
    max_clauses: DEFAULT_MAX_CLAUSES,
};

/// JavaScript packages: node-semver ranges
pub static NPM: GrammarProfile = GrammarProfile {
    ecosystem: Ecosystem::Npm,
    qualifiers: &[],
    aliases: &[],
    digit_aliases: &[],
    unknown_qualifier_rank: -1,
    bucket_separators: &['-'],
    dot_qualifier_opens_bucket: false,
    semver_prerelease: true,
    build_metadata: BuildMetadata::Ignored,
    allows_blank: false,
    date_versions: false,
    epochs: false,
    operators: &[
        ("=", Operator::Exact),
        (">=", Operator::GreaterEq),
        (">", Operator::Greater),
        ("<=", Operator::LessEq),
        ("<", Operator::Less),
        ("~", Operator::Tilde),
        ("~>", Operator::Tilde),
        ("^", Operator::Caret),
    ],
    bare_operator: Operator::Exact,
    partial_exact_matches_prefix: true,
    wildcards: SEMVER_WILDCARDS,
    and_separators: &[],
    whitespace_and: true,
    or_separators: &["||"],
    hyphen_ranges: true,
    bracket_ranges: false,
    prerelease_requires_full_match: true,
    widen_compatible_to_range: false,
    min_bound_segments: 0,
    any_version_text: "*",
    canonical_and: " ",
    max_clauses: DEFAULT_MAX_CLAUSES,
};

/// Elixir/Erlang packages: Elixir `Version` requirements
pub static HEX: GrammarProfile = GrammarProfile {
    ecosystem: Ecosystem::Hex,
    qualifiers: &[],
    aliases: &[],
    digit_aliases: &[],
    unknown_qualifier_rank: -1,
    bucket_separators: &['-'],
    dot_qualifier_opens_bucket: false,
    semver_prerelease: true,
    build_metadata: BuildMetadata::Tiebreak,
    allows_blank: false,
    date_versions: false,
    epochs: false,
    operators: &[
        ("==", Operator::Exact),
        ("!=", Operator::NotEqual),
        (">=", Operator::GreaterEq),
        (">", Operator::Greater),
        ("<=", Operator::LessEq),
        ("<", Operator::Less),
        ("~>", Operator::Twiddle),
    ],
    bare_operator: Operator::Exact,
    partial_exact_matches_prefix: false,
    wildcards: &[],
    and_separators: &["and"],
    whitespace_and: false,
    or_separators: &["or"],
    hyphen_ranges: false,
    bracket_ranges: false,
    prerelease_requires_full_match: false,
    widen_compatible_to_range: true,
    min_bound_segments: 3,
    any_version_text: ">= 0.0.0",
    canonical_and: " and ",
    max_clauses: DEFAULT_MAX_CLAUSES,
};

/// Java artifacts: Maven ComparableVersion and version ranges
pub static MAVEN: GrammarProfile = GrammarProfile {
    ecosystem: Ecosystem::Maven,
    qualifiers: MAVEN_QUALIFIERS,
    aliases: MAVEN_ALIASES,
    digit_aliases: MAVEN_DIGIT_ALIASES,
    unknown_qualifier_rank: 2,
    bucket_separators: &['-', '_'],
    dot_qualifier_opens_bucket: false,
    semver_prerelease: false,
    build_metadata: BuildMetadata::Tiebreak,
    allows_blank: true,
    date_versions: true,
    epochs: false,
    operators: &[],
    bare_operator: Operator::Exact,
    partial_exact_matches_prefix: false,
    wildcards: &[],
    and_separators: &[],
    whitespace_and: false,
    or_separators: &[","],
    hyphen_ranges: false,
    bracket_ranges: true,
    prerelease_requires_full_match: false,
    widen_compatible_to_range: false,
    min_bound_segments: 0,
    any_version_text: "[0,)",
    canonical_and: ",",
    max_clauses: DEFAULT_MAX_CLAUSES,
};

/// Python packages: PEP 440 specifiers plus Poetry's `^` and `~`
pub static PYTHON: GrammarProfile = GrammarProfile {
    ecosystem: Ecosystem::Python,
    qualifiers: PYTHON_QUALIFIERS,
    aliases: PYTHON_ALIASES,
    digit_aliases: &[],
    unknown_qualifier_rank: -1,
    bucket_separators: &['-', '_'],
    dot_qualifier_opens_bucket: true,
    semver_prerelease: false,
    build_metadata: BuildMetadata::Tiebreak,
    allows_blank: false,
    date_versions: false,
    epochs: true,
    operators: &[
        ("==", Operator::Exact),
        ("===", Operator::Exact),
        ("!=", Operator::NotEqual),
        ("~=", Operator::Compatible),
        (">=", Operator::GreaterEq),
        (">", Operator::Greater),
        ("<=", Operator::LessEq),
        ("<", Operator::Less),
        ("^", Operator::Caret),
        ("~", Operator::Tilde),
    ],
    bare_operator: Operator::Exact,
    partial_exact_matches_prefix: false,
    wildcards: &["*"],
    and_separators: &[","],
    whitespace_and: false,
    or_separators: &["||", "|"],
    hyphen_ranges: false,
    bracket_ranges: false,
    prerelease_requires_full_match: false,
    widen_compatible_to_range: true,
    min_bound_segments: 0,
    any_version_text: ">=0",
    canonical_and: ",",
    max_clauses: DEFAULT_MAX_CLAUSES,
};
