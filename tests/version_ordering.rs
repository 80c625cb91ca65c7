//! Integration tests for version ordering
//!
//! These tests verify:
//! - Maven ComparableVersion worked examples
//! - SemVer ordering against the `semver` crate
//! - PEP 440 and Hex ordering details
//! - Ordering totality and transitivity over mixed inputs

use reqbump::grammar::{GrammarProfile, CARGO, HEX, MAVEN, NPM, PYTHON};
use reqbump::version::Version;
use std::cmp::Ordering;

fn v(raw: &str, profile: &'static GrammarProfile) -> Version {
    Version::parse(raw, profile).unwrap_or_else(|e| panic!("failed to parse '{}': {}", raw, e))
}

fn cmp(a: &str, b: &str, profile: &'static GrammarProfile) -> Ordering {
    v(a, profile).cmp(&v(b, profile))
}

mod maven {
    use super::*;

    fn assert_order(a: &str, b: &str, expected: Ordering) {
        assert_eq!(cmp(a, b, &MAVEN), expected, "'{}' vs '{}'", a, b);
        assert_eq!(cmp(b, a, &MAVEN), expected.reverse(), "'{}' vs '{}'", b, a);
    }

    #[test]
    fn test_numbers_and_padding() {
        assert_order("1", "1.1", Ordering::Less);
        assert_order("1.0.0", "0.9.0", Ordering::Greater);
        assert_order("1.0.0", "1.1.0", Ordering::Less);
        assert_order("1.0", "1", Ordering::Equal);
        assert_order("1.0.", "1", Ordering::Equal);
        assert_order("v1.0.0", "1.0.0", Ordering::Equal);
    }

    #[test]
    fn test_qualifiers_against_release() {
        assert_order("1-snapshot", "1", Ordering::Less);
        assert_order("1", "1-sp", Ordering::Less);
        assert_order("1.0.0a1", "1.0.0", Ordering::Less);
        assert_order("1.0.0", "1.0.0u1", Ordering::Less);
        assert_order("181", "dev", Ordering::Greater);
    }

    #[test]
    fn test_qualifier_table_order() {
        let chain = [
            "1-alpha", "1-beta", "1-milestone", "1-rc", "1-snapshot", "1", "1-sp",
        ];
        for pair in chain.windows(2) {
            assert_order(pair[0], pair[1], Ordering::Less);
        }
    }

    #[test]
    fn test_switching_and_prefixes() {
        assert_order("1-foo2", "1-foo10", Ordering::Less);
        assert_order("1.foo", "1-foo", Ordering::Less);
        assert_order("1-foo", "1-1", Ordering::Less);
        assert_order("1-1", "1.1", Ordering::Less);
    }

    #[test]
    fn test_null_values() {
        assert_order("1.ga", "1-ga", Ordering::Equal);
        assert_order("1-ga", "1-0", Ordering::Equal);
        assert_order("1-0", "1.0", Ordering::Equal);
        assert_order("1.0-.2", "1.0-0.2", Ordering::Equal);
        assert_order("1.0.FINAL", "1", Ordering::Equal);
        assert_order("1-ga-1", "1-1", Ordering::Equal);
    }

    #[test]
    fn test_case_insensitive() {
        assert_order("1.something", "1.SOMETHING", Ordering::Equal);
    }

    #[test]
    fn test_sp_against_ga() {
        assert_order("1-sp", "1-ga", Ordering::Greater);
        assert_order("1-sp.1", "1-ga.1", Ordering::Greater);
        assert_order("1-sp-1", "1-ga-1", Ordering::Less);
    }

    #[test]
    fn test_named_aliases() {
        assert_order("1-a1", "1-alpha-1", Ordering::Equal);
        assert_order("1-b2", "1-beta-2", Ordering::Equal);
        assert_order("1-m3", "1-milestone-3", Ordering::Equal);
        assert_order("1-cr1", "1-rc1", Ordering::Equal);
    }

    #[test]
    fn test_release_train_names() {
        assert_order("Finchley", "Edgware", Ordering::Greater);
    }

    #[test]
    fn test_dates() {
        assert_order("2018-10-03", "20181003", Ordering::Equal);
        assert_order("v2018-10-03", "2018-10-03", Ordering::Equal);
    }

    #[test]
    fn test_build_metadata_tiebreak() {
        assert_order("9.0.0+100", "9.0.0+100", Ordering::Equal);
        assert_order("9.0.0+101", "9.0.0+100", Ordering::Greater);
        assert_order("9.0.0", "9.0.0+100", Ordering::Less);
    }

    #[test]
    fn test_prerelease_predicate() {
        assert!(v("1.0.0-alpha", &MAVEN).is_prerelease());
        assert!(v("1.0.0-SNAPSHOT", &MAVEN).is_prerelease());
        assert!(!v("1.0.0-sp1", &MAVEN).is_prerelease());
        assert!(!v("1.0.0.RELEASE", &MAVEN).is_prerelease());
        assert!(!v("1.0.0+100", &MAVEN).is_prerelease());
    }
}

mod semver_oracle {
    use super::*;

    const VERSIONS: &[&str] = &[
        "0.0.0-0",
        "0.0.0-1",
        "0.0.0-alpha",
        "0.0.0",
        "0.0.1",
        "0.9.9",
        "1.0.0-0",
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0-alpha.beta",
        "1.0.0-beta",
        "1.0.0-beta.2",
        "1.0.0-beta.11",
        "1.0.0-rc.1",
        "1.0.0",
        "1.2.3",
        "1.10.0",
        "2.0.0-rc.1",
        "2.0.0",
        "10.0.0",
    ];

    #[test]
    fn test_cargo_matches_semver_crate() {
        for a in VERSIONS {
            for b in VERSIONS {
                let expected = semver::Version::parse(a)
                    .unwrap()
                    .cmp(&semver::Version::parse(b).unwrap());
                assert_eq!(cmp(a, b, &CARGO), expected, "cargo '{}' vs '{}'", a, b);
                assert_eq!(cmp(a, b, &NPM), expected, "npm '{}' vs '{}'", a, b);
            }
        }
    }

    #[test]
    fn test_prerelease_flag_matches_semver_crate() {
        for raw in VERSIONS {
            let oracle = !semver::Version::parse(raw).unwrap().pre.is_empty();
            assert_eq!(v(raw, &CARGO).is_prerelease(), oracle, "'{}'", raw);
        }
    }

    #[test]
    fn test_build_metadata_ignored() {
        assert_eq!(cmp("1.0.0", "1.0.0+build.1", &CARGO), Ordering::Equal);
        assert_eq!(v("1.0.0+build.1", &CARGO), v("1.0.0", &CARGO));
        assert_eq!(v("1.0.0+build.1", &CARGO).build_metadata(), Some("build.1"));
    }
}

mod python {
    use super::*;

    #[test]
    fn test_pep440_phases() {
        let chain = [
            "1.0.dev1", "1.0a1", "1.0a2", "1.0b1", "1.0rc1", "1.0", "1.0.post1", "1.1",
        ];
        for pair in chain.windows(2) {
            assert_eq!(cmp(pair[0], pair[1], &PYTHON), Ordering::Less, "'{}' < '{}'", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_spelling_variants() {
        assert_eq!(cmp("1.0alpha1", "1.0a1", &PYTHON), Ordering::Equal);
        assert_eq!(cmp("1.0-dev1", "1.0.dev1", &PYTHON), Ordering::Equal);
        assert_eq!(cmp("1.0c1", "1.0rc1", &PYTHON), Ordering::Equal);
    }

    #[test]
    fn test_epoch_outranks_release() {
        assert_eq!(cmp("1!1.0", "2.0", &PYTHON), Ordering::Greater);
        assert_eq!(cmp("0!1.0", "1.0", &PYTHON), Ordering::Equal);
        assert_eq!(cmp("1!1.0", "1!1.1", &PYTHON), Ordering::Less);
        assert_eq!(cmp("1!1.0rc1", "1!1.0", &PYTHON), Ordering::Less);
        assert_eq!(v("2!1.0", &PYTHON).epoch(), 2);
    }

    #[test]
    fn test_local_version_tiebreak() {
        assert_eq!(cmp("1.0+abc", "1.0", &PYTHON), Ordering::Greater);
    }
}

mod hex {
    use super::*;

    #[test]
    fn test_prerelease_and_build() {
        assert_eq!(cmp("1.2.3-rc1", "1.2.3", &HEX), Ordering::Less);
        assert_eq!(cmp("1.0.0", "1.0.0+build.1", &HEX), Ordering::Less);
        assert!(!v("1.0.0+build.1", &HEX).is_prerelease());
    }
}

mod properties {
    use super::*;

    const MIXED: &[&str] = &[
        "1", "1.0", "1-alpha", "1-alpha-1", "1-rc", "1.0.1", "1-sp", "1-foo", "1.foo", "2.0-beta",
        "2.0", "2.0.0.1", "1-snapshot", "1.1", "1-1", "0.9",
    ];

    #[test]
    fn test_ordering_is_total_and_transitive() {
        let versions: Vec<Version> = MIXED.iter().map(|raw| v(raw, &MAVEN)).collect();
        for a in &versions {
            for b in &versions {
                let forward = a.cmp(b);
                assert_eq!(forward.reverse(), b.cmp(a), "{:?} vs {:?}", a, b);
                assert_eq!(forward == Ordering::Equal, a == b);
                for c in &versions {
                    if a <= b && b <= c {
                        assert!(a <= c, "{:?} <= {:?} <= {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_prerelease_ranks_below_release_everywhere() {
        for profile in [&CARGO, &NPM, &HEX, &MAVEN, &PYTHON] {
            assert_eq!(
                cmp("1.2.3-rc1", "1.2.3", profile),
                Ordering::Less,
                "{:?}",
                profile.ecosystem
            );
        }
    }

    #[test]
    fn test_raw_text_is_preserved() {
        assert_eq!(v(" v1.2.3 ", &NPM).raw(), " v1.2.3 ");
        assert_eq!(v("1.0.FINAL", &MAVEN).to_string(), "1.0.FINAL");
    }
}
