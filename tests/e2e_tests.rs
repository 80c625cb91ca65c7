//! End-to-end tests for the reqbump CLI
//!
//! These tests verify:
//! - Each subcommand prints the expected text and JSON
//! - Exit codes for success, unfixable requirements and fatal errors
//! - Batch records read from stdin and from files
//! - Configuration file discovery and CLI precedence

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A reqbump command running in an empty directory, so no stray
/// configuration file is picked up
fn reqbump(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reqbump").unwrap();
    cmd.current_dir(dir.path()).arg("--no-color");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

const RECORDS: &str = r#"[
  {"requirement": "^1.2.3", "file": "package.json", "groups": ["dependencies"], "source": {"type": "registry"}},
  {"requirement": ">= 3.0.0", "file": "packages/app/package.json", "groups": ["dependencies"]},
  {"requirement": null, "file": "package.json", "groups": ["devDependencies"]}
]"#;

mod rewrite_tests {
    use super::*;

    #[test]
    fn test_rewrite_default_cargo() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["rewrite", "^1.2.3", "--target", "2.0.0"])
            .assert()
            .success()
            .stdout("^2.0.0\n");
    }

    #[test]
    fn test_rewrite_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-s", "bump_versions_if_necessary", "rewrite", "^1.2.3", "-t", "1.5.0"])
            .assert()
            .success()
            .stdout("unchanged\n");
    }

    #[test]
    fn test_rewrite_hex_widen() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "hex", "-s", "widen-ranges", "rewrite", "~> 2.4.1", "-t", "2.5.3"])
            .assert()
            .success()
            .stdout(">= 2.4.1 and < 2.6.0\n");
    }

    #[test]
    fn test_rewrite_hex_widen_writes_full_bounds() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "hex", "-s", "widen-ranges", "rewrite", "~> 1.0", "-t", "2.5.0"])
            .assert()
            .success()
            .stdout(">= 1.0.0 and < 3.0.0\n");
    }

    #[test]
    fn test_rewrite_unfixable_exits_with_2() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "python", "rewrite", ">2.0", "-t", "1.6.0"])
            .assert()
            .code(2)
            .stdout("unfixable\n");
    }

    #[test]
    fn test_rewrite_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = reqbump(&dir)
            .args(["-e", "npm", "--json", "rewrite", "^0.5.1 || ^1.2.3", "-t", "1.5.0"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["ecosystem"], "npm");
        assert_eq!(json["strategy"], "bump_versions");
        assert_eq!(json["requirement"], "^0.5.1 || ^1.2.3");
        assert_eq!(json["target"], "1.5.0");
        assert_eq!(json["result"]["type"], "updated");
        assert_eq!(json["result"]["text"], "^1.5.0");
    }

    #[test]
    fn test_rewrite_parse_error_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "hex", "rewrite", "^1.0", "-t", "1.0.0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error:"))
            .stderr(predicate::str::contains("unsupported hex operator '^'"));
    }

    #[test]
    fn test_rewrite_bad_target_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["rewrite", "^1.0", "-t", "1.0$"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("malformed cargo version"));
    }

    #[test]
    fn test_rewrite_verbose_shows_context() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "maven", "--verbose", "rewrite", "[1.0,2.0)", "-t", "2.5"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[1.0,2.0) [maven, bump_versions] target 2.5"))
            .stdout(predicate::str::contains("[1.0,3.0)"));
    }
}

mod compare_tests {
    use super::*;

    #[test]
    fn test_compare_maven_qualifiers() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "maven", "compare", "1.0-alpha", "1.0"])
            .assert()
            .success()
            .stdout("<\n");
    }

    #[test]
    fn test_compare_equal_spellings() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "python", "compare", "1.0alpha1", "1.0a1"])
            .assert()
            .success()
            .stdout("=\n");
    }

    #[test]
    fn test_compare_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = reqbump(&dir)
            .args(["--json", "compare", "1.10.0", "1.9.0"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["ordering"], "greater");
        assert_eq!(json["symbol"], ">");
    }
}

mod satisfies_tests {
    use super::*;

    #[test]
    fn test_satisfies_true() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "npm", "satisfies", ">=1.2.3 <2.0.0", "1.9.0"])
            .assert()
            .success()
            .stdout("true\n");
    }

    #[test]
    fn test_satisfies_false_exits_with_1() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["satisfies", "^1.2.3", "2.0.0"])
            .assert()
            .code(1)
            .stdout("false\n");
    }

    #[test]
    fn test_satisfies_prerelease_needs_matching_release() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["satisfies", ">=1.0.0", "2.0.0-rc.1"])
            .assert()
            .code(1);
    }
}

mod batch_tests {
    use super::*;

    #[test]
    fn test_batch_from_stdin_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = reqbump(&dir)
            .args(["-e", "npm", "--json", "batch", "--target", "1.5.0"])
            .write_stdin(RECORDS)
            .output()
            .unwrap();

        // One record is unfixable
        assert_eq!(output.status.code(), Some(2));
        let json = stdout_json(&output);
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["requirement"], "^1.5.0");
        assert_eq!(records[0]["groups"][0], "dependencies");
        assert_eq!(records[0]["source"]["type"], "registry");
        assert_eq!(records[1]["requirement"]["unfixable"], true);
        assert!(records[2]["requirement"].is_null());
    }

    #[test]
    fn test_batch_from_file_text() {
        let dir = tempfile::tempdir().unwrap();
        let records = r#"[
          {"requirement": "^1.2.3", "file": "package.json", "groups": ["dependencies"]},
          {"requirement": "~1.5.0", "file": "package.json", "groups": ["devDependencies"]}
        ]"#;
        fs::write(dir.path().join("records.json"), records).unwrap();

        reqbump(&dir)
            .args(["-e", "npm", "batch", "records.json", "-t", "1.5.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("package.json"))
            .stdout(predicate::str::contains("-> ^1.5.0 (dependencies)"))
            .stdout(predicate::str::contains("1 requirement(s) updated"))
            .stdout(predicate::str::contains("1 unchanged"))
            .stdout(predicate::str::contains("~1.5.0").not());
    }

    #[test]
    fn test_batch_parse_error_continues() {
        let dir = tempfile::tempdir().unwrap();
        let records = r#"[
          {"requirement": ">>1.0", "file": "mix.exs"},
          {"requirement": "~> 1.2", "file": "mix.exs"}
        ]"#;

        let output = reqbump(&dir)
            .args(["-e", "hex", "--json", "batch", "-t", "2.1.0"])
            .write_stdin(records)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(2));
        let json = stdout_json(&output);
        assert_eq!(json[0]["requirement"], ">>1.0");
        assert_eq!(json[1]["requirement"], "~> 2.1");
        assert!(String::from_utf8_lossy(&output.stderr).contains("Skipping requirement in mix.exs"));
    }

    #[test]
    fn test_batch_without_target_leaves_records() {
        let dir = tempfile::tempdir().unwrap();
        let output = reqbump(&dir)
            .args(["-e", "npm", "--json", "batch"])
            .write_stdin(RECORDS)
            .output()
            .unwrap();

        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json[0]["requirement"], "^1.2.3");
        assert_eq!(json[1]["requirement"], ">= 3.0.0");
    }

    #[test]
    fn test_batch_updated_source() {
        let dir = tempfile::tempdir().unwrap();
        let output = reqbump(&dir)
            .args([
                "-e",
                "npm",
                "--json",
                "batch",
                "-t",
                "1.5.0",
                "--updated-source",
                r#"{"type": "git", "ref": "v1.5.0"}"#,
            ])
            .write_stdin(RECORDS)
            .output()
            .unwrap();

        let json = stdout_json(&output);
        assert_eq!(json[0]["source"]["type"], "git");
        assert_eq!(json[0]["source"]["ref"], "v1.5.0");
        // records without a source keep none
        assert!(json[1]["source"].is_null());
    }

    #[test]
    fn test_batch_verbose_json_reports_results() {
        let dir = tempfile::tempdir().unwrap();
        let output = reqbump(&dir)
            .args(["-e", "npm", "--json", "--verbose", "batch", "-t", "1.5.0"])
            .write_stdin(RECORDS)
            .output()
            .unwrap();

        let json = stdout_json(&output);
        assert_eq!(json["requirements"].as_array().unwrap().len(), 3);
        assert_eq!(json["results"][0]["result"]["type"], "updated");
        assert_eq!(json["results"][1]["result"]["type"], "unfixable");
        assert_eq!(json["results"][2]["result"]["type"], "unchanged");
    }

    #[test]
    fn test_batch_quiet_summary() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "npm", "-q", "batch", "-t", "1.5.0"])
            .write_stdin(RECORDS)
            .assert()
            .code(2)
            .stdout("1 updated, 1 unfixable, 0 failed\n");
    }

    #[test]
    fn test_batch_invalid_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["batch", "-t", "1.0.0"])
            .write_stdin("not json")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid requirement records"));
    }

    #[test]
    fn test_batch_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["batch", "missing.json"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to read missing.json"));
    }
}

mod config_tests {
    use super::*;

    fn dir_with_config(content: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("reqbump.toml"), content).unwrap();
        dir
    }

    #[test]
    fn test_config_file_in_working_directory() {
        let dir = dir_with_config("ecosystem = \"hex\"\nstrategy = \"widen_ranges\"\n");
        reqbump(&dir)
            .args(["rewrite", "~> 2.4.1", "-t", "2.5.3"])
            .assert()
            .success()
            .stdout(">= 2.4.1 and < 2.6.0\n");
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = dir_with_config("ecosystem = \"hex\"\nstrategy = \"widen_ranges\"\n");
        reqbump(&dir)
            .args(["-s", "bump_versions", "rewrite", "~> 2.4.1", "-t", "2.5.3"])
            .assert()
            .success()
            .stdout("~> 2.5.3\n");
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        fs::write(&config_path, "ecosystem = \"maven\"\n").unwrap();

        reqbump(&dir)
            .arg("--config")
            .arg(&config_path)
            .args(["compare", "Finchley", "Edgware"])
            .assert()
            .success()
            .stdout(">\n");
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = dir_with_config("ecosystem = \n");
        reqbump(&dir)
            .args(["compare", "1.0", "2.0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to parse config file"));
    }

    #[test]
    fn test_unknown_config_value_is_fatal() {
        let dir = dir_with_config("ecosystem = \"cobol\"\n");
        reqbump(&dir)
            .args(["compare", "1.0", "2.0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("unknown ecosystem 'cobol'"));
    }
}

mod cli_tests {
    use super::*;

    #[test]
    fn test_help() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("rewrite"))
            .stdout(predicate::str::contains("batch"));
    }

    #[test]
    fn test_version() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("reqbump"));
    }

    #[test]
    fn test_unknown_ecosystem_flag() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "cobol", "compare", "1", "2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown ecosystem 'cobol'"));
    }

    #[test]
    fn test_verbose_logs_debug_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "hex", "-s", "widen-ranges", "--verbose", "rewrite", "~> 2.4.1", "-t", "2.5.3"])
            .assert()
            .success()
            .stderr(predicate::str::contains("widening '"));
    }

    #[test]
    fn test_quiet_silences_warnings() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-e", "hex", "-q", "batch", "-t", "2.1.0"])
            .write_stdin(r#"[{"requirement": ">>1.0", "file": "mix.exs"}]"#)
            .assert()
            .stderr(predicate::str::contains("Skipping").not());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let dir = tempfile::tempdir().unwrap();
        reqbump(&dir)
            .args(["-q", "--verbose", "compare", "1", "2"])
            .assert()
            .failure();
    }
}
