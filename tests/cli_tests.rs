//! Integration tests for the kpoint CLI surface: help, exit codes, errors

mod common;

use common::{kpoint, stdout_json};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    kpoint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: kpoint"))
        .stdout(predicate::str::contains("dedup"))
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("categories"));
}

#[test]
fn test_version_flag() {
    kpoint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kpoint"));
}

#[test]
fn test_no_subcommand_prints_banner() {
    kpoint()
        .assert()
        .success()
        .stdout(predicate::str::contains("kpoint --help"));
}

// ============================================================================
// Exit codes and error envelopes
// ============================================================================

#[test]
fn test_unknown_format_exit_code_2() {
    kpoint()
        .args(["--format", "yaml", "categories"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_subcommand_json_envelope() {
    let output = kpoint()
        .args(["--format", "json", "classify"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let envelope: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(envelope["error"]["code"], 2);
    assert_eq!(envelope["error"]["type"], "usage_error");
}

#[test]
fn test_missing_config_file_is_failure() {
    kpoint()
        .args(["--config", "/nonexistent/kpoint.toml", "categories"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: failed to read config"));
}

#[test]
fn test_invalid_config_value_exit_code_2() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[recommend]\nconfidence_ceiling = 0.0\n").unwrap();

    kpoint()
        .arg("--config")
        .arg(&config)
        .arg("categories")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("confidence_ceiling"));
}

#[test]
fn test_quiet_suppresses_error_text() {
    kpoint()
        .args(["--quiet", "--config", "/nonexistent/kpoint.toml", "categories"])
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_config_dir_env_is_honored() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[dedup]\ndifferent_methods_score = 0.5\n",
    )
    .unwrap();

    let output = kpoint()
        .env("KPOINT_CONFIG_DIR", dir.path())
        .args(["--format", "json", "compare", "fix bug", "fix bug"])
        .args(["--method-a", "patch x", "--method-b", "patch y"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["score"], 0.5);
}

// ============================================================================
// compare
// ============================================================================

#[test]
fn test_compare_identical_human() {
    kpoint()
        .args(["compare", "How to learn English?", "how to learn english"])
        .args(["--method-a", "practice daily", "--method-b", "Practice  daily"])
        .assert()
        .success()
        .stdout("identical (score 1.00)\n");
}

#[test]
fn test_compare_json() {
    let output = kpoint()
        .args(["--format", "json", "compare", "grammar tenses", "vocabulary building"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["type"], "different");
    assert_eq!(json["score"], 0.0);
}

#[test]
fn test_compare_records() {
    kpoint()
        .args(["--format", "records", "compare", "fix bug A", "fix bug a"])
        .args(["--method-a", "patch x", "--method-b", "patch y"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("H kpoint=1 records=1 mode=compare"))
        .stdout(predicate::str::contains("X different_methods score=0.9000"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    kpoint()
        .args(["--verbose", "--format", "json", "compare", "a", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"identical\""))
        .stderr(predicate::str::contains("load_config"));
}

// ============================================================================
// categories
// ============================================================================

#[test]
fn test_categories_lists_builtin_catalog() {
    kpoint()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("语法 (Grammar)"))
        .stdout(predicate::str::contains("考试 (Exam)"));
}

#[test]
fn test_categories_json() {
    let output = kpoint()
        .args(["--format", "json", "categories"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 11);
    assert_eq!(list[0]["nameEn"], "Grammar");
    assert_eq!(list[10]["id"], 11);
}

#[test]
fn test_categories_check_valid_catalog() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        "[[categories]]\nid = 1\nname = \"math\"\ncoreKeywords = [\"algebra\"]\n",
    )
    .unwrap();

    kpoint()
        .args(["categories", "--check"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (1 categories, 0 content rules)"));
}

#[test]
fn test_categories_check_duplicate_ids_exit_code_3() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        "[[categories]]\nid = 1\nname = \"a\"\n\n[[categories]]\nid = 1\nname = \"b\"\n",
    )
    .unwrap();

    kpoint()
        .args(["categories", "--check"])
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("duplicate category id 1"));
}

#[test]
fn test_categories_check_bad_pattern_exit_code_3() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{"categories": [{"id": 2, "name": "x", "matchMode": "regex", "coreKeywords": ["(unclosed"]}]}"#,
    )
    .unwrap();

    let output = kpoint()
        .args(["--format", "json", "categories", "--check"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    // The pattern failure is also logged, so the envelope is the last line
    let stderr = String::from_utf8_lossy(&output.stderr);
    let last = stderr.lines().last().unwrap();
    let envelope: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(envelope["error"]["type"], "invalid_catalog");
}

#[test]
fn test_catalog_env_var_selects_catalog() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        "[[categories]]\nid = 5\nname = \"几何\"\nnameEn = \"Geometry\"\n",
    )
    .unwrap();

    kpoint()
        .env("KPOINT_CATALOG", &path)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("几何 (Geometry)"))
        .stdout(predicate::str::contains("Grammar").not());
}
