use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for kpoint, isolated from any per-user configuration
pub fn kpoint() -> Command {
    let mut cmd = cargo_bin_cmd!("kpoint");
    cmd.env("KPOINT_CONFIG_DIR", "/nonexistent/kpoint-test-config")
        .env_remove("KPOINT_CATALOG")
        .env_remove("KPOINT_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a JSON document into `dir` and return its path
#[allow(dead_code)]
pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Parse stdout of a successful run as JSON
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}
