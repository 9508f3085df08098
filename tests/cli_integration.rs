//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They run the built binary against entries files in a temp directory.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use canopy::{Entry, MerkleTree, TreeConfig};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Get the path to the built binary
fn canopy_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_canopy"))
}

/// Run canopy command and return (stdout, stderr, success)
fn run_canopy(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(canopy_binary())
        .args(["-f", "json"])
        .args(args)
        .output()
        .expect("Failed to execute canopy");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Write an entries file with `key1..keyN` / `Node1..NodeN`
fn write_entries(dir: &Path, n: usize) -> String {
    let records: Vec<_> = (1..=n)
        .map(|i| serde_json::json!({ "label": format!("key{i}"), "value": format!("Node{i}") }))
        .collect();
    let path = dir.join("entries.json");
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
    path.to_str().unwrap().to_string()
}

fn library_tree(n: usize) -> MerkleTree {
    let entries = (1..=n).map(|i| Entry::labeled(format!("key{i}"), format!("Node{i}")));
    MerkleTree::from_entries(TreeConfig::default(), entries).unwrap()
}

fn setup(n: usize) -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let path = write_entries(dir.path(), n);
    (dir, path)
}

fn parse(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

// ============================================================================
// Root Tests
// ============================================================================

#[test]
fn test_cli_root_matches_library() {
    let (_dir, entries) = setup(5);

    let (stdout, _stderr, success) = run_canopy(&["root", &entries]);

    assert!(success, "root should succeed");
    let json = parse(&stdout);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["root"], library_tree(5).root_hash().to_hex());
    assert_eq!(json["depth"], 4);
    assert_eq!(json["leaves"], 5);
}

#[test]
fn test_cli_root_with_delete() {
    let (_dir, entries) = setup(5);

    let (stdout, _stderr, success) = run_canopy(&["root", &entries, "--delete", "key5=Node5"]);

    assert!(success);
    let json = parse(&stdout);
    assert_eq!(json["root"], library_tree(4).root_hash().to_hex());
    assert_eq!(json["depth"], 3);
}

#[test]
fn test_cli_delete_missing_entry_fails() {
    let (_dir, entries) = setup(3);

    let (stdout, _stderr, success) = run_canopy(&["root", &entries, "-d", "key9=Node9"]);

    assert!(!success, "deleting a missing entry should fail");
    assert_eq!(parse(&stdout)["status"], "error");
}

#[test]
fn test_cli_missing_entries_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let (stdout, _stderr, success) = run_canopy(&["root", missing.to_str().unwrap()]);

    assert!(!success);
    let json = parse(&stdout);
    assert_eq!(json["status"], "error");
    assert!(json["message"].as_str().unwrap().contains("reading entries file"));
}

// ============================================================================
// Proof Tests
// ============================================================================

#[test]
fn test_cli_prove_then_verify() {
    let (_dir, entries) = setup(6);

    let (stdout, _stderr, success) = run_canopy(&["prove", &entries, "key4", "Node4"]);
    assert!(success, "prove should succeed");
    let proof = parse(&stdout);
    assert_eq!(proof["position"], 3);

    let position = proof["position"].to_string();
    let siblings: Vec<String> = proof["siblings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect();

    let mut args: Vec<&str> = vec![
        "verify",
        entries.as_str(),
        "key4",
        "Node4",
        "--position",
        position.as_str(),
    ];
    for s in &siblings {
        args.push("--sibling");
        args.push(s.as_str());
    }
    let (stdout, _stderr, success) = run_canopy(&args);

    assert!(success, "verify should succeed");
    assert_eq!(parse(&stdout)["valid"], true);
}

#[test]
fn test_cli_verify_rejects_bad_path() {
    let (_dir, entries) = setup(4);
    let bogus = canopy::Digest::of(b"bogus").to_hex();

    let (stdout, _stderr, success) = run_canopy(&[
        "verify", &entries, "key1", "Node1", "--position", "0", "--sibling", &bogus,
    ]);

    assert!(!success, "invalid proof should exit non-zero");
    assert_eq!(parse(&stdout)["valid"], false);
}

#[test]
fn test_cli_prove_missing_entry() {
    let (_dir, entries) = setup(4);

    let (stdout, _stderr, success) = run_canopy(&["prove", &entries, "key9", "Node9"]);

    assert!(!success);
    assert!(parse(&stdout)["message"]
        .as_str()
        .unwrap()
        .contains("Entry not found"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_cli_reject_duplicates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dups.json");
    std::fs::write(
        &path,
        r#"[{"label":"a","value":"x"},{"label":"a","value":"x"}]"#,
    )
    .unwrap();
    let path = path.to_str().unwrap();

    let (_stdout, _stderr, success) = run_canopy(&["root", path]);
    assert!(success, "duplicates are allowed by default");

    let (stdout, _stderr, success) = run_canopy(&["--reject-duplicates", "root", path]);
    assert!(!success);
    assert!(parse(&stdout)["message"]
        .as_str()
        .unwrap()
        .contains("Duplicate"));
}

#[test]
fn test_cli_config_file() {
    let dir = tempdir().unwrap();
    let entries = dir.path().join("dups.json");
    std::fs::write(
        &entries,
        r#"[{"label":"a","value":"x"},{"label":"a","value":"x"}]"#,
    )
    .unwrap();
    let config = dir.path().join("canopy.json");
    std::fs::write(&config, r#"{"duplicates":"reject"}"#).unwrap();

    let (_stdout, _stderr, success) = run_canopy(&[
        "--config",
        config.to_str().unwrap(),
        "root",
        entries.to_str().unwrap(),
    ]);
    assert!(!success, "config should turn on duplicate rejection");
}

// ============================================================================
// Show Tests
// ============================================================================

#[test]
fn test_cli_show_text() {
    let (_dir, entries) = setup(3);

    let output = Command::new(canopy_binary())
        .args(["-f", "text", "show", &entries])
        .output()
        .expect("Failed to execute canopy");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Merkle Tree (root "));
    assert!(stdout.contains("\"Node3\""));
    assert!(stdout.contains("(hanging)"));
}
