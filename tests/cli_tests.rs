//! CLI integration tests.
//!
//! These tests invoke the `vault2rdf` binary via `std::process::Command`
//! against temporary vault fixtures and verify output correctness.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path to the built binary (set by cargo test).
fn binary_path() -> PathBuf {
    // `cargo test` places the test binary next to the main binary
    let mut path = std::env::current_exe()
        .expect("current_exe")
        .parent()
        .expect("parent")
        .parent()
        .expect("grandparent")
        .to_path_buf();
    path.push("vault2rdf");
    path
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A small vault: two notes (one linking the other) and a canvas.
fn fixture_vault() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "Home.md",
        "# Home\nwebsite :: <http://example.com>\nsee [[Bob]]\n",
    );
    write(tmp.path(), "people/Bob.md", "age :: 42\n#person\n");
    write(
        tmp.path(),
        "Board.canvas",
        r#"{"nodes":[{"id":"f","type":"file","file":"people/Bob.md","x":0,"y":0,"width":10,"height":10}],"edges":[]}"#,
    );
    tmp
}

#[test]
fn ntriples_output_is_valid() {
    let vault = fixture_vault();
    let output = Command::new(binary_path())
        .args([vault.path().to_str().unwrap(), "-q"])
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "vault2rdf failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");

    // N-Triples: every non-empty line ends with " ." and starts with a term
    for line in stdout.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        assert!(
            trimmed.ends_with(" ."),
            "N-Triples line does not end with ' .': {trimmed}"
        );
        assert!(
            trimmed.starts_with('<') || trimmed.starts_with("_:"),
            "N-Triples line does not start with a term: {trimmed}"
        );
    }
}

#[test]
fn vault_links_resolve_across_documents() {
    let vault = fixture_vault();
    let output = Command::new(binary_path())
        .args([vault.path().to_str().unwrap(), "-q"])
        .output()
        .expect("failed to execute binary");
    let stdout = String::from_utf8(output.stdout).unwrap();

    // The [[Bob]] placeholder was rebound to the indexed path.
    assert!(stdout.contains("<http://vault.example/note/people/Bob.md>"));
    assert!(!stdout.contains("<http://vault.example/name/Bob>"));
}

#[test]
fn single_note_conversion_to_file() {
    let vault = fixture_vault();
    let out_path = vault.path().join("out.nt");
    let output = Command::new(binary_path())
        .args([
            vault.path().join("Home.md").to_str().unwrap(),
            "-q",
            "-o",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to execute binary");
    assert!(output.status.success());

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("<http://example.com>"));
}

#[test]
fn turtle_output_carries_prefixes() {
    let vault = fixture_vault();
    let output = Command::new(binary_path())
        .args([vault.path().to_str().unwrap(), "-q", "-f", "turtle"])
        .output()
        .expect("failed to execute binary");
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("@prefix rdf:"));
    assert!(stdout.contains("@prefix vault:"));
}

#[test]
fn custom_base_uri_is_used() {
    let vault = fixture_vault();
    let output = Command::new(binary_path())
        .args([
            vault.path().to_str().unwrap(),
            "-q",
            "-b",
            "http://kb.example/graph",
        ])
        .output()
        .expect("failed to execute binary");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("<http://kb.example/graph/note/Home.md>"));
}

#[test]
fn bad_documents_are_skipped_not_fatal() {
    let vault = fixture_vault();
    write(vault.path(), "Broken.canvas", "{not json");

    let output = Command::new(binary_path())
        .args([vault.path().to_str().unwrap()])
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping"));
    assert!(stderr.contains("Broken.canvas"));
    // The healthy notes still converted.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<http://vault.example/note/Home.md>"));
}

#[test]
fn partition_flag_splits_headings() {
    let vault = tempfile::tempdir().unwrap();
    write(vault.path(), "Doc.md", "## Topic\nvariable :: value 1\n");

    let output = Command::new(binary_path())
        .args([
            vault.path().to_str().unwrap(),
            "-q",
            "--partition-by",
            "headers-h2-h3",
        ])
        .output()
        .expect("failed to execute binary");
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("<http://vault.example/note/Doc.md/section/Topic>"));
    assert!(stdout
        .contains("<http://vault.example/note/Doc.md> <http://vault.example/ontology/contains>"));
}

#[test]
fn unknown_format_is_an_error() {
    let vault = fixture_vault();
    let output = Command::new(binary_path())
        .args([vault.path().to_str().unwrap(), "-f", "rdfxml"])
        .output()
        .expect("failed to execute binary");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown format"));
}
