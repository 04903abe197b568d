//! Integration tests for the CLI binary.
//!
//! This test is registered as a [[test]] in the detkey-cli crate
//! so that CARGO_BIN_EXE_detkey is available.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Get a Command pointing to the `detkey` binary.
fn detkey_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_detkey"))
}

fn run(args: &[&str]) -> Output {
    detkey_binary()
        .args(args)
        .output()
        .expect("failed to execute detkey")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "detkey should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Pull the value after `label` out of `label value` lines.
fn field(stdout: &str, label: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(label))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_else(|| panic!("missing '{label}' in output: {stdout}"))
}

#[test]
fn cli_responds_to_help() {
    let stdout = stdout_of(&run(&["--help"]));
    assert!(
        stdout.contains("detkey") || stdout.contains("Usage"),
        "detkey --help output should contain usage information, got: {stdout}"
    );
}

#[test]
fn cli_responds_to_version() {
    let stdout = stdout_of(&run(&["--version"]));
    assert!(
        stdout.contains("detkey"),
        "detkey --version should contain version info, got: {stdout}"
    );
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = run(&["--nonexistent-flag"]);
    assert!(
        !output.status.success(),
        "detkey with unknown flag should exit with non-zero status"
    );
}

#[test]
fn cli_demo_sides_agree() {
    let stdout = stdout_of(&run(&["demo", "--iterations", "100"]));
    let a = field(&stdout, "Shared secret, A:");
    let b = field(&stdout, "Shared secret, B:");
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert_eq!(field(&stdout, "PKCS#8, A:").len(), 96);
    assert_eq!(field(&stdout, "SPKI, B:").len(), 88);
}

#[test]
fn cli_demo_json() {
    let stdout = stdout_of(&run(&["demo", "--json", "--iterations", "100"]));
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(report["a"]["shared_secret"], report["b"]["shared_secret"]);
}

#[test]
fn cli_derive_then_agree() {
    let a = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "alpha",
        "--salt",
        "salt-a",
        "--iterations",
        "100",
    ]));
    let b = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "beta",
        "--salt",
        "salt-b",
        "--iterations",
        "100",
    ]));

    let ab = stdout_of(&run(&[
        "agree",
        "--private",
        &field(&a, "PKCS#8:"),
        "--peer",
        &field(&b, "SPKI:"),
    ]));
    let ba = stdout_of(&run(&[
        "agree",
        "--private",
        &field(&b, "PKCS#8:"),
        "--peer",
        &field(&a, "SPKI:"),
    ]));
    assert_eq!(ab.trim(), ba.trim());
    assert_eq!(ab.trim().len(), 64);
}

#[test]
fn cli_public_matches_derive() {
    let derived = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "alpha",
        "--salt",
        "salt-a",
        "--iterations",
        "100",
    ]));
    let public = stdout_of(&run(&["public", "--private", &field(&derived, "PKCS#8:")]));
    assert_eq!(public.trim(), field(&derived, "SPKI:"));
}

#[test]
fn cli_public_accepts_pasted_whitespace() {
    let derived = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "alpha",
        "--salt",
        "salt-a",
        "--iterations",
        "100",
    ]));
    let pasted = format!("  {}\n", field(&derived, "PKCS#8:"));
    let public = stdout_of(&run(&["public", "--private", &pasted]));
    assert_eq!(public.trim(), field(&derived, "SPKI:"));
}

#[test]
fn cli_derive_reads_passphrase_from_stdin() {
    let mut child = detkey_binary()
        .args(["derive", "--salt", "salt-a", "--iterations", "100"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn detkey");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"alpha\n")
        .expect("failed to write passphrase");
    let piped = stdout_of(&child.wait_with_output().expect("detkey should finish"));

    let flagged = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "alpha",
        "--salt",
        "salt-a",
        "--iterations",
        "100",
    ]));
    assert_eq!(field(&piped, "PKCS#8:"), field(&flagged, "PKCS#8:"));
}

#[test]
fn cli_kdf_config_file_equals_flags() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{"hash": "SHA-512", "iterations": 100}}"#).expect("write config");
    let path = file.path().to_str().expect("utf-8 path");

    let from_file = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "pw",
        "--salt",
        "s",
        "--kdf-config",
        path,
    ]));
    let from_flags = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "pw",
        "--salt",
        "s",
        "--hash",
        "SHA-512",
        "--iterations",
        "100",
    ]));
    let default_hash = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "pw",
        "--salt",
        "s",
        "--iterations",
        "100",
    ]));
    assert_eq!(field(&from_file, "PKCS#8:"), field(&from_flags, "PKCS#8:"));
    assert_ne!(field(&from_file, "PKCS#8:"), field(&default_hash, "PKCS#8:"));
}

#[test]
fn cli_rejects_truncated_peer() {
    let a = stdout_of(&run(&[
        "derive",
        "--passphrase",
        "alpha",
        "--salt",
        "salt-a",
        "--iterations",
        "100",
    ]));
    let mut peer = field(&a, "SPKI:");
    peer.truncate(peer.len() - 2);

    let output = run(&["agree", "--private", &field(&a, "PKCS#8:"), "--peer", &peer]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("peer key rejected"), "stderr: {stderr}");
}

#[test]
fn cli_rejects_zero_iterations() {
    let output = run(&["demo", "--iterations", "0"]);
    assert_eq!(output.status.code(), Some(1));
}
