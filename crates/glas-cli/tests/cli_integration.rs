//! CLI integration tests for the `glas` binary.
//!
//! These tests run the compiled binary via `std::process::Command`. Each
//! test spawns a fresh process with `GLAS_CONFIG` pointing at a
//! nonexistent path so the config loader falls back to defaults.

use std::process::Command;

/// Build a `Command` pointing at the compiled `glas` binary.
///
/// Sets `GLAS_CONFIG` to a nonexistent path so a real user config in
/// `~/.glas/config.json` is never picked up.
fn glas_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_glas"));
    cmd.env("GLAS_CONFIG", "/tmp/.glas-test-nonexistent-config.json");
    // Suppress tracing output so test assertions only match program output.
    cmd.env("RUST_LOG", "off");
    cmd
}

// ── 1. Version and help ─────────────────────────────────────────────────

#[test]
fn version_output() {
    let output = glas_bin()
        .arg("--version")
        .output()
        .expect("failed to run glas");

    assert!(output.status.success(), "exit code should be 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("glas") && stdout.contains("0.1.0"),
        "version output should contain 'glas' and '0.1.0', got: {stdout}"
    );
}

#[test]
fn help_output() {
    let output = glas_bin().arg("--help").output().expect("failed to run glas");

    assert!(output.status.success(), "exit code should be 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("glas voice command CLI"),
        "help output should contain the CLI description, got: {stdout}"
    );
}

#[test]
fn unknown_subcommand_fails() {
    let output = glas_bin()
        .arg("this-subcommand-does-not-exist")
        .output()
        .expect("failed to run glas");

    assert!(
        !output.status.success(),
        "unknown subcommand should return non-zero exit code"
    );
}

// ── 2. match ────────────────────────────────────────────────────────────

#[test]
fn match_navigation() {
    let output = glas_bin()
        .args(["match", "du-mă", "la", "facturi"])
        .output()
        .expect("failed to run glas");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["actionType"], "navigate");
    assert_eq!(value["params"]["path"], "/invoices");
}

#[test]
fn match_amount_normalizes_decimal_comma() {
    let output = glas_bin()
        .args(["match", "25,50 lei"])
        .output()
        .expect("failed to run glas");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["actionType"], "amount");
    assert_eq!(value["params"]["value"], "25.50");
}

#[test]
fn match_without_result_prints_no_match() {
    let output = glas_bin()
        .args(["match", "vremea", "de", "mâine"])
        .output()
        .expect("failed to run glas");

    assert!(output.status.success(), "a non-match is not an error");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "no match");
}

#[test]
fn match_requires_an_utterance() {
    let output = glas_bin().arg("match").output().expect("failed to run glas");
    assert!(!output.status.success());
}

// ── 3. grammar ──────────────────────────────────────────────────────────

#[test]
fn grammar_lists_patterns() {
    let output = glas_bin().arg("grammar").output().expect("failed to run glas");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nav-invoices"), "got: {stdout}");
    assert!(stdout.contains("calculate-vat"), "got: {stdout}");
}

// ── 4. config ───────────────────────────────────────────────────────────

#[test]
fn explicit_missing_config_fails() {
    let output = glas_bin()
        .args(["grammar", "--config", "/tmp/.glas-test-missing-explicit.json"])
        .output()
        .expect("failed to run glas");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "got: {stderr}");
}

#[test]
fn custom_command_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"grammar":{"custom":[{"id":"open-client","templates":["deschide clientul {name}"],"action":"navigate","params":{"path":"/partners"}}]}}"#,
    )
    .unwrap();

    let output = glas_bin()
        .env("GLAS_CONFIG", &path)
        .args(["match", "deschide clientul Acme"])
        .output()
        .expect("failed to run glas");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(value["patternId"], "open-client");
    assert_eq!(value["params"]["name"], "acme");
}

// ── 5. simulate ─────────────────────────────────────────────────────────

#[test]
fn simulate_prints_commands_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("session.jsonl");
    std::fs::write(
        &script,
        concat!(
            "{\"type\":\"start\"}\n",
            "{\"type\":\"result\",\"chunks\":[{\"text\":\"caută factura 123\",\"is_final\":true,\"confidence\":0.9}]}\n",
            "{\"type\":\"stop\"}\n",
            "{\"type\":\"end\"}\n",
        ),
    )
    .unwrap();

    let output = glas_bin()
        .arg("simulate")
        .arg(&script)
        .output()
        .expect("failed to run glas");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap();
    let cmd: serde_json::Value = serde_json::from_str(first_line).unwrap();
    assert_eq!(cmd["params"]["query"], "factura 123");
    assert!(stdout.contains("\"state\": \"idle\""), "got: {stdout}");
}

#[test]
fn simulate_missing_script_fails() {
    let output = glas_bin()
        .args(["simulate", "/tmp/.glas-test-no-such-script.jsonl"])
        .output()
        .expect("failed to run glas");
    assert!(!output.status.success());
}
