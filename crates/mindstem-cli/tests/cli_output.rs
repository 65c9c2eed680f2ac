//! Process-level tests for the `mindstem` binary
//!
//! Stdout is a pipe here, so color and TTY detection take their
//! non-terminal paths.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const OUTLINE: &str = "Launch\n- Build\n  - Parser\n  - Layout\n- Ship";

fn run_cli(args: &[&str], stdin: &str, dir: &Path) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mindstem"))
        .args(args)
        .current_dir(dir)
        .env("MINDSTEM_LOG_LEVEL", "off")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn mindstem");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_render_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&["render"], OUTLINE, dir.path());

    assert!(out.status.success());
    let svg = String::from_utf8(out.stdout).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">Launch</tspan>"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_preview_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&["preview", "--style", "ascii"], OUTLINE, dir.path());

    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.is_ascii());
    assert!(text.contains("| Launch |"));
    assert!(text.contains("Parser"));
    assert!(!text.contains('\x1b'));
}

#[test]
fn test_export_to_stdout_pipe() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&["export", "-o", "-", "--scale", "0.5"], OUTLINE, dir.path());

    assert!(out.status.success());
    assert_eq!(&out.stdout[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_export_prints_generated_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&["export", "--scale", "0.5"], OUTLINE, dir.path());

    assert!(out.status.success());
    let printed = String::from_utf8(out.stdout).unwrap();
    let path = Path::new(printed.trim());
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("Launch-"));
    assert!(dir.path().join(path).exists());
}

#[test]
fn test_inspect_blank_input() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&["inspect"], "\n  \n", dir.path());

    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["node_count"], 0);
    assert!(json["tree"].is_null());
}

#[test]
fn test_bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli(&["render", "--config", "missing.json"], OUTLINE, dir.path());

    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("Error:"));
    assert!(stderr.contains("missing.json"));
}
