use std::io::Write;
use std::process::Output;

use assert_cmd::Command;

fn slate(args: &[&str]) -> Output {
    Command::cargo_bin("slate")
        .expect("slate binary is built")
        .args(args)
        .output()
        .expect("failed to spawn slate binary")
}

fn tree_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn compile_prints_sexpr_ir() {
    let file = tree_file(r#"[["tmpl", "tag", "p", [], [["tmpl", "text", "hi"]]]]"#);
    let output = slate(&["compile", file.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        r#"(sequence (html:tag "p" (html:attrs) (sequence (sequence (static "hi")))))"#
    );
}

#[test]
fn compile_json_honours_safe_flag_and_output_file() {
    let file = tree_file(r#"[["tmpl", "output", true, "name", []]]"#);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ir.json");

    let output = slate(&[
        "compile",
        file.path().to_str().unwrap(),
        "--format",
        "json",
        "--safe",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            "sequence",
            ["sequence", ["dynamic", "Slate::Helpers.escape_html_safe((name))"], ["sequence"]]
        ])
    );
}

#[test]
fn unknown_engine_fails_with_report() {
    let file = tree_file(r#"[["tmpl", "embedded", "klingon", ["tmpl", "text", "x"]]]"#);
    let output = slate(&["compile", file.path().to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown embedded engine 'klingon'"), "stderr: {}", stderr);
}

#[test]
fn missing_input_fails() {
    let output = slate(&["compile", "/definitely/not/here.json"]);
    assert!(!output.status.success());
}

#[test]
fn engines_lists_builtins() {
    let output = slate(&["engines"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["markdown", "coffee", "erb", "liquid", "ruby"] {
        assert!(stdout.contains(name), "missing {} in:\n{}", name, stdout);
    }
}
