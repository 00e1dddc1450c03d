use std::io::Write;
use std::process::{Command, Output, Stdio};

fn sizes_select(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sizes-select"))
        .args(args)
        .output()
        .unwrap()
}

fn sizes_select_stdin(input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sizes-select"))
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn selects_for_viewport() {
    let sizes = "(max-width: 600px) 100vw, (max-width: 1200px) 50vw, 600px";

    let output = sizes_select(&[sizes, "--width", "500"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "100vw");

    let output = sizes_select(&[sizes, "--width", "900"]);
    assert_eq!(stdout(&output), "50vw");

    let output = sizes_select(&[sizes]);
    assert_eq!(stdout(&output), "50vw");
}

#[test]
fn reports_parse_errors_on_stderr() {
    let output = sizes_select(&["50%, 10px"]);
    assert_eq!(stdout(&output), "10px");
    assert!(String::from_utf8_lossy(&output.stderr).contains("parse error in argument: candidate 0"));

    let output = sizes_select(&["50%, 10px", "--quiet"]);
    assert_eq!(stdout(&output), "10px");
    assert!(output.stderr.is_empty());
}

#[test]
fn prints_tokens() {
    let output = sizes_select(&["(min-width:0) 1px, calc(2px + 3px)", "--tokens"]);
    assert_eq!(
        stdout(&output),
        "0: [\"(min-width:0)\", \"1px\"]\n1: [\"calc(2px + 3px)\"]"
    );
}

#[test]
fn reads_from_stdin() {
    let output = sizes_select_stdin(b"/* */ 42em\n");
    assert_eq!(stdout(&output), "42em");
}

#[test]
fn deeply_nested_condition_from_stdin() {
    let sizes = format!("{}width{} 1px, 2px", "(".repeat(100_000), ")".repeat(100_000));

    let output = sizes_select_stdin(sizes.as_bytes());
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2px");
}

#[test]
fn rejects_negative_viewport() {
    let output = sizes_select(&["1px", "--width=-5"]);
    assert!(!output.status.success());
}
