//! Integration tests for the tmsim-cli binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const FLIP: &str = "alphabet:
0 1 #
tape:
# 0 1
starting state:
flip
accepting states:
done
transitions:
flip 0 1 > flip
flip 1 0 > flip
flip # # < done
";

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tmsim-cli"))
}

fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = binary()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run tmsim-cli");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

#[test]
fn auto_run_builtin_accepts() {
    let output = binary()
        .args(["--builtin", "div3", "--input", "1001", "--run", "0"])
        .output()
        .expect("failed to run tmsim-cli");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Accepted!"));
    assert!(stdout.contains("Final tape: # 1 0 0 1 #"));
}

#[test]
fn auto_run_program_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "flip.tm", FLIP);

    let output = binary()
        .args(["--program", program.to_str().unwrap(), "--run", "0"])
        .output()
        .expect("failed to run tmsim-cli");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Accepted!"));
    assert!(stdout.contains("Final tape: # 1 0 #"));
}

#[test]
fn auto_run_respects_step_ceiling() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(
        temp_dir.path(),
        "forever.tm",
        "starting state:\nq0\ntransitions:\nq0 # # > q0\n",
    );

    let output = binary()
        .args([
            "--program",
            program.to_str().unwrap(),
            "--run",
            "0",
            "--max-steps",
            "20",
        ])
        .output()
        .expect("failed to run tmsim-cli");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Step limit reached"));
    assert!(stdout.contains("Steps: 20"));
}

#[test]
fn console_reads_piped_commands() {
    let output = run_with_stdin(&["--builtin", "end2zero"], "s\ninput 11\nrun 0\nq\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Current Input Tape: # 1 0 1 0"));
    assert!(stdout.contains("Current Input Tape: # 1 1"));
    assert!(stdout.contains("Rejected!"));
    // Piped sessions never print the interactive menu
    assert!(!stdout.contains(">>>"));
}

#[test]
fn dump_prints_transitions() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "flip.tm", FLIP);

    let output = binary()
        .args(["--program", program.to_str().unwrap(), "--dump"])
        .output()
        .expect("failed to run tmsim-cli");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "(flip, 0) -> (1, >, flip)\n(flip, 1) -> (0, >, flip)\n(flip, #) -> (#, <, done)\n"
    );
}

#[test]
fn json_prints_definition() {
    let output = binary()
        .args(["--builtin", "palindrome", "--json"])
        .output()
        .expect("failed to run tmsim-cli");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["start_state"], "q0");
    assert_eq!(json["accepting_states"][0], "acc");
}

#[test]
fn list_shows_builtins() {
    let output = binary().arg("--list").output().unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("1. end2zero"));
    assert!(stdout.contains("2. div3"));
    assert!(stdout.contains("3. palindrome"));
}

#[test]
fn malformed_program_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(
        temp_dir.path(),
        "bad.tm",
        "starting state:\nq0\ntransitions:\nq0 0 1 >\n",
    );

    let output = binary()
        .args(["--program", program.to_str().unwrap(), "--run", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error:"));
}

#[test]
fn unknown_builtin_lists_available() {
    let output = binary().args(["--builtin", "nope"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("end2zero, div3, palindrome"));
}

#[test]
fn window_above_limit_is_rejected() {
    let output = binary()
        .args([
            "--builtin",
            "div3",
            "--run",
            "0",
            "--window",
            "18446744073709551615",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--window"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn program_read_from_stdin() {
    let output = run_with_stdin(&["--program", "-", "--run", "0"], FLIP);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Accepted!"));
    assert!(stdout.contains("Final tape: # 1 0 #"));
}

#[test]
fn dir_lists_descriptions() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_temp_file(temp_dir.path(), "flip.tm", FLIP);
    create_temp_file(temp_dir.path(), "broken.tm", "states:\nq0\n");
    create_temp_file(temp_dir.path(), "notes.txt", FLIP);

    let output = binary()
        .args(["--dir", temp_dir.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stdout.contains("flip.tm - start: flip, states: 0, transitions: 3"));
    assert!(!stdout.contains("notes.txt"));
    assert!(stderr.contains("broken.tm"));
}
