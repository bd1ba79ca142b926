use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn rtype_binary() -> &'static str {
    env!("CARGO_BIN_EXE_rtype")
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(rtype_binary())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run rtype")
}

#[test]
fn clean_script_passes() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("clean.R"), "x <- 1\nx <- 2\n").expect("write script");

    let output = run_in(tmp.path(), &["check", "clean.R"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("clean.R"), "{stdout}");
    assert!(stdout.contains("No errors found"), "{stdout}");
}

#[test]
fn warnings_only_fail_with_deny_warnings() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("drift.R"), "x <- 5\nx <- \"hello\"\n").expect("write script");

    let output = run_in(tmp.path(), &["check", "drift.R"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("2:3 - variable reassigned with different type: was integer, now character"),
        "{stdout}"
    );

    let denied = run_in(tmp.path(), &["check", "--deny-warnings", "drift.R"]);
    assert!(!denied.status.success());
    let stderr = String::from_utf8_lossy(&denied.stderr);
    assert!(stderr.contains("1 file(s) failed type checking"), "{stderr}");
}

#[test]
fn parse_errors_fail_the_check() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("broken.R"), "x <- 5\ny <-\n").expect("write script");

    let output = run_in(tmp.path(), &["check", "broken.R"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Errors:\n  0:0 - unexpected end of input"), "{stdout}");
}

#[test]
fn walks_directories_for_r_files() {
    let tmp = tempdir().expect("tempdir");
    let scripts = tmp.path().join("scripts");
    fs::create_dir_all(scripts.join("nested")).expect("create dirs");
    fs::write(scripts.join("a.R"), "a <- 1\n").expect("write a.R");
    fs::write(scripts.join("nested").join("b.r"), "b <- 'x'\nb <- TRUE\n").expect("write b.r");
    fs::write(scripts.join("notes.txt"), "not r\n").expect("write notes");

    let output = run_in(tmp.path(), &["check", "--format", "json", "scripts"]);
    assert!(output.status.success());

    let reports: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report");
    let reports = reports.as_array().expect("array of reports");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["path"], "scripts/a.R");
    assert_eq!(reports[0]["final_context"]["a"]["base_type"], "integer");
    assert_eq!(reports[1]["warnings"][0]["variable"], "b");
}

#[test]
fn yaml_output_includes_context() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("y.R"), "df <- data.frame(a = 1L)\n").expect("write script");

    let output = run_in(tmp.path(), &["check", "--format", "yaml", "y.R"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("final_context:"), "{stdout}");
    assert!(stdout.contains("base_type: data_frame"), "{stdout}");
}

#[test]
fn annotated_output_points_at_the_operator() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("drift.R"), "total <- 1\ntotal <- 'one'\n").expect("write script");

    let output = run_in(tmp.path(), &["check", "--format", "annotated", "drift.R"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning: variable reassigned"), "{stderr}");
    assert!(stderr.contains("--> drift.R:2:7"), "{stderr}");
    assert!(stderr.contains("total <- 'one'"), "{stderr}");
    assert!(stderr.contains("            ^"), "{stderr}");
}

#[test]
fn dump_tokens_prints_the_parse_table() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("t.R"), "y <- mean(x)\n").expect("write script");

    let output = run_in(tmp.path(), &["check", "--dump-tokens", "t.R"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("LEFT_ASSIGN"), "{stdout}");
    assert!(stdout.contains("SYMBOL_FUNCTION_CALL"), "{stdout}");
    assert!(stdout.contains("mean() expects numeric input"), "{stdout}");
}

#[test]
fn custom_types_must_not_shadow_builtins() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("c.R"), "x <- 1\n").expect("write script");

    let output = run_in(tmp.path(), &["check", "--custom-type", "integer", "c.R"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid --custom-type"), "{stderr}");
}

#[test]
fn empty_directory_is_an_error() {
    let tmp = tempdir().expect("tempdir");
    let output = run_in(tmp.path(), &["check", "."]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no R files found"));
}
