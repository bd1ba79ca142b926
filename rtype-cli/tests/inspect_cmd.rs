use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn rtype_binary() -> &'static str {
    env!("CARGO_BIN_EXE_rtype")
}

fn infer(expression: &str) -> String {
    let output = Command::new(rtype_binary())
        .args(["infer", expression])
        .output()
        .expect("run rtype infer");
    assert!(
        output.status.success(),
        "infer {expression:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn infers_expression_types() {
    assert_eq!(infer("c(1L, 2L)"), "integer");
    assert_eq!(infer("2.5"), "numeric");
    assert_eq!(infer("data.frame(a = 1L, b = 'x')"), "data_frame{a: integer, b: character}");
    assert_eq!(infer("function(x, y) x"), "function(x, y)");
    assert_eq!(infer("mystery()"), "unknown");
}

#[test]
fn infer_json_prints_the_descriptor() {
    let output = Command::new(rtype_binary())
        .args(["infer", "--json", "NULL"])
        .output()
        .expect("run rtype infer");
    assert!(output.status.success());
    let descriptor: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json descriptor");
    assert_eq!(descriptor["base_type"], "null");
    assert_eq!(descriptor["nullable"], true);
}

#[test]
fn infer_rejects_unparsable_expressions() {
    let output = Command::new(rtype_binary())
        .args(["infer", "x <-"])
        .output()
        .expect("run rtype infer");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot parse expression"), "{stderr}");
}

#[test]
fn reveals_the_final_type_of_a_variable() {
    let tmp = tempdir().expect("tempdir");
    let script = tmp.path().join("reveal.R");
    fs::write(&script, "x <- 1\nx <- 'a'\n").expect("write script");

    let output = Command::new(rtype_binary())
        .arg("reveal")
        .arg(&script)
        .arg("x")
        .output()
        .expect("run rtype reveal");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "x: character");

    let missing = Command::new(rtype_binary())
        .arg("reveal")
        .arg(&script)
        .arg("y")
        .output()
        .expect("run rtype reveal");
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("`y` is never assigned"));
}

#[test]
fn reveal_honours_custom_types() {
    let tmp = tempdir().expect("tempdir");
    let script = tmp.path().join("money.R");
    fs::write(&script, "price <- structure(1, class = 'money')\n").expect("write script");

    let output = Command::new(rtype_binary())
        .args(["reveal", "--custom-type", "money"])
        .arg(&script)
        .arg("price")
        .output()
        .expect("run rtype reveal");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "price: money");
}

#[test]
fn lists_builtin_groups() {
    let output = Command::new(rtype_binary())
        .arg("builtins")
        .output()
        .expect("run rtype builtins");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("constructors: Vector, list, table and object constructors."),
        "{stdout}"
    );
    assert!(stdout.contains("statistics: Aggregates that expect numeric input."), "{stdout}");
    assert!(stdout.contains("  mean (expects numeric)"), "{stdout}");
    assert!(stdout.contains("  as.integer\n"), "{stdout}");
}

#[test]
fn infer_handles_integer_suffixed_fractions() {
    assert_eq!(infer("1.5L"), "numeric");
    assert_eq!(infer("1e3L"), "integer");
}
