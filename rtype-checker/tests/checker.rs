use std::fs;

use rtype_checker::{
    check_file, check_source, reveal_variable, BaseType, CheckOptions, Checker, DiagnosticLevel,
    RegistryError,
};
use tempfile::tempdir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn warning_messages(source: &str) -> Vec<String> {
    check_source(source)
        .warnings
        .into_iter()
        .map(|warning| warning.message)
        .collect()
}

#[test]
fn warns_when_a_variable_changes_type() {
    init_logging();
    let result = check_source("x <- 5\nx <- \"hello\"");
    assert!(result.errors.is_empty());
    assert_eq!(result.warnings.len(), 1);

    let warning = &result.warnings[0];
    assert_eq!(warning.level, DiagnosticLevel::Warning);
    assert_eq!(warning.variable.as_deref(), Some("x"));
    assert_eq!(
        warning.message,
        "variable reassigned with different type: was integer, now character"
    );
    assert_eq!((warning.line, warning.col), (2, 3));
}

#[test]
fn same_base_type_is_not_drift() {
    assert!(warning_messages("x <- 5\nx <- 10").is_empty());
    assert!(warning_messages("x <- c(1L)\nx <- 1:3").is_empty());
}

#[test]
fn three_assignment_chain_compares_against_the_preceding_type() {
    init_logging();
    let result = check_source("x <- 5; x <- \"a\"; x <- TRUE");
    let warnings: Vec<_> = result
        .warnings
        .iter()
        .map(|warning| (warning.line, warning.col, warning.message.as_str()))
        .collect();
    assert_eq!(
        warnings,
        vec![
            (
                1,
                11,
                "variable reassigned with different type: was integer, now character"
            ),
            (
                1,
                21,
                "variable reassigned with different type: was character, now logical"
            ),
        ]
    );
}

#[test]
fn unknown_types_never_warn() {
    assert!(warning_messages("x <- some_unrecognized_call()\nx <- another_call()").is_empty());
    assert!(warning_messages("x <- mystery()\nx <- 1").is_empty());
    assert!(warning_messages("x <- 1\nx <- mystery()\nx <- 1").is_empty());
}

#[test]
fn right_arrow_assignments_participate_in_drift() {
    let result = check_source("5 -> x\n\"a\" -> x");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].variable.as_deref(), Some("x"));
    assert_eq!((result.warnings[0].line, result.warnings[0].col), (2, 5));
}

#[test]
fn malformed_source_is_a_single_error() {
    let result = check_source("x <- 5\nmean(x)\ny <-");
    assert_eq!(result.errors.len(), 1);
    assert!(result.warnings.is_empty());
    assert!(result.info.is_empty());
    assert!(result.final_context.is_empty());

    let error = &result.errors[0];
    assert_eq!((error.line, error.col), (0, 0));
    assert!(error.message.contains("unexpected end of input"), "{}", error.message);
}

#[test]
fn data_table_walrus_updates_are_not_parse_errors() {
    let result = check_source("dt <- data.table(a = 1L)\ndt[, b := 2]\ndt <- data.table(a = 2L)");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert!(result.warnings.is_empty());
    assert_eq!(
        result.final_context.lookup("dt").map(|d| d.base_type.clone()),
        Some(BaseType::DataTable)
    );
    assert!(result.final_context.lookup("b").is_none());
}

#[test]
fn sources_without_assignments_are_clean() {
    let result = check_source("print(1)\nmean(c(1, 2))\n# comment only");
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.final_context.is_empty());
}

#[test]
fn statistical_calls_produce_info_notes() {
    let result = check_source("m <- mean(x)\ns <- sd(x)\np <- paste(m)");
    let info: Vec<_> = result
        .info
        .iter()
        .map(|note| (note.line, note.col, note.message.as_str()))
        .collect();
    assert_eq!(
        info,
        vec![
            (1, 6, "mean() expects numeric input"),
            (2, 6, "sd() expects numeric input"),
        ]
    );
}

#[test]
fn checking_twice_yields_identical_diagnostics() {
    let checker = Checker::default();
    let source = "x <- 1\nx <- 'a'\ny <- median(z)\ny <- TRUE";
    let first = checker.check_source(source);
    let second = checker.check_source(source);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.info, second.info);
}

#[test]
fn strict_mode_has_no_effect() {
    let source = "x <- 1\nx <- 'a'\nv <- var(x)";
    let lenient = Checker::new(CheckOptions::default()).check_source(source);
    let strict = Checker::new(CheckOptions {
        strict: true,
        ..CheckOptions::default()
    })
    .check_source(source);
    assert_eq!(lenient.warnings, strict.warnings);
    assert_eq!(lenient.info, strict.info);
}

#[test]
fn final_context_keeps_first_assignment_order() {
    let result = check_source("a <- 1L\nb <- 'x'\na <- 2L");
    let names: Vec<_> = result.final_context.names().collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn registered_custom_types_drive_drift() {
    let checker = Checker::try_new(CheckOptions {
        custom_types: vec!["money".to_string()],
        ..CheckOptions::default()
    })
    .expect("valid custom type");
    let result = checker
        .check_source("price <- structure(9.99, class = \"money\")\nprice <- 9.99");
    assert_eq!(
        result.warnings[0].message,
        "variable reassigned with different type: was money, now numeric"
    );
}

#[test]
fn rejects_custom_types_shadowing_builtins() {
    let error = Checker::try_new(CheckOptions {
        custom_types: vec!["integer".to_string()],
        ..CheckOptions::default()
    })
    .expect_err("builtin tag");
    assert_eq!(error, RegistryError::Builtin("integer".to_string()));

    // The infallible constructor skips the bad tag.
    let checker = Checker::new(CheckOptions {
        custom_types: vec!["integer".to_string(), "1bad".to_string()],
        ..CheckOptions::default()
    });
    assert_eq!(checker.registry().custom_tags().count(), 0);
}

#[test]
fn checks_files_and_reports_read_failures() {
    let tmp = tempdir().expect("tempdir");
    let script = tmp.path().join("drift.R");
    fs::write(&script, "x <- TRUE\nx <- 2.5\n").expect("write script");

    let result = check_file(&script);
    assert_eq!(result.warnings.len(), 1);

    let by_flag = Checker::default().check_input(&script.to_string_lossy(), true);
    assert_eq!(by_flag.warnings, result.warnings);

    let missing = check_file(tmp.path().join("missing.R"));
    assert_eq!(missing.errors.len(), 1);
    assert_eq!((missing.errors[0].line, missing.errors[0].col), (0, 0));
    assert!(missing.errors[0].message.contains("failed to read"));
}

#[test]
fn check_input_treats_text_as_source_without_the_flag() {
    let result = Checker::default().check_input("x <- 1\nx <- 'a'", false);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn reveals_final_types() {
    let source = "df <- data.frame(a = 1L, b = 'x')\ncol <- df$b\nf <- function(x) x";
    assert_eq!(
        reveal_variable(source, "df").map(|d| d.describe()),
        Some("data_frame{a: integer, b: character}".to_string())
    );
    assert_eq!(
        reveal_variable(source, "col").map(|d| d.base_type),
        Some(BaseType::Character)
    );
    assert_eq!(
        reveal_variable(source, "f").map(|d| d.describe()),
        Some("function(x)".to_string())
    );
    assert!(reveal_variable(source, "nope").is_none());
}

#[test]
fn check_results_serialize_to_json() {
    let result = check_source("x <- 1\nx <- 'a'");
    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["warnings"][0]["level"], "warning");
    assert_eq!(json["warnings"][0]["variable"], "x");
    assert_eq!(json["final_context"]["x"]["base_type"], "character");
}
