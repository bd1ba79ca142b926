use rtype_checker::{
    check_source, render_report, CheckResult, Diagnostic, DiagnosticLevel, MAX_INFO_ENTRIES,
};

fn info_entries(count: usize) -> Vec<Diagnostic> {
    (1..=count)
        .map(|line| Diagnostic {
            level: DiagnosticLevel::Info,
            message: "mean() expects numeric input".to_string(),
            line,
            col: 1,
            variable: None,
        })
        .collect()
}

fn with_info(count: usize) -> CheckResult {
    CheckResult {
        info: info_entries(count),
        ..CheckResult::default()
    }
}

#[test]
fn clean_result_reports_no_errors() {
    let report = render_report(&CheckResult::default());
    assert!(report.starts_with("Type Check Results\n"));
    assert!(report.contains("No errors found"));
    assert!(!report.contains("Warnings:"));
    assert!(!report.contains("Info:"));
}

#[test]
fn lists_errors_and_warnings_with_positions() {
    let errors = render_report(&check_source("x <-"));
    assert!(errors.contains("Errors:\n  0:0 - unexpected end of input"), "{errors}");
    assert!(!errors.contains("No errors found"));

    let warnings = render_report(&check_source("x <- 5\nx <- \"hello\""));
    assert!(warnings.contains("No errors found"));
    assert!(
        warnings.contains(
            "Warnings:\n  2:3 - variable reassigned with different type: was integer, now character\n"
        ),
        "{warnings}"
    );
}

#[test]
fn shows_short_info_sections() {
    let report = render_report(&with_info(3));
    assert!(report.contains("Info:\n  1:1 - mean() expects numeric input"));
    assert_eq!(report.matches("expects numeric input").count(), 3);

    let boundary = render_report(&with_info(MAX_INFO_ENTRIES));
    assert!(boundary.contains("Info:"));
}

#[test]
fn omits_long_info_sections_entirely() {
    let report = render_report(&with_info(6));
    assert!(!report.contains("Info:"));
    assert!(!report.contains("expects numeric input"));
}
