use std::fmt;

use crate::checker::CheckResult;
use crate::diagnostics::Diagnostic;

/// Info sections longer than this are left out entirely.
pub const MAX_INFO_ENTRIES: usize = 5;

pub fn render_report(result: &CheckResult) -> String {
    Report(result).to_string()
}

struct Report<'a>(&'a CheckResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        f.write_str("Type Check Results\n")?;
        f.write_str("==================\n\n")?;

        if result.errors.is_empty() {
            f.write_str("No errors found\n")?;
        } else {
            write_section(f, "Errors", &result.errors)?;
        }

        if !result.warnings.is_empty() {
            f.write_str("\n")?;
            write_section(f, "Warnings", &result.warnings)?;
        }

        if (1..=MAX_INFO_ENTRIES).contains(&result.info.len()) {
            f.write_str("\n")?;
            write_section(f, "Info", &result.info)?;
        }

        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, entries: &[Diagnostic]) -> fmt::Result {
    writeln!(f, "{title}:")?;
    for entry in entries {
        writeln!(f, "  {entry}")?;
    }
    Ok(())
}
