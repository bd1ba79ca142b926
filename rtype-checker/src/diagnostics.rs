use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Info => "info",
        })
    }
}

/// A finding at a 1-based `line`/`col`; `0:0` means no usable position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub line: usize,
    pub col: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
}

impl Diagnostic {
    pub fn has_location(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} - {}", self.line, self.col, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push_error<S: Into<String>>(&mut self, message: S, line: usize, col: usize) {
        self.push(DiagnosticLevel::Error, message, line, col, None);
    }

    pub fn push_warning<S: Into<String>>(
        &mut self,
        message: S,
        line: usize,
        col: usize,
        variable: Option<String>,
    ) {
        self.push(DiagnosticLevel::Warning, message, line, col, variable);
    }

    pub fn push_info<S: Into<String>>(&mut self, message: S, line: usize, col: usize) {
        self.push(DiagnosticLevel::Info, message, line, col, None);
    }

    fn push<S: Into<String>>(
        &mut self,
        level: DiagnosticLevel,
        message: S,
        line: usize,
        col: usize,
        variable: Option<String>,
    ) {
        self.entries.push(Diagnostic {
            level,
            message: message.into(),
            line,
            col,
            variable,
        });
    }

    /// Splits into errors, warnings and info, keeping emission order.
    pub fn into_levels(self) -> (Vec<Diagnostic>, Vec<Diagnostic>, Vec<Diagnostic>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut info = Vec::new();
        for diagnostic in self.entries {
            match diagnostic.level {
                DiagnosticLevel::Error => errors.push(diagnostic),
                DiagnosticLevel::Warning => warnings.push(diagnostic),
                DiagnosticLevel::Info => info.push(diagnostic),
            }
        }
        (errors, warnings, info)
    }
}
