use std::path::Path;

use serde::Serialize;

use crate::builtins;
use crate::context::TypeContext;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::extract::{extract_assignments, extract_call_sites};
use crate::infer::Inferrer;
use crate::parser::parse_source;
use crate::source::SourceFile;
use crate::types::{RegistryError, TypeDescriptor, TypeRegistry};

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Reserved; currently has no effect on checking.
    pub strict: bool,
    /// Class names inferred as their own type instead of `s3`/`s4`.
    pub custom_types: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub info: Vec<Diagnostic>,
    pub final_context: TypeContext,
}

impl CheckResult {
    fn from_diagnostics(diagnostics: Diagnostics, final_context: TypeContext) -> Self {
        let (errors, warnings, info) = diagnostics.into_levels();
        Self {
            errors,
            warnings,
            info,
            final_context,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Errors, then warnings, then info.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.info)
    }
}

/// Runs the check pipeline. A checker holds no per-check state, so one
/// instance can check any number of inputs.
#[derive(Debug, Clone)]
pub struct Checker {
    options: CheckOptions,
    registry: TypeRegistry,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(CheckOptions::default())
    }
}

impl Checker {
    /// Builds a checker, ignoring custom types that cannot be registered.
    pub fn new(options: CheckOptions) -> Self {
        let mut registry = TypeRegistry::new();
        for tag in &options.custom_types {
            if let Err(error) = registry.register(tag) {
                log::warn!("ignoring custom type: {error}");
            }
        }
        Self { options, registry }
    }

    pub fn try_new(options: CheckOptions) -> Result<Self, RegistryError> {
        let registry = TypeRegistry::with_tags(&options.custom_types)?;
        Ok(Self { options, registry })
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn inferrer(&self) -> Inferrer<'_> {
        Inferrer::new(&self.registry)
    }

    /// `input` is a path when `is_file` is set, R source text otherwise.
    pub fn check_input(&self, input: &str, is_file: bool) -> CheckResult {
        if is_file {
            self.check_file(Path::new(input))
        } else {
            self.check_source(input)
        }
    }

    pub fn check_file(&self, path: &Path) -> CheckResult {
        match SourceFile::from_path(path) {
            Ok(source) => self.check_source(&source.contents),
            Err(error) => {
                log::debug!("{error:#}");
                let mut diagnostics = Diagnostics::new();
                diagnostics.push_error(format!("{error:#}"), 0, 0);
                CheckResult::from_diagnostics(diagnostics, TypeContext::new())
            }
        }
    }

    pub fn check_source(&self, source: &str) -> CheckResult {
        let mut diagnostics = Diagnostics::new();

        let (tokens, module) = match parse_source(source) {
            Ok(parsed) => parsed,
            Err(error) => {
                log::debug!("parse failed: {error}");
                diagnostics.push_error(error.to_string(), 0, 0);
                return CheckResult::from_diagnostics(diagnostics, TypeContext::new());
            }
        };

        let assignments = extract_assignments(&tokens, &module);
        log::debug!(
            "{} tokens, {} assignments",
            tokens.len(),
            assignments.len()
        );

        let inferrer = self.inferrer();
        let mut context = TypeContext::new();
        for assignment in &assignments {
            let previous = context.bind(assignment, &inferrer);
            let (Some(previous), Some(current)) = (previous, context.lookup(&assignment.variable))
            else {
                continue;
            };
            if !previous.is_unknown() && !current.is_unknown() && !previous.same_type(current) {
                diagnostics.push_warning(
                    format!(
                        "variable reassigned with different type: was {}, now {}",
                        previous.base_type, current.base_type
                    ),
                    assignment.line,
                    assignment.col,
                    Some(assignment.variable.clone()),
                );
            }
        }

        for site in extract_call_sites(&module) {
            let expected = builtins::lookup(&site.callee).and_then(|f| f.argument.as_ref());
            if let Some(argument) = expected {
                diagnostics.push_info(
                    format!("{}() expects {argument} input", site.callee),
                    site.line,
                    site.col,
                );
            }
        }

        CheckResult::from_diagnostics(diagnostics, context)
    }

    /// Final inferred type of `name` after checking `source`.
    pub fn reveal(&self, source: &str, name: &str) -> Option<TypeDescriptor> {
        self.check_source(source).final_context.lookup(name).cloned()
    }
}

pub fn check_source(source: &str) -> CheckResult {
    Checker::default().check_source(source)
}

pub fn check_file(path: impl AsRef<Path>) -> CheckResult {
    Checker::default().check_file(path.as_ref())
}

pub fn reveal_variable(source: &str, name: &str) -> Option<TypeDescriptor> {
    Checker::default().reveal(source, name)
}
