use serde::Serialize;

use crate::ast::{AssignOperator, Expr, ExprKind, Module, NamespaceAccess};
use crate::lexer::Token;

/// One binding of a plain variable, positioned at its assignment operator.
#[derive(Debug, Clone)]
pub struct AssignmentRecord {
    pub variable: String,
    pub line: usize,
    pub col: usize,
    pub operator: AssignOperator,
    /// Value tokens joined with single spaces; display only.
    pub value_text: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    pub callee: String,
    pub line: usize,
    pub col: usize,
    pub arguments: usize,
}

/// Collects every assignment in `module`, nested ones included, in operator
/// order. Assignments whose target is not a bare name (`x[1] <- 2`,
/// `names(x) <- ...`, `df$a <- ...`) are skipped.
pub fn extract_assignments(tokens: &[Token], module: &Module) -> Vec<AssignmentRecord> {
    let mut records = Vec::new();
    for expr in &module.expressions {
        expr.walk(&mut |node| {
            let ExprKind::Assign(assign) = &node.kind else {
                return;
            };
            let ExprKind::Identifier(variable) = &assign.target().kind else {
                log::debug!(
                    "skipping assignment at {}:{} with a non-symbol target",
                    assign.operator_span.line,
                    assign.operator_span.column
                );
                return;
            };
            let value = assign.value();
            records.push(AssignmentRecord {
                variable: variable.clone(),
                line: assign.operator_span.line,
                col: assign.operator_span.column,
                operator: assign.operator,
                value_text: token_text(tokens, value),
                value: value.clone(),
            });
        });
    }
    records.sort_by_key(|record| (record.line, record.col));
    records
}

pub fn extract_call_sites(module: &Module) -> Vec<CallSite> {
    let mut sites = Vec::new();
    for expr in &module.expressions {
        expr.walk(&mut |node| {
            if let ExprKind::Call(call) = &node.kind {
                if let ExprKind::Identifier(name)
                | ExprKind::Namespace(NamespaceAccess { name, .. }) = &call.callee.kind
                {
                    sites.push(CallSite {
                        callee: name.clone(),
                        line: call.callee.span.line,
                        col: call.callee.span.column,
                        arguments: call.arguments.len(),
                    });
                }
            }
        });
    }
    sites.sort_by_key(|site| (site.line, site.col));
    sites
}

fn token_text(tokens: &[Token], expr: &Expr) -> String {
    tokens
        .get(expr.tokens.clone())
        .unwrap_or_default()
        .iter()
        .filter(|token| !token.is_trivia())
        .map(|token| token.lexeme.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
