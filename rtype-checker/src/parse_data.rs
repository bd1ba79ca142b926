use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::ast::{Expr, ExprKind, Module};
use crate::lexer::{Token, TokenKind};

/// One row of the flattened parse table, mirroring R's `getParseData()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRow {
    pub id: usize,
    /// Innermost enclosing expression, `0` at top level.
    pub parent: usize,
    pub token: &'static str,
    pub text: String,
    pub line1: usize,
    pub col1: usize,
    pub line2: usize,
    pub col2: usize,
    pub terminal: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenTable {
    rows: Vec<TokenRow>,
}

impl TokenTable {
    /// Terminal ids are token positions (1-based); expression nodes are
    /// numbered after them in pre-order.
    pub fn build(tokens: &[Token], module: &Module) -> Self {
        let mut builder = TableBuilder {
            tokens,
            token_parents: vec![0; tokens.len()],
            call_tokens: HashSet::new(),
            rows: Vec::new(),
            next_id: tokens.len() + 1,
        };
        for expr in &module.expressions {
            builder.visit(expr, 0);
        }

        let TableBuilder {
            token_parents,
            call_tokens,
            mut rows,
            ..
        } = builder;

        for (index, token) in tokens.iter().enumerate() {
            if token.is_trivia() {
                continue;
            }
            let name = if call_tokens.contains(&index) {
                "SYMBOL_FUNCTION_CALL"
            } else {
                token.kind.parse_data_name()
            };
            rows.push(TokenRow {
                id: index + 1,
                parent: token_parents[index],
                token: name,
                text: token.lexeme.clone(),
                line1: token.line,
                col1: token.column,
                line2: token.end_line,
                col2: token.end_column,
                terminal: true,
            });
        }

        rows.sort_by_key(|row| {
            (
                row.line1,
                row.col1,
                Reverse(row.line2),
                Reverse(row.col2),
                row.terminal,
            )
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[TokenRow] {
        &self.rows
    }

    pub fn row(&self, id: usize) -> Option<&TokenRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn children(&self, id: usize) -> impl Iterator<Item = &TokenRow> {
        self.rows.iter().filter(move |row| row.parent == id)
    }

    pub fn terminals(&self) -> impl Iterator<Item = &TokenRow> {
        self.rows.iter().filter(|row| row.terminal)
    }

    pub fn assignment_operators(&self) -> impl Iterator<Item = &TokenRow> {
        self.terminals().filter(|row| {
            matches!(row.token, "LEFT_ASSIGN" | "RIGHT_ASSIGN" | "EQ_ASSIGN")
        })
    }
}

impl fmt::Display for TokenTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5} {:>5} {:>5} {:>5} {:>5} {:>6} {:<22} {:<5} text",
            "line1", "col1", "line2", "col2", "id", "parent", "token", "term"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>5} {:>5} {:>5} {:>5} {:>5} {:>6} {:<22} {:<5} {}",
                row.line1,
                row.col1,
                row.line2,
                row.col2,
                row.id,
                row.parent,
                row.token,
                if row.terminal { "TRUE" } else { "FALSE" },
                row.text
            )?;
        }
        Ok(())
    }
}

struct TableBuilder<'t> {
    tokens: &'t [Token],
    token_parents: Vec<usize>,
    call_tokens: HashSet<usize>,
    rows: Vec<TokenRow>,
    next_id: usize,
}

impl TableBuilder<'_> {
    fn visit(&mut self, expr: &Expr, parent: usize) {
        let id = self.next_id;
        self.next_id += 1;

        self.rows.push(TokenRow {
            id,
            parent,
            token: "expr",
            text: String::new(),
            line1: expr.span.line,
            col1: expr.span.column,
            line2: expr.span.end_line,
            col2: expr.span.end_column,
            terminal: false,
        });

        // Children visited afterwards claim their own tokens.
        for index in expr.tokens.clone() {
            if index < self.token_parents.len() {
                self.token_parents[index] = id;
            }
        }

        if let ExprKind::Call(call) = &expr.kind {
            if matches!(
                call.callee.kind,
                ExprKind::Identifier(_) | ExprKind::Namespace(_)
            ) {
                let name_index = call.callee.tokens.end - 1;
                if self
                    .tokens
                    .get(name_index)
                    .is_some_and(|token| token.kind == TokenKind::Identifier)
                {
                    self.call_tokens.insert(name_index);
                }
            }
        }

        for child in expr.children() {
            self.visit(child, id);
        }
    }
}
