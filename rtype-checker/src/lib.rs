mod ast;
mod checker;
mod context;
mod diagnostics;
mod extract;
mod infer;
mod lexer;
mod parse_data;
mod parser;
mod report;
mod source;
mod types;
mod value;

pub use crate::ast::{
    Argument, AssignExpr, AssignOperator, BinaryExpr, BinaryOperator, CallExpr, Expr, ExprKind,
    ForExpr, FormulaExpr, FunctionExpr, IfExpr, IndexExpr, Literal, MemberExpr, Module,
    NamespaceAccess, Parameter, SourceSpan, UnaryExpr, UnaryOperator, WhileExpr,
};
pub use crate::checker::{
    check_file, check_source, reveal_variable, CheckOptions, CheckResult, Checker,
};
pub use crate::context::{build_context, TypeContext};
pub use crate::diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use crate::extract::{extract_assignments, extract_call_sites, AssignmentRecord, CallSite};
pub use crate::infer::Inferrer;
pub use crate::lexer::{tokenize, Keyword, Lexer, SyntaxError, Token, TokenKind};
pub use crate::parse_data::{TokenRow, TokenTable};
pub use crate::parser::{parse_source, Parser};
pub use crate::report::{render_report, MAX_INFO_ENTRIES};
pub use crate::source::SourceFile;
pub use crate::types::{BaseType, RegistryError, TypeDescriptor, TypeRegistry};
pub use crate::value::{DataFrame, TableFlavour, Value};

pub mod builtins;
