use serde_json::{Map, Value as JsonValue};

use crate::ast::{
    BinaryOperator, CallExpr, Expr, ExprKind, Literal, MemberExpr, Module, UnaryOperator,
};
use crate::builtins::{self, CallRule};
use crate::context::TypeContext;
use crate::parser::parse_source;
use crate::types::{BaseType, TypeDescriptor, TypeRegistry};
use crate::value::{TableFlavour, Value};

/// Arguments of tabular constructors that configure the table rather than
/// add a column.
const TABLE_OPTIONS: &[&str] = &[
    "stringsAsFactors",
    "check.names",
    "check.rows",
    "row.names",
    "key",
    "keep.rownames",
    ".name_repair",
    ".rows",
];

/// Best-effort type inference over runtime values and parsed expressions.
///
/// Inference never fails: anything the rule tables do not cover is
/// `unknown`.
#[derive(Debug, Clone, Copy)]
pub struct Inferrer<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Inferrer<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        self.registry
    }

    pub fn infer_value(&self, value: &Value) -> TypeDescriptor {
        let sized = |base_type| {
            TypeDescriptor::new(base_type).with_attribute("length", value.len())
        };
        match value {
            Value::Null => TypeDescriptor::null(),
            Value::Logical(_) => sized(BaseType::Logical),
            Value::Integer(_) => sized(BaseType::Integer),
            Value::Double(_) => sized(BaseType::Numeric),
            Value::Complex(_) => sized(BaseType::Complex),
            Value::Character(_) => sized(BaseType::Character),
            Value::Raw(_) => sized(BaseType::Raw),
            Value::List(_) => sized(BaseType::List),
            Value::DataFrame(frame) => {
                let base_type = match frame.flavour {
                    TableFlavour::DataFrame => BaseType::DataFrame,
                    TableFlavour::DataTable => BaseType::DataTable,
                    TableFlavour::Tibble => BaseType::Tibble,
                };
                let columns = frame
                    .columns
                    .iter()
                    .map(|(name, column)| {
                        let tag = self.infer_value(column).base_type.to_string();
                        (name.clone(), JsonValue::String(tag))
                    })
                    .collect::<Map<_, _>>();
                TypeDescriptor::new(base_type).with_attribute("columns", columns)
            }
            Value::Function(args) => function_descriptor(args.iter().cloned()),
            Value::Formula(_) => TypeDescriptor::new(BaseType::Formula),
            Value::Environment => TypeDescriptor::new(BaseType::Environment),
            Value::S3 { class, .. } => match class.first() {
                Some(first) => self.classed(first, BaseType::S3),
                None => TypeDescriptor::new(BaseType::S3),
            },
            Value::S4 { class } => self.classed(class, BaseType::S4),
            Value::Reference { class } => {
                TypeDescriptor::new(BaseType::ObjectRef).with_attribute("class", class.as_str())
            }
        }
    }

    /// Parses `text` and infers its last expression; unparsable or empty
    /// text is `unknown`.
    pub fn infer_text(&self, text: &str, context: &TypeContext) -> TypeDescriptor {
        match parse_source(text) {
            Ok((_, module)) => self.infer_module(&module, context),
            Err(error) => {
                log::debug!("cannot infer {text:?}: {error}");
                TypeDescriptor::unknown()
            }
        }
    }

    /// Type of the last top-level expression, `unknown` for an empty module.
    pub fn infer_module(&self, module: &Module, context: &TypeContext) -> TypeDescriptor {
        match module.expressions.last() {
            Some(expr) => self.infer_expr(expr, context),
            None => TypeDescriptor::unknown(),
        }
    }

    pub fn infer_expr(&self, expr: &Expr, context: &TypeContext) -> TypeDescriptor {
        match &expr.kind {
            ExprKind::Literal(literal) => infer_literal(literal),
            ExprKind::Identifier(name) => context
                .lookup(name)
                .cloned()
                .or_else(|| builtins::constant(name).map(TypeDescriptor::new))
                .unwrap_or_else(TypeDescriptor::unknown),
            ExprKind::Call(call) => self.infer_call(call, None, context),
            ExprKind::Unary(unary) => match unary.operator {
                UnaryOperator::Negate | UnaryOperator::Plus => {
                    self.infer_expr(&unary.operand, context)
                }
                UnaryOperator::Not => TypeDescriptor::new(BaseType::Logical),
                UnaryOperator::Help => TypeDescriptor::unknown(),
            },
            ExprKind::Binary(binary) => match &binary.operator {
                BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Power => TypeDescriptor::new(BaseType::Numeric),
                BinaryOperator::Range => TypeDescriptor::new(BaseType::Integer),
                BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::Less
                | BinaryOperator::LessEqual
                | BinaryOperator::Greater
                | BinaryOperator::GreaterEqual
                | BinaryOperator::And
                | BinaryOperator::AndAnd
                | BinaryOperator::Or
                | BinaryOperator::OrOr => TypeDescriptor::new(BaseType::Logical),
                BinaryOperator::Special(op) => match op.as_str() {
                    "%%" | "%/%" => TypeDescriptor::new(BaseType::Numeric),
                    "%in%" => TypeDescriptor::new(BaseType::Logical),
                    "%>%" => self.infer_piped(&binary.left, &binary.right, context),
                    _ => TypeDescriptor::unknown(),
                },
                BinaryOperator::Pipe => self.infer_piped(&binary.left, &binary.right, context),
                BinaryOperator::Help => TypeDescriptor::unknown(),
            },
            ExprKind::Assign(assign) => self.infer_expr(assign.value(), context),
            ExprKind::Formula(_) => TypeDescriptor::new(BaseType::Formula),
            ExprKind::Function(function) => function_descriptor(
                function
                    .parameters
                    .iter()
                    .map(|parameter| parameter.name.clone()),
            ),
            ExprKind::Block(expressions) => match expressions.last() {
                Some(last) => self.infer_expr(last, context),
                None => TypeDescriptor::null(),
            },
            ExprKind::Paren(inner) => self.infer_expr(inner, context),
            ExprKind::Member(member) => self.infer_member(member, context),
            ExprKind::Namespace(_)
            | ExprKind::Index(_)
            | ExprKind::If(_)
            | ExprKind::For(_)
            | ExprKind::While(_)
            | ExprKind::Repeat(_)
            | ExprKind::Break
            | ExprKind::Next => TypeDescriptor::unknown(),
        }
    }

    /// `lhs |> f(...)`: the call with `lhs` spliced in as first argument.
    fn infer_piped(&self, left: &Expr, right: &Expr, context: &TypeContext) -> TypeDescriptor {
        match &right.kind {
            ExprKind::Call(call) => self.infer_call(call, Some(left), context),
            _ => TypeDescriptor::unknown(),
        }
    }

    fn infer_call(
        &self,
        call: &CallExpr,
        piped: Option<&Expr>,
        context: &TypeContext,
    ) -> TypeDescriptor {
        if let ExprKind::Member(member) = &call.callee.kind {
            if member.name == "new" && !member.slot {
                return self.infer_instance(&member.target, context);
            }
            return TypeDescriptor::unknown();
        }

        let Some(name) = call.callee_name() else {
            return TypeDescriptor::unknown();
        };
        let Some(function) = builtins::lookup(name) else {
            return TypeDescriptor::unknown();
        };
        let first = piped.or_else(|| call.positional(0));

        match &function.rule {
            CallRule::Returns(base_type) => TypeDescriptor::new(base_type.clone()),
            CallRule::FirstArgument => match first {
                Some(argument) => {
                    let descriptor = self.infer_expr(argument, context);
                    if name == "c" {
                        let length = call.arguments.len() + usize::from(piped.is_some());
                        descriptor.with_attribute("length", length)
                    } else {
                        descriptor
                    }
                }
                None if name == "c" => TypeDescriptor::null(),
                None => TypeDescriptor::unknown(),
            },
            CallRule::Table(base_type) => {
                let columns = call
                    .arguments
                    .iter()
                    .filter_map(|argument| {
                        let name = argument.name.as_deref()?;
                        if TABLE_OPTIONS.contains(&name) {
                            return None;
                        }
                        let value = argument.value.as_ref()?;
                        let tag = self.infer_expr(value, context).base_type.to_string();
                        Some((name.to_string(), JsonValue::String(tag)))
                    })
                    .collect::<Map<_, _>>();
                TypeDescriptor::new(base_type.clone()).with_attribute("columns", columns)
            }
            CallRule::Classed(class) => self.classed(class, BaseType::S3),
            CallRule::Structure => match call.named("class").and_then(first_string) {
                Some(class) => self.classed(&class, BaseType::S3),
                None => first
                    .map(|argument| self.infer_expr(argument, context))
                    .unwrap_or_else(TypeDescriptor::unknown),
            },
            CallRule::S4Instance => match first.and_then(first_string) {
                Some(class) => self.classed(&class, BaseType::S4),
                None => TypeDescriptor::new(BaseType::S4),
            },
            CallRule::Generator => {
                let generator = TypeDescriptor::new(BaseType::ObjectRef)
                    .with_attribute("generator", true);
                match first
                    .or_else(|| call.named("Class"))
                    .or_else(|| call.named("classname"))
                    .and_then(first_string)
                {
                    Some(class) => generator.with_attribute("class", class),
                    None => generator,
                }
            }
        }
    }

    /// `Generator$new(...)` yields an instance of the generator's class.
    fn infer_instance(&self, target: &Expr, context: &TypeContext) -> TypeDescriptor {
        let generator = self.infer_expr(target, context);
        let instance = TypeDescriptor::new(BaseType::ObjectRef);
        match generator.attribute("class").and_then(JsonValue::as_str) {
            Some(class) if generator.base_type == BaseType::ObjectRef => {
                instance.with_attribute("class", class)
            }
            _ => instance,
        }
    }

    fn infer_member(&self, member: &MemberExpr, context: &TypeContext) -> TypeDescriptor {
        if member.slot {
            return TypeDescriptor::unknown();
        }
        let target = self.infer_expr(&member.target, context);
        if !target.base_type.is_tabular() {
            return TypeDescriptor::unknown();
        }
        target
            .column_tag(&member.name)
            .and_then(|tag| self.registry.resolve(tag))
            .map(TypeDescriptor::new)
            .unwrap_or_else(TypeDescriptor::unknown)
    }

    /// Registered classes become their own type; everything else falls back
    /// to `fallback` with the class recorded as an attribute.
    fn classed(&self, class: &str, fallback: BaseType) -> TypeDescriptor {
        if self.registry.is_registered(class) {
            return TypeDescriptor::new(BaseType::Custom(class.to_string()));
        }
        TypeDescriptor::new(fallback).with_attribute("class", class)
    }
}

fn infer_literal(literal: &Literal) -> TypeDescriptor {
    match literal {
        Literal::Integer(_) | Literal::NaInteger => TypeDescriptor::new(BaseType::Integer),
        Literal::Float(_) | Literal::Inf | Literal::NaN | Literal::NaReal => {
            TypeDescriptor::new(BaseType::Numeric)
        }
        Literal::Complex(_) => TypeDescriptor::new(BaseType::Complex),
        Literal::String(_) | Literal::NaCharacter => TypeDescriptor::new(BaseType::Character),
        Literal::Logical(_) | Literal::Na => TypeDescriptor::new(BaseType::Logical),
        Literal::Null => TypeDescriptor::null(),
    }
}

fn function_descriptor(args: impl Iterator<Item = String>) -> TypeDescriptor {
    let args = args.map(JsonValue::String).collect::<Vec<_>>();
    TypeDescriptor::new(BaseType::Function).with_attribute("args", args)
}

/// `"a"` or the first element of `c("a", ...)`.
fn first_string(expr: &Expr) -> Option<String> {
    match &expr.kind {
        ExprKind::Literal(Literal::String(text)) => Some(text.clone()),
        ExprKind::Call(call) if call.callee_name() == Some("c") => {
            call.positional(0).and_then(first_string)
        }
        _ => None,
    }
}
