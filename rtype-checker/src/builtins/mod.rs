//! Fixed rule tables mapping R callee names to inferred result types.

mod constructors;
mod conversions;
mod numeric;
mod predicates;
mod statistics;
mod strings;

use crate::types::BaseType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallRule {
    /// The call always yields this type.
    Returns(BaseType),
    /// Yields the type of the first positional argument (`c`, `rev`, ...).
    FirstArgument,
    /// Tabular constructor; named arguments become columns.
    Table(BaseType),
    /// S3 object carrying the given class.
    Classed(&'static str),
    /// `structure(x, class = "...")`.
    Structure,
    /// `new("Class", ...)`.
    S4Instance,
    /// Class generators (`R6Class("Name", ...)`); instances come from `$new()`.
    Generator,
}

#[derive(Clone, Debug)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub rule: CallRule,
    /// Argument type the function expects, reported by the call-site pass.
    pub argument: Option<BaseType>,
}

pub struct BuiltinGroup {
    pub name: &'static str,
    pub description: &'static str,
    pub functions: &'static [BuiltinFunction],
}

pub(crate) const fn builtin(name: &'static str, rule: CallRule) -> BuiltinFunction {
    BuiltinFunction {
        name,
        rule,
        argument: None,
    }
}

pub(crate) const fn returns(name: &'static str, base_type: BaseType) -> BuiltinFunction {
    builtin(name, CallRule::Returns(base_type))
}

pub(crate) const fn expecting(
    name: &'static str,
    rule: CallRule,
    argument: BaseType,
) -> BuiltinFunction {
    BuiltinFunction {
        name,
        rule,
        argument: Some(argument),
    }
}

pub static GROUPS: &[BuiltinGroup] = &[
    constructors::GROUP,
    conversions::GROUP,
    strings::GROUP,
    numeric::GROUP,
    statistics::GROUP,
    predicates::GROUP,
];

pub fn lookup(name: &str) -> Option<&'static BuiltinFunction> {
    GROUPS
        .iter()
        .flat_map(|group| group.functions.iter())
        .find(|function| function.name == name)
}

/// Base bindings that are visible without any assignment.
pub fn constant(name: &str) -> Option<BaseType> {
    match name {
        "T" | "F" => Some(BaseType::Logical),
        "pi" => Some(BaseType::Numeric),
        "LETTERS" | "letters" | "month.name" | "month.abb" => Some(BaseType::Character),
        _ => None,
    }
}
