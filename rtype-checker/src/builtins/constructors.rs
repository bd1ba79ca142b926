use super::{builtin, returns, BuiltinFunction, BuiltinGroup, CallRule};
use crate::types::BaseType;

const CONSTRUCTOR_FUNCTIONS: &[BuiltinFunction] = &[
    builtin("c", CallRule::FirstArgument),
    returns("list", BaseType::List),
    returns("pairlist", BaseType::List),
    returns("vector", BaseType::Vector),
    // Typed vector constructors: `integer(3)` is a zero-filled integer vector.
    returns("integer", BaseType::Integer),
    returns("numeric", BaseType::Numeric),
    returns("double", BaseType::Double),
    returns("character", BaseType::Character),
    returns("logical", BaseType::Logical),
    returns("complex", BaseType::Complex),
    returns("raw", BaseType::Raw),
    returns("seq", BaseType::Numeric),
    builtin("rep", CallRule::FirstArgument),
    builtin("rev", CallRule::FirstArgument),
    builtin("sort", CallRule::FirstArgument),
    builtin("unique", CallRule::FirstArgument),
    builtin("head", CallRule::FirstArgument),
    builtin("tail", CallRule::FirstArgument),
    builtin("matrix", CallRule::FirstArgument),
    builtin("array", CallRule::FirstArgument),
    builtin("identity", CallRule::FirstArgument),
    builtin("invisible", CallRule::FirstArgument),
    builtin("unname", CallRule::FirstArgument),
    builtin("suppressWarnings", CallRule::FirstArgument),
    builtin("suppressMessages", CallRule::FirstArgument),
    builtin("data.frame", CallRule::Table(BaseType::DataFrame)),
    builtin("data.table", CallRule::Table(BaseType::DataTable)),
    builtin("tibble", CallRule::Table(BaseType::Tibble)),
    builtin("factor", CallRule::Classed("factor")),
    builtin("Sys.Date", CallRule::Classed("Date")),
    builtin("Sys.time", CallRule::Classed("POSIXct")),
    builtin("structure", CallRule::Structure),
    builtin("new", CallRule::S4Instance),
    returns("new.env", BaseType::Environment),
    returns("environment", BaseType::Environment),
    returns("globalenv", BaseType::Environment),
    returns("emptyenv", BaseType::Environment),
    returns("parent.frame", BaseType::Environment),
    returns("setClass", BaseType::Function),
    builtin("setRefClass", CallRule::Generator),
    builtin("R6Class", CallRule::Generator),
    returns("formula", BaseType::Formula),
    returns("match.fun", BaseType::Function),
    returns("Vectorize", BaseType::Function),
];

pub const GROUP: BuiltinGroup = BuiltinGroup {
    name: "constructors",
    description: "Vector, list, table and object constructors.",
    functions: CONSTRUCTOR_FUNCTIONS,
};
