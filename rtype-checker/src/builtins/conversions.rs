use super::{builtin, returns, BuiltinFunction, BuiltinGroup, CallRule};
use crate::types::BaseType;

const CONVERSION_FUNCTIONS: &[BuiltinFunction] = &[
    returns("as.integer", BaseType::Integer),
    returns("as.numeric", BaseType::Numeric),
    returns("as.double", BaseType::Double),
    returns("as.character", BaseType::Character),
    returns("as.logical", BaseType::Logical),
    returns("as.complex", BaseType::Complex),
    returns("as.raw", BaseType::Raw),
    returns("as.list", BaseType::List),
    returns("as.vector", BaseType::Vector),
    returns("unlist", BaseType::Vector),
    returns("as.data.frame", BaseType::DataFrame),
    returns("as.data.table", BaseType::DataTable),
    returns("setDT", BaseType::DataTable),
    returns("as_tibble", BaseType::Tibble),
    returns("as.function", BaseType::Function),
    returns("as.environment", BaseType::Environment),
    returns("as.formula", BaseType::Formula),
    builtin("as.factor", CallRule::Classed("factor")),
    builtin("as.Date", CallRule::Classed("Date")),
    builtin("as.POSIXct", CallRule::Classed("POSIXct")),
];

pub const GROUP: BuiltinGroup = BuiltinGroup {
    name: "conversions",
    description: "Coercions between R types (`as.*`).",
    functions: CONVERSION_FUNCTIONS,
};
