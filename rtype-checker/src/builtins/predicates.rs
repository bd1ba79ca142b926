use super::{returns, BuiltinFunction, BuiltinGroup};
use crate::types::BaseType;

const PREDICATE_FUNCTIONS: &[BuiltinFunction] = &[
    returns("is.null", BaseType::Logical),
    returns("is.na", BaseType::Logical),
    returns("is.nan", BaseType::Logical),
    returns("is.finite", BaseType::Logical),
    returns("is.infinite", BaseType::Logical),
    returns("is.numeric", BaseType::Logical),
    returns("is.integer", BaseType::Logical),
    returns("is.double", BaseType::Logical),
    returns("is.character", BaseType::Logical),
    returns("is.logical", BaseType::Logical),
    returns("is.function", BaseType::Logical),
    returns("is.list", BaseType::Logical),
    returns("is.vector", BaseType::Logical),
    returns("is.data.frame", BaseType::Logical),
    returns("is.environment", BaseType::Logical),
    returns("is.factor", BaseType::Logical),
    returns("is.element", BaseType::Logical),
    returns("inherits", BaseType::Logical),
    returns("identical", BaseType::Logical),
    returns("isTRUE", BaseType::Logical),
    returns("isFALSE", BaseType::Logical),
    returns("any", BaseType::Logical),
    returns("all", BaseType::Logical),
    returns("xor", BaseType::Logical),
    returns("exists", BaseType::Logical),
    returns("missing", BaseType::Logical),
    returns("file.exists", BaseType::Logical),
    returns("dir.exists", BaseType::Logical),
    returns("nzchar", BaseType::Logical),
    returns("grepl", BaseType::Logical),
    returns("startsWith", BaseType::Logical),
    returns("endsWith", BaseType::Logical),
    returns("duplicated", BaseType::Logical),
];

pub const GROUP: BuiltinGroup = BuiltinGroup {
    name: "predicates",
    description: "Predicates and logical reductions.",
    functions: PREDICATE_FUNCTIONS,
};
