use super::{builtin, returns, BuiltinFunction, BuiltinGroup, CallRule};
use crate::types::BaseType;

const NUMERIC_FUNCTIONS: &[BuiltinFunction] = &[
    returns("prod", BaseType::Numeric),
    returns("abs", BaseType::Numeric),
    returns("sqrt", BaseType::Numeric),
    returns("exp", BaseType::Numeric),
    returns("log", BaseType::Numeric),
    returns("log2", BaseType::Numeric),
    returns("log10", BaseType::Numeric),
    returns("log1p", BaseType::Numeric),
    returns("round", BaseType::Numeric),
    returns("signif", BaseType::Numeric),
    returns("ceiling", BaseType::Numeric),
    returns("floor", BaseType::Numeric),
    returns("trunc", BaseType::Numeric),
    returns("min", BaseType::Numeric),
    returns("max", BaseType::Numeric),
    returns("range", BaseType::Numeric),
    returns("cumsum", BaseType::Numeric),
    returns("cumprod", BaseType::Numeric),
    returns("sin", BaseType::Numeric),
    returns("cos", BaseType::Numeric),
    returns("tan", BaseType::Numeric),
    returns("runif", BaseType::Numeric),
    returns("rnorm", BaseType::Numeric),
    returns("rowSums", BaseType::Numeric),
    returns("colSums", BaseType::Numeric),
    returns("rowMeans", BaseType::Numeric),
    returns("colMeans", BaseType::Numeric),
    builtin("sample", CallRule::FirstArgument),
    // Integer producers.
    returns("length", BaseType::Integer),
    returns("nrow", BaseType::Integer),
    returns("ncol", BaseType::Integer),
    returns("NROW", BaseType::Integer),
    returns("NCOL", BaseType::Integer),
    returns("seq_len", BaseType::Integer),
    returns("seq_along", BaseType::Integer),
    returns("which", BaseType::Integer),
    returns("which.max", BaseType::Integer),
    returns("which.min", BaseType::Integer),
    returns("nlevels", BaseType::Integer),
    returns("dim", BaseType::Integer),
    returns("match", BaseType::Integer),
    returns("order", BaseType::Integer),
    returns("rank", BaseType::Numeric),
];

pub const GROUP: BuiltinGroup = BuiltinGroup {
    name: "numeric",
    description: "Arithmetic helpers and integer producers.",
    functions: NUMERIC_FUNCTIONS,
};
