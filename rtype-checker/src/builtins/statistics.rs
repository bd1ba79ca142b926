use super::{expecting, BuiltinFunction, BuiltinGroup, CallRule};
use crate::types::BaseType;

const NUMERIC_RESULT: CallRule = CallRule::Returns(BaseType::Numeric);

const STATISTICS_FUNCTIONS: &[BuiltinFunction] = &[
    expecting("mean", NUMERIC_RESULT, BaseType::Numeric),
    expecting("median", NUMERIC_RESULT, BaseType::Numeric),
    expecting("sd", NUMERIC_RESULT, BaseType::Numeric),
    expecting("var", NUMERIC_RESULT, BaseType::Numeric),
    expecting("sum", NUMERIC_RESULT, BaseType::Numeric),
    expecting("quantile", NUMERIC_RESULT, BaseType::Numeric),
];

pub const GROUP: BuiltinGroup = BuiltinGroup {
    name: "statistics",
    description: "Aggregates that expect numeric input.",
    functions: STATISTICS_FUNCTIONS,
};
