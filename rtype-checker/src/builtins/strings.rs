use super::{returns, BuiltinFunction, BuiltinGroup};
use crate::types::BaseType;

const STRING_FUNCTIONS: &[BuiltinFunction] = &[
    returns("paste", BaseType::Character),
    returns("paste0", BaseType::Character),
    returns("sprintf", BaseType::Character),
    returns("format", BaseType::Character),
    returns("formatC", BaseType::Character),
    returns("toupper", BaseType::Character),
    returns("tolower", BaseType::Character),
    returns("casefold", BaseType::Character),
    returns("chartr", BaseType::Character),
    returns("substr", BaseType::Character),
    returns("substring", BaseType::Character),
    returns("trimws", BaseType::Character),
    returns("sub", BaseType::Character),
    returns("gsub", BaseType::Character),
    returns("toString", BaseType::Character),
    returns("deparse", BaseType::Character),
    returns("sQuote", BaseType::Character),
    returns("dQuote", BaseType::Character),
    returns("shQuote", BaseType::Character),
    returns("basename", BaseType::Character),
    returns("dirname", BaseType::Character),
    returns("file.path", BaseType::Character),
    returns("readline", BaseType::Character),
    returns("readLines", BaseType::Character),
    returns("nchar", BaseType::Integer),
    returns("regexpr", BaseType::Integer),
    returns("grep", BaseType::Integer),
    returns("strtoi", BaseType::Integer),
    returns("strsplit", BaseType::List),
    returns("regmatches", BaseType::List),
];

pub const GROUP: BuiltinGroup = BuiltinGroup {
    name: "strings",
    description: "String producers and text utilities.",
    functions: STRING_FUNCTIONS,
};
