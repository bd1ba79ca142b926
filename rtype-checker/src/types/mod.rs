use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::value::{TableFlavour, Value};

mod registry;

pub use registry::{RegistryError, TypeRegistry};

/// Type tag of a descriptor. Builtin tags are fixed; anything else has to be
/// registered with a [`TypeRegistry`] and is carried as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseType {
    Integer,
    Numeric,
    Double,
    Character,
    Logical,
    Complex,
    Raw,
    Null,
    Any,
    Unknown,
    List,
    Vector,
    DataFrame,
    DataTable,
    Tibble,
    Function,
    Formula,
    S3,
    S4,
    ObjectRef,
    Environment,
    Custom(String),
}

pub(crate) const BUILTIN_TYPES: &[BaseType] = &[
    BaseType::Integer,
    BaseType::Numeric,
    BaseType::Double,
    BaseType::Character,
    BaseType::Logical,
    BaseType::Complex,
    BaseType::Raw,
    BaseType::Null,
    BaseType::Any,
    BaseType::Unknown,
    BaseType::List,
    BaseType::Vector,
    BaseType::DataFrame,
    BaseType::DataTable,
    BaseType::Tibble,
    BaseType::Function,
    BaseType::Formula,
    BaseType::S3,
    BaseType::S4,
    BaseType::ObjectRef,
    BaseType::Environment,
];

impl BaseType {
    pub fn as_str(&self) -> &str {
        match self {
            BaseType::Integer => "integer",
            BaseType::Numeric => "numeric",
            BaseType::Double => "double",
            BaseType::Character => "character",
            BaseType::Logical => "logical",
            BaseType::Complex => "complex",
            BaseType::Raw => "raw",
            BaseType::Null => "null",
            BaseType::Any => "any",
            BaseType::Unknown => "unknown",
            BaseType::List => "list",
            BaseType::Vector => "vector",
            BaseType::DataFrame => "data_frame",
            BaseType::DataTable => "data_table",
            BaseType::Tibble => "tibble",
            BaseType::Function => "function",
            BaseType::Formula => "formula",
            BaseType::S3 => "s3",
            BaseType::S4 => "s4",
            BaseType::ObjectRef => "object_ref",
            BaseType::Environment => "environment",
            BaseType::Custom(tag) => tag,
        }
    }

    /// Looks up a builtin tag, accepting R's own class spellings as aliases.
    pub fn builtin(tag: &str) -> Option<BaseType> {
        let alias = match tag {
            "data.frame" => Some(BaseType::DataFrame),
            "data.table" => Some(BaseType::DataTable),
            "tbl_df" => Some(BaseType::Tibble),
            "NULL" => Some(BaseType::Null),
            "R6" | "refObjectGenerator" => Some(BaseType::ObjectRef),
            _ => None,
        };
        alias.or_else(|| {
            BUILTIN_TYPES
                .iter()
                .find(|builtin| builtin.as_str() == tag)
                .cloned()
        })
    }

    pub fn is_tabular(&self) -> bool {
        matches!(
            self,
            BaseType::DataFrame | BaseType::DataTable | BaseType::Tibble
        )
    }

    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            BaseType::Integer
                | BaseType::Numeric
                | BaseType::Double
                | BaseType::Character
                | BaseType::Logical
                | BaseType::Complex
                | BaseType::Raw
        )
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BaseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Inferred or declared type of an R value.
///
/// Consistency checks compare descriptors by [`BaseType`] only (see
/// [`TypeDescriptor::same_type`]); `attributes` are informational.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDescriptor {
    pub base_type: BaseType,
    pub nullable: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, JsonValue>,
}

impl TypeDescriptor {
    pub fn new(base_type: BaseType) -> Self {
        Self {
            base_type,
            nullable: false,
            attributes: BTreeMap::new(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(BaseType::Unknown)
    }

    pub fn any() -> Self {
        Self::new(BaseType::Any)
    }

    pub fn null() -> Self {
        Self::new(BaseType::Null).nullable()
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&JsonValue> {
        self.attributes.get(key)
    }

    pub fn is_unknown(&self) -> bool {
        self.base_type == BaseType::Unknown
    }

    pub fn same_type(&self, other: &TypeDescriptor) -> bool {
        self.base_type == other.base_type
    }

    /// Tag recorded for `column` in a tabular descriptor's `columns` attribute.
    pub fn column_tag(&self, column: &str) -> Option<&str> {
        self.attribute("columns")?
            .as_object()?
            .get(column)?
            .as_str()
    }

    pub fn describe(&self) -> String {
        let mut text = match &self.base_type {
            base if base.is_tabular() => match self.attribute("columns").and_then(|c| c.as_object())
            {
                Some(columns) if !columns.is_empty() => {
                    let joined = columns
                        .iter()
                        .map(|(name, tag)| format!("{name}: {}", tag.as_str().unwrap_or("unknown")))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{base}{{{joined}}}")
                }
                _ => base.to_string(),
            },
            BaseType::Function => {
                let args = self
                    .attribute("args")
                    .and_then(|args| args.as_array())
                    .map(|args| {
                        args.iter()
                            .filter_map(|arg| arg.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                format!("function({args})")
            }
            base @ (BaseType::S3 | BaseType::S4 | BaseType::ObjectRef) => {
                match self.attribute("class").and_then(|class| class.as_str()) {
                    Some(class) => format!("{base}<{class}>"),
                    None => base.to_string(),
                }
            }
            base => base.to_string(),
        };
        if self.nullable && self.base_type != BaseType::Null {
            text.push('?');
        }
        text
    }

    /// Whether `value` is a valid instance of this descriptor.
    pub fn accepts(&self, value: &Value) -> bool {
        match (&self.base_type, value) {
            (BaseType::Any, _) => true,
            (BaseType::Unknown, _) => false,
            (base, Value::Null) => self.nullable || *base == BaseType::Null,
            (BaseType::Null, _) => false,
            (BaseType::Integer, Value::Integer(_)) => true,
            (BaseType::Numeric, Value::Integer(_) | Value::Double(_)) => true,
            (BaseType::Double, Value::Double(_)) => true,
            (BaseType::Character, Value::Character(_)) => true,
            (BaseType::Logical, Value::Logical(_)) => true,
            (BaseType::Complex, Value::Complex(_)) => true,
            (BaseType::Raw, Value::Raw(_)) => true,
            (BaseType::Vector, value) => value.is_atomic() || matches!(value, Value::List(_)),
            (BaseType::List, Value::List(_) | Value::DataFrame(_)) => true,
            (BaseType::DataFrame, Value::DataFrame(_)) => true,
            (BaseType::DataTable, Value::DataFrame(frame)) => {
                frame.flavour == TableFlavour::DataTable
            }
            (BaseType::Tibble, Value::DataFrame(frame)) => frame.flavour == TableFlavour::Tibble,
            (BaseType::Function, Value::Function(_)) => true,
            (BaseType::Formula, Value::Formula(_)) => true,
            (BaseType::Environment, Value::Environment | Value::Reference { .. }) => true,
            (BaseType::S3, Value::S3 { .. } | Value::DataFrame(_)) => true,
            (BaseType::S4, Value::S4 { .. }) => true,
            (BaseType::ObjectRef, Value::Reference { .. }) => true,
            (BaseType::Custom(tag), value) => value.class().iter().any(|class| class == tag),
            _ => false,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<BaseType> for TypeDescriptor {
    fn from(base_type: BaseType) -> Self {
        Self::new(base_type)
    }
}
