//! In-memory model of realized R values, the input of value-based inference.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFlavour {
    DataFrame,
    DataTable,
    Tibble,
}

impl TableFlavour {
    /// The class vector R attaches to a table of this flavour.
    pub fn classes(self) -> &'static [&'static str] {
        match self {
            TableFlavour::DataFrame => &["data.frame"],
            TableFlavour::DataTable => &["data.table", "data.frame"],
            TableFlavour::Tibble => &["tbl_df", "tbl", "data.frame"],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    pub flavour: TableFlavour,
    pub columns: Vec<(String, Value)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Logical(Vec<Option<bool>>),
    Integer(Vec<Option<i32>>),
    Double(Vec<f64>),
    Complex(Vec<(f64, f64)>),
    Character(Vec<Option<String>>),
    Raw(Vec<u8>),
    /// Generic vector; elements may carry names.
    List(Vec<(Option<String>, Value)>),
    DataFrame(DataFrame),
    /// Closure with its formal argument names.
    Function(Vec<String>),
    Formula(String),
    Environment,
    /// Classed object: the class vector wraps the underlying data.
    S3 {
        class: Vec<String>,
        data: Box<Value>,
    },
    S4 {
        class: String,
    },
    /// Reference-semantics object (RC or R6 instance).
    Reference {
        class: String,
    },
}

impl Value {
    pub fn integers(values: impl IntoIterator<Item = i32>) -> Self {
        Value::Integer(values.into_iter().map(Some).collect())
    }

    pub fn doubles(values: impl IntoIterator<Item = f64>) -> Self {
        Value::Double(values.into_iter().collect())
    }

    pub fn strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Value::Character(values.into_iter().map(|s| Some(s.into())).collect())
    }

    pub fn logicals(values: impl IntoIterator<Item = bool>) -> Self {
        Value::Logical(values.into_iter().map(Some).collect())
    }

    pub fn table<S: Into<String>>(
        flavour: TableFlavour,
        columns: impl IntoIterator<Item = (S, Value)>,
    ) -> Self {
        Value::DataFrame(DataFrame {
            flavour,
            columns: columns
                .into_iter()
                .map(|(name, column)| (name.into(), column))
                .collect(),
        })
    }

    pub fn s3<S: Into<String>>(class: impl IntoIterator<Item = S>, data: Value) -> Self {
        Value::S3 {
            class: class.into_iter().map(Into::into).collect(),
            data: Box::new(data),
        }
    }

    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Value::Logical(_)
                | Value::Integer(_)
                | Value::Double(_)
                | Value::Complex(_)
                | Value::Character(_)
                | Value::Raw(_)
        )
    }

    /// Length as reported by R's `length()`.
    pub fn len(&self) -> usize {
        match self {
            Value::Null | Value::Environment | Value::S4 { .. } | Value::Reference { .. } => 0,
            Value::Logical(values) => values.len(),
            Value::Integer(values) => values.len(),
            Value::Double(values) => values.len(),
            Value::Complex(values) => values.len(),
            Value::Character(values) => values.len(),
            Value::Raw(values) => values.len(),
            Value::List(values) => values.len(),
            Value::DataFrame(frame) => frame.columns.len(),
            Value::Function(_) | Value::Formula(_) => 1,
            Value::S3 { data, .. } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value's class vector, as `class(x)` would return it.
    pub fn class(&self) -> Vec<String> {
        let implicit = match self {
            Value::Null => "NULL",
            Value::Logical(_) => "logical",
            Value::Integer(_) => "integer",
            Value::Double(_) => "numeric",
            Value::Complex(_) => "complex",
            Value::Character(_) => "character",
            Value::Raw(_) => "raw",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Formula(_) => "formula",
            Value::Environment => "environment",
            Value::DataFrame(frame) => {
                return frame.flavour.classes().iter().map(|c| c.to_string()).collect()
            }
            Value::S3 { class, .. } => return class.clone(),
            Value::S4 { class } | Value::Reference { class } => return vec![class.clone()],
        };
        vec![implicit.to_string()]
    }
}
