//! Column values and typed extraction
//!
//! A [`Value`] is one cell of a row. Factories unwrap values into their
//! parameter types through [`FromValue`]; the only conversions performed are
//! variant unwrapping and lossless integer narrowing.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Errors that can occur while extracting a typed argument
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The value holds a different variant
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A null value was given to a non-optional parameter
    #[error("unexpected null: expected {expected}")]
    UnexpectedNull { expected: &'static str },

    /// An integer does not fit the target type
    #[error("value {value} out of range for {expected}")]
    OutOfRange { value: i64, expected: &'static str },

    /// The factory asked for more arguments than the schema supplies
    #[error("missing argument at position {position}, {available} supplied")]
    MissingArgument { position: usize, available: usize },
}

/// A single column value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL or absent column
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Bytes(Vec<u8>),
}

impl Value {
    /// Variant name used in diagnostics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
            Self::Bytes(_) => "bytes",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text of a `Text` value
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i64 => Int,
    i32 => Int,
    i16 => Int,
    u32 => Int,
    f64 => Float,
    f32 => Float,
    String => Text,
    &str => Text,
    NaiveDate => Date,
    NaiveDateTime => Timestamp,
    Vec<u8> => Bytes,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Types that can be extracted from a [`Value`]
pub trait FromValue: Sized {
    /// Type name used in diagnostics
    const EXPECTED: &'static str;

    fn from_value(value: Value) -> Result<Self, ValueError>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "value";

    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn mismatch<T: FromValue>(value: &Value) -> ValueError {
    if value.is_null() {
        ValueError::UnexpectedNull {
            expected: T::EXPECTED,
        }
    } else {
        ValueError::TypeMismatch {
            expected: T::EXPECTED,
            found: value.kind(),
        }
    }
}

macro_rules! from_value_variant {
    ($($ty:ty => $variant:ident as $name:literal),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = $name;

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

from_value_variant! {
    bool => Bool as "bool",
    i64 => Int as "i64",
    String => Text as "String",
    NaiveDate => Date as "NaiveDate",
    NaiveDateTime => Timestamp as "NaiveDateTime",
    Vec<u8> => Bytes as "Vec<u8>",
}

macro_rules! from_value_narrow {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = $name;

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(i).map_err(|_| ValueError::OutOfRange {
                            value: i,
                            expected: $name,
                        }),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

from_value_narrow! {
    i32 => "i32",
    i16 => "i16",
    u32 => "u32",
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}
