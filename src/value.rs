use std::fmt;

use crate::dict::Dict;

/// A single task-data value.
///
/// Each value carries exactly one payload, selected by variant. String and
/// nested-dict payloads are owned by the value: storing a [`Dict`] moves it
/// into the value, and replacing a stored value drops the old payload.
/// Values are not mutated in place: overwriting a key constructs a new
/// value and lets the store drop the previous one.
///
/// # Examples
///
/// ```
/// use musubi::{Value, ValueKind};
///
/// let flag = Value::from(true);
/// assert_eq!(flag.kind(), ValueKind::Bool);
/// assert_eq!(flag.as_bool(), Some(true));
///
/// // The wrong accessor returns None instead of coercing
/// assert_eq!(flag.as_i64(), None);
/// ```
#[derive(Debug)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A 64-bit signed integer.
    Int64(i64),
    /// An owned string.
    Str(String),
    /// A nested dictionary, moved in at construction.
    Dict(Dict),
}

/// The kind tag of a [`Value`], without its payload.
///
/// Used to report type mismatches between the kind a caller requested and
/// the kind a key currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Tag of [`Value::Bool`].
    Bool,
    /// Tag of [`Value::Dict`].
    Dict,
    /// Tag of [`Value::Int64`].
    Int64,
    /// Tag of [`Value::Str`].
    Str,
}

impl Value {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Dict(_) => ValueKind::Dict,
            Value::Int64(_) => ValueKind::Int64,
            Value::Str(_) => ValueKind::Str,
        }
    }

    /// Returns the boolean payload, or `None` for any other kind.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload, or `None` for any other kind.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, or `None` for any other kind.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested dictionary, or `None` for any other kind.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Dict => write!(f, "dict"),
            ValueKind::Int64 => write!(f, "int64"),
            ValueKind::Str => write!(f, "str"),
        }
    }
}

impl fmt::Display for Value {
    /// Renders the tag name and payload for diagnostics.
    ///
    /// A nested dict is rendered by its entry count, not its contents, so
    /// deeply nested values stay cheap to trace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "bool = {value}"),
            Value::Dict(value) => write!(f, "dict = <{} entries>", value.len()),
            Value::Int64(value) => write!(f, "int64 = {value}"),
            Value::Str(value) => write!(f, "str = {value}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Dict> for Value {
    fn from(value: Dict) -> Self {
        Value::Dict(value)
    }
}
