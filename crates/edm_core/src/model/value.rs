//! Typed values carried by records and query properties.

use super::{ElementKind, ElementRef, Semester};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One field value. Serialized as `{"type": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Integer(i64),
    Text(String),
    Boolean(bool),
    Semester(Semester),
    /// Unix epoch milliseconds.
    Timestamp(i64),
    Reference(ElementRef),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Integer(_) => ValueType::Integer,
            Self::Text(_) => ValueType::Text,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Semester(_) => ValueType::Semester,
            Self::Timestamp(_) => ValueType::Timestamp,
            Self::Reference(reference) => ValueType::Reference(reference.kind),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) | Self::Timestamp(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Semester(value) => write!(f, "{value}"),
            Self::Reference(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Semester> for Value {
    fn from(value: Semester) -> Self {
        Self::Semester(value)
    }
}

impl From<ElementRef> for Value {
    fn from(value: ElementRef) -> Self {
        Self::Reference(value)
    }
}

/// Declared type of a property slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Text,
    Boolean,
    Semester,
    Timestamp,
    Reference(ElementKind),
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::Text => f.write_str("text"),
            Self::Boolean => f.write_str("boolean"),
            Self::Semester => f.write_str("semester"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::Reference(kind) => write!(f, "reference<{kind}>"),
        }
    }
}
