//! Error taxonomy for domain operations.
//!
//! # Responsibility
//! - Give builders, loaders and managers one semantic error type.
//! - Keep storage transport failures distinguishable from domain failures.
//!
//! # Invariants
//! - Storage failures reach callers unchanged inside `DomainError::Store`.
//! - Factory overwrite is the only anomaly that is logged instead of returned.

use crate::datastore::StoreError;
use crate::model::{ElementKind, ValueType};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DomainResult<T> = Result<T, DomainError>;

/// Semantic error for builder, loader, query and registry operations.
#[derive(Debug)]
pub enum DomainError {
    /// Caller passed a value the operation cannot accept.
    InvalidArgument(String),
    /// `build()` was called before every required field was set.
    IncompleteBuilder {
        element: ElementKind,
        missing: Vec<&'static str>,
    },
    /// A field value violates an element constraint.
    InvalidField {
        field: &'static str,
        message: String,
    },
    /// No factory is registered for the requested implementation.
    UnknownImplementation {
        contract: &'static str,
        implementation: &'static str,
    },
    UnsupportedSelector {
        element: ElementKind,
        selector: String,
    },
    UnknownProperty {
        selector: &'static str,
        property: &'static str,
    },
    TypeMismatch {
        property: &'static str,
        expected: ValueType,
        actual: ValueType,
    },
    NotFound {
        element: ElementKind,
        detail: String,
    },
    MultipleResults {
        element: ElementKind,
        selector: &'static str,
        count: usize,
    },
    Store(StoreError),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::IncompleteBuilder { element, missing } => write!(
                f,
                "{element} builder is incomplete; missing: {}",
                missing.join(", ")
            ),
            Self::InvalidField { field, message } => {
                write!(f, "invalid value for `{field}`: {message}")
            }
            Self::UnknownImplementation {
                contract,
                implementation,
            } => write!(
                f,
                "no factory registered for `{implementation}` implementing `{contract}`"
            ),
            Self::UnsupportedSelector { element, selector } => {
                write!(f, "{element} does not support selector `{selector}`")
            }
            Self::UnknownProperty { selector, property } => {
                write!(f, "selector `{selector}` has no property `{property}`")
            }
            Self::TypeMismatch {
                property,
                expected,
                actual,
            } => write!(
                f,
                "property `{property}` expects {expected}, got {actual}"
            ),
            Self::NotFound { element, detail } => write!(f, "{element} not found: {detail}"),
            Self::MultipleResults {
                element,
                selector,
                count,
            } => write!(
                f,
                "selector `{selector}` matched {count} {element} elements; expected one"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Validates a caller supplied text argument and returns it trimmed.
pub(crate) fn argument_text<'a>(name: &str, value: &'a str) -> DomainResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "`{name}` must not be blank"
        )));
    }
    Ok(trimmed)
}

/// Validates a text field value and returns it trimmed.
pub(crate) fn field_text(field: &'static str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidField {
            field,
            message: "must not be blank".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Validates that `value` lies in `[0, 100]`.
pub(crate) fn field_percentage(field: &'static str, value: i32) -> DomainResult<i32> {
    if !(0..=100).contains(&value) {
        return Err(DomainError::InvalidField {
            field,
            message: format!("{value} is outside 0..=100"),
        });
    }
    Ok(value)
}
