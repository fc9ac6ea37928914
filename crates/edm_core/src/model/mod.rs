//! Domain element model.
//!
//! # Responsibility
//! - Define the `Element` contract shared by every persisted domain object.
//! - Declare the ten educational domain entities and their query metadata.
//! - Convert elements to and from storage records.
//!
//! # Invariants
//! - An element read from storage always carries a positive `ElementId`.
//! - A freshly built element carries no id until it is persisted.
//! - References between elements are `(kind, id)` pairs, never owned graphs.

use crate::builder::ElementBuilder;
use crate::datastore::{StoreError, StoreResult};
use crate::error::{DomainError, DomainResult};
use crate::loader::ElementLoader;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};

pub mod activity;
pub mod course;
pub mod enrolment;
pub mod grade;
pub mod log_entry;
pub mod metadata;
pub mod role;
pub mod user;
pub mod value;

pub use activity::{Activity, ActivitySource, ActivityType};
pub use course::{Course, Semester};
pub use enrolment::Enrolment;
pub use grade::Grade;
pub use log_entry::{Action, LogEntry};
pub use metadata::{Cardinality, Property, Selector};
pub use role::Role;
pub use user::User;
pub use value::{Value, ValueType};

/// Storage identifier assigned by a data store. Always positive.
pub type ElementId = i64;

/// Field name to value map exchanged with data stores.
pub type Record = BTreeMap<String, Value>;

/// Closed set of element kinds known to the domain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Action,
    Activity,
    ActivitySource,
    ActivityType,
    Course,
    Enrolment,
    Grade,
    LogEntry,
    Role,
    User,
}

impl ElementKind {
    pub const ALL: [ElementKind; 10] = [
        Self::Action,
        Self::Activity,
        Self::ActivitySource,
        Self::ActivityType,
        Self::Course,
        Self::Enrolment,
        Self::Grade,
        Self::LogEntry,
        Self::Role,
        Self::User,
    ];

    /// Stable storage tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Activity => "activity",
            Self::ActivitySource => "activity_source",
            Self::ActivityType => "activity_type",
            Self::Course => "course",
            Self::Enrolment => "enrolment",
            Self::Grade => "grade",
            Self::LogEntry => "log_entry",
            Self::Role => "role",
            Self::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-owning pointer from one element to another persisted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub id: ElementId,
}

impl ElementRef {
    pub fn new(kind: ElementKind, id: ElementId) -> Self {
        Self { kind, id }
    }

    /// Returns a reference to a persisted element.
    ///
    /// # Errors
    /// - `InvalidArgument` when `element` has not been persisted yet.
    pub fn to<E: Element>(element: &E) -> DomainResult<Self> {
        element
            .id()
            .map(|id| Self::new(E::KIND, id))
            .ok_or_else(|| {
                DomainError::InvalidArgument(format!("{} has not been persisted", E::KIND))
            })
    }
}

impl Display for ElementRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// Capability shared by every persisted domain object.
///
/// `Builder` and `Loader` name the contract traits (as trait objects) that
/// the registry resolves for this element, e.g. `dyn CourseBuilder`.
pub trait Element: Debug + Clone + PartialEq + Send + Sync + 'static {
    const KIND: ElementKind;
    /// Selectors this element can be queried by, including `id` and `all`.
    const SELECTORS: &'static [Selector];

    type Builder: ?Sized + ElementBuilder<Self> + 'static;
    type Loader: ?Sized + ElementLoader<Self> + 'static;

    fn id(&self) -> Option<ElementId>;

    /// Returns this element bound to a storage identifier.
    fn with_id(self, id: ElementId) -> Self;

    fn to_record(&self) -> Record;

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self>;

    /// Checks element-level constraints before persistence.
    fn validate(&self) -> DomainResult<()>;
}

pub(crate) fn record_of<const N: usize>(fields: [(Property, Option<Value>); N]) -> Record {
    fields
        .into_iter()
        .filter_map(|(property, value)| value.map(|value| (property.name().to_string(), value)))
        .collect()
}

fn field<'r>(record: &'r Record, property: &Property) -> Option<&'r Value> {
    record.get(property.name())
}

fn mistyped(property: &Property, record: &Record) -> StoreError {
    match field(record, property) {
        Some(value) => StoreError::InvalidData(format!(
            "field `{}` expects {}, found {}",
            property.name(),
            property.value_type(),
            value.value_type()
        )),
        None => StoreError::InvalidData(format!("field `{}` is missing", property.name())),
    }
}

pub(crate) fn read_text(record: &Record, property: &Property) -> StoreResult<String> {
    read_optional_text(record, property)?.ok_or_else(|| mistyped(property, record))
}

pub(crate) fn read_optional_text(
    record: &Record,
    property: &Property,
) -> StoreResult<Option<String>> {
    match field(record, property) {
        None => Ok(None),
        Some(Value::Text(value)) => Ok(Some(value.clone())),
        Some(_) => Err(mistyped(property, record)),
    }
}

pub(crate) fn read_integer(record: &Record, property: &Property) -> StoreResult<i64> {
    read_optional_integer(record, property)?.ok_or_else(|| mistyped(property, record))
}

pub(crate) fn read_optional_integer(
    record: &Record,
    property: &Property,
) -> StoreResult<Option<i64>> {
    match field(record, property) {
        None => Ok(None),
        Some(Value::Integer(value)) => Ok(Some(*value)),
        Some(_) => Err(mistyped(property, record)),
    }
}

/// Reads an integer field that must fit in `i32`.
pub(crate) fn read_small_integer(record: &Record, property: &Property) -> StoreResult<i32> {
    narrow(property, read_integer(record, property)?)
}

pub(crate) fn read_optional_small_integer(
    record: &Record,
    property: &Property,
) -> StoreResult<Option<i32>> {
    read_optional_integer(record, property)?
        .map(|value| narrow(property, value))
        .transpose()
}

fn narrow(property: &Property, value: i64) -> StoreResult<i32> {
    i32::try_from(value).map_err(|_| {
        StoreError::InvalidData(format!(
            "field `{}` value {value} is out of range",
            property.name()
        ))
    })
}

pub(crate) fn read_boolean(record: &Record, property: &Property) -> StoreResult<bool> {
    match field(record, property) {
        Some(Value::Boolean(value)) => Ok(*value),
        _ => Err(mistyped(property, record)),
    }
}

pub(crate) fn read_semester(record: &Record, property: &Property) -> StoreResult<Semester> {
    match field(record, property) {
        Some(Value::Semester(value)) => Ok(*value),
        _ => Err(mistyped(property, record)),
    }
}

pub(crate) fn read_timestamp(record: &Record, property: &Property) -> StoreResult<i64> {
    match field(record, property) {
        Some(Value::Timestamp(value)) => Ok(*value),
        _ => Err(mistyped(property, record)),
    }
}

/// Reads a reference field and checks it points at the declared kind.
pub(crate) fn read_reference(record: &Record, property: &Property) -> StoreResult<ElementRef> {
    match (field(record, property), property.value_type()) {
        (Some(Value::Reference(reference)), ValueType::Reference(kind))
            if reference.kind == kind =>
        {
            Ok(*reference)
        }
        _ => Err(mistyped(property, record)),
    }
}

/// Fails with `InvalidField` when `value` is blank.
pub(crate) fn check_text(field: &'static str, value: &str) -> DomainResult<()> {
    crate::error::field_text(field, value).map(|_| ())
}

pub(crate) fn check_non_negative(field: &'static str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::InvalidField {
            field,
            message: format!("{value} must not be negative"),
        });
    }
    Ok(())
}
