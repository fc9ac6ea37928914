//! Data store boundary and reference implementations.
//!
//! # Responsibility
//! - Define the storage contract the domain model persists through.
//! - Ship in-memory and SQLite implementations of that contract.
//!
//! # Invariants
//! - Ids are positive and unique across all element kinds of one store.
//! - `execute` returns rows ordered by ascending id.
//! - Every operation on a closed store fails with `StoreError::Closed`.

use crate::db::DbError;
use crate::model::{Cardinality, ElementId, ElementKind, Record, Selector, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemDataStore;
pub use sqlite::SqliteDataStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage transport error.
#[derive(Debug)]
pub enum StoreError {
    Closed,
    Db(DbError),
    Encoding(serde_json::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "data store is closed"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Encoding(err) => write!(f, "record encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::Closed | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

/// One stored element as returned by `DataStore::execute`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: ElementId,
    pub record: Record,
}

/// Fully bound selector query handed to a data store.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    kind: ElementKind,
    selector: &'static Selector,
    values: BTreeMap<&'static str, Value>,
}

impl QueryRequest {
    pub fn new(
        kind: ElementKind,
        selector: &'static Selector,
        values: BTreeMap<&'static str, Value>,
    ) -> Self {
        Self {
            kind,
            selector,
            values,
        }
    }

    /// Request for the element of `kind` stored under `id`.
    pub fn by_id(kind: ElementKind, id: ElementId) -> Self {
        let mut values = BTreeMap::new();
        values.insert("id", Value::Integer(id));
        Self::new(kind, &Selector::ID, values)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn selector(&self) -> &'static str {
        self.selector.name()
    }

    pub fn values(&self) -> &BTreeMap<&'static str, Value> {
        &self.values
    }

    /// Storage id bound by a key selector, if any.
    pub fn key(&self) -> Option<ElementId> {
        if self.selector.cardinality() != Cardinality::Key {
            return None;
        }
        match self.values.get("id") {
            Some(Value::Integer(id)) => Some(*id),
            _ => None,
        }
    }

    /// Whether the stored row `(id, record)` satisfies every binding.
    pub fn matches(&self, id: ElementId, record: &Record) -> bool {
        self.values.iter().all(|(name, value)| {
            if *name == "id" {
                *value == Value::Integer(id)
            } else {
                record.get(*name) == Some(value)
            }
        })
    }
}

/// Storage session the domain model persists elements through.
pub trait DataStore: Send + Sync {
    /// Short backend name used in diagnostics.
    fn name(&self) -> &str;

    fn is_open(&self) -> bool;

    /// Closes the session. Later operations fail with `Closed`.
    fn close(&self);

    /// Inserts (`id == None`) or replaces the record of one element.
    ///
    /// Returns the element's id.
    fn persist(
        &self,
        kind: ElementKind,
        id: Option<ElementId>,
        record: &Record,
    ) -> StoreResult<ElementId>;

    /// Deletes one element. Returns whether it existed.
    fn remove(&self, kind: ElementKind, id: ElementId) -> StoreResult<bool>;

    fn execute(&self, request: &QueryRequest) -> StoreResult<Vec<StoredRecord>>;
}

#[cfg(test)]
mod tests {
    use super::QueryRequest;
    use crate::model::{Course, ElementKind, Record, Semester, Value};
    use std::collections::BTreeMap;

    fn record(name: &str, year: i64) -> Record {
        let mut record = Record::new();
        record.insert("name".to_string(), Value::from(name));
        record.insert("semester".to_string(), Value::from(Semester::Fall));
        record.insert("year".to_string(), Value::Integer(year));
        record
    }

    #[test]
    fn by_id_matches_only_the_bound_row() {
        let request = QueryRequest::by_id(ElementKind::Course, 3);
        assert_eq!(request.key(), Some(3));
        assert!(request.matches(3, &record("CIS*1500", 2015)));
        assert!(!request.matches(4, &record("CIS*1500", 2015)));
    }

    #[test]
    fn property_bindings_compare_record_fields() {
        let mut values = BTreeMap::new();
        values.insert("name", Value::from("CIS*1500"));
        values.insert("year", Value::Integer(2015));
        let request = QueryRequest::new(ElementKind::Course, &Course::SELECTOR_OFFERING, values);

        assert_eq!(request.key(), None);
        assert!(request.matches(1, &record("CIS*1500", 2015)));
        assert!(!request.matches(1, &record("CIS*1500", 2016)));
        assert!(!request.matches(1, &record("CIS*2500", 2015)));
    }
}
