//! Single-use parameterized queries over one selector.
//!
//! # Invariants
//! - Only properties of the query's selector can be bound, with matching types.
//! - Every selector property must be bound before execution.
//! - Execution consumes the query.

use crate::datastore::{DataStore, QueryRequest};
use crate::error::{DomainError, DomainResult};
use crate::model::{Element, Property, Selector, Value};
use log::debug;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Query for elements of type `E` matched through one selector.
pub struct Query<E> {
    selector: &'static Selector,
    values: BTreeMap<&'static str, Value>,
    datastore: Arc<dyn DataStore>,
    marker: PhantomData<fn() -> E>,
}

impl<E: Element> Query<E> {
    pub(crate) fn new(selector: &'static Selector, datastore: Arc<dyn DataStore>) -> Self {
        Self {
            selector,
            values: BTreeMap::new(),
            datastore,
            marker: PhantomData,
        }
    }

    pub fn selector(&self) -> &'static Selector {
        self.selector
    }

    /// Binds `value` to `property`, replacing any earlier binding.
    ///
    /// # Errors
    /// - `UnknownProperty` when `property` is not part of the selector.
    /// - `TypeMismatch` when `value` does not have the property's type.
    pub fn set_property(
        &mut self,
        property: &Property,
        value: impl Into<Value>,
    ) -> DomainResult<&mut Self> {
        if !self.selector.contains(property) {
            return Err(DomainError::UnknownProperty {
                selector: self.selector.name(),
                property: property.name(),
            });
        }
        let value = value.into();
        if value.value_type() != property.value_type() {
            return Err(DomainError::TypeMismatch {
                property: property.name(),
                expected: property.value_type(),
                actual: value.value_type(),
            });
        }
        self.values.insert(property.name(), value);
        Ok(self)
    }

    /// Returns the only matching element.
    ///
    /// # Errors
    /// - `NotFound` when nothing matches.
    /// - `MultipleResults` when more than one element matches.
    pub fn query(self) -> DomainResult<E> {
        let selector = self.selector.name();
        let detail = self.describe();
        let mut elements = self.query_all()?;
        match elements.len() {
            0 => Err(DomainError::NotFound {
                element: E::KIND,
                detail,
            }),
            1 => Ok(elements.remove(0)),
            count => Err(DomainError::MultipleResults {
                element: E::KIND,
                selector,
                count,
            }),
        }
    }

    /// Returns every matching element ordered by id.
    pub fn query_all(self) -> DomainResult<Vec<E>> {
        let missing: Vec<&str> = self
            .selector
            .properties()
            .iter()
            .map(Property::name)
            .filter(|name| !self.values.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::InvalidArgument(format!(
                "query `{}` is missing properties: {}",
                self.selector.name(),
                missing.join(", ")
            )));
        }

        let request = QueryRequest::new(E::KIND, self.selector, self.values);
        let rows = self.datastore.execute(&request)?;
        debug!(
            "event=query_execute module=query status=ok element={} selector={} rows={}",
            E::KIND,
            request.selector(),
            rows.len()
        );

        rows.into_iter()
            .map(|row| E::from_record(row.id, &row.record).map_err(DomainError::from))
            .collect()
    }

    fn describe(&self) -> String {
        let bindings: Vec<String> = self
            .values
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        format!("{}({})", self.selector.name(), bindings.join(", "))
    }
}
