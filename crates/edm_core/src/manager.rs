//! Per-element façade over builders, loaders and the data store.
//!
//! # Responsibility
//! - Vend builders and loaders selected by the model's profile.
//! - Persist, remove and look up elements of one type.
//!
//! # Invariants
//! - A manager never keeps the data store alive; it holds a weak reference.
//! - Once the owning model is dropped or closed, every operation fails with
//!   `StoreError::Closed`.

use crate::datastore::{DataStore, QueryRequest, StoreError, StoreResult};
use crate::error::{DomainError, DomainResult};
use crate::loader::ElementLoader;
use crate::model::{Element, ElementId, ElementRef, Selector};
use crate::profile::Profile;
use crate::query::Query;
use crate::registry::{Implementation, MappedFactory};
use log::debug;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

pub struct Manager<E> {
    datastore: Weak<dyn DataStore>,
    profile: Arc<Profile>,
    marker: PhantomData<fn() -> E>,
}

impl<E> Clone for Manager<E> {
    fn clone(&self) -> Self {
        Self {
            datastore: Weak::clone(&self.datastore),
            profile: Arc::clone(&self.profile),
            marker: PhantomData,
        }
    }
}

impl<E: Element> Manager<E> {
    pub(crate) fn new(datastore: Weak<dyn DataStore>, profile: Arc<Profile>) -> Self {
        Self {
            datastore,
            profile,
            marker: PhantomData,
        }
    }

    /// Returns a manager for another element type bound to the same store.
    pub fn for_element<F: Element>(&self) -> Manager<F> {
        Manager::new(Weak::clone(&self.datastore), Arc::clone(&self.profile))
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the live data store.
    pub fn data_store(&self) -> StoreResult<Arc<dyn DataStore>> {
        match self.datastore.upgrade() {
            Some(datastore) if datastore.is_open() => Ok(datastore),
            _ => Err(StoreError::Closed),
        }
    }

    /// Creates the builder implementation the profile selects for `E`.
    pub fn builder(&self) -> DomainResult<Box<E::Builder>> {
        self.builder_with(self.profile.builder_for::<E>()?)
    }

    /// Creates a specific registered builder implementation.
    pub fn builder_with(&self, implementation: Implementation) -> DomainResult<Box<E::Builder>> {
        MappedFactory::<E::Builder, Manager<E>>::instance::<E>()
            .create(implementation, self.clone())
    }

    pub fn loader(&self) -> DomainResult<Box<E::Loader>> {
        self.loader_with(self.profile.loader_for::<E>()?)
    }

    pub fn loader_with(&self, implementation: Implementation) -> DomainResult<Box<E::Loader>> {
        MappedFactory::<E::Loader, Manager<E>>::instance::<E>()
            .create(implementation, self.clone())
    }

    pub fn fetch_by_id(&self, id: ElementId) -> DomainResult<E> {
        self.loader()?.fetch_by_id(id)
    }

    pub fn fetch_all(&self) -> DomainResult<Vec<E>> {
        self.loader()?.fetch_all()
    }

    pub fn fetch_query(&self, selector: &Selector) -> DomainResult<Query<E>> {
        self.loader()?.fetch_query(selector)
    }

    /// Looks up the element `reference` points at.
    ///
    /// # Errors
    /// - `InvalidArgument` when `reference` points at another kind.
    pub fn resolve(&self, reference: ElementRef) -> DomainResult<E> {
        if reference.kind != E::KIND {
            return Err(DomainError::InvalidArgument(format!(
                "{reference} does not refer to a {}",
                E::KIND
            )));
        }
        self.fetch_by_id(reference.id)
    }

    /// Validates and stores `element`, returning it with its storage id.
    ///
    /// An element that already has an id replaces the stored version.
    ///
    /// # Errors
    /// - `InvalidArgument` when `element` carries a non-positive id.
    pub fn insert(&self, element: E) -> DomainResult<E> {
        if let Some(id) = element.id().filter(|id| *id <= 0) {
            return Err(DomainError::InvalidArgument(format!(
                "{} id must be positive, got {id}",
                E::KIND
            )));
        }
        element.validate()?;
        let datastore = self.data_store()?;
        let id = datastore.persist(E::KIND, element.id(), &element.to_record())?;
        debug!(
            "event=element_persist module=manager status=ok element={} id={id} backend={}",
            E::KIND,
            datastore.name()
        );
        Ok(element.with_id(id))
    }

    /// Deletes `element`. Returns `false` when it was not stored.
    pub fn remove(&self, element: &E) -> DomainResult<bool> {
        let Some(id) = element.id() else {
            return Ok(false);
        };
        let removed = self.data_store()?.remove(E::KIND, id)?;
        debug!(
            "event=element_remove module=manager status=ok element={} id={id} removed={removed}",
            E::KIND
        );
        Ok(removed)
    }

    /// Whether `element` is present in the data store.
    pub fn contains(&self, element: &E) -> DomainResult<bool> {
        let Some(id) = element.id() else {
            return Ok(false);
        };
        let rows = self
            .data_store()?
            .execute(&QueryRequest::by_id(E::KIND, id))?;
        Ok(!rows.is_empty())
    }
}
