//! Loader contracts: retrieval by id, by selector, or by convenience query.
//!
//! # Responsibility
//! - Resolve elements through parameterized `Query` objects.
//! - Register loader implementations for their (element, contract) pair.
//!
//! # Invariants
//! - Every convenience method obtains one query, binds each property once
//!   and executes it once.
//! - Blank text and unpersisted references are rejected before any query.

use crate::error::{DomainError, DomainResult};
use crate::manager::Manager;
use crate::model::{Element, ElementId, Property, Selector};
use crate::query::Query;
use crate::registry::{Implementation, MappedFactory};

mod activity;
mod course;
mod enrolment;
mod grade;
mod log_entry;
mod role;
mod user;

pub use activity::{
    ActivityLoader, ActivitySourceLoader, ActivityTypeLoader, DefaultActivityLoader,
    DefaultActivitySourceLoader, DefaultActivityTypeLoader,
};
pub use course::{CourseLoader, DefaultCourseLoader};
pub use enrolment::{DefaultEnrolmentLoader, EnrolmentLoader};
pub use grade::{DefaultGradeLoader, GradeLoader};
pub use log_entry::{ActionLoader, DefaultActionLoader, DefaultLogEntryLoader, LogEntryLoader};
pub use role::{DefaultRoleLoader, RoleLoader};
pub use user::{DefaultUserLoader, UserLoader};

/// Contract shared by every element loader.
pub trait ElementLoader<E: Element>: Send {
    fn core(&self) -> &LoaderCore<E>;

    /// # Errors
    /// - `InvalidArgument` when `id` is not positive.
    /// - `NotFound` when no element of this kind has `id`.
    fn fetch_by_id(&self, id: ElementId) -> DomainResult<E> {
        self.core().fetch_by_id(id)
    }

    /// Returns every stored element of this kind, ordered by id.
    fn fetch_all(&self) -> DomainResult<Vec<E>> {
        self.core().fetch_all()
    }

    /// Returns a fresh query for `selector`.
    ///
    /// # Errors
    /// - `UnsupportedSelector` when `E` does not declare `selector`.
    fn fetch_query(&self, selector: &Selector) -> DomainResult<Query<E>> {
        self.core().fetch_query(selector)
    }
}

/// Query plumbing embedded by loader implementations.
pub struct LoaderCore<E> {
    manager: Manager<E>,
}

impl<E: Element> LoaderCore<E> {
    pub fn new(manager: Manager<E>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &Manager<E> {
        &self.manager
    }

    pub fn fetch_query(&self, selector: &Selector) -> DomainResult<Query<E>> {
        let declared = E::SELECTORS
            .iter()
            .find(|candidate| *candidate == selector)
            .ok_or_else(|| DomainError::UnsupportedSelector {
                element: E::KIND,
                selector: selector.name().to_string(),
            })?;
        Ok(Query::new(declared, self.manager.data_store()?))
    }

    pub fn fetch_by_id(&self, id: ElementId) -> DomainResult<E> {
        if id <= 0 {
            return Err(DomainError::InvalidArgument(format!(
                "{} id must be positive, got {id}",
                E::KIND
            )));
        }
        let mut query = self.fetch_query(&Selector::ID)?;
        query.set_property(&Property::ID, id)?;
        query.query()
    }

    pub fn fetch_all(&self) -> DomainResult<Vec<E>> {
        self.fetch_query(&Selector::ALL)?.query_all()
    }
}

/// Registers `factory` as implementation `I` of `E`'s loader contract.
pub fn register_loader<E, I, F>(factory: F)
where
    E: Element,
    I: ?Sized + 'static,
    F: Fn(Manager<E>) -> Box<E::Loader> + Send + Sync + 'static,
{
    MappedFactory::<E::Loader, Manager<E>>::instance::<E>()
        .register_class(Implementation::of::<I>(), factory);
}
