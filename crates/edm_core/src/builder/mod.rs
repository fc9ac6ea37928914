//! Builder contracts and shared builder machinery.
//!
//! # Responsibility
//! - Accumulate field values and assemble one validated `Element`.
//! - Track builder lifecycle (`Unbound` -> `Partial` -> `Complete` -> `Built`).
//! - Register builder implementations for their (element, contract) pair.
//!
//! # Invariants
//! - `build()` never returns an element with a required field unset.
//! - A failed `build()` leaves builder state untouched.
//! - `clear()` returns the builder to `Unbound` with every field unset.

use crate::error::{DomainError, DomainResult};
use crate::manager::Manager;
use crate::model::{Element, ElementId};
use crate::registry::{Implementation, MappedFactory};
use log::{debug, warn};

mod activity;
mod course;
mod enrolment;
mod grade;
mod log_entry;
mod role;
mod user;

pub use activity::{
    ActivityBuilder, ActivitySourceBuilder, ActivityTypeBuilder, DefaultActivityBuilder,
    DefaultActivitySourceBuilder, DefaultActivityTypeBuilder,
};
pub use course::{CourseBuilder, DefaultCourseBuilder};
pub use enrolment::{DefaultEnrolmentBuilder, EnrolmentBuilder};
pub use grade::{DefaultGradeBuilder, GradeBuilder};
pub use log_entry::{ActionBuilder, DefaultActionBuilder, DefaultLogEntryBuilder, LogEntryBuilder};
pub use role::{DefaultRoleBuilder, RoleBuilder};
pub use user::{DefaultUserBuilder, UserBuilder};

/// Lifecycle of a builder instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderState {
    /// No field has been set.
    Unbound,
    /// Some fields are set but at least one required field is missing.
    Partial,
    /// Every required field is set.
    Complete,
    /// `build()` has succeeded at least once since the last `clear()`.
    Built,
}

/// One builder field slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    index: u8,
    name: &'static str,
}

impl Field {
    /// `index` must be below 16 and unique within one builder.
    pub const fn new(index: u8, name: &'static str) -> Self {
        Self { index, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    const fn bit(&self) -> u16 {
        1 << self.index
    }
}

/// Bitmask of set fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldSet(u16);

impl FieldSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn of(fields: &[Field]) -> Self {
        let mut bits = 0;
        let mut index = 0;
        while index < fields.len() {
            bits |= fields[index].bit();
            index += 1;
        }
        Self(bits)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn remove(&mut self, field: Field) {
        self.0 &= !field.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_superset(&self, other: FieldSet) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Contract shared by every element builder.
pub trait ElementBuilder<E: Element>: Send {
    /// Manager the builder was created for.
    fn manager(&self) -> &Manager<E>;

    fn state(&self) -> BuilderState;

    /// Assembles the element from the accumulated fields.
    ///
    /// # Errors
    /// - `IncompleteBuilder` when a required field is unset.
    /// - `InvalidField` when the assembled element violates a constraint.
    fn build(&mut self) -> DomainResult<E>;

    /// Unsets every field.
    fn clear(&mut self);

    /// Copies every field of `element` into this builder.
    ///
    /// A loaded element keeps its storage id, so building and inserting
    /// the result updates the stored element in place.
    fn load(&mut self, element: &E) -> DomainResult<()>;

    /// Builds the element and logs the outcome.
    fn create(&mut self) -> DomainResult<E> {
        let result = self.build();
        match &result {
            Ok(element) => debug!(
                "event=element_create module=builder status=ok element={} persisted={}",
                E::KIND,
                element.id().is_some()
            ),
            Err(err) => warn!(
                "event=element_create module=builder status=error element={} error={err}",
                E::KIND
            ),
        }
        result
    }
}

/// Field bookkeeping embedded by builder implementations.
pub struct BuilderCore<E> {
    manager: Manager<E>,
    fields: &'static [Field],
    required: FieldSet,
    set: FieldSet,
    state: BuilderState,
    loaded_id: Option<ElementId>,
}

impl<E: Element> BuilderCore<E> {
    /// `fields` lists every field of the builder; `required` is a subset.
    pub fn new(manager: Manager<E>, fields: &'static [Field], required: &[Field]) -> Self {
        Self {
            manager,
            fields,
            required: FieldSet::of(required),
            set: FieldSet::empty(),
            state: BuilderState::Unbound,
            loaded_id: None,
        }
    }

    pub fn manager(&self) -> &Manager<E> {
        &self.manager
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.set.contains(field)
    }

    /// Records that `field` now holds a value.
    pub fn mark(&mut self, field: Field) {
        self.set.insert(field);
        self.refresh();
    }

    /// Records that `field` no longer holds a value.
    pub fn unmark(&mut self, field: Field) {
        self.set.remove(field);
        self.refresh();
    }

    /// Marks every field as set and remembers the id of the loaded element.
    pub fn mark_loaded(&mut self, id: Option<ElementId>) {
        self.set = FieldSet::of(self.fields);
        self.loaded_id = id;
        self.refresh();
    }

    /// Fails with `IncompleteBuilder` listing every unset required field.
    pub fn require_complete(&self) -> DomainResult<()> {
        if self.set.is_superset(self.required) {
            return Ok(());
        }
        let missing = self
            .fields
            .iter()
            .filter(|field| self.required.contains(**field) && !self.set.contains(**field))
            .map(Field::name)
            .collect();
        Err(DomainError::IncompleteBuilder {
            element: E::KIND,
            missing,
        })
    }

    /// Returns the value of a required field.
    pub fn required<T: Clone>(&self, field: Field, value: &Option<T>) -> DomainResult<T> {
        value.clone().ok_or_else(|| DomainError::IncompleteBuilder {
            element: E::KIND,
            missing: vec![field.name()],
        })
    }

    /// Validates the assembled element and moves to `Built`.
    pub fn finish(&mut self, element: E) -> DomainResult<E> {
        element.validate()?;
        let element = match self.loaded_id {
            Some(id) => element.with_id(id),
            None => element,
        };
        self.state = BuilderState::Built;
        Ok(element)
    }

    pub fn reset(&mut self) {
        self.set = FieldSet::empty();
        self.loaded_id = None;
        self.state = BuilderState::Unbound;
    }

    fn refresh(&mut self) {
        if self.state == BuilderState::Built {
            return;
        }
        self.state = if self.set.is_empty() {
            BuilderState::Unbound
        } else if self.set.is_superset(self.required) {
            BuilderState::Complete
        } else {
            BuilderState::Partial
        };
    }
}

/// Registers `factory` as implementation `I` of `E`'s builder contract.
///
/// Re-registering the same implementation replaces the earlier factory.
pub fn register_builder<E, I, F>(factory: F)
where
    E: Element,
    I: ?Sized + 'static,
    F: Fn(Manager<E>) -> Box<E::Builder> + Send + Sync + 'static,
{
    MappedFactory::<E::Builder, Manager<E>>::instance::<E>()
        .register_class(Implementation::of::<I>(), factory);
}
