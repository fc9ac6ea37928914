//! Per-model selection of builder and loader implementations.

use crate::error::{DomainError, DomainResult};
use crate::model::Element;
use crate::registry::Implementation;
use std::any::{type_name, TypeId};
use std::collections::HashMap;

/// Maps each element type to the implementation serving its contracts.
///
/// A profile only selects; the implementations themselves must be
/// registered with `register_builder` / `register_loader`.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    builders: HashMap<TypeId, Implementation>,
    loaders: HashMap<TypeId, Implementation>,
}

impl Profile {
    /// Profile with no selections.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder<E: Element, I: ?Sized + 'static>(mut self) -> Self {
        self.builders
            .insert(TypeId::of::<E>(), Implementation::of::<I>());
        self
    }

    pub fn with_loader<E: Element, I: ?Sized + 'static>(mut self) -> Self {
        self.loaders
            .insert(TypeId::of::<E>(), Implementation::of::<I>());
        self
    }

    /// # Errors
    /// - `UnknownImplementation` when no builder is selected for `E`.
    pub fn builder_for<E: Element>(&self) -> DomainResult<Implementation> {
        self.builders
            .get(&TypeId::of::<E>())
            .copied()
            .ok_or(DomainError::UnknownImplementation {
                contract: type_name::<E::Builder>(),
                implementation: "<unselected>",
            })
    }

    /// # Errors
    /// - `UnknownImplementation` when no loader is selected for `E`.
    pub fn loader_for<E: Element>(&self) -> DomainResult<Implementation> {
        self.loaders
            .get(&TypeId::of::<E>())
            .copied()
            .ok_or(DomainError::UnknownImplementation {
                contract: type_name::<E::Loader>(),
                implementation: "<unselected>",
            })
    }
}
