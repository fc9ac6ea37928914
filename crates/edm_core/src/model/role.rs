//! Participant roles within a course.

use super::{
    check_text, read_text, record_of, Cardinality, Element, ElementId, ElementKind, Property,
    Record, Selector, ValueType,
};
use crate::builder::RoleBuilder;
use crate::datastore::StoreResult;
use crate::error::DomainResult;
use crate::loader::RoleLoader;

/// Named role such as `Student` or `Instructor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role {
    id: Option<ElementId>,
    name: String,
}

impl Role {
    pub const NAME: Property = Property::new("name", ValueType::Text);
    pub const SELECTOR_NAME: Selector =
        Selector::new("name", Cardinality::Single, &[Self::NAME]);

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Element for Role {
    const KIND: ElementKind = ElementKind::Role;
    const SELECTORS: &'static [Selector] = &[Selector::ID, Selector::ALL, Self::SELECTOR_NAME];

    type Builder = dyn RoleBuilder;
    type Loader = dyn RoleLoader;

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn with_id(self, id: ElementId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn to_record(&self) -> Record {
        record_of([(Self::NAME, Some(self.name.as_str().into()))])
    }

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            id: Some(id),
            name: read_text(record, &Self::NAME)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        check_text("name", &self.name)
    }
}
