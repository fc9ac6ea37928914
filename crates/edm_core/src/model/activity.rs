//! Course activities and their classification.
//!
//! # Responsibility
//! - `ActivitySource` names the system an activity originates from.
//! - `ActivityType` classifies activities within one source.
//! - `Activity` is one instance of a type inside a course.

use super::{
    check_text, read_optional_text, read_reference, read_text, record_of, Cardinality, Element,
    ElementId, ElementKind, ElementRef, Property, Record, Selector, ValueType,
};
use crate::builder::{ActivityBuilder, ActivitySourceBuilder, ActivityTypeBuilder};
use crate::datastore::StoreResult;
use crate::error::DomainResult;
use crate::loader::{ActivityLoader, ActivitySourceLoader, ActivityTypeLoader};

/// Origin system of activities, e.g. `moodle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivitySource {
    id: Option<ElementId>,
    name: String,
}

impl ActivitySource {
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

impl Element for ActivitySource {
    const KIND: ElementKind = ElementKind::ActivitySource;
    const SELECTORS: &'static [Selector] = &[Selector::ID, Selector::ALL, Self::SELECTOR_NAME];

    type Builder = dyn ActivitySourceBuilder;
    type Loader = dyn ActivitySourceLoader;

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

/// Kind of activity within a source, e.g. `quiz` from `moodle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityType {
    id: Option<ElementId>,
    source: ElementRef,
    name: String,
}

impl ActivityType {
    pub const SOURCE: Property = Property::new(
        "source",
        ValueType::Reference(ElementKind::ActivitySource),
    );
    pub const NAME: Property = Property::new("name", ValueType::Text);

    /// Type names are unique per source.
    pub const SELECTOR_NAME: Selector =
        Selector::new("name", Cardinality::Single, &[Self::SOURCE, Self::NAME]);
    pub const SELECTOR_SOURCE: Selector =
        Selector::new("source", Cardinality::Multiple, &[Self::SOURCE]);

    pub fn new(source: ElementRef, name: impl Into<String>) -> Self {
        Self {
            id: None,
            source,
            name: name.into(),
        }
    }

    pub fn source(&self) -> ElementRef {
        self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Element for ActivityType {
    const KIND: ElementKind = ElementKind::ActivityType;
    const SELECTORS: &'static [Selector] = &[
        Selector::ID,
        Selector::ALL,
        Self::SELECTOR_NAME,
        Self::SELECTOR_SOURCE,
    ];

    type Builder = dyn ActivityTypeBuilder;
    type Loader = dyn ActivityTypeLoader;

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn with_id(self, id: ElementId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn to_record(&self) -> Record {
        record_of([
            (Self::SOURCE, Some(self.source.into())),
            (Self::NAME, Some(self.name.as_str().into())),
        ])
    }

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            id: Some(id),
            source: read_reference(record, &Self::SOURCE)?,
            name: read_text(record, &Self::NAME)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        check_text("name", &self.name)
    }
}

/// One activity of a given type in a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Activity {
    id: Option<ElementId>,
    activity_type: ElementRef,
    course: ElementRef,
    name: Option<String>,
}

impl Activity {
    pub const TYPE: Property =
        Property::new("type", ValueType::Reference(ElementKind::ActivityType));
    pub const COURSE: Property =
        Property::new("course", ValueType::Reference(ElementKind::Course));
    pub const NAME: Property = Property::new("name", ValueType::Text);

    pub const SELECTOR_TYPE: Selector =
        Selector::new("type", Cardinality::Multiple, &[Self::TYPE]);
    pub const SELECTOR_COURSE: Selector =
        Selector::new("course", Cardinality::Multiple, &[Self::COURSE]);

    pub fn new(activity_type: ElementRef, course: ElementRef) -> Self {
        Self {
            id: None,
            activity_type,
            course,
            name: None,
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn activity_type(&self) -> ElementRef {
        self.activity_type
    }

    pub fn course(&self) -> ElementRef {
        self.course
    }

    /// Display name, absent for activities that only exist as a type.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Element for Activity {
    const KIND: ElementKind = ElementKind::Activity;
    const SELECTORS: &'static [Selector] = &[
        Selector::ID,
        Selector::ALL,
        Self::SELECTOR_TYPE,
        Self::SELECTOR_COURSE,
    ];

    type Builder = dyn ActivityBuilder;
    type Loader = dyn ActivityLoader;

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn with_id(self, id: ElementId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn to_record(&self) -> Record {
        record_of([
            (Self::TYPE, Some(self.activity_type.into())),
            (Self::COURSE, Some(self.course.into())),
            (Self::NAME, self.name.as_deref().map(Into::into)),
        ])
    }

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            id: Some(id),
            activity_type: read_reference(record, &Self::TYPE)?,
            course: read_reference(record, &Self::COURSE)?,
            name: read_optional_text(record, &Self::NAME)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        match &self.name {
            Some(name) => check_text("name", name),
            None => Ok(()),
        }
    }
}
