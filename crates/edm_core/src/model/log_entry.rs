//! Activity log: actions performed by enrolled participants.

use super::{
    check_non_negative, check_text, read_optional_text, read_reference, read_text,
    read_timestamp, record_of, Cardinality, Element, ElementId, ElementKind, ElementRef, Property,
    Record, Selector, Value, ValueType,
};
use crate::builder::{ActionBuilder, LogEntryBuilder};
use crate::datastore::StoreResult;
use crate::error::DomainResult;
use crate::loader::{ActionLoader, LogEntryLoader};

/// Named action recorded in the log, e.g. `view` or `submit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    id: Option<ElementId>,
    name: String,
}

impl Action {
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

impl Element for Action {
    const KIND: ElementKind = ElementKind::Action;
    const SELECTORS: &'static [Selector] = &[Selector::ID, Selector::ALL, Self::SELECTOR_NAME];

    type Builder = dyn ActionBuilder;
    type Loader = dyn ActionLoader;

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

/// One logged action by an enrolment on an activity.
///
/// `course` is copied from the activity when the entry is built so that
/// per-course log queries do not need to resolve activities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogEntry {
    id: Option<ElementId>,
    enrolment: ElementRef,
    activity: ElementRef,
    course: ElementRef,
    action: ElementRef,
    time: i64,
    ip_address: Option<String>,
}

impl LogEntry {
    pub const ENROLMENT: Property =
        Property::new("enrolment", ValueType::Reference(ElementKind::Enrolment));
    pub const ACTIVITY: Property =
        Property::new("activity", ValueType::Reference(ElementKind::Activity));
    pub const COURSE: Property =
        Property::new("course", ValueType::Reference(ElementKind::Course));
    pub const ACTION: Property =
        Property::new("action", ValueType::Reference(ElementKind::Action));
    pub const TIME: Property = Property::new("time", ValueType::Timestamp);
    pub const IP_ADDRESS: Property = Property::new("ip_address", ValueType::Text);

    pub const SELECTOR_COURSE: Selector =
        Selector::new("course", Cardinality::Multiple, &[Self::COURSE]);
    pub const SELECTOR_ENROLMENT: Selector =
        Selector::new("enrolment", Cardinality::Multiple, &[Self::ENROLMENT]);

    pub fn new(
        enrolment: ElementRef,
        activity: ElementRef,
        course: ElementRef,
        action: ElementRef,
        time: i64,
    ) -> Self {
        Self {
            id: None,
            enrolment,
            activity,
            course,
            action,
            time,
            ip_address: None,
        }
    }

    pub fn with_ip_address(self, ip_address: Option<String>) -> Self {
        Self { ip_address, ..self }
    }

    pub fn enrolment(&self) -> ElementRef {
        self.enrolment
    }

    pub fn activity(&self) -> ElementRef {
        self.activity
    }

    pub fn course(&self) -> ElementRef {
        self.course
    }

    pub fn action(&self) -> ElementRef {
        self.action
    }

    /// Unix epoch milliseconds.
    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }
}

impl Element for LogEntry {
    const KIND: ElementKind = ElementKind::LogEntry;
    const SELECTORS: &'static [Selector] = &[
        Selector::ID,
        Selector::ALL,
        Self::SELECTOR_COURSE,
        Self::SELECTOR_ENROLMENT,
    ];

    type Builder = dyn LogEntryBuilder;
    type Loader = dyn LogEntryLoader;

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn with_id(self, id: ElementId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn to_record(&self) -> Record {
        record_of([
            (Self::ENROLMENT, Some(self.enrolment.into())),
            (Self::ACTIVITY, Some(self.activity.into())),
            (Self::COURSE, Some(self.course.into())),
            (Self::ACTION, Some(self.action.into())),
            (Self::TIME, Some(Value::Timestamp(self.time))),
            (Self::IP_ADDRESS, self.ip_address.as_deref().map(Into::into)),
        ])
    }

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            id: Some(id),
            enrolment: read_reference(record, &Self::ENROLMENT)?,
            activity: read_reference(record, &Self::ACTIVITY)?,
            course: read_reference(record, &Self::COURSE)?,
            action: read_reference(record, &Self::ACTION)?,
            time: read_timestamp(record, &Self::TIME)?,
            ip_address: read_optional_text(record, &Self::IP_ADDRESS)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        check_non_negative("time", self.time)?;
        if let Some(ip_address) = &self.ip_address {
            check_text("ip_address", ip_address)?;
        }
        Ok(())
    }
}
