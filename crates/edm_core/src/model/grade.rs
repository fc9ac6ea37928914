//! Marks awarded for graded activities.

use super::{
    read_reference, read_small_integer, record_of, Cardinality, Element, ElementId, ElementKind,
    ElementRef, Property, Record, Selector, ValueType,
};
use crate::builder::GradeBuilder;
use crate::datastore::StoreResult;
use crate::error::{field_percentage, DomainResult};
use crate::loader::GradeLoader;

/// Percentage grade one enrolment received for one activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grade {
    id: Option<ElementId>,
    enrolment: ElementRef,
    activity: ElementRef,
    grade: i32,
}

impl Grade {
    pub const ENROLMENT: Property =
        Property::new("enrolment", ValueType::Reference(ElementKind::Enrolment));
    pub const ACTIVITY: Property =
        Property::new("activity", ValueType::Reference(ElementKind::Activity));
    pub const GRADE: Property = Property::new("grade", ValueType::Integer);

    pub const SELECTOR_ENROLMENT: Selector =
        Selector::new("enrolment", Cardinality::Multiple, &[Self::ENROLMENT]);
    /// Expected to match at most one grade; inserts do not enforce it.
    pub const SELECTOR_ENROLMENT_ACTIVITY: Selector = Selector::new(
        "enrolment_activity",
        Cardinality::Single,
        &[Self::ENROLMENT, Self::ACTIVITY],
    );

    pub fn new(enrolment: ElementRef, activity: ElementRef, grade: i32) -> Self {
        Self {
            id: None,
            enrolment,
            activity,
            grade,
        }
    }

    pub fn enrolment(&self) -> ElementRef {
        self.enrolment
    }

    pub fn activity(&self) -> ElementRef {
        self.activity
    }

    pub fn grade(&self) -> i32 {
        self.grade
    }
}

impl Element for Grade {
    const KIND: ElementKind = ElementKind::Grade;
    const SELECTORS: &'static [Selector] = &[
        Selector::ID,
        Selector::ALL,
        Self::SELECTOR_ENROLMENT,
        Self::SELECTOR_ENROLMENT_ACTIVITY,
    ];

    type Builder = dyn GradeBuilder;
    type Loader = dyn GradeLoader;

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
            (Self::GRADE, Some(self.grade.into())),
        ])
    }

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            id: Some(id),
            enrolment: read_reference(record, &Self::ENROLMENT)?,
            activity: read_reference(record, &Self::ACTIVITY)?,
            grade: read_small_integer(record, &Self::GRADE)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        field_percentage("grade", self.grade).map(|_| ())
    }
}
