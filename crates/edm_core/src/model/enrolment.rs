//! Membership of a user in a course under a role.

use super::{
    read_boolean, read_optional_small_integer, read_reference, record_of, Cardinality, Element,
    ElementId, ElementKind, ElementRef, Property, Record, Selector, ValueType,
};
use crate::builder::EnrolmentBuilder;
use crate::datastore::StoreResult;
use crate::error::{field_percentage, DomainResult};
use crate::loader::EnrolmentLoader;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Enrolment {
    id: Option<ElementId>,
    user: ElementRef,
    course: ElementRef,
    role: ElementRef,
    final_grade: Option<i32>,
    usable: bool,
}

impl Enrolment {
    pub const USER: Property = Property::new("user", ValueType::Reference(ElementKind::User));
    pub const COURSE: Property =
        Property::new("course", ValueType::Reference(ElementKind::Course));
    pub const ROLE: Property = Property::new("role", ValueType::Reference(ElementKind::Role));
    pub const FINAL_GRADE: Property = Property::new("final_grade", ValueType::Integer);
    pub const USABLE: Property = Property::new("usable", ValueType::Boolean);

    pub const SELECTOR_USER: Selector =
        Selector::new("user", Cardinality::Multiple, &[Self::USER]);
    pub const SELECTOR_COURSE: Selector =
        Selector::new("course", Cardinality::Multiple, &[Self::COURSE]);
    pub const SELECTOR_ROLE: Selector =
        Selector::new("role", Cardinality::Multiple, &[Self::ROLE]);

    /// Creates an unpersisted, usable enrolment with no final grade.
    pub fn new(user: ElementRef, course: ElementRef, role: ElementRef) -> Self {
        Self {
            id: None,
            user,
            course,
            role,
            final_grade: None,
            usable: true,
        }
    }

    pub fn with_final_grade(self, final_grade: Option<i32>) -> Self {
        Self {
            final_grade,
            ..self
        }
    }

    pub fn with_usable(self, usable: bool) -> Self {
        Self { usable, ..self }
    }

    pub fn user(&self) -> ElementRef {
        self.user
    }

    pub fn course(&self) -> ElementRef {
        self.course
    }

    pub fn role(&self) -> ElementRef {
        self.role
    }

    pub fn final_grade(&self) -> Option<i32> {
        self.final_grade
    }

    /// Whether the participant consented to research use of their data.
    pub fn is_usable(&self) -> bool {
        self.usable
    }
}

impl Element for Enrolment {
    const KIND: ElementKind = ElementKind::Enrolment;
    const SELECTORS: &'static [Selector] = &[
        Selector::ID,
        Selector::ALL,
        Self::SELECTOR_USER,
        Self::SELECTOR_COURSE,
        Self::SELECTOR_ROLE,
    ];

    type Builder = dyn EnrolmentBuilder;
    type Loader = dyn EnrolmentLoader;

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn with_id(self, id: ElementId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn to_record(&self) -> Record {
        record_of([
            (Self::USER, Some(self.user.into())),
            (Self::COURSE, Some(self.course.into())),
            (Self::ROLE, Some(self.role.into())),
            (Self::FINAL_GRADE, self.final_grade.map(Into::into)),
            (Self::USABLE, Some(self.usable.into())),
        ])
    }

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            id: Some(id),
            user: read_reference(record, &Self::USER)?,
            course: read_reference(record, &Self::COURSE)?,
            role: read_reference(record, &Self::ROLE)?,
            final_grade: read_optional_small_integer(record, &Self::FINAL_GRADE)?,
            usable: read_boolean(record, &Self::USABLE)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        if let Some(grade) = self.final_grade {
            field_percentage("final_grade", grade)?;
        }
        Ok(())
    }
}
