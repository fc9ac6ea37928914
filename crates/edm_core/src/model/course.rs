//! Course offerings and academic terms.

use super::{
    check_non_negative, check_text, read_semester, read_small_integer, read_text, record_of,
    Cardinality, Element, ElementId, ElementKind, Property, Record, Selector, ValueType,
};
use crate::builder::CourseBuilder;
use crate::datastore::StoreResult;
use crate::error::DomainResult;
use crate::loader::CourseLoader;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Academic term. Each semester spans four calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semester {
    /// January to April.
    Winter,
    /// May to August.
    Spring,
    /// September to December.
    Fall,
}

impl Semester {
    pub const ALL: [Semester; 3] = [Self::Winter, Self::Spring, Self::Fall];

    /// First month of the term, 1-based.
    pub fn start_month(self) -> u32 {
        match self {
            Self::Winter => 1,
            Self::Spring => 5,
            Self::Fall => 9,
        }
    }

    /// Last month of the term, 1-based and inclusive.
    pub fn end_month(self) -> u32 {
        self.start_month() + 3
    }

    /// Returns the semester containing `month` (1-based), if the month is valid.
    pub fn for_month(month: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|semester| (semester.start_month()..=semester.end_month()).contains(&month))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Fall => "fall",
        }
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One offering of a course in a given term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Course {
    id: Option<ElementId>,
    name: String,
    semester: Semester,
    year: i32,
}

impl Course {
    pub const NAME: Property = Property::new("name", ValueType::Text);
    pub const SEMESTER: Property = Property::new("semester", ValueType::Semester);
    pub const YEAR: Property = Property::new("year", ValueType::Integer);

    /// Name, semester and year identify one offering.
    pub const SELECTOR_OFFERING: Selector = Selector::new(
        "offering",
        Cardinality::Single,
        &[Self::NAME, Self::SEMESTER, Self::YEAR],
    );

    /// Creates an unpersisted course.
    pub fn new(name: impl Into<String>, semester: Semester, year: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            semester,
            year,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn semester(&self) -> Semester {
        self.semester
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl Element for Course {
    const KIND: ElementKind = ElementKind::Course;
    const SELECTORS: &'static [Selector] =
        &[Selector::ID, Selector::ALL, Self::SELECTOR_OFFERING];

    type Builder = dyn CourseBuilder;
    type Loader = dyn CourseLoader;

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn with_id(self, id: ElementId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn to_record(&self) -> Record {
        record_of([
            (Self::NAME, Some(self.name.as_str().into())),
            (Self::SEMESTER, Some(self.semester.into())),
            (Self::YEAR, Some(self.year.into())),
        ])
    }

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            id: Some(id),
            name: read_text(record, &Self::NAME)?,
            semester: read_semester(record, &Self::SEMESTER)?,
            year: read_small_integer(record, &Self::YEAR)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        check_text("name", &self.name)?;
        check_non_negative("year", i64::from(self.year))
    }
}
