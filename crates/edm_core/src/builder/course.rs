use super::{BuilderCore, BuilderState, ElementBuilder, Field};
use crate::error::{field_text, DomainError, DomainResult};
use crate::manager::Manager;
use crate::model::{Course, Element, Semester};

/// Builder contract for `Course`.
pub trait CourseBuilder: ElementBuilder<Course> {
    fn name(&self) -> Option<&str>;

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn CourseBuilder>;

    fn semester(&self) -> Option<Semester>;

    fn set_semester(&mut self, semester: Semester) -> DomainResult<&mut dyn CourseBuilder>;

    fn year(&self) -> Option<i32>;

    /// # Errors
    /// - `InvalidField` when `year` is negative.
    fn set_year(&mut self, year: i32) -> DomainResult<&mut dyn CourseBuilder>;
}

pub struct DefaultCourseBuilder {
    core: BuilderCore<Course>,
    name: Option<String>,
    semester: Option<Semester>,
    year: Option<i32>,
}

impl DefaultCourseBuilder {
    const NAME: Field = Field::new(0, "name");
    const SEMESTER: Field = Field::new(1, "semester");
    const YEAR: Field = Field::new(2, "year");
    const FIELDS: &'static [Field] = &[Self::NAME, Self::SEMESTER, Self::YEAR];

    pub fn new(manager: Manager<Course>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::FIELDS),
            name: None,
            semester: None,
            year: None,
        }
    }
}

impl ElementBuilder<Course> for DefaultCourseBuilder {
    fn manager(&self) -> &Manager<Course> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<Course> {
        self.core.require_complete()?;
        let course = Course::new(
            self.core.required(Self::NAME, &self.name)?,
            self.core.required(Self::SEMESTER, &self.semester)?,
            self.core.required(Self::YEAR, &self.year)?,
        );
        self.core.finish(course)
    }

    fn clear(&mut self) {
        self.name = None;
        self.semester = None;
        self.year = None;
        self.core.reset();
    }

    fn load(&mut self, element: &Course) -> DomainResult<()> {
        element.validate()?;
        self.name = Some(element.name().to_string());
        self.semester = Some(element.semester());
        self.year = Some(element.year());
        self.core.mark_loaded(element.id());
        Ok(())
    }
}

impl CourseBuilder for DefaultCourseBuilder {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn CourseBuilder> {
        self.name = Some(field_text("name", name)?);
        self.core.mark(Self::NAME);
        Ok(self)
    }

    fn semester(&self) -> Option<Semester> {
        self.semester
    }

    fn set_semester(&mut self, semester: Semester) -> DomainResult<&mut dyn CourseBuilder> {
        self.semester = Some(semester);
        self.core.mark(Self::SEMESTER);
        Ok(self)
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn set_year(&mut self, year: i32) -> DomainResult<&mut dyn CourseBuilder> {
        if year < 0 {
            return Err(DomainError::InvalidField {
                field: "year",
                message: format!("{year} must not be negative"),
            });
        }
        self.year = Some(year);
        self.core.mark(Self::YEAR);
        Ok(self)
    }
}
