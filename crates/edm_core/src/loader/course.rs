use super::{ElementLoader, LoaderCore};
use crate::error::{argument_text, DomainResult};
use crate::manager::Manager;
use crate::model::{Course, Semester};

/// Loader contract for `Course`.
pub trait CourseLoader: ElementLoader<Course> {
    /// Returns the offering of `name` in the given term.
    fn fetch_by_offering(&self, name: &str, semester: Semester, year: i32)
        -> DomainResult<Course>;
}

pub struct DefaultCourseLoader {
    core: LoaderCore<Course>,
}

impl DefaultCourseLoader {
    pub fn new(manager: Manager<Course>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<Course> for DefaultCourseLoader {
    fn core(&self) -> &LoaderCore<Course> {
        &self.core
    }
}

impl CourseLoader for DefaultCourseLoader {
    fn fetch_by_offering(
        &self,
        name: &str,
        semester: Semester,
        year: i32,
    ) -> DomainResult<Course> {
        let name = argument_text("name", name)?;
        let mut query = self.core.fetch_query(&Course::SELECTOR_OFFERING)?;
        query
            .set_property(&Course::NAME, name)?
            .set_property(&Course::SEMESTER, semester)?
            .set_property(&Course::YEAR, year)?;
        query.query()
    }
}

impl Manager<Course> {
    pub fn fetch_by_offering(
        &self,
        name: &str,
        semester: Semester,
        year: i32,
    ) -> DomainResult<Course> {
        self.loader()?.fetch_by_offering(name, semester, year)
    }
}
