use super::{ElementLoader, LoaderCore};
use crate::error::DomainResult;
use crate::manager::Manager;
use crate::model::{Activity, ElementRef, Enrolment, Grade};

/// Loader contract for `Grade`.
pub trait GradeLoader: ElementLoader<Grade> {
    fn fetch_all_for_enrolment(&self, enrolment: &Enrolment) -> DomainResult<Vec<Grade>>;

    /// Returns the grade `enrolment` received for `activity`.
    fn fetch_for(&self, enrolment: &Enrolment, activity: &Activity) -> DomainResult<Grade>;
}

pub struct DefaultGradeLoader {
    core: LoaderCore<Grade>,
}

impl DefaultGradeLoader {
    pub fn new(manager: Manager<Grade>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<Grade> for DefaultGradeLoader {
    fn core(&self) -> &LoaderCore<Grade> {
        &self.core
    }
}

impl GradeLoader for DefaultGradeLoader {
    fn fetch_all_for_enrolment(&self, enrolment: &Enrolment) -> DomainResult<Vec<Grade>> {
        let enrolment = ElementRef::to(enrolment)?;
        let mut query = self.core.fetch_query(&Grade::SELECTOR_ENROLMENT)?;
        query.set_property(&Grade::ENROLMENT, enrolment)?;
        query.query_all()
    }

    fn fetch_for(&self, enrolment: &Enrolment, activity: &Activity) -> DomainResult<Grade> {
        let enrolment = ElementRef::to(enrolment)?;
        let activity = ElementRef::to(activity)?;
        let mut query = self.core.fetch_query(&Grade::SELECTOR_ENROLMENT_ACTIVITY)?;
        query
            .set_property(&Grade::ENROLMENT, enrolment)?
            .set_property(&Grade::ACTIVITY, activity)?;
        query.query()
    }
}

impl Manager<Grade> {
    pub fn fetch_all_for_enrolment(&self, enrolment: &Enrolment) -> DomainResult<Vec<Grade>> {
        self.loader()?.fetch_all_for_enrolment(enrolment)
    }

    pub fn fetch_for(&self, enrolment: &Enrolment, activity: &Activity) -> DomainResult<Grade> {
        self.loader()?.fetch_for(enrolment, activity)
    }
}
