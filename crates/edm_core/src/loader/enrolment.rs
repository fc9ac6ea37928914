use super::{ElementLoader, LoaderCore};
use crate::error::DomainResult;
use crate::manager::Manager;
use crate::model::{Course, ElementRef, Enrolment, Role, User};

/// Loader contract for `Enrolment`.
pub trait EnrolmentLoader: ElementLoader<Enrolment> {
    fn fetch_all_for_role(&self, role: &Role) -> DomainResult<Vec<Enrolment>>;

    fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<Enrolment>>;

    fn fetch_all_for_user(&self, user: &User) -> DomainResult<Vec<Enrolment>>;
}

pub struct DefaultEnrolmentLoader {
    core: LoaderCore<Enrolment>,
}

impl DefaultEnrolmentLoader {
    pub fn new(manager: Manager<Enrolment>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<Enrolment> for DefaultEnrolmentLoader {
    fn core(&self) -> &LoaderCore<Enrolment> {
        &self.core
    }
}

impl EnrolmentLoader for DefaultEnrolmentLoader {
    fn fetch_all_for_role(&self, role: &Role) -> DomainResult<Vec<Enrolment>> {
        let role = ElementRef::to(role)?;
        let mut query = self.core.fetch_query(&Enrolment::SELECTOR_ROLE)?;
        query.set_property(&Enrolment::ROLE, role)?;
        query.query_all()
    }

    fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<Enrolment>> {
        let course = ElementRef::to(course)?;
        let mut query = self.core.fetch_query(&Enrolment::SELECTOR_COURSE)?;
        query.set_property(&Enrolment::COURSE, course)?;
        query.query_all()
    }

    fn fetch_all_for_user(&self, user: &User) -> DomainResult<Vec<Enrolment>> {
        let user = ElementRef::to(user)?;
        let mut query = self.core.fetch_query(&Enrolment::SELECTOR_USER)?;
        query.set_property(&Enrolment::USER, user)?;
        query.query_all()
    }
}

impl Manager<Enrolment> {
    pub fn fetch_all_for_role(&self, role: &Role) -> DomainResult<Vec<Enrolment>> {
        self.loader()?.fetch_all_for_role(role)
    }

    pub fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<Enrolment>> {
        self.loader()?.fetch_all_for_course(course)
    }

    pub fn fetch_all_for_user(&self, user: &User) -> DomainResult<Vec<Enrolment>> {
        self.loader()?.fetch_all_for_user(user)
    }
}
