use super::{ElementLoader, LoaderCore};
use crate::error::{argument_text, DomainResult};
use crate::manager::Manager;
use crate::model::{Action, Course, ElementRef, Enrolment, LogEntry};

/// Loader contract for `Action`.
pub trait ActionLoader: ElementLoader<Action> {
    fn fetch_by_name(&self, name: &str) -> DomainResult<Action>;
}

/// Loader contract for `LogEntry`.
pub trait LogEntryLoader: ElementLoader<LogEntry> {
    fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<LogEntry>>;

    fn fetch_all_for_enrolment(&self, enrolment: &Enrolment) -> DomainResult<Vec<LogEntry>>;
}

pub struct DefaultActionLoader {
    core: LoaderCore<Action>,
}

impl DefaultActionLoader {
    pub fn new(manager: Manager<Action>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<Action> for DefaultActionLoader {
    fn core(&self) -> &LoaderCore<Action> {
        &self.core
    }
}

impl ActionLoader for DefaultActionLoader {
    fn fetch_by_name(&self, name: &str) -> DomainResult<Action> {
        let name = argument_text("name", name)?;
        let mut query = self.core.fetch_query(&Action::SELECTOR_NAME)?;
        query.set_property(&Action::NAME, name)?;
        query.query()
    }
}

pub struct DefaultLogEntryLoader {
    core: LoaderCore<LogEntry>,
}

impl DefaultLogEntryLoader {
    pub fn new(manager: Manager<LogEntry>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<LogEntry> for DefaultLogEntryLoader {
    fn core(&self) -> &LoaderCore<LogEntry> {
        &self.core
    }
}

impl LogEntryLoader for DefaultLogEntryLoader {
    fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<LogEntry>> {
        let course = ElementRef::to(course)?;
        let mut query = self.core.fetch_query(&LogEntry::SELECTOR_COURSE)?;
        query.set_property(&LogEntry::COURSE, course)?;
        query.query_all()
    }

    fn fetch_all_for_enrolment(&self, enrolment: &Enrolment) -> DomainResult<Vec<LogEntry>> {
        let enrolment = ElementRef::to(enrolment)?;
        let mut query = self.core.fetch_query(&LogEntry::SELECTOR_ENROLMENT)?;
        query.set_property(&LogEntry::ENROLMENT, enrolment)?;
        query.query_all()
    }
}

impl Manager<Action> {
    pub fn fetch_by_name(&self, name: &str) -> DomainResult<Action> {
        self.loader()?.fetch_by_name(name)
    }
}

impl Manager<LogEntry> {
    pub fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<LogEntry>> {
        self.loader()?.fetch_all_for_course(course)
    }

    pub fn fetch_all_for_enrolment(&self, enrolment: &Enrolment) -> DomainResult<Vec<LogEntry>> {
        self.loader()?.fetch_all_for_enrolment(enrolment)
    }
}
