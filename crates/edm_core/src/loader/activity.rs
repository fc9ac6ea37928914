use super::{ElementLoader, LoaderCore};
use crate::error::{argument_text, DomainResult};
use crate::manager::Manager;
use crate::model::{Activity, ActivitySource, ActivityType, Course, ElementRef};

/// Loader contract for `ActivitySource`.
pub trait ActivitySourceLoader: ElementLoader<ActivitySource> {
    fn fetch_by_name(&self, name: &str) -> DomainResult<ActivitySource>;
}

/// Loader contract for `ActivityType`.
pub trait ActivityTypeLoader: ElementLoader<ActivityType> {
    /// Returns the type called `name` within `source`.
    fn fetch_by_name(&self, source: &ActivitySource, name: &str) -> DomainResult<ActivityType>;

    fn fetch_all_for_source(&self, source: &ActivitySource) -> DomainResult<Vec<ActivityType>>;
}

/// Loader contract for `Activity`.
pub trait ActivityLoader: ElementLoader<Activity> {
    fn fetch_all_for_type(&self, activity_type: &ActivityType) -> DomainResult<Vec<Activity>>;

    fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<Activity>>;
}

pub struct DefaultActivitySourceLoader {
    core: LoaderCore<ActivitySource>,
}

impl DefaultActivitySourceLoader {
    pub fn new(manager: Manager<ActivitySource>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<ActivitySource> for DefaultActivitySourceLoader {
    fn core(&self) -> &LoaderCore<ActivitySource> {
        &self.core
    }
}

impl ActivitySourceLoader for DefaultActivitySourceLoader {
    fn fetch_by_name(&self, name: &str) -> DomainResult<ActivitySource> {
        let name = argument_text("name", name)?;
        let mut query = self.core.fetch_query(&ActivitySource::SELECTOR_NAME)?;
        query.set_property(&ActivitySource::NAME, name)?;
        query.query()
    }
}

pub struct DefaultActivityTypeLoader {
    core: LoaderCore<ActivityType>,
}

impl DefaultActivityTypeLoader {
    pub fn new(manager: Manager<ActivityType>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<ActivityType> for DefaultActivityTypeLoader {
    fn core(&self) -> &LoaderCore<ActivityType> {
        &self.core
    }
}

impl ActivityTypeLoader for DefaultActivityTypeLoader {
    fn fetch_by_name(&self, source: &ActivitySource, name: &str) -> DomainResult<ActivityType> {
        let source = ElementRef::to(source)?;
        let name = argument_text("name", name)?;
        let mut query = self.core.fetch_query(&ActivityType::SELECTOR_NAME)?;
        query
            .set_property(&ActivityType::SOURCE, source)?
            .set_property(&ActivityType::NAME, name)?;
        query.query()
    }

    fn fetch_all_for_source(&self, source: &ActivitySource) -> DomainResult<Vec<ActivityType>> {
        let source = ElementRef::to(source)?;
        let mut query = self.core.fetch_query(&ActivityType::SELECTOR_SOURCE)?;
        query.set_property(&ActivityType::SOURCE, source)?;
        query.query_all()
    }
}

pub struct DefaultActivityLoader {
    core: LoaderCore<Activity>,
}

impl DefaultActivityLoader {
    pub fn new(manager: Manager<Activity>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<Activity> for DefaultActivityLoader {
    fn core(&self) -> &LoaderCore<Activity> {
        &self.core
    }
}

impl ActivityLoader for DefaultActivityLoader {
    fn fetch_all_for_type(&self, activity_type: &ActivityType) -> DomainResult<Vec<Activity>> {
        let activity_type = ElementRef::to(activity_type)?;
        let mut query = self.core.fetch_query(&Activity::SELECTOR_TYPE)?;
        query.set_property(&Activity::TYPE, activity_type)?;
        query.query_all()
    }

    fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<Activity>> {
        let course = ElementRef::to(course)?;
        let mut query = self.core.fetch_query(&Activity::SELECTOR_COURSE)?;
        query.set_property(&Activity::COURSE, course)?;
        query.query_all()
    }
}

impl Manager<ActivitySource> {
    pub fn fetch_by_name(&self, name: &str) -> DomainResult<ActivitySource> {
        self.loader()?.fetch_by_name(name)
    }
}

impl Manager<ActivityType> {
    pub fn fetch_by_name(
        &self,
        source: &ActivitySource,
        name: &str,
    ) -> DomainResult<ActivityType> {
        self.loader()?.fetch_by_name(source, name)
    }

    pub fn fetch_all_for_source(
        &self,
        source: &ActivitySource,
    ) -> DomainResult<Vec<ActivityType>> {
        self.loader()?.fetch_all_for_source(source)
    }
}

impl Manager<Activity> {
    pub fn fetch_all_for_type(&self, activity_type: &ActivityType) -> DomainResult<Vec<Activity>> {
        self.loader()?.fetch_all_for_type(activity_type)
    }

    pub fn fetch_all_for_course(&self, course: &Course) -> DomainResult<Vec<Activity>> {
        self.loader()?.fetch_all_for_course(course)
    }
}
