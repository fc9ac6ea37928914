use super::{BuilderCore, BuilderState, ElementBuilder, Field};
use crate::error::{field_text, DomainError, DomainResult};
use crate::manager::Manager;
use crate::model::{Activity, ActivitySource, ActivityType, Course, Element, ElementRef};

/// Builder contract for `ActivitySource`.
pub trait ActivitySourceBuilder: ElementBuilder<ActivitySource> {
    fn name(&self) -> Option<&str>;

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn ActivitySourceBuilder>;
}

/// Builder contract for `ActivityType`.
pub trait ActivityTypeBuilder: ElementBuilder<ActivityType> {
    fn name(&self) -> Option<&str>;

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn ActivityTypeBuilder>;

    fn activity_source(&self) -> Option<ElementRef>;

    /// # Errors
    /// - `InvalidArgument` when `source` has not been persisted.
    fn set_activity_source(
        &mut self,
        source: &ActivitySource,
    ) -> DomainResult<&mut dyn ActivityTypeBuilder>;
}

/// Builder contract for `Activity`.
pub trait ActivityBuilder: ElementBuilder<Activity> {
    fn activity_type(&self) -> Option<ElementRef>;

    fn set_activity_type(
        &mut self,
        activity_type: &ActivityType,
    ) -> DomainResult<&mut dyn ActivityBuilder>;

    fn course(&self) -> Option<ElementRef>;

    /// # Errors
    /// - `InvalidArgument` when `course` is not present in the data store.
    fn set_course(&mut self, course: &Course) -> DomainResult<&mut dyn ActivityBuilder>;

    fn name(&self) -> Option<&str>;

    /// Sets or (with `None`) unsets the optional display name.
    fn set_name(&mut self, name: Option<&str>) -> DomainResult<&mut dyn ActivityBuilder>;
}

pub struct DefaultActivitySourceBuilder {
    core: BuilderCore<ActivitySource>,
    name: Option<String>,
}

impl DefaultActivitySourceBuilder {
    const NAME: Field = Field::new(0, "name");
    const FIELDS: &'static [Field] = &[Self::NAME];

    pub fn new(manager: Manager<ActivitySource>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::FIELDS),
            name: None,
        }
    }
}

impl ElementBuilder<ActivitySource> for DefaultActivitySourceBuilder {
    fn manager(&self) -> &Manager<ActivitySource> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<ActivitySource> {
        self.core.require_complete()?;
        let source = ActivitySource::new(self.core.required(Self::NAME, &self.name)?);
        self.core.finish(source)
    }

    fn clear(&mut self) {
        self.name = None;
        self.core.reset();
    }

    fn load(&mut self, element: &ActivitySource) -> DomainResult<()> {
        element.validate()?;
        self.name = Some(element.name().to_string());
        self.core.mark_loaded(element.id());
        Ok(())
    }
}

impl ActivitySourceBuilder for DefaultActivitySourceBuilder {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn ActivitySourceBuilder> {
        self.name = Some(field_text("name", name)?);
        self.core.mark(Self::NAME);
        Ok(self)
    }
}

pub struct DefaultActivityTypeBuilder {
    core: BuilderCore<ActivityType>,
    name: Option<String>,
    source: Option<ElementRef>,
}

impl DefaultActivityTypeBuilder {
    const NAME: Field = Field::new(0, "name");
    const SOURCE: Field = Field::new(1, "activity_source");
    const FIELDS: &'static [Field] = &[Self::NAME, Self::SOURCE];

    pub fn new(manager: Manager<ActivityType>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::FIELDS),
            name: None,
            source: None,
        }
    }
}

impl ElementBuilder<ActivityType> for DefaultActivityTypeBuilder {
    fn manager(&self) -> &Manager<ActivityType> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<ActivityType> {
        self.core.require_complete()?;
        let activity_type = ActivityType::new(
            self.core.required(Self::SOURCE, &self.source)?,
            self.core.required(Self::NAME, &self.name)?,
        );
        self.core.finish(activity_type)
    }

    fn clear(&mut self) {
        self.name = None;
        self.source = None;
        self.core.reset();
    }

    fn load(&mut self, element: &ActivityType) -> DomainResult<()> {
        element.validate()?;
        self.name = Some(element.name().to_string());
        self.source = Some(element.source());
        self.core.mark_loaded(element.id());
        Ok(())
    }
}

impl ActivityTypeBuilder for DefaultActivityTypeBuilder {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn ActivityTypeBuilder> {
        self.name = Some(field_text("name", name)?);
        self.core.mark(Self::NAME);
        Ok(self)
    }

    fn activity_source(&self) -> Option<ElementRef> {
        self.source
    }

    fn set_activity_source(
        &mut self,
        source: &ActivitySource,
    ) -> DomainResult<&mut dyn ActivityTypeBuilder> {
        self.source = Some(ElementRef::to(source)?);
        self.core.mark(Self::SOURCE);
        Ok(self)
    }
}

pub struct DefaultActivityBuilder {
    core: BuilderCore<Activity>,
    activity_type: Option<ElementRef>,
    course: Option<ElementRef>,
    name: Option<String>,
}

impl DefaultActivityBuilder {
    const TYPE: Field = Field::new(0, "activity_type");
    const COURSE: Field = Field::new(1, "course");
    const NAME: Field = Field::new(2, "name");
    const FIELDS: &'static [Field] = &[Self::TYPE, Self::COURSE, Self::NAME];
    const REQUIRED: &'static [Field] = &[Self::TYPE, Self::COURSE];

    pub fn new(manager: Manager<Activity>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::REQUIRED),
            activity_type: None,
            course: None,
            name: None,
        }
    }
}

impl ElementBuilder<Activity> for DefaultActivityBuilder {
    fn manager(&self) -> &Manager<Activity> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<Activity> {
        self.core.require_complete()?;
        let mut activity = Activity::new(
            self.core.required(Self::TYPE, &self.activity_type)?,
            self.core.required(Self::COURSE, &self.course)?,
        );
        if let Some(name) = &self.name {
            activity = activity.with_name(name.as_str());
        }
        self.core.finish(activity)
    }

    fn clear(&mut self) {
        self.activity_type = None;
        self.course = None;
        self.name = None;
        self.core.reset();
    }

    fn load(&mut self, element: &Activity) -> DomainResult<()> {
        element.validate()?;
        self.activity_type = Some(element.activity_type());
        self.course = Some(element.course());
        self.name = element.name().map(str::to_string);
        self.core.mark_loaded(element.id());
        if self.name.is_none() {
            self.core.unmark(Self::NAME);
        }
        Ok(())
    }
}

impl ActivityBuilder for DefaultActivityBuilder {
    fn activity_type(&self) -> Option<ElementRef> {
        self.activity_type
    }

    fn set_activity_type(
        &mut self,
        activity_type: &ActivityType,
    ) -> DomainResult<&mut dyn ActivityBuilder> {
        self.activity_type = Some(ElementRef::to(activity_type)?);
        self.core.mark(Self::TYPE);
        Ok(self)
    }

    fn course(&self) -> Option<ElementRef> {
        self.course
    }

    fn set_course(&mut self, course: &Course) -> DomainResult<&mut dyn ActivityBuilder> {
        let reference = ElementRef::to(course)?;
        if !self.core.manager().for_element::<Course>().contains(course)? {
            return Err(DomainError::InvalidArgument(format!(
                "{reference} is not present in the data store"
            )));
        }
        self.course = Some(reference);
        self.core.mark(Self::COURSE);
        Ok(self)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: Option<&str>) -> DomainResult<&mut dyn ActivityBuilder> {
        match name {
            Some(name) => {
                self.name = Some(field_text("name", name)?);
                self.core.mark(Self::NAME);
            }
            None => {
                self.name = None;
                self.core.unmark(Self::NAME);
            }
        }
        Ok(self)
    }
}
