use super::{BuilderCore, BuilderState, ElementBuilder, Field};
use crate::error::{field_text, DomainError, DomainResult};
use crate::manager::Manager;
use crate::model::{Action, Activity, Element, ElementRef, Enrolment, LogEntry};

/// Builder contract for `Action`.
pub trait ActionBuilder: ElementBuilder<Action> {
    fn name(&self) -> Option<&str>;

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn ActionBuilder>;
}

/// Builder contract for `LogEntry`.
///
/// The entry's course is taken from the activity passed to `set_activity`.
pub trait LogEntryBuilder: ElementBuilder<LogEntry> {
    fn enrolment(&self) -> Option<ElementRef>;

    fn set_enrolment(
        &mut self,
        enrolment: &Enrolment,
    ) -> DomainResult<&mut dyn LogEntryBuilder>;

    fn activity(&self) -> Option<ElementRef>;

    fn set_activity(&mut self, activity: &Activity) -> DomainResult<&mut dyn LogEntryBuilder>;

    fn action(&self) -> Option<ElementRef>;

    fn set_action(&mut self, action: &Action) -> DomainResult<&mut dyn LogEntryBuilder>;

    fn time(&self) -> Option<i64>;

    /// # Errors
    /// - `InvalidField` when `time` is before the epoch.
    fn set_time(&mut self, time: i64) -> DomainResult<&mut dyn LogEntryBuilder>;

    fn ip_address(&self) -> Option<&str>;

    fn set_ip_address(
        &mut self,
        ip_address: Option<&str>,
    ) -> DomainResult<&mut dyn LogEntryBuilder>;
}

pub struct DefaultActionBuilder {
    core: BuilderCore<Action>,
    name: Option<String>,
}

impl DefaultActionBuilder {
    const NAME: Field = Field::new(0, "name");
    const FIELDS: &'static [Field] = &[Self::NAME];

    pub fn new(manager: Manager<Action>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::FIELDS),
            name: None,
        }
    }
}

impl ElementBuilder<Action> for DefaultActionBuilder {
    fn manager(&self) -> &Manager<Action> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<Action> {
        self.core.require_complete()?;
        let action = Action::new(self.core.required(Self::NAME, &self.name)?);
        self.core.finish(action)
    }

    fn clear(&mut self) {
        self.name = None;
        self.core.reset();
    }

    fn load(&mut self, element: &Action) -> DomainResult<()> {
        element.validate()?;
        self.name = Some(element.name().to_string());
        self.core.mark_loaded(element.id());
        Ok(())
    }
}

impl ActionBuilder for DefaultActionBuilder {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn ActionBuilder> {
        self.name = Some(field_text("name", name)?);
        self.core.mark(Self::NAME);
        Ok(self)
    }
}

pub struct DefaultLogEntryBuilder {
    core: BuilderCore<LogEntry>,
    enrolment: Option<ElementRef>,
    activity: Option<ElementRef>,
    course: Option<ElementRef>,
    action: Option<ElementRef>,
    time: Option<i64>,
    ip_address: Option<String>,
}

impl DefaultLogEntryBuilder {
    const ENROLMENT: Field = Field::new(0, "enrolment");
    const ACTIVITY: Field = Field::new(1, "activity");
    const ACTION: Field = Field::new(2, "action");
    const TIME: Field = Field::new(3, "time");
    const IP_ADDRESS: Field = Field::new(4, "ip_address");
    const FIELDS: &'static [Field] = &[
        Self::ENROLMENT,
        Self::ACTIVITY,
        Self::ACTION,
        Self::TIME,
        Self::IP_ADDRESS,
    ];
    const REQUIRED: &'static [Field] = &[Self::ENROLMENT, Self::ACTIVITY, Self::ACTION, Self::TIME];

    pub fn new(manager: Manager<LogEntry>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::REQUIRED),
            enrolment: None,
            activity: None,
            course: None,
            action: None,
            time: None,
            ip_address: None,
        }
    }
}

impl ElementBuilder<LogEntry> for DefaultLogEntryBuilder {
    fn manager(&self) -> &Manager<LogEntry> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<LogEntry> {
        self.core.require_complete()?;
        let entry = LogEntry::new(
            self.core.required(Self::ENROLMENT, &self.enrolment)?,
            self.core.required(Self::ACTIVITY, &self.activity)?,
            self.core.required(Self::ACTIVITY, &self.course)?,
            self.core.required(Self::ACTION, &self.action)?,
            self.core.required(Self::TIME, &self.time)?,
        )
        .with_ip_address(self.ip_address.clone());
        self.core.finish(entry)
    }

    fn clear(&mut self) {
        self.enrolment = None;
        self.activity = None;
        self.course = None;
        self.action = None;
        self.time = None;
        self.ip_address = None;
        self.core.reset();
    }

    fn load(&mut self, element: &LogEntry) -> DomainResult<()> {
        element.validate()?;
        self.enrolment = Some(element.enrolment());
        self.activity = Some(element.activity());
        self.course = Some(element.course());
        self.action = Some(element.action());
        self.time = Some(element.time());
        self.ip_address = element.ip_address().map(str::to_string);
        self.core.mark_loaded(element.id());
        if self.ip_address.is_none() {
            self.core.unmark(Self::IP_ADDRESS);
        }
        Ok(())
    }
}

impl LogEntryBuilder for DefaultLogEntryBuilder {
    fn enrolment(&self) -> Option<ElementRef> {
        self.enrolment
    }

    fn set_enrolment(
        &mut self,
        enrolment: &Enrolment,
    ) -> DomainResult<&mut dyn LogEntryBuilder> {
        self.enrolment = Some(ElementRef::to(enrolment)?);
        self.core.mark(Self::ENROLMENT);
        Ok(self)
    }

    fn activity(&self) -> Option<ElementRef> {
        self.activity
    }

    fn set_activity(&mut self, activity: &Activity) -> DomainResult<&mut dyn LogEntryBuilder> {
        self.activity = Some(ElementRef::to(activity)?);
        self.course = Some(activity.course());
        self.core.mark(Self::ACTIVITY);
        Ok(self)
    }

    fn action(&self) -> Option<ElementRef> {
        self.action
    }

    fn set_action(&mut self, action: &Action) -> DomainResult<&mut dyn LogEntryBuilder> {
        self.action = Some(ElementRef::to(action)?);
        self.core.mark(Self::ACTION);
        Ok(self)
    }

    fn time(&self) -> Option<i64> {
        self.time
    }

    fn set_time(&mut self, time: i64) -> DomainResult<&mut dyn LogEntryBuilder> {
        if time < 0 {
            return Err(DomainError::InvalidField {
                field: "time",
                message: format!("{time} is before the epoch"),
            });
        }
        self.time = Some(time);
        self.core.mark(Self::TIME);
        Ok(self)
    }

    fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    fn set_ip_address(
        &mut self,
        ip_address: Option<&str>,
    ) -> DomainResult<&mut dyn LogEntryBuilder> {
        match ip_address {
            Some(ip_address) => {
                self.ip_address = Some(field_text("ip_address", ip_address)?);
                self.core.mark(Self::IP_ADDRESS);
            }
            None => {
                self.ip_address = None;
                self.core.unmark(Self::IP_ADDRESS);
            }
        }
        Ok(self)
    }
}
