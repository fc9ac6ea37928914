use super::{BuilderCore, BuilderState, ElementBuilder, Field};
use crate::error::{field_percentage, DomainResult};
use crate::manager::Manager;
use crate::model::{Activity, Element, ElementRef, Enrolment, Grade};

/// Builder contract for `Grade`. Every field is required.
pub trait GradeBuilder: ElementBuilder<Grade> {
    fn activity(&self) -> Option<ElementRef>;

    fn set_activity(&mut self, activity: &Activity) -> DomainResult<&mut dyn GradeBuilder>;

    fn enrolment(&self) -> Option<ElementRef>;

    fn set_enrolment(&mut self, enrolment: &Enrolment) -> DomainResult<&mut dyn GradeBuilder>;

    fn grade(&self) -> Option<i32>;

    /// # Errors
    /// - `InvalidField` when `grade` is outside `[0, 100]`.
    fn set_grade(&mut self, grade: i32) -> DomainResult<&mut dyn GradeBuilder>;
}

pub struct DefaultGradeBuilder {
    core: BuilderCore<Grade>,
    activity: Option<ElementRef>,
    enrolment: Option<ElementRef>,
    grade: Option<i32>,
}

impl DefaultGradeBuilder {
    const ACTIVITY: Field = Field::new(0, "activity");
    const ENROLMENT: Field = Field::new(1, "enrolment");
    const GRADE: Field = Field::new(2, "grade");
    const FIELDS: &'static [Field] = &[Self::ACTIVITY, Self::ENROLMENT, Self::GRADE];

    pub fn new(manager: Manager<Grade>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::FIELDS),
            activity: None,
            enrolment: None,
            grade: None,
        }
    }
}

impl ElementBuilder<Grade> for DefaultGradeBuilder {
    fn manager(&self) -> &Manager<Grade> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<Grade> {
        self.core.require_complete()?;
        let grade = Grade::new(
            self.core.required(Self::ENROLMENT, &self.enrolment)?,
            self.core.required(Self::ACTIVITY, &self.activity)?,
            self.core.required(Self::GRADE, &self.grade)?,
        );
        self.core.finish(grade)
    }

    fn clear(&mut self) {
        self.activity = None;
        self.enrolment = None;
        self.grade = None;
        self.core.reset();
    }

    fn load(&mut self, element: &Grade) -> DomainResult<()> {
        element.validate()?;
        self.activity = Some(element.activity());
        self.enrolment = Some(element.enrolment());
        self.grade = Some(element.grade());
        self.core.mark_loaded(element.id());
        Ok(())
    }
}

impl GradeBuilder for DefaultGradeBuilder {
    fn activity(&self) -> Option<ElementRef> {
        self.activity
    }

    fn set_activity(&mut self, activity: &Activity) -> DomainResult<&mut dyn GradeBuilder> {
        self.activity = Some(ElementRef::to(activity)?);
        self.core.mark(Self::ACTIVITY);
        Ok(self)
    }

    fn enrolment(&self) -> Option<ElementRef> {
        self.enrolment
    }

    fn set_enrolment(&mut self, enrolment: &Enrolment) -> DomainResult<&mut dyn GradeBuilder> {
        self.enrolment = Some(ElementRef::to(enrolment)?);
        self.core.mark(Self::ENROLMENT);
        Ok(self)
    }

    fn grade(&self) -> Option<i32> {
        self.grade
    }

    fn set_grade(&mut self, grade: i32) -> DomainResult<&mut dyn GradeBuilder> {
        self.grade = Some(field_percentage("grade", grade)?);
        self.core.mark(Self::GRADE);
        Ok(self)
    }
}
