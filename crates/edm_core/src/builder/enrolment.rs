use super::{BuilderCore, BuilderState, ElementBuilder, Field};
use crate::error::{field_percentage, DomainResult};
use crate::manager::Manager;
use crate::model::{Course, Element, ElementRef, Enrolment, Role, User};

/// Builder contract for `Enrolment`.
///
/// `final_grade` and `usable` are optional; an enrolment is usable unless
/// told otherwise.
pub trait EnrolmentBuilder: ElementBuilder<Enrolment> {
    fn user(&self) -> Option<ElementRef>;

    /// # Errors
    /// - `InvalidArgument` when `user` has not been persisted.
    fn set_user(&mut self, user: &User) -> DomainResult<&mut dyn EnrolmentBuilder>;

    fn course(&self) -> Option<ElementRef>;

    fn set_course(&mut self, course: &Course) -> DomainResult<&mut dyn EnrolmentBuilder>;

    fn role(&self) -> Option<ElementRef>;

    fn set_role(&mut self, role: &Role) -> DomainResult<&mut dyn EnrolmentBuilder>;

    fn final_grade(&self) -> Option<i32>;

    /// # Errors
    /// - `InvalidField` when the grade is outside `[0, 100]`.
    fn set_final_grade(
        &mut self,
        final_grade: Option<i32>,
    ) -> DomainResult<&mut dyn EnrolmentBuilder>;

    fn is_usable(&self) -> bool;

    fn set_usable(&mut self, usable: bool) -> DomainResult<&mut dyn EnrolmentBuilder>;
}

pub struct DefaultEnrolmentBuilder {
    core: BuilderCore<Enrolment>,
    user: Option<ElementRef>,
    course: Option<ElementRef>,
    role: Option<ElementRef>,
    final_grade: Option<i32>,
    usable: bool,
}

impl DefaultEnrolmentBuilder {
    const USER: Field = Field::new(0, "user");
    const COURSE: Field = Field::new(1, "course");
    const ROLE: Field = Field::new(2, "role");
    const FINAL_GRADE: Field = Field::new(3, "final_grade");
    const USABLE: Field = Field::new(4, "usable");
    const FIELDS: &'static [Field] = &[
        Self::USER,
        Self::COURSE,
        Self::ROLE,
        Self::FINAL_GRADE,
        Self::USABLE,
    ];
    const REQUIRED: &'static [Field] = &[Self::USER, Self::COURSE, Self::ROLE];

    pub fn new(manager: Manager<Enrolment>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::REQUIRED),
            user: None,
            course: None,
            role: None,
            final_grade: None,
            usable: true,
        }
    }
}

impl ElementBuilder<Enrolment> for DefaultEnrolmentBuilder {
    fn manager(&self) -> &Manager<Enrolment> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<Enrolment> {
        self.core.require_complete()?;
        let enrolment = Enrolment::new(
            self.core.required(Self::USER, &self.user)?,
            self.core.required(Self::COURSE, &self.course)?,
            self.core.required(Self::ROLE, &self.role)?,
        )
        .with_final_grade(self.final_grade)
        .with_usable(self.usable);
        self.core.finish(enrolment)
    }

    fn clear(&mut self) {
        self.user = None;
        self.course = None;
        self.role = None;
        self.final_grade = None;
        self.usable = true;
        self.core.reset();
    }

    fn load(&mut self, element: &Enrolment) -> DomainResult<()> {
        element.validate()?;
        self.user = Some(element.user());
        self.course = Some(element.course());
        self.role = Some(element.role());
        self.final_grade = element.final_grade();
        self.usable = element.is_usable();
        self.core.mark_loaded(element.id());
        Ok(())
    }
}

impl EnrolmentBuilder for DefaultEnrolmentBuilder {
    fn user(&self) -> Option<ElementRef> {
        self.user
    }

    fn set_user(&mut self, user: &User) -> DomainResult<&mut dyn EnrolmentBuilder> {
        self.user = Some(ElementRef::to(user)?);
        self.core.mark(Self::USER);
        Ok(self)
    }

    fn course(&self) -> Option<ElementRef> {
        self.course
    }

    fn set_course(&mut self, course: &Course) -> DomainResult<&mut dyn EnrolmentBuilder> {
        self.course = Some(ElementRef::to(course)?);
        self.core.mark(Self::COURSE);
        Ok(self)
    }

    fn role(&self) -> Option<ElementRef> {
        self.role
    }

    fn set_role(&mut self, role: &Role) -> DomainResult<&mut dyn EnrolmentBuilder> {
        self.role = Some(ElementRef::to(role)?);
        self.core.mark(Self::ROLE);
        Ok(self)
    }

    fn final_grade(&self) -> Option<i32> {
        self.final_grade
    }

    fn set_final_grade(
        &mut self,
        final_grade: Option<i32>,
    ) -> DomainResult<&mut dyn EnrolmentBuilder> {
        match final_grade {
            Some(grade) => {
                self.final_grade = Some(field_percentage("final_grade", grade)?);
                self.core.mark(Self::FINAL_GRADE);
            }
            None => {
                self.final_grade = None;
                self.core.unmark(Self::FINAL_GRADE);
            }
        }
        Ok(self)
    }

    fn is_usable(&self) -> bool {
        self.usable
    }

    fn set_usable(&mut self, usable: bool) -> DomainResult<&mut dyn EnrolmentBuilder> {
        self.usable = usable;
        self.core.mark(Self::USABLE);
        Ok(self)
    }
}
