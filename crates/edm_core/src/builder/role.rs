use super::{BuilderCore, BuilderState, ElementBuilder, Field};
use crate::error::{field_text, DomainResult};
use crate::manager::Manager;
use crate::model::{Element, Role};

/// Builder contract for `Role`.
pub trait RoleBuilder: ElementBuilder<Role> {
    fn name(&self) -> Option<&str>;

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn RoleBuilder>;
}

pub struct DefaultRoleBuilder {
    core: BuilderCore<Role>,
    name: Option<String>,
}

impl DefaultRoleBuilder {
    const NAME: Field = Field::new(0, "name");
    const FIELDS: &'static [Field] = &[Self::NAME];

    pub fn new(manager: Manager<Role>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::FIELDS),
            name: None,
        }
    }
}

impl ElementBuilder<Role> for DefaultRoleBuilder {
    fn manager(&self) -> &Manager<Role> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<Role> {
        self.core.require_complete()?;
        let role = Role::new(self.core.required(Self::NAME, &self.name)?);
        self.core.finish(role)
    }

    fn clear(&mut self) {
        self.name = None;
        self.core.reset();
    }

    fn load(&mut self, element: &Role) -> DomainResult<()> {
        element.validate()?;
        self.name = Some(element.name().to_string());
        self.core.mark_loaded(element.id());
        Ok(())
    }
}

impl RoleBuilder for DefaultRoleBuilder {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn RoleBuilder> {
        self.name = Some(field_text("name", name)?);
        self.core.mark(Self::NAME);
        Ok(self)
    }
}
