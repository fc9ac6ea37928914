use super::{BuilderCore, BuilderState, ElementBuilder, Field};
use crate::error::{field_text, DomainError, DomainResult};
use crate::manager::Manager;
use crate::model::{Element, User};

/// Builder contract for `User`. Every field is required.
pub trait UserBuilder: ElementBuilder<User> {
    fn id_number(&self) -> Option<i64>;

    /// # Errors
    /// - `InvalidField` when `id_number` is negative.
    fn set_id_number(&mut self, id_number: i64) -> DomainResult<&mut dyn UserBuilder>;

    fn username(&self) -> Option<&str>;

    fn set_username(&mut self, username: &str) -> DomainResult<&mut dyn UserBuilder>;

    fn first_name(&self) -> Option<&str>;

    fn set_first_name(&mut self, first_name: &str) -> DomainResult<&mut dyn UserBuilder>;

    fn last_name(&self) -> Option<&str>;

    fn set_last_name(&mut self, last_name: &str) -> DomainResult<&mut dyn UserBuilder>;
}

pub struct DefaultUserBuilder {
    core: BuilderCore<User>,
    id_number: Option<i64>,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl DefaultUserBuilder {
    const ID_NUMBER: Field = Field::new(0, "id_number");
    const USERNAME: Field = Field::new(1, "username");
    const FIRST_NAME: Field = Field::new(2, "first_name");
    const LAST_NAME: Field = Field::new(3, "last_name");
    const FIELDS: &'static [Field] = &[
        Self::ID_NUMBER,
        Self::USERNAME,
        Self::FIRST_NAME,
        Self::LAST_NAME,
    ];

    pub fn new(manager: Manager<User>) -> Self {
        Self {
            core: BuilderCore::new(manager, Self::FIELDS, Self::FIELDS),
            id_number: None,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

impl ElementBuilder<User> for DefaultUserBuilder {
    fn manager(&self) -> &Manager<User> {
        self.core.manager()
    }

    fn state(&self) -> BuilderState {
        self.core.state()
    }

    fn build(&mut self) -> DomainResult<User> {
        self.core.require_complete()?;
        let user = User::new(
            self.core.required(Self::ID_NUMBER, &self.id_number)?,
            self.core.required(Self::USERNAME, &self.username)?,
            self.core.required(Self::FIRST_NAME, &self.first_name)?,
            self.core.required(Self::LAST_NAME, &self.last_name)?,
        );
        self.core.finish(user)
    }

    fn clear(&mut self) {
        self.id_number = None;
        self.username = None;
        self.first_name = None;
        self.last_name = None;
        self.core.reset();
    }

    fn load(&mut self, element: &User) -> DomainResult<()> {
        element.validate()?;
        self.id_number = Some(element.id_number());
        self.username = Some(element.username().to_string());
        self.first_name = Some(element.first_name().to_string());
        self.last_name = Some(element.last_name().to_string());
        self.core.mark_loaded(element.id());
        Ok(())
    }
}

impl UserBuilder for DefaultUserBuilder {
    fn id_number(&self) -> Option<i64> {
        self.id_number
    }

    fn set_id_number(&mut self, id_number: i64) -> DomainResult<&mut dyn UserBuilder> {
        if id_number < 0 {
            return Err(DomainError::InvalidField {
                field: "id_number",
                message: format!("{id_number} must not be negative"),
            });
        }
        self.id_number = Some(id_number);
        self.core.mark(Self::ID_NUMBER);
        Ok(self)
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn set_username(&mut self, username: &str) -> DomainResult<&mut dyn UserBuilder> {
        self.username = Some(field_text("username", username)?);
        self.core.mark(Self::USERNAME);
        Ok(self)
    }

    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn set_first_name(&mut self, first_name: &str) -> DomainResult<&mut dyn UserBuilder> {
        self.first_name = Some(field_text("first_name", first_name)?);
        self.core.mark(Self::FIRST_NAME);
        Ok(self)
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    fn set_last_name(&mut self, last_name: &str) -> DomainResult<&mut dyn UserBuilder> {
        self.last_name = Some(field_text("last_name", last_name)?);
        self.core.mark(Self::LAST_NAME);
        Ok(self)
    }
}
