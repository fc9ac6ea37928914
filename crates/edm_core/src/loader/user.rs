use super::{ElementLoader, LoaderCore};
use crate::error::{argument_text, DomainError, DomainResult};
use crate::manager::Manager;
use crate::model::User;

/// Loader contract for `User`.
pub trait UserLoader: ElementLoader<User> {
    fn fetch_by_username(&self, username: &str) -> DomainResult<User>;

    /// # Errors
    /// - `InvalidArgument` when `id_number` is negative.
    fn fetch_by_id_number(&self, id_number: i64) -> DomainResult<User>;
}

pub struct DefaultUserLoader {
    core: LoaderCore<User>,
}

impl DefaultUserLoader {
    pub fn new(manager: Manager<User>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<User> for DefaultUserLoader {
    fn core(&self) -> &LoaderCore<User> {
        &self.core
    }
}

impl UserLoader for DefaultUserLoader {
    fn fetch_by_username(&self, username: &str) -> DomainResult<User> {
        let username = argument_text("username", username)?;
        let mut query = self.core.fetch_query(&User::SELECTOR_USERNAME)?;
        query.set_property(&User::USERNAME, username)?;
        query.query()
    }

    fn fetch_by_id_number(&self, id_number: i64) -> DomainResult<User> {
        if id_number < 0 {
            return Err(DomainError::InvalidArgument(format!(
                "id_number must not be negative, got {id_number}"
            )));
        }
        let mut query = self.core.fetch_query(&User::SELECTOR_ID_NUMBER)?;
        query.set_property(&User::ID_NUMBER, id_number)?;
        query.query()
    }
}

impl Manager<User> {
    pub fn fetch_by_username(&self, username: &str) -> DomainResult<User> {
        self.loader()?.fetch_by_username(username)
    }

    pub fn fetch_by_id_number(&self, id_number: i64) -> DomainResult<User> {
        self.loader()?.fetch_by_id_number(id_number)
    }
}
