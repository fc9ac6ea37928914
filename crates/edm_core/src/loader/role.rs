use super::{ElementLoader, LoaderCore};
use crate::error::{argument_text, DomainResult};
use crate::manager::Manager;
use crate::model::Role;

/// Loader contract for `Role`.
pub trait RoleLoader: ElementLoader<Role> {
    fn fetch_by_name(&self, name: &str) -> DomainResult<Role>;
}

pub struct DefaultRoleLoader {
    core: LoaderCore<Role>,
}

impl DefaultRoleLoader {
    pub fn new(manager: Manager<Role>) -> Self {
        Self {
            core: LoaderCore::new(manager),
        }
    }
}

impl ElementLoader<Role> for DefaultRoleLoader {
    fn core(&self) -> &LoaderCore<Role> {
        &self.core
    }
}

impl RoleLoader for DefaultRoleLoader {
    fn fetch_by_name(&self, name: &str) -> DomainResult<Role> {
        let name = argument_text("name", name)?;
        let mut query = self.core.fetch_query(&Role::SELECTOR_NAME)?;
        query.set_property(&Role::NAME, name)?;
        query.query()
    }
}

impl Manager<Role> {
    pub fn fetch_by_name(&self, name: &str) -> DomainResult<Role> {
        self.loader()?.fetch_by_name(name)
    }
}
