//! Aggregate root owning one data store session.
//!
//! # Responsibility
//! - Own the data store exclusively and vend managers bound to it.
//! - Run default builder/loader registration before first use.
//!
//! # Invariants
//! - Managers only hold weak references; dropping the model releases the store.

use crate::config::StoreConfig;
use crate::datastore::{DataStore, MemDataStore, SqliteDataStore, StoreResult};
use crate::error::DomainResult;
use crate::manager::Manager;
use crate::model::Element;
use crate::profile::Profile;
use crate::registry::bootstrap::{default_profile, register_defaults};
use log::info;
use std::sync::Arc;

pub struct DomainModel {
    datastore: Arc<dyn DataStore>,
    profile: Arc<Profile>,
}

impl DomainModel {
    pub fn new(datastore: Arc<dyn DataStore>, profile: Profile) -> Self {
        register_defaults();
        info!(
            "event=model_open module=domain_model status=ok backend={}",
            datastore.name()
        );
        Self {
            datastore,
            profile: Arc::new(profile),
        }
    }

    /// Model over a fresh `MemDataStore` with the default profile.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemDataStore::new()), default_profile())
    }

    /// Opens the store described by `config` with the default profile.
    ///
    /// A SQLite path of `:memory:` opens a private in-memory database.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let datastore: Arc<dyn DataStore> = match config {
            StoreConfig::Memory => Arc::new(MemDataStore::new()),
            StoreConfig::Sqlite { path } if path.as_os_str() == ":memory:" => {
                Arc::new(SqliteDataStore::open_in_memory()?)
            }
            StoreConfig::Sqlite { path } => Arc::new(SqliteDataStore::open(path)?),
        };
        Ok(Self::new(datastore, default_profile()))
    }

    pub fn data_store(&self) -> &Arc<dyn DataStore> {
        &self.datastore
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn manager<E: Element>(&self) -> Manager<E> {
        Manager::new(Arc::downgrade(&self.datastore), Arc::clone(&self.profile))
    }

    pub fn builder<E: Element>(&self) -> DomainResult<Box<E::Builder>> {
        self.manager::<E>().builder()
    }

    pub fn loader<E: Element>(&self) -> DomainResult<Box<E::Loader>> {
        self.manager::<E>().loader()
    }

    pub fn is_open(&self) -> bool {
        self.datastore.is_open()
    }

    /// Closes the data store. Outstanding managers start failing with `Closed`.
    pub fn close(&self) {
        self.datastore.close();
        info!(
            "event=model_close module=domain_model status=ok backend={}",
            self.datastore.name()
        );
    }
}
