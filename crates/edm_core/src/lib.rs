//! Educational domain model with a pluggable persistence layer.
//!
//! Elements (courses, enrolments, activities, grades, log entries and
//! their supporting types) are assembled by builders and retrieved by
//! loaders. Both are chosen at runtime from a per-(element, contract)
//! factory registry, so every contract can have interchangeable
//! implementations.

pub mod builder;
pub mod config;
pub mod datastore;
pub mod db;
pub mod domain_model;
pub mod error;
pub mod loader;
pub mod logging;
pub mod manager;
pub mod model;
pub mod profile;
pub mod query;
pub mod registry;

pub use builder::{register_builder, BuilderState, ElementBuilder};
pub use config::{EdmConfig, LoggingConfig, StoreConfig};
pub use datastore::{DataStore, MemDataStore, SqliteDataStore, StoreError, StoreResult};
pub use domain_model::DomainModel;
pub use error::{DomainError, DomainResult};
pub use loader::{register_loader, ElementLoader};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use manager::Manager;
pub use model::{Element, ElementId, ElementKind, ElementRef};
pub use profile::Profile;
pub use query::Query;
pub use registry::bootstrap::{default_profile, register_defaults};
pub use registry::{ConcreteFactory, Implementation, MappedFactory};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
