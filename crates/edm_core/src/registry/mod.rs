//! Mapped factory registry keyed by (target element, contract).
//!
//! # Responsibility
//! - Map an `Implementation` to the `ConcreteFactory` that creates it.
//! - Keep exactly one registry per (target, contract, key) triple per process.
//!
//! # Invariants
//! - `MappedFactory::instance` returns the same `Arc` for the same triple.
//! - Registries are created lazily and never torn down.
//! - Poisoned locks are recovered; registry access never panics on poison.

use crate::error::{DomainError, DomainResult};
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

pub mod bootstrap;

/// Runtime identity of one contract implementation.
#[derive(Clone, Copy)]
pub struct Implementation {
    type_id: TypeId,
    name: &'static str,
}

impl Implementation {
    pub fn of<I: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<I>(),
            name: type_name::<I>(),
        }
    }

    /// Fully qualified type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Implementation {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Implementation {}

impl Hash for Implementation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl Debug for Implementation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Creates one instance of contract `T` from key `X`.
pub trait ConcreteFactory<T: ?Sized, X>: Send + Sync {
    fn create(&self, key: X) -> Box<T>;
}

impl<T, X, F> ConcreteFactory<T, X> for F
where
    T: ?Sized,
    F: Fn(X) -> Box<T> + Send + Sync,
{
    fn create(&self, key: X) -> Box<T> {
        self(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RegistryKey {
    target: TypeId,
    contract: TypeId,
    key: TypeId,
}

type AnyRegistry = Arc<dyn Any + Send + Sync>;

static REGISTRIES: Lazy<RwLock<HashMap<RegistryKey, AnyRegistry>>> = Lazy::new(Default::default);

/// Implementation -> factory map for one (target, contract) pair.
pub struct MappedFactory<T: ?Sized + 'static, X: 'static> {
    target: &'static str,
    contract: &'static str,
    factories: RwLock<HashMap<Implementation, Arc<dyn ConcreteFactory<T, X>>>>,
}

impl<T: ?Sized + 'static, X: 'static> MappedFactory<T, X> {
    /// Returns the process-wide registry for contract `T` targeting `E`.
    pub fn instance<E: ?Sized + 'static>() -> Arc<Self> {
        let key = RegistryKey {
            target: TypeId::of::<E>(),
            contract: TypeId::of::<T>(),
            key: TypeId::of::<X>(),
        };

        let existing = REGISTRIES
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        let registry = match existing {
            Some(registry) => registry,
            None => {
                let mut registries = REGISTRIES.write().unwrap_or_else(PoisonError::into_inner);
                Arc::clone(registries.entry(key).or_insert_with(|| {
                    debug!(
                        "event=registry_create module=registry status=ok target={} contract={}",
                        type_name::<E>(),
                        type_name::<T>()
                    );
                    Arc::new(Self {
                        target: type_name::<E>(),
                        contract: type_name::<T>(),
                        factories: RwLock::new(HashMap::new()),
                    }) as AnyRegistry
                }))
            }
        };

        match registry.downcast::<Self>() {
            Ok(registry) => registry,
            Err(_) => unreachable!("registry cache key pins the concrete registry type"),
        }
    }

    /// Registers `factory` for `implementation`, replacing any earlier entry.
    pub fn register_class<F>(&self, implementation: Implementation, factory: F)
    where
        F: ConcreteFactory<T, X> + 'static,
    {
        let previous = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(implementation, Arc::new(factory));

        if previous.is_some() {
            warn!(
                "event=factory_register module=registry status=overwrite target={} contract={} implementation={}",
                self.target,
                self.contract,
                implementation.name()
            );
        } else {
            debug!(
                "event=factory_register module=registry status=ok target={} contract={} implementation={}",
                self.target,
                self.contract,
                implementation.name()
            );
        }
    }

    /// Creates an instance of `implementation` from `key`.
    ///
    /// # Errors
    /// - `UnknownImplementation` when nothing was registered for `implementation`.
    pub fn create(&self, implementation: Implementation, key: X) -> DomainResult<Box<T>> {
        let factory = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&implementation)
            .cloned()
            .ok_or(DomainError::UnknownImplementation {
                contract: self.contract,
                implementation: implementation.name(),
            })?;

        Ok(factory.create(key))
    }

    pub fn is_registered(&self, implementation: Implementation) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&implementation)
    }

    /// Returns registered implementations sorted by name.
    pub fn registered_classes(&self) -> Vec<Implementation> {
        let mut classes: Vec<Implementation> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        classes.sort_by_key(|implementation| implementation.name());
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::{Implementation, MappedFactory};
    use crate::error::DomainError;
    use std::sync::Arc;

    trait Greeter: Send {
        fn greet(&self) -> String;
    }

    struct English(String);
    struct French(String);

    impl Greeter for English {
        fn greet(&self) -> String {
            format!("hello {}", self.0)
        }
    }

    impl Greeter for French {
        fn greet(&self) -> String {
            format!("bonjour {}", self.0)
        }
    }

    struct UnitTarget;
    struct OtherTarget;

    #[test]
    fn instance_is_stable_per_target() {
        let first = MappedFactory::<dyn Greeter, String>::instance::<UnitTarget>();
        let second = MappedFactory::<dyn Greeter, String>::instance::<UnitTarget>();
        let other = MappedFactory::<dyn Greeter, String>::instance::<OtherTarget>();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[test]
    fn create_uses_registered_factory_and_rejects_unknown() {
        let registry = MappedFactory::<dyn Greeter, String>::instance::<UnitTarget>();
        registry.register_class(
            Implementation::of::<English>(),
            |name: String| -> Box<dyn Greeter> { Box::new(English(name)) },
        );

        let greeter = registry
            .create(Implementation::of::<English>(), "ada".to_string())
            .unwrap();
        assert_eq!(greeter.greet(), "hello ada");

        let error = registry
            .create(Implementation::of::<French>(), "ada".to_string())
            .err()
            .unwrap();
        assert!(matches!(error, DomainError::UnknownImplementation { .. }));
    }

    struct ConcurrentTarget;
    struct Slot<const N: usize>;

    fn register_slot<const N: usize>() -> Arc<MappedFactory<dyn Greeter, String>> {
        let registry = MappedFactory::<dyn Greeter, String>::instance::<ConcurrentTarget>();
        registry.register_class(
            Implementation::of::<Slot<N>>(),
            |name: String| -> Box<dyn Greeter> { Box::new(English(format!("{name} {N}"))) },
        );
        registry
    }

    #[test]
    fn first_use_from_many_threads_shares_one_registry() {
        let registries = std::thread::scope(|scope| {
            let handles = [
                scope.spawn(register_slot::<0>),
                scope.spawn(register_slot::<1>),
                scope.spawn(register_slot::<2>),
                scope.spawn(register_slot::<3>),
                scope.spawn(register_slot::<4>),
                scope.spawn(register_slot::<5>),
                scope.spawn(register_slot::<6>),
                scope.spawn(register_slot::<7>),
            ];
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        let first = &registries[0];
        assert!(registries.iter().all(|registry| Arc::ptr_eq(first, registry)));
        assert_eq!(first.registered_classes().len(), 8);
        let greeter = first
            .create(Implementation::of::<Slot<5>>(), "slot".to_string())
            .unwrap();
        assert_eq!(greeter.greet(), "hello slot 5");
    }

    #[test]
    fn implementation_identity_ignores_name_formatting() {
        assert_eq!(
            Implementation::of::<English>(),
            Implementation::of::<English>()
        );
        assert_ne!(
            Implementation::of::<English>(),
            Implementation::of::<French>()
        );
        assert!(Implementation::of::<French>().name().ends_with("French"));
    }
}
