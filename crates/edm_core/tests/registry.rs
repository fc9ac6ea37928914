use edm_core::builder::{ActivityTypeBuilder, CourseBuilder, DefaultCourseBuilder, RoleBuilder};
use edm_core::model::{ActivitySource, ActivityType, Course, Element, ElementRef, Role};
use edm_core::{
    default_profile, register_builder, BuilderState, DomainError, DomainModel, DomainResult,
    ElementBuilder, Implementation, Manager, MappedFactory,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static FAKE_BUILDS: AtomicUsize = AtomicUsize::new(0);

/// Role builder that always produces a role with a fixed name.
struct FixedRoleBuilder {
    manager: Manager<Role>,
    name: &'static str,
    state: BuilderState,
}

impl FixedRoleBuilder {
    fn boxed(manager: Manager<Role>, name: &'static str) -> Box<dyn RoleBuilder> {
        Box::new(Self {
            manager,
            name,
            state: BuilderState::Complete,
        })
    }
}

impl ElementBuilder<Role> for FixedRoleBuilder {
    fn manager(&self) -> &Manager<Role> {
        &self.manager
    }

    fn state(&self) -> BuilderState {
        self.state
    }

    fn build(&mut self) -> DomainResult<Role> {
        self.state = BuilderState::Built;
        Ok(Role::new(self.name))
    }

    fn clear(&mut self) {
        self.state = BuilderState::Complete;
    }

    fn load(&mut self, _element: &Role) -> DomainResult<()> {
        Ok(())
    }
}

impl RoleBuilder for FixedRoleBuilder {
    fn name(&self) -> Option<&str> {
        Some(self.name)
    }

    fn set_name(&mut self, _name: &str) -> DomainResult<&mut dyn RoleBuilder> {
        Ok(self)
    }
}

/// Second implementation used only to observe overwrite semantics.
struct OverwrittenRoleBuilder;

/// Never registered anywhere.
struct UnregisteredRoleBuilder;

#[test]
fn instance_is_shared_per_target_and_contract() {
    let first = MappedFactory::<dyn CourseBuilder, Manager<Course>>::instance::<Course>();
    let second = MappedFactory::<dyn CourseBuilder, Manager<Course>>::instance::<Course>();
    assert!(Arc::ptr_eq(&first, &second));

    let roles = MappedFactory::<dyn RoleBuilder, Manager<Role>>::instance::<Role>();
    let roles_again = MappedFactory::<dyn RoleBuilder, Manager<Role>>::instance::<Role>();
    assert!(Arc::ptr_eq(&roles, &roles_again));
}

#[test]
fn model_construction_registers_default_builders() {
    let _model = DomainModel::in_memory();
    let registry = MappedFactory::<dyn CourseBuilder, Manager<Course>>::instance::<Course>();
    assert!(registry.is_registered(Implementation::of::<DefaultCourseBuilder>()));
    assert!(registry
        .registered_classes()
        .contains(&Implementation::of::<DefaultCourseBuilder>()));
}

#[test]
fn re_registration_replaces_the_factory() {
    let model = DomainModel::in_memory();
    let registry = MappedFactory::<dyn RoleBuilder, Manager<Role>>::instance::<Role>();
    let implementation = Implementation::of::<OverwrittenRoleBuilder>();

    registry.register_class(implementation, |manager: Manager<Role>| -> Box<dyn RoleBuilder> {
        FixedRoleBuilder::boxed(manager, "first")
    });
    registry.register_class(implementation, |manager: Manager<Role>| -> Box<dyn RoleBuilder> {
        FixedRoleBuilder::boxed(manager, "second")
    });

    let mut builder = registry
        .create(implementation, model.manager::<Role>())
        .unwrap();
    assert_eq!(builder.build().unwrap().name(), "second");
    assert!(registry.is_registered(implementation));
}

#[test]
fn creating_an_unregistered_implementation_fails() {
    let model = DomainModel::in_memory();
    let registry = MappedFactory::<dyn RoleBuilder, Manager<Role>>::instance::<Role>();
    let implementation = Implementation::of::<UnregisteredRoleBuilder>();

    assert!(!registry.is_registered(implementation));
    match registry.create(implementation, model.manager::<Role>()) {
        Err(DomainError::UnknownImplementation {
            implementation: name,
            ..
        }) => assert!(name.ends_with("UnregisteredRoleBuilder")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unregistered implementation must not be created"),
    }

    let unselected = model
        .manager::<Role>()
        .builder_with(implementation)
        .err()
        .unwrap();
    assert!(matches!(
        unselected,
        DomainError::UnknownImplementation { .. }
    ));
}

/// Activity type builder that counts how often it builds.
struct FakeActivityTypeBuilder {
    manager: Manager<ActivityType>,
    source: Option<ElementRef>,
    name: Option<String>,
    state: BuilderState,
}

impl FakeActivityTypeBuilder {
    fn new(manager: Manager<ActivityType>) -> Self {
        Self {
            manager,
            source: None,
            name: None,
            state: BuilderState::Unbound,
        }
    }
}

impl ElementBuilder<ActivityType> for FakeActivityTypeBuilder {
    fn manager(&self) -> &Manager<ActivityType> {
        &self.manager
    }

    fn state(&self) -> BuilderState {
        self.state
    }

    fn build(&mut self) -> DomainResult<ActivityType> {
        match (self.source, &self.name) {
            (Some(source), Some(name)) => {
                self.state = BuilderState::Built;
                FAKE_BUILDS.fetch_add(1, Ordering::SeqCst);
                Ok(ActivityType::new(source, name.clone()))
            }
            _ => Err(DomainError::IncompleteBuilder {
                element: ActivityType::KIND,
                missing: vec!["name", "activity_source"],
            }),
        }
    }

    fn clear(&mut self) {
        self.source = None;
        self.name = None;
        self.state = BuilderState::Unbound;
    }

    fn load(&mut self, element: &ActivityType) -> DomainResult<()> {
        self.source = Some(element.source());
        self.name = Some(element.name().to_string());
        self.state = BuilderState::Complete;
        Ok(())
    }
}

impl ActivityTypeBuilder for FakeActivityTypeBuilder {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: &str) -> DomainResult<&mut dyn ActivityTypeBuilder> {
        self.name = Some(name.to_string());
        self.state = BuilderState::Partial;
        Ok(self)
    }

    fn activity_source(&self) -> Option<ElementRef> {
        self.source
    }

    fn set_activity_source(
        &mut self,
        source: &ActivitySource,
    ) -> DomainResult<&mut dyn ActivityTypeBuilder> {
        self.source = Some(ElementRef::to(source)?);
        Ok(self)
    }
}

#[test]
fn profile_selects_a_custom_builder_end_to_end() {
    register_builder::<ActivityType, FakeActivityTypeBuilder, _>(
        |manager| -> Box<dyn ActivityTypeBuilder> {
            Box::new(FakeActivityTypeBuilder::new(manager))
        },
    );

    let profile = default_profile().with_builder::<ActivityType, FakeActivityTypeBuilder>();
    let model = DomainModel::new(Arc::new(edm_core::MemDataStore::new()), profile);

    let moodle = {
        let source = ActivitySource::new("moodle");
        model.manager::<ActivitySource>().insert(source).unwrap()
    };

    let manager = model.manager::<ActivityType>();
    let registry =
        MappedFactory::<dyn ActivityTypeBuilder, Manager<ActivityType>>::instance::<ActivityType>();
    let mut direct = registry
        .create(Implementation::of::<FakeActivityTypeBuilder>(), manager.clone())
        .unwrap();
    let builds_before = FAKE_BUILDS.load(Ordering::SeqCst);
    direct
        .set_activity_source(&moodle)
        .unwrap()
        .set_name("Quiz")
        .unwrap();
    assert_eq!(direct.build().unwrap().name(), "Quiz");
    assert_eq!(FAKE_BUILDS.load(Ordering::SeqCst), builds_before + 1);

    let mut builder = manager.builder().unwrap();
    builder
        .set_activity_source(&moodle)
        .unwrap()
        .set_name("quiz")
        .unwrap();
    let built = builder.create().unwrap();
    assert_eq!(built.name(), "quiz");
    assert_eq!(FAKE_BUILDS.load(Ordering::SeqCst), builds_before + 2);

    let stored = manager.insert(built).unwrap();
    assert_eq!(manager.fetch_by_name(&moodle, "quiz").unwrap(), stored);

    let default_model = DomainModel::in_memory();
    let mut default_builder = default_model.builder::<ActivityType>().unwrap();
    let other_source = default_model
        .manager::<ActivitySource>()
        .insert(ActivitySource::new("moodle"))
        .unwrap();
    default_builder
        .set_activity_source(&other_source)
        .unwrap()
        .set_name("quiz")
        .unwrap();
    assert_eq!(default_builder.create().unwrap().name(), "quiz");
    assert_eq!(FAKE_BUILDS.load(Ordering::SeqCst), builds_before + 2);
}
