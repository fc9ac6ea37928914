mod common;

use common::{assert_convenience_loaders, seed};
use edm_core::model::{Course, ElementKind, ElementRef, Enrolment, Role, Semester, User};
use edm_core::{DomainError, DomainModel, Element, StoreError};

#[test]
fn insert_assigns_ids_and_replaces_on_reinsert() {
    let model = DomainModel::in_memory();
    let courses = model.manager::<Course>();

    let stored = courses
        .insert(Course::new("CIS*1500", Semester::Fall, 2015))
        .unwrap();
    let id = stored.id().unwrap();
    assert!(id > 0);
    assert_eq!(courses.fetch_by_id(id).unwrap(), stored);

    let renamed = Course::new("CIS*1910", Semester::Fall, 2015).with_id(id);
    courses.insert(renamed.clone()).unwrap();
    assert_eq!(courses.fetch_all().unwrap(), vec![renamed]);
}

#[test]
fn insert_validates_before_persisting() {
    let model = DomainModel::in_memory();
    let roles = model.manager::<Role>();

    assert!(matches!(
        roles.insert(Role::new("  ")),
        Err(DomainError::InvalidField { field: "name", .. })
    ));
    assert!(roles.fetch_all().unwrap().is_empty());
}

#[test]
fn reusing_an_id_of_another_kind_is_rejected() {
    let model = DomainModel::in_memory();
    let role = model.manager::<Role>().insert(Role::new("Student")).unwrap();

    let clash = Course::new("CIS*1500", Semester::Fall, 2015).with_id(role.id().unwrap());
    assert!(matches!(
        model.manager::<Course>().insert(clash),
        Err(DomainError::Store(StoreError::InvalidData(_)))
    ));
}

#[test]
fn insert_rejects_non_positive_ids() {
    let model = DomainModel::in_memory();
    let roles = model.manager::<Role>();

    for id in [0, -7] {
        assert!(matches!(
            roles.insert(Role::new("Guest").with_id(id)),
            Err(DomainError::InvalidArgument(_))
        ));
    }
    assert!(roles.fetch_all().unwrap().is_empty());
}

#[test]
fn insert_after_the_largest_id_fails_without_panicking() {
    let model = DomainModel::in_memory();
    let roles = model.manager::<Role>();

    let last = roles.insert(Role::new("Last").with_id(i64::MAX)).unwrap();
    assert_eq!(last.id(), Some(i64::MAX));
    assert!(matches!(
        roles.insert(Role::new("Next")),
        Err(DomainError::Store(StoreError::InvalidData(_)))
    ));
    assert_eq!(roles.fetch_all().unwrap(), vec![last]);
}

#[test]
fn remove_and_contains_track_membership() {
    let model = DomainModel::in_memory();
    let roles = model.manager::<Role>();

    let unsaved = Role::new("Guest");
    assert!(!roles.contains(&unsaved).unwrap());
    assert!(!roles.remove(&unsaved).unwrap());

    let stored = roles.insert(unsaved).unwrap();
    assert!(roles.contains(&stored).unwrap());
    assert!(roles.remove(&stored).unwrap());
    assert!(!roles.contains(&stored).unwrap());
    assert!(!roles.remove(&stored).unwrap());
    assert!(matches!(
        roles.fetch_by_id(stored.id().unwrap()),
        Err(DomainError::NotFound { .. })
    ));
}

#[test]
fn resolve_follows_references() {
    let model = DomainModel::in_memory();
    let data = seed(&model);

    let enrolment = &data.alice_enrolment;
    assert_eq!(
        model.manager::<User>().resolve(enrolment.user()).unwrap(),
        data.alice
    );
    assert_eq!(
        model.manager::<Course>().resolve(enrolment.course()).unwrap(),
        data.course
    );
    assert_eq!(
        model.manager::<Role>().resolve(enrolment.role()).unwrap(),
        data.student
    );

    assert!(matches!(
        model.manager::<Role>().resolve(enrolment.user()),
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        model
            .manager::<Enrolment>()
            .resolve(ElementRef::new(ElementKind::Enrolment, 9_999)),
        Err(DomainError::NotFound { .. })
    ));
}

#[test]
fn closed_model_rejects_manager_operations() {
    let model = DomainModel::in_memory();
    let roles = model.manager::<Role>();
    let stored = roles.insert(Role::new("Student")).unwrap();

    model.close();
    assert!(!model.is_open());
    assert!(!model.data_store().is_open());

    assert!(matches!(
        roles.fetch_all(),
        Err(DomainError::Store(StoreError::Closed))
    ));
    assert!(matches!(
        roles.insert(Role::new("Instructor")),
        Err(DomainError::Store(StoreError::Closed))
    ));
    assert!(matches!(
        roles.contains(&stored),
        Err(DomainError::Store(StoreError::Closed))
    ));
    assert!(matches!(
        roles.fetch_query(&Role::SELECTOR_NAME),
        Err(DomainError::Store(StoreError::Closed))
    ));
}

#[test]
fn managers_outliving_their_model_report_closed() {
    let roles = {
        let model = DomainModel::in_memory();
        model.manager::<Role>()
    };

    assert!(matches!(
        roles.data_store(),
        Err(StoreError::Closed)
    ));
    assert!(matches!(
        roles.fetch_by_name("Student"),
        Err(DomainError::Store(StoreError::Closed))
    ));
}

#[test]
fn convenience_loaders_over_memory_store() {
    let model = DomainModel::in_memory();
    let data = seed(&model);
    assert_convenience_loaders(&model, &data);
}

#[test]
fn managers_share_one_store_per_model() {
    let model = DomainModel::in_memory();
    let first = model.manager::<Role>();
    let second = model.manager::<Role>();

    let stored = first.insert(Role::new("Student")).unwrap();
    assert!(second.contains(&stored).unwrap());

    let other_model = DomainModel::in_memory();
    assert!(!other_model.manager::<Role>().contains(&stored).unwrap());
}
