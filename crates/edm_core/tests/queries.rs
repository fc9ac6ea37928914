mod common;

use common::seed;
use edm_core::model::{
    Course, ElementKind, ElementRef, Enrolment, Role, Selector, Semester, User, Value, ValueType,
};
use edm_core::{DomainError, DomainModel, Element};

#[test]
fn property_outside_the_selector_is_rejected() {
    let model = DomainModel::in_memory();
    let mut query = model
        .manager::<Course>()
        .fetch_query(&Course::SELECTOR_OFFERING)
        .unwrap();

    let error = query.set_property(&User::USERNAME, "alice").err().unwrap();
    assert!(matches!(
        error,
        DomainError::UnknownProperty {
            selector: "offering",
            property: "username",
        }
    ));
}

#[test]
fn value_of_the_wrong_type_is_rejected() {
    let model = DomainModel::in_memory();
    let mut query = model
        .manager::<Course>()
        .fetch_query(&Course::SELECTOR_OFFERING)
        .unwrap();

    let error = query.set_property(&Course::YEAR, "2015").err().unwrap();
    match error {
        DomainError::TypeMismatch {
            property,
            expected,
            actual,
        } => {
            assert_eq!(property, "year");
            assert_eq!(expected, ValueType::Integer);
            assert_eq!(actual, ValueType::Text);
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut enrolments = model
        .manager::<Enrolment>()
        .fetch_query(&Enrolment::SELECTOR_COURSE)
        .unwrap();
    let wrong_kind = ElementRef::new(ElementKind::User, 1);
    assert!(matches!(
        enrolments.set_property(&Enrolment::COURSE, wrong_kind),
        Err(DomainError::TypeMismatch { .. })
    ));
}

#[test]
fn selector_of_another_element_is_unsupported() {
    let model = DomainModel::in_memory();
    let error = model
        .manager::<Course>()
        .fetch_query(&Role::SELECTOR_NAME)
        .err()
        .unwrap();
    assert!(matches!(
        error,
        DomainError::UnsupportedSelector {
            element: ElementKind::Course,
            ..
        }
    ));
}

#[test]
fn unbound_property_fails_before_reaching_the_store() {
    let model = DomainModel::in_memory();
    let mut query = model
        .manager::<Course>()
        .fetch_query(&Course::SELECTOR_OFFERING)
        .unwrap();
    query
        .set_property(&Course::NAME, "CIS*1500")
        .unwrap()
        .set_property(&Course::YEAR, 2015)
        .unwrap();

    match query.query_all() {
        Err(DomainError::InvalidArgument(message)) => assert!(message.contains("semester")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn single_result_queries_report_missing_and_ambiguous_matches() {
    let model = DomainModel::in_memory();
    let data = seed(&model);

    let mut missing = model
        .manager::<Course>()
        .fetch_query(&Course::SELECTOR_OFFERING)
        .unwrap();
    missing
        .set_property(&Course::NAME, "CIS*2500")
        .unwrap()
        .set_property(&Course::SEMESTER, Semester::Fall)
        .unwrap()
        .set_property(&Course::YEAR, 2015)
        .unwrap();
    match missing.query() {
        Err(DomainError::NotFound { element, detail }) => {
            assert_eq!(element, ElementKind::Course);
            assert!(detail.starts_with("offering("));
            assert!(detail.contains("CIS*2500"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let mut ambiguous = model
        .manager::<Enrolment>()
        .fetch_query(&Enrolment::SELECTOR_COURSE)
        .unwrap();
    ambiguous
        .set_property(&Enrolment::COURSE, ElementRef::to(&data.course).unwrap())
        .unwrap();
    assert!(matches!(
        ambiguous.query(),
        Err(DomainError::MultipleResults {
            element: ElementKind::Enrolment,
            count: 2,
            ..
        })
    ));
}

#[test]
fn results_are_ordered_by_id() {
    let model = DomainModel::in_memory();
    let roles = model.manager::<Role>();
    let zeta = roles.insert(Role::new("Zeta")).unwrap();
    let alpha = roles.insert(Role::new("Alpha")).unwrap();
    let middle = roles.insert(Role::new("Middle")).unwrap();

    let all = roles.fetch_all().unwrap();
    assert_eq!(all, vec![zeta.clone(), alpha, middle]);

    let ids: Vec<_> = all.iter().filter_map(Element::id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    let by_all_selector = roles.fetch_query(&Selector::ALL).unwrap().query_all().unwrap();
    assert_eq!(by_all_selector.len(), 3);
    assert_eq!(by_all_selector[0], zeta);
}

#[test]
fn fetch_by_id_checks_the_id() {
    let model = DomainModel::in_memory();
    let data = seed(&model);
    let courses = model.manager::<Course>();

    assert!(matches!(
        courses.fetch_by_id(0),
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        courses.fetch_by_id(-4),
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        courses.fetch_by_id(999),
        Err(DomainError::NotFound {
            element: ElementKind::Course,
            ..
        })
    ));

    let course_id = data.course.id().unwrap();
    assert_eq!(courses.fetch_by_id(course_id).unwrap(), data.course);

    let role_id = data.student.id().unwrap();
    assert!(matches!(
        courses.fetch_by_id(role_id),
        Err(DomainError::NotFound { .. })
    ));
}

#[test]
fn bound_values_can_be_replaced_before_running() {
    let model = DomainModel::in_memory();
    let data = seed(&model);

    let mut query = model
        .manager::<User>()
        .fetch_query(&User::SELECTOR_USERNAME)
        .unwrap();
    query
        .set_property(&User::USERNAME, "alice")
        .unwrap()
        .set_property(&User::USERNAME, Value::from("bob"))
        .unwrap();
    assert_eq!(query.query().unwrap(), data.bob);
}
