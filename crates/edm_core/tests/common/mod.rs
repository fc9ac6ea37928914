#![allow(dead_code)]

use edm_core::builder::{EnrolmentBuilder, GradeBuilder, LogEntryBuilder, UserBuilder};
use edm_core::model::{
    Action, Activity, ActivitySource, ActivityType, Course, Enrolment, Grade, LogEntry, Role,
    Semester, User,
};
use edm_core::DomainModel;

/// Small course dataset shared by manager and store tests.
pub struct Seed {
    pub course: Course,
    pub other_course: Course,
    pub student: Role,
    pub instructor: Role,
    pub alice: User,
    pub bob: User,
    pub moodle: ActivitySource,
    pub quiz: ActivityType,
    pub forum: ActivityType,
    pub quiz_one: Activity,
    pub forum_one: Activity,
    pub alice_enrolment: Enrolment,
    pub bob_enrolment: Enrolment,
    pub view: Action,
    pub submit: Action,
    pub alice_quiz_grade: Grade,
    pub alice_view: LogEntry,
    pub bob_submit: LogEntry,
}

pub fn course(model: &DomainModel, name: &str, semester: Semester, year: i32) -> Course {
    let mut builder = model.builder::<Course>().unwrap();
    builder
        .set_name(name)
        .unwrap()
        .set_semester(semester)
        .unwrap()
        .set_year(year)
        .unwrap();
    let course = builder.create().unwrap();
    model.manager::<Course>().insert(course).unwrap()
}

pub fn role(model: &DomainModel, name: &str) -> Role {
    let mut builder = model.builder::<Role>().unwrap();
    builder.set_name(name).unwrap();
    let role = builder.create().unwrap();
    model.manager::<Role>().insert(role).unwrap()
}

pub fn user(model: &DomainModel, id_number: i64, username: &str) -> User {
    let mut builder = model.builder::<User>().unwrap();
    builder
        .set_id_number(id_number)
        .unwrap()
        .set_username(username)
        .unwrap()
        .set_first_name("Test")
        .unwrap()
        .set_last_name(username)
        .unwrap();
    let user = builder.create().unwrap();
    model.manager::<User>().insert(user).unwrap()
}

pub fn source(model: &DomainModel, name: &str) -> ActivitySource {
    let mut builder = model.builder::<ActivitySource>().unwrap();
    builder.set_name(name).unwrap();
    let source = builder.create().unwrap();
    model.manager::<ActivitySource>().insert(source).unwrap()
}

pub fn activity_type(model: &DomainModel, source: &ActivitySource, name: &str) -> ActivityType {
    let mut builder = model.builder::<ActivityType>().unwrap();
    builder
        .set_activity_source(source)
        .unwrap()
        .set_name(name)
        .unwrap();
    let activity_type = builder.create().unwrap();
    model.manager::<ActivityType>().insert(activity_type).unwrap()
}

pub fn activity(
    model: &DomainModel,
    activity_type: &ActivityType,
    course: &Course,
    name: &str,
) -> Activity {
    let mut builder = model.builder::<Activity>().unwrap();
    builder
        .set_activity_type(activity_type)
        .unwrap()
        .set_course(course)
        .unwrap()
        .set_name(Some(name))
        .unwrap();
    let activity = builder.create().unwrap();
    model.manager::<Activity>().insert(activity).unwrap()
}

pub fn enrolment(model: &DomainModel, user: &User, course: &Course, role: &Role) -> Enrolment {
    let mut builder = model.builder::<Enrolment>().unwrap();
    builder
        .set_user(user)
        .unwrap()
        .set_course(course)
        .unwrap()
        .set_role(role)
        .unwrap();
    let enrolment = builder.create().unwrap();
    model.manager::<Enrolment>().insert(enrolment).unwrap()
}

pub fn action(model: &DomainModel, name: &str) -> Action {
    let mut builder = model.builder::<Action>().unwrap();
    builder.set_name(name).unwrap();
    let action = builder.create().unwrap();
    model.manager::<Action>().insert(action).unwrap()
}

pub fn grade(model: &DomainModel, enrolment: &Enrolment, activity: &Activity, value: i32) -> Grade {
    let mut builder = model.builder::<Grade>().unwrap();
    builder
        .set_enrolment(enrolment)
        .unwrap()
        .set_activity(activity)
        .unwrap()
        .set_grade(value)
        .unwrap();
    let grade = builder.create().unwrap();
    model.manager::<Grade>().insert(grade).unwrap()
}

pub fn log_entry(
    model: &DomainModel,
    enrolment: &Enrolment,
    activity: &Activity,
    action: &Action,
    time: i64,
) -> LogEntry {
    let mut builder = model.builder::<LogEntry>().unwrap();
    builder
        .set_enrolment(enrolment)
        .unwrap()
        .set_activity(activity)
        .unwrap()
        .set_action(action)
        .unwrap()
        .set_time(time)
        .unwrap()
        .set_ip_address(Some("10.0.0.1"))
        .unwrap();
    let entry = builder.create().unwrap();
    model.manager::<LogEntry>().insert(entry).unwrap()
}

pub fn seed(model: &DomainModel) -> Seed {
    let course = course(model, "CIS*1500", Semester::Fall, 2015);
    let other_course = course_other(model);
    let student = role(model, "Student");
    let instructor = role(model, "Instructor");
    let alice = user(model, 1001, "alice");
    let bob = user(model, 1002, "bob");
    let moodle = source(model, "moodle");
    let quiz = activity_type(model, &moodle, "quiz");
    let forum = activity_type(model, &moodle, "forum");
    let quiz_one = activity(model, &quiz, &course, "Quiz 1");
    let forum_one = activity(model, &forum, &course, "Forum 1");
    let alice_enrolment = enrolment(model, &alice, &course, &student);
    let bob_enrolment = enrolment(model, &bob, &course, &instructor);
    let view = action(model, "view");
    let submit = action(model, "submit");
    let alice_quiz_grade = grade(model, &alice_enrolment, &quiz_one, 87);
    let alice_view = log_entry(model, &alice_enrolment, &quiz_one, &view, 1_442_000_000_000);
    let bob_submit = log_entry(model, &bob_enrolment, &forum_one, &submit, 1_442_000_100_000);

    Seed {
        course,
        other_course,
        student,
        instructor,
        alice,
        bob,
        moodle,
        quiz,
        forum,
        quiz_one,
        forum_one,
        alice_enrolment,
        bob_enrolment,
        view,
        submit,
        alice_quiz_grade,
        alice_view,
        bob_submit,
    }
}

fn course_other(model: &DomainModel) -> Course {
    course(model, "CIS*1500", Semester::Winter, 2016)
}

/// Exercises every convenience query against a seeded model.
pub fn assert_convenience_loaders(model: &DomainModel, seed: &Seed) {
    let courses = model.manager::<Course>();
    assert_eq!(
        courses
            .fetch_by_offering("CIS*1500", Semester::Fall, 2015)
            .unwrap(),
        seed.course
    );
    assert_eq!(
        courses
            .fetch_by_offering("CIS*1500", Semester::Winter, 2016)
            .unwrap(),
        seed.other_course
    );

    let roles = model.manager::<Role>();
    assert_eq!(roles.fetch_by_name("Student").unwrap(), seed.student);

    let users = model.manager::<User>();
    assert_eq!(users.fetch_by_username("bob").unwrap(), seed.bob);
    assert_eq!(users.fetch_by_id_number(1001).unwrap(), seed.alice);

    let sources = model.manager::<ActivitySource>();
    assert_eq!(sources.fetch_by_name("moodle").unwrap(), seed.moodle);

    let types = model.manager::<ActivityType>();
    assert_eq!(types.fetch_by_name(&seed.moodle, "forum").unwrap(), seed.forum);
    assert_eq!(
        types.fetch_all_for_source(&seed.moodle).unwrap(),
        vec![seed.quiz.clone(), seed.forum.clone()]
    );

    let activities = model.manager::<Activity>();
    assert_eq!(
        activities.fetch_all_for_type(&seed.quiz).unwrap(),
        vec![seed.quiz_one.clone()]
    );
    assert_eq!(
        activities.fetch_all_for_course(&seed.course).unwrap(),
        vec![seed.quiz_one.clone(), seed.forum_one.clone()]
    );
    assert!(activities
        .fetch_all_for_course(&seed.other_course)
        .unwrap()
        .is_empty());

    let enrolments = model.manager::<Enrolment>();
    assert_eq!(
        enrolments.fetch_all_for_role(&seed.instructor).unwrap(),
        vec![seed.bob_enrolment.clone()]
    );
    assert_eq!(
        enrolments.fetch_all_for_course(&seed.course).unwrap(),
        vec![seed.alice_enrolment.clone(), seed.bob_enrolment.clone()]
    );
    assert_eq!(
        enrolments.fetch_all_for_user(&seed.alice).unwrap(),
        vec![seed.alice_enrolment.clone()]
    );

    let grades = model.manager::<Grade>();
    assert_eq!(
        grades.fetch_all_for_enrolment(&seed.alice_enrolment).unwrap(),
        vec![seed.alice_quiz_grade.clone()]
    );
    assert_eq!(
        grades
            .fetch_for(&seed.alice_enrolment, &seed.quiz_one)
            .unwrap()
            .grade(),
        87
    );

    let actions = model.manager::<Action>();
    assert_eq!(actions.fetch_by_name("submit").unwrap(), seed.submit);

    let entries = model.manager::<LogEntry>();
    assert_eq!(
        entries.fetch_all_for_course(&seed.course).unwrap(),
        vec![seed.alice_view.clone(), seed.bob_submit.clone()]
    );
    assert_eq!(
        entries
            .fetch_all_for_enrolment(&seed.bob_enrolment)
            .unwrap(),
        vec![seed.bob_submit.clone()]
    );
}
