//! Registration of the default builder and loader implementations.

use crate::builder::{
    register_builder, ActionBuilder, ActivityBuilder, ActivitySourceBuilder, ActivityTypeBuilder,
    CourseBuilder, DefaultActionBuilder, DefaultActivityBuilder, DefaultActivitySourceBuilder,
    DefaultActivityTypeBuilder, DefaultCourseBuilder, DefaultEnrolmentBuilder,
    DefaultGradeBuilder, DefaultLogEntryBuilder, DefaultRoleBuilder, DefaultUserBuilder,
    EnrolmentBuilder, GradeBuilder, LogEntryBuilder, RoleBuilder, UserBuilder,
};
use crate::loader::{
    register_loader, ActionLoader, ActivityLoader, ActivitySourceLoader, ActivityTypeLoader,
    CourseLoader, DefaultActionLoader, DefaultActivityLoader, DefaultActivitySourceLoader,
    DefaultActivityTypeLoader, DefaultCourseLoader, DefaultEnrolmentLoader, DefaultGradeLoader,
    DefaultLogEntryLoader, DefaultRoleLoader, DefaultUserLoader, EnrolmentLoader, GradeLoader,
    LogEntryLoader, RoleLoader, UserLoader,
};
use crate::model::{
    Action, Activity, ActivitySource, ActivityType, Course, Enrolment, Grade, LogEntry, Role, User,
};
use crate::profile::Profile;
use log::info;
use once_cell::sync::OnceCell;

static DEFAULTS_REGISTERED: OnceCell<()> = OnceCell::new();

/// Registers every default builder and loader. Runs once per process.
pub fn register_defaults() {
    DEFAULTS_REGISTERED.get_or_init(|| {
        register_builder::<Action, DefaultActionBuilder, _>(|m| -> Box<dyn ActionBuilder> {
            Box::new(DefaultActionBuilder::new(m))
        });
        register_builder::<Activity, DefaultActivityBuilder, _>(
            |m| -> Box<dyn ActivityBuilder> { Box::new(DefaultActivityBuilder::new(m)) },
        );
        register_builder::<ActivitySource, DefaultActivitySourceBuilder, _>(
            |m| -> Box<dyn ActivitySourceBuilder> {
                Box::new(DefaultActivitySourceBuilder::new(m))
            },
        );
        register_builder::<ActivityType, DefaultActivityTypeBuilder, _>(
            |m| -> Box<dyn ActivityTypeBuilder> { Box::new(DefaultActivityTypeBuilder::new(m)) },
        );
        register_builder::<Course, DefaultCourseBuilder, _>(|m| -> Box<dyn CourseBuilder> {
            Box::new(DefaultCourseBuilder::new(m))
        });
        register_builder::<Enrolment, DefaultEnrolmentBuilder, _>(
            |m| -> Box<dyn EnrolmentBuilder> { Box::new(DefaultEnrolmentBuilder::new(m)) },
        );
        register_builder::<Grade, DefaultGradeBuilder, _>(|m| -> Box<dyn GradeBuilder> {
            Box::new(DefaultGradeBuilder::new(m))
        });
        register_builder::<LogEntry, DefaultLogEntryBuilder, _>(
            |m| -> Box<dyn LogEntryBuilder> { Box::new(DefaultLogEntryBuilder::new(m)) },
        );
        register_builder::<Role, DefaultRoleBuilder, _>(|m| -> Box<dyn RoleBuilder> {
            Box::new(DefaultRoleBuilder::new(m))
        });
        register_builder::<User, DefaultUserBuilder, _>(|m| -> Box<dyn UserBuilder> {
            Box::new(DefaultUserBuilder::new(m))
        });

        register_loader::<Action, DefaultActionLoader, _>(|m| -> Box<dyn ActionLoader> {
            Box::new(DefaultActionLoader::new(m))
        });
        register_loader::<Activity, DefaultActivityLoader, _>(|m| -> Box<dyn ActivityLoader> {
            Box::new(DefaultActivityLoader::new(m))
        });
        register_loader::<ActivitySource, DefaultActivitySourceLoader, _>(
            |m| -> Box<dyn ActivitySourceLoader> { Box::new(DefaultActivitySourceLoader::new(m)) },
        );
        register_loader::<ActivityType, DefaultActivityTypeLoader, _>(
            |m| -> Box<dyn ActivityTypeLoader> { Box::new(DefaultActivityTypeLoader::new(m)) },
        );
        register_loader::<Course, DefaultCourseLoader, _>(|m| -> Box<dyn CourseLoader> {
            Box::new(DefaultCourseLoader::new(m))
        });
        register_loader::<Enrolment, DefaultEnrolmentLoader, _>(
            |m| -> Box<dyn EnrolmentLoader> { Box::new(DefaultEnrolmentLoader::new(m)) },
        );
        register_loader::<Grade, DefaultGradeLoader, _>(|m| -> Box<dyn GradeLoader> {
            Box::new(DefaultGradeLoader::new(m))
        });
        register_loader::<LogEntry, DefaultLogEntryLoader, _>(|m| -> Box<dyn LogEntryLoader> {
            Box::new(DefaultLogEntryLoader::new(m))
        });
        register_loader::<Role, DefaultRoleLoader, _>(|m| -> Box<dyn RoleLoader> {
            Box::new(DefaultRoleLoader::new(m))
        });
        register_loader::<User, DefaultUserLoader, _>(|m| -> Box<dyn UserLoader> {
            Box::new(DefaultUserLoader::new(m))
        });

        info!("event=registry_defaults module=registry status=ok builders=10 loaders=10");
    });
}

/// Profile selecting every `Default*` implementation.
pub fn default_profile() -> Profile {
    Profile::new()
        .with_builder::<Action, DefaultActionBuilder>()
        .with_builder::<Activity, DefaultActivityBuilder>()
        .with_builder::<ActivitySource, DefaultActivitySourceBuilder>()
        .with_builder::<ActivityType, DefaultActivityTypeBuilder>()
        .with_builder::<Course, DefaultCourseBuilder>()
        .with_builder::<Enrolment, DefaultEnrolmentBuilder>()
        .with_builder::<Grade, DefaultGradeBuilder>()
        .with_builder::<LogEntry, DefaultLogEntryBuilder>()
        .with_builder::<Role, DefaultRoleBuilder>()
        .with_builder::<User, DefaultUserBuilder>()
        .with_loader::<Action, DefaultActionLoader>()
        .with_loader::<Activity, DefaultActivityLoader>()
        .with_loader::<ActivitySource, DefaultActivitySourceLoader>()
        .with_loader::<ActivityType, DefaultActivityTypeLoader>()
        .with_loader::<Course, DefaultCourseLoader>()
        .with_loader::<Enrolment, DefaultEnrolmentLoader>()
        .with_loader::<Grade, DefaultGradeLoader>()
        .with_loader::<LogEntry, DefaultLogEntryLoader>()
        .with_loader::<Role, DefaultRoleLoader>()
        .with_loader::<User, DefaultUserLoader>()
}
