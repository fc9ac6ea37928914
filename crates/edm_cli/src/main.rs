//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a domain model from an optional JSON config file.
//! - Store one sample course offering and print what the store holds.
//!
//! Usage: `edm_cli [config.json]`

use edm_core::builder::CourseBuilder;
use edm_core::model::{Course, Role, Semester};
use edm_core::{DomainModel, EdmConfig, ElementBuilder};
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("edm_core version={}", edm_core::core_version());
    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error error={message}");
            eprintln!("edm_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<(), String> {
    let config = match config_path {
        Some(path) => EdmConfig::load(&path).map_err(|err| err.to_string())?,
        None => EdmConfig::default(),
    };
    if let Some(logging) = &config.logging {
        edm_core::init_from_config(logging)?;
    }

    let model = DomainModel::open(&config.store).map_err(|err| err.to_string())?;
    info!(
        "event=cli_run module=cli status=start backend={}",
        model.data_store().name()
    );

    let courses = model.manager::<Course>();
    let mut builder = courses.builder().map_err(|err| err.to_string())?;
    builder
        .set_name("CIS*1500")
        .and_then(|builder| builder.set_semester(Semester::Fall))
        .and_then(|builder| builder.set_year(2015))
        .map_err(|err| err.to_string())?;
    let course = builder.create().map_err(|err| err.to_string())?;
    let course = courses.insert(course).map_err(|err| err.to_string())?;
    println!("stored {} {} {}", course.name(), course.semester(), course.year());

    let course_count = courses.fetch_all().map_err(|err| err.to_string())?.len();
    let role_count = model
        .manager::<Role>()
        .fetch_all()
        .map_err(|err| err.to_string())?
        .len();
    println!("courses={course_count} roles={role_count}");

    model.close();
    info!("event=cli_run module=cli status=ok");
    Ok(())
}
