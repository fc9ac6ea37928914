use edm_core::config::ConfigError;
use edm_core::model::Role;
use edm_core::{DomainModel, EdmConfig, StoreConfig};
use std::fs;

#[test]
fn config_file_opens_the_configured_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("edm.sqlite3");
    let config_path = dir.path().join("edm.json");
    let json = format!(
        r#"{{ "store": {{ "backend": "sqlite", "path": {} }} }}"#,
        serde_json::to_string(&db_path).unwrap()
    );
    fs::write(&config_path, json).unwrap();

    let config = EdmConfig::load(&config_path).unwrap();
    assert_eq!(
        config.store,
        StoreConfig::Sqlite {
            path: db_path.clone()
        }
    );
    assert!(config.logging.is_none());

    let model = DomainModel::open(&config.store).unwrap();
    model.manager::<Role>().insert(Role::new("Student")).unwrap();
    model.close();
    assert!(db_path.exists());
}

#[test]
fn missing_config_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    match EdmConfig::load(&missing) {
        Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(config) => panic!("unexpected config: {config:?}"),
    }
}

#[test]
fn malformed_config_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("broken.json");
    fs::write(&config_path, "{ \"store\": ").unwrap();

    let error = EdmConfig::load(&config_path).unwrap_err();
    assert!(matches!(error, ConfigError::Parse(_)));
    assert!(error.to_string().starts_with("invalid config"));
}
