use std::fs;
use taskd::libs::config::Config;

#[test]
fn missing_file_yields_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::read(&temp_dir.path().join("config.json")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.db.path, "taskd.db");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.timeout_secs, 10);
    assert_eq!(config.worker.interval_secs, 60);
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"server": {"port": 9090}, "worker": {"interval_secs": 5}}"#).unwrap();

    let config = Config::read(&path).unwrap();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.timeout_secs, 10);
    assert_eq!(config.worker.interval_secs, 5);
    assert_eq!(config.db.path, "taskd.db");
}

#[test]
fn invalid_json_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "port = 9090").unwrap();

    assert!(Config::read(&path).is_err());
}
