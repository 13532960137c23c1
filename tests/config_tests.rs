// Config loading and validation tests

use machine_dashboard::config::{AppConfig, Environment};
use std::path::{Path, PathBuf};

const VALID_CONFIG: &str = r#"
[server]
port = 8050
host = "0.0.0.0"

[data]
environment = "debug"
debug_data_dir = "machine_data"
production_data_dir = "/srv/machine_data"

[refresh]
homepage_interval_ms = 10000
detail_interval_ms = 15000
host_interval_ms = 5000

[seed]
machines = ["machine1", "machine2"]
days = 7
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8050);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.data.environment, Environment::Debug);
    assert_eq!(config.refresh.homepage_interval_ms, 10000);
    assert_eq!(config.refresh.detail_interval_ms, 15000);
    assert_eq!(config.refresh.host_interval_ms, 5000);
    assert_eq!(config.seed.machines, vec!["machine1", "machine2"]);
    assert_eq!(config.seed.days, 7);
}

#[test]
fn test_config_seed_defaults_when_omitted() {
    let without_seed = VALID_CONFIG.split("[seed]").next().unwrap();
    let config = AppConfig::load_from_str(without_seed).expect("valid");
    assert_eq!(
        config.seed.machines,
        vec!["machine1", "machine2", "machine3"]
    );
    assert_eq!(config.seed.days, 30);
}

#[test]
fn test_debug_root_is_relative_to_config_dir() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    assert_eq!(
        config.data.resolve_root(Path::new("/opt/dashboard")),
        PathBuf::from("/opt/dashboard/machine_data")
    );
}

#[test]
fn test_absolute_debug_root_is_kept() {
    let cfg = VALID_CONFIG.replace(
        "debug_data_dir = \"machine_data\"",
        "debug_data_dir = \"/tmp/machines\"",
    );
    let config = AppConfig::load_from_str(&cfg).unwrap();
    assert_eq!(
        config.data.resolve_root(Path::new("/opt/dashboard")),
        PathBuf::from("/tmp/machines")
    );
}

#[test]
fn test_production_root_is_used_as_is() {
    let cfg = VALID_CONFIG.replace("environment = \"debug\"", "environment = \"production\"");
    let config = AppConfig::load_from_str(&cfg).unwrap();
    assert_eq!(config.data.environment, Environment::Production);
    assert_eq!(
        config.data.resolve_root(Path::new("/opt/dashboard")),
        PathBuf::from("/srv/machine_data")
    );
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8050", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_production_dir() {
    let bad = VALID_CONFIG
        .replace("environment = \"debug\"", "environment = \"production\"")
        .replace(
            "production_data_dir = \"/srv/machine_data\"",
            "production_data_dir = \"\"",
        );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("production_data_dir"));
}

#[test]
fn test_config_validation_rejects_empty_debug_dir() {
    let bad = VALID_CONFIG.replace("debug_data_dir = \"machine_data\"", "debug_data_dir = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("debug_data_dir"));
}

#[test]
fn test_config_validation_rejects_unknown_environment() {
    let bad = VALID_CONFIG.replace("environment = \"debug\"", "environment = \"staging\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_zero_refresh_intervals() {
    for key in [
        "homepage_interval_ms = 10000",
        "detail_interval_ms = 15000",
        "host_interval_ms = 5000",
    ] {
        let name = key.split(' ').next().unwrap();
        let bad = VALID_CONFIG.replace(key, &format!("{} = 0", name));
        let err = AppConfig::load_from_str(&bad).unwrap_err();
        assert!(err.to_string().contains(name), "{}: {}", name, err);
    }
}

#[test]
fn test_config_validation_rejects_seed_days_zero() {
    let bad = VALID_CONFIG.replace("days = 7", "days = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("seed.days"));
}

#[test]
fn test_config_validation_rejects_path_like_seed_machine() {
    let bad = VALID_CONFIG.replace("\"machine2\"", "\"../machine2\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("seed.machines"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    let resolved = AppConfig::path();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8050);
    assert_eq!(resolved, path);
}
