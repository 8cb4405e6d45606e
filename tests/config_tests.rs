// Config loading and validation tests

use superpanel::config::AppConfig;
use superpanel::inventory::ProcessOrder;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[probe]
connect_timeout_ms = 1500

[inventory]
default_max_processes = 25
order = "enumeration"
default_max_files = 40

[publishing]
cpu_stats_frequency_ms = 1000
network_stats_frequency_ms = 2000
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 8081
host = "127.0.0.1"

[publishing]
cpu_stats_frequency_ms = 1000
network_stats_frequency_ms = 1000
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.probe.connect_timeout_ms, 1500);
    assert_eq!(config.inventory.default_max_processes, 25);
    assert_eq!(config.inventory.order, ProcessOrder::Enumeration);
    assert_eq!(config.inventory.default_max_files, 40);
    assert_eq!(config.publishing.network_stats_frequency_ms, 2000);
}

#[test]
fn test_config_defaults_when_sections_omitted() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("valid");
    assert_eq!(config.probe.connect_timeout_ms, 2000);
    assert_eq!(config.inventory.default_max_processes, 10);
    assert_eq!(config.inventory.order, ProcessOrder::Memory);
    assert_eq!(config.inventory.default_max_files, 100);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_host() {
    let bad = VALID_CONFIG.replace("host = \"0.0.0.0\"", "host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.host"));
}

#[test]
fn test_config_validation_rejects_connect_timeout_zero() {
    let bad = VALID_CONFIG.replace("connect_timeout_ms = 1500", "connect_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("connect_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_default_max_processes_zero() {
    let bad = VALID_CONFIG.replace("default_max_processes = 25", "default_max_processes = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("default_max_processes"));
}

#[test]
fn test_config_validation_rejects_default_max_files_zero() {
    let bad = VALID_CONFIG.replace("default_max_files = 40", "default_max_files = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("default_max_files"));
}

#[test]
fn test_config_rejects_unknown_process_order() {
    let bad = VALID_CONFIG.replace("order = \"enumeration\"", "order = \"cpu\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_cpu_stats_frequency_zero() {
    let bad = VALID_CONFIG.replace(
        "cpu_stats_frequency_ms = 1000",
        "cpu_stats_frequency_ms = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("cpu_stats_frequency_ms"));
}

#[test]
fn test_config_validation_rejects_network_stats_frequency_zero() {
    let bad = VALID_CONFIG.replace(
        "network_stats_frequency_ms = 2000",
        "network_stats_frequency_ms = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("network_stats_frequency_ms"));
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
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.probe.connect_timeout_ms, 1500);
}
