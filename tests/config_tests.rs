//! Static configuration loading tests

use ipwhere::config::StaticConfig;
use ipwhere::errors::IpWhereError;
use tempfile::TempDir;

#[test]
fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
[server]
host = "127.0.0.1"
port = 9090

[geoip]
city_db_path = "/var/lib/geoip/GeoLite2-City.mmdb"
isp_db_path = "/var/lib/geoip/GeoIP2-ISP.mmdb"
locales = ["en"]

[logging]
format = "json"
"#,
    )
    .unwrap();

    let config = StaticConfig::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(
        config.geoip.isp_db_path.as_deref(),
        Some("/var/lib/geoip/GeoIP2-ISP.mmdb")
    );
    assert_eq!(config.geoip.locales, vec!["en"]);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.routes.health_prefix, "/health");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let err = StaticConfig::load(Some(path.to_str().unwrap())).unwrap_err();
    assert!(matches!(err, IpWhereError::Config(_)));
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[logging]\nformat = \"yaml\"\n").unwrap();

    let err = StaticConfig::load(Some(path.to_str().unwrap())).unwrap_err();
    assert!(matches!(err, IpWhereError::Config(_)));
    assert!(err.message().contains("logging.format"));
}

#[test]
fn test_save_and_reload_sample() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("ipwhere.toml");

    StaticConfig::default().save_to_file(&path).unwrap();
    let reloaded = StaticConfig::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(reloaded.geoip, StaticConfig::default().geoip);
    assert_eq!(reloaded.server.port, 8088);
}
