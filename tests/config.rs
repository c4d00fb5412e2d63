use prayer_board::config::{DEFAULT_DATA_PATH, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, PrayerApiConfig};
use prayer_board::Config;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn config_from(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn empty_environment_uses_defaults() {
    let config = config_from(&[]);

    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    assert_eq!(config.prayer_api, PrayerApiConfig::default());
}

#[test]
fn variables_override_defaults() {
    let config = config_from(&[
        ("PORT", "9090"),
        ("APP_DATA_PATH", "/tmp/board.json"),
        ("PRAYER_API_BASE", "http://127.0.0.1:7000/v1/"),
        ("PRAYER_CITY", "Alexandria"),
        ("PRAYER_METHOD", " 3 "),
        ("PRAYER_TIMEOUT_SECS", "2"),
    ]);

    assert_eq!(config.port, 9090);
    assert_eq!(config.data_path, PathBuf::from("/tmp/board.json"));
    assert_eq!(config.prayer_api.base_url, "http://127.0.0.1:7000/v1");
    assert_eq!(config.prayer_api.city, "Alexandria");
    assert_eq!(config.prayer_api.country, "Egypt");
    assert_eq!(config.prayer_api.method, 3);
    assert_eq!(config.prayer_api.timeout, Duration::from_secs(2));
}

#[test]
fn zero_timeout_falls_back_to_default() {
    let config = config_from(&[("PRAYER_TIMEOUT_SECS", "0")]);
    assert_eq!(config.prayer_api.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[test]
fn unparsable_numbers_fall_back_to_defaults() {
    let config = config_from(&[("PORT", "eighty"), ("PRAYER_METHOD", "300"), ("PRAYER_TIMEOUT_SECS", "-1")]);

    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.prayer_api.method, 5);
    assert_eq!(config.prayer_api.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}
