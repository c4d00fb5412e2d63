use std::{env, path::PathBuf, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";
pub const DEFAULT_API_BASE: &str = "https://api.aladhan.com/v1";
pub const DEFAULT_CITY: &str = "Cairo";
pub const DEFAULT_COUNTRY: &str = "Egypt";
/// Egyptian General Authority of Survey.
pub const DEFAULT_METHOD: u8 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerApiConfig {
    pub base_url: String,
    pub city: String,
    pub country: String,
    pub method: u8,
    pub timeout: Duration,
}

impl Default for PrayerApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            city: DEFAULT_CITY.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            method: DEFAULT_METHOD,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub prayer_api: PrayerApiConfig,
}

impl Config {
    /// Build config from environment variables.
    ///
    /// - `PORT`: default 8080
    /// - `APP_DATA_PATH`: default `data/state.json`
    /// - `PRAYER_API_BASE`: default `https://api.aladhan.com/v1`
    /// - `PRAYER_CITY` / `PRAYER_COUNTRY`: default Cairo, Egypt
    /// - `PRAYER_METHOD`: default 5
    /// - `PRAYER_TIMEOUT_SECS`: default 10, must be positive
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with variables read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = PrayerApiConfig::default();
        let timeout_secs = parse_var(&lookup, "PRAYER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS, |secs| *secs > 0);
        let prayer_api = PrayerApiConfig {
            base_url: lookup("PRAYER_API_BASE")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            city: lookup("PRAYER_CITY").unwrap_or(defaults.city),
            country: lookup("PRAYER_COUNTRY").unwrap_or(defaults.country),
            method: parse_var(&lookup, "PRAYER_METHOD", DEFAULT_METHOD, |_| true),
            timeout: Duration::from_secs(timeout_secs),
        };

        Self {
            port: parse_var(&lookup, "PORT", DEFAULT_PORT, |_| true),
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            prayer_api,
        }
    }
}

fn parse_var<T: std::str::FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    let Some(raw) = lookup(name) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) if valid(&value) => value,
        _ => {
            warn!("ignoring invalid {name}={raw:?}, using {default}");
            default
        }
    }
}
