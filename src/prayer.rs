//! Prayer-time lookup with a three-tier fallback: the remote API, then the
//! last cached answer, then fixed approximate timings.

use crate::config::{CONNECT_TIMEOUT_SECS, PrayerApiConfig};
use crate::errors::{FetchError, StoreError};
use crate::models::{CachedPrayerTimes, PrayerTimes, ResolvedPrayerTimes, Tier};
use crate::storage::KeyValueStore;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

pub const CACHE_KEY: &str = "lastPrayerTimes";

/// Remote source of a single day's timings.
pub trait PrayerSource {
    fn fetch_timings(&self, date: NaiveDate) -> impl Future<Output = Result<PrayerTimes, FetchError>> + Send;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct AladhanClient {
    http: reqwest::Client,
    config: PrayerApiConfig,
}

impl AladhanClient {
    pub fn new(config: PrayerApiConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.timeout))
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn timings_url(&self, date: NaiveDate) -> String {
        format!("{}/timingsByCity/{}", self.config.base_url, date.format("%Y-%m-%d"))
    }
}

impl PrayerSource for AladhanClient {
    async fn fetch_timings(&self, date: NaiveDate) -> Result<PrayerTimes, FetchError> {
        let method = self.config.method.to_string();
        let response = self
            .http
            .get(self.timings_url(date))
            .query(&[
                ("city", self.config.city.as_str()),
                ("country", self.config.country.as_str()),
                ("method", method.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct ApiResponse {
    data: ApiData,
}

#[derive(Deserialize)]
struct ApiData {
    timings: PrayerTimes,
}

pub fn parse_response(json: &str) -> Result<PrayerTimes, FetchError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| FetchError::Parse(e.to_string()))?;
    Ok(api.data.timings)
}

// =============================================================================
// PROVIDER
// =============================================================================

pub struct PrayerTimeProvider<S, K> {
    source: S,
    store: K,
}

impl<S: PrayerSource, K: KeyValueStore> PrayerTimeProvider<S, K> {
    pub fn new(source: S, store: K) -> Self {
        Self { source, store }
    }

    /// Today's timings by the local clock. Never fails.
    pub async fn fetch_prayer_times(&self) -> ResolvedPrayerTimes {
        self.fetch_prayer_times_on(Local::now().date_naive()).await
    }

    pub async fn fetch_prayer_times_on(&self, date: NaiveDate) -> ResolvedPrayerTimes {
        let date_key = date.format("%Y-%m-%d").to_string();

        match self.source.fetch_timings(date).await {
            Ok(times) => {
                self.remember(&times, &date_key).await;
                ResolvedPrayerTimes {
                    times,
                    tier: Tier::Live,
                    date: date_key,
                }
            }
            Err(err) => {
                warn!("failed to fetch prayer times for {date_key}: {err}");
                self.recover()
            }
        }
    }

    /// Last stored answer, whatever day it was fetched for. A malformed entry
    /// reads as absent.
    pub fn cached(&self) -> Option<CachedPrayerTimes> {
        let raw = self.store.get(CACHE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(cached) => Some(cached),
            Err(err) => {
                warn!("ignoring malformed {CACHE_KEY} entry: {err}");
                None
            }
        }
    }

    async fn remember(&self, times: &PrayerTimes, date: &str) {
        let cached = CachedPrayerTimes {
            times: times.clone(),
            date: date.to_string(),
        };
        let result = match serde_json::to_string(&cached) {
            Ok(payload) => self.store.set(CACHE_KEY, &payload).await,
            Err(err) => Err(StoreError::from(err)),
        };
        if let Err(err) = result {
            error!("failed to cache prayer times: {err}");
        }
    }

    fn recover(&self) -> ResolvedPrayerTimes {
        match self.cached() {
            Some(cached) => {
                info!("using cached prayer times from {}", cached.date);
                ResolvedPrayerTimes {
                    times: cached.times,
                    tier: Tier::Cached,
                    date: cached.date,
                }
            }
            None => {
                info!("no cached prayer times, using fallback timings");
                ResolvedPrayerTimes {
                    times: PrayerTimes::fallback(),
                    tier: Tier::Fallback,
                    date: String::new(),
                }
            }
        }
    }
}
