use crate::countdown::{Countdown, parse_clock};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// Daily order, Fajr first.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];
}

/// One day's timings. Serialized as `{"Fajr": "HH:MM", ...}`; extra keys in
/// incoming payloads are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrayerTimes {
    #[serde(with = "clock")]
    pub fajr: NaiveTime,
    #[serde(with = "clock")]
    pub sunrise: NaiveTime,
    #[serde(with = "clock")]
    pub dhuhr: NaiveTime,
    #[serde(with = "clock")]
    pub asr: NaiveTime,
    #[serde(with = "clock")]
    pub maghrib: NaiveTime,
    #[serde(with = "clock")]
    pub isha: NaiveTime,
}

impl PrayerTimes {
    /// Approximate Cairo timings used when neither the API nor the cache can
    /// answer.
    pub fn fallback() -> Self {
        Self {
            fajr: hm(5, 0),
            sunrise: hm(6, 30),
            dhuhr: hm(12, 0),
            asr: hm(15, 30),
            maghrib: hm(18, 0),
            isha: hm(19, 30),
        }
    }

    pub fn get(&self, prayer: Prayer) -> NaiveTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, NaiveTime)> + '_ {
        Prayer::ALL.into_iter().map(|prayer| (prayer, self.get(prayer)))
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

mod clock {
    use super::parse_clock;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_clock(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPrayerTimes {
    pub times: PrayerTimes,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Live,
    Cached,
    Fallback,
}

/// Outcome of a lookup. `date` is the day the timings belong to, which for
/// `Tier::Cached` may be an earlier day; empty for `Tier::Fallback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrayerTimes {
    pub times: PrayerTimes,
    pub tier: Tier,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct PrayerTimesResponse {
    pub date: String,
    pub tier: Tier,
    pub times: PrayerTimes,
    pub display: BTreeMap<Prayer, String>,
    pub countdown: Countdown,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DarkModeRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DarkModeResponse {
    pub enabled: bool,
}
