//! Pure helpers behind the countdown view: clock parsing and formatting, the
//! progress bar width, and the next/previous prayer lookup.

use crate::errors::TimeParseError;
use crate::models::{Prayer, PrayerTimes};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::Serialize;

/// Parses a 24-hour `HH:MM` time. Anything after the first whitespace (the
/// API sometimes appends a zone such as `"05:00 (EET)"`) is ignored.
pub fn parse_clock(input: &str) -> Result<NaiveTime, TimeParseError> {
    let token = input.split_whitespace().next().unwrap_or_default();
    NaiveTime::parse_from_str(token, "%H:%M").map_err(|_| TimeParseError::new(input))
}

/// `HH:MM` on today's local date, seconds zeroed.
pub fn parse_time(input: &str) -> Result<NaiveDateTime, TimeParseError> {
    parse_time_on(Local::now().date_naive(), input)
}

pub fn parse_time_on(date: NaiveDate, input: &str) -> Result<NaiveDateTime, TimeParseError> {
    Ok(date.and_time(parse_clock(input)?))
}

/// Renders a duration as `HH:MM:SS`, flooring to whole seconds. Hours are not
/// wrapped at 24; negative durations render as zero.
pub fn format_time_remaining(remaining: TimeDelta) -> String {
    let total_seconds = remaining.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn format_to_12_hour(time: &str) -> Result<String, TimeParseError> {
    parse_clock(time).map(format_clock_12_hour)
}

/// `h:MM AM|PM`, no leading zero on the hour.
pub fn format_clock_12_hour(time: NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{:02} {period}", time.minute())
}

/// Position of `now` between `start` and `end` as a percentage in `[0, 100]`.
pub fn compute_progress_percent(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> f64 {
    if end <= start {
        return if now >= end { 100.0 } else { 0.0 };
    }

    let total = (end - start).num_milliseconds() as f64;
    let elapsed = (now - start).num_milliseconds() as f64;
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Countdown {
    pub next: Prayer,
    pub next_at: NaiveDateTime,
    pub previous: Prayer,
    pub previous_at: NaiveDateTime,
    pub remaining_ms: i64,
    pub remaining: String,
    pub progress: f64,
}

pub fn countdown(times: &PrayerTimes) -> Countdown {
    countdown_at(times, Local::now().naive_local())
}

/// After Isha the next prayer is tomorrow's Fajr; before Fajr the previous
/// one is yesterday's Isha. Both reuse today's timings.
pub fn countdown_at(times: &PrayerTimes, now: NaiveDateTime) -> Countdown {
    let today = now.date();

    let (next, next_at) = Prayer::ALL
        .iter()
        .map(|&prayer| (prayer, today.and_time(times.get(prayer))))
        .find(|(_, at)| *at > now)
        .unwrap_or_else(|| {
            let tomorrow = (now + TimeDelta::days(1)).date();
            (Prayer::Fajr, tomorrow.and_time(times.fajr))
        });

    let (previous, previous_at) = Prayer::ALL
        .iter()
        .rev()
        .map(|&prayer| (prayer, today.and_time(times.get(prayer))))
        .find(|(_, at)| *at <= now)
        .unwrap_or_else(|| {
            let yesterday = (now - TimeDelta::days(1)).date();
            (Prayer::Isha, yesterday.and_time(times.isha))
        });

    let remaining = next_at - now;

    Countdown {
        next,
        next_at,
        previous,
        previous_at,
        remaining_ms: remaining.num_milliseconds(),
        remaining: format_time_remaining(remaining),
        progress: compute_progress_percent(previous_at, next_at, now),
    }
}
