//! Resampling hourly weather onto the five-minute grid of the bike data.

use crate::types::date_range::DateRange;
use crate::types::weather::{ExpandedWeather, WeatherObservation, WeatherReading};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use log::warn;
use std::collections::HashMap;

/// Spacing between ticks, in minutes.
pub const TICK_MINUTES: i64 = 5;

/// Every tick from `range.start` to `range.end` inclusive, five minutes apart.
///
/// Ticks are anchored at `start`; an empty range yields no ticks.
pub fn tick_datetimes(range: &DateRange) -> Vec<NaiveDateTime> {
    if range.is_empty() {
        return Vec::new();
    }
    let step = Duration::minutes(TICK_MINUTES);
    let count = (range.end - range.start).num_minutes() / TICK_MINUTES + 1;
    let mut ticks = Vec::with_capacity(count as usize);
    let mut current = Some(range.start);
    while let Some(tick) = current.filter(|tick| *tick <= range.end) {
        ticks.push(tick);
        current = tick.checked_add_signed(step);
    }
    ticks
}

/// The tick of `range` whose five-minute slot holds `datetime`.
///
/// Slots are measured from `range.start`, the same anchor [`tick_datetimes`]
/// uses, so a timestamp exactly on a tick maps to that tick. Returns `None`
/// for timestamps outside the range.
///
/// # Examples
///
/// ```
/// use bike_weather::{tick_for, DateRange, parse_datetime};
///
/// let range = DateRange::resolve("2021-01-01 09:02:00", "2021-01-01 09:57:00").unwrap();
/// let tick = tick_for(&range, &parse_datetime("2021-01-01 09:15:00").unwrap());
/// assert_eq!(tick, Some(parse_datetime("2021-01-01 09:12:00").unwrap()));
/// ```
pub fn tick_for(range: &DateRange, datetime: &NaiveDateTime) -> Option<NaiveDateTime> {
    if !range.contains(datetime) {
        return None;
    }
    let offset = (*datetime - range.start).num_seconds();
    let slot = TICK_MINUTES * 60;
    range
        .start
        .checked_add_signed(Duration::seconds(offset - offset % slot))
}

/// Expands hourly observations into one row per tick of `range`.
///
/// Each tick takes the observation for its `(date, hour)`; `rain` is also
/// divided evenly over the hour as `avg_rain_per_interval`. Ticks whose hour
/// has no observation keep `weather: None`. When two observations share an
/// hour the earlier one wins.
///
/// # Examples
///
/// ```
/// use bike_weather::{expand_weather, DateRange};
///
/// let range = DateRange::resolve("2021-01-01 09:00:00", "2021-01-01 09:55:00").unwrap();
/// let expanded = expand_weather(&[], &range);
/// assert_eq!(expanded.len(), 12);
/// assert!(expanded.iter().all(|tick| tick.weather.is_none()));
/// ```
pub fn expand_weather(hourly: &[WeatherObservation], range: &DateRange) -> Vec<ExpandedWeather> {
    let mut by_hour: HashMap<(NaiveDate, u32), WeatherReading> = HashMap::with_capacity(hourly.len());
    let mut ordered: Vec<&WeatherObservation> = hourly.iter().collect();
    ordered.sort_by_key(|obs| obs.datetime);
    for obs in ordered {
        let key = obs.hour_key();
        if by_hour.contains_key(&key) {
            warn!(
                "Duplicate hourly weather for {} {:02}:00, keeping the first observation",
                key.0, key.1
            );
            continue;
        }
        by_hour.insert(key, WeatherReading::from(obs));
    }

    tick_datetimes(range)
        .into_iter()
        .map(|datetime| {
            let date = datetime.date();
            let hour = datetime.hour();
            ExpandedWeather {
                datetime,
                date,
                hour,
                minute: datetime.minute(),
                weather: by_hour.get(&(date, hour)).cloned(),
            }
        })
        .collect()
}
