//! Denormalising bikes, stations and five-minute weather into one table.

use crate::error::BikeWeatherError;
use crate::expand::expand_weather;
use crate::queries::bikes::bike_records;
use crate::queries::stations::station_records;
use crate::queries::weather::weather_observations;
use crate::types::bike::BikeRecord;
use crate::types::date_range::DateRange;
use crate::types::merged::{JoinReport, MergedDataset, MergedRecord};
use crate::types::station::StationRecord;
use crate::types::station_filter::StationFilter;
use crate::types::weather::{ExpandedWeather, TickWeather};
use chrono::NaiveDate;
use log::{info, warn};
use rusqlite::Connection;
use std::collections::HashMap;

/// How the orchestrator treats bike rows whose join keys find no partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinMode {
    /// Keep unmatched rows with absent station/weather and log a warning.
    #[default]
    Lenient,
    /// Fail with [`BikeWeatherError::UnmatchedJoinKeys`] if any station or tick key is unmatched.
    Strict,
}

/// Runs the full pipeline: three queries, weather expansion, then two left joins.
///
/// Every bike row in `range` appears exactly once in the output, in query order.
pub fn get_required_data(
    conn: &Connection,
    range: &DateRange,
    station: StationFilter,
    mode: JoinMode,
) -> Result<MergedDataset, BikeWeatherError> {
    let bikes = bike_records(conn, range, station)?;
    let stations = station_records(conn, station)?;
    let hourly = weather_observations(conn, range)?;
    let expanded = expand_weather(&hourly, range);

    let dataset = merge(bikes, &stations, &expanded, range);
    let report = &dataset.report;

    if !report.is_complete() {
        if mode == JoinMode::Strict {
            return Err(BikeWeatherError::UnmatchedJoinKeys {
                rows_without_station: report.rows_without_station,
                unmatched_stations: report.unmatched_stations.clone(),
                rows_without_tick: report.rows_without_tick,
            });
        }
        warn!(
            "{} bike rows have no station (ids {:?}), {} have no weather tick",
            report.rows_without_station, report.unmatched_stations, report.rows_without_tick
        );
    }
    info!(
        "Merged {} bike rows with {} stations and {} ticks",
        dataset.len(),
        stations.len(),
        expanded.len()
    );
    Ok(dataset)
}

/// Left-joins bikes to stations on station id, then to ticks on `(date, hour, minute)`.
///
/// Each bike is matched to the tick whose five-minute slot, counted from
/// `range.start`, holds its timestamp; `expanded` must come from the same range.
/// Duplicate station ids keep the first row so no bike row is repeated.
pub fn merge(
    bikes: Vec<BikeRecord>,
    stations: &[StationRecord],
    expanded: &[ExpandedWeather],
    range: &DateRange,
) -> MergedDataset {
    let mut station_by_id: HashMap<i64, &StationRecord> = HashMap::with_capacity(stations.len());
    for station in stations {
        if station_by_id.contains_key(&station.station_id) {
            warn!(
                "Duplicate station row for id {}, keeping the first",
                station.station_id
            );
            continue;
        }
        station_by_id.insert(station.station_id, station);
    }

    let tick_by_key: HashMap<(NaiveDate, u32, u32), &ExpandedWeather> = expanded
        .iter()
        .map(|tick| (tick.tick_key(), tick))
        .collect();

    let mut report = JoinReport::default();
    let records = bikes
        .into_iter()
        .map(|bike| {
            let station = station_by_id.get(&bike.station_id).map(|s| (*s).clone());
            if station.is_none() {
                report.rows_without_station += 1;
                report.unmatched_stations.insert(bike.station_id);
            }

            let tick = bike
                .tick_key(range)
                .and_then(|key| tick_by_key.get(&key));
            let weather = match tick {
                Some(tick) => {
                    let weather = tick.weather.as_ref().map(TickWeather::from);
                    if weather.is_none() {
                        report.rows_without_weather += 1;
                    }
                    weather
                }
                None => {
                    report.rows_without_tick += 1;
                    None
                }
            };

            MergedRecord {
                bike,
                station,
                weather,
            }
        })
        .collect();

    MergedDataset { records, report }
}
