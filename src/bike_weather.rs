//! The main entry point: a client owning the store connection and exposing
//! the query, expansion and join pipeline through builders.

use crate::db::connection::BikeDb;
use crate::error::BikeWeatherError;
use crate::expand::expand_weather;
use crate::join::{get_required_data, JoinMode};
use crate::queries::bikes::bike_records;
use crate::queries::stations::station_records;
use crate::queries::weather::weather_observations;
use crate::types::bike::BikeRecord;
use crate::types::date_range::DateRange;
use crate::types::merged::MergedDataset;
use crate::types::station::StationRecord;
use crate::types::station_filter::StationFilter;
use crate::types::traits::any_datetime::AnyDateTime;
use crate::types::weather::{ExpandedWeather, WeatherObservation};
use crate::utils::default_database_path;
use bon::bon;
use rusqlite::Connection;
use std::fmt;
use std::path::Path;

/// Client over a bike/weather SQLite store.
///
/// The connection is opened once, borrowed by every query, and released when
/// the client is dropped or [`BikeWeather::close`] is called.
///
/// # Examples
///
/// ```no_run
/// # use bike_weather::{BikeWeather, BikeWeatherError};
/// # fn main() -> Result<(), BikeWeatherError> {
/// let client = BikeWeather::open("data/dublin.db")?;
/// let merged = client
///     .required_data()
///     .start("2021-01-01")
///     .end("2021-01-07 23:55:00")
///     .station(10)
///     .call()?;
/// println!("{} rows", merged.len());
/// # Ok(())
/// # }
/// ```
pub struct BikeWeather {
    db: BikeDb,
}

#[bon]
impl BikeWeather {
    /// Opens the store at `path`. The file must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`BikeWeatherError::Connection`] if the database cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BikeWeatherError> {
        Ok(Self {
            db: BikeDb::open(path)?,
        })
    }

    /// Opens the store at the default location, `<data dir>/bike_weather/bikes.db`.
    ///
    /// # Errors
    ///
    /// Returns [`BikeWeatherError::Connection`] if the platform data directory
    /// cannot be determined or the file there cannot be opened.
    pub fn new() -> Result<Self, BikeWeatherError> {
        let path = default_database_path()?;
        Self::open(path)
    }

    /// Builds a client over a connection opened elsewhere.
    ///
    /// # Example
    ///
    /// ```
    /// use bike_weather::{create_tables, BikeWeather};
    /// use rusqlite::Connection;
    ///
    /// let conn = Connection::open_in_memory()?;
    /// create_tables(&conn)?;
    /// let client = BikeWeather::from_connection(conn);
    /// assert!(client.stations(None)?.is_empty());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            db: BikeDb::from_connection(conn),
        }
    }

    /// The connection every query of this client runs on.
    pub fn connection(&self) -> &Connection {
        self.db.connection()
    }

    /// Releases the connection.
    ///
    /// # Errors
    ///
    /// Returns [`BikeWeatherError::Connection`] if SQLite reports a failure on close.
    pub fn close(self) -> Result<(), BikeWeatherError> {
        Ok(self.db.close()?)
    }

    /// Builds the merged bike/station/weather dataset for a range.
    ///
    /// # Arguments
    ///
    /// * `.start(..)` / `.end(..)`: **Required.** Inclusive bounds, any [`AnyDateTime`]:
    ///   `NaiveDateTime`, `NaiveDate` (midnight), `DateTime<Utc>`, or a string formatted
    ///   `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DD`.
    /// * `.station(i64)`: Optional. Restrict to one station; all stations when omitted.
    /// * `.strict(bool)`: Optional. Fail on unmatched join keys instead of logging them.
    ///   Defaults to `false`.
    ///
    /// # Errors
    ///
    /// * [`BikeWeatherError::DateParsingError`] if a bound cannot be parsed.
    /// * [`BikeWeatherError::Query`] if a query fails or a stored timestamp is malformed.
    /// * [`BikeWeatherError::UnmatchedJoinKeys`] in strict mode.
    #[builder]
    pub fn required_data(
        &self,
        start: impl AnyDateTime + fmt::Debug + Clone,
        end: impl AnyDateTime + fmt::Debug + Clone,
        station: Option<i64>,
        strict: Option<bool>,
    ) -> Result<MergedDataset, BikeWeatherError> {
        let range = DateRange::resolve(start, end)?;
        let mode = if strict.unwrap_or(false) {
            JoinMode::Strict
        } else {
            JoinMode::Lenient
        };
        get_required_data(
            self.connection(),
            &range,
            StationFilter::from(station),
            mode,
        )
    }

    /// Bike rows for an inclusive range, optionally for one station.
    ///
    /// Takes the same `.start(..)`, `.end(..)` and `.station(..)` arguments as
    /// [`BikeWeather::required_data`].
    ///
    /// # Errors
    ///
    /// [`BikeWeatherError::DateParsingError`] for an unparseable bound,
    /// [`BikeWeatherError::Query`] for SQL failures and malformed stored timestamps.
    #[builder]
    pub fn bikes(
        &self,
        start: impl AnyDateTime + fmt::Debug + Clone,
        end: impl AnyDateTime + fmt::Debug + Clone,
        station: Option<i64>,
    ) -> Result<Vec<BikeRecord>, BikeWeatherError> {
        let range = DateRange::resolve(start, end)?;
        Ok(bike_records(
            self.connection(),
            &range,
            StationFilter::from(station),
        )?)
    }

    /// Station metadata; every station when `station` is `None`.
    pub fn stations(&self, station: Option<i64>) -> Result<Vec<StationRecord>, BikeWeatherError> {
        Ok(station_records(
            self.connection(),
            StationFilter::from(station),
        )?)
    }

    /// Hourly observations covering an inclusive range.
    #[builder]
    pub fn weather(
        &self,
        start: impl AnyDateTime + fmt::Debug + Clone,
        end: impl AnyDateTime + fmt::Debug + Clone,
    ) -> Result<Vec<WeatherObservation>, BikeWeatherError> {
        let range = DateRange::resolve(start, end)?;
        Ok(weather_observations(self.connection(), &range)?)
    }

    /// The five-minute weather series for an inclusive range.
    #[builder]
    pub fn expanded_weather(
        &self,
        start: impl AnyDateTime + fmt::Debug + Clone,
        end: impl AnyDateTime + fmt::Debug + Clone,
    ) -> Result<Vec<ExpandedWeather>, BikeWeatherError> {
        let range = DateRange::resolve(start, end)?;
        let hourly = weather_observations(self.connection(), &range)?;
        Ok(expand_weather(&hourly, &range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::test_utils::{at, insert_bike, insert_station, insert_weather, seeded_db};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_required_data_builder() -> Result<(), Box<dyn std::error::Error>> {
        let client = BikeWeather::from_connection(seeded_db()?);
        let merged = client
            .required_data()
            .start("2021-01-01 09:00:00")
            .end("2021-01-01 10:55:00")
            .station(10)
            .strict(true)
            .call()?;
        assert_eq!(merged.len(), 4);
        assert!(merged
            .records
            .iter()
            .all(|r| r.station.as_ref().map(|s| s.name.as_str()) == Some("Main St")));
        Ok(())
    }

    #[test]
    fn test_builder_accepts_chrono_bounds() -> Result<(), Box<dyn std::error::Error>> {
        let client = BikeWeather::from_connection(seeded_db()?);
        let merged = client
            .required_data()
            .start(at("2021-01-01 09:00:00"))
            .end(at("2021-01-01 09:55:00"))
            .station(10)
            .call()?;
        assert_eq!(merged.len(), 3);

        let day = NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("bad date")?;
        let bikes = client
            .bikes()
            .start(day)
            .end("2021-01-01 23:55:00")
            .call()?;
        assert_eq!(bikes.len(), 7);
        Ok(())
    }

    #[test]
    fn test_bad_bound_is_date_parsing_error() -> Result<(), Box<dyn std::error::Error>> {
        let client = BikeWeather::from_connection(seeded_db()?);
        let err = client
            .required_data()
            .start("01/01/2021")
            .end("2021-01-02")
            .call()
            .unwrap_err();
        assert!(matches!(err, BikeWeatherError::DateParsingError(_)));
        Ok(())
    }

    #[test]
    fn test_expanded_weather_builder() -> Result<(), Box<dyn std::error::Error>> {
        let client = BikeWeather::from_connection(seeded_db()?);
        let ticks = client
            .expanded_weather()
            .start("2021-01-01 09:00:00")
            .end("2021-01-01 09:55:00")
            .call()?;
        assert_eq!(ticks.len(), 12);
        assert!(ticks.iter().all(|t| t
            .weather
            .as_ref()
            .and_then(|w| w.avg_rain_per_interval)
            == Some(1.0)));
        Ok(())
    }

    #[test]
    fn test_file_backed_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("bikes.db");
        {
            let conn = Connection::open(&path)?;
            create_tables(&conn)?;
            insert_station(&conn, 10, "Main St")?;
            insert_bike(&conn, 10, "2021-01-01 09:15:00")?;
            insert_weather(&conn, "2021-01-01 09:00:00", Some(12.0), Some(5.0))?;
        }

        let client = BikeWeather::open(&path)?;
        let merged = client
            .required_data()
            .start("2021-01-01")
            .end("2021-01-01 23:55:00")
            .call()?;
        assert_eq!(merged.len(), 1);
        let row = &merged.records[0];
        assert_eq!(row.station.as_ref().map(|s| s.name.as_str()), Some("Main St"));
        assert_eq!(row.weather.as_ref().and_then(|w| w.avg_rain_per_interval), Some(1.0));

        assert_eq!(client.stations(None)?.len(), 1);
        assert_eq!(client.bikes().start("2021-01-01").end("2021-01-02").call()?.len(), 1);
        assert_eq!(client.weather().start("2021-01-01").end("2021-01-02").call()?.len(), 1);
        client.close()?;
        Ok(())
    }

    #[test]
    fn test_open_missing_database() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let result = BikeWeather::open(dir.path().join("missing.db"));
        assert!(matches!(result, Err(BikeWeatherError::Connection(_))));
        Ok(())
    }
}
