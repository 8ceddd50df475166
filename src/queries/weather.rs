use crate::db::schema::WEATHER_TABLE;
use crate::queries::error::QueryError;
use crate::queries::{fetch_rows, parse_table_datetime};
use crate::types::date_range::DateRange;
use crate::types::weather::WeatherObservation;
use log::info;
use rusqlite::{params, Connection, Row};

const SELECT_WEATHER: &str = r#"
SELECT DATETIME, rain, temp, wetb, dewpt, vappr, rhum, msl, wdsp, wddir, sun
FROM weather
WHERE date >= ?1 AND substr(date, 1, 10) <= ?2
ORDER BY DATETIME
"#;

struct RawWeatherRow {
    datetime: String,
    values: [Option<f64>; 10],
}

impl RawWeatherRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let mut values = [None; 10];
        for (i, value) in values.iter_mut().enumerate() {
            *value = row.get(i + 1)?;
        }
        Ok(Self {
            datetime: row.get(0)?,
            values,
        })
    }

    fn into_observation(self) -> Result<WeatherObservation, QueryError> {
        let [rain, temp, wetb, dewpt, vappr, rhum, msl, wdsp, wddir, sun] = self.values;
        Ok(WeatherObservation {
            datetime: parse_table_datetime(WEATHER_TABLE, self.datetime)?,
            rain,
            temp,
            wetb,
            dewpt,
            vappr,
            rhum,
            msl,
            wdsp,
            wddir,
            sun,
        })
    }
}

/// Fetches hourly observations covering `range`.
///
/// The lower bound is pulled back to the start of its hour, so the observation
/// that covers the first tick is included even when `start` is mid-hour.
/// Rows are selected by `date` and bounded after parsing, as for bikes, so a
/// malformed `DATETIME` on a covered day is always an error.
pub fn weather_observations(
    conn: &Connection,
    range: &DateRange,
) -> Result<Vec<WeatherObservation>, QueryError> {
    let covering = range.floored_to_hour();
    let (start, end) = covering.sql_date_bounds();
    let observations = fetch_rows(
        conn,
        WEATHER_TABLE,
        SELECT_WEATHER,
        params![start, end],
        RawWeatherRow::from_row,
    )?
    .into_iter()
    .map(RawWeatherRow::into_observation)
    .collect::<Result<Vec<_>, _>>()?
    .into_iter()
    .filter(|obs| covering.contains(&obs.datetime))
    .collect::<Vec<_>>();
    info!("Fetched {} hourly weather rows in {}", observations.len(), range);
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, insert_weather, insert_weather_on, seeded_db};

    #[test]
    fn test_mid_hour_start_fetches_covering_hour() -> Result<(), Box<dyn std::error::Error>> {
        let conn = seeded_db()?;
        let range = DateRange::new(at("2021-01-01 09:15:00"), at("2021-01-01 09:45:00"));
        let rows = weather_observations(&conn, &range)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].datetime, at("2021-01-01 09:00:00"));
        assert_eq!(rows[0].rain, Some(12.0));
        assert_eq!(rows[0].temp, Some(5.0));
        Ok(())
    }

    #[test]
    fn test_nulls_stay_absent() -> Result<(), Box<dyn std::error::Error>> {
        let conn = seeded_db()?;
        let range = DateRange::new(at("2021-01-01 09:00:00"), at("2021-01-01 09:00:00"));
        let rows = weather_observations(&conn, &range)?;
        assert_eq!(rows[0].sun, None);
        Ok(())
    }

    #[test]
    fn test_bad_timestamp_is_error() -> Result<(), Box<dyn std::error::Error>> {
        let conn = seeded_db()?;
        insert_weather(&conn, "2021-01-01 11:00", Some(1.0), Some(1.0))?;
        let range = DateRange::new(at("2021-01-01 00:00:00"), at("2021-01-01 23:00:00"));
        assert!(matches!(
            weather_observations(&conn, &range),
            Err(QueryError::TimestampParse { table: "weather", .. })
        ));
        Ok(())
    }

    #[test]
    fn test_bad_timestamp_sorting_outside_range_is_error() -> Result<(), Box<dyn std::error::Error>> {
        let conn = seeded_db()?;
        insert_weather_on(&conn, "2021/01/01 11:00:00", "2021-01-01")?;
        let range = DateRange::new(at("2021-01-01 09:00:00"), at("2021-01-01 10:00:00"));
        assert!(matches!(
            weather_observations(&conn, &range),
            Err(QueryError::TimestampParse { table: "weather", ref value, .. }) if value == "2021/01/01 11:00:00"
        ));
        Ok(())
    }

    #[test]
    fn test_later_hours_of_the_day_are_bounded() -> Result<(), Box<dyn std::error::Error>> {
        let conn = seeded_db()?;
        let range = DateRange::new(at("2021-01-01 09:10:00"), at("2021-01-01 09:50:00"));
        let rows = weather_observations(&conn, &range)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].datetime, at("2021-01-01 09:00:00"));
        Ok(())
    }
}
