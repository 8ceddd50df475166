use crate::db::schema::BIKES_TABLE;
use crate::queries::error::QueryError;
use crate::queries::{fetch_rows, parse_table_datetime};
use crate::types::bike::BikeRecord;
use crate::types::date_range::DateRange;
use crate::types::station_filter::StationFilter;
use log::info;
use rusqlite::{params, Connection, Row};

const SELECT_BIKES: &str = r#"
SELECT "STATION ID", DATETIME, "BIKE STANDS", "AVAILABLE BIKE STANDS", "AVAILABLE BIKES", STATUS
FROM bikes
WHERE date >= ?1 AND substr(date, 1, 10) <= ?2
"#;

const ORDER_BIKES: &str = r#"ORDER BY DATETIME, "STATION ID""#;

struct RawBikeRow {
    station_id: i64,
    datetime: String,
    bike_stands: Option<i64>,
    available_bike_stands: Option<i64>,
    available_bikes: Option<i64>,
    status: Option<String>,
}

impl RawBikeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            station_id: row.get(0)?,
            datetime: row.get(1)?,
            bike_stands: row.get(2)?,
            available_bike_stands: row.get(3)?,
            available_bikes: row.get(4)?,
            status: row.get(5)?,
        })
    }

    fn into_record(self) -> Result<BikeRecord, QueryError> {
        let datetime = parse_table_datetime(BIKES_TABLE, self.datetime)?;
        Ok(BikeRecord {
            station_id: self.station_id,
            datetime,
            date: datetime.date(),
            bike_stands: self.bike_stands,
            available_bike_stands: self.available_bike_stands,
            available_bikes: self.available_bikes,
            status: self.status,
        })
    }
}

/// Fetches bike rows with `DATETIME` inside `range` (both ends inclusive),
/// optionally restricted to one station.
///
/// Rows are selected by their `date` column over the calendar days the range
/// touches, then every `DATETIME` is parsed and the exact bounds are applied.
/// A single value not matching `YYYY-MM-DD HH:MM:SS` on those days fails the
/// whole call with [`QueryError::TimestampParse`], wherever it would sort.
pub fn bike_records(
    conn: &Connection,
    range: &DateRange,
    station: StationFilter,
) -> Result<Vec<BikeRecord>, QueryError> {
    let (start, end) = range.sql_date_bounds();
    let raw_rows = match station {
        StationFilter::All => fetch_rows(
            conn,
            BIKES_TABLE,
            &format!("{SELECT_BIKES}{ORDER_BIKES}"),
            params![start, end],
            RawBikeRow::from_row,
        )?,
        StationFilter::Station(id) => fetch_rows(
            conn,
            BIKES_TABLE,
            &format!("{SELECT_BIKES}AND \"STATION ID\" = ?3\n{ORDER_BIKES}"),
            params![start, end, id],
            RawBikeRow::from_row,
        )?,
    };

    let records = raw_rows
        .into_iter()
        .map(RawBikeRow::into_record)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|record| range.contains(&record.datetime))
        .collect::<Vec<_>>();
    info!("Fetched {} bike rows for {} in {}", records.len(), station, range);
    Ok(records)
}
