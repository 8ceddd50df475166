use crate::db::schema::STATIONS_TABLE;
use crate::queries::error::QueryError;
use crate::queries::fetch_rows;
use crate::types::station::StationRecord;
use crate::types::station_filter::StationFilter;
use log::info;
use rusqlite::{params, Connection, Row};

const SELECT_STATIONS: &str = r#"
SELECT "STATION ID", NAME, ADDRESS, LATITUDE, LONGITUDE
FROM stations
"#;

fn station_from_row(row: &Row<'_>) -> rusqlite::Result<StationRecord> {
    Ok(StationRecord {
        station_id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        latitude: row.get(3)?,
        longitude: row.get(4)?,
    })
}

/// Fetches every station, or just the one matching the filter.
pub fn station_records(
    conn: &Connection,
    station: StationFilter,
) -> Result<Vec<StationRecord>, QueryError> {
    let records = match station {
        StationFilter::All => fetch_rows(
            conn,
            STATIONS_TABLE,
            &format!("{SELECT_STATIONS}ORDER BY \"STATION ID\""),
            params![],
            station_from_row,
        )?,
        StationFilter::Station(id) => fetch_rows(
            conn,
            STATIONS_TABLE,
            &format!("{SELECT_STATIONS}WHERE \"STATION ID\" = ?1\nORDER BY \"STATION ID\""),
            params![id],
            station_from_row,
        )?,
    };
    info!("Fetched {} station rows for {}", records.len(), station);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::seeded_db;

    #[test]
    fn test_all_stations() -> Result<(), Box<dyn std::error::Error>> {
        let conn = seeded_db()?;
        let stations = station_records(&conn, StationFilter::All)?;
        let ids: Vec<i64> = stations.iter().map(|s| s.station_id).collect();
        assert_eq!(ids, vec![10, 20]);
        Ok(())
    }

    #[test]
    fn test_single_station() -> Result<(), Box<dyn std::error::Error>> {
        let conn = seeded_db()?;
        let stations = station_records(&conn, StationFilter::Station(10))?;
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Main St");
        Ok(())
    }

    #[test]
    fn test_missing_table_is_sql_error() -> Result<(), Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let err = station_records(&conn, StationFilter::All).unwrap_err();
        assert!(matches!(err, QueryError::Sql { table: "stations", .. }));
        Ok(())
    }
}
