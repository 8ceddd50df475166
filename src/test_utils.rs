//! In-memory store fixtures shared by the unit tests.

use crate::db::schema::create_tables;
use crate::types::timestamp::parse_datetime;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

pub(crate) fn at(value: &str) -> NaiveDateTime {
    parse_datetime(value).expect("fixture timestamp")
}

pub(crate) fn insert_bike(conn: &Connection, station: i64, datetime: &str) -> rusqlite::Result<()> {
    let date = datetime.get(..10).unwrap_or(datetime);
    insert_bike_on(conn, station, datetime, date)
}

/// Inserts a bike row with an explicit `date` column value.
pub(crate) fn insert_bike_on(
    conn: &Connection,
    station: i64,
    datetime: &str,
    date: &str,
) -> rusqlite::Result<()> {
    conn.execute(
        r#"INSERT INTO bikes ("STATION ID", DATETIME, date, "BIKE STANDS", "AVAILABLE BIKE STANDS", "AVAILABLE BIKES", STATUS)
           VALUES (?1, ?2, ?3, 40, 15, 25, 'Open')"#,
        params![station, datetime, date],
    )?;
    Ok(())
}

pub(crate) fn insert_station(conn: &Connection, station: i64, name: &str) -> rusqlite::Result<()> {
    conn.execute(
        r#"INSERT INTO stations ("STATION ID", NAME, ADDRESS, LATITUDE, LONGITUDE)
           VALUES (?1, ?2, NULL, 53.35, -6.26)"#,
        params![station, name],
    )?;
    Ok(())
}

pub(crate) fn insert_weather(
    conn: &Connection,
    datetime: &str,
    rain: Option<f64>,
    temp: Option<f64>,
) -> rusqlite::Result<()> {
    conn.execute(
        r#"INSERT INTO weather (DATETIME, date, rain, temp, wetb, dewpt, vappr, rhum, msl, wdsp, wddir, sun)
           VALUES (?1, substr(?1, 1, 10), ?2, ?3, 4.1, 3.2, 7.7, 88, 1011.2, 9, 240, NULL)"#,
        params![datetime, rain, temp],
    )?;
    Ok(())
}

/// Inserts a weather row with an explicit `date` column value and no readings.
pub(crate) fn insert_weather_on(conn: &Connection, datetime: &str, date: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO weather (DATETIME, date) VALUES (?1, ?2)",
        params![datetime, date],
    )?;
    Ok(())
}

/// Two stations, bikes at 10, 20 and an unknown station 99, weather for 09:00 and 10:00.
pub(crate) fn seeded_db() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;

    insert_station(&conn, 20, "Quay")?;
    insert_station(&conn, 10, "Main St")?;

    for (station, datetime) in [
        (10, "2021-01-01 09:00:00"),
        (10, "2021-01-01 09:15:00"),
        (20, "2021-01-01 09:15:00"),
        (99, "2021-01-01 09:20:00"),
        (10, "2021-01-01 09:55:00"),
        (10, "2021-01-01 10:05:00"),
        (20, "2021-01-01 10:30:00"),
    ] {
        insert_bike(&conn, station, datetime)?;
    }

    insert_weather(&conn, "2021-01-01 09:00:00", Some(12.0), Some(5.0))?;
    insert_weather(&conn, "2021-01-01 10:00:00", Some(0.0), Some(6.0))?;
    Ok(conn)
}
