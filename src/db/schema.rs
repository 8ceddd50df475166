//! Layout of the three source tables.

use rusqlite::Connection;

pub const BIKES_TABLE: &str = "bikes";
pub const STATIONS_TABLE: &str = "stations";
pub const WEATHER_TABLE: &str = "weather";

/// Weather value columns, in table order.
pub const WEATHER_COLUMNS: [&str; 10] = [
    "rain", "temp", "wetb", "dewpt", "vappr", "rhum", "msl", "wdsp", "wddir", "sun",
];

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS bikes (
    "STATION ID" INTEGER NOT NULL,
    DATETIME TEXT NOT NULL,
    date TEXT,
    "BIKE STANDS" INTEGER,
    "AVAILABLE BIKE STANDS" INTEGER,
    "AVAILABLE BIKES" INTEGER,
    STATUS TEXT
);
CREATE TABLE IF NOT EXISTS stations (
    "STATION ID" INTEGER NOT NULL,
    NAME TEXT NOT NULL,
    ADDRESS TEXT,
    LATITUDE REAL,
    LONGITUDE REAL
);
CREATE TABLE IF NOT EXISTS weather (
    DATETIME TEXT NOT NULL,
    date TEXT,
    rain REAL,
    temp REAL,
    wetb REAL,
    dewpt REAL,
    vappr REAL,
    rhum REAL,
    msl REAL,
    wdsp REAL,
    wddir REAL,
    sun REAL
);
"#;

/// Creates the `bikes`, `stations` and `weather` tables if they don't exist.
pub fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TABLES)
}
