use crate::db::error::ConnectionError;
use crate::queries::error::QueryError;
use polars::error::PolarsError;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BikeWeatherError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Could not interpret {0} as a date or `YYYY-MM-DD HH:MM:SS` timestamp")]
    DateParsingError(String),

    #[error("Join left {rows_without_station} bike rows without a station (ids {unmatched_stations:?}) and {rows_without_tick} without a weather tick")]
    UnmatchedJoinKeys {
        rows_without_station: usize,
        unmatched_stations: BTreeSet<i64>,
        rows_without_tick: usize,
    },

    #[error("Failed building DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("I/O error writing parquet file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing parquet file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed serializing records to JSON")]
    JsonWrite(#[from] serde_json::Error),
}
