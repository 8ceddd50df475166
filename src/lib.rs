mod bike_weather;
mod db;
mod error;
mod expand;
mod frame;
mod frequency;
mod join;
mod queries;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

pub use bike_weather::*;
pub use error::BikeWeatherError;

pub use db::connection::{create_connection, BikeDb};
pub use db::error::ConnectionError;
pub use db::schema::{create_tables, BIKES_TABLE, STATIONS_TABLE, WEATHER_COLUMNS, WEATHER_TABLE};

pub use queries::bikes::bike_records;
pub use queries::error::QueryError;
pub use queries::stations::station_records;
pub use queries::weather::weather_observations;

pub use expand::{expand_weather, tick_datetimes, tick_for, TICK_MINUTES};
pub use join::{get_required_data, merge, JoinMode};

pub use frame::{expanded_to_dataframe, write_parquet};
pub use frequency::{column_frequencies, print_frequencies, ColumnFrequency, FULL_LISTING_LIMIT};

pub use types::bike::BikeRecord;
pub use types::date_range::DateRange;
pub use types::merged::{JoinReport, MergedDataset, MergedRecord};
pub use types::station::StationRecord;
pub use types::station_filter::{StationFilter, ALL_STATIONS_SENTINEL};
pub use types::timestamp::{format_datetime, parse_datetime, DATETIME_FORMAT};
pub use types::traits::any_datetime::AnyDateTime;
pub use types::weather::{
    ExpandedWeather, TickWeather, WeatherObservation, WeatherReading, TICKS_PER_HOUR,
};
pub use utils::default_database_path;
