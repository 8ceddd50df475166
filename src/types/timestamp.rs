//! Textual timestamp format shared by the `bikes` and `weather` tables.

use chrono::{NaiveDateTime, ParseError};

/// Format of every `DATETIME` value in the store.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a `DATETIME` value. Anything not matching [`DATETIME_FORMAT`] exactly is an error.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
}

pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}
