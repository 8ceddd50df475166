use crate::types::timestamp::DATETIME_FORMAT;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Anything that can be resolved to a naive range boundary.
///
/// Dates resolve to midnight, so `"2021-01-02"` as an end bound is the first
/// instant of that day rather than its last.
pub trait AnyDateTime {
    fn to_naive_datetime(self) -> Option<NaiveDateTime>;
}

impl AnyDateTime for NaiveDateTime {
    fn to_naive_datetime(self) -> Option<NaiveDateTime> {
        Some(self)
    }
}

impl AnyDateTime for DateTime<Utc> {
    fn to_naive_datetime(self) -> Option<NaiveDateTime> {
        Some(self.naive_utc())
    }
}

impl AnyDateTime for NaiveDate {
    fn to_naive_datetime(self) -> Option<NaiveDateTime> {
        self.and_hms_opt(0, 0, 0)
    }
}

impl AnyDateTime for &str {
    fn to_naive_datetime(self) -> Option<NaiveDateTime> {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(self, DATETIME_FORMAT) {
            return Some(naive_dt);
        }
        if let Ok(naive_date) = NaiveDate::parse_from_str(self, "%Y-%m-%d") {
            return naive_date.to_naive_datetime();
        }
        None
    }
}

impl AnyDateTime for &String {
    fn to_naive_datetime(self) -> Option<NaiveDateTime> {
        self.as_str().to_naive_datetime()
    }
}

impl AnyDateTime for String {
    fn to_naive_datetime(self) -> Option<NaiveDateTime> {
        self.as_str().to_naive_datetime()
    }
}
