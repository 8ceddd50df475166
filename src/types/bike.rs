use crate::expand::tick_for;
use crate::types::date_range::DateRange;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// One row of the `bikes` table: a station's bike availability at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeRecord {
    pub station_id: i64,
    pub datetime: NaiveDateTime,
    /// Calendar date derived from `datetime`.
    pub date: NaiveDate,
    pub bike_stands: Option<i64>,
    pub available_bike_stands: Option<i64>,
    pub available_bikes: Option<i64>,
    pub status: Option<String>,
}

impl BikeRecord {
    /// The `(date, hour, minute)` key of the tick of `range` this record falls in,
    /// or `None` when the record lies outside the range.
    pub fn tick_key(&self, range: &DateRange) -> Option<(NaiveDate, u32, u32)> {
        tick_for(range, &self.datetime).map(|tick| (tick.date(), tick.hour(), tick.minute()))
    }
}
