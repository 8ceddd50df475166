use crate::types::traits::any_datetime::AnyDateTime;
use crate::types::timestamp::format_datetime;
use crate::BikeWeatherError;
use chrono::{Duration, NaiveDateTime, Timelike};
use std::fmt;

/// An inclusive `[start, end]` range of naive timestamps.
///
/// Every query and the weather expansion use the same resolved bounds, so a
/// bike row exactly at `end` is always covered by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Resolves both bounds, failing with [`BikeWeatherError::DateParsingError`]
    /// when either one cannot be interpreted.
    ///
    /// # Examples
    ///
    /// ```
    /// use bike_weather::DateRange;
    ///
    /// let range = DateRange::resolve("2021-01-01 09:00:00", "2021-01-01").unwrap();
    /// assert!(range.is_empty());
    /// ```
    pub fn resolve(
        start: impl AnyDateTime + fmt::Debug + Clone,
        end: impl AnyDateTime + fmt::Debug + Clone,
    ) -> Result<Self, BikeWeatherError> {
        let start_naive = start
            .clone()
            .to_naive_datetime()
            .ok_or_else(|| BikeWeatherError::DateParsingError(format!("{:?}", start)))?;
        let end_naive = end
            .clone()
            .to_naive_datetime()
            .ok_or_else(|| BikeWeatherError::DateParsingError(format!("{:?}", end)))?;
        Ok(Self::new(start_naive, end_naive))
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, datetime: &NaiveDateTime) -> bool {
        *datetime >= self.start && *datetime <= self.end
    }

    /// The range widened down to the start of the hour containing `start`.
    pub(crate) fn floored_to_hour(&self) -> Self {
        let minutes = i64::from(self.start.minute());
        let seconds = i64::from(self.start.second());
        let start = self.start
            - Duration::minutes(minutes)
            - Duration::seconds(seconds)
            - Duration::nanoseconds(i64::from(self.start.nanosecond()));
        Self::new(start, self.end)
    }

    /// Calendar dates of `start` and `end` as `YYYY-MM-DD`, for filtering the `date` column.
    pub(crate) fn sql_date_bounds(&self) -> (String, String) {
        (
            self.start.date().format("%Y-%m-%d").to_string(),
            self.end.date().format("%Y-%m-%d").to_string(),
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ..= {}",
            format_datetime(&self.start),
            format_datetime(&self.end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_resolve_mixed_inputs() -> Result<(), Box<dyn std::error::Error>> {
        let range = DateRange::resolve("2021-01-01", at(10, 0, 0))?;
        assert_eq!(range.start, at(0, 0, 0));
        assert_eq!(range.end, at(10, 0, 0));
        Ok(())
    }

    #[test]
    fn test_resolve_rejects_bad_bound() {
        let err = DateRange::resolve("2021-01-01", "yesterday").unwrap_err();
        assert!(matches!(err, BikeWeatherError::DateParsingError(ref s) if s.contains("yesterday")));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(at(9, 0, 0), at(9, 15, 0));
        assert!(range.contains(&at(9, 0, 0)));
        assert!(range.contains(&at(9, 15, 0)));
        assert!(!range.contains(&at(9, 15, 1)));
    }

    #[test]
    fn test_sql_date_bounds() {
        let range = DateRange::new(at(9, 17, 0), at(23, 55, 0));
        assert_eq!(
            range.sql_date_bounds(),
            ("2021-01-01".to_string(), "2021-01-01".to_string())
        );
    }

    #[test]
    fn test_floored_to_hour() {
        let range = DateRange::new(at(9, 17, 42), at(11, 0, 0)).floored_to_hour();
        assert_eq!(range.start, at(9, 0, 0));
        assert_eq!(range.end, at(11, 0, 0));
    }
}
