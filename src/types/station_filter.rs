use serde::{Deserialize, Serialize};
use std::fmt;

/// Legacy station id that meant "no station filter".
pub const ALL_STATIONS_SENTINEL: i64 = 777;

/// Which stations a bike or station query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StationFilter {
    /// No station filter.
    #[default]
    All,
    /// Only rows whose `STATION ID` equals the given id.
    Station(i64),
}

impl StationFilter {
    /// Maps the old sentinel-style station argument onto a filter:
    /// `777` becomes [`StationFilter::All`], anything else a single station.
    ///
    /// # Examples
    ///
    /// ```
    /// use bike_weather::StationFilter;
    ///
    /// assert_eq!(StationFilter::from_legacy(777), StationFilter::All);
    /// assert_eq!(StationFilter::from_legacy(10), StationFilter::Station(10));
    /// ```
    pub fn from_legacy(station: i64) -> Self {
        if station == ALL_STATIONS_SENTINEL {
            StationFilter::All
        } else {
            StationFilter::Station(station)
        }
    }

    pub fn station_id(&self) -> Option<i64> {
        match self {
            StationFilter::All => None,
            StationFilter::Station(id) => Some(*id),
        }
    }
}

impl From<Option<i64>> for StationFilter {
    fn from(station: Option<i64>) -> Self {
        station.map_or(StationFilter::All, StationFilter::Station)
    }
}

impl fmt::Display for StationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationFilter::All => write!(f, "all stations"),
            StationFilter::Station(id) => write!(f, "station {}", id),
        }
    }
}
