use crate::types::bike::BikeRecord;
use crate::types::station::StationRecord;
use crate::types::weather::TickWeather;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One bike row with its station metadata and tick weather attached, where found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    #[serde(flatten)]
    pub bike: BikeRecord,
    pub station: Option<StationRecord>,
    pub weather: Option<TickWeather>,
}

/// What the two left joins could not match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReport {
    /// Bike rows whose station id has no row in `stations`.
    pub rows_without_station: usize,
    /// The distinct station ids behind `rows_without_station`.
    pub unmatched_stations: BTreeSet<i64>,
    /// Bike rows whose tick is not part of the expanded series.
    pub rows_without_tick: usize,
    /// Bike rows whose tick exists but had no hourly observation.
    pub rows_without_weather: usize,
}

impl JoinReport {
    pub fn is_complete(&self) -> bool {
        self.rows_without_station == 0 && self.rows_without_tick == 0
    }
}

/// Output of the join orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedDataset {
    pub records: Vec<MergedRecord>,
    pub report: JoinReport,
}

impl MergedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
