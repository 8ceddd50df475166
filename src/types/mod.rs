pub mod bike;
pub mod date_range;
pub mod merged;
pub mod station;
pub mod station_filter;
pub mod timestamp;
pub mod traits;
pub mod weather;
