use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Number of five-minute ticks in an hour.
pub const TICKS_PER_HOUR: u32 = 12;

/// One row of the hourly `weather` table.
///
/// `rain` is the accumulated precipitation (mm) for the hour and `sun` the
/// sunshine duration normalised to the hour; the rest are point readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub datetime: NaiveDateTime,
    pub rain: Option<f64>,
    pub temp: Option<f64>,
    pub wetb: Option<f64>,
    pub dewpt: Option<f64>,
    pub vappr: Option<f64>,
    pub rhum: Option<f64>,
    pub msl: Option<f64>,
    pub wdsp: Option<f64>,
    pub wddir: Option<f64>,
    pub sun: Option<f64>,
}

impl WeatherObservation {
    /// The `(date, hour)` this observation covers.
    pub fn hour_key(&self) -> (NaiveDate, u32) {
        (self.datetime.date(), self.datetime.hour())
    }

    /// Rain spread evenly over the twelve ticks of the hour.
    pub fn avg_rain_per_interval(&self) -> Option<f64> {
        self.rain.map(|rain| rain / f64::from(TICKS_PER_HOUR))
    }
}

/// Hourly values broadcast onto a five-minute tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub rain: Option<f64>,
    pub temp: Option<f64>,
    pub wetb: Option<f64>,
    pub dewpt: Option<f64>,
    pub vappr: Option<f64>,
    pub rhum: Option<f64>,
    pub msl: Option<f64>,
    pub wdsp: Option<f64>,
    pub wddir: Option<f64>,
    pub sun: Option<f64>,
    pub avg_rain_per_interval: Option<f64>,
}

impl From<&WeatherObservation> for WeatherReading {
    fn from(obs: &WeatherObservation) -> Self {
        Self {
            rain: obs.rain,
            temp: obs.temp,
            wetb: obs.wetb,
            dewpt: obs.dewpt,
            vappr: obs.vappr,
            rhum: obs.rhum,
            msl: obs.msl,
            wdsp: obs.wdsp,
            wddir: obs.wddir,
            sun: obs.sun,
            avg_rain_per_interval: obs.avg_rain_per_interval(),
        }
    }
}

/// One five-minute tick of the expanded weather series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedWeather {
    pub datetime: NaiveDateTime,
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    /// `None` when no hourly observation exists for this tick's hour.
    pub weather: Option<WeatherReading>,
}

impl ExpandedWeather {
    pub fn tick_key(&self) -> (NaiveDate, u32, u32) {
        (self.date, self.hour, self.minute)
    }
}

/// The weather columns carried into the merged dataset.
///
/// Hourly `rain` is left out; `avg_rain_per_interval` is its per-tick counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickWeather {
    pub temp: Option<f64>,
    pub wetb: Option<f64>,
    pub dewpt: Option<f64>,
    pub vappr: Option<f64>,
    pub rhum: Option<f64>,
    pub msl: Option<f64>,
    pub wdsp: Option<f64>,
    pub wddir: Option<f64>,
    pub sun: Option<f64>,
    pub avg_rain_per_interval: Option<f64>,
}

impl From<&WeatherReading> for TickWeather {
    fn from(reading: &WeatherReading) -> Self {
        Self {
            temp: reading.temp,
            wetb: reading.wetb,
            dewpt: reading.dewpt,
            vappr: reading.vappr,
            rhum: reading.rhum,
            msl: reading.msl,
            wdsp: reading.wdsp,
            wddir: reading.wddir,
            sun: reading.sun,
            avg_rain_per_interval: reading.avg_rain_per_interval,
        }
    }
}
