//! Converting records to Polars frames and writing them out.

use crate::error::BikeWeatherError;
use crate::types::merged::{MergedDataset, MergedRecord};
use crate::types::weather::{ExpandedWeather, TickWeather, WeatherReading};
use log::info;
use polars::prelude::*;
use std::io::Write;
use std::path::Path;

fn weather_column<T>(
    name: &str,
    rows: &[Option<&T>],
    field: impl Fn(&T) -> Option<f64>,
) -> Column {
    Column::new(
        name.into(),
        rows.iter()
            .map(|row| row.and_then(&field))
            .collect::<Vec<Option<f64>>>(),
    )
}

fn tick_weather_columns(rows: &[Option<&TickWeather>]) -> Vec<Column> {
    vec![
        weather_column("temp", rows, |w| w.temp),
        weather_column("wetb", rows, |w| w.wetb),
        weather_column("dewpt", rows, |w| w.dewpt),
        weather_column("vappr", rows, |w| w.vappr),
        weather_column("rhum", rows, |w| w.rhum),
        weather_column("msl", rows, |w| w.msl),
        weather_column("wdsp", rows, |w| w.wdsp),
        weather_column("wddir", rows, |w| w.wddir),
        weather_column("sun", rows, |w| w.sun),
        weather_column("avg_rain_per_interval", rows, |w| w.avg_rain_per_interval),
    ]
}

impl MergedDataset {
    /// Flattens the merged records into a frame: bike columns, then station
    /// columns, then tick weather. Absent station or weather become nulls.
    pub fn to_dataframe(&self) -> Result<DataFrame, BikeWeatherError> {
        let records: &[MergedRecord] = &self.records;
        let bike_col = |name: &str, field: fn(&MergedRecord) -> Option<i64>| {
            Column::new(
                name.into(),
                records.iter().map(field).collect::<Vec<Option<i64>>>(),
            )
        };

        let mut columns = vec![
            Column::new(
                "station_id".into(),
                records.iter().map(|r| r.bike.station_id).collect::<Vec<i64>>(),
            ),
            Column::new(
                "datetime".into(),
                records.iter().map(|r| r.bike.datetime).collect::<Vec<_>>(),
            ),
            Column::new(
                "date".into(),
                records.iter().map(|r| r.bike.date).collect::<Vec<_>>(),
            ),
            bike_col("bike_stands", |r| r.bike.bike_stands),
            bike_col("available_bike_stands", |r| r.bike.available_bike_stands),
            bike_col("available_bikes", |r| r.bike.available_bikes),
            Column::new(
                "status".into(),
                records
                    .iter()
                    .map(|r| r.bike.status.clone())
                    .collect::<Vec<Option<String>>>(),
            ),
            Column::new(
                "name".into(),
                records
                    .iter()
                    .map(|r| r.station.as_ref().map(|s| s.name.clone()))
                    .collect::<Vec<Option<String>>>(),
            ),
            Column::new(
                "address".into(),
                records
                    .iter()
                    .map(|r| r.station.as_ref().and_then(|s| s.address.clone()))
                    .collect::<Vec<Option<String>>>(),
            ),
            Column::new(
                "latitude".into(),
                records
                    .iter()
                    .map(|r| r.station.as_ref().and_then(|s| s.latitude))
                    .collect::<Vec<Option<f64>>>(),
            ),
            Column::new(
                "longitude".into(),
                records
                    .iter()
                    .map(|r| r.station.as_ref().and_then(|s| s.longitude))
                    .collect::<Vec<Option<f64>>>(),
            ),
        ];

        let weather: Vec<Option<&TickWeather>> =
            records.iter().map(|r| r.weather.as_ref()).collect();
        columns.extend(tick_weather_columns(&weather));

        Ok(DataFrame::new(columns)?)
    }

    /// Writes the flattened frame to a Snappy-compressed Parquet file.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file. It is created, or truncated if it exists.
    ///
    /// # Errors
    ///
    /// * [`BikeWeatherError::DataFrame`] if the records cannot be turned into a frame.
    /// * [`BikeWeatherError::ParquetWriteIo`] if the file cannot be created.
    /// * [`BikeWeatherError::ParquetWritePolars`] if polars fails to encode the frame.
    pub fn write_parquet(&self, path: &Path) -> Result<(), BikeWeatherError> {
        let mut df = self.to_dataframe()?;
        write_parquet(&mut df, path)
    }

    /// Writes one JSON object per record, newline separated.
    pub fn write_json_lines(&self, mut writer: impl Write) -> Result<(), BikeWeatherError> {
        for record in &self.records {
            serde_json::to_writer(&mut writer, record)?;
            writeln!(writer).map_err(serde_json::Error::io)?;
        }
        Ok(())
    }
}

/// Frame of the expanded five-minute weather series, keeping hourly `rain`.
pub fn expanded_to_dataframe(expanded: &[ExpandedWeather]) -> Result<DataFrame, BikeWeatherError> {
    let readings: Vec<Option<&WeatherReading>> =
        expanded.iter().map(|tick| tick.weather.as_ref()).collect();
    let columns = vec![
        Column::new(
            "datetime".into(),
            expanded.iter().map(|t| t.datetime).collect::<Vec<_>>(),
        ),
        Column::new(
            "date".into(),
            expanded.iter().map(|t| t.date).collect::<Vec<_>>(),
        ),
        Column::new(
            "hour".into(),
            expanded.iter().map(|t| t.hour).collect::<Vec<u32>>(),
        ),
        Column::new(
            "minute".into(),
            expanded.iter().map(|t| t.minute).collect::<Vec<u32>>(),
        ),
        weather_column("rain", &readings, |w| w.rain),
        weather_column("temp", &readings, |w| w.temp),
        weather_column("wetb", &readings, |w| w.wetb),
        weather_column("dewpt", &readings, |w| w.dewpt),
        weather_column("vappr", &readings, |w| w.vappr),
        weather_column("rhum", &readings, |w| w.rhum),
        weather_column("msl", &readings, |w| w.msl),
        weather_column("wdsp", &readings, |w| w.wdsp),
        weather_column("wddir", &readings, |w| w.wddir),
        weather_column("sun", &readings, |w| w.sun),
        weather_column("avg_rain_per_interval", &readings, |w| w.avg_rain_per_interval),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Writes `df` to `path` as Parquet with Snappy compression.
///
/// # Arguments
///
/// * `df` - The frame to write. Polars may rechunk it in place, hence `&mut`.
/// * `path` - Destination file, created or truncated.
///
/// # Errors
///
/// Returns [`BikeWeatherError::ParquetWriteIo`] when the file cannot be created and
/// [`BikeWeatherError::ParquetWritePolars`] when encoding fails. Both carry `path`.
///
/// # Example
///
/// ```no_run
/// use bike_weather::{write_parquet, BikeWeatherError};
/// use polars::prelude::*;
/// use std::path::Path;
///
/// let mut df = df!("station_id" => [10i64, 20])?;
/// write_parquet(&mut df, Path::new("stations.parquet"))?;
/// # Ok::<(), BikeWeatherError>(())
/// ```
pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<(), BikeWeatherError> {
    let file = std::fs::File::create(path)
        .map_err(|e| BikeWeatherError::ParquetWriteIo(path.to_path_buf(), e))?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .finish(df)
        .map_err(|e| BikeWeatherError::ParquetWritePolars(path.to_path_buf(), e))?;
    info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
