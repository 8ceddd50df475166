use crate::db::error::ConnectionError;
use std::path::PathBuf;

const DATA_DIR_NAME: &str = "bike_weather";
const DATABASE_FILE_NAME: &str = "bikes.db";

/// `<data dir>/bike_weather/bikes.db`, e.g. `~/.local/share/bike_weather/bikes.db` on Linux.
pub fn default_database_path() -> Result<PathBuf, ConnectionError> {
    dirs::data_dir()
        .ok_or(ConnectionError::DataDirResolution)
        .map(|p| p.join(DATA_DIR_NAME).join(DATABASE_FILE_NAME))
}
