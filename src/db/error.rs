use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Failed to open database '{0}'")]
    Open(PathBuf, #[source] rusqlite::Error),

    #[error("Failed to close database connection")]
    Close(#[source] rusqlite::Error),

    #[error("Failed to determine data directory")]
    DataDirResolution,
}
