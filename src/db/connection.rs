//! Opening and releasing the handle to the bike/weather SQLite store.

use crate::db::error::ConnectionError;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// An open handle to the store.
///
/// The handle is released when dropped; [`BikeDb::close`] does the same but
/// reports a failing close instead of swallowing it.
#[derive(Debug)]
pub struct BikeDb {
    conn: Connection,
    path: Option<PathBuf>,
}

impl BikeDb {
    /// Opens an existing database read-only.
    ///
    /// Unlike a plain `Connection::open`, a missing file is an error rather
    /// than a fresh empty database.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the SQLite file holding the `bikes`, `stations` and `weather` tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Open`] carrying `path` when SQLite cannot open the file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bike_weather::BikeDb;
    ///
    /// let db = BikeDb::open("data/dublin.db")?;
    /// assert!(db.path().is_some());
    /// db.close()?;
    /// # Ok::<(), bike_weather::ConnectionError>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConnectionError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| ConnectionError::Open(path.to_path_buf(), e))?;
        info!("Opened database {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Wraps a connection opened elsewhere, e.g. an in-memory database.
    ///
    /// The connection is used as is: it may be writable and nothing checks
    /// that the tables exist. [`BikeDb::path`] returns `None` for such a handle.
    ///
    /// # Example
    ///
    /// ```
    /// use bike_weather::BikeDb;
    /// use rusqlite::Connection;
    ///
    /// let db = BikeDb::from_connection(Connection::open_in_memory()?);
    /// assert!(db.path().is_none());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn, path: None }
    }

    /// Borrows the underlying connection for running queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The file this handle was opened from.
    ///
    /// # Returns
    ///
    /// `Some(path)` for handles made by [`BikeDb::open`], `None` for wrapped connections.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Closes the connection, consuming the handle.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Close`] if SQLite refuses to close, e.g. while a
    /// statement is still being finalized. The connection is released either way.
    pub fn close(self) -> Result<(), ConnectionError> {
        self.conn
            .close()
            .map_err(|(_conn, e)| ConnectionError::Close(e))
    }
}

/// Opens the database at `path`, logging and returning `None` on failure.
///
/// Prefer [`BikeDb::open`] when the caller wants the error itself.
///
/// # Arguments
///
/// * `path` - Location of an existing SQLite file.
///
/// # Returns
///
/// `Some(BikeDb)` on success. On failure the error and its SQLite cause are
/// logged at `error` level and `None` is returned.
///
/// # Example
///
/// ```no_run
/// use bike_weather::create_connection;
///
/// match create_connection("data/dublin.db") {
///     Some(db) => println!("opened {:?}", db.path()),
///     None => eprintln!("no database, see the log"),
/// }
/// ```
pub fn create_connection(path: impl AsRef<Path>) -> Option<BikeDb> {
    match BikeDb::open(path) {
        Ok(db) => Some(db),
        Err(e) => {
            error!("{}: {}", e, source_description(&e));
            None
        }
    }
}

fn source_description(e: &ConnectionError) -> String {
    std::error::Error::source(e)
        .map(|source| source.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use tempfile::TempDir;

    #[test]
    fn test_create_connection_missing_file_is_none() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let missing = dir.path().join("nope.db");
        assert!(create_connection(&missing).is_none());
        assert!(!missing.exists(), "opening must not create the file");
        Ok(())
    }

    #[test]
    fn test_open_existing_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("bikes.db");
        {
            let conn = Connection::open(&path)?;
            create_tables(&conn)?;
        }
        let db = create_connection(&path).ok_or("expected a connection")?;
        assert_eq!(db.path(), Some(path.as_path()));
        let count: i64 =
            db.connection()
                .query_row("SELECT COUNT(*) FROM bikes", [], |row| row.get(0))?;
        assert_eq!(count, 0);
        db.close()?;
        Ok(())
    }

    #[test]
    fn test_open_reports_path() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let missing = dir.path().join("missing.db");
        let err = BikeDb::open(&missing).unwrap_err();
        assert!(matches!(err, ConnectionError::Open(ref p, _) if p == &missing));
        Ok(())
    }
}
