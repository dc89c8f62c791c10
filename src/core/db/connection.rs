/// Connection Management Module
///
/// Every storage call opens its own connection and the connection is closed
/// when the call returns, whatever the outcome. There is no pooling and no
/// connection state shared between calls.

use crate::core::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to a SQLite database file.
///
/// Holds only the path; connections are acquired per call through
/// [`Database::with_connection`].
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Creates a handle for the database file at `path`.
    ///
    /// Nothing is opened yet; the file is created by SQLite on first use.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Database {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection to the database file.
    ///
    /// # Returns
    ///
    /// The open connection, or `StaffError::Database` if SQLite cannot open
    /// the file (for example because its directory does not exist).
    pub fn open(&self) -> Result<Connection> {
        debug!("Opening connection to {:?}", self.path);
        let conn = Connection::open(&self.path)?;
        Ok(conn)
    }

    /// Runs `f` with a freshly opened connection.
    ///
    /// The connection is dropped, and therefore closed, before this returns,
    /// including when `f` fails. Any transaction `f` left open is rolled back
    /// by SQLite when the connection closes.
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.open()?;
        let outcome = f(&mut conn);
        drop(conn);
        debug!("Closed connection to {:?}", self.path);
        outcome
    }
}
