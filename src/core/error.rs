/// staffdb Error Module
///
/// This module defines the error type shared by the storage layer, the
/// confirmation gate, the console helpers and configuration loading.
use thiserror::Error;

/// Error type for the staffdb application.
///
/// Covers every failure the application can hit:
/// - Database operations (connection, statements, transactions)
/// - Schema creation
/// - Lookups of employees that do not exist
/// - Terminal I/O and a closed input stream
/// - Configuration loading
#[derive(Error, Debug)]
pub enum StaffError {
    /// Database-related errors from SQLite operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Terminal and file system I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema-related errors
    #[error("Schema error: {0}")]
    Schema(String),

    /// No row exists for the requested employee id
    #[error("No employee with id {0}")]
    NotFound(i64),

    /// Standard input reached end of file while a value was expected
    #[error("Input stream closed")]
    InputClosed,
}

/// Type alias for Result to use StaffError as the error type.
pub type Result<T> = std::result::Result<T, StaffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let db_err = StaffError::Database(rusqlite::Error::ExecuteReturnedResults);
        assert!(db_err.to_string().contains("Database error"));

        let not_found = StaffError::NotFound(42);
        assert_eq!(not_found.to_string(), "No employee with id 42");

        let config_err = StaffError::Config("Invalid config".to_string());
        assert!(config_err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let staff_err: StaffError = io_err.into();
        match staff_err {
            StaffError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }

        let sql_err: StaffError = rusqlite::Error::QueryReturnedNoRows.into();
        match sql_err {
            StaffError::Database(_) => {}
            _ => panic!("Expected Database error"),
        }
    }
}
