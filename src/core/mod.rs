/// Core Module for staffdb
///
/// Shared infrastructure: the error type and the SQLite connection and
/// schema helpers used by the employee store.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, StaffError};
