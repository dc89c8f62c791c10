/// Schema Module
///
/// Catalog lookup and creation of the single employee table.

use crate::core::Result;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Name of the employee table
pub const EMPLOYEE_TABLE: &str = "EmployeeUoB";

/// DDL for the employee table. Only `Id` is typed, which keeps the file
/// compatible with databases created by earlier versions of the tool.
pub const CREATE_EMPLOYEE_TABLE: &str = "CREATE TABLE EmployeeUoB (\
    Id INTEGER PRIMARY KEY AUTOINCREMENT, \
    Title, Forename, Surname, EmailAddress, Salary)";

const TABLE_EXISTS: &str = "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1";

/// Outcome of [`crate::records::EmployeeStore::create_table_if_not_exists`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// The table was missing and has been created
    Created,
    /// The table was already present; nothing was changed
    AlreadyExists,
}

/// Checks the SQLite catalog for a table called `name`.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(TABLE_EXISTS, params![name], |row| row.get(0))
        .optional()?;
    debug!("Catalog lookup for {}: {}", name, found.is_some());
    Ok(found.is_some())
}

/// Creates the employee table. Fails if it already exists.
pub fn create_employee_table(conn: &Connection) -> Result<()> {
    debug!("Executing: {}", CREATE_EMPLOYEE_TABLE);
    conn.execute(CREATE_EMPLOYEE_TABLE, [])?;
    Ok(())
}
