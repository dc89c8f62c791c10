//! Employee store
//!
//! Owns every SQL statement run against the employee table. Each operation
//! opens its own connection, and every mutating operation follows the same
//! sequence inside one transaction:
//!
//! 1. issue the write,
//! 2. re-read the affected row(s),
//! 3. show them to the [`ConfirmationGate`],
//! 4. commit on approval, roll back otherwise.
//!
//! The `try_*` methods return the error; the plain methods log it and report
//! failure (`false`, an empty list or `None`).

use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use tracing::{debug, error, info};

use crate::confirm::ConfirmationGate;
use crate::core::db::{self, Database, SchemaStatus, EMPLOYEE_TABLE};
use crate::core::{Result, StaffError};
use crate::employee::{Employee, EmployeeDraft};

const INSERT: &str = "INSERT INTO EmployeeUoB (Title, Forename, Surname, EmailAddress, Salary) \
                      VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_ALL: &str = "SELECT * FROM EmployeeUoB ORDER BY Id";
const SELECT_BY_ID: &str = "SELECT * FROM EmployeeUoB WHERE Id = ?1";
const SELECT_BY_NAME: &str = "SELECT * FROM EmployeeUoB \
                              WHERE Forename LIKE ?1 ESCAPE '\\' OR Surname LIKE ?1 ESCAPE '\\' \
                              ORDER BY Id";
const UPDATE: &str = "UPDATE EmployeeUoB \
                      SET Title = ?1, Forename = ?2, Surname = ?3, EmailAddress = ?4, Salary = ?5 \
                      WHERE Id = ?6";
const DELETE: &str = "DELETE FROM EmployeeUoB WHERE Id = ?1";
const ADJUST_PAY: &str = "UPDATE EmployeeUoB SET Salary = Salary * ?1 WHERE Id = ?2";
const ADJUST_PAY_ALL: &str = "UPDATE EmployeeUoB SET Salary = Salary * ?1";

/// Multiplier that applies a percentage change: `1 + percent / 100`.
pub fn pay_multiplier(percent: f64) -> f64 {
    1.0 + percent / 100.0
}

/// Wraps a search term in `%` after escaping LIKE wildcards in it.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Employee>> {
    Ok(conn
        .query_row(SELECT_BY_ID, params![id], Employee::from_row)
        .optional()?)
}

fn select_all(conn: &Connection) -> Result<Vec<Employee>> {
    let mut stmt = conn.prepare(SELECT_ALL)?;
    let rows = stmt
        .query_map([], Employee::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Commits `tx` if the gate approves `affected`, rolls it back otherwise.
fn settle(tx: Transaction<'_>, affected: &[Employee], gate: &mut dyn ConfirmationGate) -> Result<bool> {
    if gate.request_confirmation(affected)? {
        tx.commit()?;
        info!("Committed change affecting {} row(s)", affected.len());
        Ok(true)
    } else {
        tx.rollback()?;
        info!("Change rejected, rolled back");
        Ok(false)
    }
}

/// Data-access layer for the employee table.
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    db: Database,
}

impl EmployeeStore {
    pub fn new(db: Database) -> Self {
        EmployeeStore { db }
    }

    /// Store over the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Database::new(path))
    }

    /// Logs a failed operation and substitutes `fallback`.
    fn absorb<T>(operation: &str, outcome: Result<T>, fallback: T) -> T {
        outcome.unwrap_or_else(|e| {
            error!("{} failed: {}", operation, e);
            fallback
        })
    }

    /// Creates the employee table unless the catalog already lists it.
    pub fn create_table_if_not_exists(&self) -> Result<SchemaStatus> {
        self.db.with_connection(|conn| {
            if db::table_exists(conn, EMPLOYEE_TABLE)? {
                return Ok(SchemaStatus::AlreadyExists);
            }
            db::create_employee_table(conn)?;
            if db::table_exists(conn, EMPLOYEE_TABLE)? {
                info!("Created table {}", EMPLOYEE_TABLE);
                Ok(SchemaStatus::Created)
            } else {
                Err(StaffError::Schema(format!("Unable to create table {}", EMPLOYEE_TABLE)))
            }
        })
    }

    pub fn try_insert(&self, draft: &EmployeeDraft, gate: &mut dyn ConfirmationGate) -> Result<bool> {
        self.db.with_connection(|conn| {
            let tx = conn.transaction()?;
            debug!("Executing: {}", INSERT);
            tx.execute(INSERT, draft.to_params())?;
            let id = tx.last_insert_rowid();
            let inserted = select_by_id(&tx, id)?.ok_or(StaffError::NotFound(id))?;
            settle(tx, &[inserted], gate)
        })
    }

    /// Inserts a new employee; `true` if the gate approved and the row was committed.
    pub fn insert(&self, draft: &EmployeeDraft, gate: &mut dyn ConfirmationGate) -> bool {
        Self::absorb("Insert", self.try_insert(draft, gate), false)
    }

    pub fn try_list_all(&self) -> Result<Vec<Employee>> {
        self.db.with_connection(|conn| select_all(conn))
    }

    /// Every employee, ordered by id.
    pub fn list_all(&self) -> Vec<Employee> {
        Self::absorb("List", self.try_list_all(), Vec::new())
    }

    pub fn try_find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        self.db.with_connection(|conn| select_by_id(conn, id))
    }

    pub fn find_by_id(&self, id: i64) -> Option<Employee> {
        Self::absorb("Search by id", self.try_find_by_id(id), None)
    }

    pub fn try_find_by_name(&self, term: &str) -> Result<Vec<Employee>> {
        let pattern = like_pattern(term);
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(SELECT_BY_NAME)?;
            let rows = stmt
                .query_map(params![pattern], Employee::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            debug!("Name search {:?} matched {} row(s)", term, rows.len());
            Ok(rows)
        })
    }

    /// Employees whose forename or surname contains `term`.
    ///
    /// Matching follows SQLite `LIKE`, so ASCII letters compare case-insensitively.
    pub fn find_by_name(&self, term: &str) -> Vec<Employee> {
        Self::absorb("Search by name", self.try_find_by_name(term), Vec::new())
    }

    pub fn try_update(&self, employee: &Employee, gate: &mut dyn ConfirmationGate) -> Result<bool> {
        self.db.with_connection(|conn| {
            let tx = conn.transaction()?;
            debug!("Executing: {}", UPDATE);
            if tx.execute(UPDATE, employee.to_params())? == 0 {
                return Err(StaffError::NotFound(employee.id()));
            }
            let updated = select_by_id(&tx, employee.id())?
                .ok_or(StaffError::NotFound(employee.id()))?;
            settle(tx, &[updated], gate)
        })
    }

    /// Writes every editable field of `employee`, keyed by its id.
    pub fn update(&self, employee: &Employee, gate: &mut dyn ConfirmationGate) -> bool {
        Self::absorb("Update", self.try_update(employee, gate), false)
    }

    pub fn try_delete(&self, id: i64, gate: &mut dyn ConfirmationGate) -> Result<bool> {
        self.db.with_connection(|conn| {
            let tx = conn.transaction()?;
            let doomed = select_by_id(&tx, id)?.ok_or(StaffError::NotFound(id))?;
            debug!("Executing: {}", DELETE);
            tx.execute(DELETE, params![id])?;
            settle(tx, &[doomed], gate)
        })
    }

    /// Deletes the employee with `id`, showing the row as it was before deletion.
    pub fn delete(&self, id: i64, gate: &mut dyn ConfirmationGate) -> bool {
        Self::absorb("Delete", self.try_delete(id, gate), false)
    }

    pub fn try_adjust_pay(&self, id: i64, percent: f64, gate: &mut dyn ConfirmationGate) -> Result<bool> {
        self.db.with_connection(|conn| {
            let tx = conn.transaction()?;
            debug!("Executing: {} ({}%)", ADJUST_PAY, percent);
            if tx.execute(ADJUST_PAY, params![pay_multiplier(percent), id])? == 0 {
                return Err(StaffError::NotFound(id));
            }
            let adjusted = select_by_id(&tx, id)?.ok_or(StaffError::NotFound(id))?;
            settle(tx, &[adjusted], gate)
        })
    }

    /// Scales one employee's salary by `1 + percent / 100`.
    pub fn adjust_pay(&self, id: i64, percent: f64, gate: &mut dyn ConfirmationGate) -> bool {
        Self::absorb("Pay adjustment", self.try_adjust_pay(id, percent, gate), false)
    }

    pub fn try_adjust_pay_all(&self, percent: f64, gate: &mut dyn ConfirmationGate) -> Result<bool> {
        self.db.with_connection(|conn| {
            let tx = conn.transaction()?;
            debug!("Executing: {} ({}%)", ADJUST_PAY_ALL, percent);
            tx.execute(ADJUST_PAY_ALL, params![pay_multiplier(percent)])?;
            let adjusted = select_all(&tx)?;
            settle(tx, &adjusted, gate)
        })
    }

    /// Scales every salary by `1 + percent / 100`.
    pub fn adjust_pay_all(&self, percent: f64, gate: &mut dyn ConfirmationGate) -> bool {
        Self::absorb("General pay adjustment", self.try_adjust_pay_all(percent, gate), false)
    }
}
