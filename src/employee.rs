//! Employee record
//!
//! One row of the employee table, plus the id-less draft built from user input.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::Row;
use std::fmt;

use crate::results_grid::ResultsGrid;

/// Display names of the user-editable fields, in column order.
pub const EDITABLE_FIELDS: [&str; 5] = ["Title", "Forename", "Surname", "Email", "Salary"];

/// A stored employee. `id` is assigned by SQLite and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    id: i64,
    pub title: String,
    pub forename: String,
    pub surname: String,
    pub email: String,
    pub salary: f64,
}

/// Data for creating a new employee
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeDraft {
    pub title: String,
    pub forename: String,
    pub surname: String,
    pub email: String,
    pub salary: f64,
}

/// Salary as found in the untyped `Salary` column.
///
/// Rows written by earlier versions of the tool hold the salary as TEXT
/// (e.g. `'30000'`), so numeric text is accepted alongside INTEGER and REAL.
struct StoredSalary(f64);

impl FromSql for StoredSalary {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(i) => Ok(StoredSalary(i as f64)),
            ValueRef::Real(f) => Ok(StoredSalary(f)),
            ValueRef::Text(t) => std::str::from_utf8(t)
                .ok()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|f| f.is_finite())
                .map(StoredSalary)
                .ok_or_else(|| {
                    FromSqlError::Other(
                        format!("salary {:?} is not a number", String::from_utf8_lossy(t)).into(),
                    )
                }),
            other => Err(FromSqlError::Other(
                format!("salary of type {} is not a number", other.data_type()).into(),
            )),
        }
    }
}

impl EmployeeDraft {
    pub fn new(
        title: impl Into<String>,
        forename: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            title: title.into(),
            forename: forename.into(),
            surname: surname.into(),
            email: email.into(),
            salary,
        }
    }

    /// Insert parameters: `(Title, Forename, Surname, EmailAddress, Salary)`
    pub fn to_params(&self) -> (&str, &str, &str, &str, f64) {
        (
            &self.title,
            &self.forename,
            &self.surname,
            &self.email,
            self.salary,
        )
    }
}

impl Employee {
    /// Create an Employee from a database row
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("Id")?,
            title: row.get("Title")?,
            forename: row.get("Forename")?,
            surname: row.get("Surname")?,
            email: row.get("EmailAddress")?,
            salary: row.get::<_, StoredSalary>("Salary")?.0,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Update parameters: the editable fields followed by the id key.
    pub fn to_params(&self) -> (&str, &str, &str, &str, f64, i64) {
        (
            &self.title,
            &self.forename,
            &self.surname,
            &self.email,
            self.salary,
            self.id,
        )
    }

    /// Display strings in grid column order.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.forename.clone(),
            self.surname.clone(),
            self.email.clone(),
            format!("{:.2}", self.salary),
        ]
    }

    /// Current display value of an editable field, by its index in [`EDITABLE_FIELDS`].
    pub fn field_value(&self, index: usize) -> String {
        match index {
            0 => self.title.clone(),
            1 => self.forename.clone(),
            2 => self.surname.clone(),
            3 => self.email.clone(),
            _ => format!("{:.2}", self.salary),
        }
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ResultsGrid::from_employees(std::slice::from_ref(self)).render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn stored(conn: &Connection) -> Employee {
        conn.query_row("SELECT * FROM EmployeeUoB WHERE Id = 1", [], Employee::from_row)
            .unwrap()
    }

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE EmployeeUoB (Id INTEGER PRIMARY KEY AUTOINCREMENT, Title, Forename, Surname, EmailAddress, Salary);
             INSERT INTO EmployeeUoB (Title, Forename, Surname, EmailAddress, Salary)
             VALUES ('Dr', 'Ali', 'Khan', 'ali@example.com', 42000.5);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_from_row() {
        let conn = setup();
        let e = stored(&conn);
        assert_eq!(e.id(), 1);
        assert_eq!(e.title, "Dr");
        assert_eq!(e.forename, "Ali");
        assert_eq!(e.surname, "Khan");
        assert_eq!(e.email, "ali@example.com");
        assert_eq!(e.salary, 42000.5);
    }

    #[test]
    fn test_integer_salary_reads_as_float() {
        let conn = setup();
        conn.execute("UPDATE EmployeeUoB SET Salary = 30000", []).unwrap();
        assert_eq!(stored(&conn).salary, 30000.0);
    }

    #[test]
    fn test_text_salary_reads_as_float() {
        let conn = setup();
        conn.execute("UPDATE EmployeeUoB SET Salary = ' 30000 '", []).unwrap();
        assert_eq!(stored(&conn).salary, 30000.0);
    }

    #[test]
    fn test_unparseable_salary_is_a_conversion_failure() {
        let conn = setup();
        for bad in ["'lots'", "NULL", "X'01'"] {
            conn.execute(&format!("UPDATE EmployeeUoB SET Salary = {}", bad), [])
                .unwrap();
            let err = conn
                .query_row("SELECT * FROM EmployeeUoB WHERE Id = 1", [], Employee::from_row)
                .unwrap_err();
            assert!(
                matches!(err, rusqlite::Error::FromSqlConversionFailure(5, _, _)),
                "unexpected error for {}: {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_update_params_end_with_id() {
        let conn = setup();
        let e = stored(&conn);
        let (_, forename, _, _, salary, id) = e.to_params();
        assert_eq!(forename, "Ali");
        assert_eq!(salary, 42000.5);
        assert_eq!(id, 1);
    }

    #[test]
    fn test_cells_and_field_values() {
        let conn = setup();
        let e = stored(&conn);
        assert_eq!(
            e.to_cells(),
            vec!["1", "Dr", "Ali", "Khan", "ali@example.com", "42000.50"]
        );
        assert_eq!(e.field_value(3), "ali@example.com");
        assert_eq!(e.field_value(4), "42000.50");
    }

    #[test]
    fn test_display_renders_a_grid() {
        let conn = setup();
        let rendered = stored(&conn).to_string();
        assert!(rendered.contains("| Forename |"));
        assert!(rendered.contains("| Ali      |"));
    }
}
