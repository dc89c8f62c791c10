//! Results Grid Module for staffdb
//!
//! Renders tabular results for the terminal as a boxed, column-aligned table:
//!
//! ```text
//! +----+-------+
//! | Id | Title |
//! +----+-------+
//! | 1  | Dr    |
//! +----+-------+
//! ```

use crate::employee::Employee;

/// Column headers used whenever employees are shown.
pub const EMPLOYEE_HEADERS: [&str; 6] = ["Id", "Title", "Forename", "Surname", "Email", "Salary"];

/// Represents a row of cells in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
}

/// Represents the entire grid structure.
#[derive(Debug, Clone, Default)]
pub struct ResultsGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultsGrid {
    /// Creates a new, empty ResultsGrid.
    pub fn new() -> Self {
        ResultsGrid {
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Builds a grid with the employee headers and one row per employee.
    pub fn from_employees(employees: &[Employee]) -> Self {
        let mut grid = ResultsGrid::new();
        grid.set_headers(EMPLOYEE_HEADERS.iter().map(|h| h.to_string()).collect());
        for employee in employees {
            grid.add_row(employee.to_cells());
        }
        grid
    }

    /// Sets the headers for the grid.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        self.headers = headers;
    }

    /// Adds a row to the grid. Each row is represented as a vector of strings.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(Row { cells: row });
    }

    /// Width of every column: the widest of its header and its cells.
    fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(|r| r.cells.len())
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|i| {
                let header = self.headers.get(i).map_or(0, |h| h.chars().count());
                self.rows
                    .iter()
                    .filter_map(|r| r.cells.get(i))
                    .map(|c| c.chars().count())
                    .fold(header, usize::max)
            })
            .collect()
    }

    /// Renders the grid as a boxed table. An empty grid renders as an empty string.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        if widths.is_empty() {
            return String::new();
        }

        let border: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w + 2)))
            .collect::<String>()
            + "+\n";

        let line = |cells: &[String]| -> String {
            let mut out = String::new();
            for (i, width) in widths.iter().enumerate() {
                let content = cells.get(i).map(String::as_str).unwrap_or("");
                let pad = width - content.chars().count();
                out.push_str(&format!("| {}{} ", content, " ".repeat(pad)));
            }
            out.push_str("|\n");
            out
        };

        let mut output = String::new();
        output.push_str(&border);
        if !self.headers.is_empty() {
            output.push_str(&line(&self.headers));
            output.push_str(&border);
        }
        for row in &self.rows {
            output.push_str(&line(&row.cells));
        }
        if !self.rows.is_empty() {
            output.push_str(&border);
        }
        output
    }
}
