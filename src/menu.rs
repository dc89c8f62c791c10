use std::io::{BufRead, Write};

use tracing::{debug, error};

use crate::confirm::ConsoleConfirmation;
use crate::console::Console;
use crate::core::db::{SchemaStatus, EMPLOYEE_TABLE};
use crate::core::{Result, StaffError};
use crate::employee::Employee;
use crate::records::EmployeeStore;
use crate::results_grid::ResultsGrid;

/// Smallest accepted pay adjustment, in percent.
pub const MIN_PAY_ADJUSTMENT: f64 = -99.0;

/// Printed when stored rows cannot be read back.
pub const UNREADABLE_RECORDS: &str = "Unable to read employee records";

/// Represents a parsed menu selection.
#[derive(Debug, PartialEq)]
pub enum MenuChoice {
    CreateTable,
    Insert,
    ListAll,
    Search,
    Update,
    Delete,
    AdjustPay,
    AdjustPayAll,
    Exit,
    /// An integer outside 1-9
    OutOfRange(i64),
    /// Not an integer at all
    Invalid(String),
}

/// Parses a line of user input into a `MenuChoice`.
pub fn parse_choice(input: &str) -> MenuChoice {
    let input = input.trim();
    match input.parse::<i64>() {
        Ok(1) => MenuChoice::CreateTable,
        Ok(2) => MenuChoice::Insert,
        Ok(3) => MenuChoice::ListAll,
        Ok(4) => MenuChoice::Search,
        Ok(5) => MenuChoice::Update,
        Ok(6) => MenuChoice::Delete,
        Ok(7) => MenuChoice::AdjustPay,
        Ok(8) => MenuChoice::AdjustPayAll,
        Ok(9) => MenuChoice::Exit,
        Ok(n) => MenuChoice::OutOfRange(n),
        Err(_) => MenuChoice::Invalid(input.to_string()),
    }
}

/// The menu text, one entry per line.
pub fn menu_text() -> String {
    format!(
        "\n Menu:\n\
         **********\n \
         1. Create table {t}\n \
         2. Insert data into {t}\n \
         3. Select all data from {t}\n \
         4. Search for an employee\n \
         5. Update a record\n \
         6. Delete a record\n \
         7. Adjust an employee's pay\n \
         8. Adjust all employees' pay\n \
         9. Exit\n",
        t = EMPLOYEE_TABLE
    )
}

/// Interactive menu over a store and a console.
pub struct Menu<R, W> {
    store: EmployeeStore,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: EmployeeStore, console: Console<R, W>) -> Self {
        Menu { store, console }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Runs until the user picks Exit or the input is exhausted.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.console.say(menu_text())?;
            let line = match self.console.read_line("Enter your choice: ") {
                Ok(line) => line,
                Err(StaffError::InputClosed) => return Ok(()),
                Err(e) => return Err(e),
            };

            let choice = parse_choice(&line);
            debug!("Menu choice: {:?}", choice);
            if choice == MenuChoice::Exit {
                return Ok(());
            }
            match self.dispatch(choice) {
                Ok(()) => {}
                Err(StaffError::InputClosed) => return Ok(()),
                Err(StaffError::Io(e)) => return Err(StaffError::Io(e)),
                Err(e) => {
                    error!("Menu action failed: {}", e);
                    self.console.say(format!("Error: {}", e))?;
                }
            }
        }
    }

    /// Performs one menu action.
    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::CreateTable => self.create_table(),
            MenuChoice::Insert => self.insert(),
            MenuChoice::ListAll => match self.store.try_list_all() {
                Ok(employees) => self.show(&employees),
                Err(e) => self.read_failed("List", e),
            },
            MenuChoice::Search => self.search(),
            MenuChoice::Update => self.update(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::AdjustPay => self.adjust_pay(),
            MenuChoice::AdjustPayAll => self.adjust_pay_all(),
            MenuChoice::Exit => Ok(()),
            MenuChoice::OutOfRange(_) => self.console.say("Invalid Choice"),
            MenuChoice::Invalid(_) => self.console.say("Invalid input"),
        }
    }

    fn show(&mut self, employees: &[Employee]) -> Result<()> {
        self.console
            .say(ResultsGrid::from_employees(employees).render().trim_end())
    }

    /// Reports a read that failed, so it is not mistaken for an empty result.
    fn read_failed(&mut self, operation: &str, e: StaffError) -> Result<()> {
        error!("{} failed: {}", operation, e);
        self.console.say(UNREADABLE_RECORDS)
    }

    fn report(&mut self, ok: bool, success: &str, failure: &str) -> Result<()> {
        self.console.say(if ok { success } else { failure })
    }

    fn create_table(&mut self) -> Result<()> {
        let message = match self.store.create_table_if_not_exists() {
            Ok(SchemaStatus::Created) => {
                format!("Table <<{}>> created successfully", EMPLOYEE_TABLE)
            }
            Ok(SchemaStatus::AlreadyExists) => {
                format!("Table <<{}>> not created: Table already exists", EMPLOYEE_TABLE)
            }
            Err(e) => {
                error!("Create table failed: {}", e);
                format!("Unable to create table <<{}>>", EMPLOYEE_TABLE)
            }
        };
        self.console.say(message)
    }

    fn insert(&mut self) -> Result<()> {
        let draft = self.console.read_draft()?;
        let mut gate = ConsoleConfirmation::new(&mut self.console, "Confirm data insertion");
        let ok = self.store.insert(&draft, &mut gate);
        self.report(ok, "Data insertion successful", "Data insertion failed")
    }

    fn search(&mut self) -> Result<()> {
        self.console
            .say("Enter number to search by Id or text to search within employee names.")?;
        let term = self.console.read_line("Search For:\t")?;

        let hits: Result<Vec<Employee>> = match term.parse::<i64>() {
            Ok(id) => self
                .store
                .try_find_by_id(id)
                .map(|found| found.into_iter().collect()),
            Err(_) => self.store.try_find_by_name(&term),
        };
        let hits = match hits {
            Ok(hits) => hits,
            Err(e) => return self.read_failed("Search", e),
        };
        if hits.is_empty() {
            self.console.say("No matching records")
        } else {
            self.show(&hits)
        }
    }

    /// Prompts for an id and loads that employee, printing "No such record" if absent.
    fn lookup(&mut self) -> Result<Option<Employee>> {
        let id: i64 = self.console.read_number("Enter Employee ID", Some(1))?;
        match self.store.try_find_by_id(id) {
            Ok(Some(found)) => Ok(Some(found)),
            Ok(None) => {
                self.console.say("No such record")?;
                Ok(None)
            }
            Err(e) => {
                self.read_failed("Search by id", e)?;
                Ok(None)
            }
        }
    }

    fn update(&mut self) -> Result<()> {
        let Some(mut employee) = self.lookup()? else {
            return Ok(());
        };
        self.console.edit_employee(&mut employee)?;
        let mut gate = ConsoleConfirmation::new(&mut self.console, "Confirm update to record");
        let ok = self.store.update(&employee, &mut gate);
        self.report(ok, "Update successful", "Update unsuccessful")
    }

    fn delete(&mut self) -> Result<()> {
        let Some(employee) = self.lookup()? else {
            return Ok(());
        };
        let mut gate = ConsoleConfirmation::new(&mut self.console, "Confirm deletion of record");
        let ok = self.store.delete(employee.id(), &mut gate);
        self.report(ok, "Deletion successful", "Deletion unsuccessful")
    }

    fn adjust_pay(&mut self) -> Result<()> {
        let Some(employee) = self.lookup()? else {
            return Ok(());
        };
        let percent = self
            .console
            .read_number("Enter percentage pay adjustment", Some(MIN_PAY_ADJUSTMENT))?;
        let prompt = format!(
            "Confirm pay adjustment of {}% for {} {}",
            percent, employee.forename, employee.surname
        );
        let mut gate = ConsoleConfirmation::new(&mut self.console, prompt);
        let ok = self.store.adjust_pay(employee.id(), percent, &mut gate);
        self.report(ok, "Pay adjustment successful", "Pay adjustment unsuccessful")
    }

    fn adjust_pay_all(&mut self) -> Result<()> {
        let percent = self
            .console
            .read_number("Enter percentage pay adjustment", Some(MIN_PAY_ADJUSTMENT))?;
        let mut gate = ConsoleConfirmation::new(&mut self.console, "Confirm general pay adjustment");
        let ok = self.store.adjust_pay_all(percent, &mut gate);
        self.report(ok, "Pay adjustment successful", "Pay adjustment unsuccessful")
    }
}
