//! Line-oriented terminal prompts
//!
//! Wraps any `BufRead`/`Write` pair so the menu and the confirmation gate can
//! run against stdin/stdout or against in-memory buffers in tests.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::core::{Result, StaffError};
use crate::employee::{Employee, EmployeeDraft, EDITABLE_FIELDS};

/// Numbers that can be read from a prompt.
pub trait Numeric: FromStr + PartialOrd + Display + Copy {
    /// Whether a successfully parsed value is usable (e.g. finite).
    fn is_usable(&self) -> bool {
        true
    }
}

impl Numeric for i64 {}

impl Numeric for f64 {
    fn is_usable(&self) -> bool {
        self.is_finite()
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Gives the writer back, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints `prompt` and reads one line, without its line ending and
    /// surrounding whitespace.
    ///
    /// # Errors
    ///
    /// `StaffError::InputClosed` once the input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        Ok(self.read_exact_line(prompt)?.trim().to_string())
    }

    /// Like [`Console::read_line`] but only the line ending is removed.
    pub fn read_exact_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed at prompt {:?}", prompt);
            return Err(StaffError::InputClosed);
        }
        let content = line.strip_suffix('\n').unwrap_or(&line);
        let content = content.strip_suffix('\r').unwrap_or(content);
        Ok(content.to_string())
    }

    /// Reads a number, re-prompting until the entry parses and is not below `minimum`.
    pub fn read_number<T: Numeric>(&mut self, prompt: &str, minimum: Option<T>) -> Result<T> {
        loop {
            let entry = self.read_line(&format!("{}:\t", prompt))?;
            let value = match entry.parse::<T>() {
                Ok(v) if v.is_usable() => v,
                _ => {
                    self.say("Invalid numerical entry")?;
                    continue;
                }
            };
            match minimum {
                Some(min) if value < min => {
                    self.say(format!("Enter a number greater than or equal to {}", min))?;
                }
                _ => return Ok(value),
            }
        }
    }

    /// Prompts for every editable field of a new employee.
    pub fn read_draft(&mut self) -> Result<EmployeeDraft> {
        let [title, forename, surname, email, salary] = EDITABLE_FIELDS;
        Ok(EmployeeDraft {
            title: self.read_line(&format!("{}:\t", title))?,
            forename: self.read_line(&format!("{}:\t", forename))?,
            surname: self.read_line(&format!("{}:\t", surname))?,
            email: self.read_line(&format!("{}:\t", email))?,
            salary: self.read_number(salary, None)?,
        })
    }

    /// Prompts for each editable field showing its current value; a blank
    /// entry keeps it.
    pub fn edit_employee(&mut self, employee: &mut Employee) -> Result<()> {
        self.say("Enter updated attributes. Leave blank to accept current value")?;

        for (index, name) in EDITABLE_FIELDS.iter().enumerate() {
            let prompt = format!("{} [{}]:\t", name, employee.field_value(index));
            loop {
                let entry = self.read_line(&prompt)?;
                if entry.is_empty() {
                    break;
                }
                match index {
                    0 => employee.title = entry,
                    1 => employee.forename = entry,
                    2 => employee.surname = entry,
                    3 => employee.email = entry,
                    _ => match entry.parse::<f64>() {
                        Ok(salary) if salary.is_usable() => employee.salary = salary,
                        _ => {
                            self.say("Invalid numerical entry")?;
                            continue;
                        }
                    },
                }
                break;
            }
        }
        Ok(())
    }
}
