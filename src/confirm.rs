//! Confirmation gate
//!
//! Storage operations hand the rows a pending change affects to a
//! [`ConfirmationGate`] and commit only if it approves. The store never talks
//! to the terminal itself, so it can be driven by a non-interactive caller.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::console::Console;
use crate::core::{Result, StaffError};
use crate::employee::Employee;
use crate::results_grid::ResultsGrid;

/// Approves or rejects a pending change.
pub trait ConfirmationGate {
    /// Shown the affected rows; returns `true` to commit, `false` to roll back.
    fn request_confirmation(&mut self, affected: &[Employee]) -> Result<bool>;
}

impl<F> ConfirmationGate for F
where
    F: FnMut(&[Employee]) -> bool,
{
    fn request_confirmation(&mut self, affected: &[Employee]) -> Result<bool> {
        Ok(self(affected))
    }
}

/// Asks on the console, looping until the answer is one of `y`, `Y`, `n`, `N`.
pub struct ConsoleConfirmation<'a, R, W> {
    console: &'a mut Console<R, W>,
    prompt: String,
}

impl<'a, R: BufRead, W: Write> ConsoleConfirmation<'a, R, W> {
    pub fn new(console: &'a mut Console<R, W>, prompt: impl Into<String>) -> Self {
        ConsoleConfirmation {
            console,
            prompt: prompt.into(),
        }
    }
}

impl<R: BufRead, W: Write> ConfirmationGate for ConsoleConfirmation<'_, R, W> {
    fn request_confirmation(&mut self, affected: &[Employee]) -> Result<bool> {
        self.console.say("\nAffected data")?;
        self.console
            .say(ResultsGrid::from_employees(affected).render().trim_end())?;

        let question = format!("{} [y/n]: ", self.prompt);
        loop {
            match self.console.read_exact_line(&question) {
                Ok(answer) => match answer.as_str() {
                    "y" | "Y" => return Ok(true),
                    "n" | "N" => return Ok(false),
                    _ => continue,
                },
                // Nobody is left to answer
                Err(StaffError::InputClosed) => return Ok(false),
                Err(e) => return Err(e),
            }
        }
    }
}

/// Answers from a fixed script and remembers what it was shown.
///
/// Once the script runs out every further request is rejected.
#[derive(Debug, Default)]
pub struct ScriptedConfirmation {
    answers: VecDeque<bool>,
    pub seen: Vec<Vec<Employee>>,
}

impl ScriptedConfirmation {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedConfirmation {
            answers: answers.into_iter().collect(),
            seen: Vec::new(),
        }
    }

    pub fn approve() -> Self {
        Self::new([true])
    }

    pub fn reject() -> Self {
        Self::new([false])
    }
}

impl ConfirmationGate for ScriptedConfirmation {
    fn request_confirmation(&mut self, affected: &[Employee]) -> Result<bool> {
        self.seen.push(affected.to_vec());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
