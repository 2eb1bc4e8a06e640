use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::datetime::{DateParseError, DueDate};

/// Returned when a task cannot be constructed from the given input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The description was empty (or all whitespace).
    #[error("task description cannot be empty")]
    EmptyDescription,
    /// The description contained a line break, which the one-line-per-task
    /// storage format cannot hold.
    #[error("task description cannot span multiple lines")]
    MultilineDescription,
    /// The supplied due-date text did not parse; the task is not created.
    #[error(transparent)]
    Date(#[from] DateParseError),
}

/// Selects a task's construction and persistence policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// A plain task with no due date.
    Todo,
    /// A task that carries a mandatory due date.
    Deadline,
}

impl TaskKind {
    /// Single-letter tag used in the persisted line format.
    pub fn tag(&self) -> &'static str {
        match self {
            TaskKind::Todo => "T",
            TaskKind::Deadline => "D",
        }
    }
}

/// A single task in the assistant's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Which variant this task is; fixed at construction.
    pub kind: TaskKind,
    /// What the task is about. Never empty.
    pub description: String,
    /// Whether the task has been completed. Only ever flips false -> true.
    pub done: bool,
    /// The due date, present iff the variant carries one (or a todo was
    /// later rescheduled onto a date).
    pub due: Option<DueDate>,
}

/// Trims the description and rejects input the task cannot hold.
fn validate_description(description: &str) -> Result<&str, TaskError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    if description.contains(['\n', '\r']) {
        return Err(TaskError::MultilineDescription);
    }
    Ok(description)
}

impl Task {
    /// Creates a plain task with no due date.
    pub fn todo(description: &str) -> Result<Self, TaskError> {
        let description = validate_description(description)?;
        Ok(Task {
            kind: TaskKind::Todo,
            description: description.to_string(),
            done: false,
            due: None,
        })
    }

    /// Creates a deadline task from a description and a `dd/MM/yyyy HHmm`
    /// due string.
    ///
    /// If the due string does not parse, the whole construction fails and no
    /// task is created.
    pub fn deadline(description: &str, due_text: &str) -> Result<Self, TaskError> {
        let description = validate_description(description)?;
        let due = DueDate::parse(due_text)?;
        Ok(Task {
            kind: TaskKind::Deadline,
            description: description.to_string(),
            done: false,
            due: Some(due),
        })
    }

    /// Marks the task as done. Marking an already-done task is a no-op.
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Replaces the due date wholesale with a newly parsed one.
    ///
    /// On parse failure the existing due date (or its absence) is left
    /// untouched and the error is returned to the caller.
    pub fn reschedule(&mut self, due_text: &str) -> Result<(), DateParseError> {
        let due = DueDate::parse(due_text)?;
        self.due = Some(due);
        Ok(())
    }

    /// Tick if completed, cross otherwise.
    pub fn status_icon(&self) -> &'static str {
        if self.done {
            "\u{2713}"
        } else {
            "\u{2718}"
        }
    }

    /// Renders `"[<icon>] <description>"` for console display.
    pub fn render_status(&self) -> String {
        format!("[{}] {}", self.status_icon(), self.description)
    }

    /// Renders the line stored for this task, a pure function of its state:
    ///
    /// - todo:     `T | <0|1> | <description> | -`
    /// - deadline: `D | <0|1> | <description> | <dd/MM/yyyy HHmm>`
    ///
    /// The date column is always present (`-` when there is no due date), so
    /// a description that happens to end in date-like text never collides
    /// with it. `storage::parse_persisted` reads the line back into an equal
    /// task.
    pub fn render_persisted(&self) -> String {
        let done = if self.done { "1" } else { "0" };
        let due = match self.due {
            Some(due) => due.render_input(),
            None => "-".to_string(),
        };
        format!("{} | {} | {} | {}", self.kind.tag(), done, self.description, due)
    }

    /// The calendar date of the due date, if any (time of day dropped).
    pub fn date(&self) -> Option<NaiveDate> {
        self.due.map(|d| d.date())
    }
}

/// A patient record in the assistant's secondary list.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Patient {
    /// The patient's name.
    pub name: String,
    /// National identity number.
    pub nric: String,
    /// Assigned ward or room.
    pub room: String,
    /// Free-text remark.
    #[serde(default)]
    pub remark: String,
}
