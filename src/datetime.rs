use chrono::{Datelike, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// The only date/time input pattern the assistant accepts: `dd/MM/yyyy HHmm`,
/// e.g. `02/12/2024 1800`.
pub const INPUT_PATTERN: &str = "%d/%m/%Y %H%M";

/// Returned when a date/time string does not match [`INPUT_PATTERN`] or names
/// an impossible calendar date or clock time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date/time '{input}': expected dd/MM/yyyy HHmm")]
pub struct DateParseError {
    /// The text that failed to parse.
    pub input: String,
}

/// The due date-and-time attached to a task.
///
/// Date and time are always set together; a task either has a complete
/// `DueDate` or none at all. The value is replaced wholesale on reschedule,
/// never mutated field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDate(NaiveDateTime);

impl DueDate {
    /// Parses a `dd/MM/yyyy HHmm` string into a `DueDate`.
    ///
    /// Malformed text and out-of-range fields (month 13, hour 25, ...) both
    /// yield a [`DateParseError`]. A failed parse produces no value, so a
    /// caller holding an existing `DueDate` keeps it unchanged.
    pub fn parse(text: &str) -> Result<Self, DateParseError> {
        NaiveDateTime::parse_from_str(text.trim(), INPUT_PATTERN)
            .map(DueDate)
            .map_err(|_| DateParseError {
                input: text.to_string(),
            })
    }

    /// The calendar date, ignoring time of day. Used for clash detection and
    /// the on-date schedule view.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// The full date-and-time, used for reminder cutoff comparisons.
    pub fn date_time(&self) -> NaiveDateTime {
        self.0
    }

    /// Renders the value as `"<day><suffix> of <Month> <Year>, <Hour><AM/PM>"`,
    /// e.g. `"2nd of December 2024, 6PM"`.
    ///
    /// The suffix is picked by day-of-month modulo 10 (1 -> "st", 2 -> "nd",
    /// 3 -> "rd", else "th"), so the 11th, 12th and 13th come out as "11st",
    /// "12nd" and "13rd". That matches the assistant's established output and
    /// is kept as-is.
    pub fn format_ordinal(&self) -> String {
        let day = self.0.day();
        let suffix = match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        format!("{}{} of {}", day, suffix, self.0.format("%B %Y, %-I%p"))
    }

    /// Re-renders the value in the input pattern, so a persisted date can be
    /// read back through [`DueDate::parse`].
    pub fn render_input(&self) -> String {
        self.0.format(INPUT_PATTERN).to_string()
    }
}
