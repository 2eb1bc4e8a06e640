use chrono::{NaiveDate, NaiveDateTime};

use crate::models::Task;

/// Finds every task that falls on the same calendar day as `candidate` and
/// is not yet done.
///
/// Time of day is ignored; tasks without a due date are excluded. Input
/// order is preserved. The caller decides what to do with the clash set --
/// this only computes it.
///
/// Returns an empty set when the candidate itself has no due date.
pub fn find_same_day_clashes<'a>(tasks: &'a [Task], candidate: &Task) -> Vec<&'a Task> {
    let Some(candidate_date) = candidate.date() else {
        return Vec::new();
    };
    tasks
        .iter()
        .filter(|t| !t.done && t.date() == Some(candidate_date))
        .collect()
}

/// Finds every task due at or before `cutoff` that is not yet done,
/// preserving input order. Used to surface deadline reminders.
pub fn find_upcoming<'a>(tasks: &'a [Task], cutoff: NaiveDateTime) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| {
            !t.done
                && t.due
                    .map(|due| due.date_time() <= cutoff)
                    .unwrap_or(false)
        })
        .collect()
}

/// Finds every task whose due date falls on `target`, done or not,
/// preserving input order. Backs the "schedule on date X" view.
pub fn find_on_date<'a>(tasks: &'a [Task], target: NaiveDate) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.date() == Some(target))
        .collect()
}
