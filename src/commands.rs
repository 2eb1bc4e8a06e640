use std::io::{self, Write};

use chrono::{Duration, Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Patient, Task};
use crate::query::{find_on_date, find_same_day_clashes, find_upcoming};
use crate::storage::{delete_database, load_patients, load_tasks, save_patients, save_tasks};

/// Adds a plain task with no due date.
pub fn cmd_todo(description: String, silent: bool) {
    let task = match Task::todo(&description) {
        Ok(t) => t,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    let mut tasks = load_tasks();
    tasks.push(task);
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else if !silent {
        println!("Got it. I've added this task:\n  {}", tasks[tasks.len() - 1].render_status());
        println!("Now you have {} tasks in the list.", tasks.len());
    }
}

/// Adds a deadline task due at `by` (`dd/MM/yyyy HHmm`).
///
/// Before adding, checks for other unfinished tasks on the same day and asks
/// for confirmation when any exist. `force` (or `silent`) skips the prompt.
pub fn cmd_deadline(description: String, by: String, force: bool, silent: bool) {
    let task = match Task::deadline(&description, &by) {
        Ok(t) => t,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };

    let mut tasks = load_tasks();
    if !force && !silent {
        let clashes = find_same_day_clashes(&tasks, &task);
        if !clashes.is_empty() {
            println!("Here are the tasks that fall on the same day:");
            for (i, t) in clashes.iter().enumerate() {
                println!("{}: {}", i + 1, t.render_status());
            }
            print!("Do you still want to add your task anyway? [y/N] ");
            io::stdout().flush().unwrap();
            let mut input = String::new();
            io::stdin().read_line(&mut input).unwrap();
            if input.trim().to_lowercase() != "y" {
                println!("Aborted.");
                return;
            }
        }
    }

    tasks.push(task);
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else if !silent {
        let added = &tasks[tasks.len() - 1];
        println!("Got it. I've added this task:\n  {}", added.render_status());
        if let Some(due) = added.due {
            println!("Due on {}.", due.format_ordinal());
        }
        println!("Now you have {} tasks in the list.", tasks.len());
    }
}

/// Marks the task at the given 1-based index as done.
pub fn cmd_done(index: usize, silent: bool) {
    let mut tasks = load_tasks();
    let Some(task) = index.checked_sub(1).and_then(|i| tasks.get_mut(i)) else {
        if !silent { eprintln!("Task {} not found.", index); }
        return;
    };
    task.mark_done();
    let status = task.render_status();
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else if !silent {
        println!("Nice! I've marked this task as done:\n  {}", status);
    }
}

/// Removes the task at the given 1-based index.
pub fn cmd_remove(index: usize, silent: bool) {
    let mut tasks = load_tasks();
    if index == 0 || index > tasks.len() {
        if !silent { eprintln!("Task {} not found.", index); }
        return;
    }
    let removed = tasks.remove(index - 1);
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else if !silent {
        println!("Noted. I've removed this task:\n  {}", removed.render_status());
        println!("Now you have {} tasks in the list.", tasks.len());
    }
}

/// Reschedules the task at the given 1-based index to a new due date.
///
/// On a bad date string the stored task is left as it was.
pub fn cmd_reschedule(index: usize, to: String, silent: bool) {
    let mut tasks = load_tasks();
    let Some(task) = index.checked_sub(1).and_then(|i| tasks.get_mut(i)) else {
        if !silent { eprintln!("Task {} not found.", index); }
        return;
    };
    if let Err(e) = task.reschedule(&to) {
        if !silent { eprintln!("{}", e); }
        return;
    }
    let status = task.render_status();
    let due = task.due;
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else if !silent {
        println!("Noted. I've rescheduled this task:\n  {}", status);
        if let Some(due) = due {
            println!("Now due on {}.", due.format_ordinal());
        }
    }
}

/// Lists tasks in a formatted table, in list order.
///
/// By default, hides completed tasks unless `all` is true.
pub fn cmd_list(all: bool) {
    let mut tasks = load_tasks();
    if !all {
        tasks.retain(|t| !t.done);
    }
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
        ]);

    for (i, t) in tasks.iter().enumerate() {
        let status = if t.done { "Done" } else { "Pending" };
        let status_color = if t.done { Color::Green } else { Color::Yellow };
        let due = t.due.map(|d| d.format_ordinal()).unwrap_or_else(|| "-".into());
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(status).fg(status_color),
            Cell::new(&t.description),
            Cell::new(due),
        ]);
    }

    println!("{table}");
}

/// Prints the tasks whose description contains `keyword`.
pub fn cmd_find(keyword: String) {
    let tasks = load_tasks();
    println!("Here are the matching tasks in your list:");
    let mut count = 1;
    for t in &tasks {
        if t.description.contains(&keyword) {
            println!("{}.{}", count, t.render_status());
            count += 1;
        }
    }
}

/// Prints the unfinished tasks due within the next `days` days.
pub fn cmd_remind(days: i64) {
    let tasks = load_tasks();
    let cutoff = Local::now().naive_local() + Duration::days(days);
    let upcoming = find_upcoming(&tasks, cutoff);
    if upcoming.is_empty() {
        println!("No tasks are reaching their deadline.");
        return;
    }
    println!("The following tasks are reaching your deadline:");
    println!("Mark them as done or reschedule them to stop the reminder.");
    for (i, t) in upcoming.iter().enumerate() {
        match t.due {
            Some(due) => println!("{}.{} (due {})", i + 1, t.render_status(), due.format_ordinal()),
            None => println!("{}.{}", i + 1, t.render_status()),
        }
    }
}

/// Prints the schedule on a given date (`dd/MM/yyyy`), done tasks included.
pub fn cmd_schedule(date: String) {
    let target = match NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y") {
        Ok(d) => d,
        Err(_) => {
            eprintln!("Invalid date '{}': expected dd/MM/yyyy.", date);
            return;
        }
    };
    let tasks = load_tasks();
    let scheduled = find_on_date(&tasks, target);
    println!("This is your schedule on {}:", date.trim());
    if scheduled.is_empty() {
        println!("Nothing scheduled.");
        return;
    }
    for (i, t) in scheduled.iter().enumerate() {
        println!("{}: {}", i + 1, t.render_status());
    }
}

/// Adds a patient record.
pub fn cmd_patient_add(name: String, nric: String, room: String, remark: Option<String>, silent: bool) {
    if name.trim().is_empty() {
        if !silent { eprintln!("Patient name cannot be empty."); }
        return;
    }
    let mut patients = load_patients();
    patients.push(Patient {
        name: name.trim().to_string(),
        nric,
        room,
        remark: remark.unwrap_or_default(),
    });
    if let Err(e) = save_patients(&patients) {
        if !silent { eprintln!("Failed to save patients: {}", e); }
    } else if !silent {
        println!("Patient added. Now you have {} patients in the list.", patients.len());
    }
}

/// Lists all patient records in a formatted table.
pub fn cmd_patient_list() {
    let patients = load_patients();
    if patients.is_empty() {
        println!("No patients found.");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Name", "NRIC", "Room", "Remark"]);
    for (i, p) in patients.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            p.name.clone(),
            p.nric.clone(),
            p.room.clone(),
            if p.remark.is_empty() { "-".into() } else { p.remark.clone() },
        ]);
    }
    println!("{table}");
}

/// Resets the database by deleting all tasks and patients.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks and patients? This cannot be undone. [y/N] ");
        io::stdout().flush().unwrap();
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
