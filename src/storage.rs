use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::datetime::DueDate;
use crate::models::{Patient, Task, TaskKind};

/// Returns the path to the tasks file (`tasks.txt`).
///
/// The path is determined in the following order:
/// 1. `CARELIST_DB` environment variable.
/// 2. `~/.local/share/carelist/tasks.txt` (on Linux).
/// 3. `./tasks.txt` (fallback).
fn db_path() -> PathBuf {
    std::env::var("CARELIST_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("carelist");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("tasks.txt");
        p
    })
}

/// Returns the path to the patients file (`patients.json`).
///
/// Located in the same directory as the tasks file.
fn patients_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("patients.json");
    p
}

/// Parses one stored line back into a [`Task`].
///
/// Inverse of `Task::render_persisted`: tag, done flag, description and a
/// mandatory date column (`-` when absent). Returns `None` for lines that do
/// not follow the format.
pub fn parse_persisted(line: &str) -> Option<Task> {
    let mut parts = line.splitn(3, " | ");
    let kind = match parts.next()? {
        "T" => TaskKind::Todo,
        "D" => TaskKind::Deadline,
        _ => return None,
    };
    let done = match parts.next()? {
        "1" => true,
        "0" => false,
        _ => return None,
    };
    let rest = parts.next()?;

    // The date column is always last and always present: `-` for no date.
    // Splitting from the right keeps separators inside the description safe.
    let (description, due_field) = rest.rsplit_once(" | ")?;
    let due = match due_field {
        "-" => None,
        text => Some(DueDate::parse(text).ok()?),
    };
    // A deadline is never written without its date.
    if kind == TaskKind::Deadline && due.is_none() {
        return None;
    }
    if description.is_empty() {
        return None;
    }
    Some(Task {
        kind,
        description: description.to_string(),
        done,
        due,
    })
}

/// Loads all tasks from the storage file.
///
/// Returns an empty vector if the file does not exist or cannot be read.
/// Lines that fail to parse are skipped.
pub fn load_tasks() -> Vec<Task> {
    let path = db_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    s.lines().filter_map(parse_persisted).collect()
}

/// Saves the given list of tasks to the storage file, one line per task.
///
/// Overwrites the existing file.
pub fn save_tasks(tasks: &[Task]) -> std::io::Result<()> {
    let path = db_path();
    let mut s = tasks
        .iter()
        .map(Task::render_persisted)
        .collect::<Vec<_>>()
        .join("\n");
    if !s.is_empty() {
        s.push('\n');
    }
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Loads all patient records from the storage file.
pub fn load_patients() -> Vec<Patient> {
    let path = patients_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

/// Saves the given list of patient records to the storage file.
pub fn save_patients(patients: &[Patient]) -> std::io::Result<()> {
    let path = patients_path();
    let s = serde_json::to_string_pretty(patients).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Deletes the task and patient storage files.
pub fn delete_database() -> std::io::Result<()> {
    let t_path = db_path();
    if t_path.exists() {
        fs::remove_file(t_path)?;
    }
    let p_path = patients_path();
    if p_path.exists() {
        fs::remove_file(p_path)?;
    }
    Ok(())
}
