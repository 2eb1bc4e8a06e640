//! # Carelist
//!
//! A terminal assistant for personal tasks and patient records. Carelist keeps a task list with due dates, warns about same-day clashes, reminds you of approaching deadlines, and persists everything to plain local files.
//!
//! ## Features
//!
//! *   **Deadline tasks**: Tasks can carry a due date and time in `dd/MM/yyyy HHmm` format.
//! *   **Clash warnings**: Adding a deadline on a day that already has unfinished tasks asks for confirmation first.
//! *   **Reminders**: `remind` lists unfinished tasks due within the next few days.
//! *   **Schedule view**: `schedule` shows everything on a given date, done or not.
//! *   **Patient records**: A secondary list of patient records (name, NRIC, room, remark).
//! *   **Data Persistence**: Tasks are stored one line per task; patients as JSON, in standard XDG data directories.
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```
//!
//! ## Usage
//!
//! **Adding Tasks**
//! ```bash
//! # Plain task
//! carelist todo "Read discharge notes"
//!
//! # Deadline task
//! carelist deadline "Submit report" --by "02/12/2024 1800"
//! ```
//!
//! **Managing Tasks**
//! ```bash
//! # List pending tasks
//! carelist list
//!
//! # List all (including completed)
//! carelist list --all
//!
//! # Mark a task done (1-based index from `list`)
//! carelist done 2
//!
//! # Move a deadline
//! carelist reschedule 2 --to "05/12/2024 0900"
//!
//! # What's due in the next 3 days?
//! carelist remind
//!
//! # What's on the 5th of January?
//! carelist schedule 05/01/2024
//! ```
//!
//! **Patients**
//! ```bash
//! carelist patient add "Jane Doe" --nric S1234567A --room W3-12
//! carelist patient list
//! ```
//!
//! ## Data Storage
//!
//! Files are saved in your local data directory:
//! *   Linux: `~/.local/share/carelist/tasks.txt`
//! *   macOS: `~/Library/Application Support/carelist/tasks.txt`
//! *   Windows: `%APPDATA%\carelist\tasks.txt`
//!
//! You can override this by setting the `CARELIST_DB` environment variable.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use carelist::commands::*;

#[derive(Parser)]
#[command(name = "carelist")]
#[command(about = "Terminal task and patient-record assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a plain task
    Todo {
        /// Task description (quoted if it has spaces)
        description: String,
    },
    /// Add a task with a due date
    Deadline {
        /// Task description (quoted if it has spaces)
        description: String,
        /// Due date and time in dd/MM/yyyy HHmm
        #[arg(short, long)]
        by: String,
        /// Add without asking about same-day clashes
        #[arg(short, long)]
        force: bool,
    },
    /// List tasks
    List {
        /// Show completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Mark a task as done
    Done {
        /// 1-based task index from `list`
        index: usize,
    },
    /// Remove a task
    Remove {
        /// 1-based task index from `list`
        index: usize,
    },
    /// Move a task to a new due date
    Reschedule {
        /// 1-based task index from `list`
        index: usize,
        /// New due date and time in dd/MM/yyyy HHmm
        #[arg(short, long)]
        to: String,
    },
    /// Find tasks by keyword
    Find {
        /// Substring to look for in task descriptions
        keyword: String,
    },
    /// Show unfinished tasks reaching their deadline
    Remind {
        /// How many days ahead to look
        #[arg(short, long, default_value_t = 3)]
        days: i64,
    },
    /// Show the schedule on a date
    Schedule {
        /// Date in dd/MM/yyyy
        date: String,
    },
    /// Manage patient records
    Patient {
        #[command(subcommand)]
        command: PatientCommands,
    },
    /// Reset the database (delete all tasks and patients)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum PatientCommands {
    /// Add a patient record
    Add {
        /// Patient name
        name: String,
        /// National identity number
        #[arg(short, long)]
        nric: String,
        /// Ward or room
        #[arg(short, long)]
        room: String,
        /// Free-text remark
        #[arg(long)]
        remark: Option<String>,
    },
    /// List patient records
    List,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Todo { description }) => cmd_todo(description, false),
        Some(Commands::Deadline { description, by, force }) => cmd_deadline(description, by, force, false),
        Some(Commands::List { all }) => cmd_list(all),
        Some(Commands::Done { index }) => cmd_done(index, false),
        Some(Commands::Remove { index }) => cmd_remove(index, false),
        Some(Commands::Reschedule { index, to }) => cmd_reschedule(index, to, false),
        Some(Commands::Find { keyword }) => cmd_find(keyword),
        Some(Commands::Remind { days }) => cmd_remind(days),
        Some(Commands::Schedule { date }) => cmd_schedule(date),
        Some(Commands::Patient { command }) => match command {
            PatientCommands::Add { name, nric, room, remark } => cmd_patient_add(name, nric, room, remark, false),
            PatientCommands::List => cmd_patient_list(),
        },
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "carelist", &mut io::stdout());
        }
        None => cmd_list(false),
    }
}
