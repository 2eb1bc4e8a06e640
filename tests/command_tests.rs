use carelist::commands::*;
use carelist::storage::{load_patients, load_tasks};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(test_name: &str, f: F)
where
    F: FnOnce(PathBuf),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let mut db_path = env::temp_dir();
    db_path.push(format!("carelist_test_{}.txt", test_name));

    // Set env var
    env::set_var("CARELIST_DB", db_path.to_str().unwrap());

    let mut patients_path = db_path.clone();
    patients_path.pop();
    patients_path.push("patients.json");

    // Clean up before test
    if db_path.exists() {
        fs::remove_file(&db_path).unwrap();
    }
    if patients_path.exists() {
        fs::remove_file(&patients_path).unwrap();
    }

    // Run test
    f(db_path.clone());

    // Clean up after test
    if db_path.exists() {
        fs::remove_file(&db_path).unwrap();
    }
    if patients_path.exists() {
        fs::remove_file(&patients_path).unwrap();
    }
    env::remove_var("CARELIST_DB");
}

#[test]
fn test_add_todo_and_load() {
    with_test_db("add_todo", |_path| {
        cmd_todo("Read discharge notes".into(), true);

        let tasks = load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Read discharge notes");
        assert!(!tasks[0].done);
        assert!(tasks[0].due.is_none());
    });
}

#[test]
fn test_add_deadline_and_load() {
    with_test_db("add_deadline", |_path| {
        cmd_deadline("Submit report".into(), "02/12/2024 1800".into(), true, true);

        let tasks = load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].date(),
            Some(NaiveDate::from_ymd_opt(2024, 12, 2).unwrap())
        );
    });
}

#[test]
fn test_add_deadline_rejects_bad_date() {
    with_test_db("bad_date", |_path| {
        cmd_deadline("Submit report".into(), "31/13/2024 2500".into(), true, true);

        // Nothing was created.
        let tasks = load_tasks();
        assert!(tasks.is_empty());
    });
}

#[test]
fn test_empty_description_rejected() {
    with_test_db("empty_desc", |_path| {
        cmd_todo("   ".into(), true);
        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_done_task() {
    with_test_db("done", |_path| {
        cmd_todo("Water plants".into(), true);
        cmd_done(1, true);

        let tasks = load_tasks();
        assert!(tasks[0].done);

        // Marking again changes nothing.
        cmd_done(1, true);
        assert_eq!(load_tasks(), tasks);
    });
}

#[test]
fn test_remove_task() {
    with_test_db("remove", |_path| {
        cmd_todo("First".into(), true);
        cmd_todo("Second".into(), true);
        cmd_remove(1, true);

        let tasks = load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Second");
    });
}

#[test]
fn test_reschedule_task() {
    with_test_db("reschedule", |_path| {
        cmd_deadline("Submit report".into(), "02/12/2024 1800".into(), true, true);
        cmd_reschedule(1, "05/12/2024 0900".into(), true);

        let tasks = load_tasks();
        assert_eq!(
            tasks[0].date(),
            Some(NaiveDate::from_ymd_opt(2024, 12, 5).unwrap())
        );
    });
}

#[test]
fn test_reschedule_bad_date_keeps_old_one() {
    with_test_db("reschedule_bad", |_path| {
        cmd_deadline("Submit report".into(), "02/12/2024 1800".into(), true, true);
        cmd_reschedule(1, "never".into(), true);

        let tasks = load_tasks();
        assert_eq!(
            tasks[0].date(),
            Some(NaiveDate::from_ymd_opt(2024, 12, 2).unwrap())
        );
    });
}

#[test]
fn test_persistence_round_trip() {
    with_test_db("round_trip", |_path| {
        cmd_todo("Water plants".into(), true);
        cmd_deadline("Submit report".into(), "02/12/2024 1800".into(), true, true);
        cmd_done(1, true);

        let first = load_tasks();
        let second = load_tasks();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(first[0].done);
        assert_eq!(first[1].due.unwrap().render_input(), "02/12/2024 1800");
    });
}

#[test]
fn test_patient_add_and_load() {
    with_test_db("patients", |_path| {
        cmd_patient_add(
            "Jane Doe".into(),
            "S1234567A".into(),
            "W3-12".into(),
            Some("allergic to penicillin".into()),
            true,
        );

        let patients = load_patients();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "Jane Doe");
        assert_eq!(patients[0].nric, "S1234567A");
        assert_eq!(patients[0].room, "W3-12");
        assert_eq!(patients[0].remark, "allergic to penicillin");
    });
}

#[test]
fn test_patient_empty_name_rejected() {
    with_test_db("patient_empty", |_path| {
        cmd_patient_add(" ".into(), "S1234567A".into(), "W3-12".into(), None, true);
        assert!(load_patients().is_empty());
    });
}
