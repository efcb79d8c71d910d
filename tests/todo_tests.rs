use chrono::NaiveDate;
use echampo::core::todos::{DueStatus, TodoEdit, TodoLogic, display_order, due_status};
use echampo::db::log::load_log;
use echampo::db::pool::DbPool;
use echampo::errors::AppError;
use echampo::models::{Priority, Todo};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ech_db, init_empty, setup_test_db};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

fn todo(id: i64, due: Option<NaiveDate>, completed: bool, created_at: &str) -> Todo {
    let mut t = Todo::new(&format!("todo {id}"), Priority::Medium, due);
    t.id = id;
    t.completed = completed;
    t.created_at = created_at.to_string();
    t
}

#[test]
fn test_due_status() {
    let today = day(2025, 10, 15);

    assert_eq!(due_status(&todo(1, None, false, ""), today, 3), DueStatus::NoDueDate);
    assert_eq!(
        due_status(&todo(1, Some(day(2025, 10, 14)), false, ""), today, 3),
        DueStatus::Overdue
    );
    assert_eq!(
        due_status(&todo(1, Some(today), false, ""), today, 3),
        DueStatus::DueSoon(0)
    );
    assert_eq!(
        due_status(&todo(1, Some(day(2025, 10, 18)), false, ""), today, 3),
        DueStatus::DueSoon(3)
    );
    assert_eq!(
        due_status(&todo(1, Some(day(2025, 10, 19)), false, ""), today, 3),
        DueStatus::Later
    );
    // completed wins over overdue
    assert_eq!(
        due_status(&todo(1, Some(day(2025, 1, 1)), true, ""), today, 3),
        DueStatus::Completed
    );
}

#[test]
fn test_display_order() {
    let mut todos = vec![
        todo(1, None, false, "2025-10-01T10:00:00+02:00"),
        todo(2, Some(day(2025, 10, 20)), true, "2025-10-01T10:00:00+02:00"),
        todo(3, Some(day(2025, 10, 20)), false, "2025-10-01T10:00:00+02:00"),
        todo(4, Some(day(2025, 10, 16)), false, "2025-10-01T10:00:00+02:00"),
        todo(5, None, false, "2025-10-05T10:00:00+02:00"),
    ];
    todos.sort_by(display_order);

    let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![4, 3, 5, 1, 2]);
}

#[test]
fn test_toggle_and_edit_formatting() {
    let pool = DbPool::in_memory("local").expect("db");
    let t = TodoLogic::add(&pool, "  Revise chapter 3 ", Priority::High, None).expect("add");
    assert_eq!(t.title, "Revise chapter 3");

    assert!(TodoLogic::toggle(&pool, t.id).expect("toggle").completed);
    assert!(!TodoLogic::toggle(&pool, t.id).expect("toggle").completed);

    let edited = TodoLogic::edit(
        &pool,
        t.id,
        &TodoEdit {
            title: Some("Revise chapter 4".to_string()),
            toggle_bold: true,
            highlight: Some(Some("yellow".to_string())),
            ..Default::default()
        },
    )
    .expect("edit");
    assert_eq!(edited.title, "Revise chapter 4");
    assert!(edited.formatting.bold);
    assert_eq!(edited.formatting.highlight.as_deref(), Some("#FEF08A"));

    let stored: Todo = pool.find(t.id).expect("find");
    assert_eq!(stored.formatting, edited.formatting);

    let cleared = TodoLogic::edit(
        &pool,
        t.id,
        &TodoEdit {
            toggle_bold: true,
            highlight: Some(None),
            ..Default::default()
        },
    )
    .expect("edit");
    assert!(cleared.formatting.is_plain());
}

#[test]
fn test_edit_without_changes_is_not_logged() {
    let pool = DbPool::in_memory("local").expect("db");
    let t = TodoLogic::add(&pool, "Revise", Priority::Low, None).expect("add");
    let edits = |pool: &DbPool| {
        load_log(&pool.conn)
            .expect("log")
            .iter()
            .filter(|r| r.operation == "edit")
            .count()
    };

    let same = TodoLogic::edit(&pool, t.id, &TodoEdit::default()).expect("edit");
    assert_eq!(same.title, t.title);
    assert!(same.formatting.is_plain());
    assert_eq!(edits(&pool), 0);

    // same title again
    TodoLogic::edit(
        &pool,
        t.id,
        &TodoEdit {
            title: Some("Revise".to_string()),
            ..Default::default()
        },
    )
    .expect("edit");
    assert_eq!(edits(&pool), 0);

    TodoLogic::edit(
        &pool,
        t.id,
        &TodoEdit {
            toggle_italic: true,
            ..Default::default()
        },
    )
    .expect("edit");
    assert_eq!(edits(&pool), 1);
}

#[test]
fn test_empty_title_rejected() {
    let pool = DbPool::in_memory("local").expect("db");
    assert!(matches!(
        TodoLogic::add(&pool, "   ", Priority::Low, None),
        Err(AppError::Empty(_))
    ));
}

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[test]
fn test_todo_cli_flow() {
    let db_path = setup_test_db("todo_flow");
    init_empty(&db_path);

    ech_db(&db_path)
        .args(["todo", "add", "Buy a calculator", "--priority", "high", "--due", "2020-01-01"])
        .assert()
        .success()
        .stdout(contains("Todo #1 added"));

    ech_db(&db_path)
        .args(["todo", "add", "Read Candide"])
        .assert()
        .success();

    ech_db(&db_path)
        .args(["todo", "list"])
        .assert()
        .success()
        .stdout(contains("Buy a calculator"))
        .stdout(contains("overdue"))
        .stdout(contains("Read Candide"));

    ech_db(&db_path)
        .args(["todo", "done", "1"])
        .assert()
        .success()
        .stdout(contains("Todo #1 done."));

    ech_db(&db_path)
        .args(["todo", "list"])
        .assert()
        .success()
        .stdout(contains("Buy a calculator").not())
        .stdout(contains("Read Candide"));

    ech_db(&db_path)
        .args(["todo", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Buy a calculator"))
        .stdout(contains("[x]"));
}

#[test]
fn test_todo_edit_and_delete() {
    let db_path = setup_test_db("todo_edit");
    init_empty(&db_path);

    ech_db(&db_path)
        .args(["todo", "add", "Essay"])
        .assert()
        .success();

    ech_db(&db_path)
        .args(["todo", "edit", "1", "--title", "Philosophy essay", "--bold", "--highlight", "Pink"])
        .assert()
        .success()
        .stdout(contains("Philosophy essay"));

    ech_db(&db_path)
        .args(["todo", "edit", "1", "--highlight", "Purple"])
        .assert()
        .failure()
        .stderr(contains("Invalid color"));

    ech_db(&db_path)
        .args(["todo", "del", "1"])
        .assert()
        .success();

    ech_db(&db_path)
        .args(["todo", "done", "1"])
        .assert()
        .failure()
        .stderr(contains("Todo #1 not found"));

    ech_db(&db_path)
        .args(["todo", "list"])
        .assert()
        .success()
        .stdout(contains("Nothing to do."));
}
