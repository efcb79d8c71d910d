use chrono::{NaiveDate, Weekday};
use echampo::db::log::load_log;
use echampo::db::migrate::pending_migrations;
use echampo::db::pool::DbPool;
use echampo::db::queries::{find_subject, load_grades, load_schedule};
use echampo::db::store::text;
use echampo::errors::AppError;
use echampo::models::{Grade, Priority, Recurrence, ScheduleEntry, Subject, Todo, WeekParity};
use rusqlite::types::Value;

mod common;
use common::hm;

fn pool(owner: &str) -> DbPool {
    DbPool::in_memory(owner).expect("in-memory db")
}

fn add_subject(pool: &DbPool, name: &str) -> i64 {
    pool.insert(&Subject::new(name, "#45B7D1", Some(2.0)))
        .expect("insert subject")
}

#[test]
fn test_fresh_database_has_no_pending_migrations() {
    let pool = pool("local");
    assert!(pending_migrations(&pool.conn).expect("pending").is_empty());

    let applied: Vec<_> = load_log(&pool.conn)
        .expect("log")
        .into_iter()
        .filter(|r| r.operation == "migration_applied")
        .collect();
    assert_eq!(applied.len(), 3);
}

#[test]
fn test_insert_find_update_delete() {
    let pool = pool("local");
    let id = add_subject(&pool, "Maths");

    let s: Subject = pool.find(id).expect("find");
    assert_eq!(s.name, "Maths");
    assert_eq!(s.coefficient, Some(2.0));
    assert!(!s.is_default);

    pool.update::<Subject>(id, &vec![("name", text("Mathematics")), ("coefficient", Value::Null)])
        .expect("update");
    let s: Subject = pool.find(id).expect("find");
    assert_eq!(s.name, "Mathematics");
    assert_eq!(s.coefficient, None);
    assert_eq!(s.effective_coefficient(), 1.0);

    pool.delete::<Subject>(id).expect("delete");
    assert!(matches!(
        pool.find::<Subject>(id),
        Err(AppError::NotFound { entity: "Subject", .. })
    ));
}

#[test]
fn test_missing_id_is_not_found() {
    let pool = pool("local");

    assert!(matches!(
        pool.find::<Grade>(42),
        Err(AppError::NotFound { entity: "Grade", id: 42 })
    ));
    assert!(matches!(
        pool.update::<Todo>(42, &vec![("title", text("x"))]),
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(pool.delete::<ScheduleEntry>(42), Err(AppError::NotFound { .. })));
}

#[test]
fn test_rows_are_scoped_to_owner() {
    let mut pool = pool("alice");
    let id = add_subject(&pool, "Maths");

    pool.owner = "bob".to_string();
    assert!(pool.select::<Subject>(&[], "").expect("select").is_empty());
    assert!(pool.find::<Subject>(id).is_err());
    assert!(pool.delete::<Subject>(id).is_err());

    pool.owner = "alice".to_string();
    assert_eq!(pool.select::<Subject>(&[], "").expect("select").len(), 1);
}

#[test]
fn test_deleting_subject_cascades() {
    let pool = pool("local");
    let maths = add_subject(&pool, "Maths");
    let art = add_subject(&pool, "Art");
    let date = NaiveDate::from_ymd_opt(2025, 10, 1).expect("date");

    for (subject, value) in [(maths, 12.0), (maths, 15.0), (art, 9.0)] {
        pool.insert(&Grade::new(subject, value, 20.0, 1.0, None, date))
            .expect("grade");
    }
    pool.insert(&ScheduleEntry::new(
        maths,
        Weekday::Mon,
        hm(9, 0),
        hm(10, 0),
        WeekParity::Both,
        Recurrence::Weekly,
    ))
    .expect("slot");

    pool.delete::<Subject>(maths).expect("delete");

    let grades = load_grades(&pool).expect("grades");
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].subject_id, art);
    assert!(load_schedule(&pool).expect("schedule").is_empty());
}

#[test]
fn test_round_trip_of_typed_columns() {
    let pool = pool("local");
    let subject = add_subject(&pool, "Physics");

    let id = pool
        .insert(&ScheduleEntry::new(
            subject,
            Weekday::Thu,
            hm(13, 30),
            hm(15, 0),
            WeekParity::Week2,
            Recurrence::Biweekly,
        ))
        .expect("slot");
    let e: ScheduleEntry = pool.find(id).expect("find");
    assert_eq!(e.day, Weekday::Thu);
    assert_eq!(e.start, hm(13, 30));
    assert_eq!(e.week, WeekParity::Week2);
    assert_eq!(e.recurrence, Recurrence::Biweekly);

    let due = NaiveDate::from_ymd_opt(2025, 11, 3);
    let mut todo = Todo::new("Revise", Priority::High, due);
    todo.formatting.bold = true;
    todo.formatting.highlight = Some("#FFF3BF".to_string());
    let id = pool.insert(&todo).expect("todo");
    let t: Todo = pool.find(id).expect("find");
    assert_eq!(t.priority, Priority::High);
    assert_eq!(t.due_date, due);
    assert!(t.formatting.bold);
    assert!(!t.formatting.italic);
    assert_eq!(t.formatting.highlight.as_deref(), Some("#FFF3BF"));
}

#[test]
fn test_find_subject_by_id_or_name() {
    let pool = pool("local");
    let id = add_subject(&pool, "Histoire");

    assert_eq!(find_subject(&pool, "histoire").expect("by name").id, id);
    assert_eq!(find_subject(&pool, &id.to_string()).expect("by id").id, id);
    assert!(matches!(
        find_subject(&pool, "Latin"),
        Err(AppError::UnknownSubject(_))
    ));
    assert!(matches!(
        find_subject(&pool, "999"),
        Err(AppError::UnknownSubject(_))
    ));
}
