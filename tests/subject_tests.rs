use echampo::core::subjects::{SubjectEdit, SubjectLogic};
use echampo::db::log::load_log;
use echampo::db::pool::DbPool;
use echampo::db::queries::load_subjects;
use echampo::errors::AppError;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ech_db, init_db_with_data, init_empty, setup_test_db};

#[test]
fn test_duplicate_names_rejected_case_insensitively() {
    let pool = DbPool::in_memory("local").expect("db");
    SubjectLogic::add(&pool, "Maths", None, None).expect("add");

    assert!(matches!(
        SubjectLogic::add(&pool, "  maths ", None, None),
        Err(AppError::DuplicateSubject(_))
    ));
    assert!(matches!(
        SubjectLogic::add(&pool, "   ", None, None),
        Err(AppError::Empty(_))
    ));
    assert!(matches!(
        SubjectLogic::add(&pool, "Art", Some("not-a-color"), None),
        Err(AppError::InvalidColor(_))
    ));
    assert!(matches!(
        SubjectLogic::add(&pool, "Art", None, Some(-1.0)),
        Err(AppError::InvalidNumber(_))
    ));
}

#[test]
fn test_edit_keeps_unchanged_fields() {
    let pool = DbPool::in_memory("local").expect("db");
    let s = SubjectLogic::add(&pool, "Maths", Some("#45b7d1"), Some(3.0)).expect("add");
    assert_eq!(s.color, "#45B7D1");

    let edited = SubjectLogic::edit(
        &pool,
        "maths",
        &SubjectEdit {
            name: Some("Mathematics".to_string()),
            ..Default::default()
        },
    )
    .expect("edit");

    assert_eq!(edited.id, s.id);
    assert_eq!(edited.name, "Mathematics");
    assert_eq!(edited.color, "#45B7D1");
    assert_eq!(edited.coefficient, Some(3.0));

    // renaming to its own name is not a clash
    SubjectLogic::edit(
        &pool,
        "Mathematics",
        &SubjectEdit {
            name: Some("MATHEMATICS".to_string()),
            ..Default::default()
        },
    )
    .expect("self rename");
}

fn edit_log_rows(pool: &DbPool) -> usize {
    load_log(&pool.conn)
        .expect("log")
        .iter()
        .filter(|r| r.operation == "edit")
        .count()
}

#[test]
fn test_edit_without_changes_is_not_logged() {
    let pool = DbPool::in_memory("local").expect("db");
    SubjectLogic::add(&pool, "Maths", Some("Ocean"), Some(2.0)).expect("add");
    assert_eq!(edit_log_rows(&pool), 0);

    let same = SubjectLogic::edit(&pool, "Maths", &SubjectEdit::default()).expect("edit");
    assert_eq!(same.name, "Maths");
    assert_eq!(edit_log_rows(&pool), 0);

    // same values spelled differently
    SubjectLogic::edit(
        &pool,
        "Maths",
        &SubjectEdit {
            name: Some(" Maths ".to_string()),
            coefficient: Some(2.0),
            ..Default::default()
        },
    )
    .expect("edit");
    assert_eq!(edit_log_rows(&pool), 0);

    SubjectLogic::edit(
        &pool,
        "Maths",
        &SubjectEdit {
            coefficient: Some(4.0),
            ..Default::default()
        },
    )
    .expect("edit");
    assert_eq!(edit_log_rows(&pool), 1);
}

#[test]
fn test_seed_only_when_empty() {
    let pool = DbPool::in_memory("local").expect("db");

    let n = SubjectLogic::seed(&pool).expect("seed");
    assert!(n > 0);
    let subjects = load_subjects(&pool).expect("subjects");
    assert_eq!(subjects.len(), n);
    assert!(subjects.iter().all(|s| s.is_default));

    assert_eq!(SubjectLogic::seed(&pool).expect("seed again"), 0);
    assert_eq!(load_subjects(&pool).expect("subjects").len(), n);
}

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[test]
fn test_subject_add_and_list() {
    let db_path = setup_test_db("subject_list");
    init_empty(&db_path);

    ech_db(&db_path)
        .args(["subject", "list"])
        .assert()
        .success()
        .stdout(contains("No subjects yet."));

    ech_db(&db_path)
        .args(["subject", "add", "Philosophie", "--color", "Sage", "--coef", "2"])
        .assert()
        .success()
        .stdout(contains("Subject #1 'Philosophie' added"));

    ech_db(&db_path)
        .args(["subject", "add", "philosophie"])
        .assert()
        .failure()
        .stderr(contains("Subject already exists"));

    ech_db(&db_path)
        .args(["subject", "list"])
        .assert()
        .success()
        .stdout(contains("Philosophie"))
        .stdout(contains("--"));
}

#[test]
fn test_init_seeds_default_subjects() {
    let db_path = setup_test_db("subject_seed");

    ech_db(&db_path)
        .args(["init"])
        .assert()
        .success()
        .stdout(contains("default subjects"));

    ech_db(&db_path)
        .args(["subject", "list"])
        .assert()
        .success()
        .stdout(contains("Mathématiques"))
        .stdout(contains("Philosophie"));

    ech_db(&db_path)
        .args(["subject", "seed"])
        .assert()
        .success()
        .stdout(contains("nothing seeded"));
}

#[test]
fn test_subject_delete_asks_for_confirmation() {
    let db_path = setup_test_db("subject_del");
    init_db_with_data(&db_path);

    ech_db(&db_path)
        .args(["subject", "del", "History"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Deletion cancelled."));

    ech_db(&db_path)
        .args(["subject", "del", "History"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Subject 'History' deleted."));

    ech_db(&db_path)
        .args(["subject", "list"])
        .assert()
        .success()
        .stdout(contains("History").not());

    // grades went with it
    ech_db(&db_path)
        .args(["grade", "list"])
        .assert()
        .success()
        .stdout(contains("2025-10-15").not())
        .stdout(contains("2025-10-02"));

    ech_db(&db_path)
        .args(["subject", "del", "Maths", "--yes"])
        .assert()
        .success();

    ech_db(&db_path)
        .args(["grade", "list"])
        .assert()
        .success()
        .stdout(contains("No grades recorded."));
}

#[test]
fn test_subject_edit_cli() {
    let db_path = setup_test_db("subject_edit");
    init_db_with_data(&db_path);

    ech_db(&db_path)
        .args(["subject", "edit", "History", "--name", "Histoire", "--coef", "3"])
        .assert()
        .success()
        .stdout(contains("'Histoire' updated"));

    ech_db(&db_path)
        .args(["subject", "edit", "Latin", "--coef", "3"])
        .assert()
        .failure()
        .stderr(contains("Subject not found: Latin"));
}
