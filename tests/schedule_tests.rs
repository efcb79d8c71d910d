use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ech_db, init_empty, setup_test_db};

fn init_with_subject(db_path: &str) {
    init_empty(db_path);
    ech_db(db_path)
        .args(["subject", "add", "Maths", "--color", "Ocean"])
        .assert()
        .success();
}

#[test]
fn test_schedule_add_move_list() {
    let db_path = setup_test_db("schedule_move");
    init_with_subject(&db_path);

    ech_db(&db_path)
        .args(["schedule", "add", "Maths", "mon", "09:00", "--end", "11:00"])
        .assert()
        .success()
        .stdout(contains("Slot #1 added: Maths on Monday 09:00 - 11:00."));

    ech_db(&db_path)
        .args(["schedule", "move", "1", "2", "14"])
        .assert()
        .success()
        .stdout(contains("Slot #1 moved to Wednesday 14:00 - 16:00."));

    ech_db(&db_path)
        .args(["schedule", "list"])
        .assert()
        .success()
        .stdout(contains("Wednesday"))
        .stdout(contains("14:00 - 16:00"))
        .stdout(contains("Monday").not());
}

#[test]
fn test_schedule_default_length_is_one_hour() {
    let db_path = setup_test_db("schedule_default_len");
    init_with_subject(&db_path);

    ech_db(&db_path)
        .args(["schedule", "add", "maths", "vendredi", "15:30", "--week", "week2"])
        .assert()
        .success()
        .stdout(contains("Friday 15:30 - 16:30"));

    ech_db(&db_path)
        .args(["schedule", "list"])
        .assert()
        .success()
        .stdout(contains("S2"))
        .stdout(contains("weekly"));
}

#[test]
fn test_schedule_show_grid_and_week_filter() {
    let db_path = setup_test_db("schedule_show");
    init_with_subject(&db_path);

    ech_db(&db_path)
        .args(["schedule", "add", "Maths", "0", "10:00", "--end", "12:00", "--week", "week1"])
        .assert()
        .success();

    ech_db(&db_path)
        .args(["schedule", "show"])
        .assert()
        .success()
        .stdout(contains("Monday"))
        .stdout(contains("10:00"))
        .stdout(contains("Maths S1"))
        .stdout(contains("│"));

    ech_db(&db_path)
        .args(["schedule", "show", "--week", "week2"])
        .assert()
        .success()
        .stdout(contains("Maths").not());
}

#[test]
fn test_schedule_rejects_invalid_slots() {
    let db_path = setup_test_db("schedule_invalid");
    init_with_subject(&db_path);

    ech_db(&db_path)
        .args(["schedule", "add", "Maths", "mon", "11:00", "--end", "10:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time range"));

    ech_db(&db_path)
        .args(["schedule", "add", "Maths", "funday", "11:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid day"));

    ech_db(&db_path)
        .args(["schedule", "add", "Maths", "mon", "25:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time"));

    ech_db(&db_path)
        .args(["schedule", "add", "Maths", "mon", "22:00", "--end", "23:30"])
        .assert()
        .success();

    // 23:00 + one row would end past midnight
    ech_db(&db_path)
        .args(["schedule", "move", "1", "tue", "23"])
        .assert()
        .failure()
        .stderr(contains("Invalid time range"));
}

#[test]
fn test_schedule_delete() {
    let db_path = setup_test_db("schedule_del");
    init_with_subject(&db_path);

    ech_db(&db_path)
        .args(["schedule", "add", "Maths", "thu", "08:00"])
        .assert()
        .success();

    ech_db(&db_path)
        .args(["schedule", "del", "99"])
        .assert()
        .failure()
        .stderr(contains("Schedule entry #99 not found"));

    ech_db(&db_path)
        .args(["schedule", "del", "1"])
        .assert()
        .success()
        .stdout(contains("Slot #1 deleted."));

    ech_db(&db_path)
        .args(["schedule", "list"])
        .assert()
        .success()
        .stdout(contains("No slots in the timetable."));
}
