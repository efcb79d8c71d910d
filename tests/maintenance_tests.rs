use predicates::str::contains;
use std::env;
use std::fs;
use std::path::Path;

mod common;
use common::{ech, ech_db, init_db_with_data, init_empty, setup_test_db, temp_out};

#[test]
fn test_help_lists_commands() {
    ech()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("grade"))
        .stdout(contains("schedule"))
        .stdout(contains("todo"));
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates");

    ech_db(&db_path)
        .args(["init", "--empty"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(Path::new(&db_path).exists());
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db_with_data(&db_path);

    ech_db(&db_path)
        .args(["db", "--info"])
        .assert()
        .success()
        .stdout(contains("grades"))
        .stdout(contains("2025-09-10"))
        .stdout(contains("up to date"));

    ech_db(&db_path)
        .args(["db", "--check", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed."))
        .stdout(contains("Vacuum completed."));

    ech_db(&db_path)
        .args(["db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Schema is up to date."));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_data(&db_path);

    ech_db(&db_path)
        .args(["grade", "del", "1"])
        .assert()
        .success();

    ech_db(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("init"))
        .stdout(contains("(subject#1)"))
        .stdout(contains("Deleted grade 10/20"));
}

#[test]
fn test_backup_plain_copy() {
    let db_path = setup_test_db("backup_plain");
    let out = temp_out("backup_plain", "sqlite");
    init_empty(&db_path);

    ech_db(&db_path)
        .args(["backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    let original = fs::metadata(&db_path).expect("db").len();
    let copy = fs::metadata(&out).expect("backup").len();
    assert_eq!(original, copy);
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("backup_zip");
    let out = temp_out("backup_zip", "sqlite");
    let zip_path = temp_out("backup_zip", "zip");
    init_db_with_data(&db_path);

    ech_db(&db_path)
        .args(["backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains(".zip"));

    assert!(Path::new(&zip_path).exists());
    let bytes = fs::read(&zip_path).expect("zip");
    assert_eq!(&bytes[..2], b"PK");

    // declining leaves the archive alone
    ech_db(&db_path)
        .args(["backup", "--file", &out, "--compress"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Backup cancelled"));
}

#[test]
fn test_config_print_in_test_mode() {
    let db_path = setup_test_db("config_print");

    ech_db(&db_path)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("owner"))
        .stdout(contains("due_soon_days"));
}

#[cfg(unix)]
#[test]
fn test_relative_db_lives_in_config_dir() {
    let base = env::temp_dir().join("echampo_relative_db");
    let home = base.join("home");
    let cwd = base.join("cwd");
    fs::remove_dir_all(&base).ok();
    fs::create_dir_all(&home).expect("home");
    fs::create_dir_all(&cwd).expect("cwd");

    let run = |args: &[&str]| {
        let mut cmd = ech();
        cmd.env("HOME", &home)
            .current_dir(&cwd)
            .args(["--db", "rel.sqlite", "--test"])
            .args(args);
        cmd
    };

    run(&["init", "--empty"]).assert().success();
    run(&["subject", "add", "Maths"]).assert().success();
    run(&["subject", "list"])
        .assert()
        .success()
        .stdout(contains("Maths"));

    assert!(home.join(".echampo").join("rel.sqlite").exists());
    assert!(!cwd.join("rel.sqlite").exists());
}
