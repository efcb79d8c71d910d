//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! Every row in the store belongs to one owner; the pool carries the owner id
//! so the record store can scope all statements to it.

use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
    pub owner: String,
}

impl DbPool {
    /// Open (or create) the database file and bring its schema up to date.
    pub fn new(path: &str, owner: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::prepare(conn, owner)
    }

    /// Private, throw-away database. Used by tests and dry runs.
    pub fn in_memory(owner: &str) -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn, owner)
    }

    fn prepare(conn: Connection, owner: &str) -> AppResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_db(&conn)?;
        Ok(Self {
            conn,
            owner: owner.to_string(),
        })
    }
}
