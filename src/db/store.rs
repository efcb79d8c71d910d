//! Generic record store: select / insert / update / delete per entity.
//!
//! Every statement is scoped to `DbPool::owner`; a row owned by someone else
//! behaves exactly like a missing row.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use rusqlite::types::Value;
use rusqlite::{Row, params_from_iter};

/// A table-backed entity.
pub trait Record: Sized {
    /// Human-readable name used in messages (`Subject`, `Grade`, …).
    const ENTITY: &'static str;
    const TABLE: &'static str;
    /// Persisted columns, excluding `id` and `user_id`.
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    /// Values for [`Record::COLUMNS`], same order.
    fn values(&self) -> Vec<Value>;
}

/// Partial record for `update`: column → new value.
pub type Patch = Vec<(&'static str, Value)>;

impl DbPool {
    /// Rows matching every `column = value` pair of `filter`.
    ///
    /// `order` is a literal `ORDER BY` clause body such as `"name ASC"`.
    pub fn select<T: Record>(&self, filter: &[(&str, Value)], order: &str) -> AppResult<Vec<T>> {
        let mut sql = format!(
            "SELECT id, {} FROM {} WHERE user_id = ?1",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        for (i, (col, _)) in filter.iter().enumerate() {
            sql.push_str(&format!(" AND {} = ?{}", col, i + 2));
        }
        if !order.is_empty() {
            sql.push_str(&format!(" ORDER BY {order}"));
        }

        let mut args: Vec<Value> = vec![Value::Text(self.owner.clone())];
        args.extend(filter.iter().map(|(_, v)| v.clone()));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args), T::from_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Single row by id.
    pub fn find<T: Record>(&self, id: i64) -> AppResult<T> {
        self.select::<T>(&[("id", Value::Integer(id))], "")?
            .into_iter()
            .next()
            .ok_or(AppError::NotFound {
                entity: T::ENTITY,
                id,
            })
    }

    /// Insert a new row and return its id. `record`'s own id is ignored.
    pub fn insert<T: Record>(&self, record: &T) -> AppResult<i64> {
        let placeholders: Vec<String> = (0..=T::COLUMNS.len()).map(|i| format!("?{}", i + 1)).collect();
        let sql = format!(
            "INSERT INTO {} (user_id, {}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders.join(", ")
        );

        let mut args: Vec<Value> = vec![Value::Text(self.owner.clone())];
        args.extend(record.values());

        self.conn.execute(&sql, params_from_iter(args))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrite the given columns of row `id`.
    pub fn update<T: Record>(&self, id: i64, patch: &Patch) -> AppResult<()> {
        if patch.is_empty() {
            // still report unknown ids
            self.find::<T>(id)?;
            return Ok(());
        }

        let sets: Vec<String> = patch
            .iter()
            .enumerate()
            .map(|(i, (col, _))| format!("{} = ?{}", col, i + 1))
            .collect();
        let n = patch.len();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{} AND user_id = ?{}",
            T::TABLE,
            sets.join(", "),
            n + 1,
            n + 2
        );

        let mut args: Vec<Value> = patch.iter().map(|(_, v)| v.clone()).collect();
        args.push(Value::Integer(id));
        args.push(Value::Text(self.owner.clone()));

        let changed = self.conn.execute(&sql, params_from_iter(args))?;
        if changed == 0 {
            return Err(AppError::NotFound {
                entity: T::ENTITY,
                id,
            });
        }
        Ok(())
    }

    pub fn delete<T: Record>(&self, id: i64) -> AppResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1 AND user_id = ?2", T::TABLE);
        let changed = self
            .conn
            .execute(&sql, rusqlite::params![id, self.owner])?;

        if changed == 0 {
            return Err(AppError::NotFound {
                entity: T::ENTITY,
                id,
            });
        }
        Ok(())
    }
}

/// `Some(text)` → TEXT, `None` → NULL.
pub fn opt_text(v: Option<&str>) -> Value {
    v.map_or(Value::Null, |s| Value::Text(s.to_string()))
}

pub fn text(v: &str) -> Value {
    Value::Text(v.to_string())
}

pub fn bool_value(b: bool) -> Value {
    Value::Integer(if b { 1 } else { 0 })
}
