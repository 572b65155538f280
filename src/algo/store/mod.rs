//! # Storage Layer
//!
//! Problems, tags and contests live in a single SQLite file (`algo.db`) inside
//! the configured datasource directory.
//!
//! ## Layout
//!
//! ```text
//! problems          one row per problem, slug is UNIQUE
//! tags              one row per distinct lowercase tag name
//! problem_tags      many-to-many join
//! contests          named groups of problems
//! contest_problems  ordered membership (position)
//! ```
//!
//! Ids are assigned by the caller as `MAX(id) + 1` (see the `next_*_id`
//! helpers) instead of relying on SQLite's rowid allocation, so slugs can be
//! derived before the row is written.
//!
//! ## Transactions
//!
//! The query helpers in [`problems`], [`tags`] and [`contests`] take a plain
//! `&Connection`. A `rusqlite::Transaction` derefs to one, so commands run
//! them inside [`Database::transaction`] and everything commits or rolls back
//! together. Only one connection is ever opened.

use crate::error::Result;
use crate::model::Difficulty;
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, Transaction};
use std::path::Path;

pub mod contests;
pub mod problems;
pub mod tags;

pub const DB_FILENAME: &str = "algo.db";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) `algo.db` inside `dir` and ensures the schema exists.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| crate::error::AlgoError::fs(dir, e))?;
        let path = dir.join(DB_FILENAME);
        log::debug!("opening database at {}", path.display());
        let db = Self {
            conn: Connection::open(&path)?,
        };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.migrate()?;
        Ok(db)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Runs `f` inside a transaction. Any error drops the transaction, which rolls it back.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let tx = self.conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        log::debug!("transaction committed");
        Ok(value)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS problems (
              id INTEGER PRIMARY KEY,
              title TEXT NOT NULL,
              slug TEXT NOT NULL UNIQUE,
              difficulty TEXT NOT NULL CHECK(difficulty IN ('easy', 'medium', 'hard')),
              solution_url TEXT NOT NULL DEFAULT '',
              note TEXT NOT NULL DEFAULT '',
              code_path TEXT,
              score INTEGER CHECK(score BETWEEN 0 AND 255),
              description TEXT NOT NULL DEFAULT '',
              created_at_ms INTEGER NOT NULL,
              updated_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tags (
              id INTEGER PRIMARY KEY,
              name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS problem_tags (
              problem_id INTEGER NOT NULL REFERENCES problems(id) ON DELETE CASCADE,
              tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
              PRIMARY KEY (problem_id, tag_id)
            );

            CREATE TABLE IF NOT EXISTS contests (
              id INTEGER PRIMARY KEY,
              title TEXT NOT NULL,
              kind TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL,
              UNIQUE (title, kind)
            );

            CREATE TABLE IF NOT EXISTS contest_problems (
              contest_id INTEGER NOT NULL REFERENCES contests(id) ON DELETE CASCADE,
              problem_id INTEGER NOT NULL REFERENCES problems(id) ON DELETE CASCADE,
              position INTEGER NOT NULL,
              PRIMARY KEY (contest_id, problem_id)
            );

            CREATE INDEX IF NOT EXISTS idx_problems_created ON problems(created_at_ms);
            CREATE INDEX IF NOT EXISTS idx_problem_tags_tag ON problem_tags(tag_id);
            "#,
        )?;
        Ok(())
    }
}

pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn from_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

impl ToSql for Difficulty {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Difficulty {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}
