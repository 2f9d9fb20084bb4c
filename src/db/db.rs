//! Core database connection management.
//!
//! [`Db`] opens the SQLite file, applies pending migrations, and hands out
//! the shared connection used by the task store. The connection is shared
//! between request handlers and the overdue sweeper behind a mutex; SQLite
//! linearizes each statement, so no further locking is imposed here.

use crate::db::migrations;
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The shared database connection handle.
///
/// Request handlers call the store directly from async context: every
/// statement is a short point operation bounded by `busy_timeout`, an
/// accepted trade-off for a single-connection SQLite service. The sweeper,
/// whose pass may run for a whole interval, does its storage work on the
/// blocking pool instead.
pub type SharedConn = Arc<Mutex<Connection>>;

pub struct Db {
    conn: SharedConn,
}

impl Db {
    /// Opens (or creates) the database at `path` and brings its schema up
    /// to date.
    ///
    /// `busy_timeout` bounds how long any single statement may wait on a
    /// locked database; once exceeded, the statement fails instead of
    /// hanging and surfaces as a storage error.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        migrations::run(&mut conn)?;
        info!(path = %path.display(), "database connected");

        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Returns a clone of the shared connection handle.
    pub fn conn(&self) -> SharedConn {
        self.conn.clone()
    }
}
