//! Database schema migration management.
//!
//! Maintains a `migrations` table recording which schema versions have been
//! applied and runs any pending migrations inside a transaction during
//! database initialization.

use anyhow::Result;
use rusqlite::{params, Connection, Transaction};
use tracing::{debug, info};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema migration with its transformation function.
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// All migrations, in version order.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_task_table",
    up: create_task_table,
}];

/// Applies every migration newer than the database's current version.
pub fn run(conn: &mut Connection) -> Result<()> {
    conn.execute(MIGRATIONS_TABLE, [])?;
    let current = current_version(conn)?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        debug!(version = migration.version, name = migration.name, "applying migration");
        let tx = conn.transaction()?;
        (migration.up)(&tx)?;
        tx.execute(
            "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
            params![migration.version, migration.name],
        )?;
        tx.commit()?;
        info!(version = migration.version, name = migration.name, "migration applied");
    }

    Ok(())
}

/// Returns the highest applied migration version, or 0 for a fresh database.
pub fn current_version(conn: &Connection) -> Result<u32> {
    let version = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM migrations", [], |row| {
        row.get::<_, u32>(0)
    })?;
    Ok(version)
}

fn create_task_table(tx: &Transaction) -> Result<()> {
    tx.execute(
        "CREATE TABLE IF NOT EXISTS task (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            due_date DATE,
            completed BOOLEAN DEFAULT FALSE,
            overdue BOOLEAN DEFAULT FALSE
        )",
        [],
    )?;
    Ok(())
}
