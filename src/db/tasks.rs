//! Task table operations.
//!
//! [`TaskStore`] owns the SQL for the `task` table: insert with
//! `RETURNING`, dynamically built partial updates that only name the
//! columns the caller touched, lookups, the past-due scan, and delete.
//! Constraint violations are translated into [`TaskError`] kinds here so
//! callers never see raw SQLite error codes.

use crate::db::db::SharedConn;
use crate::libs::error::TaskError;
use crate::libs::field::Field;
use crate::libs::task::{NewTask, Task, TaskPatch};
use chrono::NaiveDate;
use rusqlite::types::Null;
use rusqlite::{params, OptionalExtension, Row, ToSql};

const RETURNING: &str = "RETURNING id, title, description, due_date, completed, overdue";
const SELECT_TASKS: &str = "SELECT id, title, description, due_date, completed, overdue FROM task";
const INSERT_TASK: &str = "INSERT INTO task (id, title, description, due_date) VALUES (?1, ?2, ?3, ?4)";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_PAST_DUE: &str = "WHERE due_date IS NOT NULL AND due_date <= ?1 AND (overdue IS NULL OR overdue = 0)";
const DELETE_TASK: &str = "DELETE FROM task WHERE id = ?1";

#[derive(Clone)]
pub struct TaskStore {
    conn: SharedConn,
}

impl TaskStore {
    pub fn new(conn: SharedConn) -> Self {
        TaskStore { conn }
    }

    /// Inserts a new task and returns the fully materialized stored row,
    /// including column defaults for attributes the caller left unset.
    ///
    /// A NULL `id` lets SQLite assign the rowid; a supplied `id` that
    /// collides fails with [`TaskError::DuplicateId`]. An absent title
    /// violates the NOT NULL constraint and fails with
    /// [`TaskError::MissingTitle`] without persisting a row.
    pub fn insert(&self, new: &NewTask) -> Result<Task, TaskError> {
        let conn = self.conn.lock();
        let sql = format!("{INSERT_TASK} {RETURNING}");
        conn.query_row(
            &sql,
            params![new.id, new.title, new.description, new.due_date],
            map_task_row,
        )
        .map_err(TaskError::from_sqlite)
    }

    /// Rewrites exactly the columns named by `patch` on the row with `id`
    /// in one atomic statement, returning the post-update row.
    ///
    /// An empty patch degrades to a plain lookup. A patch that clears
    /// `title` to NULL fails with [`TaskError::MissingTitle`].
    pub fn update_partial(&self, id: i64, patch: &TaskPatch) -> Result<Task, TaskError> {
        if patch.is_empty() {
            return self.get_by_id(id);
        }

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        bind_column(&mut sets, &mut values, "title = ?", &patch.title);
        bind_column(&mut sets, &mut values, "description = ?", &patch.description);
        bind_column(&mut sets, &mut values, "due_date = ?", &patch.due_date);
        bind_column(&mut sets, &mut values, "completed = ?", &patch.completed);
        bind_column(&mut sets, &mut values, "overdue = ?", &patch.overdue);
        values.push(Box::new(id));

        let sql = format!("UPDATE task SET {} WHERE id = ? {RETURNING}", sets.join(", "));
        let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql).map_err(TaskError::from_sqlite)?;
        match stmt.query_row(&refs[..], map_task_row).optional() {
            Ok(Some(task)) => Ok(task),
            Ok(None) => Err(TaskError::NotFound),
            Err(err) => Err(TaskError::from_sqlite(err)),
        }
    }

    pub fn get_by_id(&self, id: i64) -> Result<Task, TaskError> {
        let conn = self.conn.lock();
        let sql = format!("{SELECT_TASKS} {WHERE_ID}");
        conn.query_row(&sql, params![id], map_task_row)
            .optional()?
            .ok_or(TaskError::NotFound)
    }

    /// Full scan; every row present exactly once, in rowid order.
    pub fn get_all(&self) -> Result<Vec<Task>, TaskError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_TASKS)?;
        let tasks = stmt
            .query_map([], map_task_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Rows whose due day has begun (`due_date <= today`) and which are
    /// not yet flagged overdue. The sweeper's read path.
    pub fn get_past_due(&self, today: NaiveDate) -> Result<Vec<Task>, TaskError> {
        let conn = self.conn.lock();
        let sql = format!("{SELECT_TASKS} {WHERE_PAST_DUE}");
        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![today], map_task_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Physically removes the row with `id`.
    pub fn delete(&self, id: i64) -> Result<(), TaskError> {
        let conn = self.conn.lock();
        let affected = conn.execute(DELETE_TASK, params![id])?;
        if affected == 0 {
            return Err(TaskError::NotFound);
        }
        Ok(())
    }
}

/// Appends a `SET` fragment and its bound value for a column the patch
/// names; `Unset` columns are skipped so they are never touched.
fn bind_column<T: ToSql + Clone + 'static>(
    sets: &mut Vec<&str>,
    values: &mut Vec<Box<dyn ToSql>>,
    fragment: &'static str,
    field: &Field<T>,
) {
    match field {
        Field::Unset => {}
        Field::Null => {
            sets.push(fragment);
            values.push(Box::new(Null));
        }
        Field::Set(value) => {
            sets.push(fragment);
            values.push(Box::new(value.clone()));
        }
    }
}

/// Maps a row in `SELECT_TASKS` column order. Nullable boolean columns
/// coalesce to false, matching the schema defaults.
fn map_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        completed: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
        overdue: row.get::<_, Option<bool>>(5)?.unwrap_or(false),
    })
}
