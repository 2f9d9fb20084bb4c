//! Domain error taxonomy for task operations.

use thiserror::Error;

/// Errors surfaced by the task store and service layers.
///
/// Storage-level constraint violations are translated into the domain kinds
/// (`DuplicateId`, `MissingTitle`) at the store boundary; anything else the
/// database reports stays an opaque [`TaskError::Storage`] and is never
/// retried by this layer.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task not found")]
    NotFound,
    #[error("task with given id already exists")]
    DuplicateId,
    #[error("task title is required")]
    MissingTitle,
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl TaskError {
    /// Maps a raw SQLite failure onto the domain taxonomy. A primary key
    /// violation on `id` means a create collided with an existing task; a
    /// not-null violation can only come from the `title` column.
    pub fn from_sqlite(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, _) = &err {
            match code.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => return TaskError::DuplicateId,
                rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL => return TaskError::MissingTitle,
                _ => {}
            }
        }
        TaskError::Storage(err)
    }
}
