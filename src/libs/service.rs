//! Task mutation engine.
//!
//! [`TaskService`] is the single write path for tasks. It owns the
//! invariants the store cannot express on its own: recomputing `overdue`
//! whenever `due_date` changes, and the upsert-by-id fallback used when a
//! full replace targets a task that does not exist yet.

use crate::db::tasks::TaskStore;
use crate::libs::error::TaskError;
use crate::libs::field::Field;
use crate::libs::task::{NewTask, Task, TaskPatch};
use chrono::{Local, NaiveDate};
use tracing::error;

#[derive(Clone)]
pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        TaskService { store }
    }

    /// Creates a task from the attributes the caller set and returns the
    /// stored row.
    pub fn create(&self, new: &NewTask) -> Result<Task, TaskError> {
        self.store.insert(new).inspect_err(|err| {
            error!(%err, "failed to create task");
        })
    }

    /// Applies a partial update to the task with `id`.
    ///
    /// When the patch changes `due_date`, `overdue` is rederived from the
    /// new value and written in the same atomic statement, so a client
    /// moving a due date never leaves a stale overdue flag behind. A task
    /// is overdue from the start of its due day; a cleared due date forces
    /// `overdue` back to false.
    pub fn update(&self, id: i64, patch: TaskPatch) -> Result<Task, TaskError> {
        let mut patch = patch;
        match patch.due_date {
            Field::Set(due_date) => patch.overdue = Field::Set(due_date <= today()),
            Field::Null => patch.overdue = Field::Set(false),
            Field::Unset => {}
        }

        self.store.update_partial(id, &patch).inspect_err(|err| {
            error!(id, %err, "failed to update task");
        })
    }

    pub fn get_by_id(&self, id: i64) -> Result<Task, TaskError> {
        self.store.get_by_id(id)
    }

    pub fn get_all(&self) -> Result<Vec<Task>, TaskError> {
        self.store.get_all()
    }

    /// Partial update touching only the `completed` column.
    pub fn set_completed(&self, id: i64, completed: bool) -> Result<Task, TaskError> {
        self.update(id, TaskPatch::completed(completed))
    }

    /// Partial update touching only the `overdue` column. Written by the
    /// sweeper; not exposed over HTTP.
    pub fn set_overdue(&self, id: i64, overdue: bool) -> Result<Task, TaskError> {
        self.update(id, TaskPatch::overdue(overdue))
    }

    pub fn delete(&self, id: i64) -> Result<(), TaskError> {
        self.store.delete(id).inspect_err(|err| {
            error!(id, %err, "failed to delete task");
        })
    }

    /// Every task whose due day has begun and which is not yet flagged
    /// overdue, as of the local calendar date.
    pub fn tasks_past_due(&self) -> Result<Vec<Task>, TaskError> {
        self.store.get_past_due(today())
    }

    /// Full replace with upsert-by-id fallback.
    ///
    /// Runs an update writing every client-settable column; if no task
    /// with `id` exists, falls back to creating one under that id from the
    /// same field set. The boolean reports whether the task was created.
    /// Only [`TaskError::NotFound`] triggers the fallback; any other
    /// failure propagates untouched so real errors are never masked as
    /// creates.
    pub fn replace(&self, id: i64, new: &NewTask) -> Result<(Task, bool), TaskError> {
        match self.update(id, TaskPatch::replace_with(new)) {
            Ok(task) => Ok((task, false)),
            Err(TaskError::NotFound) => {
                let new = new.clone().with_id(id);
                Ok((self.create(&new)?, true))
            }
            Err(err) => Err(err),
        }
    }
}

/// The local calendar date used for all overdue comparisons. Both writers
/// of `overdue` (the due-date update path and the sweeper) derive from this
/// so they converge on the same value.
fn today() -> NaiveDate {
    Local::now().date_naive()
}
