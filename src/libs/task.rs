//! Task entity and its partial representations.
//!
//! [`Task`] is a fully materialized stored row. [`NewTask`] carries the
//! attributes a caller may supply on create; [`TaskPatch`] names the subset
//! of columns an update should touch, using [`Field`] so "leave unchanged"
//! and "set to NULL" stay distinct.

use crate::libs::field::Field;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored to-do task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub overdue: bool,
}

/// Attributes for a task about to be created.
///
/// `id` may be supplied by the caller or left to the store to assign.
/// `title` is optional here so the store's NOT NULL constraint is the
/// single authority on the missing-title error.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(title: &str) -> Self {
        NewTask {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// The set of columns a partial update should rewrite.
///
/// Every field defaults to [`Field::Unset`], which keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Field<String>,
    pub description: Field<String>,
    pub due_date: Field<NaiveDate>,
    pub completed: Field<bool>,
    pub overdue: Field<bool>,
}

impl TaskPatch {
    /// True when no column is named by the patch.
    pub fn is_empty(&self) -> bool {
        self.title.is_unset()
            && self.description.is_unset()
            && self.due_date.is_unset()
            && self.completed.is_unset()
            && self.overdue.is_unset()
    }

    /// A patch touching only the `completed` column.
    pub fn completed(value: bool) -> Self {
        TaskPatch {
            completed: Field::Set(value),
            ..Default::default()
        }
    }

    /// A patch touching only the `overdue` column.
    pub fn overdue(value: bool) -> Self {
        TaskPatch {
            overdue: Field::Set(value),
            ..Default::default()
        }
    }

    /// A full-replace patch: every client-settable column is written, with
    /// absent optional attributes cleared to NULL.
    pub fn replace_with(new: &NewTask) -> Self {
        TaskPatch {
            title: new.title.clone().into(),
            description: new.description.clone().into(),
            due_date: new.due_date.into(),
            ..Default::default()
        }
    }
}
