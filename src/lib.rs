//! # Taskd - a small to-do HTTP service
//!
//! Tracks to-do tasks with optional due dates and automatically flips them
//! to "overdue" once their due date has passed.
//!
//! ## Features
//!
//! - **Task Management**: Create, read, update, and delete tasks over HTTP
//! - **Partial Updates**: Mutate any subset of a task's fields without
//!   clobbering the rest
//! - **Upsert by Id**: A full replace of a missing task falls back to
//!   creating it under the requested id
//! - **Overdue Sweeper**: A background worker that periodically flags tasks
//!   whose due date has elapsed
//! - **Graceful Shutdown**: In-flight sweeps finish before the process exits
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskd::db::{db::Db, tasks::TaskStore};
//! use taskd::libs::service::TaskService;
//! use taskd::libs::task::NewTask;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # fn main() -> anyhow::Result<()> {
//! let db = Db::open(Path::new("taskd.db"), Duration::from_secs(10))?;
//! let service = TaskService::new(TaskStore::new(db.conn()));
//! let task = service.create(&NewTask::new("pay rent"))?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod db;
pub mod libs;
