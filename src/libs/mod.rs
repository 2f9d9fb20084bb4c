//! Core library modules for the taskd application.

/// Application configuration loaded from a JSON file.
pub mod config;

/// Domain error taxonomy shared by the storage and service layers.
pub mod error;

/// Tri-state field representation for partial updates.
pub mod field;

/// Task mutation engine built on top of the task store.
pub mod service;

/// Background worker that flags overdue tasks.
pub mod sweeper;

/// Task entity and its partial representations.
pub mod task;
