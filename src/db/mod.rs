//! Database layer for the taskd application.
//!
//! Provides the persistence layer built on SQLite: connection management,
//! versioned schema migrations, and the task table operations. All access
//! goes through a single shared connection handed out by [`db::Db`]; no
//! task state is cached in process.

/// Core database connection and initialization module.
pub mod db;

/// Database schema migration system.
pub mod migrations;

/// Task table operations: insert, partial update, lookups, delete.
pub mod tasks;
