//! Configuration management for the taskd application.
//!
//! Settings are read from a JSON file whose path comes from the `--config`
//! CLI flag. Every field has a default, and a missing file yields the
//! default configuration, so the service runs out of the box.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Database settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

/// HTTP server settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// TCP port the server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds; also bounds how long a storage
    /// statement may wait on a locked database.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Overdue sweeper settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorkerConfig {
    /// Seconds between sweep ticks; also the deadline for a single sweep.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

impl Config {
    /// Reads the configuration from `path`, falling back to defaults when
    /// the file does not exist.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig { path: default_db_path() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_db_path() -> String {
    "taskd.db".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_interval_secs() -> u64 {
    60
}
