use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use taskd::api;
use taskd::db::db::Db;
use taskd::db::tasks::TaskStore;
use taskd::libs::config::{Config, CONFIG_FILE_NAME};
use taskd::libs::service::TaskService;
use taskd::libs::sweeper::OverdueSweeper;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::read(&cli.config)?;
    info!("config loaded");

    let db = Db::open(
        Path::new(&config.db.path),
        Duration::from_secs(config.server.timeout_secs),
    )?;
    let service = TaskService::new(TaskStore::new(db.conn()));

    // Start the overdue tasks sweeper.
    let sweeper = OverdueSweeper::new(
        service.clone(),
        Duration::from_secs(config.worker.interval_secs),
    );
    let sweeper_handle = sweeper.start();

    // Start the HTTP server.
    let app = api::router(service);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.server.port)).await?;
    info!(port = config.server.port, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("http server stopped");

    // Stop the sweeper and wait for any in-flight sweep to finish before
    // the database connection is dropped.
    sweeper_handle.request_stop();
    sweeper_handle.wait_drained().await;
    drop(db);
    info!("stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for interrupt signal");
        return;
    }
    info!("got interrupt signal");
}
