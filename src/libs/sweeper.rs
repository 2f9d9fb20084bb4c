//! Background worker that flags overdue tasks.
//!
//! [`OverdueSweeper`] runs as a single long-lived tokio task. On a fixed
//! interval it asks the task service for every task past its due date and
//! flips each one to overdue. Cancellation is observed only at loop
//! boundaries: a sweep already in progress always finishes, and the handle
//! returned by [`OverdueSweeper::start`] lets the shutdown path block until
//! the worker has fully drained.

use crate::libs::service::TaskService;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub struct OverdueSweeper {
    service: TaskService,
    interval: Duration,
    cancel: CancellationToken,
}

impl OverdueSweeper {
    pub fn new(service: TaskService, interval: Duration) -> Self {
        OverdueSweeper {
            service,
            interval,
            cancel: CancellationToken::new(),
        }
    }

    /// Spawns the sweep loop and returns the handle used to stop it.
    pub fn start(self) -> SweeperHandle {
        let cancel = self.cancel.clone();
        let task = tokio::spawn(self.run());
        SweeperHandle { cancel, task }
    }

    /// The sweep loop: wait for the next tick or cancellation, whichever
    /// comes first. No sweep starts once cancellation has been observed.
    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately.
        ticker.tick().await;
        info!(interval_secs = self.interval.as_secs(), "overdue sweeper started");

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("overdue sweeper cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    // The pass is synchronous storage work; run it on the
                    // blocking pool and await it so an in-flight sweep
                    // always finishes before the loop can exit.
                    let service = self.service.clone();
                    let interval = self.interval;
                    if let Err(err) = tokio::task::spawn_blocking(move || sweep_pass(&service, interval)).await {
                        error!(%err, "sweep pass panicked");
                    }
                }
            }
        }
    }

    /// Runs a single sweep pass inline.
    pub fn sweep(&self) {
        sweep_pass(&self.service, self.interval);
    }
}

/// A single sweep pass.
///
/// Each flagged task is updated independently: one failure is logged and
/// the rest of the batch continues. The pass is bounded by the sweep
/// interval; tasks left over when the deadline hits are deferred to the
/// next tick, which naturally re-selects anything still past-due and
/// unflagged. An issued write is never cut short.
fn sweep_pass(service: &TaskService, interval: Duration) {
    let deadline = Instant::now() + interval;
    let tasks = match service.tasks_past_due() {
        Ok(tasks) => tasks,
        Err(err) => {
            error!(%err, "failed to get tasks past due");
            return;
        }
    };
    info!(count = tasks.len(), "found overdue tasks");

    for task in &tasks {
        if Instant::now() >= deadline {
            warn!("sweep deadline exceeded, deferring remaining tasks to next tick");
            break;
        }
        match service.set_overdue(task.id, true) {
            Ok(_) => info!(id = task.id, "task flagged overdue"),
            Err(err) => warn!(id = task.id, %err, "failed to flag task overdue"),
        }
    }
}

/// Join point between the sweep loop and process shutdown.
pub struct SweeperHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Asks the sweeper to stop scheduling further ticks. Non-blocking and
    /// idempotent; an in-flight sweep is allowed to finish.
    pub fn request_stop(&self) {
        self.cancel.cancel();
    }

    /// Blocks until the sweep loop has fully exited. No timeout is applied
    /// here; a caller needing bounded shutdown wraps this in its own.
    pub async fn wait_drained(self) {
        if let Err(err) = self.task.await {
            error!(%err, "sweeper task panicked");
        }
    }
}
