//! Error types for the polling monitor.
//!
//! `SchedulerError` covers misuse of the scheduler API (bad interval, restart
//! after stop). Fetch failures are not scheduler errors: they reach the
//! caller through the `on_error` callback as a `FetchError`.
use std::io;

use stock_common::FetchError;
use thiserror::Error;

/// Errors returned by `PollingScheduler` operations.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// The polling interval must be positive.
    #[error("Polling interval must be greater than zero")]
    InvalidInterval,

    /// The symbol to poll is empty.
    #[error("Symbol must not be empty")]
    InvalidSymbol,

    /// `start` was called on a running scheduler.
    #[error("Scheduler is already running")]
    AlreadyRunning,

    /// `start` was called after the scheduler stopped. Stopped is terminal.
    #[error("Scheduler has stopped and cannot be restarted")]
    Terminated,

    /// The worker thread could not be spawned.
    #[error("Failed to spawn polling thread: {0}")]
    Spawn(#[from] io::Error),

    /// The worker thread panicked.
    #[error("Polling thread panicked")]
    WorkerPanicked,
}

/// Top-level error of the `stock_monitor` binary.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The quote client could not be set up.
    #[error("Client setup failed: {0}")]
    Fetch(#[from] FetchError),

    /// The scheduler rejected an operation.
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// The Ctrl+C handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),
}
