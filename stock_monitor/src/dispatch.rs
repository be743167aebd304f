//! Presentation executor.
//!
//! The scheduler never calls the presentation collaborator directly. It wraps
//! each notification in a [`Task`] and hands it to a [`Dispatcher`], which
//! decides where the task runs:
//!
//! - `InlineDispatcher` — on the polling thread itself.
//! - `ChannelDispatcher` — sent over a `crossbeam_channel` to a
//!   `PresentationLoop` that runs tasks on whichever thread drives it
//!   (typically `main`, the thread that owns the output surface).
//!
//! The loop ends once every dispatcher has been dropped, which happens when
//! the polling worker exits.
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use log::warn;

/// Unit of work marshaled to the presentation side.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs notification tasks somewhere.
pub trait Dispatcher: Send {
    /// Schedule `task` for execution.
    fn dispatch(&self, task: Task);
}

/// Runs every task immediately on the dispatching thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
    fn dispatch(&self, task: Task) {
        task();
    }
}

/// Sends tasks to a [`PresentationLoop`].
#[derive(Clone)]
pub struct ChannelDispatcher {
    tx: Sender<Task>,
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&self, task: Task) {
        if self.tx.send(task).is_err() {
            warn!("Presentation loop is gone; dropping notification");
        }
    }
}

/// Receiving end that executes dispatched tasks on the calling thread.
pub struct PresentationLoop {
    rx: Receiver<Task>,
}

impl PresentationLoop {
    /// Run tasks until every `ChannelDispatcher` has been dropped.
    /// Returns the number of tasks executed.
    pub fn run(self) -> usize {
        let mut executed = 0;
        for task in self.rx.iter() {
            task();
            executed += 1;
        }
        executed
    }

    /// Wait up to `timeout` for one task and run it. Returns `false` on timeout
    /// or when no dispatcher is left.
    pub fn run_next(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(task) => {
                task();
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Run every task that is already queued without blocking.
    pub fn drain(&self) -> usize {
        let mut executed = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            executed += 1;
        }
        executed
    }
}

/// Create a connected dispatcher/loop pair.
pub fn presentation_channel() -> (ChannelDispatcher, PresentationLoop) {
    let (tx, rx) = unbounded::<Task>();
    (ChannelDispatcher { tx }, PresentationLoop { rx })
}
