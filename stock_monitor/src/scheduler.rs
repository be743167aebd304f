//! Fixed-rate quote polling.
//!
//! `PollingScheduler` owns one worker thread, the quote [`History`] and a small
//! state machine:
//!
//! ```text
//! Idle --start--> Running --fetch failure / stop--> Stopped (terminal)
//! ```
//!
//! Scheduling:
//! - Tick `k` is due at `origin + k * interval`; tick 0 fires immediately.
//!   Deadlines do not depend on how long earlier fetches took.
//! - Ticks are serialized on the single worker. When a fetch overruns one or
//!   more deadlines, the missed slots collapse into one tick that runs as soon
//!   as the fetch returns, and the schedule then continues on the original grid.
//!
//! Each tick fetches one quote. On success the quote is appended to the
//! history and `on_quote` is dispatched. On failure the failure class is
//! logged, the scheduler moves to `Stopped`, `on_error` is dispatched once and
//! the worker exits. Nothing is retried.
//!
//! Only the worker appends to the history. The state is shared with `stop()`
//! under a mutex; appending happens while that mutex is held, so a quote is
//! either recorded before a stop or discarded after it.
use std::io;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, error, info};
use stock_client::QuoteSource;
use stock_common::{FetchError, Quote};
use strum_macros::Display;

use crate::clock::{Clock, SystemClock, Wake};
use crate::dispatch::{Dispatcher, InlineDispatcher};
use crate::error::SchedulerError;
use crate::history::History;

/// Name given to the polling thread.
pub const WORKER_NAME: &str = "quote-poller";

type QuoteCallback = Arc<dyn Fn(Quote) + Send + Sync + 'static>;
type ErrorCallback = Box<dyn FnOnce(FetchError) + Send + 'static>;

/// Lifecycle of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SchedulerState {
    /// Created, not started yet.
    Idle,
    /// The worker is polling.
    Running,
    /// Stopped by a failure or by `stop()`. Terminal.
    Stopped,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Records the outcome of spawning the worker. The dispatcher went with the
/// worker, so a failed spawn leaves the scheduler `Stopped`.
fn launched<T>(state: &mut SchedulerState, spawned: io::Result<T>) -> Result<T, SchedulerError> {
    match spawned {
        Ok(handle) => {
            *state = SchedulerState::Running;
            Ok(handle)
        }
        Err(e) => {
            *state = SchedulerState::Stopped;
            Err(SchedulerError::Spawn(e))
        }
    }
}

/// Requests a stop from any thread.
#[derive(Clone)]
pub struct StopHandle {
    state: Arc<Mutex<SchedulerState>>,
    stop_tx: Sender<()>,
}

impl StopHandle {
    /// Move to `Stopped` and wake the worker. Calling it again does nothing.
    pub fn stop(&self) {
        {
            let mut state = lock(&self.state);
            if *state == SchedulerState::Stopped {
                return;
            }
            *state = SchedulerState::Stopped;
        }
        // a full channel already holds a pending stop
        let _ = self.stop_tx.try_send(());
        info!("Quote polling stop requested");
    }
}

/// Polls a [`QuoteSource`] on a fixed-rate timer.
pub struct PollingScheduler {
    source: Arc<dyn QuoteSource>,
    clock: Arc<dyn Clock>,
    dispatcher: Option<Box<dyn Dispatcher>>,
    history: Arc<Mutex<History>>,
    state: Arc<Mutex<SchedulerState>>,
    stop_tx: Sender<()>,
    stop_rx: Receiver<()>,
    worker: Option<JoinHandle<()>>,
}

impl PollingScheduler {
    /// Create an idle scheduler using the system clock, inline dispatch and an
    /// unbounded history.
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        Self {
            source,
            clock: Arc::new(SystemClock::new()),
            dispatcher: Some(Box::new(InlineDispatcher)),
            history: Arc::new(Mutex::new(History::new())),
            state: Arc::new(Mutex::new(SchedulerState::Idle)),
            stop_tx,
            stop_rx,
            worker: None,
        }
    }

    /// Use a different clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run callbacks through `dispatcher` instead of on the polling thread.
    pub fn with_dispatcher(mut self, dispatcher: impl Dispatcher + 'static) -> Self {
        self.dispatcher = Some(Box::new(dispatcher));
        self
    }

    /// Keep at most `limit` quotes, evicting the oldest.
    pub fn with_history_limit(mut self, limit: NonZeroUsize) -> Self {
        self.history = Arc::new(Mutex::new(History::with_limit(limit)));
        self
    }

    /// Start polling `symbol` every `interval_secs` seconds.
    ///
    /// `on_quote` receives every quote; `on_error` receives the failure that
    /// stopped polling, at most once.
    pub fn start<Q, E>(
        &mut self,
        interval_secs: u64,
        symbol: impl Into<String>,
        on_quote: Q,
        on_error: E,
    ) -> Result<(), SchedulerError>
    where
        Q: Fn(Quote) + Send + Sync + 'static,
        E: FnOnce(FetchError) + Send + 'static,
    {
        self.start_every(Duration::from_secs(interval_secs), symbol, on_quote, on_error)
    }

    /// Same as [`start`](Self::start) with an arbitrary positive interval.
    pub fn start_every<Q, E>(
        &mut self,
        interval: Duration,
        symbol: impl Into<String>,
        on_quote: Q,
        on_error: E,
    ) -> Result<(), SchedulerError>
    where
        Q: Fn(Quote) + Send + Sync + 'static,
        E: FnOnce(FetchError) + Send + 'static,
    {
        if interval.is_zero() {
            return Err(SchedulerError::InvalidInterval);
        }
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(SchedulerError::InvalidSymbol);
        }

        let mut state = lock(&self.state);
        match *state {
            SchedulerState::Idle => {}
            SchedulerState::Running => return Err(SchedulerError::AlreadyRunning),
            SchedulerState::Stopped => return Err(SchedulerError::Terminated),
        }
        let dispatcher = self.dispatcher.take().ok_or(SchedulerError::Terminated)?;

        let worker = Worker {
            source: Arc::clone(&self.source),
            clock: Arc::clone(&self.clock),
            dispatcher,
            history: Arc::clone(&self.history),
            state: Arc::clone(&self.state),
            stop_rx: self.stop_rx.clone(),
            symbol,
            interval,
            on_quote: Arc::new(on_quote),
            on_error: Some(Box::new(on_error)),
        };

        info!("Polling {} every {:?}", worker.symbol, worker.interval);
        let spawned = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || worker.run());
        self.worker = Some(launched(&mut state, spawned)?);
        Ok(())
    }

    /// Stop polling. Idempotent; an in-flight fetch finishes and is discarded.
    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    /// A handle that can stop this scheduler from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            state: Arc::clone(&self.state),
            stop_tx: self.stop_tx.clone(),
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        *lock(&self.state)
    }

    /// Copy of the recorded quotes, oldest first.
    pub fn history(&self) -> Vec<Quote> {
        lock(&self.history).snapshot()
    }

    /// Number of recorded quotes.
    pub fn history_len(&self) -> usize {
        lock(&self.history).len()
    }

    /// Wait for the worker thread to exit. Does not request a stop by itself.
    pub fn join(mut self) -> Result<(), SchedulerError> {
        match self.worker.take() {
            Some(handle) => handle.join().map_err(|_| SchedulerError::WorkerPanicked),
            None => Ok(()),
        }
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
        }
    }
}

enum TickOutcome {
    Continue,
    Halt,
}

/// Everything the polling thread owns.
struct Worker {
    source: Arc<dyn QuoteSource>,
    clock: Arc<dyn Clock>,
    dispatcher: Box<dyn Dispatcher>,
    history: Arc<Mutex<History>>,
    state: Arc<Mutex<SchedulerState>>,
    stop_rx: Receiver<()>,
    symbol: String,
    interval: Duration,
    on_quote: QuoteCallback,
    on_error: Option<ErrorCallback>,
}

impl Worker {
    fn run(mut self) {
        let origin = self.clock.now();
        let mut slot: u32 = 0;

        loop {
            let deadline = origin.saturating_add(self.interval.saturating_mul(slot));
            if self.clock.wait_until(deadline, &self.stop_rx) == Wake::Stopped {
                break;
            }
            if *lock(&self.state) == SchedulerState::Stopped {
                break;
            }

            debug!("Tick {} for {}", slot, self.symbol);
            if let TickOutcome::Halt = self.tick() {
                break;
            }

            let elapsed = self.clock.now().saturating_sub(origin);
            slot = next_slot(slot, elapsed, self.interval);
        }
        debug!("Polling thread for {} exiting", self.symbol);
    }

    fn tick(&mut self) -> TickOutcome {
        match self.source.fetch_quote(&self.symbol) {
            Ok(quote) => {
                {
                    let state = lock(&self.state);
                    if *state == SchedulerState::Stopped {
                        debug!("Discarding quote for {} fetched after stop", self.symbol);
                        return TickOutcome::Halt;
                    }
                    lock(&self.history).push(quote.clone());
                }
                info!(
                    "{}: {} @ {} ({})",
                    quote.symbol(),
                    quote.name(),
                    quote.price(),
                    quote.timestamp()
                );
                let on_quote = Arc::clone(&self.on_quote);
                self.dispatcher.dispatch(Box::new(move || on_quote(quote)));
                TickOutcome::Continue
            }
            Err(err) => {
                let already_stopped = {
                    let mut state = lock(&self.state);
                    let was_stopped = *state == SchedulerState::Stopped;
                    *state = SchedulerState::Stopped;
                    was_stopped
                };
                if already_stopped {
                    debug!("Discarding {} for {} after stop: {}", err.class(), self.symbol, err);
                    return TickOutcome::Halt;
                }

                error!(
                    "Polling {} stopped on {}: {}",
                    self.symbol,
                    err.class(),
                    err
                );
                if let Some(on_error) = self.on_error.take() {
                    self.dispatcher.dispatch(Box::new(move || on_error(err)));
                }
                TickOutcome::Halt
            }
        }
    }
}

/// Next slot to wait for after finishing `current` at `elapsed` since origin.
///
/// Normally `current + 1`. If the fetch ran past later deadlines, jumps to the
/// latest slot already due so that all missed slots produce a single tick.
fn next_slot(current: u32, elapsed: Duration, interval: Duration) -> u32 {
    let due = elapsed.as_nanos() / interval.as_nanos().max(1);
    let due = u32::try_from(due).unwrap_or(u32::MAX);
    current.saturating_add(1).max(due)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn next_slot_advances_by_one_on_time() {
        assert_eq!(next_slot(0, Duration::from_millis(20), SEC), 1);
        assert_eq!(next_slot(1, Duration::from_millis(1000), SEC), 2);
        assert_eq!(next_slot(4, Duration::from_millis(4999), SEC), 5);
    }

    #[test]
    fn next_slot_coalesces_missed_deadlines() {
        // fetch for slot 0 took 3.5 s: slots 1 and 2 are skipped, 3 is due now
        assert_eq!(next_slot(0, Duration::from_millis(3500), SEC), 3);
        assert_eq!(next_slot(3, Duration::from_millis(3600), SEC), 4);
    }

    #[test]
    fn failed_spawn_is_terminal() {
        let mut state = SchedulerState::Idle;
        let err = launched::<()>(&mut state, Err(io::Error::other("no threads left"))).unwrap_err();
        assert!(matches!(err, SchedulerError::Spawn(_)));
        assert_eq!(state, SchedulerState::Stopped);

        let mut state = SchedulerState::Idle;
        launched(&mut state, Ok(())).unwrap();
        assert_eq!(state, SchedulerState::Running);
    }

    #[test]
    fn state_names() {
        assert_eq!(SchedulerState::Running.to_string(), "Running");
    }
}
