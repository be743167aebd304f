//! Quote polling monitor.
//!
//! This crate polls one symbol on a fixed-rate timer and hands every new quote
//! to a presentation collaborator. It wires together four building blocks:
//!
//! - `PollingScheduler` — owns the timer worker, the quote `History` and the
//!   `Idle → Running → Stopped` state machine. Any fetch failure stops it for good.
//! - `Clock` — the worker's notion of time. `SystemClock` in production,
//!   `ManualClock` when a test needs to step time by hand.
//! - `Dispatcher` — decides which thread runs the `on_quote`/`on_error`
//!   callbacks. `presentation_channel` marshals them onto a presentation loop.
//! - `ConsoleChart` — the text renderer used by the binary in place of a chart window.
//!
//! Concurrency and shutdown:
//! - Exactly one worker thread (`quote-poller`) fetches, appends and dispatches.
//!   Ticks never overlap; see [`scheduler`] for how late ticks are handled.
//! - `stop()` wakes the worker through a crossbeam channel. A fetch already in
//!   flight is not interrupted; its result is discarded.
#![warn(missing_docs)]
pub mod clock;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock, Wake};
pub use dispatch::{ChannelDispatcher, Dispatcher, InlineDispatcher, PresentationLoop, presentation_channel};
pub use error::{MonitorError, SchedulerError};
pub use history::History;
pub use scheduler::{PollingScheduler, SchedulerState, StopHandle};
