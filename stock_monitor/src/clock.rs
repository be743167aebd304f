//! Time source for the polling worker.
//!
//! The worker measures time as a `Duration` since the clock was created and
//! sleeps until absolute deadlines, which is what keeps the schedule
//! fixed-rate. Both clocks also watch the scheduler's stop channel while
//! waiting so that `stop()` takes effect without waiting out the interval.
//!
//! - `SystemClock` — backed by `std::time::Instant`, which is monotonic and
//!   immune to wall clock changes.
//! - `ManualClock` — never moves on its own; `advance` steps it and wakes
//!   every waiting thread. Used by tests to check tick times exactly.
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};

/// How often a `ManualClock` waiter re-checks the stop channel.
const MANUAL_POLL: Duration = Duration::from_millis(5);

/// Why `wait_until` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The deadline has been reached.
    Deadline,
    /// A stop was requested (or every stop sender is gone).
    Stopped,
}

/// Monotonic time source with interruptible waiting.
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;

    /// Block until `now() >= deadline` or until `stop` fires.
    fn wait_until(&self, deadline: Duration, stop: &Receiver<()>) -> Wake;
}

fn stop_requested(stop: &Receiver<()>) -> bool {
    !matches!(stop.try_recv(), Err(TryRecvError::Empty))
}

/// Wall-clock time measured with `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wait_until(&self, deadline: Duration, stop: &Receiver<()>) -> Wake {
        loop {
            if stop_requested(stop) {
                return Wake::Stopped;
            }
            let now = self.now();
            if now >= deadline {
                return Wake::Deadline;
            }
            match stop.recv_timeout(deadline - now) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return Wake::Stopped,
                Err(RecvTimeoutError::Timeout) => continue,
            }
        }
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
    moved: Condvar,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by` and wake all waiters.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.saturating_add(by);
        self.moved.notify_all();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_until(&self, deadline: Duration, stop: &Receiver<()>) -> Wake {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if stop_requested(stop) {
                return Wake::Stopped;
            }
            if *now >= deadline {
                return Wake::Deadline;
            }
            now = self
                .moved
                .wait_timeout(now, MANUAL_POLL)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn system_clock_returns_at_past_deadline() {
        let clock = SystemClock::new();
        let (_tx, rx) = bounded::<()>(1);
        assert_eq!(clock.wait_until(Duration::ZERO, &rx), Wake::Deadline);
    }

    #[test]
    fn system_clock_waits_for_deadline() {
        let clock = SystemClock::new();
        let (_tx, rx) = bounded::<()>(1);
        let deadline = clock.now() + Duration::from_millis(30);
        assert_eq!(clock.wait_until(deadline, &rx), Wake::Deadline);
        assert!(clock.now() >= deadline);
    }

    #[test]
    fn system_clock_wakes_on_stop() {
        let clock = SystemClock::new();
        let (tx, rx) = bounded::<()>(1);
        tx.send(()).unwrap();
        let before = Instant::now();
        assert_eq!(clock.wait_until(Duration::from_secs(60), &rx), Wake::Stopped);
        assert!(before.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn disconnected_stop_channel_counts_as_stop() {
        let clock = SystemClock::new();
        let (tx, rx) = bounded::<()>(1);
        drop(tx);
        assert_eq!(clock.wait_until(Duration::from_secs(60), &rx), Wake::Stopped);
    }

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(Duration::from_millis(1500));
        assert_eq!(clock.now(), Duration::from_millis(1500));
    }

    #[test]
    fn manual_clock_wakes_waiter_on_advance() {
        let clock = Arc::new(ManualClock::new());
        let (_tx, rx) = bounded::<()>(1);
        let waiter = {
            let clock = Arc::clone(&clock);
            thread::spawn(move || clock.wait_until(Duration::from_secs(1), &rx))
        };
        clock.advance(Duration::from_millis(400));
        clock.advance(Duration::from_millis(600));
        assert_eq!(waiter.join().unwrap(), Wake::Deadline);
    }

    #[test]
    fn manual_clock_wakes_waiter_on_stop() {
        let clock = Arc::new(ManualClock::new());
        let (tx, rx) = bounded::<()>(1);
        let waiter = {
            let clock = Arc::clone(&clock);
            thread::spawn(move || clock.wait_until(Duration::from_secs(1), &rx))
        };
        tx.send(()).unwrap();
        assert_eq!(waiter.join().unwrap(), Wake::Stopped);
    }
}
