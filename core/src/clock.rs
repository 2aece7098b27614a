use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Why `Clock::wait` returned.
#[derive(Debug, PartialEq, Eq)]
pub enum Wake<T> {
    Event(T),
    Deadline,
    /// Every sender is gone; the deadline has still been waited out.
    Disconnected,
}

/// Where the run loop gets its time from.
///
/// Times are offsets from when the clock started.
pub trait Clock {
    fn now(&self) -> Duration;

    /// Blocks until something arrives on `inbound` or `deadline` passes.
    fn wait<T>(&mut self, inbound: &Receiver<T>, deadline: Duration) -> Wake<T>;
}

/// Wall-clock time.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
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
        self.start.elapsed()
    }

    fn wait<T>(&mut self, inbound: &Receiver<T>, deadline: Duration) -> Wake<T> {
        match inbound.recv_timeout(deadline.saturating_sub(self.now())) {
            Ok(event) => Wake::Event(event),
            Err(RecvTimeoutError::Timeout) => Wake::Deadline,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(deadline.saturating_sub(self.now()));
                Wake::Disconnected
            }
        }
    }
}

/// Logical time that only moves when waited on, jumping straight to the deadline.
///
/// Anything already queued is delivered without time passing.
#[derive(Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock::default()
    }

    fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn wait<T>(&mut self, inbound: &Receiver<T>, deadline: Duration) -> Wake<T> {
        match inbound.try_recv() {
            Ok(event) => Wake::Event(event),
            Err(TryRecvError::Empty) => {
                self.advance_to(deadline);
                Wake::Deadline
            }
            Err(TryRecvError::Disconnected) => {
                self.advance_to(deadline);
                Wake::Disconnected
            }
        }
    }
}

/// A fixed-rate source of ticks.
///
/// A ticker that falls behind drops the ticks it missed instead of firing them in a burst.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next: Duration,
}

impl Ticker {
    /// Ticks `hz` times a second, the first one a full period after `start`.
    pub fn new(hz: u32, start: Duration) -> Self {
        let period = Duration::from_secs(1) / hz.max(1);
        Ticker {
            period,
            next: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the next tick is due.
    pub fn deadline(&self) -> Duration {
        self.next
    }

    /// Whether a tick is due at `now`, scheduling the following one if so.
    pub fn fire(&mut self, now: Duration) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}
