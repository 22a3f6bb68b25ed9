use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time readings.
///
/// Readings are offsets from an arbitrary, fixed origin and must never decrease.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// `Instant`-backed time source.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced time source.
///
/// Clones share the same reading, so a test can keep one handle and pass another
/// to the clock under test.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `by`. Time never goes backwards.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs.max(0.0)));
    }
}

impl TimeSource for ManualTime {
    #[inline]
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Wall-clock stopwatch measuring time since `start()`.
///
/// Elapsed time is derived from the source on every query rather than accumulated
/// per frame, so it stays correct when the host stops delivering frames for a
/// while (hidden tab, minimized window, debugger pause).
#[derive(Debug, Clone)]
pub struct Clock<T: TimeSource = MonotonicTime> {
    source: T,
    started_at: Option<Duration>,
}

impl Clock<MonotonicTime> {
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }
}

impl Default for Clock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Clock<T> {
    pub fn with_source(source: T) -> Self {
        Self {
            source,
            started_at: None,
        }
    }

    /// Starts the clock. Has no effect if it is already running.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.source.now());
        }
    }

    /// Moves the start baseline to now. Elapsed time restarts from zero.
    pub fn restart(&mut self) {
        self.started_at = Some(self.source.now());
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Time since `start()`; zero while the clock has not been started.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(start) => self.source.now().saturating_sub(start),
            None => Duration::ZERO,
        }
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}
