use std::time::Duration;

use super::clock::{Clock, MonotonicTime, TimeSource};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Wall-clock seconds since the loop started. Never clamped.
    pub elapsed: f64,

    /// Time since the previous iteration, in seconds (clamped).
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `elapsed` comes straight from the underlying `Clock` and therefore includes
/// any pause between frames. Delta time is clamped to avoid pathological values
/// when the application is paused by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock<T: TimeSource = MonotonicTime> {
    clock: Clock<T>,
    last: Duration,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock<MonotonicTime> {
    /// Creates a new clock with default clamps.
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }
}

impl Default for FrameClock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FrameClock<T> {
    /// Creates a clock over `source` with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents simulation explosions after long stalls
    pub fn with_source(source: T) -> Self {
        Self::with_clamps(
            source,
            Duration::from_micros(100), // 0.0001s
            Duration::from_millis(250), // 0.25s
        )
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(source: T, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            clock: Clock::with_source(source),
            last: Duration::ZERO,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Starts measuring. Idempotent.
    pub fn start(&mut self) {
        if !self.clock.is_running() {
            self.clock.start();
            self.last = Duration::ZERO;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Current elapsed time without advancing the frame counter.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let elapsed = self.clock.elapsed();
        let dt = elapsed
            .saturating_sub(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = elapsed;

        let ft = FrameTime {
            elapsed: elapsed.as_secs_f64(),
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}
