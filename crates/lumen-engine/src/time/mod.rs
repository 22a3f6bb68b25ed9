//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per scheduler (or per window)
//! - call `start()` once when the loop begins
//! - call `tick()` once per iteration to obtain `FrameTime`
//!
//! Elapsed time is always measured against a `TimeSource`, so tests can drive the
//! clock with `ManualTime` instead of sleeping.

mod clock;
mod frame_clock;

pub use clock::{Clock, ManualTime, MonotonicTime, TimeSource};
pub use frame_clock::{FrameClock, FrameTime};
