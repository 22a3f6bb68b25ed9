//! Frame scheduling.
//!
//! One iteration is: read the clock, run the app update, refresh the camera
//! projection, draw, then ask the display-sync primitive for the next refresh.
//! Iterations never overlap and a failed update or draw ends the loop.

mod error;
mod scheduler;
mod sync;

pub use error::LoopError;
pub use scheduler::{FrameOutcome, FrameScheduler};
pub use sync::{BlockingDisplaySync, CancelToken, DisplaySync, FrameHandle};
