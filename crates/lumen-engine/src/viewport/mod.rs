//! Viewport state and the resize contract.
//!
//! Canonical CPU space is logical pixels. The device pixel ratio reported by the
//! platform is stored alongside, and clamped before it reaches the draw surface.

mod resize;
mod size;

pub use resize::{apply_resize, clamp_pixel_ratio, ResizeOutcome, MAX_PIXEL_RATIO};
pub use size::Viewport;
