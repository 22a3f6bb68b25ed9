//! Camera types.
//!
//! The projection matrix is cached and recomputed lazily: callers mark it dirty
//! (directly or through `set_aspect`) and the scheduler refreshes it before draw.

mod perspective;

pub use perspective::PerspectiveCamera;
