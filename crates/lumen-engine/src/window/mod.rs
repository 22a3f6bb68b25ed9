//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the frame scheduler,
//! the resize contract and the GPU draw surface.

mod runtime;
mod sync;

pub use runtime::{Runtime, RuntimeConfig};
pub use sync::RedrawSync;
