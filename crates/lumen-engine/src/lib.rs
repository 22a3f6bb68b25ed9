//! Lumen engine crate.
//!
//! Host-side orchestration for real-time scenes: the frame scheduler, the
//! viewport resize contract, fullscreen toggling, and the winit/wgpu runtime that
//! binds them to a window.

pub mod camera;
pub mod config;
pub mod core;
pub mod device;
pub mod frame;
pub mod fullscreen;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod viewport;
pub mod window;

#[cfg(test)]
mod testing;
