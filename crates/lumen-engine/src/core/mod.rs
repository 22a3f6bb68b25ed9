//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and scenes: the
//! `App` callbacks and the explicit `SceneContext` every handler receives.

mod app;
mod ctx;
mod debug;

pub use app::{update_fn, App, AppControl, UpdateFn};
pub use ctx::SceneContext;
pub use debug::{DebugPanel, DEBUG_PANEL_TOGGLE_KEY};
