//! Draw-surface contract and GPU renderers.
//!
//! The frame loop and the resize contract only see `DrawSurface`. The wgpu-backed
//! implementation lives in `device` and draws scene meshes with `LineRenderer`.

mod ctx;
mod lines;

use anyhow::Result;

use crate::camera::PerspectiveCamera;
use crate::scene::SceneGraph;

pub use ctx::RenderCtx;
pub use lines::{build_line_list, LineRenderer, LineVertex};

/// The single target a scene renders into.
pub trait DrawSurface {
    /// Resizes the backing buffer to `width x height` logical pixels at
    /// `pixel_ratio` physical pixels per logical pixel.
    ///
    /// `pixel_ratio` is already clamped by the caller. Zero-sized requests must be
    /// tolerated.
    fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32);

    /// Renders one frame. The camera projection is up to date when this runs.
    ///
    /// Surfaces that cache geometry consume the scene's dirty flag here.
    fn draw(&mut self, scene: &mut SceneGraph, camera: &PerspectiveCamera) -> Result<()>;
}
