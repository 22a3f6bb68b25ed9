//! In-memory doubles shared by unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::camera::PerspectiveCamera;
use crate::frame::{BlockingDisplaySync, DisplaySync, FrameHandle};
use crate::render::DrawSurface;
use crate::scene::SceneGraph;

/// Shared, ordered log of what happened during a test.
pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub log: EventLog,
    pub resizes: Vec<(f32, f32, f32)>,
    pub draws: u32,
    pub fail_draw: bool,
    pub projection_dirty_at_draw: Vec<bool>,
    /// Scene dirty flag consumed by each successful draw.
    pub scene_dirty_at_draw: Vec<bool>,
}

impl RecordingSurface {
    pub fn with_log(log: EventLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn resizes(&self) -> Vec<(f32, f32, f32)> {
        self.resizes.clone()
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        self.resizes.push((width, height, pixel_ratio));
    }

    fn draw(&mut self, scene: &mut SceneGraph, camera: &PerspectiveCamera) -> Result<()> {
        self.projection_dirty_at_draw.push(camera.is_projection_dirty());
        if self.fail_draw {
            bail!("draw failed");
        }
        self.scene_dirty_at_draw.push(scene.take_dirty());
        self.draws += 1;
        self.log.borrow_mut().push("draw".to_string());
        Ok(())
    }
}

/// Display sync that delivers a fixed number of refreshes, in request order.
#[derive(Default)]
pub(crate) struct ScriptedSync {
    next: u64,
    queued: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    pub remaining: u32,
    pub requested: u32,
}

impl ScriptedSync {
    pub fn with_budget(frames: u32) -> Self {
        Self {
            remaining: frames,
            ..Self::default()
        }
    }

    /// Queues a delivery for a handle nobody is waiting on, ahead of the rest.
    pub fn deliver_stale(&mut self, handle: FrameHandle) {
        self.queued.insert(0, handle);
    }
}

impl DisplaySync for ScriptedSync {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        self.requested += 1;
        let handle = FrameHandle::from_raw(self.next);
        self.queued.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queued.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

impl BlockingDisplaySync for ScriptedSync {
    fn wait_for_frame(&mut self) -> Option<FrameHandle> {
        if self.remaining == 0 || self.queued.is_empty() {
            return None;
        }
        self.remaining -= 1;
        Some(self.queued.remove(0))
    }
}
