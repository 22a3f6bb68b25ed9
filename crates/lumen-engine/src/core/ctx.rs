use std::time::Duration;

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::config::LumenConfig;
use crate::input::{
    Cursor, DoubleClickDetector, InputAction, InputEvent, InputFrame, InputState, KeyState,
    MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};
use crate::render::DrawSurface;
use crate::scene::SceneGraph;
use crate::viewport::{apply_resize, ResizeOutcome, Viewport};

use super::debug::{DebugPanel, DEBUG_PANEL_TOGGLE_KEY};

/// Everything a scene's handlers may read or mutate.
///
/// Passed explicitly to the scheduler, the resize contract and input handling,
/// so several scenes can coexist and tests need no display surface.
#[derive(Debug)]
pub struct SceneContext {
    pub viewport: Viewport,
    pub camera: PerspectiveCamera,
    pub scene: SceneGraph,
    pub cursor: Cursor,
    pub debug_panel: DebugPanel,
    pub input: InputState,
    pub input_frame: InputFrame,

    double_click: DoubleClickDetector,
}

impl SceneContext {
    pub fn new(camera: PerspectiveCamera) -> Self {
        Self {
            viewport: Viewport::default(),
            camera,
            scene: SceneGraph::new(),
            cursor: Cursor::default(),
            debug_panel: DebugPanel::default(),
            input: InputState::default(),
            input_frame: InputFrame::default(),
            double_click: DoubleClickDetector::default(),
        }
    }

    /// Builds a context sized to the configured window with the configured camera.
    pub fn from_config(config: &LumenConfig) -> Self {
        let width = config.window.width as f32;
        let height = config.window.height as f32;
        let viewport = Viewport::new(width, height);

        let cam_cfg = &config.camera;
        let mut camera = PerspectiveCamera::new(
            cam_cfg.fov_y_deg,
            viewport.aspect().unwrap_or(1.0),
            cam_cfg.near,
            cam_cfg.far,
        );
        camera.set_position(Vec3::from_array(cam_cfg.position));
        camera.look_at(Vec3::ZERO);

        let mut ctx = Self::new(camera);
        ctx.viewport = viewport;
        ctx
    }

    /// Applies a resize notification to the viewport, camera and `surface`.
    ///
    /// The surface always receives `min(reported_pixel_ratio, 2)`.
    pub fn resize<S>(
        &mut self,
        surface: &mut S,
        width: f32,
        height: f32,
        reported_pixel_ratio: f32,
    ) -> ResizeOutcome
    where
        S: DrawSurface + ?Sized,
    {
        apply_resize(
            &mut self.viewport,
            &mut self.camera,
            surface,
            width,
            height,
            reported_pixel_ratio,
        )
    }

    /// Applies an input event received at time `at`.
    ///
    /// Pointer movement updates the cursor, the debug toggle key flips the debug
    /// panel, and a primary double click asks the host to toggle fullscreen.
    pub fn handle_input(&mut self, event: InputEvent, at: Duration) -> Option<InputAction> {
        let mut action = None;

        match &event {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.cursor.update(*x, *y, self.viewport);
            }

            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
                ..
            } if *key == DEBUG_PANEL_TOGGLE_KEY => {
                let visible = self.debug_panel.toggle();
                log::debug!("debug panel {}", if visible { "shown" } else { "hidden" });
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x,
                y,
                ..
            }) => {
                if self.double_click.register(*x, *y, at) {
                    action = Some(InputAction::ToggleFullscreen);
                }
            }

            InputEvent::Focused(false) => self.double_click.reset(),

            _ => {}
        }

        self.input.apply_event(&mut self.input_frame, event);
        action
    }

    /// Clears per-frame input deltas after a frame has been drawn.
    pub fn end_frame(&mut self) {
        self.input_frame.clear();
    }
}
