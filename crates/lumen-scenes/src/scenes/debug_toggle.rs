use anyhow::{Context as _, Result};
use lumen_engine::core::{App, AppControl, SceneContext};
use lumen_engine::input::{InputEvent, Key, KeyState};
use lumen_engine::scene::NodeId;
use lumen_engine::time::FrameTime;

use super::add_cube;

const ELEVATION_MIN: f32 = -3.0;
const ELEVATION_MAX: f32 = 3.0;
const ELEVATION_STEP: f32 = 0.25;

/// Cube settings editable through the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeSettings {
    pub elevation: f32,
    pub visible: bool,
}

impl Default for CubeSettings {
    fn default() -> Self {
        Self {
            elevation: 0.0,
            visible: true,
        }
    }
}

/// Cube tweakable through the debug panel.
///
/// H shows or hides the panel itself. While the panel is open, the up/down
/// arrows move the cube within the elevation range and V toggles its visibility.
#[derive(Debug, Default)]
pub struct DebugToggle {
    cube: Option<NodeId>,
    settings: CubeSettings,
}

impl DebugToggle {
    fn nudge(&mut self, delta: f32) {
        let elevation = self.settings.elevation + delta;
        self.settings.elevation = elevation.clamp(ELEVATION_MIN, ELEVATION_MAX);
    }
}

impl App for DebugToggle {
    fn setup(&mut self, ctx: &mut SceneContext) -> Result<()> {
        self.cube = Some(add_cube(&mut ctx.scene));
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut SceneContext, event: &InputEvent) -> AppControl {
        if !ctx.debug_panel.is_visible() {
            return AppControl::Continue;
        }

        if let InputEvent::Key {
            key,
            state: KeyState::Pressed,
            ..
        } = event
        {
            match key {
                Key::ArrowUp => self.nudge(ELEVATION_STEP),
                Key::ArrowDown => self.nudge(-ELEVATION_STEP),
                Key::V => self.settings.visible = !self.settings.visible,
                Key::Escape => return AppControl::Exit,
                _ => {}
            }
        }
        AppControl::Continue
    }

    fn update(&mut self, ctx: &mut SceneContext, _time: FrameTime) -> Result<AppControl> {
        let id = self.cube.context("debug toggle updated before setup")?;
        let cube = ctx.scene.node(id).context("cube node missing")?;
        let CubeSettings { elevation, visible } = self.settings;

        // Write only on change: every write marks the scene dirty.
        if cube.visible != visible {
            ctx.scene.set_visible(id, visible);
        }

        let cube = ctx.scene.node(id).context("cube node missing")?;
        if cube.transform.translation.y != elevation {
            let mut transform = cube.transform;
            transform.translation.y = elevation;
            ctx.scene.set_transform(id, transform);
        }

        Ok(AppControl::Continue)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lumen_engine::input::Modifiers;

    use super::*;
    use crate::scenes::test_support::{at, ctx};

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    fn send(app: &mut DebugToggle, c: &mut SceneContext, event: InputEvent) -> AppControl {
        c.handle_input(event.clone(), Duration::ZERO);
        app.on_input(c, &event)
    }

    fn cube_visible(c: &SceneContext) -> bool {
        let id = c.scene.find("cube").unwrap();
        c.scene.node(id).unwrap().visible
    }

    #[test]
    fn hiding_the_panel_keeps_the_cube() {
        let mut c = ctx();
        let mut app = DebugToggle::default();
        app.setup(&mut c).unwrap();

        send(&mut app, &mut c, press(Key::H));
        app.update(&mut c, at(0.1)).unwrap();

        assert!(!c.debug_panel.is_visible());
        assert!(cube_visible(&c));
    }

    #[test]
    fn visibility_is_its_own_setting() {
        let mut c = ctx();
        let mut app = DebugToggle::default();
        app.setup(&mut c).unwrap();

        send(&mut app, &mut c, press(Key::V));
        app.update(&mut c, at(0.0)).unwrap();
        assert!(!cube_visible(&c));
        assert!(c.debug_panel.is_visible());

        send(&mut app, &mut c, press(Key::V));
        app.update(&mut c, at(0.1)).unwrap();
        assert!(cube_visible(&c));
    }

    #[test]
    fn unchanged_settings_leave_scene_clean() {
        let mut c = ctx();
        let mut app = DebugToggle::default();
        app.setup(&mut c).unwrap();
        c.scene.take_dirty();

        app.update(&mut c, at(0.0)).unwrap();
        assert!(!c.scene.is_dirty());

        send(&mut app, &mut c, press(Key::ArrowUp));
        app.update(&mut c, at(0.1)).unwrap();
        assert!(c.scene.is_dirty());
    }

    #[test]
    fn arrows_move_cube_within_range() {
        let mut c = ctx();
        let mut app = DebugToggle::default();
        app.setup(&mut c).unwrap();

        for _ in 0..20 {
            send(&mut app, &mut c, press(Key::ArrowUp));
        }
        assert_eq!(app.settings.elevation, ELEVATION_MAX);

        send(&mut app, &mut c, press(Key::ArrowDown));
        app.update(&mut c, at(0.0)).unwrap();

        let id = c.scene.find("cube").unwrap();
        assert_eq!(c.scene.node(id).unwrap().transform.translation.y, 2.75);
    }

    #[test]
    fn hidden_panel_ignores_controls() {
        let mut c = ctx();
        let mut app = DebugToggle::default();
        app.setup(&mut c).unwrap();

        send(&mut app, &mut c, press(Key::H));
        send(&mut app, &mut c, press(Key::ArrowUp));
        send(&mut app, &mut c, press(Key::V));
        assert_eq!(app.settings, CubeSettings::default());
        assert_eq!(send(&mut app, &mut c, press(Key::Escape)), AppControl::Continue);
    }

    #[test]
    fn escape_with_panel_open_exits() {
        let mut c = ctx();
        let mut app = DebugToggle::default();
        app.setup(&mut c).unwrap();

        assert_eq!(send(&mut app, &mut c, press(Key::Escape)), AppControl::Exit);
    }
}
