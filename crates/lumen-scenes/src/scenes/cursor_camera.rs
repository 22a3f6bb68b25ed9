use std::f32::consts::TAU;

use anyhow::{Context as _, Result};
use glam::Vec3;
use lumen_engine::core::{App, AppControl, SceneContext};
use lumen_engine::scene::NodeId;
use lumen_engine::time::FrameTime;

use super::add_cube;

const ORBIT_RADIUS: f32 = 3.0;
const HEIGHT_SCALE: f32 = 5.0;

/// Camera orbiting the cube under pointer control.
///
/// Horizontal cursor travel across the window is one full turn; vertical
/// travel raises or lowers the camera.
#[derive(Debug, Default)]
pub struct CursorCamera {
    cube: Option<NodeId>,
}

impl App for CursorCamera {
    fn setup(&mut self, ctx: &mut SceneContext) -> Result<()> {
        self.cube = Some(add_cube(&mut ctx.scene));
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext, _time: FrameTime) -> Result<AppControl> {
        let id = self.cube.context("cursor camera updated before setup")?;
        let target = ctx
            .scene
            .node(id)
            .context("cube node missing")?
            .transform
            .translation;

        let angle = ctx.cursor.x * TAU;
        ctx.camera.set_position(Vec3::new(
            angle.sin() * ORBIT_RADIUS,
            ctx.cursor.y * HEIGHT_SCALE,
            angle.cos() * ORBIT_RADIUS,
        ));
        ctx.camera.look_at(target);

        Ok(AppControl::Continue)
    }
}
