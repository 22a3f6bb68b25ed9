use anyhow::{Context as _, Result};
use glam::Vec3;
use lumen_engine::core::{App, AppControl, SceneContext};
use lumen_engine::scene::NodeId;
use lumen_engine::time::FrameTime;

use super::add_cube;

/// Cube spinning about Y while the camera circles it in the XY plane.
#[derive(Debug, Default)]
pub struct SpinningCube {
    cube: Option<NodeId>,
}

impl App for SpinningCube {
    fn setup(&mut self, ctx: &mut SceneContext) -> Result<()> {
        self.cube = Some(add_cube(&mut ctx.scene));
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext, time: FrameTime) -> Result<AppControl> {
        let id = self.cube.context("spinning cube updated before setup")?;
        let t = time.elapsed as f32;

        let cube = ctx.scene.node_mut(id).context("cube node missing")?;
        cube.transform.rotation.y = t;
        let target = cube.transform.translation;

        let z = ctx.camera.position.z;
        ctx.camera.set_position(Vec3::new(t.cos(), t.sin(), z));
        ctx.camera.look_at(target);

        Ok(AppControl::Continue)
    }
}
