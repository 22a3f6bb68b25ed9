use anyhow::Result;
use lumen_engine::core::{App, AppControl, SceneContext};
use lumen_engine::time::FrameTime;
use lumen_engine::viewport::Viewport;

use super::add_cube;

/// Static cube; resizing and double-click fullscreen are handled by the runtime.
///
/// Logs each viewport change it observes.
#[derive(Debug, Default)]
pub struct FullscreenResize {
    last_viewport: Option<Viewport>,
}

impl App for FullscreenResize {
    fn setup(&mut self, ctx: &mut SceneContext) -> Result<()> {
        add_cube(&mut ctx.scene);
        log::info!("double-click to toggle fullscreen");
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext, _time: FrameTime) -> Result<AppControl> {
        let vp = ctx.viewport;
        if self.last_viewport != Some(vp) {
            log::debug!(
                "viewport {}x{} @{} (aspect {:?})",
                vp.width,
                vp.height,
                vp.pixel_ratio,
                vp.aspect()
            );
            self.last_viewport = Some(vp);
        }
        Ok(AppControl::Continue)
    }
}
