use anyhow::Result;

use crate::input::InputEvent;
use crate::time::FrameTime;

use super::ctx::SceneContext;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by scenes.
pub trait App {
    /// Called once after the context is built and before the first frame.
    fn setup(&mut self, ctx: &mut SceneContext) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for every translated input event, after the context applied it.
    fn on_input(&mut self, ctx: &mut SceneContext, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called once per iteration, before the draw call.
    ///
    /// An error ends the frame loop.
    fn update(&mut self, ctx: &mut SceneContext, time: FrameTime) -> Result<AppControl>;
}

/// `App` backed by a plain update closure.
pub struct UpdateFn<F>(F);

/// Wraps an update closure as an `App`.
pub fn update_fn<F>(f: F) -> UpdateFn<F>
where
    F: FnMut(&mut SceneContext, FrameTime) -> Result<AppControl>,
{
    UpdateFn(f)
}

impl<F> App for UpdateFn<F>
where
    F: FnMut(&mut SceneContext, FrameTime) -> Result<AppControl>,
{
    fn update(&mut self, ctx: &mut SceneContext, time: FrameTime) -> Result<AppControl> {
        (self.0)(ctx, time)
    }
}

impl<A> App for Box<A>
where
    A: App + ?Sized,
{
    fn setup(&mut self, ctx: &mut SceneContext) -> Result<()> {
        (**self).setup(ctx)
    }

    fn on_input(&mut self, ctx: &mut SceneContext, event: &InputEvent) -> AppControl {
        (**self).on_input(ctx, event)
    }

    fn update(&mut self, ctx: &mut SceneContext, time: FrameTime) -> Result<AppControl> {
        (**self).update(ctx, time)
    }
}
