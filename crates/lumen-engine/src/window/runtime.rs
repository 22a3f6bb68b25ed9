use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::{LumenConfig, WindowConfig};
use crate::core::{App, AppControl, SceneContext};
use crate::device::{Gpu, GpuInit};
use crate::frame::{FrameOutcome, FrameScheduler};
use crate::fullscreen::FullscreenToggle;
use crate::input::platform::winit::translate_window_event;
use crate::input::InputAction;

use super::sync::RedrawSync;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from(&WindowConfig::default())
    }
}

impl From<&WindowConfig> for RuntimeConfig {
    fn from(window: &WindowConfig) -> Self {
        Self {
            title: window.title.clone(),
            initial_size: LogicalSize::new(window.width as f64, window.height as f64),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs `app` until it exits, the window closes, or the
    /// frame loop fails. A loop failure is returned as the error.
    pub fn run<A>(config: &LumenConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let gpu_init = GpuInit {
            clear_color: config.render.clear_color(),
            ..GpuInit::default()
        };
        let ctx = SceneContext::from_config(config);
        let mut state = RuntimeState::new(RuntimeConfig::from(&config.window), gpu_init, ctx, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    window_config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    ctx: SceneContext,
    scheduler: FrameScheduler,
    entry: Option<WindowEntry>,
    fullscreen: FullscreenToggle,

    /// Counter backing `FrameHandle`s handed out by `RedrawSync`.
    issued: u64,
    setup_done: bool,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn new(window_config: RuntimeConfig, gpu_init: GpuInit, ctx: SceneContext, app: A) -> Self {
        Self {
            window_config,
            gpu_init,
            app,
            ctx,
            scheduler: FrameScheduler::new(),
            entry: None,
            fullscreen: FullscreenToggle::new(),
            issued: 0,
            setup_done: false,
            exit_requested: false,
            failure: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(self.window_config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        self.entry = Some(entry);
        Ok(())
    }

    /// Re-applies the resize contract from the window's current size.
    fn sync_viewport(&mut self, size: Option<PhysicalSize<u32>>) {
        let Self { ctx, entry, .. } = self;
        let Some(entry) = entry.as_mut() else {
            return;
        };

        entry.with_mut(|fields| {
            let scale = fields.window.scale_factor();
            let size = size.unwrap_or_else(|| fields.window.inner_size());
            let logical: LogicalSize<f64> = size.to_logical(scale);
            ctx.resize(
                fields.gpu,
                logical.width as f32,
                logical.height as f32,
                scale as f32,
            );
        });
    }

    fn start(&mut self) -> Result<()> {
        if !self.setup_done {
            self.app.setup(&mut self.ctx).context("scene setup failed")?;
            self.setup_done = true;
        }

        let Self { scheduler, entry, issued, .. } = self;
        if let Some(entry) = entry.as_ref() {
            let mut sync = RedrawSync::new(entry.borrow_window(), issued);
            scheduler.start(&mut sync);
        }
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        let Self { scheduler, entry, issued, .. } = self;
        if let Some(entry) = entry.as_ref() {
            let mut sync = RedrawSync::new(entry.borrow_window(), issued);
            scheduler.cancel(&mut sync);
        }
        self.entry = None;
        self.exit_requested = true;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Self { app, ctx, scheduler, entry, issued, .. } = self;
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let result = entry.with_mut(|fields| {
            fields.window.pre_present_notify();
            let mut sync = RedrawSync::new(fields.window, issued);
            scheduler.run_frame(ctx, fields.gpu, app, &mut sync)
        });

        match result {
            Ok(FrameOutcome::Scheduled(_)) => {}
            Ok(FrameOutcome::Stopped) => {
                // Redraws the platform issues on its own (expose, resize) arrive
                // with no pending request and are simply skipped.
                if self.scheduler.cancel_token().is_cancelled() {
                    self.shutdown(event_loop);
                }
            }
            Err(err) => self.fail(event_loop, anyhow::Error::new(err)),
        }
    }

    fn handle_input(&mut self, event_loop: &ActiveEventLoop, event: &WindowEvent) {
        let Some(entry) = self.entry.as_ref() else {
            return;
        };
        let scale = entry.borrow_window().scale_factor();

        let Some(ev) = translate_window_event(scale, &self.ctx.input, event) else {
            return;
        };

        let at = self.scheduler.elapsed();
        let action = self.ctx.handle_input(ev.clone(), at);

        if action == Some(InputAction::ToggleFullscreen) {
            if let Some(entry) = self.entry.as_ref() {
                self.fullscreen.toggle(entry.borrow_window());
            }
        }

        if self.app.on_input(&mut self.ctx, &ev) == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
            return;
        }

        self.sync_viewport(None);

        if let Err(e) = self.start() {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Frames are paced by redraw requests the scheduler issues itself.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        self.handle_input(event_loop, &event);
        if self.exit_requested {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                // A new configuration carries the platform's settled fullscreen state.
                self.fullscreen.forget();
                self.sync_viewport(Some(new_size));
            }

            WindowEvent::ScaleFactorChanged { .. } => self.sync_viewport(None),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
