use std::time::Duration;

use crate::core::{App, AppControl, SceneContext};
use crate::render::DrawSurface;
use crate::time::{FrameClock, FrameTime, MonotonicTime, TimeSource};

use super::error::LoopError;
use super::sync::{BlockingDisplaySync, CancelToken, DisplaySync, FrameHandle};

/// Result of one iteration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The next refresh was requested.
    Scheduled(FrameHandle),
    /// The loop is not running (never started, cancelled, or the app asked to exit).
    Stopped,
}

/// Drives update → draw → reschedule against a display-sync primitive.
///
/// At most one refresh request is pending at any time, and an iteration only runs
/// while one is pending, so iterations cannot overlap or run after cancellation.
pub struct FrameScheduler<T: TimeSource = MonotonicTime> {
    clock: FrameClock<T>,
    pending: Option<FrameHandle>,
    token: CancelToken,
    last_frame: Option<FrameTime>,
}

impl FrameScheduler<MonotonicTime> {
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }
}

impl Default for FrameScheduler<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FrameScheduler<T> {
    pub fn with_source(source: T) -> Self {
        Self {
            clock: FrameClock::with_source(source),
            pending: None,
            token: CancelToken::new(),
            last_frame: None,
        }
    }

    /// A handle observing (and able to set) this scheduler's stop flag.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Starts the clock and requests the first refresh.
    ///
    /// Returns the pending handle, or `None` if the loop was already cancelled.
    /// Calling `start` on a running loop returns the existing handle.
    pub fn start<D>(&mut self, sync: &mut D) -> Option<FrameHandle>
    where
        D: DisplaySync + ?Sized,
    {
        if self.token.is_cancelled() {
            return None;
        }
        if let Some(handle) = self.pending {
            return Some(handle);
        }

        self.clock.start();
        let handle = sync.request_frame();
        self.pending = Some(handle);
        log::debug!("frame loop started (first request {})", handle.raw());
        Some(handle)
    }

    /// Stops the loop and withdraws the pending request.
    pub fn cancel<D>(&mut self, sync: &mut D)
    where
        D: DisplaySync + ?Sized,
    {
        self.token.cancel();
        if let Some(handle) = self.pending.take() {
            sync.cancel_frame(handle);
        }
        log::debug!("frame loop cancelled");
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some() && !self.token.is_cancelled()
    }

    #[inline]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Wall-clock time since `start`.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Timing of the most recently completed iteration.
    #[inline]
    pub fn last_frame(&self) -> Option<FrameTime> {
        self.last_frame
    }

    /// Runs one iteration for the pending refresh.
    ///
    /// The draw call only runs after `app.update` returned successfully. Errors are
    /// fatal: the pending request is consumed and no further refresh is requested.
    pub fn run_frame<A, S, D>(
        &mut self,
        ctx: &mut SceneContext,
        surface: &mut S,
        app: &mut A,
        sync: &mut D,
    ) -> Result<FrameOutcome, LoopError>
    where
        A: App + ?Sized,
        S: DrawSurface + ?Sized,
        D: DisplaySync + ?Sized,
    {
        if self.token.is_cancelled() || self.pending.take().is_none() {
            return Ok(FrameOutcome::Stopped);
        }

        let time = self.clock.tick();

        let control = app.update(ctx, time).map_err(LoopError::Update)?;

        ctx.camera.refresh_projection();
        surface
            .draw(&mut ctx.scene, &ctx.camera)
            .map_err(LoopError::Draw)?;

        ctx.end_frame();
        self.last_frame = Some(time);

        if control == AppControl::Exit {
            log::debug!("app requested exit at frame {}", time.frame_index);
            self.token.cancel();
        }
        if self.token.is_cancelled() {
            return Ok(FrameOutcome::Stopped);
        }

        let next = sync.request_frame();
        self.pending = Some(next);
        Ok(FrameOutcome::Scheduled(next))
    }

    /// Explicit loop: waits on `sync` and runs iterations until cancelled, the app
    /// exits, or the host stops delivering refreshes.
    ///
    /// Deliveries for handles other than the pending one are ignored.
    pub fn run<A, S, D>(
        &mut self,
        ctx: &mut SceneContext,
        surface: &mut S,
        app: &mut A,
        sync: &mut D,
    ) -> Result<(), LoopError>
    where
        A: App + ?Sized,
        S: DrawSurface + ?Sized,
        D: BlockingDisplaySync + ?Sized,
    {
        if self.start(sync).is_none() {
            return Ok(());
        }

        while let Some(handle) = sync.wait_for_frame() {
            if self.pending != Some(handle) {
                continue;
            }
            if self.run_frame(ctx, surface, app, sync)? == FrameOutcome::Stopped {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LumenConfig;
    use crate::core::update_fn;
    use crate::scene::Node;
    use crate::testing::{EventLog, RecordingSurface, ScriptedSync};
    use crate::time::ManualTime;
    use anyhow::{anyhow, Result};

    fn ctx() -> SceneContext {
        SceneContext::from_config(&LumenConfig::default())
    }

    fn scheduler() -> (ManualTime, FrameScheduler<ManualTime>) {
        let time = ManualTime::new();
        (time.clone(), FrameScheduler::with_source(time))
    }

    // ── timing ────────────────────────────────────────────────────────────

    #[test]
    fn update_receives_elapsed_since_start() {
        let (time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::default();
        let mut seen = Vec::new();
        let mut app = update_fn(|_: &mut SceneContext, t: FrameTime| -> Result<AppControl> {
            seen.push(t.elapsed);
            Ok(AppControl::Continue)
        });

        time.advance_secs(7.0); // before start: not counted
        sched.start(&mut sync);
        time.advance_secs(1.0);
        sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        drop(app);
        assert_eq!(seen.len(), 1);
        assert!((seen[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn elapsed_is_wall_clock_across_pauses() {
        for pause in [0.0, 0.5, 3.0, 120.0] {
            let (time, mut sched) = scheduler();
            let mut c = ctx();
            let mut surface = RecordingSurface::default();
            let mut sync = ScriptedSync::default();
            let mut seen = Vec::new();
            let mut app = update_fn(|_: &mut SceneContext, t: FrameTime| -> Result<AppControl> {
                seen.push(t.elapsed);
                Ok(AppControl::Continue)
            });

            sched.start(&mut sync);
            time.advance_secs(0.016);
            sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();
            time.advance_secs(pause); // host stopped delivering frames
            time.advance_secs(0.016);
            sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();

            drop(app);
            let expected = 0.032 + pause;
            assert!((seen[1] - expected).abs() < 1e-6, "pause {pause}: got {}", seen[1]);
        }
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn update_precedes_draw_every_iteration() {
        let (time, mut sched) = scheduler();
        let log: EventLog = Default::default();
        let mut c = ctx();
        let mut surface = RecordingSurface::with_log(log.clone());
        let mut sync = ScriptedSync::with_budget(3);
        let update_log = log.clone();
        let mut app = update_fn(move |_: &mut SceneContext, _: FrameTime| -> Result<AppControl> {
            update_log.borrow_mut().push("update".to_string());
            time.advance_secs(0.016);
            Ok(AppControl::Continue)
        });

        sched.run(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["update", "draw", "update", "draw", "update", "draw"]
        );
    }

    #[test]
    fn projection_is_fresh_at_draw() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::default();
        let mut app = update_fn(|c: &mut SceneContext, _: FrameTime| -> Result<AppControl> {
            c.camera.set_aspect(2.0);
            Ok(AppControl::Continue)
        });

        sched.start(&mut sync);
        sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        assert_eq!(surface.projection_dirty_at_draw, vec![false]);
    }

    #[test]
    fn draw_consumes_scene_changes() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let cube = c.scene.add(Node::new("cube"));
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::with_budget(3);
        let mut app = update_fn(move |c: &mut SceneContext, t: FrameTime| -> Result<AppControl> {
            if t.frame_index == 1 {
                c.scene.set_visible(cube, false);
            }
            Ok(AppControl::Continue)
        });

        sched.run(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        assert_eq!(surface.scene_dirty_at_draw, vec![true, true, false]);
        assert!(!c.scene.is_dirty());
    }

    // ── rescheduling & cancellation ───────────────────────────────────────

    #[test]
    fn each_iteration_requests_exactly_one_refresh() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::with_budget(5);
        let mut app = update_fn(|_: &mut SceneContext, _: FrameTime| Ok(AppControl::Continue));

        sched.run(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        assert_eq!(surface.draws, 5);
        // initial request + one per iteration
        assert_eq!(sync.requested, 6);
        assert!(sched.is_running());
    }

    #[test]
    fn run_frame_without_start_does_nothing() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::default();
        let mut app = update_fn(|_: &mut SceneContext, _: FrameTime| Ok(AppControl::Continue));

        let out = sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        assert_eq!(out, FrameOutcome::Stopped);
        assert_eq!(surface.draws, 0);
        assert_eq!(sync.requested, 0);
    }

    #[test]
    fn cancel_withdraws_pending_request() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::default();
        let mut app = update_fn(|_: &mut SceneContext, _: FrameTime| Ok(AppControl::Continue));

        let first = sched.start(&mut sync).unwrap();
        sched.cancel(&mut sync);

        assert_eq!(sync.cancelled, vec![first]);
        assert!(!sched.is_running());
        let out = sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();
        assert_eq!(out, FrameOutcome::Stopped);
        assert_eq!(surface.draws, 0);
        assert_eq!(sched.start(&mut sync), None);
    }

    #[test]
    fn run_skips_deliveries_for_other_handles() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::with_budget(3);
        let mut app = update_fn(|_: &mut SceneContext, _: FrameTime| Ok(AppControl::Continue));

        // Delivered first, before the loop has requested anything.
        sync.deliver_stale(FrameHandle::from_raw(99));
        sched.run(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        // Three deliveries: the stray one, then two real iterations.
        assert_eq!(surface.draws, 2);
        assert_eq!(sync.requested, 3);
        assert_eq!(sched.pending(), Some(FrameHandle::from_raw(3)));
    }

    #[test]
    fn cancel_after_frames_withdraws_latest_request() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::default();
        let mut app = update_fn(|_: &mut SceneContext, _: FrameTime| Ok(AppControl::Continue));

        let first = sched.start(&mut sync).unwrap();
        sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();
        let out = sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();
        let FrameOutcome::Scheduled(latest) = out else {
            panic!("expected a scheduled frame, got {out:?}");
        };
        assert_ne!(latest, first);

        sched.cancel(&mut sync);

        assert_eq!(sync.cancelled, vec![latest]);
        assert_eq!(sched.pending(), None);
        let out = sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();
        assert_eq!(out, FrameOutcome::Stopped);
        assert_eq!(surface.draws, 2);
    }

    #[test]
    fn token_cancelled_during_update_stops_after_that_frame() {
        let (_time, mut sched) = scheduler();
        let token = sched.cancel_token();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::with_budget(10);
        let mut frames = 0;
        let mut app = update_fn(move |_: &mut SceneContext, _: FrameTime| -> Result<AppControl> {
            frames += 1;
            if frames == 2 {
                token.cancel();
            }
            Ok(AppControl::Continue)
        });

        sched.run(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        assert_eq!(surface.draws, 2);
        assert_eq!(sched.pending(), None);
    }

    #[test]
    fn app_exit_stops_loop() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::with_budget(10);
        let mut app = update_fn(|_: &mut SceneContext, t: FrameTime| -> Result<AppControl> {
            if t.frame_index == 0 {
                Ok(AppControl::Exit)
            } else {
                Ok(AppControl::Continue)
            }
        });

        sched.run(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        assert_eq!(surface.draws, 1);
        assert!(!sched.is_running());
        assert!(sched.cancel_token().is_cancelled());
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn update_error_is_fatal_and_skips_draw() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::with_budget(10);
        let mut app = update_fn(|_: &mut SceneContext, _: FrameTime| -> Result<AppControl> {
            Err(anyhow!("boom"))
        });

        let err = sched.run(&mut c, &mut surface, &mut app, &mut sync).unwrap_err();

        assert!(matches!(err, LoopError::Update(_)));
        assert_eq!(surface.draws, 0);
        assert!(surface.projection_dirty_at_draw.is_empty());
        assert_eq!(sync.requested, 1);
        assert!(!sched.is_running());
    }

    #[test]
    fn draw_error_is_fatal() {
        let (_time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface {
            fail_draw: true,
            ..Default::default()
        };
        let mut sync = ScriptedSync::with_budget(10);
        let mut app = update_fn(|_: &mut SceneContext, _: FrameTime| Ok(AppControl::Continue));

        let err = sched.run(&mut c, &mut surface, &mut app, &mut sync).unwrap_err();

        assert!(matches!(err, LoopError::Draw(_)));
        assert_eq!(sync.requested, 1);
        assert_eq!(sched.pending(), None);
    }

    // ── end to end ────────────────────────────────────────────────────────

    #[test]
    fn one_second_then_resize_scenario() {
        let (time, mut sched) = scheduler();
        let mut c = ctx();
        let mut surface = RecordingSurface::default();
        let mut sync = ScriptedSync::default();
        let mut last = 0.0;
        let mut app = update_fn(|_: &mut SceneContext, t: FrameTime| -> Result<AppControl> {
            last = t.elapsed;
            Ok(AppControl::Continue)
        });

        sched.start(&mut sync);
        time.advance_secs(1.0);
        sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        c.resize(&mut surface, 800.0, 600.0, 1.0);
        let aspect = c.camera.aspect();
        c.resize(&mut surface, 0.0, 0.0, 1.0);
        sched.run_frame(&mut c, &mut surface, &mut app, &mut sync).unwrap();

        drop(app);
        assert!((last - 1.0).abs() < 1e-3);
        assert_eq!(c.camera.aspect(), aspect);
        assert!((aspect - 800.0 / 600.0).abs() < 1e-6);
    }
}
