//! Fullscreen toggling.
//!
//! The toggle only talks to a `FullscreenTarget`, so it runs the same against a
//! winit window or an in-memory double.

mod winit;

/// Presentation state after a toggle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FullscreenState {
    Windowed,
    Fullscreen,
    /// The platform cannot present this target fullscreen; nothing changed.
    Unsupported,
}

/// A surface that can be presented fullscreen.
pub trait FullscreenTarget {
    /// Whether fullscreen presentation is available at all.
    fn fullscreen_supported(&self) -> bool;

    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&self);

    fn exit_fullscreen(&self);
}

/// Fullscreen toggle that remembers what it last requested.
///
/// Some platforms (Wayland) only report the new state once the compositor has
/// applied it, so reading the target twice in quick succession would see
/// "windowed" both times. Until [`forget`](Self::forget) is called, the last
/// request is taken as the current state.
#[derive(Debug, Default)]
pub struct FullscreenToggle {
    requested: Option<bool>,
}

impl FullscreenToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters fullscreen when windowed and leaves it when fullscreen.
    ///
    /// Targets without fullscreen support are left untouched.
    pub fn toggle<T>(&mut self, target: &T) -> FullscreenState
    where
        T: FullscreenTarget + ?Sized,
    {
        if !target.fullscreen_supported() {
            log::warn!("fullscreen is not available on this target; ignoring toggle");
            return FullscreenState::Unsupported;
        }

        let fullscreen = self.requested.unwrap_or_else(|| target.is_fullscreen());
        self.requested = Some(!fullscreen);

        if fullscreen {
            target.exit_fullscreen();
            log::debug!("leaving fullscreen");
            FullscreenState::Windowed
        } else {
            target.request_fullscreen();
            log::debug!("entering fullscreen");
            FullscreenState::Fullscreen
        }
    }

    /// Drops the remembered request; the next toggle reads the target again.
    ///
    /// Call once the platform has reported a new window configuration.
    pub fn forget(&mut self) {
        self.requested = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeTarget {
        supported: bool,
        fullscreen: Cell<bool>,
        requests: Cell<u32>,
    }

    impl FakeTarget {
        fn new(supported: bool, fullscreen: bool) -> Self {
            Self {
                supported,
                fullscreen: Cell::new(fullscreen),
                requests: Cell::new(0),
            }
        }
    }

    impl FullscreenTarget for FakeTarget {
        fn fullscreen_supported(&self) -> bool {
            self.supported
        }

        fn is_fullscreen(&self) -> bool {
            self.fullscreen.get()
        }

        fn request_fullscreen(&self) {
            self.requests.set(self.requests.get() + 1);
            self.fullscreen.set(true);
        }

        fn exit_fullscreen(&self) {
            self.requests.set(self.requests.get() + 1);
            self.fullscreen.set(false);
        }
    }

    /// Applies requests only on `confirm`, like a compositor round-trip.
    struct LaggingTarget {
        fullscreen: Cell<bool>,
        pending: Cell<Option<bool>>,
    }

    impl LaggingTarget {
        fn new() -> Self {
            Self {
                fullscreen: Cell::new(false),
                pending: Cell::new(None),
            }
        }

        fn confirm(&self) {
            if let Some(state) = self.pending.take() {
                self.fullscreen.set(state);
            }
        }
    }

    impl FullscreenTarget for LaggingTarget {
        fn fullscreen_supported(&self) -> bool {
            true
        }

        fn is_fullscreen(&self) -> bool {
            self.fullscreen.get()
        }

        fn request_fullscreen(&self) {
            self.pending.set(Some(true));
        }

        fn exit_fullscreen(&self) {
            self.pending.set(Some(false));
        }
    }

    #[test]
    fn windowed_goes_fullscreen() {
        let t = FakeTarget::new(true, false);
        assert_eq!(FullscreenToggle::new().toggle(&t), FullscreenState::Fullscreen);
        assert!(t.is_fullscreen());
    }

    #[test]
    fn fullscreen_goes_windowed() {
        let t = FakeTarget::new(true, true);
        assert_eq!(FullscreenToggle::new().toggle(&t), FullscreenState::Windowed);
        assert!(!t.is_fullscreen());
    }

    #[test]
    fn double_toggle_restores_original_state() {
        for start in [false, true] {
            let t = FakeTarget::new(true, start);
            let mut toggle = FullscreenToggle::new();
            toggle.toggle(&t);
            toggle.toggle(&t);
            assert_eq!(t.is_fullscreen(), start);
            assert_eq!(t.requests.get(), 2);
        }
    }

    #[test]
    fn double_toggle_before_platform_confirms() {
        let t = LaggingTarget::new();
        let mut toggle = FullscreenToggle::new();

        assert_eq!(toggle.toggle(&t), FullscreenState::Fullscreen);
        assert_eq!(toggle.toggle(&t), FullscreenState::Windowed);
        t.confirm();

        assert!(!t.is_fullscreen());
    }

    #[test]
    fn forget_rereads_the_target() {
        let t = FakeTarget::new(true, false);
        let mut toggle = FullscreenToggle::new();
        toggle.toggle(&t);

        // Left fullscreen through the platform (e.g. a window manager shortcut).
        t.fullscreen.set(false);
        toggle.forget();

        assert_eq!(toggle.toggle(&t), FullscreenState::Fullscreen);
    }

    #[test]
    fn unsupported_target_is_a_no_op() {
        let t = FakeTarget::new(false, false);
        let mut toggle = FullscreenToggle::new();
        assert_eq!(toggle.toggle(&t), FullscreenState::Unsupported);
        assert!(!t.is_fullscreen());
        assert_eq!(t.requests.get(), 0);
    }
}
