use winit::window::{Fullscreen, Window};

use super::FullscreenTarget;

/// Borderless fullscreen on the window's current monitor.
///
/// Without a current monitor (headless sessions, some Wayland compositors before
/// the first configure) the window is treated as unable to go fullscreen.
impl FullscreenTarget for Window {
    fn fullscreen_supported(&self) -> bool {
        self.current_monitor().is_some()
    }

    /// Lags behind a request on Wayland until the compositor applies it.
    fn is_fullscreen(&self) -> bool {
        self.fullscreen().is_some()
    }

    fn request_fullscreen(&self) {
        self.set_fullscreen(Some(Fullscreen::Borderless(self.current_monitor())));
    }

    fn exit_fullscreen(&self) {
        self.set_fullscreen(None);
    }
}
