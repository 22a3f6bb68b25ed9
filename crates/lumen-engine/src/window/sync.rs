use winit::window::Window;

use crate::frame::{DisplaySync, FrameHandle};

/// Display sync backed by `Window::request_redraw`.
///
/// winit delivers the request as `RedrawRequested`, paced by the compositor and
/// the surface's FIFO presentation.
pub struct RedrawSync<'a> {
    window: &'a Window,
    issued: &'a mut u64,
}

impl<'a> RedrawSync<'a> {
    /// `issued` must outlive individual frames so handles stay unique.
    pub fn new(window: &'a Window, issued: &'a mut u64) -> Self {
        Self { window, issued }
    }
}

impl DisplaySync for RedrawSync<'_> {
    fn request_frame(&mut self) -> FrameHandle {
        *self.issued = self.issued.wrapping_add(1);
        self.window.request_redraw();
        FrameHandle::from_raw(*self.issued)
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {
        // winit cannot withdraw a redraw request. The scheduler drops the pending
        // handle, so the stray `RedrawRequested` runs nothing.
    }
}
