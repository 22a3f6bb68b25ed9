use std::cell::Cell;
use std::rc::Rc;

/// Opaque token for one pending display-refresh request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Host primitive that schedules work on the next display refresh.
///
/// Implementations must never fall back to a fixed-interval timer.
pub trait DisplaySync {
    /// Requests one callback at the next refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraws a pending request. Unknown or already delivered handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Display sync that can be waited on from an explicit loop.
pub trait BlockingDisplaySync: DisplaySync {
    /// Blocks until a requested refresh is due and returns its handle.
    ///
    /// `None` means the host stopped delivering frames.
    fn wait_for_frame(&mut self) -> Option<FrameHandle>;
}

/// Shared stop flag.
///
/// Clones observe the same flag, so an update callback or event handler holding a
/// clone can stop the loop without a reference to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
