//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `InputEvent`s.

mod cursor;
mod double_click;
mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use cursor::Cursor;
pub use double_click::DoubleClickDetector;
pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputAction,
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};
