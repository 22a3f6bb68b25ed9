use crate::input::Key;

/// Key that shows/hides the debug panel.
pub const DEBUG_PANEL_TOGGLE_KEY: Key = Key::H;

/// Visibility of the external debug-control panel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DebugPanel {
    visible: bool,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl DebugPanel {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flips visibility and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}
