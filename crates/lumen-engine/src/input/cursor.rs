use crate::viewport::Viewport;

/// Pointer position normalised to the viewport.
///
/// Both axes span `[-0.5, 0.5]` with the origin at the viewport centre and `y`
/// pointing up.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

impl Cursor {
    /// Updates from a pointer position in logical pixels.
    ///
    /// Returns `false` and keeps the previous value while the viewport is empty.
    pub fn update(&mut self, x: f32, y: f32, viewport: Viewport) -> bool {
        if !viewport.is_valid() {
            return false;
        }
        self.x = x / viewport.width - 0.5;
        self.y = -(y / viewport.height - 0.5);
        true
    }
}
