use std::time::Duration;

/// Recognises two primary presses close together in time and space.
///
/// A recognised double click consumes both presses, so a third press starts a
/// new sequence.
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    max_interval: Duration,
    max_distance: f32,
    last: Option<(Duration, f32, f32)>,
}

impl Default for DoubleClickDetector {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), 4.0)
    }
}

impl DoubleClickDetector {
    pub fn new(max_interval: Duration, max_distance: f32) -> Self {
        Self {
            max_interval,
            max_distance,
            last: None,
        }
    }

    /// Registers a press at `(x, y)` logical pixels and time `at`.
    /// Returns `true` when it completes a double click.
    pub fn register(&mut self, x: f32, y: f32, at: Duration) -> bool {
        if let Some((t, lx, ly)) = self.last {
            let close_in_time = at.saturating_sub(t) <= self.max_interval;
            let close_in_space = (x - lx).hypot(y - ly) <= self.max_distance;
            if close_in_time && close_in_space {
                self.last = None;
                return true;
            }
        }
        self.last = Some((at, x, y));
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
