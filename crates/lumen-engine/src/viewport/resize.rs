use crate::camera::PerspectiveCamera;
use crate::render::DrawSurface;

use super::Viewport;

/// Upper bound for the pixel scale handed to draw surfaces.
///
/// Fixed: every resize hands `min(reported, 2)` to the surface, whatever the
/// hardware reports.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// What a resize notification ended up changing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResizeOutcome {
    /// Pixel scale passed to the draw surface.
    pub applied_pixel_ratio: f32,

    /// Whether the camera aspect was recomputed (both dimensions positive).
    pub projection_updated: bool,
}

/// Returns `min(reported, MAX_PIXEL_RATIO)`.
///
/// Non-finite or non-positive reports fall back to `1.0`.
#[inline]
pub fn clamp_pixel_ratio(reported: f32) -> f32 {
    if !reported.is_finite() || reported <= 0.0 {
        return 1.0;
    }
    reported.min(MAX_PIXEL_RATIO)
}

/// Applies a resize notification to the viewport, camera and draw surface.
///
/// The stored size is always updated. The camera aspect is only recomputed when
/// both dimensions are positive; otherwise the projection keeps its previous
/// aspect until a usable size arrives.
pub fn apply_resize<S>(
    viewport: &mut Viewport,
    camera: &mut PerspectiveCamera,
    surface: &mut S,
    width: f32,
    height: f32,
    reported_pixel_ratio: f32,
) -> ResizeOutcome
where
    S: DrawSurface + ?Sized,
{
    viewport.width = width;
    viewport.height = height;
    viewport.pixel_ratio = reported_pixel_ratio;

    let projection_updated = match viewport.aspect() {
        Some(aspect) => {
            camera.set_aspect(aspect);
            true
        }
        None => {
            log::debug!("resize to {width}x{height} deferred: viewport is empty");
            false
        }
    };

    let applied_pixel_ratio = clamp_pixel_ratio(reported_pixel_ratio);
    surface.resize(width, height, applied_pixel_ratio);

    log::debug!(
        "viewport resized to {}x{} @ {} (reported {})",
        width,
        height,
        applied_pixel_ratio,
        reported_pixel_ratio
    );

    ResizeOutcome {
        applied_pixel_ratio,
        projection_updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0)
    }

    // ── clamp_pixel_ratio ─────────────────────────────────────────────────

    #[test]
    fn clamps_high_ratio_to_two() {
        assert_eq!(clamp_pixel_ratio(4.0), 2.0);
        assert_eq!(clamp_pixel_ratio(2.5), 2.0);
    }

    #[test]
    fn keeps_low_ratio() {
        assert_eq!(clamp_pixel_ratio(1.0), 1.0);
        assert_eq!(clamp_pixel_ratio(1.5), 1.5);
    }

    #[test]
    fn bogus_ratio_falls_back_to_one() {
        assert_eq!(clamp_pixel_ratio(0.0), 1.0);
        assert_eq!(clamp_pixel_ratio(-3.0), 1.0);
        assert_eq!(clamp_pixel_ratio(f32::NAN), 1.0);
    }

    // ── apply_resize ──────────────────────────────────────────────────────

    #[test]
    fn resize_updates_aspect_and_marks_projection_dirty() {
        let mut viewport = Viewport::default();
        let mut cam = camera();
        cam.update_projection_matrix();
        let mut surface = RecordingSurface::default();

        let out = apply_resize(&mut viewport, &mut cam, &mut surface, 800.0, 600.0, 1.0);

        assert!(out.projection_updated);
        assert_eq!(viewport, Viewport::new(800.0, 600.0));
        assert!((cam.aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert!(cam.is_projection_dirty());
        assert_eq!(surface.resizes(), vec![(800.0, 600.0, 1.0)]);
    }

    #[test]
    fn surface_receives_clamped_ratio() {
        let mut viewport = Viewport::default();
        let mut cam = camera();
        let mut surface = RecordingSurface::default();

        let out = apply_resize(&mut viewport, &mut cam, &mut surface, 390.0, 844.0, 4.0);

        assert_eq!(out.applied_pixel_ratio, 2.0);
        assert_eq!(viewport.pixel_ratio, 4.0);
        assert_eq!(surface.resizes(), vec![(390.0, 844.0, 2.0)]);
    }

    #[test]
    fn zero_size_defers_projection_update() {
        let mut viewport = Viewport::default();
        let mut cam = camera();
        let mut surface = RecordingSurface::default();

        apply_resize(&mut viewport, &mut cam, &mut surface, 800.0, 600.0, 1.0);
        cam.update_projection_matrix();

        let out = apply_resize(&mut viewport, &mut cam, &mut surface, 0.0, 0.0, 1.0);

        assert!(!out.projection_updated);
        assert!((cam.aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert!(!cam.is_projection_dirty());
        assert!(cam.projection().is_finite());
        assert_eq!(viewport.width, 0.0);
    }

    #[test]
    fn one_zero_dimension_is_enough_to_defer() {
        let mut viewport = Viewport::default();
        let mut cam = camera();
        let mut surface = RecordingSurface::default();

        let out = apply_resize(&mut viewport, &mut cam, &mut surface, 1024.0, 0.0, 1.0);

        assert!(!out.projection_updated);
        assert_eq!(cam.aspect(), 1.0);
    }
}
