use glam::{Mat4, Vec3};

/// Perspective camera with a cached projection matrix.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    fov_y_deg: f32,
    /// Aspect ratio (width / height).
    aspect: f32,
    /// Near clipping plane.
    near: f32,
    /// Far clipping plane.
    far: f32,

    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    projection: Mat4,
    projection_dirty: bool,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 100.0)
    }
}

impl PerspectiveCamera {
    /// Creates a camera at the origin looking down -Z.
    ///
    /// The projection starts dirty and is computed on first refresh.
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(near > 0.0 && far > near);
        Self {
            fov_y_deg,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
            projection_dirty: true,
        }
    }

    #[inline]
    pub fn fov_y_deg(&self) -> f32 {
        self.fov_y_deg
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Sets the aspect ratio and marks the projection dirty.
    ///
    /// Returns `false` and leaves the camera untouched for non-positive or
    /// non-finite ratios.
    pub fn set_aspect(&mut self, aspect: f32) -> bool {
        if !aspect.is_finite() || aspect <= 0.0 {
            return false;
        }
        self.aspect = aspect;
        self.projection_dirty = true;
        true
    }

    pub fn set_fov_y_deg(&mut self, fov_y_deg: f32) {
        self.fov_y_deg = fov_y_deg;
        self.projection_dirty = true;
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        debug_assert!(near > 0.0 && far > near);
        self.near = near;
        self.far = far;
        self.projection_dirty = true;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    #[inline]
    pub fn is_projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    /// Recomputes the projection matrix unconditionally.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far);
        self.projection_dirty = false;
    }

    /// Recomputes the projection only if it is dirty. Returns whether it did.
    pub fn refresh_projection(&mut self) -> bool {
        if self.projection_dirty {
            self.update_projection_matrix();
            true
        } else {
            false
        }
    }

    /// Last computed projection. May be stale while dirty.
    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}
