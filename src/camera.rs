//! Perspective camera and preset-driven camera placement.

use glam::{Mat4, Vec2, Vec3};

use crate::params::{CameraPreset, FixedCamera, OrbitCamera, RenderConfig};
use crate::picking::Ray;

/// Perspective camera snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view (radians)
    pub fov_y_rad: f32,
    pub aspect: f32,
    pub near_m: f32,
    pub far_m: f32,
}

impl Camera {
    /// Camera at `eye` looking at `target` with Y up, lens taken from `config`
    pub fn look_at(eye: Vec3, target: Vec3, config: &RenderConfig) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y_rad: config.fov_degrees.to_radians(),
            aspect: config.aspect_ratio(),
            near_m: config.near_plane_m,
            far_m: config.far_plane_m,
        }
    }

    /// Replace the up vector (needed when looking straight along Y)
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, self.aspect, self.near_m, self.far_m)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray from the eye through a point in normalized device coordinates
    ///
    /// `ndc` is in `[-1, 1]` on both axes with +y up.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv_view_proj = self.view_proj().inverse();
        // Any depth inside the frustum lies on the same eye ray
        let through = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.eye, through - self.eye)
    }
}

/// Camera system selecting placement from a preset
pub struct CameraSystem {
    preset: CameraPreset,
}

impl CameraSystem {
    /// Create new camera system with specified preset
    pub fn new(preset: CameraPreset) -> Self {
        Self { preset }
    }

    /// Compute camera position and look-at target for given time
    ///
    /// # Returns
    /// Tuple of (eye_position, target_position)
    pub fn compute_position_and_target(&self, time_s: f32) -> (Vec3, Vec3) {
        match &self.preset {
            CameraPreset::Fixed(params) => Self::compute_fixed(params),
            CameraPreset::Orbit(params) => Self::compute_orbit(params, time_s),
        }
    }

    fn compute_fixed(p: &FixedCamera) -> (Vec3, Vec3) {
        (Vec3::from_array(p.position), Vec3::from_array(p.target))
    }

    /// Circle the target at constant height, starting on the +Z side
    fn compute_orbit(p: &OrbitCamera, time_s: f32) -> (Vec3, Vec3) {
        let angle = time_s * p.angular_speed_rad_per_s;
        let target = Vec3::from_array(p.target);
        let eye = target
            + Vec3::new(
                angle.sin() * p.radius_m,
                p.height_m,
                angle.cos() * p.radius_m,
            );
        (eye, target)
    }

    /// Camera for `time_s` with the lens from `render_config`
    pub fn camera_at(&self, time_s: f32, render_config: &RenderConfig) -> Camera {
        let (eye, target) = self.compute_position_and_target(time_s);
        Camera::look_at(eye, target, render_config)
    }
}
