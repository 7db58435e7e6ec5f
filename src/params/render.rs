//! Rendering configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,

    /// Ambient light intensity (0..1)
    pub ambient_intensity: f32,

    /// Ocean base colour (linear RGB)
    pub ocean_color: [f32; 3],

    /// Clear colour (linear RGB)
    pub sky_color: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane_m: 0.1,
            far_plane_m: 1000.0,
            ambient_intensity: 0.7,
            ocean_color: [0.118, 0.565, 1.0], // 0x1e90ff
            sky_color: [0.02, 0.03, 0.06],
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
