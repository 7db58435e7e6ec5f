//! Camera configuration and presets.

/// Fixed camera position (the tableau's default view)
#[derive(Debug, Clone)]
pub struct FixedCamera {
    /// Camera position (meters)
    pub position: [f32; 3],

    /// Look-at target (meters)
    pub target: [f32; 3],
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self {
            position: [0.0, 10.0, 30.0], // Above the beach, looking over the water
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Slow automatic orbit around the scene centre
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal distance from the orbit centre (meters)
    pub radius_m: f32,

    /// Constant eye height (meters)
    pub height_m: f32,

    /// Angular speed (radians per second)
    pub angular_speed_rad_per_s: f32,

    /// Orbit centre and look-at target (meters)
    pub target: [f32; 3],
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius_m: 30.0, // Same distance as the fixed view
            height_m: 10.0,
            angular_speed_rad_per_s: 0.05,
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Camera preset selection
#[derive(Debug, Clone)]
pub enum CameraPreset {
    /// Stationary camera
    Fixed(FixedCamera),

    /// Camera circling the scene centre
    Orbit(OrbitCamera),
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self::Fixed(FixedCamera::default())
    }
}
