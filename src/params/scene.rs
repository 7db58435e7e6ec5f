//! Moving light and boat oscillator parameters.

use crate::error::{require_finite, require_positive, ConfigError};

/// Point light circling the scene
#[derive(Debug, Clone)]
pub struct LightParams {
    /// Orbit radius around the vertical axis (meters)
    pub radius_m: f32,

    /// Constant light height (meters)
    pub height_m: f32,

    /// Angular speed (radians per second)
    pub angular_speed_rad_per_s: f32,

    /// Distance beyond which the light contributes nothing (meters)
    pub range_m: f32,

    /// Light colour (linear RGB)
    pub color: [f32; 3],
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            radius_m: 10.0,
            height_m: 10.0,
            angular_speed_rad_per_s: 1.0,
            range_m: 100.0,
            color: [1.0, 0.667, 0.2], // 0xffaa33
        }
    }
}

impl LightParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("light radius_m", self.radius_m)?;
        require_finite("light height_m", self.height_m)?;
        require_positive(
            "light angular_speed_rad_per_s",
            self.angular_speed_rad_per_s,
        )?;
        require_positive("light range_m", self.range_m)?;
        Ok(())
    }
}

/// Boat resting on the water with a gentle bob and roll
#[derive(Debug, Clone)]
pub struct BoatParams {
    /// Rest position (meters); y is replaced by the bob each tick
    pub position: [f32; 3],

    /// Hull size (width, height, length in meters)
    pub size_m: [f32; 3],

    /// Centre of the vertical bob (meters)
    pub bob_center_m: f32,

    /// Vertical bob amplitude (meters)
    pub bob_amplitude_m: f32,

    /// Bob rate (radians per second)
    pub bob_rate_rad_per_s: f32,

    /// Roll amplitude around the long axis (radians)
    pub roll_amplitude_rad: f32,

    /// Roll rate (radians per second)
    pub roll_rate_rad_per_s: f32,
}

impl Default for BoatParams {
    fn default() -> Self {
        Self {
            position: [0.0, 0.3, 10.0],
            size_m: [1.0, 0.5, 2.0],
            bob_center_m: 0.5,
            bob_amplitude_m: 0.2,
            bob_rate_rad_per_s: 1.0,
            roll_amplitude_rad: 0.1,
            roll_rate_rad_per_s: 0.5,
        }
    }
}

impl BoatParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("boat size width", self.size_m[0]),
            ("boat size height", self.size_m[1]),
            ("boat size length", self.size_m[2]),
        ] {
            require_positive(field, value)?;
        }
        require_finite("boat bob_center_m", self.bob_center_m)?;
        require_finite("boat bob_amplitude_m", self.bob_amplitude_m)?;
        require_positive("boat bob_rate_rad_per_s", self.bob_rate_rad_per_s)?;
        require_finite("boat roll_amplitude_rad", self.roll_amplitude_rad)?;
        require_positive("boat roll_rate_rad_per_s", self.roll_rate_rad_per_s)?;
        Ok(())
    }
}
