//! Ocean surface parameters.

use crate::error::{require_positive, ConfigError};

/// Ocean surface geometry and wave animation parameters
#[derive(Debug, Clone)]
pub struct OceanPhysics {
    /// Grid resolution (segments per side, 100 = 10,201 vertices)
    pub grid_size: usize,

    /// Spacing between grid vertices in world units (meters)
    pub grid_spacing_m: f32,

    /// Wave animation speed (index units per second)
    /// Formula: height[i] = sin((i + t * wave_speed) * wave_frequency)
    pub wave_speed: f32,

    /// Wave frequency (radians per index unit)
    pub wave_frequency: f32,
}

impl Default for OceanPhysics {
    fn default() -> Self {
        Self {
            grid_size: 100,      // 50m plane split into 100 segments
            grid_spacing_m: 0.5, // 100 * 0.5 = 50m
            wave_speed: 5.0,
            wave_frequency: 0.05,
        }
    }
}

impl OceanPhysics {
    /// Side length of the surface (meters)
    pub fn extent_m(&self) -> f32 {
        self.grid_size as f32 * self.grid_spacing_m
    }

    /// Number of vertices in the surface grid
    pub fn vertex_count(&self) -> usize {
        (self.grid_size + 1) * (self.grid_size + 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroCount { field: "grid_size" });
        }
        require_positive("grid_spacing_m", self.grid_spacing_m)?;
        require_positive("wave_speed", self.wave_speed)?;
        require_positive("wave_frequency", self.wave_frequency)?;
        Ok(())
    }
}
