//! Rain particle parameters.

use crate::error::{require_finite, require_positive, ConfigError};

/// Rain swarm size, spawn volume and fall rate
#[derive(Debug, Clone)]
pub struct RainParams {
    /// Number of drops (fixed for the whole session)
    pub drop_count: usize,

    /// Half-width of the square spawn area around the origin (meters)
    pub half_extent_m: f32,

    /// Height below which a drop is recycled (meters)
    pub floor_m: f32,

    /// Upper bound (exclusive) of the respawn height (meters)
    pub ceiling_m: f32,

    /// Distance fallen per tick (meters per tick)
    pub fall_speed_m: f32,

    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            drop_count: 1500,
            half_extent_m: 25.0, // Matches the 50m ocean
            floor_m: 0.0,
            ceiling_m: 30.0,
            fall_speed_m: 0.3,
            seed: None,
        }
    }
}

impl RainParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drop_count == 0 {
            return Err(ConfigError::ZeroCount {
                field: "drop_count",
            });
        }
        require_positive("half_extent_m", self.half_extent_m)?;
        require_positive("fall_speed_m", self.fall_speed_m)?;
        require_finite("floor_m", self.floor_m)?;
        require_finite("ceiling_m", self.ceiling_m)?;
        if self.floor_m >= self.ceiling_m {
            return Err(ConfigError::EmptyRange {
                field: "rain height",
                min: self.floor_m,
                max: self.ceiling_m,
            });
        }
        Ok(())
    }
}
