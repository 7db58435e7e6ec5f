//! Procedural vertical displacement of the ocean surface.

use super::mesh::OceanGrid;
use crate::error::ConfigError;
use crate::params::OceanPhysics;

/// Deterministic sine wave field driving the ocean grid heights
pub struct WaveField {
    pub grid: OceanGrid,
    wave_speed: f32,
    wave_frequency: f32,
}

impl WaveField {
    /// Create the wave field and its surface grid
    pub fn new(physics: &OceanPhysics) -> Result<Self, ConfigError> {
        physics.validate()?;
        Ok(Self {
            grid: OceanGrid::new(physics),
            wave_speed: physics.wave_speed,
            wave_frequency: physics.wave_frequency,
        })
    }

    /// Height of vertex `index` at `time_s`
    ///
    /// Pure function of its inputs: `sin((index + time_s * speed) * frequency)`.
    pub fn height_at(&self, index: usize, time_s: f32) -> f32 {
        ((index as f32 + time_s * self.wave_speed) * self.wave_frequency).sin()
    }

    /// Rewrite every vertex height for `time_s` and mark the grid dirty
    ///
    /// # Arguments
    /// * `time_s` - Elapsed session time in seconds (non-negative)
    pub fn update(&mut self, time_s: f32) {
        let phase = time_s * self.wave_speed;
        let frequency = self.wave_frequency;
        self.grid
            .set_heights(|idx| ((idx as f32 + phase) * frequency).sin());
    }

    pub fn wave_speed(&self) -> f32 {
        self.wave_speed
    }

    pub fn wave_frequency(&self) -> f32 {
        self.wave_frequency
    }
}
