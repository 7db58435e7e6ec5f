//! Parameter definitions with physical units and documented semantics.
//!
//! Every tunable of the tableau lives here with:
//! - Physical units in the field name (meters, seconds, radians)
//! - Defaults matching the stormcove scene
//! - A `validate()` that rejects degenerate values up front

mod camera;
mod effects;
mod ocean;
mod rain;
mod render;
mod scene;

// Re-export all types
pub use camera::{CameraPreset, FixedCamera, OrbitCamera};
pub use effects::EffectParams;
pub use ocean::OceanPhysics;
pub use rain::RainParams;
pub use render::RenderConfig;
pub use scene::{BoatParams, LightParams};

use crate::error::ConfigError;

/// Full parameter set for the ocean tableau
#[derive(Debug, Clone, Default)]
pub struct TableauParams {
    pub ocean: OceanPhysics,
    pub rain: RainParams,
    pub effects: EffectParams,
    pub light: LightParams,
    pub boat: BoatParams,
}

impl TableauParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ocean.validate()?;
        self.rain.validate()?;
        self.effects.validate()?;
        self.light.validate()?;
        self.boat.validate()?;
        Ok(())
    }
}
