//! Transient effect (splash and ripple) parameters.

use std::time::Duration;

use crate::error::{require_finite, require_positive, ConfigError};

/// Lifetimes, sizes and pool bounds for splash and ripple effects
#[derive(Debug, Clone)]
pub struct EffectParams {
    /// How long a splash stays in the scene
    pub splash_ttl: Duration,

    /// How long a ripple stays in the scene
    pub ripple_ttl: Duration,

    /// Height at which effects are placed (meters, just above the water)
    pub spawn_height_m: f32,

    /// Splash sphere radius (meters)
    pub splash_radius_m: f32,

    /// Ripple disc radius (meters)
    pub ripple_radius_m: f32,

    /// Maximum simultaneously live splashes (oldest evicted beyond this)
    pub max_live_splashes: usize,

    /// Maximum simultaneously live ripples (oldest evicted beyond this)
    pub max_live_ripples: usize,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            splash_ttl: Duration::from_millis(500),
            ripple_ttl: Duration::from_millis(1000),
            spawn_height_m: 0.1,
            splash_radius_m: 0.1,
            ripple_radius_m: 0.5,
            // ~1500 drops at 0.3m/tick recycle roughly 15 per tick,
            // 30 ticks of splashes at 60 FPS leaves plenty of headroom
            max_live_splashes: 4096,
            max_live_ripples: 256,
        }
    }
}

impl EffectParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.splash_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "splash_ttl",
            });
        }
        if self.ripple_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "ripple_ttl",
            });
        }
        require_finite("spawn_height_m", self.spawn_height_m)?;
        require_positive("splash_radius_m", self.splash_radius_m)?;
        require_positive("ripple_radius_m", self.ripple_radius_m)?;
        if self.max_live_splashes == 0 {
            return Err(ConfigError::ZeroCount {
                field: "max_live_splashes",
            });
        }
        if self.max_live_ripples == 0 {
            return Err(ConfigError::ZeroCount {
                field: "max_live_ripples",
            });
        }
        Ok(())
    }
}
