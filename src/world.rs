//! The animated ocean tableau: every moving part plus the effect scene.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use crate::animation::{BoatBob, OrbitalLight};
use crate::camera::Camera;
use crate::effects::{EffectHandle, EffectPool};
use crate::error::ConfigError;
use crate::ocean::WaveField;
use crate::params::TableauParams;
use crate::picking::{pick, PointerEvent};
use crate::rain::ParticleSystem;
use crate::scene::SceneGraph;
use crate::scheduler::FrameView;

/// Owner of the animated components and the scene their effects live in
///
/// Each component only sees the collaborators it is handed: the effect pool
/// gets the scene graph per call, picking gets the camera and the surface.
pub struct OceanWorld<R = StdRng> {
    pub wave: WaveField,
    pub rain: ParticleSystem<R>,
    pub effects: EffectPool,
    pub boat: BoatBob,
    pub light: OrbitalLight,
    pub graph: SceneGraph,
}

impl OceanWorld<StdRng> {
    /// Build the tableau, seeding rain from `params.rain.seed`
    pub fn new(params: &TableauParams) -> Result<Self, ConfigError> {
        let rain = ParticleSystem::new(&params.rain)?;
        Self::with_rain(params, rain)
    }
}

impl<R: Rng> OceanWorld<R> {
    /// Build the tableau around an existing rain swarm
    pub fn with_rain(params: &TableauParams, rain: ParticleSystem<R>) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            wave: WaveField::new(&params.ocean)?,
            rain,
            effects: EffectPool::new(&params.effects)?,
            boat: BoatBob::new(&params.boat)?,
            light: OrbitalLight::new(&params.light)?,
            graph: SceneGraph::new(),
        })
    }

    /// Pick the ocean under the pointer and drop a ripple there
    ///
    /// Runs outside the frame loop, between ticks. Misses and out-of-viewport
    /// clicks spawn nothing.
    pub fn handle_click(
        &mut self,
        pointer: &PointerEvent,
        camera: &Camera,
        now: Duration,
    ) -> Option<EffectHandle> {
        let hit = pick(pointer, camera, &self.wave.grid)?;
        Some(self.effects.spawn_ripple(hit.x, hit.z, now, &mut self.graph))
    }

    /// Cancel every pending effect removal and drop the scene
    pub fn teardown(&mut self) {
        self.effects.teardown();
        self.graph = SceneGraph::new();
    }

    /// Read-only view for the renderer; consumes the surface dirty flag
    pub fn frame_view(&mut self, elapsed: Duration) -> FrameView<'_> {
        let ocean_dirty = self.wave.grid.take_dirty();
        FrameView {
            elapsed,
            ocean: &self.wave.grid,
            ocean_dirty,
            rain: self.rain.drops(),
            scene: &self.graph,
            light_position: self.light.position(),
            light_color: self.light.color(),
            light_range_m: self.light.range_m(),
            boat: self.boat.pose(),
        }
    }
}
