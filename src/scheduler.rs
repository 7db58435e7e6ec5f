//! Per-frame orchestration of the animated tableau.

use std::time::Duration;

use glam::Vec3;
use log::trace;
use rand::Rng;

use crate::animation::BoatPose;
use crate::clock::Clock;
use crate::effects::EffectKind;
use crate::ocean::OceanGrid;
use crate::rain::RainDrop;
use crate::scene::SceneGraph;
use crate::world::OceanWorld;

/// Everything the renderer reads for one frame
pub struct FrameView<'a> {
    pub elapsed: Duration,
    pub ocean: &'a OceanGrid,
    /// Ocean heights changed since the previous view
    pub ocean_dirty: bool,
    pub rain: &'a [RainDrop],
    pub scene: &'a SceneGraph,
    pub light_position: Vec3,
    pub light_color: [f32; 3],
    pub light_range_m: f32,
    pub boat: BoatPose,
}

/// Draws a frame on demand
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub elapsed: Duration,
    pub expired: usize,
    pub splashes_spawned: usize,
    pub live_splashes: usize,
    pub live_ripples: usize,
}

/// Runs one tick per display refresh
///
/// Tick order: expire due effects, wave field, rain (each recycle spawns its
/// splash before the next drop moves), boat, light, render. Holds nothing but
/// the latest time sample and a frame counter.
pub struct FrameScheduler<C> {
    clock: C,
    last_sample: Duration,
    frame: u64,
}

impl<C: Clock> FrameScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_sample: Duration::ZERO,
            frame: 0,
        }
    }

    /// Advance the world to the clock's current time and render it
    pub fn tick<R, W>(&mut self, world: &mut OceanWorld<R>, renderer: &mut W) -> FrameStats
    where
        R: Rng,
        W: Renderer + ?Sized,
    {
        let now = self.clock.elapsed();
        let time_s = now.as_secs_f32();
        self.last_sample = now;
        self.frame += 1;

        let expired = world.effects.expire(now, &mut world.graph);

        world.wave.update(time_s);

        let OceanWorld {
            rain,
            effects,
            graph,
            ..
        } = world;
        let splashes_spawned = rain.step(|event| {
            effects.spawn_splash(event.x, event.z, now, &mut *graph);
        });

        world.boat.update(time_s);
        world.light.update(time_s);

        let stats = FrameStats {
            frame: self.frame,
            elapsed: now,
            expired,
            splashes_spawned,
            live_splashes: world.effects.live_count(EffectKind::Splash),
            live_ripples: world.effects.live_count(EffectKind::Ripple),
        };
        trace!("{:?}", stats);

        let view = world.frame_view(now);
        renderer.render(&view);

        stats
    }

    /// Time sampled by the most recent tick
    pub fn last_sample(&self) -> Duration {
        self.last_sample
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::params::TableauParams;
    use crate::rain::ParticleSystem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Records what each rendered frame looked like
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<RenderedFrame>,
    }

    struct RenderedFrame {
        elapsed: Duration,
        entity_count: usize,
        first_height: f32,
        light_position: Vec3,
        boat_y: f32,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, frame: &FrameView<'_>) {
            self.frames.push(RenderedFrame {
                elapsed: frame.elapsed,
                entity_count: frame.scene.len(),
                first_height: frame.ocean.vertices[0].position[1],
                light_position: frame.light_position,
                boat_y: frame.boat.position.y,
            });
        }
    }

    fn world_with_rain(positions: &[f32], fall_speed_m: f32) -> OceanWorld {
        let mut params = TableauParams::default();
        params.rain.fall_speed_m = fall_speed_m;
        let rain =
            ParticleSystem::from_positions(&params.rain, positions, StdRng::seed_from_u64(9)).unwrap();
        OceanWorld::with_rain(&params, rain).unwrap()
    }

    #[test]
    fn test_one_render_per_tick() {
        let mut world = world_with_rain(&[0.0, 20.0, 0.0], 0.3);
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut renderer = RecordingRenderer::default();

        for _ in 0..5 {
            scheduler.clock_mut().advance(Duration::from_millis(16));
            scheduler.tick(&mut world, &mut renderer);
        }

        assert_eq!(renderer.frames.len(), 5);
        assert_eq!(scheduler.frame_count(), 5);
        assert_eq!(scheduler.last_sample(), Duration::from_millis(80));
        assert_eq!(renderer.frames[4].elapsed, Duration::from_millis(80));
    }

    #[test]
    fn test_frame_reflects_current_time() {
        let mut world = world_with_rain(&[0.0, 20.0, 0.0], 0.3);
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut renderer = RecordingRenderer::default();

        scheduler.clock_mut().set(Duration::from_millis(1500));
        scheduler.tick(&mut world, &mut renderer);

        let frame = &renderer.frames[0];
        let t = 1.5_f32;
        assert_eq!(frame.first_height, world.wave.height_at(0, t));
        assert!((frame.light_position.x - t.sin() * 10.0).abs() < 1e-5);
        assert!((frame.boat_y - (0.5 + t.sin() * 0.2)).abs() < 1e-5);
    }

    #[test]
    fn test_splashes_visible_in_same_frame() {
        // Two drops about to land, one high up
        let positions = [1.0, 0.1, 1.0, 2.0, 25.0, 2.0, 3.0, 0.2, 3.0];
        let mut world = world_with_rain(&positions, 0.3);
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut renderer = RecordingRenderer::default();

        let stats = scheduler.tick(&mut world, &mut renderer);

        assert_eq!(stats.splashes_spawned, 2);
        assert_eq!(stats.live_splashes, 2);
        assert_eq!(renderer.frames[0].entity_count, 2);

        // Splashes were inserted in drop order, at the drops' columns
        let xs: Vec<f32> = world.graph.iter().map(|(_, e)| e.position.x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }

    #[test]
    fn test_expired_splashes_gone_before_render() {
        // Barely falling, so the respawned drop cannot land again
        let mut world = world_with_rain(&[1.0, 0.0005, 1.0], 0.001);
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut renderer = RecordingRenderer::default();

        scheduler.tick(&mut world, &mut renderer); // splash at t=0

        scheduler.clock_mut().set(Duration::from_millis(499));
        scheduler.tick(&mut world, &mut renderer);
        assert_eq!(renderer.frames[1].entity_count, 1);

        scheduler.clock_mut().set(Duration::from_millis(500));
        let stats = scheduler.tick(&mut world, &mut renderer);
        assert_eq!(stats.expired, 1);
        assert_eq!(renderer.frames[2].entity_count, 0);
    }

    #[test]
    fn test_renderer_as_trait_object() {
        let mut world = world_with_rain(&[0.0, 20.0, 0.0], 0.3);
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut recording = RecordingRenderer::default();
        let renderer: &mut dyn Renderer = &mut recording;

        scheduler.tick(&mut world, renderer);
        assert_eq!(recording.frames.len(), 1);
    }
}
