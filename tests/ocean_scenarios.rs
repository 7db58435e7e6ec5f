//! End-to-end scenarios for the ocean tableau.

use std::time::Duration;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use stormcove::camera::Camera;
use stormcove::clock::ManualClock;
use stormcove::effects::{EffectKind, EffectPool};
use stormcove::params::{EffectParams, RainParams, RenderConfig, TableauParams};
use stormcove::picking::{pick, HorizontalPlane, PointerEvent};
use stormcove::rain::ParticleSystem;
use stormcove::scene::SceneGraph;
use stormcove::scheduler::{FrameScheduler, FrameView, Renderer};
use stormcove::world::OceanWorld;

/// Renderer that only counts frames
#[derive(Default)]
struct CountingRenderer {
    frames: usize,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, _frame: &FrameView<'_>) {
        self.frames += 1;
    }
}

fn center_pointer() -> PointerEvent {
    PointerEvent {
        x_px: 640.0,
        y_px: 360.0,
        viewport_width: 1280,
        viewport_height: 720,
    }
}

fn tableau_camera() -> Camera {
    Camera::look_at(Vec3::new(0.0, 10.0, 30.0), Vec3::ZERO, &RenderConfig::default())
}

#[test]
fn test_rain_scenario_1500_drops() {
    let params = RainParams::default();
    let mut rain = ParticleSystem::with_rng(&params, StdRng::seed_from_u64(2024)).unwrap();
    assert_eq!(rain.len(), 1500);

    let before: Vec<[f32; 3]> = rain.drops().iter().map(|d| d.position).collect();
    let events = rain.step_collect();
    let after = rain.drops();

    let mut expected_recycles = Vec::new();
    for (i, (old, new)) in before.iter().zip(after).enumerate() {
        let fallen = old[1] - 0.3;
        if fallen < 0.0 {
            expected_recycles.push(i);
            assert!((0.0..30.0).contains(&new.position[1]));
        } else {
            assert_eq!(new.position[1], fallen);
        }
        assert_eq!(new.position[0], old[0]);
        assert_eq!(new.position[2], old[2]);
    }

    let recycled: Vec<usize> = events.iter().map(|e| e.index).collect();
    assert_eq!(recycled, expected_recycles);
    for event in &events {
        assert_eq!(event.x, before[event.index][0]);
        assert_eq!(event.z, before[event.index][2]);
    }
}

#[test]
fn test_rain_stays_in_bounds_over_many_ticks() {
    let params = RainParams {
        drop_count: 300,
        ..RainParams::default()
    };
    let mut rain = ParticleSystem::with_rng(&params, StdRng::seed_from_u64(5)).unwrap();

    for _ in 0..500 {
        rain.step(|_| {});
        for drop in rain.drops() {
            let y = drop.position[1];
            assert!((0.0..30.0).contains(&y), "y = {}", y);
        }
    }
}

#[test]
fn test_every_landing_drop_splashes_once() {
    let mut params = TableauParams::default();
    params.rain.drop_count = 500;
    params.rain.seed = Some(11);
    let mut world = OceanWorld::new(&params).unwrap();
    let mut scheduler = FrameScheduler::new(ManualClock::new());
    let mut renderer = CountingRenderer::default();

    let mut total_recycled = 0;
    for _ in 0..20 {
        scheduler.clock_mut().advance(Duration::from_millis(16));
        let stats = scheduler.tick(&mut world, &mut renderer);
        total_recycled += stats.splashes_spawned;
    }

    let stats = world.effects.stats();
    assert_eq!(stats.spawned(EffectKind::Splash) as usize, total_recycled);
    assert_eq!(renderer.frames, 20);
    // 320ms in: nothing has reached its 500ms TTL yet
    assert_eq!(world.effects.live_count(EffectKind::Splash), total_recycled);
}

#[test]
fn test_click_scenario_ripple_lifetime() {
    let camera = tableau_camera();
    let plane = HorizontalPlane { height_m: 0.0 };
    let hit = pick(&center_pointer(), &camera, &plane).unwrap();

    // The centre ray from (0, 10, 30) towards the origin lands at the origin
    assert!(hit.distance(Vec3::ZERO) < 1e-3, "hit at {:?}", hit);

    let mut scene = SceneGraph::new();
    let mut pool = EffectPool::new(&EffectParams::default()).unwrap();
    let t0 = Duration::from_millis(250);
    let ripple = pool.spawn_ripple(hit.x, hit.z, t0, &mut scene);

    let info = *pool.get(ripple).unwrap();
    assert!(info.position.distance(Vec3::new(0.0, 0.1, 0.0)) < 1e-3);
    let entity = scene.get(info.entity).unwrap();
    assert_eq!(entity.position.y, 0.1);

    pool.expire(t0 + Duration::from_millis(999), &mut scene);
    assert!(pool.is_live(ripple));
    assert!(scene.contains(info.entity));

    pool.expire(t0 + Duration::from_millis(1000), &mut scene);
    assert!(!pool.is_live(ripple));
    assert!(!scene.contains(info.entity));
}

#[test]
fn test_click_through_world_and_scheduler() {
    let mut params = TableauParams::default();
    params.rain.drop_count = 1;
    params.rain.seed = Some(1);
    let mut world = OceanWorld::new(&params).unwrap();
    let mut scheduler = FrameScheduler::new(ManualClock::new());
    let mut renderer = CountingRenderer::default();

    // Surface is still flat before the first tick
    let ripple = world
        .handle_click(&center_pointer(), &tableau_camera(), Duration::ZERO)
        .unwrap();
    let entity = world.effects.get(ripple).unwrap().entity;

    for ms in [16, 500, 999] {
        scheduler.clock_mut().set(Duration::from_millis(ms));
        scheduler.tick(&mut world, &mut renderer);
        assert!(world.graph.contains(entity), "gone at {}ms", ms);
    }

    scheduler.clock_mut().set(Duration::from_millis(1000));
    scheduler.tick(&mut world, &mut renderer);
    assert!(!world.graph.contains(entity));
    assert!(!world.effects.is_live(ripple));
}

#[test]
fn test_splash_lifetime_boundaries() {
    let mut scene = SceneGraph::new();
    let mut pool = EffectPool::new(&EffectParams::default()).unwrap();
    let t0 = Duration::from_secs(3);
    let splash = pool.spawn_splash(4.0, -2.0, t0, &mut scene);
    let entity = pool.get(splash).unwrap().entity;

    for offset_ms in [0, 1, 250, 499] {
        pool.expire(t0 + Duration::from_millis(offset_ms), &mut scene);
        assert!(scene.contains(entity), "missing at +{}ms", offset_ms);
    }

    pool.expire(t0 + Duration::from_millis(500), &mut scene);
    assert!(!scene.contains(entity));
}

#[test]
fn test_teardown_cancels_pending_removals() {
    let mut params = TableauParams::default();
    params.rain.seed = Some(8);
    let mut world = OceanWorld::new(&params).unwrap();
    let mut scheduler = FrameScheduler::new(ManualClock::new());
    let mut renderer = CountingRenderer::default();

    for _ in 0..10 {
        scheduler.clock_mut().advance(Duration::from_millis(16));
        scheduler.tick(&mut world, &mut renderer);
    }
    world.handle_click(&center_pointer(), &tableau_camera(), scheduler.last_sample());

    world.teardown();
    assert_eq!(world.effects.pending_expiries(), 0);
    assert!(world.graph.is_empty());

    // Nothing left to fire after teardown
    assert_eq!(
        world
            .effects
            .expire(Duration::from_secs(60), &mut world.graph),
        0
    );
}
