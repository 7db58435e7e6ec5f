//! Stormcove - a rainy night over a moving ocean
//!
//! Rain falls on an animated sea; every drop that lands splashes, clicks on
//! the water leave ripples, and a small boat bobs under an orbiting light.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use stormcove::camera::CameraSystem;
use stormcove::cli::Args;
use stormcove::clock::{Clock, ManualClock, SystemClock};
use stormcove::params::{RenderConfig, TableauParams};
use stormcove::picking::PointerEvent;
use stormcove::rendering::{LogRenderer, RenderSystem};
use stormcove::scheduler::FrameScheduler;
use stormcove::world::OceanWorld;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    world: OceanWorld,
    scheduler: FrameScheduler<SystemClock>,
    camera: CameraSystem,

    // Configuration
    render_config: RenderConfig,

    cursor: Option<PhysicalPosition<f64>>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(world: OceanWorld, camera: CameraSystem, render_config: RenderConfig) -> Self {
        Self {
            window: None,
            render_system: None,
            world,
            scheduler: FrameScheduler::new(SystemClock::new()),
            camera,
            render_config,
            cursor: None,
            error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Stormcove")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let camera = self.camera.camera_at(0.0, &self.render_config);
        let mut render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.world.wave.grid,
            self.world.rain.len(),
            camera,
            self.render_config.clone(),
        ))
        .context("failed to initialise GPU")?;
        render_system.set_camera(camera);

        info!("Stormcove is running (ESC to quit, click the water for ripples)");

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    /// Advance and draw a single frame
    fn render_frame(&mut self) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let time_s = self.scheduler.clock().elapsed().as_secs_f32();
        render_system.set_camera(self.camera.camera_at(time_s, &self.render_config));

        self.scheduler.tick(&mut self.world, render_system);
    }

    /// Pick the water under the cursor and leave a ripple
    fn click(&mut self) {
        let (Some(render_system), Some(cursor)) = (self.render_system.as_ref(), self.cursor) else {
            return;
        };

        let (width, height) = render_system.size();
        let pointer = PointerEvent {
            x_px: cursor.x as f32,
            y_px: cursor.y as f32,
            viewport_width: width,
            viewport_height: height,
        };
        let now = self.scheduler.clock().elapsed();

        match self
            .world
            .handle_click(&pointer, render_system.camera(), now)
        {
            Some(handle) => debug!("Ripple spawned: {:?}", handle),
            None => debug!("Click missed the water"),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init_window(event_loop) {
            error!("{:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.click(),
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.world.teardown();
        info!(
            "Exiting after {} frames, {} splashes spawned",
            self.scheduler.frame_count(),
            self.world.effects.stats().spawned(stormcove::effects::EffectKind::Splash)
        );
    }
}

/// Simulate a fixed number of frames without a window
fn run_headless(args: &Args, world: &mut OceanWorld) -> Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        bail!("--fps must be a positive number, got {}", args.fps);
    }
    let step = Duration::from_secs_f32(1.0 / args.fps);

    let mut scheduler = FrameScheduler::new(ManualClock::new());
    let mut renderer = LogRenderer::new();

    let mut next_report = Duration::from_secs(1);
    let mut spawned_since_report = 0;

    for _ in 0..args.frames {
        scheduler.clock_mut().advance(step);
        let stats = scheduler.tick(world, &mut renderer);
        spawned_since_report += stats.splashes_spawned;

        if stats.elapsed >= next_report {
            info!(
                "t={:.1}s frames={} splashes={} ripples={} spawned={}",
                stats.elapsed.as_secs_f32(),
                stats.frame,
                stats.live_splashes,
                stats.live_ripples,
                spawned_since_report,
            );
            spawned_since_report = 0;
            next_report += Duration::from_secs(1);
        }
    }

    world.teardown();
    info!(
        "Headless run finished: {} frames, {} surface uploads",
        renderer.frames(),
        renderer.surface_uploads()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut params = TableauParams::default();
    args.apply(&mut params);
    let mut world = OceanWorld::new(&params).context("invalid tableau parameters")?;
    info!(
        "Ocean: {} vertices, {} rain drops",
        world.wave.grid.vertex_count(),
        world.rain.len()
    );

    if args.headless {
        return run_headless(&args, &mut world);
    }

    let camera = CameraSystem::new(args.camera_preset());
    let mut app = App::new(world, camera, RenderConfig::default());

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
