//! Window-less renderer that summarises frames to the log.

use std::time::Duration;

use log::debug;

use crate::scheduler::{FrameView, Renderer};

/// Logs a one-line frame summary once per elapsed second
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    surface_uploads: u64,
    next_report: Duration,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames whose ocean surface changed
    pub fn surface_uploads(&self) -> u64 {
        self.surface_uploads
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &FrameView<'_>) {
        self.frames += 1;
        if frame.ocean_dirty {
            self.surface_uploads += 1;
        }

        if frame.elapsed >= self.next_report {
            debug!(
                "t={:.2}s frame={} entities={} drops={} light=({:.1}, {:.1}, {:.1}) boat_y={:.2}",
                frame.elapsed.as_secs_f32(),
                self.frames,
                frame.scene.len(),
                frame.rain.len(),
                frame.light_position.x,
                frame.light_position.y,
                frame.light_position.z,
                frame.boat.position.y,
            );
            self.next_report = frame.elapsed + Duration::from_secs(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::params::TableauParams;
    use crate::scheduler::FrameScheduler;
    use crate::world::OceanWorld;

    #[test]
    fn test_counts_frames_and_uploads() {
        let mut params = TableauParams::default();
        params.rain.drop_count = 10;
        params.rain.seed = Some(3);
        let mut world = OceanWorld::new(&params).unwrap();
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut renderer = LogRenderer::new();

        for _ in 0..3 {
            scheduler.clock_mut().advance(Duration::from_millis(16));
            scheduler.tick(&mut world, &mut renderer);
        }

        assert_eq!(renderer.frames(), 3);
        assert_eq!(renderer.surface_uploads(), 3);
    }
}
