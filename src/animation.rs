//! Periodic motion for the moving light and the boat.
//!
//! Both are pure functions of elapsed time; the stored pose is only the
//! latest sample, kept for the renderer.

use glam::{Quat, Vec3};

use crate::error::ConfigError;
use crate::params::{BoatParams, LightParams};

/// Point light circling the vertical axis at constant height
pub struct OrbitalLight {
    params: LightParams,
    position: Vec3,
}

impl OrbitalLight {
    pub fn new(params: &LightParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut light = Self {
            params: params.clone(),
            position: Vec3::ZERO,
        };
        light.update(0.0);
        Ok(light)
    }

    /// Horizontal light position at `time_s`
    ///
    /// # Returns
    /// `(sin(ωt) * radius, cos(ωt) * radius)`
    pub fn orbit(&self, time_s: f32) -> (f32, f32) {
        let angle = time_s * self.params.angular_speed_rad_per_s;
        (
            angle.sin() * self.params.radius_m,
            angle.cos() * self.params.radius_m,
        )
    }

    /// Move the light to its position for `time_s`
    pub fn update(&mut self, time_s: f32) -> (f32, f32) {
        let (x, z) = self.orbit(time_s);
        self.position = Vec3::new(x, self.params.height_m, z);
        (x, z)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> [f32; 3] {
        self.params.color
    }

    pub fn range_m(&self) -> f32 {
        self.params.range_m
    }
}

/// Boat placement for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoatPose {
    pub position: Vec3,
    /// Roll around the boat's long (Z) axis (radians)
    pub roll_rad: f32,
    /// Hull size (width, height, length in meters)
    pub size_m: Vec3,
}

impl BoatPose {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.roll_rad)
    }
}

/// Vertical bob and roll oscillator for the boat
pub struct BoatBob {
    params: BoatParams,
    pose: BoatPose,
}

impl BoatBob {
    pub fn new(params: &BoatParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let pose = BoatPose {
            position: Vec3::from_array(params.position),
            roll_rad: 0.0,
            size_m: Vec3::from_array(params.size_m),
        };
        Ok(Self {
            params: params.clone(),
            pose,
        })
    }

    /// Pose at `time_s` without touching the stored pose
    pub fn pose_at(&self, time_s: f32) -> BoatPose {
        let p = &self.params;
        let y = p.bob_center_m + (time_s * p.bob_rate_rad_per_s).sin() * p.bob_amplitude_m;
        let roll_rad = (time_s * p.roll_rate_rad_per_s).sin() * p.roll_amplitude_rad;
        BoatPose {
            position: Vec3::new(p.position[0], y, p.position[2]),
            roll_rad,
            size_m: Vec3::from_array(p.size_m),
        }
    }

    pub fn update(&mut self, time_s: f32) -> BoatPose {
        self.pose = self.pose_at(time_s);
        self.pose
    }

    pub fn pose(&self) -> BoatPose {
        self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_orbit_formula() {
        let mut light = OrbitalLight::new(&LightParams::default()).unwrap();

        for t in [0.0_f32, 0.5, 1.0, 2.9, 100.0] {
            let (x, z) = light.update(t);
            assert!((x - t.sin() * 10.0).abs() < 1e-5);
            assert!((z - t.cos() * 10.0).abs() < 1e-5);
            assert_eq!(light.position().y, 10.0);
        }
    }

    #[test]
    fn test_light_is_stateless() {
        let mut light = OrbitalLight::new(&LightParams::default()).unwrap();
        let first = light.update(2.5);
        light.update(7.0);
        assert_eq!(light.update(2.5), first);
    }

    #[test]
    fn test_light_starts_on_positive_z() {
        let light = OrbitalLight::new(&LightParams::default()).unwrap();
        assert_eq!(light.position(), Vec3::new(0.0, 10.0, 10.0));
    }

    #[test]
    fn test_boat_bob_range() {
        let mut boat = BoatBob::new(&BoatParams::default()).unwrap();

        for i in 0..200 {
            let pose = boat.update(i as f32 * 0.1);
            assert!(pose.position.y >= 0.3 - 1e-5 && pose.position.y <= 0.7 + 1e-5);
            assert!(pose.roll_rad.abs() <= 0.1 + 1e-6);
            assert_eq!(pose.position.x, 0.0);
            assert_eq!(pose.position.z, 10.0);
        }
    }

    #[test]
    fn test_boat_pose_at_zero() {
        let boat = BoatBob::new(&BoatParams::default()).unwrap();
        let pose = boat.pose_at(0.0);
        assert_eq!(pose.position, Vec3::new(0.0, 0.5, 10.0));
        assert_eq!(pose.roll_rad, 0.0);
    }

    #[test]
    fn test_invalid_light_rejected() {
        let params = LightParams {
            radius_m: 0.0,
            ..LightParams::default()
        };
        assert!(OrbitalLight::new(&params).is_err());
    }
}
