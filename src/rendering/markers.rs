//! CPU-side marker geometry for scene entities, the light and the boat.
//!
//! Markers are flat-colored triangle lists rebuilt every frame. A disc lies in
//! its local XY plane, a sphere is drawn as three orthogonal discs.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use crate::animation::BoatPose;
use crate::scene::{Entity, SceneGraph, Shape};

/// Segments per disc fan
pub const DISC_SEGMENTS: usize = 16;

/// Vertices emitted for one disc
pub const DISC_VERTICES: usize = DISC_SEGMENTS * 3;

/// Vertices emitted for one sphere (three discs)
pub const SPHERE_VERTICES: usize = DISC_VERTICES * 3;

/// Vertices emitted for the boat hull box
pub const BOX_VERTICES: usize = 36;

/// Drawn size of the light marker
const LIGHT_MARKER_RADIUS_M: f32 = 0.3;

const BOAT_COLOR: [f32; 4] = [0.545, 0.271, 0.075, 1.0];

/// Marker vertex (GPU-compatible)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MarkerVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Build the marker triangle list for one frame
pub fn build_markers(
    scene: &SceneGraph,
    light_position: Vec3,
    light_color: [f32; 3],
    boat: &BoatPose,
) -> Vec<MarkerVertex> {
    let mut out = Vec::with_capacity(scene.len() * SPHERE_VERTICES + SPHERE_VERTICES + BOX_VERTICES);

    for (_, entity) in scene.iter() {
        push_entity(&mut out, entity);
    }

    let [r, g, b] = light_color;
    push_sphere(
        &mut out,
        light_position,
        Quat::IDENTITY,
        LIGHT_MARKER_RADIUS_M,
        [r, g, b, 1.0],
    );

    push_box(
        &mut out,
        boat.position,
        boat.rotation(),
        boat.size_m * 0.5,
        BOAT_COLOR,
    );

    out
}

fn push_entity(out: &mut Vec<MarkerVertex>, entity: &Entity) {
    match entity.shape {
        Shape::Sphere { radius } => {
            push_sphere(out, entity.position, entity.rotation, radius, entity.color)
        }
        Shape::Disc { radius } => push_disc(out, entity.position, entity.rotation, radius, entity.color),
    }
}

fn push_disc(out: &mut Vec<MarkerVertex>, center: Vec3, rotation: Quat, radius: f32, color: [f32; 4]) {
    let rim = |i: usize| {
        let angle = i as f32 / DISC_SEGMENTS as f32 * TAU;
        center + rotation * Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
    };

    for i in 0..DISC_SEGMENTS {
        for p in [center, rim(i), rim(i + 1)] {
            out.push(MarkerVertex {
                position: p.to_array(),
                color,
            });
        }
    }
}

fn push_sphere(out: &mut Vec<MarkerVertex>, center: Vec3, rotation: Quat, radius: f32, color: [f32; 4]) {
    let quarter = std::f32::consts::FRAC_PI_2;
    for axis in [
        Quat::IDENTITY,
        Quat::from_rotation_x(quarter),
        Quat::from_rotation_y(quarter),
    ] {
        push_disc(out, center, rotation * axis, radius, color);
    }
}

fn push_box(out: &mut Vec<MarkerVertex>, center: Vec3, rotation: Quat, half: Vec3, color: [f32; 4]) {
    // Corner i has bit 0 = +x, bit 1 = +y, bit 2 = +z
    let corner = |i: usize| {
        let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
        center + rotation * (half * Vec3::new(sign(1), sign(2), sign(4)))
    };
    const FACES: [[usize; 4]; 6] = [
        [0, 2, 6, 4], // -x
        [1, 5, 7, 3], // +x
        [0, 4, 5, 1], // -y
        [2, 3, 7, 6], // +y
        [0, 1, 3, 2], // -z
        [4, 6, 7, 5], // +z
    ];

    for [a, b, c, d] in FACES {
        for i in [a, b, c, a, c, d] {
            out.push(MarkerVertex {
                position: corner(i).to_array(),
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    fn boat() -> BoatPose {
        BoatPose {
            position: Vec3::new(0.0, 0.5, 10.0),
            roll_rad: 0.0,
            size_m: Vec3::new(1.0, 0.5, 2.0),
        }
    }

    #[test]
    fn test_empty_scene_has_light_and_boat() {
        let markers = build_markers(&SceneGraph::new(), Vec3::new(0.0, 10.0, 10.0), [1.0, 0.5, 0.2], &boat());
        assert_eq!(markers.len(), SPHERE_VERTICES + BOX_VERTICES);
    }

    #[test]
    fn test_flat_ripple_stays_at_its_height() {
        let mut scene = SceneGraph::new();
        let mut ripple = Entity::new(Shape::Disc { radius: 0.5 }, [1.0, 1.0, 1.0, 0.5])
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        ripple.position = Vec3::new(2.0, 0.1, -3.0);
        scene.add(ripple);

        let markers = build_markers(&scene, Vec3::Y, [1.0; 3], &boat());
        let disc = &markers[..DISC_VERTICES];

        for v in disc {
            assert!((v.position[1] - 0.1).abs() < 1e-5);
            let dx = v.position[0] - 2.0;
            let dz = v.position[2] + 3.0;
            assert!((dx * dx + dz * dz).sqrt() <= 0.5 + 1e-5);
            assert_eq!(v.color, [1.0, 1.0, 1.0, 0.5]);
        }
    }

    #[test]
    fn test_splash_sphere_within_radius() {
        let mut scene = SceneGraph::new();
        let mut splash = Entity::new(Shape::Sphere { radius: 0.1 }, [0.5, 0.8, 0.9, 0.5]);
        splash.position = Vec3::new(-1.0, 0.1, 4.0);
        scene.add(splash);

        let markers = build_markers(&scene, Vec3::Y, [1.0; 3], &boat());
        let sphere = &markers[..SPHERE_VERTICES];

        for v in sphere {
            let d = Vec3::from_array(v.position).distance(splash.position);
            assert!(d <= 0.1 + 1e-5);
        }
    }

    #[test]
    fn test_boat_box_extent_follows_size() {
        let markers = build_markers(&SceneGraph::new(), Vec3::Y, [1.0; 3], &boat());
        let hull = &markers[SPHERE_VERTICES..];

        let max_z = hull.iter().map(|v| v.position[2]).fold(f32::MIN, f32::max);
        let min_y = hull.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert!((max_z - 11.0).abs() < 1e-5);
        assert!((min_y - 0.25).abs() < 1e-5);
    }
}
