//! Pointer picking: screen position to world-space hit on a target surface.

use glam::{Vec2, Vec3};
use log::debug;

use crate::camera::Camera;
use crate::ocean::OceanGrid;

/// Minimum accepted hit distance and determinant magnitude
const EPSILON: f32 = 1e-6;

/// Half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized (zero stays zero and hits nothing)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Pointer click in device pixels with the viewport it happened in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x_px: f32,
    pub y_px: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl PointerEvent {
    /// Normalized device coordinates, `[-1, 1]` on both axes with y up
    ///
    /// Returns `None` for an empty viewport or a pointer outside it.
    pub fn to_ndc(&self) -> Option<Vec2> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return None;
        }
        let (w, h) = (self.viewport_width as f32, self.viewport_height as f32);
        if !(0.0..=w).contains(&self.x_px) || !(0.0..=h).contains(&self.y_px) {
            return None;
        }
        Some(Vec2::new(
            (self.x_px / w) * 2.0 - 1.0,
            -(self.y_px / h) * 2.0 + 1.0,
        ))
    }
}

/// Surface that can be hit by a pick ray
pub trait PickSurface {
    /// Distance along `ray` to the nearest hit in front of the origin
    fn intersect(&self, ray: &Ray) -> Option<f32>;
}

/// Infinite horizontal plane, hit from either side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPlane {
    pub height_m: f32,
}

impl PickSurface for HorizontalPlane {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        if ray.direction.y.abs() < EPSILON {
            return None;
        }
        let t = (self.height_m - ray.origin.y) / ray.direction.y;
        (t > EPSILON).then_some(t)
    }
}

/// Double-sided ray/triangle test (Möller–Trumbore)
pub fn intersect_triangle(ray: &Ray, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

impl PickSurface for OceanGrid {
    /// Nearest hit over the displaced surface triangles
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        // Skip the triangle walk when the ray never enters the surface's height band
        let (min_y, max_y) = self.height_bounds();
        let dy = ray.direction.y;
        if dy.abs() < EPSILON && !(min_y..=max_y).contains(&ray.origin.y) {
            return None;
        }
        if (dy > 0.0 && ray.origin.y > max_y) || (dy < 0.0 && ray.origin.y < min_y) {
            return None;
        }

        self.triangles()
            .filter_map(|tri| intersect_triangle(ray, tri))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Cast a ray from `camera` through the pointer and hit-test `surface` only
///
/// Returns the nearest impact point, or `None` when the pointer is outside the
/// viewport or the ray misses the surface.
pub fn pick(pointer: &PointerEvent, camera: &Camera, surface: &impl PickSurface) -> Option<Vec3> {
    let ndc = pointer.to_ndc()?;
    let ray = camera.ray_from_ndc(ndc);
    let hit = surface.intersect(&ray).map(|t| ray.at(t));
    debug!(
        "Pick at ({:.0}, {:.0}) px -> ndc {:?} -> {:?}",
        pointer.x_px, pointer.y_px, ndc, hit
    );
    hit
}
