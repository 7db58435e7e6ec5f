//! Ocean grid mesh: a flat XZ plane whose vertex heights are rewritten every tick.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::params::OceanPhysics;

/// Vertex data for ocean mesh (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Ocean grid mesh centred on the origin
pub struct OceanGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    grid_size: usize,
    grid_spacing: f32,
    /// Set when vertex heights changed since the renderer last uploaded them
    dirty: bool,
}

impl OceanGrid {
    /// Create a new ocean grid with specified parameters
    pub fn new(physics: &OceanPhysics) -> Self {
        let grid_size = physics.grid_size;
        let grid_spacing = physics.grid_spacing_m;
        let half_size = (grid_size as f32 * grid_spacing) / 2.0;

        let mut vertices = Vec::with_capacity(physics.vertex_count());
        let mut indices = Vec::with_capacity(grid_size * grid_size * 6);

        // Generate flat XZ plane grid
        for z in 0..=grid_size {
            for x in 0..=grid_size {
                let x_pos = x as f32 * grid_spacing - half_size;
                let z_pos = z as f32 * grid_spacing - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    uv: [x as f32 / grid_size as f32, z as f32 / grid_size as f32],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding seen from above)
        for z in 0..grid_size {
            for x in 0..grid_size {
                let top_left = (z * (grid_size + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (grid_size + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            grid_size,
            grid_spacing,
            dirty: true,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Side length of the grid (meters)
    pub fn extent_m(&self) -> f32 {
        self.grid_size as f32 * self.grid_spacing
    }

    /// Overwrite the height of every vertex with `height_fn(index)`
    pub fn set_heights<F>(&mut self, mut height_fn: F)
    where
        F: FnMut(usize) -> f32,
    {
        for (idx, vertex) in self.vertices.iter_mut().enumerate() {
            vertex.position[1] = height_fn(idx);
        }
        self.dirty = true;
    }

    pub fn height(&self, index: usize) -> Option<f32> {
        self.vertices.get(index).map(|v| v.position[1])
    }

    /// Iterate triangles as world-space corner triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                Vec3::from_array(self.vertices[tri[0] as usize].position),
                Vec3::from_array(self.vertices[tri[1] as usize].position),
                Vec3::from_array(self.vertices[tri[2] as usize].position),
            ]
        })
    }

    /// Vertical bounds of the current surface as (min_y, max_y)
    pub fn height_bounds(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.position[1]), hi.max(v.position[1]))
            })
    }

    /// Whether heights changed since the last `take_dirty`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag (renderer upload handshake)
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
