//! Ocean surface: grid mesh plus the sine wave field that animates it.

mod mesh;
mod wave;

// Re-export public types
pub use mesh::{OceanGrid, Vertex};
pub use wave::WaveField;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OceanPhysics;

    #[test]
    fn test_ocean_grid_creation() {
        let physics = OceanPhysics::default();
        let grid = OceanGrid::new(&physics);

        // Check vertex count: (grid_size + 1)^2
        assert_eq!(grid.vertices.len(), (physics.grid_size + 1).pow(2));

        // Check triangle count: grid_size^2 * 2 triangles * 3 indices
        assert_eq!(grid.indices.len(), physics.grid_size.pow(2) * 6);

        // Grid spans the configured extent, centred on the origin
        let first = grid.vertices[0].position;
        let last = grid.vertices[grid.vertices.len() - 1].position;
        assert!((first[0] + 25.0).abs() < 1e-5);
        assert!((last[2] - 25.0).abs() < 1e-5);
    }

    #[test]
    fn test_wave_height_formula() {
        let physics = OceanPhysics::default();
        let mut field = WaveField::new(&physics).unwrap();

        let t = 3.7_f32;
        field.update(t);

        for i in [0usize, 1, 57, 5000, field.grid.vertex_count() - 1] {
            let expected = ((i as f32 + t * 5.0) * 0.05).sin();
            let actual = field.grid.height(i).unwrap();
            assert!(
                (actual - expected).abs() < 1e-5,
                "vertex {}: expected {}, got {}",
                i,
                expected,
                actual
            );
            assert_eq!(actual, field.height_at(i, t));
        }
    }

    #[test]
    fn test_wave_update_is_idempotent() {
        let physics = OceanPhysics::default();
        let mut field = WaveField::new(&physics).unwrap();

        field.update(1.25);
        let first: Vec<f32> = field.grid.vertices.iter().map(|v| v.position[1]).collect();

        // Different time in between, then back to the same time
        field.update(9.0);
        field.update(1.25);
        let second: Vec<f32> = field.grid.vertices.iter().map(|v| v.position[1]).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_wave_update_only_touches_height() {
        let physics = OceanPhysics::default();
        let mut field = WaveField::new(&physics).unwrap();
        let before: Vec<[f32; 2]> = field
            .grid
            .vertices
            .iter()
            .map(|v| [v.position[0], v.position[2]])
            .collect();

        field.update(2.0);

        let after: Vec<[f32; 2]> = field
            .grid
            .vertices
            .iter()
            .map(|v| [v.position[0], v.position[2]])
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_dirty_flag_handshake() {
        let physics = OceanPhysics::default();
        let mut field = WaveField::new(&physics).unwrap();

        assert!(field.grid.take_dirty()); // fresh grid needs an upload
        assert!(!field.grid.is_dirty());

        field.update(0.5);
        assert!(field.grid.take_dirty());
        assert!(!field.grid.take_dirty());
    }

    #[test]
    fn test_invalid_physics_rejected() {
        let physics = OceanPhysics {
            wave_speed: -1.0,
            ..OceanPhysics::default()
        };
        assert!(WaveField::new(&physics).is_err());
    }
}
