//! Rain particle swarm with in-place recycling.
//!
//! Drops fall straight down in fixed columns. A drop that passes below the
//! floor is respawned at a random height in the same column, and a recycle
//! event is reported at its horizontal position so the caller can splash.

use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{require_positive, ConfigError};
use crate::params::RainParams;

/// Single rain drop (GPU-compatible point vertex)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RainDrop {
    pub position: [f32; 3],
}

/// A drop crossed the floor this step and was respawned
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RecycleEvent {
    /// Index of the recycled drop
    pub index: usize,
    /// Column x position (unchanged by the recycle)
    pub x: f32,
    /// Column z position (unchanged by the recycle)
    pub z: f32,
}

/// Fixed-size rain swarm
pub struct ParticleSystem<R = StdRng> {
    drops: Vec<RainDrop>,
    floor_m: f32,
    ceiling_m: f32,
    fall_speed_m: f32,
    rng: R,
}

impl ParticleSystem<StdRng> {
    /// Create a swarm seeded from `params.seed`, or from OS entropy when unset
    pub fn new(params: &RainParams) -> Result<Self, ConfigError> {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(params, rng)
    }
}

impl<R: Rng> ParticleSystem<R> {
    /// Create a swarm with randomised positions drawn from `rng`
    ///
    /// x and z are uniform in `[-half_extent, half_extent)`, y is uniform in
    /// `[floor, ceiling)`.
    pub fn with_rng(params: &RainParams, mut rng: R) -> Result<Self, ConfigError> {
        params.validate()?;

        let h = params.half_extent_m;
        let drops = (0..params.drop_count)
            .map(|_| RainDrop {
                position: [
                    rng.gen_range(-h..h),
                    rng.gen_range(params.floor_m..params.ceiling_m),
                    rng.gen_range(-h..h),
                ],
            })
            .collect();

        Ok(Self {
            drops,
            floor_m: params.floor_m,
            ceiling_m: params.ceiling_m,
            fall_speed_m: params.fall_speed_m,
            rng,
        })
    }

    /// Create a swarm from a flat `[x, y, z, x, y, z, ...]` buffer
    ///
    /// `params.drop_count` and `params.half_extent_m` are ignored; the buffer
    /// decides the swarm size. Fails if the buffer is empty or not made of
    /// whole triples.
    pub fn from_positions(params: &RainParams, positions: &[f32], rng: R) -> Result<Self, ConfigError> {
        if positions.len() % 3 != 0 {
            return Err(ConfigError::BufferNotTriples {
                len: positions.len(),
            });
        }
        if positions.is_empty() {
            return Err(ConfigError::BufferTooSmall {
                expected: 3,
                actual: 0,
            });
        }
        params.validate()?;

        let drops = positions
            .chunks_exact(3)
            .map(|p| RainDrop {
                position: [p[0], p[1], p[2]],
            })
            .collect();

        Ok(Self {
            drops,
            floor_m: params.floor_m,
            ceiling_m: params.ceiling_m,
            fall_speed_m: params.fall_speed_m,
            rng,
        })
    }

    /// Advance every drop by one tick
    ///
    /// Each drop falls by the fall speed. A drop that ends below the floor is
    /// respawned at a random height in `[floor, ceiling)` and `on_recycle` is
    /// called with its column before the next drop is processed. A drop is
    /// recycled at most once per step.
    ///
    /// # Returns
    /// Number of recycled drops
    pub fn step<F>(&mut self, mut on_recycle: F) -> usize
    where
        F: FnMut(RecycleEvent),
    {
        let mut recycled = 0;

        for (index, drop) in self.drops.iter_mut().enumerate() {
            let [x, y, z] = &mut drop.position;
            *y -= self.fall_speed_m;

            if *y < self.floor_m {
                *y = self.rng.gen_range(self.floor_m..self.ceiling_m);
                recycled += 1;
                on_recycle(RecycleEvent {
                    index,
                    x: *x,
                    z: *z,
                });
            }
        }

        recycled
    }

    /// Advance one tick and collect the recycle events
    pub fn step_collect(&mut self) -> Vec<RecycleEvent> {
        let mut events = Vec::new();
        self.step(|event| events.push(event));
        events
    }

    /// Change the per-tick fall distance
    pub fn set_fall_speed(&mut self, fall_speed_m: f32) -> Result<(), ConfigError> {
        require_positive("fall_speed_m", fall_speed_m)?;
        self.fall_speed_m = fall_speed_m;
        Ok(())
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed_m
    }

    pub fn ceiling(&self) -> f32 {
        self.ceiling_m
    }

    pub fn floor(&self) -> f32 {
        self.floor_m
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }
}
