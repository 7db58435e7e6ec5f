//! Pooled splash/ripple entities with bounded live counts.

use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use glam::{Quat, Vec3};
use log::debug;

use super::{EffectHandle, EffectKind, ExpiryQueue};
use crate::error::ConfigError;
use crate::params::EffectParams;
use crate::scene::{Entity, EntityId, Scene, Shape};

/// Splash colour: 0x87ceeb at half opacity
const SPLASH_COLOR: [f32; 4] = [0.529, 0.808, 0.922, 0.5];

/// Ripple colour: white at half opacity
const RIPPLE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];

/// Snapshot of a live effect
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EffectInfo {
    pub kind: EffectKind,
    pub position: Vec3,
    pub spawned_at: Duration,
    pub expires_at: Duration,
    pub entity: EntityId,
}

/// Running counters per effect kind
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub spawned: [u64; 2],
    pub expired: [u64; 2],
    pub evicted: [u64; 2],
}

impl PoolStats {
    pub fn spawned(&self, kind: EffectKind) -> u64 {
        self.spawned[kind.index()]
    }

    pub fn expired(&self, kind: EffectKind) -> u64 {
        self.expired[kind.index()]
    }

    pub fn evicted(&self, kind: EffectKind) -> u64 {
        self.evicted[kind.index()]
    }
}

/// Pool entry; keeps its entity description while inactive so it can be reused
struct EffectSlot {
    generation: u32,
    kind: EffectKind,
    entity: Entity,
    live: Option<EffectInfo>,
}

/// Owns every splash and ripple and their presence in the scene
pub struct EffectPool {
    params: EffectParams,
    slots: Vec<EffectSlot>,
    /// Inactive slot indices per kind
    free: [Vec<u32>; 2],
    /// Live handles per kind in spawn order (may hold stale entries at the front)
    live_order: [VecDeque<EffectHandle>; 2],
    live_count: [usize; 2],
    expiry: ExpiryQueue,
    stats: PoolStats,
}

impl EffectPool {
    pub fn new(params: &EffectParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params: params.clone(),
            slots: Vec::new(),
            free: [Vec::new(), Vec::new()],
            live_order: [VecDeque::new(), VecDeque::new()],
            live_count: [0; 2],
            expiry: ExpiryQueue::new(),
            stats: PoolStats::default(),
        })
    }

    /// Spawn a splash sphere at `(x, spawn_height, z)`
    pub fn spawn_splash(
        &mut self,
        x: f32,
        z: f32,
        now: Duration,
        scene: &mut impl Scene,
    ) -> EffectHandle {
        self.spawn(EffectKind::Splash, x, z, now, scene)
    }

    /// Spawn a ripple disc lying flat on the water at `(x, spawn_height, z)`
    pub fn spawn_ripple(
        &mut self,
        x: f32,
        z: f32,
        now: Duration,
        scene: &mut impl Scene,
    ) -> EffectHandle {
        self.spawn(EffectKind::Ripple, x, z, now, scene)
    }

    /// Insert an effect into the scene and schedule its removal after its TTL
    ///
    /// When the kind is at its live cap, the oldest live effect of that kind is
    /// removed first.
    pub fn spawn(
        &mut self,
        kind: EffectKind,
        x: f32,
        z: f32,
        now: Duration,
        scene: &mut impl Scene,
    ) -> EffectHandle {
        let k = kind.index();
        if self.live_count[k] >= self.max_live(kind) {
            self.evict_oldest(kind, scene);
        }

        let slot = match self.free[k].pop() {
            Some(slot) => slot,
            None => {
                let entity = self.template(kind);
                self.slots.push(EffectSlot {
                    generation: 0,
                    kind,
                    entity,
                    live: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let position = Vec3::new(x, self.params.spawn_height_m, z);
        let expires_at = now + self.ttl(kind);

        let entry = &mut self.slots[slot as usize];
        entry.entity.position = position;
        let entity = scene.add(entry.entity);
        entry.live = Some(EffectInfo {
            kind,
            position,
            spawned_at: now,
            expires_at,
            entity,
        });

        let handle = EffectHandle {
            slot,
            generation: entry.generation,
        };
        self.expiry.schedule(expires_at, handle);
        self.live_order[k].push_back(handle);
        self.live_count[k] += 1;
        self.stats.spawned[k] += 1;

        handle
    }

    /// Remove every effect whose deadline is at or before `now`
    ///
    /// An effect spawned at `t0` is live for `[t0, t0 + ttl)`.
    ///
    /// # Returns
    /// Number of effects removed
    pub fn expire(&mut self, now: Duration, scene: &mut impl Scene) -> usize {
        let mut removed = 0;
        while let Some(handle) = self.expiry.pop_due(now) {
            // Evicted handles leave stale queue entries behind
            if let Some(kind) = self.release(handle, scene) {
                self.stats.expired[kind.index()] += 1;
                removed += 1;
            }
        }
        removed
    }

    /// Remove every live effect from the scene and cancel all pending expiries
    pub fn clear(&mut self, scene: &mut impl Scene) {
        let live: Vec<EffectHandle> = self
            .live_order
            .iter()
            .flat_map(|order| order.iter().copied())
            .collect();
        for handle in live {
            self.release(handle, scene);
        }
        self.expiry.clear();
    }

    /// Cancel all pending expiries without touching the scene
    ///
    /// For when the scene itself is being destroyed. Every outstanding handle
    /// becomes stale and the pool is left empty.
    pub fn teardown(&mut self) {
        self.expiry.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.live.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free[slot.kind.index()].push(idx as u32);
            }
        }
        for order in &mut self.live_order {
            order.clear();
        }
        self.live_count = [0; 2];
    }

    pub fn is_live(&self, handle: EffectHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: EffectHandle) -> Option<&EffectInfo> {
        self.slots
            .get(handle.slot as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.live.as_ref())
    }

    pub fn live_count(&self, kind: EffectKind) -> usize {
        self.live_count[kind.index()]
    }

    pub fn total_live(&self) -> usize {
        self.live_count.iter().sum()
    }

    /// Number of pooled slots, live or idle
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of pending (possibly stale) expiry entries
    pub fn pending_expiries(&self) -> usize {
        self.expiry.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.expiry.next_deadline()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn ttl(&self, kind: EffectKind) -> Duration {
        match kind {
            EffectKind::Splash => self.params.splash_ttl,
            EffectKind::Ripple => self.params.ripple_ttl,
        }
    }

    fn max_live(&self, kind: EffectKind) -> usize {
        match kind {
            EffectKind::Splash => self.params.max_live_splashes,
            EffectKind::Ripple => self.params.max_live_ripples,
        }
    }

    fn template(&self, kind: EffectKind) -> Entity {
        match kind {
            EffectKind::Splash => Entity::new(
                Shape::Sphere {
                    radius: self.params.splash_radius_m,
                },
                SPLASH_COLOR,
            ),
            // Disc lies in local XY; tip it onto the ground plane
            EffectKind::Ripple => Entity::new(
                Shape::Disc {
                    radius: self.params.ripple_radius_m,
                },
                RIPPLE_COLOR,
            )
            .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        }
    }

    fn evict_oldest(&mut self, kind: EffectKind, scene: &mut impl Scene) {
        let k = kind.index();
        while let Some(handle) = self.live_order[k].pop_front() {
            if self.release(handle, scene).is_some() {
                self.stats.evicted[k] += 1;
                debug!("Evicted oldest {:?} at live cap {}", kind, self.max_live(kind));
                return;
            }
        }
    }

    /// Take a live effect out of the scene and return its slot to the free list
    fn release(&mut self, handle: EffectHandle, scene: &mut impl Scene) -> Option<EffectKind> {
        let slot = self.slots.get_mut(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let info = slot.live.take()?;

        if scene.remove(info.entity).is_none() {
            debug!("{:?} entity {:?} was already gone from the scene", info.kind, info.entity);
        }
        slot.generation = slot.generation.wrapping_add(1);

        let k = info.kind.index();
        self.free[k].push(handle.slot);
        self.live_count[k] -= 1;

        // Drop stale entries so the spawn-order queue stays bounded
        while let Some(&front) = self.live_order[k].front() {
            if self.is_live(front) {
                break;
            }
            self.live_order[k].pop_front();
        }

        Some(info.kind)
    }
}
