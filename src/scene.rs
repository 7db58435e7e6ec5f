//! Retained scene container for transient entities.
//!
//! Only entities that come and go at runtime live here. The ocean, rain and
//! boat are owned by their animation systems and handed to the renderer
//! directly.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};

/// Opaque handle to an entity inserted into a scene
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

/// Renderable primitive
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// Sphere of the given radius (meters)
    Sphere { radius: f32 },
    /// Flat disc in the entity's local XY plane (meters)
    Disc { radius: f32 },
}

/// Placed, coloured primitive
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entity {
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Quat,
    /// Linear RGBA
    pub color: [f32; 4],
}

impl Entity {
    pub fn new(shape: Shape, color: [f32; 4]) -> Self {
        Self {
            shape,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            color,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Scene insertion capability handed to effect owners
pub trait Scene {
    /// Insert an entity and return its handle
    fn add(&mut self, entity: Entity) -> EntityId;

    /// Remove an entity, returning it if it was present
    fn remove(&mut self, id: EntityId) -> Option<Entity>;
}

/// In-memory scene graph, iterated in insertion order by the renderer
#[derive(Debug, Default)]
pub struct SceneGraph {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }
}

impl Scene for SceneGraph {
    fn add(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        id
    }

    fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }
}
