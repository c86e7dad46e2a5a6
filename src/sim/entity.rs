//! Entity model
//!
//! Every simulated object carries a `Body` and a closed `EntityKind`. The world
//! stores one `Vec` per kind; entities refer to each other only through
//! `EntityRef` handles, never through borrows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::decoration::Decoration;
use super::projectile::Projectile;
use super::rock::Rock;
use super::ship::Ship;
use super::state::World;

/// Per-world unique entity identifier
pub type EntityId = u32;

/// Discriminant selecting which world collection an entity lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Projectile,
    Rock,
    Decoration,
}

/// Handle to an entity in a world collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

/// Opaque handle to a loaded image, attached to rocks for drawing only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Bounding circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub center: Vec2,
    /// Always > 0
    pub radius: f32,
}

impl Body {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Behaviour shared by all simulated objects
pub trait Entity: Sized {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn body(&self) -> &Body;

    /// Advance one frame. May queue appends/removals on the world.
    fn step(&mut self, world: &mut World);

    /// The world collection holding entities of this kind
    fn collection(world: &mut World) -> &mut Vec<Self>;

    fn entity_ref(&self) -> EntityRef {
        EntityRef {
            kind: Self::KIND,
            id: self.id(),
        }
    }
}

/// An entity of any kind, used to queue appends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnyEntity {
    Ship(Ship),
    Projectile(Projectile),
    Rock(Rock),
    Decoration(Decoration),
}

impl AnyEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyEntity::Ship(_) => EntityKind::Ship,
            AnyEntity::Projectile(_) => EntityKind::Projectile,
            AnyEntity::Rock(_) => EntityKind::Rock,
            AnyEntity::Decoration(_) => EntityKind::Decoration,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        match self {
            AnyEntity::Ship(e) => e.entity_ref(),
            AnyEntity::Projectile(e) => e.entity_ref(),
            AnyEntity::Rock(e) => e.entity_ref(),
            AnyEntity::Decoration(e) => e.entity_ref(),
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            AnyEntity::Ship(e) => e.body(),
            AnyEntity::Projectile(e) => e.body(),
            AnyEntity::Rock(e) => e.body(),
            AnyEntity::Decoration(e) => e.body(),
        }
    }
}

impl From<Ship> for AnyEntity {
    fn from(e: Ship) -> Self {
        AnyEntity::Ship(e)
    }
}

impl From<Projectile> for AnyEntity {
    fn from(e: Projectile) -> Self {
        AnyEntity::Projectile(e)
    }
}

impl From<Rock> for AnyEntity {
    fn from(e: Rock) -> Self {
        AnyEntity::Rock(e)
    }
}

impl From<Decoration> for AnyEntity {
    fn from(e: Decoration) -> Self {
        AnyEntity::Decoration(e)
    }
}
