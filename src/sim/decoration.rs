//! Background stars
//!
//! Purely cosmetic: stars never collide and keep drifting while paused. A
//! star that leaves the screen is replaced by a new one instead of wrapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityId, EntityKind};
use super::geometry::Vector2Ext;
use super::state::World;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub id: EntityId,
    pub body: Body,
    pub heading: f32,
    pub velocity: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Decoration {
    pub fn new(id: EntityId, center: Vec2, radius: f32, heading: f32, velocity: f32, color: u32) -> Self {
        Self {
            id,
            body: Body::new(center, radius),
            heading,
            velocity,
            color,
        }
    }
}

impl Entity for Decoration {
    const KIND: EntityKind = EntityKind::Decoration;

    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn collection(world: &mut World) -> &mut Vec<Self> {
        &mut world.decorations
    }

    fn step(&mut self, world: &mut World) {
        if !world.is_fully_in_world(&self.body) {
            world.remove(self.entity_ref());
            let star = world.spawn_decoration();
            world.append(star);
            return;
        }
        self.body.center.move_along(self.heading, self.velocity);
    }
}
