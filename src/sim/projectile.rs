//! Projectiles fired by the ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityId, EntityKind};
use super::geometry::Vector2Ext;
use super::state::World;
use crate::config::ProjectileConfig;

/// A short-lived shot travelling in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub body: Body,
    /// Direction of travel (radians)
    pub heading: f32,
    pub velocity: f32,
    /// Frames left; the world sweeps projectiles at or below zero
    pub ttl: i32,
}

impl Projectile {
    pub fn new(id: EntityId, center: Vec2, heading: f32, config: &ProjectileConfig) -> Self {
        Self {
            id,
            body: Body::new(center, config.radius),
            heading,
            velocity: config.velocity,
            ttl: config.ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ttl <= 0
    }
}

impl Entity for Projectile {
    const KIND: EntityKind = EntityKind::Projectile;

    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn collection(world: &mut World) -> &mut Vec<Self> {
        &mut world.projectiles
    }

    fn step(&mut self, world: &mut World) {
        self.ttl -= 1;
        self.body.center.move_along(self.heading, self.velocity);

        if let Some(rock) = world.query_collision(&self.body, None, EntityKind::Rock, 0.0) {
            self.ttl = 0;
            world.split_rock(rock);
        }
    }
}
