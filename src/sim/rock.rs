//! Rocks: drifting, wrapping and splitting
//!
//! A rock hit by a projectile (or a ship) splits into two half-size, faster
//! rocks fanned out around its heading. Rocks at or below their minimum
//! radius are destroyed instead, so every rock lineage ends after at most
//! log2(radius / min_radius) splits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityId, EntityKind, SpriteId};
use super::geometry::Vector2Ext;
use super::state::{GameEvent, World};
use super::wrap::{self, Crossing, Quadrant, WrapAction, WrapMargins};
use crate::config::RockWrapMode;

/// A breakable rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub id: EntityId,
    pub body: Body,
    /// Pixels per frame
    pub velocity: f32,
    /// Direction of travel (radians)
    pub heading: f32,
    /// Split floor
    pub min_radius: f32,
    pub crossing: Crossing,
    /// Edges the rock is heading for, fixed at construction
    pub quadrant: Quadrant,
    /// Image used when drawing; physics ignores it
    pub sprite: Option<SpriteId>,
    /// Used by `RockWrapMode::Respawn`: set once the rock has been on screen
    #[serde(default)]
    pub was_in_world: bool,
}

impl Rock {
    pub fn new(
        id: EntityId,
        center: Vec2,
        radius: f32,
        velocity: f32,
        heading: f32,
        min_radius: f32,
        sprite: Option<SpriteId>,
    ) -> Self {
        Self {
            id,
            body: Body::new(center, radius),
            velocity,
            heading,
            min_radius,
            crossing: Crossing::default(),
            quadrant: Quadrant::from_direction(heading),
            sprite,
            was_in_world: false,
        }
    }

    /// Rocks start and finish crossings one radius from the edge
    pub fn margins(&self) -> WrapMargins {
        WrapMargins::uniform(self.body.radius)
    }

    /// Replace this rock by two smaller ones, or destroy it at the size floor
    pub fn divide(&self, world: &mut World) {
        let this = self.entity_ref();

        if self.body.radius <= self.min_radius {
            world.remove(this);
            world.emit(GameEvent::RockDestroyed { rock: self.id });
            log::info!("Rock {} destroyed (radius {})", self.id, self.body.radius);
            return;
        }

        let rc = world.config.rock;
        let first = self.heading - rc.split_angle_deg.to_radians();
        for heading in [first, -first] {
            let id = world.next_entity_id();
            let mut child = Rock::new(
                id,
                self.body.center,
                self.body.radius / 2.0,
                self.velocity * rc.split_speed_factor,
                heading,
                self.min_radius,
                self.sprite,
            );
            // Children carry on any wrap already in progress
            child.crossing = self.crossing;
            child.was_in_world = self.was_in_world;
            world.append(child);
        }
        world.remove(this);
        log::debug!("Rock {} split (radius {})", self.id, self.body.radius);
    }

    fn wrap_mirrored(&mut self, world: &mut World) {
        let action = wrap::advance(
            &self.body,
            world.canvas_size,
            &self.margins(),
            &self.quadrant,
            &mut self.crossing,
        );
        match action {
            WrapAction::Stay => {}
            WrapAction::Mirror { offsets, crossing } => {
                for offset in offsets {
                    let mut mirror = self.clone();
                    mirror.id = world.next_entity_id();
                    mirror.body.center += offset;
                    mirror.crossing = crossing;
                    log::debug!("Rock {} mirrored as {} at {}", self.id, mirror.id, mirror.body.center);
                    world.append(mirror);
                }
            }
            WrapAction::Discard => {
                log::debug!("Rock {} left the world", self.id);
                world.remove(self.entity_ref());
            }
        }
    }

    fn wrap_respawned(&mut self, world: &mut World) {
        let in_world = world.is_partially_in_world(&self.body);
        if !in_world && self.was_in_world {
            world.remove(self.entity_ref());
            let mut fresh = world.spawn_rock();
            fresh.step(world);
            log::debug!("Rock {} left the world, replaced by {}", self.id, fresh.id);
            world.append(fresh);
        } else if in_world && !self.was_in_world {
            self.was_in_world = true;
        }
    }
}

impl Entity for Rock {
    const KIND: EntityKind = EntityKind::Rock;

    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn collection(world: &mut World) -> &mut Vec<Self> {
        &mut world.rocks
    }

    fn step(&mut self, world: &mut World) {
        let clamped = self.velocity.abs().min(world.config.rock.max_velocity);
        if clamped != self.velocity {
            log::warn!("Rock {} velocity {} clamped to {}", self.id, self.velocity, clamped);
            self.velocity = clamped;
        }
        self.body.center.move_along(self.heading, self.velocity);

        match world.config.rock_wrap {
            RockWrapMode::Mirror => self.wrap_mirrored(world),
            RockWrapMode::Respawn => self.wrap_respawned(world),
        }
    }
}
