//! Player ship
//!
//! Step order per frame: turn, accelerate, clamp, move, wrap, collide, fire.
//! A crash is terminal: the ship stays in the world, frozen, until reset.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityId, EntityKind};
use super::geometry::Vector2Ext;
use super::projectile::Projectile;
use super::state::{GameEvent, World};
use super::wrap::{self, Crossing, Quadrant, WrapAction, WrapMargins};
use crate::config::ShipConfig;
use crate::{normalize_angle, polar_to_cartesian};

/// The steerable player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: EntityId,
    pub body: Body,
    /// Nose direction (radians); 0 points up the screen
    pub heading: f32,
    /// Pixels per frame, in [0, max_velocity]
    pub velocity: f32,
    pub crossing: Crossing,
    pub crashed: bool,
    /// Simulated time of the last shot, `None` until the first one
    pub last_fire_ms: Option<f64>,
}

impl Ship {
    pub fn new(id: EntityId, center: Vec2, config: &ShipConfig) -> Self {
        Self {
            id,
            body: Body::new(center, config.radius),
            heading: 0.0,
            velocity: 0.0,
            crossing: Crossing::default(),
            crashed: false,
            last_fire_ms: None,
        }
    }

    /// Direction of travel in world angles (0 = +x)
    #[inline]
    pub fn direction(&self) -> f32 {
        self.heading - FRAC_PI_2
    }

    pub fn margins(config: &ShipConfig) -> WrapMargins {
        WrapMargins {
            enter: config.wrap_enter_margin,
            settle: config.wrap_settle_margin,
            discard: config.wrap_enter_margin,
        }
    }

    fn can_fire(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        self.last_fire_ms.is_none_or(|last| now_ms - last >= cooldown_ms)
    }

    fn steer(&mut self, world: &World) {
        let cfg = &world.config.ship;
        let input = world.input;

        if input.left {
            self.heading -= cfg.turn_step;
        }
        if input.right {
            self.heading += cfg.turn_step;
        }
        self.heading = normalize_angle(self.heading);

        let acceleration = if input.up {
            cfg.thrust
        } else if input.down {
            -cfg.brake
        } else {
            -cfg.drag
        };
        self.velocity = (self.velocity + acceleration).clamp(0.0, cfg.max_velocity);
    }

    /// Returns false if the ship left the world and was removed
    fn wrap(&mut self, world: &mut World) -> bool {
        let quadrant = Quadrant::from_direction(self.direction());
        let margins = Self::margins(&world.config.ship);
        match wrap::advance(&self.body, world.canvas_size, &margins, &quadrant, &mut self.crossing) {
            WrapAction::Stay => true,
            WrapAction::Mirror { offsets, crossing } => {
                for offset in offsets {
                    let mut mirror = self.clone();
                    mirror.id = world.next_entity_id();
                    mirror.body.center += offset;
                    mirror.crossing = crossing;
                    log::debug!("Ship {} mirrored as {} at {}", self.id, mirror.id, mirror.body.center);
                    world.append(mirror);
                }
                true
            }
            WrapAction::Discard => {
                log::debug!("Ship {} left the world", self.id);
                world.remove(self.entity_ref());
                false
            }
        }
    }

    fn fire(&mut self, world: &mut World) {
        let cfg = world.config.ship;
        let direction = self.direction();
        let muzzle = self.body.center + polar_to_cartesian(cfg.gun_offset, direction);
        let id = world.next_entity_id();
        let shot = Projectile::new(id, muzzle, direction, &world.config.projectile);
        world.append(shot);
        self.last_fire_ms = Some(world.time_ms);
    }
}

impl Entity for Ship {
    const KIND: EntityKind = EntityKind::Ship;

    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn collection(world: &mut World) -> &mut Vec<Self> {
        &mut world.ships
    }

    fn step(&mut self, world: &mut World) {
        if self.crashed {
            return;
        }

        self.steer(world);
        self.body.center.move_along(self.direction(), self.velocity);

        if !self.wrap(world) {
            return;
        }

        if let Some(rock) = world.query_collision(&self.body, None, EntityKind::Rock, 0.0) {
            self.crashed = true;
            world.split_rock(rock);
            world.emit(GameEvent::PlayerCrashed { ship: self.id });
            log::info!("Ship {} crashed into rock {} at {}", self.id, rock.id, self.body.center);
            return;
        }

        if world.input.fire && self.can_fire(world.time_ms, world.config.ship.fire_cooldown_ms) {
            self.fire(world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::rock::Rock;
    use crate::sim::wrap::Axis;
    use std::f32::consts::PI;

    fn world() -> World {
        World::empty(GameConfig::default(), Vec2::new(800.0, 600.0), 3).expect("valid world")
    }

    fn ship_at(world: &mut World, center: Vec2) -> Ship {
        let id = world.next_entity_id();
        Ship::new(id, center, &world.config.ship)
    }

    #[test]
    fn test_thrust_moves_up() {
        let mut w = world();
        let mut ship = ship_at(&mut w, Vec2::new(400.0, 300.0));
        w.input.up = true;

        ship.step(&mut w);
        assert!((ship.velocity - 0.3).abs() < 1e-6);
        assert!((ship.body.center.x - 400.0).abs() < 1e-4);
        assert!((ship.body.center.y - 299.7).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_clamped_both_ways() {
        let mut w = world();
        let mut ship = ship_at(&mut w, Vec2::new(400.0, 300.0));

        ship.step(&mut w);
        assert_eq!(ship.velocity, 0.0);

        ship.velocity = 9.9;
        w.input.up = true;
        ship.step(&mut w);
        assert_eq!(ship.velocity, 10.0);
    }

    #[test]
    fn test_turning_wraps_heading() {
        let mut w = world();
        let mut ship = ship_at(&mut w, Vec2::new(400.0, 300.0));
        w.input.left = true;
        for _ in 0..100 {
            ship.step(&mut w);
        }
        let expected = normalize_angle(-100.0 * w.config.ship.turn_step);
        assert!((ship.heading - expected).abs() < 1e-4);
        assert!((-PI..PI).contains(&ship.heading));
    }

    #[test]
    fn test_crash_is_terminal() {
        let mut w = world();
        let rock_id = w.next_entity_id();
        w.append(Rock::new(rock_id, Vec2::new(400.0, 260.0), 20.0, 0.0, 0.0, 18.0, None));
        w.apply_pending();

        let mut ship = ship_at(&mut w, Vec2::new(400.0, 300.0));
        ship.velocity = 10.0;
        ship.step(&mut w);
        w.apply_pending();

        assert!(ship.crashed);
        assert_eq!(w.drain_events(), vec![GameEvent::PlayerCrashed { ship: ship.id }]);
        // The hit rock splits
        assert_eq!(w.rocks.len(), 2);

        let frozen = ship.body.center;
        w.input.up = true;
        w.input.fire = true;
        ship.step(&mut w);
        assert_eq!(ship.body.center, frozen);
        w.apply_pending();
        assert!(w.projectiles.is_empty());
    }

    #[test]
    fn test_fire_spawns_projectile_at_gun() {
        let mut w = world();
        let mut ship = ship_at(&mut w, Vec2::new(400.0, 300.0));
        w.input.fire = true;
        w.time_ms = 1000.0;

        ship.step(&mut w);
        w.apply_pending();

        assert_eq!(w.projectiles.len(), 1);
        let shot = &w.projectiles[0];
        assert!((shot.body.center - Vec2::new(400.0, 285.0)).length() < 1e-3);
        assert!((shot.heading + FRAC_PI_2).abs() < 1e-6);
        assert_eq!(ship.last_fire_ms, Some(1000.0));
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut w = world();
        let mut ship = ship_at(&mut w, Vec2::new(400.0, 300.0));
        w.input.fire = true;

        ship.step(&mut w);
        w.time_ms += 150.0;
        ship.step(&mut w);
        w.apply_pending();
        assert_eq!(w.projectiles.len(), 1);

        w.time_ms += 50.0;
        ship.step(&mut w);
        w.apply_pending();
        assert_eq!(w.projectiles.len(), 2);
    }

    #[test]
    fn test_left_edge_spawns_mirror() {
        let mut w = world();
        let mut ship = ship_at(&mut w, Vec2::new(25.0, 300.0));
        ship.heading = -FRAC_PI_2;
        ship.velocity = 6.0;
        ship.last_fire_ms = Some(0.0);

        ship.step(&mut w);
        w.apply_pending();

        assert!(ship.crossing.is_crossing(Axis::X));
        assert_eq!(w.ships.len(), 1);
        let mirror = &w.ships[0];
        assert_ne!(mirror.id, ship.id);
        assert!((mirror.body.center.x - (ship.body.center.x + 800.0)).abs() < 1e-3);
        assert!(mirror.crossing.is_crossing(Axis::X));
        assert_eq!(mirror.velocity, ship.velocity);
        assert_eq!(mirror.heading, ship.heading);
        assert_eq!(mirror.last_fire_ms, Some(0.0));
    }

    #[test]
    fn test_crossing_ship_discarded_once_out() {
        let mut w = world();
        let mut ship = ship_at(&mut w, Vec2::new(-15.0, 300.0));
        w.append(ship.clone());
        w.apply_pending();

        ship.heading = -FRAC_PI_2;
        ship.velocity = 6.0;
        ship.crossing.x = wrap::AxisState::Crossing;
        ship.step(&mut w);
        w.apply_pending();

        assert!(w.ships.is_empty());
    }
}
