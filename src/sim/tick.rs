//! Fixed-timestep frame advance
//!
//! Phase order is fixed: decorations, then (unless paused) ships, projectiles
//! and rocks, then the projectile expiry sweep. Each phase walks a stable
//! snapshot of its collection; changes queued during the phase are applied
//! when it ends.

use super::decoration::Decoration;
use super::entity::Entity;
use super::projectile::Projectile;
use super::rock::Rock;
use super::ship::Ship;
use super::state::World;
use crate::input::InputState;

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &InputState) {
    world.input = *input;
    world.apply_pending();
    world.frame += 1;
    world.time_ms += world.config.frame_ms;

    step_phase::<Decoration>(world);

    if world.paused {
        return;
    }

    step_phase::<Ship>(world);
    step_phase::<Projectile>(world);
    step_phase::<Rock>(world);

    sweep_expired_projectiles(world);
}

/// Step every entity of one kind
fn step_phase<T: Entity>(world: &mut World) {
    let mut items = std::mem::take(T::collection(world));
    for item in items.iter_mut() {
        if world.is_pending_removal(item.entity_ref()) {
            continue;
        }
        item.step(world);
    }
    *T::collection(world) = items;
    world.apply_pending();
}

fn sweep_expired_projectiles(world: &mut World) {
    let before = world.projectiles.len();
    world.projectiles.retain(|p| !p.is_expired());
    let swept = before - world.projectiles.len();
    if swept > 0 {
        log::debug!("Swept {} expired projectiles", swept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::normalize_angle;
    use crate::sim::wrap::{AxisState, Crossing};
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const THRUST: InputState = InputState {
        up: true,
        down: false,
        left: false,
        right: false,
        fire: false,
    };

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    fn quiet_config() -> GameConfig {
        GameConfig {
            spawn_rocks: false,
            spawn_stars: false,
            ..Default::default()
        }
    }

    fn rock_world(center: Vec2, radius: f32, velocity: f32, heading: f32) -> World {
        let mut world = World::empty(quiet_config(), SIZE, 8).expect("valid world");
        let id = world.next_entity_id();
        world.append(Rock::new(id, center, radius, velocity, heading, 18.0, None));
        world.apply_pending();
        world.start();
        world
    }

    /// A ship at full speed flying in world direction `direction`
    fn ship_world(center: Vec2, direction: f32) -> World {
        let mut world = World::empty(quiet_config(), SIZE, 8).expect("valid world");
        let id = world.next_entity_id();
        let mut ship = Ship::new(id, center, &world.config.ship);
        ship.heading = normalize_angle(direction + FRAC_PI_2);
        ship.velocity = world.config.ship.max_velocity;
        world.append(ship);
        world.apply_pending();
        world.start();
        world
    }

    /// Copies of one wrapping entity: 1 normally, up to 4 at a corner, and
    /// never two settled copies at once
    fn check_copies(crossings: &[Crossing]) -> Result<(), String> {
        if !(1..=4).contains(&crossings.len()) {
            return Err(format!("{} copies", crossings.len()));
        }
        if crossings.len() > 1 && crossings.iter().all(|c| !c.any()) {
            return Err(format!("{} settled copies", crossings.len()));
        }
        Ok(())
    }

    fn settled_single(crossings: &[Crossing]) -> bool {
        crossings.len() == 1 && !crossings[0].any()
    }

    fn rock_crossings(world: &World) -> Vec<Crossing> {
        world.rocks.iter().map(|r| r.crossing).collect()
    }

    fn ship_crossings(world: &World) -> Vec<Crossing> {
        world.ships.iter().map(|s| s.crossing).collect()
    }

    /// Tick until the entity is back to one settled copy, checking every frame
    fn run_until_settled(
        world: &mut World,
        input: &InputState,
        crossings: fn(&World) -> Vec<Crossing>,
        max_frames: usize,
    ) -> Result<usize, String> {
        for frame in 1..=max_frames {
            tick(world, input);
            let copies = crossings(world);
            check_copies(&copies).map_err(|e| format!("frame {frame}: {e}"))?;
            if settled_single(&copies) {
                return Ok(frame);
            }
        }
        Err(format!("not settled after {max_frames} frames"))
    }

    #[test]
    fn test_paused_world_only_moves_decorations() {
        let mut world = World::new(GameConfig::default(), SIZE, 21, Vec::new()).expect("valid world");
        assert!(world.paused);
        let rocks: Vec<Vec2> = world.rocks.iter().map(|r| r.body.center).collect();
        let ship = world.ships[0].body.center;
        let stars: Vec<Vec2> = world.decorations.iter().map(|d| d.body.center).collect();

        let input = InputState {
            up: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut world, &input);
        }

        assert_eq!(world.rocks.iter().map(|r| r.body.center).collect::<Vec<_>>(), rocks);
        assert_eq!(world.ships[0].body.center, ship);
        assert!(world.projectiles.is_empty());
        assert_ne!(world.decorations.iter().map(|d| d.body.center).collect::<Vec<_>>(), stars);
        assert_eq!(world.decorations.len(), 40);
        assert_eq!(world.frame, 10);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut world =
                World::new(GameConfig::default(), SIZE, 1234, Vec::new()).expect("valid world");
            world.start();
            for frame in 0..300 {
                let input = InputState {
                    up: frame % 40 < 20,
                    left: frame % 90 < 30,
                    fire: frame % 3 == 0,
                    ..Default::default()
                };
                tick(&mut world, &input);
            }
            (
                world.stats(),
                world.rocks.iter().map(|r| r.body).collect::<Vec<_>>(),
                world.drain_events(),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_rock_crossing_settles_to_one() {
        let mut world = rock_world(Vec2::new(5.0, 300.0), 20.0, 2.0, PI);

        tick(&mut world, &InputState::default());
        assert_eq!(world.rocks.len(), 2);

        for _ in 0..99 {
            tick(&mut world, &InputState::default());
        }
        assert_eq!(world.rocks.len(), 1);
        let rock = &world.rocks[0];
        assert!(world.is_fully_in_world(&rock.body));
        assert_eq!(rock.crossing.x, AxisState::Inside);
        assert!((rock.body.center.x - 605.0).abs() < 0.1);
    }

    #[test]
    fn test_projectile_expires_after_ttl() {
        let mut world = World::new(quiet_config(), SIZE, 5, Vec::new()).expect("valid world");
        world.start();

        let fire = InputState {
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &fire);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].ttl, 49);

        for _ in 0..48 {
            tick(&mut world, &InputState::default());
        }
        assert_eq!(world.projectiles.len(), 1);

        tick(&mut world, &InputState::default());
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_crash_reaches_event_queue() {
        let mut world = World::new(quiet_config(), SIZE, 6, Vec::new()).expect("valid world");
        let ship = world.ships[0].body.center;
        let id = world.next_entity_id();
        world.append(Rock::new(id, ship - Vec2::new(0.0, 30.0), 18.0, 0.0, 0.0, 18.0, None));
        world.start();

        let thrust = InputState {
            up: true,
            ..Default::default()
        };
        tick(&mut world, &thrust);

        assert!(world.ships[0].crashed);
        assert!(world.rocks.is_empty());
        let events = world.drain_events();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_ship_corner_crossing_keeps_one_ship() {
        let mut world = ship_world(Vec2::new(22.0, 60.0), 240f32.to_radians());

        let mut most = 0;
        for frame in 0..30 {
            tick(&mut world, &THRUST);
            let copies = ship_crossings(&world);
            if let Err(e) = check_copies(&copies) {
                panic!("frame {frame}: {e}");
            }
            most = most.max(copies.len());
        }
        assert_eq!(most, 4);
        assert_eq!(world.ships.len(), 1);
        let ship = &world.ships[0];
        assert!(!ship.crossing.any());
        assert!(world.is_fully_in_world(&ship.body));
    }

    #[test]
    fn test_ship_edge_crossing_discards_original() {
        let mut world = ship_world(Vec2::new(25.0, 300.0), PI);
        let original = world.ships[0].id;

        tick(&mut world, &THRUST);
        assert_eq!(world.ships.len(), 2);

        let frames = run_until_settled(&mut world, &THRUST, ship_crossings, 60).expect("settles");
        assert!(frames < 60);
        assert_ne!(world.ships[0].id, original);
        assert!(world.ships[0].body.center.x > 700.0);
    }

    #[test]
    fn test_rock_corner_crossing_keeps_one_rock() {
        let mut world = rock_world(Vec2::new(30.0, 60.0), 20.0, 5.0, 240f32.to_radians());
        for frame in 0..60 {
            tick(&mut world, &InputState::default());
            if let Err(e) = check_copies(&rock_crossings(&world)) {
                panic!("frame {frame}: {e}");
            }
        }
        run_until_settled(&mut world, &InputState::default(), rock_crossings, 200).expect("settles");
    }

    #[test]
    fn test_corner_touch_entering_one_axis_survives() {
        // Touches both edges at once while entering on X and leaving through the top
        let mut world = rock_world(Vec2::new(5.0, 5.0), 20.0, 2.0, -PI / 4.0);
        run_until_settled(&mut world, &InputState::default(), rock_crossings, 200).expect("settles");
        assert!(world.rocks[0].body.center.y > 500.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_rock_crossing_conserves_rock(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            heading in -PI..PI,
            radius in 10.0f32..50.0,
            velocity in 0.3f32..5.0,
        ) {
            let mut world = rock_world(Vec2::new(x, y), radius, velocity, heading);
            for frame in 0..800 {
                tick(&mut world, &InputState::default());
                let checked = check_copies(&rock_crossings(&world));
                prop_assert!(checked.is_ok(), "frame {}: {:?}", frame, checked);
            }
        }

        #[test]
        fn prop_ship_crossing_conserves_ship(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            direction in -PI..PI,
        ) {
            let mut world = ship_world(Vec2::new(x, y), direction);
            for frame in 0..400 {
                tick(&mut world, &THRUST);
                let checked = check_copies(&ship_crossings(&world));
                prop_assert!(checked.is_ok(), "frame {}: {:?}", frame, checked);
            }
        }

        #[test]
        fn prop_rock_crossing_settles_to_one(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            quarter in 0u8..4,
            tilt in 0.3f32..(FRAC_PI_2 - 0.3),
            radius in 10.0f32..50.0,
            velocity in 1.0f32..5.0,
        ) {
            // Headings near parallel to an edge can straddle it indefinitely
            let heading = f32::from(quarter) * FRAC_PI_2 + tilt - PI;
            let mut world = rock_world(Vec2::new(x, y), radius, velocity, heading);
            for _ in 0..300 {
                tick(&mut world, &InputState::default());
            }
            let settled = run_until_settled(&mut world, &InputState::default(), rock_crossings, 6000);
            prop_assert!(settled.is_ok(), "{:?}", settled);
        }

        #[test]
        fn prop_ship_crossing_settles_to_one(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            quarter in 0u8..4,
            tilt in 0.3f32..(FRAC_PI_2 - 0.3),
        ) {
            let direction = f32::from(quarter) * FRAC_PI_2 + tilt - PI;
            let mut world = ship_world(Vec2::new(x, y), direction);
            for _ in 0..200 {
                tick(&mut world, &THRUST);
            }
            let settled = run_until_settled(&mut world, &THRUST, ship_crossings, 3000);
            prop_assert!(settled.is_ok(), "{:?}", settled);
        }
    }
}
