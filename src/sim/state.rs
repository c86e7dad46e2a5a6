//! World state
//!
//! The world owns one ordered collection per entity kind and is the only
//! mutable shared state. Steps never touch a collection directly: appends and
//! removals are queued and applied between step phases, so a phase always
//! walks a stable collection.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::decoration::Decoration;
use super::entity::{AnyEntity, Body, Entity, EntityId, EntityKind, EntityRef, SpriteId};
use super::projectile::Projectile;
use super::rock::Rock;
use super::ship::Ship;
use super::wrap;
use crate::config::GameConfig;
use crate::consts::SHIP_SPAWN_OFFSET_X;
use crate::error::SimError;
use crate::input::InputState;

/// Notifications for UI/overlay code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ship hit a rock; it stays in the world, frozen
    PlayerCrashed { ship: EntityId },
    /// A rock at or below its minimum radius was hit and removed
    RockDestroyed { rock: EntityId },
}

/// Per-kind entity counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    pub ships: usize,
    pub projectiles: usize,
    pub rocks: usize,
    pub decorations: usize,
}

/// Changes requested during a step phase
#[derive(Debug, Clone, Default)]
struct PendingChanges {
    appends: Vec<AnyEntity>,
    removals: Vec<EntityRef>,
}

impl PendingChanges {
    fn is_empty(&self) -> bool {
        self.appends.is_empty() && self.removals.is_empty()
    }
}

/// The simulation world
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    /// Canvas width and height
    pub canvas_size: Vec2,
    pub ships: Vec<Ship>,
    pub projectiles: Vec<Projectile>,
    pub rocks: Vec<Rock>,
    pub decorations: Vec<Decoration>,
    /// Intents held this frame
    pub input: InputState,
    /// Freezes ships, projectiles and rocks; decorations keep moving
    pub paused: bool,
    /// Simulated clock, advanced by `config.frame_ms` per frame
    pub time_ms: f64,
    pub frame: u64,
    pub seed: u64,
    /// Sprites handed out to spawned rocks
    pub rock_sprites: Vec<SpriteId>,
    pending: PendingChanges,
    events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: EntityId,
}

impl World {
    /// Create a world with no entities
    pub fn empty(config: GameConfig, canvas_size: Vec2, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        validate_size(canvas_size)?;
        Ok(Self {
            config,
            canvas_size,
            ships: Vec::new(),
            projectiles: Vec::new(),
            rocks: Vec::new(),
            decorations: Vec::new(),
            input: InputState::default(),
            paused: true,
            time_ms: 0.0,
            frame: 0,
            seed,
            rock_sprites: Vec::new(),
            pending: PendingChanges::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    /// Create a world populated with stars, the ship and the initial rocks
    pub fn new(
        config: GameConfig,
        canvas_size: Vec2,
        seed: u64,
        rock_sprites: Vec<SpriteId>,
    ) -> Result<Self, SimError> {
        let mut world = Self::empty(config, canvas_size, seed)?;
        world.rock_sprites = rock_sprites;
        world.populate();
        log::info!(
            "World created: {}x{}, seed {}, {} rocks, {} stars",
            canvas_size.x,
            canvas_size.y,
            seed,
            world.rocks.len(),
            world.decorations.len()
        );
        Ok(world)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Unpause
    pub fn start(&mut self) {
        self.paused = false;
        log::info!("Game started");
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Drop every entity and repopulate
    pub fn reset(&mut self) {
        self.ships.clear();
        self.projectiles.clear();
        self.rocks.clear();
        self.decorations.clear();
        self.pending = PendingChanges::default();
        self.events.clear();
        self.populate();
        log::info!("World reset");
    }

    /// Change the canvas size; entities keep their positions
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SimError> {
        let size = Vec2::new(width, height);
        validate_size(size)?;
        self.canvas_size = size;
        log::info!("World resized to {}x{}", width, height);
        Ok(())
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            ships: self.ships.len(),
            projectiles: self.projectiles.len(),
            rocks: self.rocks.len(),
            decorations: self.decorations.len(),
        }
    }

    // === Bounds ===

    pub fn is_partially_in_world(&self, body: &Body) -> bool {
        wrap::is_partially_in_world(body, self.canvas_size)
    }

    pub fn is_fully_in_world(&self, body: &Body) -> bool {
        wrap::is_fully_in_world(body, self.canvas_size)
    }

    // === Membership ===

    /// Queue an entity for insertion at the end of the current phase
    pub fn append(&mut self, entity: impl Into<AnyEntity>) {
        self.pending.appends.push(entity.into());
    }

    /// Queue an entity for removal; repeated or unknown removals are no-ops
    pub fn remove(&mut self, entity: EntityRef) {
        if !self.pending.removals.contains(&entity) {
            self.pending.removals.push(entity);
        }
    }

    /// Whether `entity` has been removed this phase and is awaiting the sweep
    pub fn is_pending_removal(&self, entity: EntityRef) -> bool {
        self.pending.removals.contains(&entity)
    }

    /// Apply queued removals, then queued appends
    pub fn apply_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let PendingChanges { appends, removals } = std::mem::take(&mut self.pending);

        for entity in &removals {
            match entity.kind {
                EntityKind::Ship => remove_by_id(&mut self.ships, entity.id),
                EntityKind::Projectile => remove_by_id(&mut self.projectiles, entity.id),
                EntityKind::Rock => remove_by_id(&mut self.rocks, entity.id),
                EntityKind::Decoration => remove_by_id(&mut self.decorations, entity.id),
            }
        }

        for entity in appends {
            if removals.contains(&entity.entity_ref()) {
                continue;
            }
            match entity {
                AnyEntity::Ship(e) => self.ships.push(e),
                AnyEntity::Projectile(e) => self.projectiles.push(e),
                AnyEntity::Rock(e) => self.rocks.push(e),
                AnyEntity::Decoration(e) => self.decorations.push(e),
            }
        }
    }

    // === Events ===

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Spawning ===

    fn populate(&mut self) {
        if self.config.spawn_stars && self.decorations.is_empty() {
            for _ in 0..self.config.star_count {
                let star = self.spawn_decoration();
                self.decorations.push(star);
            }
        }

        if self.ships.is_empty() {
            let ship = self.spawn_ship();
            self.ships.push(ship);
        }

        if self.config.spawn_rocks && self.rocks.is_empty() {
            for _ in 0..self.config.rock_count {
                let rock = self.spawn_rock();
                self.rocks.push(rock);
            }
        }
    }

    /// The player's ship at its start position, pointing up
    pub fn spawn_ship(&mut self) -> Ship {
        let center = Vec2::new(
            self.canvas_size.x / 2.0 - SHIP_SPAWN_OFFSET_X,
            3.0 * self.canvas_size.y / 4.0,
        );
        let id = self.next_entity_id();
        Ship::new(id, center, &self.config.ship)
    }

    /// A rock just beyond a random edge, heading roughly inward
    pub fn spawn_rock(&mut self) -> Rock {
        let rc = self.config.rock;
        let Vec2 { x: w, y: h } = self.canvas_size;
        let pad = rc.spawn_padding;
        let hp = rc.heading_padding_deg;

        // (x range, y range, heading range in degrees) per entry edge
        let (xs, ys, headings) = match self.rng.random_range(0..4u8) {
            0 => ((-pad, 0.0), (0.0, h), (-90.0 + hp, 90.0 - hp)),
            1 => ((w, w + pad), (0.0, h), (90.0 + hp, 270.0 - hp)),
            2 => ((0.0, w), (-pad, 0.0), (hp, 180.0 - hp)),
            _ => ((0.0, w), (h, h + pad), (180.0 + hp, 360.0 - hp)),
        };

        let radius = rc.spawn_radius.sample_rounded(&mut self.rng);
        let x = self.rng.random_range(xs.0..=xs.1);
        let y = self.rng.random_range(ys.0..=ys.1);
        let degrees = self.rng.random_range(headings.0..=headings.1).round().rem_euclid(360.0);
        let velocity = (self.rng.random::<f32>() * rc.spawn_velocity.max).max(rc.spawn_velocity.min);
        let sprite = if self.rock_sprites.is_empty() {
            None
        } else {
            let index = self.rng.random_range(0..self.rock_sprites.len());
            Some(self.rock_sprites[index])
        };

        let id = self.next_entity_id();
        let mut rock = Rock::new(
            id,
            Vec2::new(x, y),
            radius,
            velocity,
            degrees.to_radians(),
            rc.min_radius,
            sprite,
        );
        rock.crossing = wrap::initial_crossing(
            rock.body.center,
            self.canvas_size,
            &rock.margins(),
            &rock.quadrant,
        );
        rock
    }

    /// A background star at a random on-screen position
    pub fn spawn_decoration(&mut self) -> Decoration {
        let dc = &self.config.decoration;
        let color = dc.palette[self.rng.random_range(0..dc.palette.len())];
        let radius = dc.radius.sample_rounded(&mut self.rng);
        let speed = dc.speed.sample_step(&mut self.rng, 0.01);
        let heading = dc.heading;
        let center = Vec2::new(
            self.rng.random_range(0.0..=self.canvas_size.x),
            self.rng.random_range(0.0..=self.canvas_size.y),
        );
        let id = self.next_entity_id();
        Decoration::new(id, center, radius, heading, speed, color)
    }

    // === Collision-triggered transitions ===

    /// Split (or destroy) a live rock; no-op if it is gone or already removed
    pub fn split_rock(&mut self, rock: EntityRef) {
        if rock.kind != EntityKind::Rock || self.is_pending_removal(rock) {
            return;
        }
        if let Some(target) = self.rocks.iter().find(|r| r.id == rock.id).cloned() {
            target.divide(self);
        }
    }
}

fn validate_size(size: Vec2) -> Result<(), SimError> {
    if size.x > 0.0 && size.y > 0.0 && size.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidWorldSize {
            width: size.x,
            height: size.y,
        })
    }
}

fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: EntityId) {
    if let Some(index) = items.iter().position(|e| e.id() == id) {
        items.remove(index);
    }
}
