//! Game tunables
//!
//! Loaded from JSON (any omitted field falls back to its default) and
//! validated once when a world is built.

use std::f32::consts::PI;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Inclusive numeric range used by the spawn routines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Both bounds finite and ordered
    pub fn validate(&self, name: &'static str) -> Result<(), SimError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(SimError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Uniform sample in [min, max]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    /// Uniform sample rounded to the nearest integer
    pub fn sample_rounded<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.sample(rng).round()
    }

    /// Uniform sample snapped to a multiple of `step`, kept inside the span
    pub fn sample_step<R: Rng + ?Sized>(&self, rng: &mut R, step: f32) -> f32 {
        ((self.sample(rng) / step).round() * step).clamp(self.min, self.max)
    }
}

/// How rocks leave the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RockWrapMode {
    /// Spawn a mirror on the opposite edge and let both coexist while crossing
    #[default]
    Mirror,
    /// Drop a rock once it has left the world and spawn a fresh one off-screen
    Respawn,
}

/// Ship handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub radius: f32,
    /// Velocity gained per frame while thrusting
    pub thrust: f32,
    /// Velocity lost per frame while braking
    pub brake: f32,
    /// Velocity lost per frame with no longitudinal input
    pub drag: f32,
    /// Heading change per frame while turning (radians)
    pub turn_step: f32,
    pub max_velocity: f32,
    /// Distance from center to gun muzzle
    pub gun_offset: f32,
    pub fire_cooldown_ms: f64,
    /// Distance from an edge at which a crossing starts
    pub wrap_enter_margin: f32,
    /// Distance from both edges required before a crossing clears
    pub wrap_settle_margin: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            radius: 18.0,
            thrust: 0.3,
            brake: 0.15,
            drag: 0.08,
            turn_step: PI / 75.0,
            max_velocity: 10.0,
            gun_offset: 15.0,
            fire_cooldown_ms: 200.0,
            wrap_enter_margin: 20.0,
            wrap_settle_margin: 25.0,
        }
    }
}

/// Projectile behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub radius: f32,
    pub velocity: f32,
    /// Lifetime in frames
    pub ttl: i32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            velocity: 15.0,
            ttl: 50,
        }
    }
}

/// Rock spawning and splitting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockConfig {
    /// Rocks at or below this radius are destroyed instead of split
    pub min_radius: f32,
    pub spawn_radius: Span,
    /// Spawn velocity; samples below `min` are raised to it
    pub spawn_velocity: Span,
    /// Depth of the off-screen strip rocks spawn in
    pub spawn_padding: f32,
    /// Keeps spawn headings this many degrees away from parallel to the edge
    pub heading_padding_deg: f32,
    pub split_angle_deg: f32,
    pub split_speed_factor: f32,
    pub max_velocity: f32,
}

impl Default for RockConfig {
    fn default() -> Self {
        Self {
            min_radius: 18.0,
            spawn_radius: Span::new(10.0, 50.0),
            spawn_velocity: Span::new(0.3, 1.8),
            spawn_padding: 100.0,
            heading_padding_deg: 10.0,
            split_angle_deg: 30.0,
            split_speed_factor: 1.5,
            max_velocity: 10.0,
        }
    }
}

/// Background stars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    pub radius: Span,
    pub speed: Span,
    /// Drift direction shared by the whole star field (radians)
    pub heading: f32,
    /// 0xRRGGBB colors
    pub palette: Vec<u32>,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            radius: Span::new(2.0, 5.0),
            speed: Span::new(0.01, 5.0),
            heading: 3.0 * PI / 2.0,
            palette: vec![0xededed, 0xa3c5ff, 0xfff8a6, 0xffb0a6],
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rock_count: usize,
    pub star_count: usize,
    pub spawn_rocks: bool,
    pub spawn_stars: bool,
    /// Simulated milliseconds per frame
    pub frame_ms: f64,
    pub rock_wrap: RockWrapMode,
    pub ship: ShipConfig,
    pub projectile: ProjectileConfig,
    pub rock: RockConfig,
    pub decoration: DecorationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rock_count: 5,
            star_count: 40,
            spawn_rocks: true,
            spawn_stars: true,
            frame_ms: 1000.0 / 60.0,
            rock_wrap: RockWrapMode::Mirror,
            ship: ShipConfig::default(),
            projectile: ProjectileConfig::default(),
            rock: RockConfig::default(),
            decoration: DecorationConfig::default(),
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), SimError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::NonPositive { name, value })
    }
}

fn within(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), SimError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SimError::OutOfRange { name, value, min, max })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), SimError> {
    within(name, value, 0.0, f32::MAX)
}

impl GameConfig {
    /// Check every tunable the spawn and step code relies on
    pub fn validate(&self) -> Result<(), SimError> {
        positive("frame_ms", self.frame_ms as f32)?;

        positive("ship.radius", self.ship.radius)?;
        positive("ship.max_velocity", self.ship.max_velocity)?;
        non_negative("ship.thrust", self.ship.thrust)?;
        non_negative("ship.brake", self.ship.brake)?;
        non_negative("ship.drag", self.ship.drag)?;
        non_negative("ship.turn_step", self.ship.turn_step)?;
        non_negative("ship.gun_offset", self.ship.gun_offset)?;
        non_negative("ship.wrap_enter_margin", self.ship.wrap_enter_margin)?;
        Span::new(self.ship.wrap_enter_margin, self.ship.wrap_settle_margin)
            .validate("ship.wrap_margins")?;

        positive("projectile.radius", self.projectile.radius)?;
        positive("projectile.ttl", self.projectile.ttl as f32)?;

        positive("rock.min_radius", self.rock.min_radius)?;
        positive("rock.split_speed_factor", self.rock.split_speed_factor)?;
        positive("rock.max_velocity", self.rock.max_velocity)?;
        self.rock.spawn_radius.validate("rock.spawn_radius")?;
        positive("rock.spawn_radius.min", self.rock.spawn_radius.min)?;
        self.rock.spawn_velocity.validate("rock.spawn_velocity")?;
        non_negative("rock.spawn_padding", self.rock.spawn_padding)?;
        within("rock.heading_padding_deg", self.rock.heading_padding_deg, 0.0, 90.0)?;

        self.decoration.radius.validate("decoration.radius")?;
        positive("decoration.radius.min", self.decoration.radius.min)?;
        self.decoration.speed.validate("decoration.speed")?;
        if self.decoration.palette.is_empty() {
            return Err(SimError::EmptyPalette);
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save the config to disk as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}
