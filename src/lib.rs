//! Rock Drift - simulation core of a toroidal asteroid-field arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, wrap-around, collisions, splitting)
//! - `renderer`: Draw-list generation from world state
//! - `config`: Data-driven tunables
//! - `input`: Semantic input intents

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::SimError;
pub use input::{InputState, Intent};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas size used by the headless runner when none is given
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

    /// Horizontal offset of the ship spawn point left of the canvas center
    pub const SHIP_SPAWN_OFFSET_X: f32 = 20.0;

    /// Projectiles fade out over their final frames
    pub const PROJECTILE_FADE_FRAMES: i32 = 10;
}

/// Normalized angle to [-π, π); non-finite input yields NaN
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::PI;
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert!((normalize_angle(-7.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_angle_non_finite_returns() {
        assert!(normalize_angle(f32::INFINITY).is_nan());
        assert!(normalize_angle(f32::NAN).is_nan());
    }
}
