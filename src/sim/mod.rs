//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order per collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod decoration;
pub mod entity;
pub mod geometry;
pub mod projectile;
pub mod rock;
pub mod ship;
pub mod state;
pub mod tick;
pub mod wrap;

pub use collision::collides_with;
pub use decoration::Decoration;
pub use entity::{AnyEntity, Body, Entity, EntityId, EntityKind, EntityRef, SpriteId};
pub use geometry::Vector2Ext;
pub use projectile::Projectile;
pub use rock::Rock;
pub use ship::Ship;
pub use state::{GameEvent, World, WorldStats};
pub use tick::tick;
pub use wrap::{AxisState, Crossing, Quadrant};
