//! Draw-list generation
//!
//! Turns a world snapshot into backend-agnostic draw data: colored triangles
//! for vector shapes and sprite blits for rocks. Order is back to front:
//! decorations, ships, projectiles, rocks.

pub mod shapes;
pub mod vertex;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{SpriteId, World};
pub use vertex::{Vertex, colors, hex_color};

/// Rock image variants and their native pixel sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpriteInfo {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const ROCK_SPRITES: [SpriteInfo; 4] = [
    SpriteInfo { name: "asteroid-1", width: 120, height: 121 },
    SpriteInfo { name: "asteroid-2", width: 120, height: 121 },
    SpriteInfo { name: "asteroid-3", width: 100, height: 72 },
    SpriteInfo { name: "asteroid-4", width: 120, height: 104 },
];

/// Handles for every entry of `ROCK_SPRITES`, in order
pub fn rock_sprite_ids() -> Vec<SpriteId> {
    (0..ROCK_SPRITES.len() as u32).map(SpriteId).collect()
}

/// Blit of a sprite into a screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteDraw {
    pub sprite: SpriteId,
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub triangles: Vec<Vertex>,
    pub sprites: Vec<SpriteDraw>,
}

/// Build the draw list for the current world state
pub fn build_draw_list(world: &World) -> DrawList {
    let mut list = DrawList::default();

    for star in &world.decorations {
        list.triangles.extend(shapes::star(star));
    }
    for ship in &world.ships {
        list.triangles.extend(shapes::ship(ship));
    }
    for projectile in &world.projectiles {
        list.triangles.extend(shapes::projectile(projectile));
    }
    // Rocks without an image still collide; they just are not drawn
    list.sprites.extend(world.rocks.iter().filter_map(|rock| {
        let sprite = rock.sprite?;
        let diameter = rock.body.radius * 2.0;
        Some(SpriteDraw {
            sprite,
            origin: rock.body.center - Vec2::splat(rock.body.radius),
            size: Vec2::splat(diameter),
        })
    }));

    list
}
