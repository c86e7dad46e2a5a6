//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Convert 0xRRGGBB to linear RGBA components in [0, 1]
pub fn hex_color(rgb: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

/// Colors for game elements (0xRRGGBB)
pub mod colors {
    pub const SHIP_LEFT: u32 = 0xbebebe;
    pub const SHIP_RIGHT: u32 = 0x909090;
    pub const SHIP_BOOSTER: u32 = 0x676767;
    pub const PROJECTILE: u32 = 0xffffff;
    /// Vertical background gradient, top to bottom
    pub const BACKGROUND_TOP: u32 = 0x15003d;
    pub const BACKGROUND_BOTTOM: u32 = 0x001775;
}
