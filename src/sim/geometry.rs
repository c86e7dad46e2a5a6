//! Point primitives shared by every entity
//!
//! All motion in the world is `move_along`: a direct displacement by angle and
//! speed, with no acceleration integration. All collision reduces to
//! `in_circumference`.

use glam::Vec2;

/// Movement and distance helpers on top of `glam::Vec2`
pub trait Vector2Ext {
    /// Displace by `speed` along `angle` (radians)
    fn move_along(&mut self, angle: f32, speed: f32);

    /// Euclidean distance, floored to a whole number
    fn distance_to(self, other: Vec2) -> f32;

    /// True when `point` lies within `radius` of this point
    fn in_circumference(self, point: Vec2, radius: f32) -> bool;
}

impl Vector2Ext for Vec2 {
    #[inline]
    fn move_along(&mut self, angle: f32, speed: f32) {
        self.x += angle.cos() * speed;
        self.y += angle.sin() * speed;
    }

    #[inline]
    fn distance_to(self, other: Vec2) -> f32 {
        // Whole-pixel distances keep edge-touching pairs from flickering
        self.distance(other).floor()
    }

    #[inline]
    fn in_circumference(self, point: Vec2, radius: f32) -> bool {
        self.distance_to(point) <= radius
    }
}
