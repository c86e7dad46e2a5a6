//! Shape generation for 2D primitives

use glam::{Mat2, Vec2};
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, hex_color};
use crate::consts::PROJECTILE_FADE_FRAMES;
use crate::sim::{Decoration, Projectile, Ship};

/// Hull halves and booster in ship space (nose toward -y, 0 heading)
const SHIP_LEFT_HULL: [Vec2; 4] = [
    Vec2::new(0.0, 20.0),
    Vec2::new(-10.0, 20.0),
    Vec2::new(-20.0, 0.0),
    Vec2::new(0.0, -40.0),
];
const SHIP_RIGHT_HULL: [Vec2; 4] = [
    Vec2::new(0.0, 20.0),
    Vec2::new(10.0, 20.0),
    Vec2::new(20.0, 0.0),
    Vec2::new(0.0, -40.0),
];
const SHIP_BOOSTER: [Vec2; 4] = [
    Vec2::new(-10.0, 20.0),
    Vec2::new(-10.0, 30.0),
    Vec2::new(10.0, 30.0),
    Vec2::new(10.0, 20.0),
];

/// Inner/outer radius ratio of a regular five-pointed star
const STAR_INNER_RATIO: f32 = 0.200811 / 0.525731;

const PROJECTILE_SIZE: f32 = 3.0;

/// Triangulate a convex polygon as a fan around its first point
pub fn convex_polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let first = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(first.x, first.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Ship hull rotated by its heading
pub fn ship(ship: &Ship) -> Vec<Vertex> {
    let rotation = Mat2::from_angle(ship.heading);
    let place = |points: &[Vec2; 4]| points.map(|p| ship.body.center + rotation * p);

    let mut vertices = Vec::with_capacity(18);
    vertices.extend(convex_polygon(&place(&SHIP_BOOSTER), hex_color(colors::SHIP_BOOSTER, 1.0)));
    vertices.extend(convex_polygon(&place(&SHIP_LEFT_HULL), hex_color(colors::SHIP_LEFT, 1.0)));
    vertices.extend(convex_polygon(&place(&SHIP_RIGHT_HULL), hex_color(colors::SHIP_RIGHT, 1.0)));
    vertices
}

/// Opacity of a projectile, fading out over its final frames
pub fn projectile_alpha(ttl: i32) -> f32 {
    (ttl.clamp(0, PROJECTILE_FADE_FRAMES) as f32) / PROJECTILE_FADE_FRAMES as f32
}

/// Small square centered on the projectile
pub fn projectile(projectile: &Projectile) -> Vec<Vertex> {
    let half = PROJECTILE_SIZE / 2.0;
    let c = projectile.body.center;
    let color = hex_color(colors::PROJECTILE, projectile_alpha(projectile.ttl));
    convex_polygon(
        &[
            Vec2::new(c.x - half, c.y - half),
            Vec2::new(c.x + half, c.y - half),
            Vec2::new(c.x + half, c.y + half),
            Vec2::new(c.x - half, c.y + half),
        ],
        color,
    )
}

/// Five-pointed star: one triangle per point plus the inner pentagon
pub fn star(star: &Decoration) -> Vec<Vertex> {
    let center = star.body.center;
    let outer = star.body.radius;
    let inner = outer * STAR_INNER_RATIO;
    let color = hex_color(star.color, 1.0);

    // Alternating outer/inner points starting at the top
    let points: Vec<Vec2> = (0..10)
        .map(|i| {
            let theta = -PI / 2.0 + i as f32 * PI / 5.0;
            let r = if i % 2 == 0 { outer } else { inner };
            center + Vec2::new(theta.cos(), theta.sin()) * r
        })
        .collect();

    let mut vertices = Vec::with_capacity(30);
    for i in (0..10).step_by(2) {
        let prev = points[(i + 9) % 10];
        let tip = points[i];
        let next = points[i + 1];
        vertices.push(Vertex::new(prev.x, prev.y, color));
        vertices.push(Vertex::new(tip.x, tip.y, color));
        vertices.push(Vertex::new(next.x, next.y, color));
    }
    let pentagon: Vec<Vec2> = points.iter().skip(1).step_by(2).copied().collect();
    vertices.extend(convex_polygon(&pentagon, color));
    vertices
}
