//! Circle-circle collision queries
//!
//! Brute-force pairwise tests: entity counts are in the tens, so there is no
//! spatial partitioning. A grid or BVH belongs here if worlds ever hold
//! thousands of rocks.

use super::entity::{Body, Entity, EntityKind, EntityRef};
use super::geometry::Vector2Ext;
use super::state::World;

/// Whether two bounding circles overlap, with `padding` added to the threshold
#[inline]
pub fn collides_with(a: &Body, b: &Body, padding: f32) -> bool {
    a.center.in_circumference(b.center, a.radius + b.radius + padding)
}

fn first_hit<T: Entity>(
    world: &World,
    items: &[T],
    body: &Body,
    exclude: Option<EntityRef>,
    padding: f32,
) -> Option<EntityRef> {
    items
        .iter()
        .map(|item| (item.entity_ref(), item.body()))
        .filter(|(entity, _)| Some(*entity) != exclude && !world.is_pending_removal(*entity))
        .find(|(_, other)| collides_with(body, other, padding))
        .map(|(entity, _)| entity)
}

impl World {
    /// First live entity of `kind` overlapping `body`, skipping `exclude`
    pub fn query_collision(
        &self,
        body: &Body,
        exclude: Option<EntityRef>,
        kind: EntityKind,
        padding: f32,
    ) -> Option<EntityRef> {
        match kind {
            EntityKind::Ship => first_hit(self, &self.ships, body, exclude, padding),
            EntityKind::Projectile => first_hit(self, &self.projectiles, body, exclude, padding),
            EntityKind::Rock => first_hit(self, &self.rocks, body, exclude, padding),
            EntityKind::Decoration => first_hit(self, &self.decorations, body, exclude, padding),
        }
    }
}
