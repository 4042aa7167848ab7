//! The world-collision query surface consumed by steering and physics.

use crate::physics::Aabb;

/// Read-only world geometry query.
///
/// Implementations must be safe for concurrent reads: a host may tick many
/// creatures in parallel against the same geometry. Nothing in this workspace
/// mutates geometry while a query is in flight.
pub trait CollisionQuery: Sync {
    /// All collision boxes that overlap `volume` (possibly empty).
    fn collision_boxes(&self, volume: &Aabb) -> Vec<Aabb>;

    /// Whether anything solid overlaps `volume`.
    fn is_obstructed(&self, volume: &Aabb) -> bool {
        !self.collision_boxes(volume).is_empty()
    }
}

/// A world with no geometry at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyWorld;

impl CollisionQuery for EmptyWorld {
    fn collision_boxes(&self, _volume: &Aabb) -> Vec<Aabb> {
        Vec::new()
    }

    fn is_obstructed(&self, _volume: &Aabb) -> bool {
        false
    }
}
