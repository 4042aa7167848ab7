//! A point a creature is aiming at, and the corridor check toward it.

use fauna_world::{CollisionQuery, Vec3};

use super::body::FlyingBody;

/// Destination plus the offset, distance and unit aim from the body to it.
///
/// Values are only as fresh as the last [`set_target`](Self::set_target) or
/// [`refresh`](Self::refresh); there is no way to build one without computing them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetProbe {
    destination: Vec3,
    delta: Vec3,
    distance: f32,
    aim: Vec3,
}

impl TargetProbe {
    pub fn new<B: FlyingBody + ?Sized>(body: &B, destination: Vec3) -> Self {
        let mut probe = Self {
            destination,
            delta: Vec3::ZERO,
            distance: 0.0,
            aim: Vec3::ZERO,
        };
        probe.refresh(body);
        probe
    }

    /// Point at a new destination and recompute against the body's position.
    pub fn set_target<B: FlyingBody + ?Sized>(&mut self, body: &B, destination: Vec3) {
        self.destination = destination;
        self.refresh(body);
    }

    /// Recompute delta, distance and aim from the body's current position.
    pub fn refresh<B: FlyingBody + ?Sized>(&mut self, body: &B) {
        self.delta = self.destination - body.position();
        self.distance = self.delta.length();
        self.aim = self.delta.normalize_or_zero();
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    pub fn delta(&self) -> Vec3 {
        self.delta
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn aim(&self) -> Vec3 {
        self.aim
    }

    /// Whether the body's box can slide along `aim` for `lookahead` blocks
    /// (or to the destination, if closer) without hitting anything.
    ///
    /// The box is sampled at offsets 0.5, 1.5, 2.5, ... below the limit and
    /// once more exactly at the limit. Obstacles thinner than the gaps between
    /// samples can be missed; this is a coarse sampler, not swept collision.
    pub fn is_path_clear<B, W>(&self, body: &B, world: &W, lookahead: f32) -> bool
    where
        B: FlyingBody + ?Sized,
        W: CollisionQuery + ?Sized,
    {
        let limit = lookahead.min(self.distance);
        let bounds = body.bounding_box();

        let mut offset = 0.5;
        while offset < limit {
            if world.is_obstructed(&bounds.offset(self.aim * offset)) {
                return false;
            }
            offset += 1.0;
        }

        !world.is_obstructed(&bounds.offset(self.aim * limit))
    }
}
