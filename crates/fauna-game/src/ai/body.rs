//! The movement handle steering operates on.

use fauna_world::{Aabb, Vec3};

/// Accessors for a creature's kinematic state.
///
/// Position and bounding box are read-only here: the physics step owns them.
/// Velocity is perturbed by steering and heading is overwritten by it.
pub trait FlyingBody {
    fn position(&self) -> Vec3;

    fn bounding_box(&self) -> Aabb;

    fn velocity(&self) -> Vec3;

    fn set_velocity(&mut self, velocity: Vec3);

    /// Heading in degrees.
    fn yaw(&self) -> f32;

    /// Set heading in degrees. Implementations also align the body yaw.
    fn set_yaw(&mut self, yaw: f32);
}

/// Self-contained creature state, used outside the ECS and in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub body_yaw: f32,
    pub width: f32,
    pub height: f32,
}

impl CreatureBody {
    pub fn new(position: Vec3, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            body_yaw: 0.0,
            width,
            height,
        }
    }

    /// Advance position by the current velocity.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }
}

impl FlyingBody for CreatureBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_feet(self.position, self.width, self.height)
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.body_yaw = yaw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_yaw_aligns_body() {
        let mut body = CreatureBody::new(Vec3::ZERO, 0.7, 0.7);
        body.set_yaw(-90.0);
        assert_eq!(body.yaw(), -90.0);
        assert_eq!(body.body_yaw, -90.0);
    }

    #[test]
    fn bounding_box_follows_position() {
        let mut body = CreatureBody::new(Vec3::new(1.0, 2.0, 3.0), 0.7, 0.7);
        body.set_velocity(Vec3::new(1.0, 0.0, 0.0));
        body.integrate();
        let bb = body.bounding_box();
        assert!((bb.min.x - 1.65).abs() < 0.001);
        assert!((bb.min.y - 2.0).abs() < 0.001);
    }
}
