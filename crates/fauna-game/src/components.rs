//! ECS components for flying creatures.

use bevy_ecs::prelude::*;
use fauna_world::{Aabb, Vec3};
use serde::Deserialize;

use crate::ai::{FlightProfile, GoalSelector, SteeringController};

/// Network identity for an entity.
#[derive(Component, Debug, Clone)]
pub struct EntityId {
    pub unique_id: i64,
    pub runtime_id: u64,
}

/// Feet position in the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct Position(pub Vec3);

/// Velocity in blocks per tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct Velocity(pub Vec3);

/// Heading in degrees.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Rotation {
    pub yaw: f32,
    pub body_yaw: f32,
}

/// Health points.
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Whether the entity rested on something solid after its last move.
#[derive(Component, Debug, Clone, Copy)]
pub struct OnGround(pub bool);

/// Distance descended since last touching the ground.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FallDistance(pub f32);

/// Axis-aligned bounding box dimensions.
#[derive(Component, Debug, Clone, Copy)]
pub struct BoundingBox {
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn at(&self, feet: Vec3) -> Aabb {
        Aabb::from_feet(feet, self.width, self.height)
    }
}

/// Creature kind identifier, e.g. `"fauna:butterfly"`.
#[derive(Component, Debug, Clone)]
pub struct CreatureType(pub String);

/// Cosmetic variant index, chosen at spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct Variant(pub u8);

/// Host physics behaviors a creature opts out of.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhysicsExemptions {
    /// Impulses from other entities are ignored.
    pub ignores_pushback: bool,
    /// Fall distance never accumulates.
    pub ignores_fall_damage: bool,
    /// Ladders do not clamp motion.
    pub ignores_ladders: bool,
}

impl PhysicsExemptions {
    /// Everything on: how flying creatures behave.
    pub const FLYER: Self = Self {
        ignores_pushback: true,
        ignores_fall_damage: true,
        ignores_ladders: true,
    };
}

impl Default for PhysicsExemptions {
    fn default() -> Self {
        Self::FLYER
    }
}

/// Steering and goal selection for one creature.
#[derive(Component, Debug, Clone)]
pub struct FlightBrain {
    pub steering: SteeringController,
    pub goals: GoalSelector,
}

impl FlightBrain {
    pub fn new(profile: FlightProfile) -> Self {
        Self {
            steering: SteeringController::new(profile),
            goals: GoalSelector::new(),
        }
    }
}

/// Marker: this entity is a creature.
#[derive(Component, Debug)]
pub struct Creature;

/// Marker: this entity is dead (pending cleanup).
#[derive(Component, Debug)]
pub struct Dead;
