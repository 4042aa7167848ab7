//! Flight physics: integrates creature velocity into position against terrain.
//!
//! Flyers have no gravity. Steering only perturbs velocity; this step owns
//! position and applies collision, drag, ladder and fall bookkeeping.

use bevy_ecs::prelude::*;
use fauna_world::{Aabb, BlockWorld, CollisionQuery, Medium, Vec3};

use crate::components::*;

/// Velocity multiplier per tick in open air.
pub const AIR_DRAG: f32 = 0.91;
/// Velocity multiplier per tick in water.
pub const WATER_DRAG: f32 = 0.8;
/// Velocity multiplier per tick in lava.
pub const LAVA_DRAG: f32 = 0.5;
/// Slipperiness of an ordinary block, scaling air drag while grounded.
pub const GROUND_SLIPPERINESS: f32 = 0.6;
/// Speed limit while clinging to a ladder.
pub const LADDER_SPEED: f32 = 0.15;

/// Kinematic state for one physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub position: Vec3,
    pub velocity: Vec3,
    pub on_ground: bool,
    pub fall_distance: f32,
}

/// Advance `motion` by one tick.
pub fn travel(
    terrain: &BlockWorld,
    motion: &mut Motion,
    size: &BoundingBox,
    exemptions: &PhysicsExemptions,
) {
    let bounds = size.at(motion.position);

    if !exemptions.ignores_ladders && terrain.is_on_ladder(&bounds) {
        let v = &mut motion.velocity;
        v.x = v.x.clamp(-LADDER_SPEED, LADDER_SPEED);
        v.z = v.z.clamp(-LADDER_SPEED, LADDER_SPEED);
        v.y = v.y.max(-LADDER_SPEED);
        motion.fall_distance = 0.0;
    }

    let drag = match terrain.medium_at(&bounds) {
        Medium::Water => WATER_DRAG,
        Medium::Lava => LAVA_DRAG,
        Medium::Air if motion.on_ground => GROUND_SLIPPERINESS * AIR_DRAG,
        Medium::Air => AIR_DRAG,
    };

    let moved = move_with_collisions(terrain, motion, bounds);

    if motion.on_ground {
        motion.fall_distance = 0.0;
    } else if moved.y < 0.0 && !exemptions.ignores_fall_damage {
        motion.fall_distance -= moved.y;
    }

    motion.velocity = motion.velocity * drag;
}

/// Move one axis at a time (Y, X, Z). An axis whose move would overlap
/// terrain is not moved and its velocity is zeroed. Returns the displacement.
fn move_with_collisions(terrain: &BlockWorld, motion: &mut Motion, mut bounds: Aabb) -> Vec3 {
    let wanted = motion.velocity;
    let mut moved = Vec3::ZERO;

    let steps = [
        Vec3::new(0.0, wanted.y, 0.0),
        Vec3::new(wanted.x, 0.0, 0.0),
        Vec3::new(0.0, 0.0, wanted.z),
    ];
    let mut blocked = [false; 3];

    for (axis, step) in steps.into_iter().enumerate() {
        if step == Vec3::ZERO {
            continue;
        }
        let candidate = bounds.offset(step);
        if terrain.is_obstructed(&candidate) {
            blocked[axis] = true;
        } else {
            bounds = candidate;
            moved += step;
        }
    }

    if blocked[0] {
        motion.velocity.y = 0.0;
    }
    if blocked[1] {
        motion.velocity.x = 0.0;
    }
    if blocked[2] {
        motion.velocity.z = 0.0;
    }
    motion.on_ground = blocked[0] && wanted.y < 0.0;
    motion.position += moved;
    moved
}

/// Runs flight physics for every living creature.
pub fn system_flight_physics(world: &mut World, terrain: &BlockWorld) {
    let mut query = world.query_filtered::<(
        &mut Position,
        &mut Velocity,
        &mut OnGround,
        &mut FallDistance,
        &BoundingBox,
        &PhysicsExemptions,
    ), (With<Creature>, Without<Dead>)>();

    for (mut pos, mut vel, mut on_ground, mut fall, size, exemptions) in query.iter_mut(world) {
        let mut motion = Motion {
            position: pos.0,
            velocity: vel.0,
            on_ground: on_ground.0,
            fall_distance: fall.0,
        };
        travel(terrain, &mut motion, size, exemptions);
        pos.0 = motion.position;
        vel.0 = motion.velocity;
        on_ground.0 = motion.on_ground;
        fall.0 = motion.fall_distance;
    }
}
