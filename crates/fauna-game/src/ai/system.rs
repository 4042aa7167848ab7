//! Flight AI tick system: goal selection and steering for every creature.

use bevy_ecs::prelude::*;
use fauna_world::{Aabb, BlockWorld, Vec3};
use rand::Rng;

use crate::components::*;
use crate::game_world::{GameEvent, OutgoingEvents};

use super::body::FlyingBody;
use super::steering::SteeringOutcome;

/// ECS-backed view of one creature, handed to the AI for a single tick.
struct EcsBody<'a> {
    position: Vec3,
    size: BoundingBox,
    velocity: &'a mut Velocity,
    rotation: &'a mut Rotation,
}

impl FlyingBody for EcsBody<'_> {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn bounding_box(&self) -> Aabb {
        self.size.at(self.position)
    }

    fn velocity(&self) -> Vec3 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn yaw(&self) -> f32 {
        self.rotation.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.rotation.yaw = yaw;
        self.rotation.body_yaw = yaw;
    }
}

/// Runs goal selection (when idle) and then steering for all living creatures.
pub fn system_flight_ai<R: Rng + ?Sized>(world: &mut World, terrain: &BlockWorld, rng: &mut R) {
    let mut events = Vec::new();

    let mut query = world.query_filtered::<(
        &EntityId,
        &Position,
        &BoundingBox,
        &mut Velocity,
        &mut Rotation,
        &mut FlightBrain,
    ), (With<Creature>, Without<Dead>)>();

    for (eid, pos, size, mut vel, mut rot, mut brain) in query.iter_mut(world) {
        let brain = &mut *brain;
        let mut body = EcsBody {
            position: pos.0,
            size: *size,
            velocity: &mut *vel,
            rotation: &mut *rot,
        };

        if brain.goals.should_run(&brain.steering) {
            if let Some(destination) =
                brain
                    .goals
                    .select_goal(&body, terrain, &mut brain.steering, rng)
            {
                events.push(GameEvent::DestinationChosen {
                    runtime_id: eid.runtime_id,
                    destination,
                });
            }
        }

        let destination = brain.steering.destination();
        match brain.steering.tick(&mut body, terrain, rng) {
            SteeringOutcome::Arrived => events.push(GameEvent::DestinationReached {
                runtime_id: eid.runtime_id,
                position: pos.0,
            }),
            SteeringOutcome::Blocked => events.push(GameEvent::DestinationAbandoned {
                runtime_id: eid.runtime_id,
                position: pos.0,
                destination: destination.unwrap_or(pos.0),
            }),
            SteeringOutcome::Idle | SteeringOutcome::CoolingDown | SteeringOutcome::Corrected => {}
        }
    }

    world
        .resource_mut::<OutgoingEvents>()
        .events
        .extend(events);
}
