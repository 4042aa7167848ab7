//! ECS game world: bevy_ecs World, creature management, tick systems, and event bus.

use std::sync::atomic::{AtomicI64, Ordering};

use bevy_ecs::prelude::*;
use fauna_world::{BlockWorld, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::ai::system::system_flight_ai;
use crate::ai::SteeringState;
use crate::components::*;
use crate::creature_registry::CreatureRegistry;
use crate::flight::system_flight_physics;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Outgoing events queued by ECS operations for the host to consume.
#[derive(Resource, Default)]
pub struct OutgoingEvents {
    pub events: Vec<GameEvent>,
}

/// Global tick counter.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Thread-safe entity ID allocator.
#[derive(Resource)]
pub struct EntityIdAllocator {
    next: AtomicI64,
}

impl EntityIdAllocator {
    pub fn new(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }

    /// Allocate the next unique entity ID.
    pub fn allocate(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Current value (next ID that will be allocated).
    pub fn current(&self) -> i64 {
        self.next.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Game events
// ---------------------------------------------------------------------------

/// Snapshot of a living creature.
#[derive(Debug, Clone)]
pub struct CreatureSnapshot {
    pub unique_id: i64,
    pub runtime_id: u64,
    pub creature_type: String,
    pub variant: u8,
    pub position: Vec3,
    pub yaw: f32,
    pub health: f32,
    pub destination: Option<Vec3>,
}

/// Events produced by the game world.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CreatureSpawned {
        runtime_id: u64,
        unique_id: i64,
        creature_type: String,
        variant: u8,
        position: Vec3,
        max_health: f32,
        bb_width: f32,
        bb_height: f32,
    },
    CreatureMoved {
        runtime_id: u64,
        position: Vec3,
        yaw: f32,
        body_yaw: f32,
        on_ground: bool,
    },
    /// Goal selection committed a new destination.
    DestinationChosen { runtime_id: u64, destination: Vec3 },
    /// Steering came within arrival distance and went idle.
    DestinationReached { runtime_id: u64, position: Vec3 },
    /// The corridor closed mid-flight; steering gave up.
    DestinationAbandoned {
        runtime_id: u64,
        position: Vec3,
        destination: Vec3,
    },
    CreatureRemoved { unique_id: i64 },
}

// ---------------------------------------------------------------------------
// GameWorld
// ---------------------------------------------------------------------------

/// The ECS game world.
pub struct GameWorld {
    pub world: World,
    pub registry: CreatureRegistry,
    pub terrain: BlockWorld,
    rng: StdRng,
}

impl GameWorld {
    /// Create a world over `terrain`. All randomness derives from `seed`.
    pub fn new(starting_entity_id: i64, terrain: BlockWorld, seed: u64) -> Self {
        let mut world = World::new();
        world.insert_resource(OutgoingEvents::default());
        world.insert_resource(TickCounter::default());
        world.insert_resource(EntityIdAllocator::new(starting_entity_id));

        Self {
            world,
            registry: CreatureRegistry::new(),
            terrain,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Run one game tick: AI, flight physics, movement collection, dead cleanup.
    pub fn tick(&mut self) {
        self.world.resource_mut::<TickCounter>().0 += 1;
        system_flight_ai(&mut self.world, &self.terrain, &mut self.rng);
        system_flight_physics(&mut self.world, &self.terrain);
        system_collect_moves(&mut self.world);
        system_cleanup_dead(&mut self.world);
    }

    /// Drain all pending outgoing events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.resource_mut::<OutgoingEvents>().events)
    }

    /// Return the current tick count.
    pub fn current_tick(&self) -> u64 {
        self.world.resource::<TickCounter>().0
    }

    /// Spawn a creature. Returns `(unique_id, runtime_id)` or `None` if the kind is unknown.
    pub fn spawn_creature(&mut self, type_id: &str, position: Vec3) -> Option<(i64, u64)> {
        let def = self.registry.get(type_id)?.clone();
        let entity_id = self.world.resource::<EntityIdAllocator>().allocate();
        let runtime_id = entity_id as u64;
        let variant = self.rng.gen_range(0..def.variant_count.max(1));

        self.world.spawn((
            EntityId {
                unique_id: entity_id,
                runtime_id,
            },
            Position(position),
            Rotation::default(),
            Velocity(Vec3::ZERO),
            Health {
                current: def.max_health,
                max: def.max_health,
            },
            OnGround(false),
            FallDistance::default(),
            BoundingBox {
                width: def.bb_width,
                height: def.bb_height,
            },
            Creature,
            CreatureType(def.type_id.clone()),
            Variant(variant),
            def.exemptions,
            FlightBrain::new(def.flight),
        ));

        debug!(type_id, runtime_id, variant, ?position, "creature spawned");
        self.world
            .resource_mut::<OutgoingEvents>()
            .events
            .push(GameEvent::CreatureSpawned {
                runtime_id,
                unique_id: entity_id,
                creature_type: def.type_id,
                variant,
                position,
                max_health: def.max_health,
                bb_width: def.bb_width,
                bb_height: def.bb_height,
            });

        Some((entity_id, runtime_id))
    }

    /// Add an impulse to a creature's velocity. Returns `false` if the
    /// creature is unknown or ignores pushback.
    pub fn push_creature(&mut self, runtime_id: u64, impulse: Vec3) -> bool {
        let Some(entity) = self.find_creature_entity(runtime_id) else {
            return false;
        };
        let ignores = self
            .world
            .get::<PhysicsExemptions>(entity)
            .is_some_and(|e| e.ignores_pushback);
        if ignores {
            return false;
        }
        match self.world.get_mut::<Velocity>(entity) {
            Some(mut vel) => {
                vel.0 += impulse;
                true
            }
            None => false,
        }
    }

    /// Mark a creature dead; it is removed at the end of the next tick.
    pub fn kill_creature(&mut self, runtime_id: u64) -> bool {
        match self.find_creature_entity(runtime_id) {
            Some(entity) => {
                if let Some(mut health) = self.world.get_mut::<Health>(entity) {
                    health.current = 0.0;
                }
                self.world.entity_mut(entity).insert(Dead);
                true
            }
            None => false,
        }
    }

    /// Get a creature's feet position by runtime_id.
    pub fn creature_position(&mut self, runtime_id: u64) -> Option<Vec3> {
        let entity = self.find_creature_entity(runtime_id)?;
        self.world.get::<Position>(entity).map(|p| p.0)
    }

    /// Get a creature's velocity by runtime_id.
    pub fn creature_velocity(&mut self, runtime_id: u64) -> Option<Vec3> {
        let entity = self.find_creature_entity(runtime_id)?;
        self.world.get::<Velocity>(entity).map(|v| v.0)
    }

    /// Get a creature's steering state by runtime_id.
    pub fn creature_state(&mut self, runtime_id: u64) -> Option<SteeringState> {
        let entity = self.find_creature_entity(runtime_id)?;
        self.world
            .get::<FlightBrain>(entity)
            .map(|b| b.steering.state().clone())
    }

    /// Number of living creatures.
    pub fn creature_count(&mut self) -> usize {
        self.world
            .query_filtered::<(), (With<Creature>, Without<Dead>)>()
            .iter(&self.world)
            .count()
    }

    /// Snapshots of all living creatures.
    pub fn all_creatures(&mut self) -> Vec<CreatureSnapshot> {
        let mut query = self.world.query_filtered::<(
            &EntityId,
            &Position,
            &Rotation,
            &Health,
            &CreatureType,
            &Variant,
            &FlightBrain,
        ), (With<Creature>, Without<Dead>)>();
        query
            .iter(&self.world)
            .map(
                |(eid, pos, rot, health, kind, variant, brain)| CreatureSnapshot {
                    unique_id: eid.unique_id,
                    runtime_id: eid.runtime_id,
                    creature_type: kind.0.clone(),
                    variant: variant.0,
                    position: pos.0,
                    yaw: rot.yaw,
                    health: health.current,
                    destination: brain.steering.destination(),
                },
            )
            .collect()
    }

    /// Find a living creature entity by runtime_id.
    fn find_creature_entity(&mut self, runtime_id: u64) -> Option<Entity> {
        let mut query = self
            .world
            .query_filtered::<(Entity, &EntityId), (With<Creature>, Without<Dead>)>();
        for (entity, eid) in query.iter(&self.world) {
            if eid.runtime_id == runtime_id {
                return Some(entity);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Systems (manual, called by GameWorld::tick)
// ---------------------------------------------------------------------------

/// Collect position changes and emit CreatureMoved events.
fn system_collect_moves(world: &mut World) {
    let mut moves = Vec::new();

    let mut query = world.query_filtered::<(&EntityId, &Position, &Rotation, &Velocity, &OnGround), (
        With<Creature>,
        Without<Dead>,
    )>();

    for (eid, pos, rot, vel, on_ground) in query.iter(world) {
        let v = vel.0;
        if v.x.abs() > 0.001 || v.y.abs() > 0.001 || v.z.abs() > 0.001 {
            moves.push(GameEvent::CreatureMoved {
                runtime_id: eid.runtime_id,
                position: pos.0,
                yaw: rot.yaw,
                body_yaw: rot.body_yaw,
                on_ground: on_ground.0,
            });
        }
    }

    world.resource_mut::<OutgoingEvents>().events.extend(moves);
}

/// Remove dead entities and announce their removal.
fn system_cleanup_dead(world: &mut World) {
    let dead: Vec<(Entity, i64)> = world
        .query_filtered::<(Entity, &EntityId), With<Dead>>()
        .iter(world)
        .map(|(entity, eid)| (entity, eid.unique_id))
        .collect();
    let mut removed = Vec::with_capacity(dead.len());
    for (entity, unique_id) in dead {
        world.despawn(entity);
        removed.push(GameEvent::CreatureRemoved { unique_id });
    }
    world.resource_mut::<OutgoingEvents>().events.extend(removed);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
