//! Flying-creature simulation: local navigation AI, creature kinds, and the ECS host world.

pub mod ai;
pub mod components;
pub mod creature_registry;
pub mod flight;
pub mod game_world;
