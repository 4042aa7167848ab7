//! Builds the game world from config and tallies what the creatures did.

use std::fmt;

use fauna_game::game_world::{GameEvent, GameWorld};
use fauna_world::BlockWorld;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::SimError;

pub fn build_terrain(config: &SimConfig) -> BlockWorld {
    let mut terrain = BlockWorld::new();
    for obstacle in &config.obstacles {
        let [x0, y0, z0] = obstacle.min;
        let [x1, y1, z1] = obstacle.max;
        terrain.fill((x0, y0, z0), (x1, y1, z1), obstacle.kind);
    }
    debug!(blocks = terrain.len(), "terrain built");
    terrain
}

/// Register custom kinds, then spawn every configured creature after
/// checking its kind's spawn rules.
pub fn build_world(config: &SimConfig) -> Result<GameWorld, SimError> {
    let mut game = GameWorld::new(1, build_terrain(config), config.simulation.seed);
    for def in &config.kinds {
        info!(type_id = %def.type_id, "registered creature kind");
        game.registry.register(def.clone());
    }

    let light = config.world.light;
    for spawn in &config.creatures {
        let def = game
            .registry
            .get(&spawn.kind)
            .ok_or_else(|| SimError::UnknownCreature(spawn.kind.clone()))?;
        let position = spawn.position();
        let block_y = position.y.floor() as i32;
        if !def.spawn.permits(block_y, light, config.world.sea_level) {
            return Err(SimError::SpawnRejected {
                kind: spawn.kind.clone(),
                block_y,
                light,
            });
        }
        game.spawn_creature(&spawn.kind, position)
            .ok_or_else(|| SimError::UnknownCreature(spawn.kind.clone()))?;
    }
    Ok(game)
}

/// Running counts of flight events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlightTally {
    pub spawned: u64,
    pub chosen: u64,
    pub reached: u64,
    pub abandoned: u64,
    pub moves: u64,
    pub removed: u64,
}

impl FlightTally {
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::CreatureSpawned { .. } => self.spawned += 1,
            GameEvent::CreatureMoved { .. } => self.moves += 1,
            GameEvent::DestinationChosen { .. } => self.chosen += 1,
            GameEvent::DestinationReached { .. } => self.reached += 1,
            GameEvent::DestinationAbandoned { .. } => self.abandoned += 1,
            GameEvent::CreatureRemoved { .. } => self.removed += 1,
        }
    }
}

impl fmt::Display for FlightTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} spawned, {} removed, {} moves, {} destinations chosen, {} reached, {} abandoned",
            self.spawned, self.removed, self.moves, self.chosen, self.reached, self.abandoned
        )
    }
}
