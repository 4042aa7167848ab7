mod config;
mod error;
mod setup;

use std::time::Duration;

use fauna_game::game_world::{GameEvent, GameWorld};
use tokio::time::Interval;
use tracing::{debug, error, info, trace};

use config::SimConfig;
use setup::FlightTally;

#[tokio::main]
async fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fauna-sim.toml".to_string());
    let config = match SimConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "fauna-sim v{} running {} ticks (seed {})",
        env!("CARGO_PKG_VERSION"),
        config.simulation.ticks,
        config.simulation.seed
    );

    let mut game = match setup::build_world(&config) {
        Ok(g) => g,
        Err(e) => {
            error!("Failed to set up world: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "World ready: {} blocks, {} creatures",
        game.terrain.len(),
        game.creature_count()
    );

    let tally = run(&mut game, &config).await;
    info!("Finished at tick {}: {tally}", game.current_tick());
}

/// Tick until the configured count or Ctrl+C, whichever comes first.
async fn run(game: &mut GameWorld, config: &SimConfig) -> FlightTally {
    let sim = &config.simulation;
    let mut pacing = (sim.tick_millis > 0)
        .then(|| tokio::time::interval(Duration::from_millis(sim.tick_millis)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut tally = FlightTally::default();
    for event in game.drain_events() {
        tally.record(&event);
    }

    while game.current_tick() < sim.ticks {
        tokio::select! {
            _ = next_tick(&mut pacing) => {}
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }

        game.tick();
        for event in game.drain_events() {
            log_event(&event);
            tally.record(&event);
        }

        let tick = game.current_tick();
        if sim.report_interval > 0 && tick % sim.report_interval == 0 {
            report(game, tick, &tally);
        }
    }
    tally
}

async fn next_tick(pacing: &mut Option<Interval>) {
    match pacing {
        Some(interval) => {
            interval.tick().await;
        }
        None => tokio::task::yield_now().await,
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::DestinationChosen {
            runtime_id,
            destination,
        } => debug!(runtime_id, ?destination, "destination chosen"),
        GameEvent::DestinationReached {
            runtime_id,
            position,
        } => debug!(runtime_id, ?position, "destination reached"),
        GameEvent::DestinationAbandoned {
            runtime_id,
            position,
            destination,
        } => info!(runtime_id, ?position, ?destination, "destination abandoned"),
        GameEvent::CreatureRemoved { unique_id } => info!(unique_id, "creature removed"),
        GameEvent::CreatureMoved { .. } | GameEvent::CreatureSpawned { .. } => {
            trace!(?event)
        }
    }
}

fn report(game: &mut GameWorld, tick: u64, tally: &FlightTally) {
    info!("Tick {tick}: {} creatures alive, {tally}", game.creature_count());
    for creature in game.all_creatures() {
        debug!(
            runtime_id = creature.runtime_id,
            kind = %creature.creature_type,
            position = ?creature.position,
            destination = ?creature.destination,
            "creature"
        );
    }
}
