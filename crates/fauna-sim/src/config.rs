use std::path::Path;

use fauna_game::creature_registry::CreatureDefinition;
use fauna_world::{BlockKind, Vec3};
use serde::Deserialize;

use crate::error::SimError;

#[derive(Debug, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub obstacles: Vec<ObstacleConfig>,
    #[serde(default)]
    pub creatures: Vec<SpawnConfig>,
    /// Extra creature kinds, registered before spawning.
    #[serde(default)]
    pub kinds: Vec<CreatureDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct SimulationSection {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default)]
    pub seed: u64,
    /// Ticks between progress reports. 0 = only the final report.
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
    /// Wall-clock pacing per tick in milliseconds. 0 = run unpaced.
    #[serde(default)]
    pub tick_millis: u64,
}

fn default_ticks() -> u64 {
    1200
}

fn default_report_interval() -> u64 {
    100
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            seed: 0,
            report_interval: default_report_interval(),
            tick_millis: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    /// Light level used for every spawn check.
    #[serde(default = "default_light")]
    pub light: u8,
}

fn default_sea_level() -> i32 {
    63
}

fn default_light() -> u8 {
    15
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            sea_level: default_sea_level(),
            light: default_light(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// An inclusive box of blocks placed before the run.
#[derive(Debug, Deserialize)]
pub struct ObstacleConfig {
    pub min: [i32; 3],
    pub max: [i32; 3],
    #[serde(default = "default_obstacle_kind")]
    pub kind: BlockKind,
}

fn default_obstacle_kind() -> BlockKind {
    BlockKind::Solid
}

#[derive(Debug, Deserialize)]
pub struct SpawnConfig {
    pub kind: String,
    /// Feet position.
    pub position: [f32; 3],
}

impl SpawnConfig {
    pub fn position(&self) -> Vec3 {
        let [x, y, z] = self.position;
        Vec3::new(x, y, z)
    }
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
