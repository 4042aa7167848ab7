//! Creature kind definitions.
//!
//! Butterflies and pixies share one flight algorithm; a definition carries the
//! numbers that tell them apart. Custom kinds can be registered from config.

use serde::Deserialize;

use crate::ai::FlightProfile;
use crate::components::PhysicsExemptions;

/// Where natural spawning may place a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    /// Light level must be strictly above this.
    pub min_light_exclusive: u8,
    /// Block Y must be strictly below this.
    pub max_y_exclusive: i32,
}

impl SpawnRules {
    /// Above sea level, below the height cap, and bright enough.
    pub fn permits(&self, block_y: i32, light: u8, sea_level: i32) -> bool {
        block_y > sea_level && block_y < self.max_y_exclusive && light > self.min_light_exclusive
    }
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            min_light_exclusive: 8,
            max_y_exclusive: 90,
        }
    }
}

/// Definition of a creature kind.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatureDefinition {
    /// Identifier, e.g. `"fauna:butterfly"`.
    pub type_id: String,
    pub display_name: String,
    pub max_health: f32,
    /// Bounding box width.
    pub bb_width: f32,
    /// Bounding box height.
    pub bb_height: f32,
    /// Number of cosmetic variants; one is picked at spawn.
    #[serde(default = "default_variant_count")]
    pub variant_count: u8,
    #[serde(default)]
    pub flight: FlightProfile,
    #[serde(default)]
    pub spawn: SpawnRules,
    #[serde(default)]
    pub exemptions: PhysicsExemptions,
}

fn default_variant_count() -> u8 {
    1
}

/// Registry of known creature kinds.
pub struct CreatureRegistry {
    creatures: Vec<CreatureDefinition>,
}

impl Default for CreatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatureRegistry {
    /// Build the registry with the built-in kinds.
    pub fn new() -> Self {
        Self {
            creatures: vec![
                CreatureDefinition {
                    type_id: "fauna:butterfly".into(),
                    display_name: "Butterfly".into(),
                    max_health: 1.0,
                    bb_width: 0.7,
                    bb_height: 0.7,
                    variant_count: 5,
                    flight: FlightProfile::butterfly(),
                    spawn: SpawnRules::default(),
                    exemptions: PhysicsExemptions::FLYER,
                },
                CreatureDefinition {
                    type_id: "fauna:pixie".into(),
                    display_name: "Pixie".into(),
                    max_health: 2.0,
                    bb_width: 0.7,
                    bb_height: 0.7,
                    variant_count: 3,
                    flight: FlightProfile::pixie(),
                    spawn: SpawnRules::default(),
                    exemptions: PhysicsExemptions::FLYER,
                },
            ],
        }
    }

    /// Look up a definition by its identifier.
    pub fn get(&self, type_id: &str) -> Option<&CreatureDefinition> {
        self.creatures.iter().find(|c| c.type_id == type_id)
    }

    /// All known definitions.
    pub fn all(&self) -> &[CreatureDefinition] {
        &self.creatures
    }

    /// Register a custom kind. A kind with the same identifier is replaced.
    pub fn register(&mut self, def: CreatureDefinition) {
        self.creatures.retain(|c| c.type_id != def.type_id);
        self.creatures.push(def);
    }
}
