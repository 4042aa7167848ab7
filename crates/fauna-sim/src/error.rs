//! Simulator error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown creature kind: {0}")]
    UnknownCreature(String),

    #[error("{kind} may not spawn at block y {block_y} with light {light}")]
    SpawnRejected { kind: String, block_y: i32, light: u8 },
}
