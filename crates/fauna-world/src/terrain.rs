//! Sparse block terrain: solid collision cubes, fluids and ladders.

use std::collections::HashMap;

use serde::Deserialize;

use crate::collision::CollisionQuery;
use crate::physics::Aabb;

/// What occupies a block cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    #[default]
    Air,
    Solid,
    Water,
    Lava,
    Ladder,
}

/// The fluid a body is currently moving through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medium {
    Air,
    Water,
    Lava,
}

/// Block terrain keyed by integer block position. Missing cells are air.
#[derive(Debug, Default, Clone)]
pub struct BlockWorld {
    blocks: HashMap<(i32, i32, i32), BlockKind>,
}

impl BlockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, kind: BlockKind) {
        if kind == BlockKind::Air {
            self.blocks.remove(&(x, y, z));
        } else {
            self.blocks.insert((x, y, z), kind);
        }
    }

    pub fn block_at(&self, x: i32, y: i32, z: i32) -> BlockKind {
        self.blocks.get(&(x, y, z)).copied().unwrap_or_default()
    }

    /// Fill the inclusive block range `min..=max` with `kind`.
    pub fn fill(&mut self, min: (i32, i32, i32), max: (i32, i32, i32), kind: BlockKind) {
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                for z in min.2..=max.2 {
                    self.set_block(x, y, z, kind);
                }
            }
        }
    }

    /// Number of non-air blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Fluid surrounding `volume`. Lava takes precedence over water.
    pub fn medium_at(&self, volume: &Aabb) -> Medium {
        let mut medium = Medium::Air;
        for (x, y, z) in volume.intersecting_blocks() {
            match self.block_at(x, y, z) {
                BlockKind::Lava => return Medium::Lava,
                BlockKind::Water => medium = Medium::Water,
                _ => {}
            }
        }
        medium
    }

    /// Whether any block covered by `volume` is a ladder.
    pub fn is_on_ladder(&self, volume: &Aabb) -> bool {
        volume
            .intersecting_blocks()
            .any(|(x, y, z)| self.block_at(x, y, z) == BlockKind::Ladder)
    }
}

impl CollisionQuery for BlockWorld {
    fn collision_boxes(&self, volume: &Aabb) -> Vec<Aabb> {
        volume
            .intersecting_blocks()
            .filter(|&(x, y, z)| self.block_at(x, y, z) == BlockKind::Solid)
            .map(|(x, y, z)| Aabb::block(x, y, z))
            .filter(|block| block.intersects(volume))
            .collect()
    }
}
