//! Axis-aligned bounding boxes for creatures and terrain.

use serde::Deserialize;

use crate::math::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Build the box of a creature standing at `feet`.
    ///
    /// X and Z extend `width / 2` either side; Y runs from the feet up by `height`.
    pub fn from_feet(feet: Vec3, width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Self {
            min: Vec3::new(feet.x - half, feet.y, feet.z - half),
            max: Vec3::new(feet.x + half, feet.y + height, feet.z + half),
        }
    }

    /// Unit cube occupying block `(x, y, z)`.
    pub fn block(x: i32, y: i32, z: i32) -> Self {
        let min = Vec3::new(x as f32, y as f32, z as f32);
        Self::new(min, min + Vec3::new(1.0, 1.0, 1.0))
    }

    /// The same box translated by `delta`.
    pub fn offset(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Overlap test. Boxes that merely share a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Iterate all block positions that intersect this box.
    ///
    /// A small epsilon (0.001) is subtracted from max bounds so that a box
    /// resting exactly on the edge of a block does not touch the next one.
    pub fn intersecting_blocks(&self) -> impl Iterator<Item = (i32, i32, i32)> {
        const EPS: f32 = 0.001;
        let bx_min = self.min.x.floor() as i32;
        let bx_max = (self.max.x - EPS).floor() as i32;
        let by_min = self.min.y.floor() as i32;
        let by_max = (self.max.y - EPS).floor() as i32;
        let bz_min = self.min.z.floor() as i32;
        let bz_max = (self.max.z - EPS).floor() as i32;

        let mut results = Vec::new();
        for bx in bx_min..=bx_max {
            for by in by_min..=by_max {
                for bz in bz_min..=bz_max {
                    results.push((bx, by, bz));
                }
            }
        }
        results.into_iter()
    }
}
