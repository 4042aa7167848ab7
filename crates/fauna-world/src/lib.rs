//! World geometry: vectors, bounding boxes, block terrain, and collision queries.

pub mod collision;
pub mod math;
pub mod physics;
pub mod terrain;

pub use collision::{CollisionQuery, EmptyWorld};
pub use math::Vec3;
pub use physics::Aabb;
pub use terrain::{BlockKind, BlockWorld, Medium};
