//! Random-flight goal selection: propose nearby points until one is reachable.

use fauna_world::{CollisionQuery, Vec3};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use super::body::FlyingBody;
use super::probe::TargetProbe;
use super::steering::SteeringController;

/// One of the six axis-aligned unit directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl AxisDirection {
    pub const ALL: [AxisDirection; 6] = [
        AxisDirection::Down,
        AxisDirection::Up,
        AxisDirection::North,
        AxisDirection::South,
        AxisDirection::West,
        AxisDirection::East,
    ];

    pub fn unit(self) -> Vec3 {
        match self {
            AxisDirection::Down => Vec3::new(0.0, -1.0, 0.0),
            AxisDirection::Up => Vec3::new(0.0, 1.0, 0.0),
            AxisDirection::North => Vec3::new(0.0, 0.0, -1.0),
            AxisDirection::South => Vec3::new(0.0, 0.0, 1.0),
            AxisDirection::West => Vec3::new(-1.0, 0.0, 0.0),
            AxisDirection::East => Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

/// Offset inside a cube of half-extent `max_distance`, with Y drawn from
/// `(r * 2 - vertical_bias) * max_distance`.
pub fn random_offset<R: Rng + ?Sized>(rng: &mut R, max_distance: f32, vertical_bias: f32) -> Vec3 {
    let x = (rng.gen::<f32>() * 2.0 - 1.0) * max_distance;
    let y = (rng.gen::<f32>() * 2.0 - vertical_bias) * max_distance;
    let z = (rng.gen::<f32>() * 2.0 - 1.0) * max_distance;
    Vec3::new(x, y, z)
}

/// Offset of random length in `[0, max_distance)` along `direction`.
pub fn axis_offset<R: Rng + ?Sized>(rng: &mut R, direction: AxisDirection, max_distance: f32) -> Vec3 {
    direction.unit() * (rng.gen::<f32>() * max_distance)
}

/// Picks a new destination whenever the steering controller is idle.
///
/// Distances, lookahead and cruise speed are read from the profile of the
/// controller being fed.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalSelector;

impl GoalSelector {
    pub fn new() -> Self {
        Self
    }

    /// Only pick a goal when there is nothing to steer toward.
    pub fn should_run(&self, steering: &SteeringController) -> bool {
        !steering.is_seeking()
    }

    /// Try two random points, then the six axis directions in shuffled order.
    ///
    /// The first candidate with a clear corridor is committed to `steering`
    /// and returned. `None` means nothing was reachable this time; the
    /// controller stays idle and the caller may retry on a later tick.
    pub fn select_goal<B, W, R>(
        &self,
        body: &B,
        world: &W,
        steering: &mut SteeringController,
        rng: &mut R,
    ) -> Option<Vec3>
    where
        B: FlyingBody + ?Sized,
        W: CollisionQuery + ?Sized,
        R: Rng + ?Sized,
    {
        let p = *steering.profile();
        for max_distance in [p.first_attempt_distance, p.retry_attempt_distance] {
            let offset = random_offset(rng, max_distance, p.vertical_bias);
            if let Some(dest) = try_going(body, world, steering, offset) {
                return Some(dest);
            }
        }

        let mut directions = AxisDirection::ALL;
        directions.shuffle(rng);
        for direction in directions {
            let offset = axis_offset(rng, direction, p.axis_attempt_distance);
            if let Some(dest) = try_going(body, world, steering, offset) {
                return Some(dest);
            }
        }

        trace!(position = ?body.position(), "no reachable destination");
        None
    }
}

/// Commit `steering` to `body.position() + offset` if the corridor is clear.
fn try_going<B, W>(
    body: &B,
    world: &W,
    steering: &mut SteeringController,
    offset: Vec3,
) -> Option<Vec3>
where
    B: FlyingBody + ?Sized,
    W: CollisionQuery + ?Sized,
{
    let profile = *steering.profile();
    let probe = TargetProbe::new(body, body.position() + offset);
    if !probe.is_path_clear(body, world, profile.lookahead) {
        return None;
    }
    let dest = probe.destination();
    debug!(destination = ?dest, distance = probe.distance(), "new flight destination");
    steering.set_destination(body, dest, profile.cruise_speed);
    Some(dest)
}
