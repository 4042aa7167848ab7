//! Numeric tuning for the flight AI of one creature kind.

use rand::Rng;
use serde::Deserialize;

/// Flight constants. The algorithm is shared; only these numbers differ per kind.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightProfile {
    /// Half-extent of the first random candidate cube.
    pub first_attempt_distance: f32,
    /// Half-extent of the second random candidate cube.
    pub retry_attempt_distance: f32,
    /// Maximum magnitude of an axis-aligned fallback candidate.
    pub axis_attempt_distance: f32,
    /// How far ahead the corridor is validated.
    pub lookahead: f32,
    /// Velocity added along the aim vector on each course correction.
    pub acceleration: f32,
    /// Closer than this counts as arrived.
    pub arrival_distance: f32,
    /// Inclusive lower bound of the course-change cooldown.
    pub cooldown_min: u32,
    /// Exclusive upper bound of the course-change cooldown.
    pub cooldown_max: u32,
    /// Y samples are `(r * 2 - vertical_bias) * distance` for `r` in `[0, 1)`,
    /// so values above 1.0 bias random flight downward.
    pub vertical_bias: f32,
    /// Speed passed along with each committed destination.
    pub cruise_speed: f32,
}

impl FlightProfile {
    pub fn butterfly() -> Self {
        Self::default()
    }

    pub fn pixie() -> Self {
        Self {
            first_attempt_distance: 6.0,
            ..Self::default()
        }
    }

    /// Draw the ticks until the next course change. A range that is empty
    /// collapses to `cooldown_min`.
    pub fn next_cooldown<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.cooldown_max > self.cooldown_min {
            rng.gen_range(self.cooldown_min..self.cooldown_max)
        } else {
            self.cooldown_min
        }
    }
}

impl Default for FlightProfile {
    fn default() -> Self {
        Self {
            first_attempt_distance: 2.0,
            retry_attempt_distance: 2.0,
            axis_attempt_distance: 1.0,
            lookahead: 5.0,
            acceleration: 0.1,
            arrival_distance: 0.3,
            cooldown_min: 2,
            cooldown_max: 4,
            vertical_bias: 1.1,
            cruise_speed: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn pixie_differs_only_in_first_attempt() {
        let b = FlightProfile::butterfly();
        let p = FlightProfile::pixie();
        assert_eq!(p.first_attempt_distance, 6.0);
        assert_eq!(
            FlightProfile {
                first_attempt_distance: b.first_attempt_distance,
                ..p
            },
            b
        );
    }

    #[test]
    fn cooldown_range_is_two_or_three() {
        let p = FlightProfile::default();
        assert_eq!((p.cooldown_min..p.cooldown_max).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn next_cooldown_stays_in_range() {
        let p = FlightProfile::default();
        let mut rng = StdRng::seed_from_u64(1);
        let draws: Vec<u32> = (0..200).map(|_| p.next_cooldown(&mut rng)).collect();
        assert!(draws.iter().all(|c| (2..4).contains(c)));
        assert!(draws.contains(&2) && draws.contains(&3));

        let fixed = FlightProfile {
            cooldown_min: 5,
            cooldown_max: 5,
            ..FlightProfile::default()
        };
        assert_eq!(fixed.next_cooldown(&mut rng), 5);
    }
}
