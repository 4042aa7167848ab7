//! Per-tick course correction toward a committed destination.

use fauna_world::{CollisionQuery, Vec3};
use rand::Rng;
use tracing::{debug, trace};

use super::body::FlyingBody;
use super::probe::TargetProbe;
use super::profile::FlightProfile;

/// Whether the controller currently has somewhere to go.
#[derive(Debug, Clone, PartialEq)]
pub enum SteeringState {
    /// No destination. Goal selection may run.
    Idle,
    /// Heading for `probe.destination()`.
    Seeking { probe: TargetProbe },
}

/// What a single [`SteeringController::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteeringOutcome {
    /// Nothing to do.
    Idle,
    /// Still seeking; course change deferred this tick.
    CoolingDown,
    /// Accelerated toward the destination and kept it.
    Corrected,
    /// Accelerated, then dropped the destination as reached.
    Arrived,
    /// Accelerated, then dropped the destination because the corridor is blocked.
    Blocked,
}

/// Drives a body toward its destination, one tick at a time.
///
/// The course-change cooldown belongs to the controller, not to a
/// destination: handing over a new destination leaves it running.
#[derive(Debug, Clone)]
pub struct SteeringController {
    state: SteeringState,
    profile: FlightProfile,
    cooldown: u32,
    requested_speed: f32,
}

impl SteeringController {
    pub fn new(profile: FlightProfile) -> Self {
        Self {
            state: SteeringState::Idle,
            profile,
            cooldown: 0,
            requested_speed: 0.0,
        }
    }

    pub fn state(&self) -> &SteeringState {
        &self.state
    }

    pub fn profile(&self) -> &FlightProfile {
        &self.profile
    }

    /// Seeking ticks left before the next course change.
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn is_seeking(&self) -> bool {
        matches!(self.state, SteeringState::Seeking { .. })
    }

    pub fn destination(&self) -> Option<Vec3> {
        match &self.state {
            SteeringState::Seeking { probe } => Some(probe.destination()),
            SteeringState::Idle => None,
        }
    }

    /// Speed passed with the last destination.
    ///
    /// Recorded only: acceleration is the fixed `profile.acceleration`
    /// whatever speed was requested.
    pub fn requested_speed(&self) -> f32 {
        self.requested_speed
    }

    /// Commit to `destination`. The next course change happens once the
    /// running cooldown expires, on the very next tick for a fresh controller.
    pub fn set_destination<B: FlyingBody + ?Sized>(
        &mut self,
        body: &B,
        destination: Vec3,
        speed: f32,
    ) {
        self.requested_speed = speed;
        self.state = SteeringState::Seeking {
            probe: TargetProbe::new(body, destination),
        };
    }

    /// Drop the destination.
    pub fn clear(&mut self) {
        self.state = SteeringState::Idle;
    }

    /// Run one simulation tick.
    ///
    /// While seeking, the corridor is re-checked every 2 to 3 ticks; the
    /// cooldown does not count down while idle. On those ticks velocity is
    /// nudged along the aim vector, yaw is turned toward the destination, and
    /// the destination is dropped if the way ahead is blocked or the body is
    /// close enough. Blocked is checked first.
    pub fn tick<B, W, R>(&mut self, body: &mut B, world: &W, rng: &mut R) -> SteeringOutcome
    where
        B: FlyingBody + ?Sized,
        W: CollisionQuery + ?Sized,
        R: Rng + ?Sized,
    {
        let SteeringState::Seeking { probe } = &mut self.state else {
            return SteeringOutcome::Idle;
        };

        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown > 0 {
            return SteeringOutcome::CoolingDown;
        }
        self.cooldown = self.profile.next_cooldown(rng);

        probe.refresh(&*body);
        body.set_velocity(body.velocity() + probe.aim() * self.profile.acceleration);

        let delta = probe.delta();
        body.set_yaw(-delta.x.atan2(delta.z).to_degrees());

        let outcome = if !probe.is_path_clear(&*body, world, self.profile.lookahead) {
            debug!(
                destination = ?probe.destination(),
                distance = probe.distance(),
                "abandoning destination, way is blocked"
            );
            SteeringOutcome::Blocked
        } else if probe.distance() < self.profile.arrival_distance {
            trace!(distance = probe.distance(), "arrived at destination");
            SteeringOutcome::Arrived
        } else {
            SteeringOutcome::Corrected
        };

        if outcome != SteeringOutcome::Corrected {
            self.state = SteeringState::Idle;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use fauna_world::{Aabb, BlockKind, BlockWorld, EmptyWorld};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::ai::body::CreatureBody;

    fn butterfly_at(x: f32, y: f32, z: f32) -> CreatureBody {
        CreatureBody::new(Vec3::new(x, y, z), 0.7, 0.7)
    }

    /// Integrate velocity into position with vanilla air drag.
    fn physics_step(body: &mut CreatureBody) {
        body.integrate();
        body.velocity = body.velocity * 0.91;
    }

    /// Obstructs every box overlapping the wrapped volume.
    struct Obstacle(Aabb);

    impl CollisionQuery for Obstacle {
        fn collision_boxes(&self, volume: &Aabb) -> Vec<Aabb> {
            if self.0.intersects(volume) {
                vec![self.0]
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn idle_tick_is_noop() {
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(1.0, 2.0, 3.0);
        body.velocity = Vec3::new(0.2, -0.1, 0.0);
        body.set_yaw(45.0);
        let before = body;
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..10 {
            assert_eq!(
                controller.tick(&mut body, &EmptyWorld, &mut rng),
                SteeringOutcome::Idle
            );
        }
        assert_eq!(body, before);
        assert!(!controller.is_seeking());
    }

    #[test]
    fn set_destination_starts_seeking() {
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let body = butterfly_at(0.0, 0.0, 0.0);
        controller.set_destination(&body, Vec3::new(1.0, 2.0, 3.0), 1.0);
        assert!(controller.is_seeking());
        assert_eq!(controller.destination(), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(controller.cooldown(), 0);
    }

    #[test]
    fn first_tick_accelerates_and_faces_target() {
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(2);
        controller.set_destination(&body, Vec3::new(10.0, 0.0, 0.0), 1.0);

        let outcome = controller.tick(&mut body, &EmptyWorld, &mut rng);
        assert_eq!(outcome, SteeringOutcome::Corrected);
        assert!((body.velocity.x - 0.1).abs() < 1e-6);
        assert!(body.velocity.y.abs() < 1e-6);
        assert!(body.velocity.z.abs() < 1e-6);
        // -atan2(10, 0) in degrees.
        assert!((body.yaw + 90.0).abs() < 1e-4);
        assert_eq!(body.body_yaw, body.yaw);
    }

    #[test]
    fn requested_speed_does_not_scale_acceleration() {
        let mut rng = StdRng::seed_from_u64(3);
        for speed in [0.1, 1.0, 25.0] {
            let mut controller = SteeringController::new(FlightProfile::butterfly());
            let mut body = butterfly_at(0.0, 0.0, 0.0);
            controller.set_destination(&body, Vec3::new(0.0, 0.0, 8.0), speed);
            assert_eq!(controller.requested_speed(), speed);
            controller.tick(&mut body, &EmptyWorld, &mut rng);
            assert!((body.velocity.z - 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn acceleration_adds_to_existing_velocity() {
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);
        body.velocity = Vec3::new(0.0, 0.3, 0.0);
        let mut rng = StdRng::seed_from_u64(4);
        controller.set_destination(&body, Vec3::new(-5.0, 0.0, 0.0), 1.0);
        controller.tick(&mut body, &EmptyWorld, &mut rng);
        assert!((body.velocity.x + 0.1).abs() < 1e-6);
        assert!((body.velocity.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn cooldown_reload_is_two_or_three() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);
        controller.set_destination(&body, Vec3::new(1000.0, 0.0, 0.0), 1.0);
        let mut seen = [false; 2];

        for _ in 0..1000 {
            if controller.tick(&mut body, &EmptyWorld, &mut rng) == SteeringOutcome::Corrected {
                let cooldown = controller.cooldown();
                assert!(cooldown == 2 || cooldown == 3, "cooldown {cooldown}");
                seen[(cooldown - 2) as usize] = true;
            }
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn new_destination_keeps_running_cooldown() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);

        controller.set_destination(&body, Vec3::new(0.1, 0.0, 0.0), 1.0);
        assert_eq!(
            controller.tick(&mut body, &EmptyWorld, &mut rng),
            SteeringOutcome::Arrived
        );
        let reloaded = controller.cooldown();
        assert!(reloaded == 2 || reloaded == 3);

        controller.set_destination(&body, Vec3::new(-5.0, 0.0, 3.0), 1.0);
        assert_eq!(controller.cooldown(), reloaded);

        let before = body;
        let mut corrected_at = None;
        for t in 1..=reloaded {
            match controller.tick(&mut body, &EmptyWorld, &mut rng) {
                SteeringOutcome::CoolingDown => assert_eq!(body, before),
                SteeringOutcome::Corrected => {
                    corrected_at = Some(t);
                    break;
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(corrected_at, Some(reloaded));
        assert!(reloaded >= 2);
    }

    #[test]
    fn corrections_are_spaced_two_or_three_ticks_apart() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);
        controller.set_destination(&body, Vec3::new(1000.0, 0.0, 0.0), 1.0);

        let mut corrected_at = Vec::new();
        for t in 0..300 {
            match controller.tick(&mut body, &EmptyWorld, &mut rng) {
                SteeringOutcome::Corrected => corrected_at.push(t),
                SteeringOutcome::CoolingDown => {}
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(corrected_at[0], 0);
        for pair in corrected_at.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap == 2 || gap == 3, "gap {gap}");
        }
    }

    #[test]
    fn cooling_down_leaves_body_untouched() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);
        controller.set_destination(&body, Vec3::new(0.0, 10.0, 0.0), 1.0);
        controller.tick(&mut body, &EmptyWorld, &mut rng);
        let after_first = body;
        assert_eq!(
            controller.tick(&mut body, &EmptyWorld, &mut rng),
            SteeringOutcome::CoolingDown
        );
        assert_eq!(body, after_first);
    }

    #[test]
    fn reaches_destination_in_empty_world() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);
        let destination = Vec3::new(10.0, 0.0, 0.0);
        controller.set_destination(&body, destination, 1.0);

        let first = controller.tick(&mut body, &EmptyWorld, &mut rng);
        assert_eq!(first, SteeringOutcome::Corrected);
        assert!((body.velocity.x - 0.1).abs() < 1e-6);
        physics_step(&mut body);

        let mut arrived = false;
        for _ in 0..400 {
            if controller.tick(&mut body, &EmptyWorld, &mut rng) == SteeringOutcome::Arrived {
                arrived = true;
                break;
            }
            physics_step(&mut body);
        }
        assert!(arrived, "never arrived, body at {:?}", body.position);
        assert!(!controller.is_seeking());
        assert!(body.position.distance(destination) < 0.3);
    }

    #[test]
    fn blocked_corridor_goes_idle_on_first_check() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);
        // Centred on (3, 0, 0) and larger than the creature's box.
        let world = Obstacle(Aabb::from_feet(Vec3::new(3.0, -0.5, 0.0), 1.0, 1.7));
        let destination = Vec3::new(10.0, 0.0, 0.0);

        let probe = TargetProbe::new(&body, destination);
        assert!(!probe.is_path_clear(&body, &world, 5.0));

        controller.set_destination(&body, destination, 1.0);
        assert_eq!(
            controller.tick(&mut body, &world, &mut rng),
            SteeringOutcome::Blocked
        );
        assert!(!controller.is_seeking());
        assert!(body.position.distance(destination) > 9.0);
    }

    #[test]
    fn obstacle_appearing_mid_flight_aborts_at_next_check() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.5, 0.0, 0.5);
        controller.set_destination(&body, Vec3::new(0.5, 0.0, 20.5), 1.0);
        assert_eq!(
            controller.tick(&mut body, &EmptyWorld, &mut rng),
            SteeringOutcome::Corrected
        );

        let mut world = BlockWorld::new();
        world.fill((-1, -1, 3), (1, 1, 3), BlockKind::Solid);
        let mut outcome = SteeringOutcome::CoolingDown;
        for _ in 0..3 {
            outcome = controller.tick(&mut body, &world, &mut rng);
            if outcome != SteeringOutcome::CoolingDown {
                break;
            }
        }
        assert_eq!(outcome, SteeringOutcome::Blocked);
        assert!(!controller.is_seeking());
    }

    #[test]
    fn blocked_wins_over_arrived() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.5, 0.0, 0.5);
        // The body already overlaps this block, so every sample is obstructed.
        let mut world = BlockWorld::new();
        world.set_block(0, 0, 0, BlockKind::Solid);
        controller.set_destination(&body, Vec3::new(0.6, 0.0, 0.5), 1.0);
        assert_eq!(
            controller.tick(&mut body, &world, &mut rng),
            SteeringOutcome::Blocked
        );
    }

    #[test]
    fn close_enough_counts_as_arrived() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut controller = SteeringController::new(FlightProfile::butterfly());
        let mut body = butterfly_at(0.0, 0.0, 0.0);
        controller.set_destination(&body, Vec3::new(0.1, 0.1, 0.0), 1.0);
        assert_eq!(
            controller.tick(&mut body, &EmptyWorld, &mut rng),
            SteeringOutcome::Arrived
        );
        assert_eq!(controller.destination(), None);
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut controller = SteeringController::new(FlightProfile::pixie());
        let body = butterfly_at(0.0, 0.0, 0.0);
        controller.set_destination(&body, Vec3::new(3.0, 0.0, 0.0), 1.0);
        controller.clear();
        assert_eq!(controller.state(), &SteeringState::Idle);
    }
}
