//! Flying-creature AI: target probing, steering, and random-flight goal selection.

pub mod body;
pub mod goal;
pub mod probe;
pub mod profile;
pub mod steering;
pub mod system;

pub use body::{CreatureBody, FlyingBody};
pub use goal::{AxisDirection, GoalSelector};
pub use probe::TargetProbe;
pub use profile::FlightProfile;
pub use steering::{SteeringController, SteeringOutcome, SteeringState};
