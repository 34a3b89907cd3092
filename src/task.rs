pub mod land;
pub mod planner;
pub mod stick_yaw;
pub mod sticks;
pub mod stop;

use fugit::NanosDurationU64 as Duration;

use crate::types::{Setpoint, VehicleState};

pub use land::{FlightTaskLand, LandingAnchor, Phase};

/// Lifecycle shared by flight tasks driven by the mode manager.
///
/// `activate` is called once with the setpoint the previous task emitted, then
/// `update` once per control cycle with the elapsed time since the last one.
pub trait FlightTask {
    type Parameters;

    fn activate(&mut self, last_setpoint: &Setpoint, state: &VehicleState, interval: Duration);
    fn update(&mut self, state: &VehicleState, interval: Duration) -> Setpoint;
    fn update_params(&mut self, params: &Self::Parameters);
}

#[inline]
pub(crate) fn seconds(interval: Duration) -> f32 {
    interval.to_nanos() as f32 / 1_000_000_000.0
}
