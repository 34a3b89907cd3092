pub mod control;
pub mod setpoint;
pub mod vehicle;

pub use setpoint::{unspecified, Constraints, LandingGear, Setpoint, UNSPECIFIED};
pub use vehicle::VehicleState;

pub const GRAVITY: f32 = 9.80665;
