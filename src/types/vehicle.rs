use nalgebra::Vector3;

use super::setpoint::{unspecified, UNSPECIFIED};

/// Per-cycle inputs of a flight task, local NED frame, SI units
#[derive(Copy, Clone, Debug, Serialize)]
pub struct VehicleState {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    /// Heading in radians
    pub yaw: f32,
    /// Coarse height above ground, may come from home altitude
    pub dist_to_ground: f32,
    /// Short range height measurement, NaN when not available
    pub dist_to_bottom: f32,
    /// Velocity setpoint applied by the position controller on the last cycle
    pub velocity_setpoint_feedback: Vector3<f32>,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            yaw: 0.0,
            dist_to_ground: UNSPECIFIED,
            dist_to_bottom: UNSPECIFIED,
            velocity_setpoint_feedback: unspecified(),
        }
    }
}
