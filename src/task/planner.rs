use nalgebra::{Vector2, Vector3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlannerSetpoints {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub acceleration: Vector2<f32>,
}

impl Default for PlannerSetpoints {
    fn default() -> Self {
        Self { position: Vector2::zeros(), velocity: Vector2::zeros(), acceleration: Vector2::zeros() }
    }
}

/// Jerk limited horizontal setpoint generator driven by the pitch/roll sticks.
///
/// `stick` is in the stick frame, the planner rotates it with `heading`
/// (falling back to `yaw`) and never exceeds the last velocity constraint.
pub trait HorizontalPlanner {
    fn max_jerk(&self) -> f32;
    fn max_acceleration(&self) -> f32;
    fn set_velocity_constraint(&mut self, max_speed: f32);
    fn generate_setpoints(
        &mut self,
        stick: Vector2<f32>,
        yaw: f32,
        heading: f32,
        position: &Vector3<f32>,
        feedback_velocity: Vector2<f32>,
        dt: f32,
    );
    fn setpoints(&self) -> PlannerSetpoints;
}
