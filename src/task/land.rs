//! Terminal landing: brake to a standstill, then descend in three tiers.
//!
//! Altitude is only ever commanded through vertical velocity, the vertical
//! position setpoint stays unspecified on every cycle. The descent speed is
//! interpolated from the coarse height estimate between `alt2` and `alt1` and
//! drops to the crawl speed once a distance sensor confirms the vehicle is
//! below `alt3`. With RC help enabled the pilot may slow down, speed up, yaw
//! and nudge the vehicle horizontally, bounded by a circle around the point
//! where braking ended.

use fugit::NanosDurationU64 as Duration;
#[cfg(not(any(test, feature = "std")))]
use micromath::F32Ext;
use nalgebra::{Vector2, Vector3};

use super::{
    planner::HorizontalPlanner,
    seconds,
    stick_yaw::YawController,
    sticks::{rotate_into_heading_frame_xy, StickInput},
    stop::BrakingProfile,
    FlightTask,
};
use crate::{
    config,
    math::{interpolate, trajectory},
    types::{unspecified, LandingGear, Setpoint, VehicleState, UNSPECIFIED},
};

const YAW_STICK_DEADBAND: f32 = f32::EPSILON;
/// Nudging slower than this near the boundary only chatters
const MIN_NUDGE_SPEED: f32 = 0.5;
/// No horizontal nudging below this distance to the bottom
const NUDGE_FLOOR_HEIGHT: f32 = 0.5;
/// Allowed nudge speed per meter above the floor height
const NUDGE_SPEED_PER_METER: f32 = 0.5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Braking,
    Landing,
}

/// Horizontal landing target, altitude is never anchored
#[derive(Copy, Clone, Debug, Serialize)]
pub struct LandingAnchor {
    /// Where braking ended, center of the nudging circle
    pub initial_position: Vector2<f32>,
    pub position: Vector2<f32>,
    pub heading: f32,
}

impl Default for LandingAnchor {
    fn default() -> Self {
        let nan = Vector2::new(UNSPECIFIED, UNSPECIFIED);
        Self { initial_position: nan, position: nan, heading: UNSPECIFIED }
    }
}

/// Descent speed before any pilot input, positive down
pub fn descent_speed(params: &config::Land, dist_to_ground: f32, dist_to_bottom: f32) -> f32 {
    if dist_to_bottom.is_finite() && dist_to_bottom <= params.alt3 {
        return params.crawl_speed;
    }
    if !dist_to_ground.is_finite() {
        return params.speed;
    }
    interpolate(dist_to_ground, params.alt2, params.alt1, params.speed, params.z_vel_max_dn)
}

fn is_finite(v: &Vector2<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

pub struct FlightTaskLand<B, S, P, Y> {
    params: config::Land,
    braking: B,
    sticks: S,
    planner: P,
    stick_yaw: Y,

    phase: Phase,
    anchor: LandingAnchor,
    setpoint: Setpoint,
}

impl<B, S, P, Y> FlightTaskLand<B, S, P, Y>
where
    B: BrakingProfile,
    S: StickInput,
    P: HorizontalPlanner,
    Y: YawController,
{
    pub fn new(params: &config::Land, braking: B, sticks: S, planner: P, stick_yaw: Y) -> Self {
        let mut task = Self {
            params: *params,
            braking,
            sticks,
            planner,
            stick_yaw,
            phase: Phase::Braking,
            anchor: LandingAnchor::default(),
            setpoint: Setpoint::default(),
        };
        task.update_params(params);
        task
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn anchor(&self) -> LandingAnchor {
        self.anchor
    }

    pub fn params(&self) -> &config::Land {
        &self.params
    }

    pub fn setpoint(&self) -> &Setpoint {
        &self.setpoint
    }

    pub fn braking(&self) -> &B {
        &self.braking
    }

    pub fn braking_mut(&mut self) -> &mut B {
        &mut self.braking
    }

    pub fn sticks_mut(&mut self) -> &mut S {
        &mut self.sticks
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    fn perform_braking(&mut self, state: &VehicleState, dt: f32) {
        let setpoint = &mut self.setpoint;
        setpoint.constraints = self.braking.constraints();
        self.braking.update(&setpoint.acceleration, &setpoint.velocity, &state.position, dt);

        let stop = self.braking.stop_position().xy();
        self.anchor.initial_position = stop;
        self.anchor.position = stop;

        setpoint.jerk = self.braking.jerk_setpoint();
        setpoint.acceleration = self.braking.acceleration_setpoint();
        setpoint.velocity = self.braking.velocity_setpoint();
        setpoint.position = self.braking.position_setpoint();
        setpoint.position.z = UNSPECIFIED;
        setpoint.yaw = self.anchor.heading;
    }

    fn perform_landing(&mut self, state: &VehicleState, dt: f32) {
        self.setpoint.velocity = unspecified();
        self.setpoint.jerk = unspecified();
        self.setpoint.yawspeed = UNSPECIFIED;

        let params = &self.params;
        let mut vertical_speed = descent_speed(params, state.dist_to_ground, state.dist_to_bottom);

        if params.rc_help && self.sticks.check_and_update_stick_inputs() {
            // full up stops the descent, full down doubles it
            vertical_speed *= 1.0 - self.sticks.throttle_zero_centered_expo();
            self.nudge(state, dt);
        }
        if !is_finite(&self.anchor.position) {
            self.anchor.position = state.position.xy();
        }

        let anchor = &self.anchor;
        let setpoint = &mut self.setpoint;
        setpoint.position = Vector3::new(anchor.position.x, anchor.position.y, UNSPECIFIED);
        setpoint.yaw = anchor.heading;
        setpoint.velocity.z = vertical_speed;
        setpoint.landing_gear = LandingGear::Down;
        trace!("Landing descent {:.2}m/s at height {:.2}m", vertical_speed, state.dist_to_ground);
    }

    fn nudge(&mut self, state: &VehicleState, dt: f32) {
        let yaw = self.sticks.yaw_expo();
        if yaw.abs() > YAW_STICK_DEADBAND {
            let heading = &mut self.anchor.heading;
            let yawspeed = self.stick_yaw.generate_yaw_setpoint(heading, yaw, state.yaw, dt);
            self.setpoint.yawspeed = yawspeed;
        }

        let mut stick = self.sticks.pitch_roll_expo();
        let direction = rotate_into_heading_frame_xy(stick, state.yaw, self.anchor.heading);
        let center = self.anchor.initial_position;
        let radius = self.params.radius;
        let distance =
            trajectory::max_distance_to_circle(state.position.xy(), center, radius, direction);

        let mut max_speed: f32 = 0.0;
        if distance.is_finite() {
            let (jerk, accel) = (self.planner.max_jerk(), self.planner.max_acceleration());
            max_speed = trajectory::max_speed_from_distance(jerk, accel, distance, 0.0);
            if !max_speed.is_finite() {
                max_speed = 0.0;
            }
        }
        if max_speed < MIN_NUDGE_SPEED {
            stick = Vector2::zeros();
        }

        if state.dist_to_bottom.is_finite() {
            let height_limit = (state.dist_to_bottom - NUDGE_FLOOR_HEIGHT) * NUDGE_SPEED_PER_METER;
            max_speed = max_speed.min(height_limit).max(0.0);
        }

        let heading = self.anchor.heading;
        let feedback = state.velocity_setpoint_feedback.xy();
        self.planner.set_velocity_constraint(max_speed);
        self.planner.generate_setpoints(stick, state.yaw, heading, &state.position, feedback, dt);

        let out = self.planner.setpoints();
        self.anchor.position = out.position;
        self.setpoint.velocity.x = out.velocity.x;
        self.setpoint.velocity.y = out.velocity.y;
        self.setpoint.acceleration.x = out.acceleration.x;
        self.setpoint.acceleration.y = out.acceleration.y;
    }
}

impl<B, S, P, Y> FlightTask for FlightTaskLand<B, S, P, Y>
where
    B: BrakingProfile,
    S: StickInput,
    P: HorizontalPlanner,
    Y: YawController,
{
    type Parameters = config::Land;

    fn activate(&mut self, last_setpoint: &Setpoint, state: &VehicleState, interval: Duration) {
        let mut position = last_setpoint.position;
        let mut velocity = last_setpoint.velocity;
        let mut acceleration = last_setpoint.acceleration;
        for i in 0..3 {
            if !position[i].is_finite() {
                position[i] = state.position[i];
            }
            if !velocity[i].is_finite() {
                velocity[i] = state.velocity[i];
            }
            if !acceleration[i].is_finite() {
                acceleration[i] = 0.0;
            }
        }

        self.phase = Phase::Braking;
        self.anchor.heading = state.yaw;
        self.setpoint = Setpoint { position, velocity, acceleration, yaw: state.yaw, ..Default::default() };

        self.braking.initialize(&acceleration, &velocity, &state.position, seconds(interval));
        let stop = self.braking.stop_position().xy();
        self.anchor.initial_position = stop;
        self.anchor.position = stop;
        debug!("Land activated, stop position ({:.2}, {:.2})", stop.x, stop.y);
    }

    fn update(&mut self, state: &VehicleState, interval: Duration) -> Setpoint {
        if self.phase == Phase::Braking && !self.braking.is_active() {
            self.phase = Phase::Landing;
            let position = self.anchor.position;
            info!("Braking completed, landing at ({:.2}, {:.2})", position.x, position.y);
        }

        let dt = seconds(interval);
        match self.phase {
            Phase::Braking => self.perform_braking(state, dt),
            Phase::Landing => self.perform_landing(state, dt),
        }
        self.setpoint
    }

    fn update_params(&mut self, params: &config::Land) {
        self.params = *params;
        // alt2 against alt3 is left as configured
        self.params.alt1 = self.params.alt1.max(self.params.alt2);
    }
}

mod test {
    #[test]
    fn test_descent_speed_interpolation() {
        use super::descent_speed;
        use crate::config::Land;

        let params = Land { alt1: 10.0, alt2: 2.0, speed: 1.0, z_vel_max_dn: 3.0, ..Default::default() };
        assert!((descent_speed(&params, 6.0, f32::NAN) - 2.0).abs() < 1e-6);
        assert_eq!(descent_speed(&params, 1.0, f32::NAN), 1.0);
        assert_eq!(descent_speed(&params, 50.0, f32::NAN), 3.0);
        assert_eq!(descent_speed(&params, f32::NAN, f32::NAN), 1.0);

        let mut previous = 0.0;
        for i in 0..=120 {
            let speed = descent_speed(&params, i as f32 * 0.1, f32::NAN);
            assert!(speed >= previous);
            previous = speed;
        }
    }

    #[test]
    fn test_crawl_override() {
        use super::descent_speed;
        use crate::config::Land;

        let params = Land { alt3: 2.0, crawl_speed: 0.2, ..Default::default() };
        assert_eq!(descent_speed(&params, 30.0, 1.5), 0.2);
        assert_eq!(descent_speed(&params, 30.0, 2.0), 0.2);
        assert_eq!(descent_speed(&params, 30.0, 2.5), params.z_vel_max_dn);
    }
}
