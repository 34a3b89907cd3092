//! Decelerates the vehicle smoothly to a standstill from any initial velocity.
//!
//! Call `initialize` once, then `update` every cycle until `is_active` turns
//! false. While braking, feed `constraints` to the position controller so an
//! over-speed entry is not clipped by the regular limits.

#[cfg(not(any(test, feature = "std")))]
use micromath::F32Ext;
use nalgebra::{Vector2, Vector3};

use crate::{
    config,
    types::{Constraints, GRAVITY},
};

/// Kinematic seam of a braking generator, consumed by the landing task
pub trait BrakingProfile {
    fn initialize(
        &mut self,
        acceleration: &Vector3<f32>,
        velocity: &Vector3<f32>,
        position: &Vector3<f32>,
        dt: f32,
    );
    fn update(
        &mut self,
        acceleration: &Vector3<f32>,
        velocity: &Vector3<f32>,
        position: &Vector3<f32>,
        dt: f32,
    );
    fn is_active(&self) -> bool;
    fn stop_position(&self) -> Vector3<f32>;
    fn jerk_setpoint(&self) -> Vector3<f32>;
    fn acceleration_setpoint(&self) -> Vector3<f32>;
    fn velocity_setpoint(&self) -> Vector3<f32>;
    fn position_setpoint(&self) -> Vector3<f32>;
    fn constraints(&mut self) -> Constraints;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmoothingSetpoints {
    pub jerk: Vector3<f32>,
    pub acceleration: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Default for SmoothingSetpoints {
    fn default() -> Self {
        let zero = Vector3::zeros();
        Self { jerk: zero, acceleration: zero, velocity: zero, position: zero }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SmoothingLimits {
    pub cruise_speed: f32,
    pub trajectory_gain: f32,
    pub max_horizontal_error: f32,
    pub acceptance_radius: f32,
    pub max_velocity_xy: f32,
    pub max_velocity_z: f32,
    pub max_acceleration_xy: f32,
    pub max_acceleration_z: f32,
    pub max_jerk_xy: f32,
    pub max_jerk_z: f32,
}

/// Jerk limited point to point trajectory generator
pub trait PositionSmoothing {
    fn reset(&mut self, acceleration: &Vector3<f32>, velocity: &Vector3<f32>, position: &Vector3<f32>);
    fn set_limits(&mut self, limits: &SmoothingLimits);
    fn generate_setpoints(
        &mut self,
        position: &Vector3<f32>,
        target: &Vector3<f32>,
        feedforward_velocity: &Vector3<f32>,
        dt: f32,
        force_zero_velocity: bool,
    ) -> SmoothingSetpoints;
    fn current_velocity_xy(&self) -> Vector2<f32>;
    fn current_velocity_z(&self) -> f32;
}

const STANDSTILL_SPEED: f32 = 0.01;
const CONSTRAINT_MARGIN: f32 = 1.2;

pub struct Stop<S> {
    config: config::Braking,
    smoothing: S,
    limits: SmoothingLimits,
    stop_position: Vector3<f32>,
    exceeded_max_velocity: bool,
    active: bool,
    setpoints: SmoothingSetpoints,
}

fn limits_of(config: &config::Braking) -> SmoothingLimits {
    SmoothingLimits {
        cruise_speed: config.xy_vel_max,
        trajectory_gain: config.xy_traj_p,
        max_horizontal_error: config.xy_err_max,
        acceptance_radius: config.acceptance_radius,
        max_velocity_xy: config.xy_vel_max,
        max_velocity_z: config.z_vel_max_up.max(config.z_vel_max_dn),
        max_acceleration_xy: config.acc_hor,
        max_acceleration_z: config.acc_down_max.max(config.acc_up_max),
        max_jerk_xy: config.jerk_auto,
        max_jerk_z: config.jerk_max,
    }
}

fn all_nan(v: &Vector3<f32>) -> bool {
    v.iter().all(|x| x.is_nan())
}

impl<S: PositionSmoothing> Stop<S> {
    pub fn new(config: &config::Braking, mut smoothing: S) -> Self {
        let limits = limits_of(config);
        smoothing.set_limits(&limits);
        Self {
            config: *config,
            smoothing,
            limits,
            stop_position: Vector3::zeros(),
            exceeded_max_velocity: false,
            active: false,
            setpoints: SmoothingSetpoints::default(),
        }
    }

    pub fn reconfigure(&mut self, config: &config::Braking) {
        self.config = *config;
        self.limits = limits_of(config);
        self.smoothing.set_limits(&self.limits);
    }

    pub fn exceeds_max_velocity(&self, velocity: &Vector3<f32>) -> bool {
        let max_z = self.config.z_vel_max_dn.max(self.config.z_vel_max_up);
        velocity.z.abs() > max_z || velocity.xy().norm() > self.config.xy_vel_max
    }

    pub fn smoothing(&self) -> &S {
        &self.smoothing
    }

    fn at_standstill(&self) -> bool {
        let vz = self.smoothing.current_velocity_z();
        let vxy = self.smoothing.current_velocity_xy().norm();
        -STANDSTILL_SPEED < vz && vz < STANDSTILL_SPEED && vxy <= STANDSTILL_SPEED
    }
}

impl<S: PositionSmoothing> BrakingProfile for Stop<S> {
    fn initialize(
        &mut self,
        acceleration: &Vector3<f32>,
        velocity: &Vector3<f32>,
        position: &Vector3<f32>,
        dt: f32,
    ) {
        if all_nan(velocity) || all_nan(position) || all_nan(acceleration) {
            error!("Initialize stop with valid values");
        }
        self.active = true;
        self.exceeded_max_velocity = false;
        self.stop_position = *position;
        self.smoothing.reset(acceleration, velocity, position);
        self.update(acceleration, velocity, position, dt);
    }

    fn update(
        &mut self,
        _acceleration: &Vector3<f32>,
        velocity: &Vector3<f32>,
        position: &Vector3<f32>,
        dt: f32,
    ) {
        if self.exceeds_max_velocity(velocity) && !self.exceeded_max_velocity {
            warn!("Braking from above maximum velocity, relaxing limits");
            self.exceeded_max_velocity = true;
        } else if self.at_standstill() {
            self.active = false;
            self.stop_position = *position;
        }

        let zero = Vector3::zeros();
        let target = self.stop_position;
        self.setpoints = self.smoothing.generate_setpoints(position, &target, &zero, dt, true);
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn stop_position(&self) -> Vector3<f32> {
        self.stop_position
    }

    fn jerk_setpoint(&self) -> Vector3<f32> {
        self.setpoints.jerk
    }

    fn acceleration_setpoint(&self) -> Vector3<f32> {
        self.setpoints.acceleration
    }

    fn velocity_setpoint(&self) -> Vector3<f32> {
        self.setpoints.velocity
    }

    fn position_setpoint(&self) -> Vector3<f32> {
        self.setpoints.position
    }

    fn constraints(&mut self) -> Constraints {
        let mut constraints = Constraints {
            speed_xy: CONSTRAINT_MARGIN * self.config.xy_vel_max,
            speed_up: CONSTRAINT_MARGIN * self.config.z_vel_max_up,
            speed_down: CONSTRAINT_MARGIN * self.config.z_vel_max_dn,
        };
        self.limits.max_jerk_xy = self.config.jerk_auto;
        self.limits.max_jerk_z = self.config.jerk_max;

        if self.exceeded_max_velocity {
            let vz = self.smoothing.current_velocity_z().abs();
            let vxy = self.smoothing.current_velocity_xy().norm();
            constraints.speed_down = constraints.speed_down.max(vz);
            constraints.speed_up = constraints.speed_up.max(vz);
            constraints.speed_xy = constraints.speed_xy.max(vxy);

            self.limits.max_acceleration_xy = GRAVITY;
            self.limits.max_acceleration_z = 2.0 * GRAVITY;
            self.limits.max_jerk_xy = GRAVITY;
            // only limited by motor inertia
            self.limits.max_jerk_z = 10.0 * GRAVITY;
        }
        self.smoothing.set_limits(&self.limits);
        constraints
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{Vector2, Vector3};

    use super::{PositionSmoothing, SmoothingLimits, SmoothingSetpoints};

    /// Halves the velocity every step
    struct Decay {
        velocity: Vector3<f32>,
        limits: SmoothingLimits,
    }

    impl Default for Decay {
        fn default() -> Self {
            Self { velocity: Vector3::zeros(), limits: SmoothingLimits::default() }
        }
    }

    impl PositionSmoothing for Decay {
        fn reset(&mut self, _: &Vector3<f32>, velocity: &Vector3<f32>, _: &Vector3<f32>) {
            self.velocity = *velocity;
        }

        fn set_limits(&mut self, limits: &SmoothingLimits) {
            self.limits = *limits;
        }

        fn generate_setpoints(
            &mut self,
            position: &Vector3<f32>,
            _: &Vector3<f32>,
            _: &Vector3<f32>,
            dt: f32,
            _: bool,
        ) -> SmoothingSetpoints {
            let previous = self.velocity;
            self.velocity *= 0.5;
            if self.velocity.norm() < 0.001 {
                self.velocity = Vector3::zeros();
            }
            let acceleration = (self.velocity - previous) / dt;
            SmoothingSetpoints {
                jerk: Vector3::zeros(),
                acceleration,
                velocity: self.velocity,
                position: position + self.velocity * dt,
            }
        }

        fn current_velocity_xy(&self) -> Vector2<f32> {
            self.velocity.xy()
        }

        fn current_velocity_z(&self) -> f32 {
            self.velocity.z
        }
    }

    #[test]
    fn test_brake_to_standstill() {
        use super::{BrakingProfile, Stop};
        use crate::config::Braking;

        let mut stop = Stop::new(&Braking::default(), Decay::default());
        let zero = Vector3::zeros();
        let velocity = Vector3::new(2.0, 0.0, -1.0);
        stop.initialize(&zero, &velocity, &Vector3::new(1.0, 2.0, -10.0), 0.02);
        assert!(stop.is_active());
        assert_eq!(stop.stop_position(), Vector3::new(1.0, 2.0, -10.0));

        let mut position = Vector3::new(1.0, 2.0, -10.0);
        for _ in 0..100 {
            if !stop.is_active() {
                break;
            }
            position.x += 0.01;
            let velocity = stop.velocity_setpoint();
            stop.update(&zero, &velocity, &position, 0.02);
        }
        assert!(!stop.is_active());
        assert_eq!(stop.stop_position(), position);
        assert!(stop.velocity_setpoint().norm() < 0.01);
    }

    #[test]
    fn test_initialize_at_rest() {
        use super::{BrakingProfile, Stop};
        use crate::config::Braking;

        let mut stop = Stop::new(&Braking::default(), Decay::default());
        let zero = Vector3::zeros();
        let position = Vector3::new(5.0, -3.0, -20.0);
        stop.initialize(&zero, &zero, &position, 0.02);
        assert!(!stop.is_active());
        assert_eq!(stop.stop_position(), position);
    }

    #[test]
    fn test_constraints() {
        use super::{BrakingProfile, Stop, GRAVITY};
        use crate::config::Braking;

        let config = Braking::default();
        let mut stop = Stop::new(&config, Decay::default());
        let zero = Vector3::zeros();
        stop.initialize(&zero, &Vector3::new(1.0, 0.0, 0.0), &zero, 0.02);
        let constraints = stop.constraints();
        assert!((constraints.speed_xy - 1.2 * config.xy_vel_max).abs() < 1e-5);
        assert!((constraints.speed_down - 1.2 * config.z_vel_max_dn).abs() < 1e-5);
        assert_eq!(stop.smoothing().limits.max_jerk_xy, config.jerk_auto);

        let velocity = Vector3::new(40.0, 0.0, 0.0);
        assert!(stop.exceeds_max_velocity(&velocity));
        stop.initialize(&zero, &velocity, &zero, 0.02);
        let constraints = stop.constraints();
        assert!(constraints.speed_xy >= 19.9);
        assert_eq!(stop.smoothing().limits.max_acceleration_xy, GRAVITY);
        assert_eq!(stop.smoothing().limits.max_jerk_z, 10.0 * GRAVITY);
    }
}
