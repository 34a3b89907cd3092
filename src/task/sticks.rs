use fugit::NanosDurationU64 as Duration;
use nalgebra::Vector2;

use crate::{
    config,
    math::expo,
    types::control::{AxisType, Control},
};

/// Manual stick source consumed by flight tasks.
///
/// Axes are normalized to [-1, 1]. Throttle is zero centered, +1 at full up.
/// Pitch/roll is (forward, right) in the stick frame.
pub trait StickInput {
    /// Latches the latest valid input, false when it is missing or stale
    fn check_and_update_stick_inputs(&mut self) -> bool;
    fn throttle_zero_centered_expo(&self) -> f32;
    fn yaw_expo(&self) -> f32;
    fn pitch_roll_expo(&self) -> Vector2<f32>;
}

/// Rotates a stick frame vector into the local frame using `yaw_setpoint`,
/// or `yaw` when the setpoint is not finite
pub fn rotate_into_heading_frame_xy(v: Vector2<f32>, yaw: f32, yaw_setpoint: f32) -> Vector2<f32> {
    let yaw = if yaw_setpoint.is_finite() { yaw_setpoint } else { yaw };
    let (sin, cos) = (libm::sinf(yaw), libm::cosf(yaw));
    Vector2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

#[derive(Copy, Clone, Debug)]
struct Frame {
    timestamp: Duration,
    control: Control,
}

pub struct Sticks {
    timeout: Duration,
    expo: f32,
    yaw_expo: f32,
    now: Duration,
    frame: Option<Frame>,
    throttle: f32,
    yaw: f32,
    pitch_roll: Vector2<f32>,
}

impl Sticks {
    pub fn new(config: &config::RC) -> Self {
        Self {
            timeout: Duration::millis(config.timeout_ms as u64),
            expo: config.expo,
            yaw_expo: config.yaw_expo,
            now: Duration::from_ticks(0),
            frame: None,
            throttle: 0.0,
            yaw: 0.0,
            pitch_roll: Vector2::zeros(),
        }
    }

    pub fn reconfigure(&mut self, config: &config::RC) {
        self.timeout = Duration::millis(config.timeout_ms as u64);
        self.expo = config.expo;
        self.yaw_expo = config.yaw_expo;
    }

    pub fn receive(&mut self, control: Control, timestamp: Duration) {
        self.frame = Some(Frame { timestamp, control });
        if timestamp > self.now {
            self.now = timestamp;
        }
    }

    /// Advances the clock used to judge input freshness
    pub fn tick(&mut self, now: Duration) {
        self.now = now;
    }

    fn fresh_frame(&self) -> Option<Frame> {
        let frame = self.frame?;
        if frame.control.rssi == 0 {
            return None;
        }
        let age = self.now.checked_sub(frame.timestamp).unwrap_or(Duration::from_ticks(0));
        match age <= self.timeout {
            true => Some(frame),
            false => None,
        }
    }
}

impl StickInput for Sticks {
    fn check_and_update_stick_inputs(&mut self) -> bool {
        let axes = match self.fresh_frame() {
            Some(frame) => frame.control.axes,
            None => {
                self.throttle = 0.0;
                self.yaw = 0.0;
                self.pitch_roll = Vector2::zeros();
                return false;
            }
        };
        self.throttle = expo(axes.ratio(AxisType::Throttle), self.expo);
        self.yaw = expo(axes.ratio(AxisType::Yaw), self.yaw_expo);
        let pitch = expo(axes.ratio(AxisType::Pitch), self.expo);
        let roll = expo(axes.ratio(AxisType::Roll), self.expo);
        self.pitch_roll = Vector2::new(pitch, roll);
        true
    }

    fn throttle_zero_centered_expo(&self) -> f32 {
        self.throttle
    }

    fn yaw_expo(&self) -> f32 {
        self.yaw
    }

    fn pitch_roll_expo(&self) -> Vector2<f32> {
        self.pitch_roll
    }
}

mod test {
    #[test]
    fn test_stale_input() {
        use fugit::NanosDurationU64 as Duration;

        use super::{StickInput, Sticks};
        use crate::config::RC;
        use crate::types::control::{Axes, Control};

        let mut sticks = Sticks::new(&RC { timeout_ms: 100, ..Default::default() });
        assert!(!sticks.check_and_update_stick_inputs());

        let axes = Axes { throttle: u16::MAX, pitch: i16::MAX, ..Default::default() };
        sticks.receive(Control { rssi: 100, axes }, Duration::millis(1000));
        sticks.tick(Duration::millis(1050));
        assert!(sticks.check_and_update_stick_inputs());
        assert_eq!(sticks.throttle_zero_centered_expo(), 1.0);
        assert_eq!(sticks.pitch_roll_expo().x, 1.0);

        sticks.tick(Duration::millis(1200));
        assert!(!sticks.check_and_update_stick_inputs());
        assert_eq!(sticks.throttle_zero_centered_expo(), 0.0);
        assert_eq!(sticks.pitch_roll_expo().x, 0.0);
    }

    #[test]
    fn test_no_signal() {
        use fugit::NanosDurationU64 as Duration;

        use super::{StickInput, Sticks};
        use crate::config::RC;
        use crate::types::control::{Axes, Control};

        let mut sticks = Sticks::new(&RC::default());
        sticks.receive(Control { rssi: 0, axes: Axes::centered() }, Duration::millis(10));
        assert!(!sticks.check_and_update_stick_inputs());
    }

    #[test]
    fn test_rotate_into_heading_frame() {
        use core::f32::consts::FRAC_PI_2;

        use nalgebra::Vector2;

        use super::rotate_into_heading_frame_xy;

        let forward = Vector2::new(1.0, 0.0);
        let v = rotate_into_heading_frame_xy(forward, 0.0, FRAC_PI_2);
        assert!(v.x.abs() < 1e-6 && (v.y - 1.0).abs() < 1e-6);

        let v = rotate_into_heading_frame_xy(forward, FRAC_PI_2, f32::NAN);
        assert!(v.x.abs() < 1e-6 && (v.y - 1.0).abs() < 1e-6);
    }
}
