use crate::{algorithm::LPF, config, math::wrap_pi};

pub trait YawController {
    /// Integrates the yaw stick into `heading` and returns the yaw rate setpoint
    fn generate_yaw_setpoint(&mut self, heading: &mut f32, stick_yaw: f32, yaw: f32, dt: f32)
        -> f32;
}

pub struct StickYaw {
    max_yaw_rate: f32, // rad/s
    lpf: LPF,
}

impl StickYaw {
    pub fn new(config: &config::RC) -> Self {
        Self { max_yaw_rate: config.max_yaw_rate.to_radians(), lpf: LPF::new(config.yaw_cutoff) }
    }

    pub fn reconfigure(&mut self, config: &config::RC) {
        *self = Self::new(config);
    }
}

impl YawController for StickYaw {
    fn generate_yaw_setpoint(
        &mut self,
        heading: &mut f32,
        stick_yaw: f32,
        yaw: f32,
        dt: f32,
    ) -> f32 {
        let yawspeed = self.lpf.filter(stick_yaw.clamp(-1.0, 1.0) * self.max_yaw_rate, dt);
        if !heading.is_finite() {
            *heading = yaw;
        }
        *heading = wrap_pi(*heading + yawspeed * dt);
        yawspeed
    }
}

mod test {
    #[test]
    fn test_yaw_integration() {
        use super::{StickYaw, YawController};
        use crate::config::RC;

        let config = RC { max_yaw_rate: 90.0, yaw_cutoff: 0.0, ..Default::default() };
        let mut stick_yaw = StickYaw::new(&config);
        let mut heading = 0.0;
        let rate = stick_yaw.generate_yaw_setpoint(&mut heading, 1.0, 0.0, 0.1);
        assert!((rate - core::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!((heading - core::f32::consts::FRAC_PI_2 * 0.1).abs() < 1e-5);

        let rate = stick_yaw.generate_yaw_setpoint(&mut heading, -0.5, 0.0, 0.1);
        assert!(rate < 0.0);
    }

    #[test]
    fn test_invalid_heading_restarts_from_yaw() {
        use super::{StickYaw, YawController};
        use crate::config::RC;

        let config = RC { yaw_cutoff: 0.0, ..Default::default() };
        let mut stick_yaw = StickYaw::new(&config);
        let mut heading = f32::NAN;
        stick_yaw.generate_yaw_setpoint(&mut heading, 0.0, 1.0, 0.1);
        assert!((heading - 1.0).abs() < 1e-6);
    }
}
