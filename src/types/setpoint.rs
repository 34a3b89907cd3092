use nalgebra::Vector3;

/// "Don't care" marker for a single setpoint axis.
///
/// Downstream controllers treat an unspecified axis as free, which is not the
/// same as holding it at zero, so never coerce it to a number.
pub const UNSPECIFIED: f32 = f32::NAN;

#[inline]
pub fn unspecified() -> Vector3<f32> {
    Vector3::new(UNSPECIFIED, UNSPECIFIED, UNSPECIFIED)
}

#[inline]
pub fn is_specified(value: f32) -> bool {
    value.is_finite()
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandingGear {
    Keep,
    Up,
    Down,
}

impl Default for LandingGear {
    fn default() -> Self {
        Self::Keep
    }
}

/// Speed limits handed to the position controller, unspecified means controller defaults
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Constraints {
    pub speed_xy: f32,
    pub speed_up: f32,
    pub speed_down: f32,
}

impl Default for Constraints {
    fn default() -> Self {
        Self { speed_xy: UNSPECIFIED, speed_up: UNSPECIFIED, speed_down: UNSPECIFIED }
    }
}

#[derive(Copy, Clone, Debug, Serialize)]
pub struct Setpoint {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub acceleration: Vector3<f32>,
    pub jerk: Vector3<f32>,
    pub yaw: f32,
    pub yawspeed: f32,
    pub landing_gear: LandingGear,
    pub constraints: Constraints,
}

impl Default for Setpoint {
    fn default() -> Self {
        Self {
            position: unspecified(),
            velocity: unspecified(),
            acceleration: unspecified(),
            jerk: unspecified(),
            yaw: UNSPECIFIED,
            yawspeed: UNSPECIFIED,
            landing_gear: LandingGear::Keep,
            constraints: Constraints::default(),
        }
    }
}

mod test {
    #[test]
    fn test_default_setpoint_is_unspecified() {
        use super::{is_specified, LandingGear, Setpoint};

        let setpoint = Setpoint::default();
        assert!(setpoint.position.iter().all(|&v| !is_specified(v)));
        assert!(setpoint.velocity.iter().all(|&v| !is_specified(v)));
        assert!(!is_specified(setpoint.yaw));
        assert_eq!(setpoint.landing_gear, LandingGear::Keep);
    }
}
