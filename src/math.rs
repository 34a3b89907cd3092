pub mod trajectory;

use core::f32::consts::PI;

/// Linear map of `value` from [x_low, x_high] onto [y_low, y_high], clamped outside
pub fn interpolate(value: f32, x_low: f32, x_high: f32, y_low: f32, y_high: f32) -> f32 {
    if value <= x_low {
        return y_low;
    }
    if value >= x_high {
        return y_high;
    }
    y_low + (value - x_low) * (y_high - y_low) / (x_high - x_low)
}

pub fn wrap_pi(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    let mut wrapped = libm::fmodf(angle + PI, 2.0 * PI);
    if wrapped < 0.0 {
        wrapped += 2.0 * PI;
    }
    wrapped - PI
}

/// Blends linear and cubic response, `e` of 0 is linear and 1 purely cubic
pub fn expo(value: f32, e: f32) -> f32 {
    let x = value.clamp(-1.0, 1.0);
    let e = e.clamp(0.0, 1.0);
    (1.0 - e) * x + e * x * x * x
}

mod test {
    #[test]
    fn test_interpolate() {
        use super::interpolate;

        assert_eq!(interpolate(6.0, 2.0, 10.0, 1.0, 3.0), 2.0);
        assert_eq!(interpolate(0.0, 2.0, 10.0, 1.0, 3.0), 1.0);
        assert_eq!(interpolate(20.0, 2.0, 10.0, 1.0, 3.0), 3.0);
        assert_eq!(interpolate(2.0, 2.0, 2.0, 1.0, 3.0), 1.0);
    }

    #[test]
    fn test_wrap_pi() {
        use core::f32::consts::PI;

        use super::wrap_pi;

        assert!((wrap_pi(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_pi(PI + 0.5) - (-PI + 0.5)).abs() < 1e-5);
        assert!((wrap_pi(-PI - 0.5) - (PI - 0.5)).abs() < 1e-5);
        assert!((wrap_pi(4.0 * PI + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_expo() {
        use super::expo;

        assert_eq!(expo(0.5, 0.0), 0.5);
        assert_eq!(expo(0.5, 1.0), 0.125);
        assert_eq!(expo(-2.0, 0.5), -1.0);
    }
}
