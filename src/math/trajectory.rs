use nalgebra::Vector2;

/// Distance travelled from `position` along `direction` until leaving the circle.
///
/// A zero direction gives `sqrt(r² - |p - c|²)`, finite anywhere inside the circle.
/// Returns NaN when the ray never meets the circle and zero when the circle is
/// already behind.
pub fn max_distance_to_circle(
    position: Vector2<f32>,
    center: Vector2<f32>,
    radius: f32,
    direction: Vector2<f32>,
) -> f32 {
    if !radius.is_finite() {
        return f32::NAN;
    }
    let length = direction.norm();
    let unit = if length > f32::EPSILON { direction / length } else { Vector2::zeros() };
    let center_to_position = position - center;
    // |p + t·u - c|² = r² → t² + 2bt + c = 0
    let b = unit.dot(&center_to_position);
    let c = center_to_position.norm_squared() - radius * radius;
    let discriminant = b * b - c;
    if !(discriminant >= 0.0) {
        return f32::NAN;
    }
    let distance = -b + libm::sqrtf(discriminant);
    distance.max(0.0)
}

/// Highest speed from which a jerk limited trajectory still stops within `distance`,
/// never below `final_speed`
pub fn max_speed_from_distance(jerk: f32, accel: f32, distance: f32, final_speed: f32) -> f32 {
    let b = 4.0 * accel * accel / jerk;
    let c = -2.0 * accel * distance - final_speed * final_speed;
    let max_speed = 0.5 * (-b + libm::sqrtf(b * b - 4.0 * c));
    max_speed.max(final_speed)
}

mod test {
    #[test]
    fn test_distance_to_circle() {
        use nalgebra::Vector2;

        use super::max_distance_to_circle;

        let center = Vector2::new(0.0, 0.0);
        let north = Vector2::new(1.0, 0.0);
        let d = max_distance_to_circle(Vector2::new(0.0, 0.0), center, 5.0, north);
        assert!((d - 5.0).abs() < 1e-5);

        let d = max_distance_to_circle(Vector2::new(3.0, 0.0), center, 5.0, north * 0.3);
        assert!((d - 2.0).abs() < 1e-5);

        let d = max_distance_to_circle(Vector2::new(3.0, 0.0), center, 5.0, -north);
        assert!((d - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_to_circle_without_direction() {
        use nalgebra::Vector2;

        use super::max_distance_to_circle;

        let center = Vector2::new(0.0, 0.0);
        let d = max_distance_to_circle(center, center, 5.0, Vector2::zeros());
        assert!((d - 5.0).abs() < 1e-5);

        let d = max_distance_to_circle(Vector2::new(3.0, 0.0), center, 5.0, Vector2::zeros());
        assert!((d - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_to_circle_undefined() {
        use nalgebra::Vector2;

        use super::max_distance_to_circle;

        let center = Vector2::new(0.0, 0.0);
        let d = max_distance_to_circle(Vector2::new(10.0, 0.0), center, 5.0, Vector2::zeros());
        assert!(d.is_nan());

        // passes beside the circle
        let d = max_distance_to_circle(Vector2::new(10.0, 10.0), center, 5.0, Vector2::new(1.0, 0.0));
        assert!(d.is_nan());

        // outside and heading away
        let d = max_distance_to_circle(Vector2::new(10.0, 0.0), center, 5.0, Vector2::new(1.0, 0.0));
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_max_speed_from_distance() {
        use super::max_speed_from_distance;

        assert_eq!(max_speed_from_distance(4.0, 3.0, 0.0, 0.0), 0.0);
        let near = max_speed_from_distance(4.0, 3.0, 1.0, 0.0);
        let far = max_speed_from_distance(4.0, 3.0, 10.0, 0.0);
        assert!(0.0 < near && near < far);
        // v² + b·v = 2·a·d
        let b = 4.0 * 3.0 * 3.0 / 4.0;
        assert!((far * far + b * far - 2.0 * 3.0 * 10.0).abs() < 1e-3);
        assert_eq!(max_speed_from_distance(4.0, 3.0, 0.0, 1.5), 1.5);
    }
}
