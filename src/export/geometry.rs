use nalgebra::{Rotation2, Vector2};

use crate::shared_types::Point;

pub fn distance(target: Point) -> f32 {
    target.x.hypot(target.y)
}

pub fn angle_degrees(target: Point) -> f32 {
    target.y.atan2(target.x).to_degrees()
}

/// Rotates a position into the frame of a parent that just gained `degrees`
/// of rotation, i.e. applies the inverse rotation.
pub fn rotate_into_frame(point: Point, degrees: f32) -> Point {
    let rotated = Rotation2::new(-degrees.to_radians()) * Vector2::new(point.x, point.y);
    Point { x: rotated.x, y: rotated.y }
}

#[cfg(test)]
mod tests {
    use super::{angle_degrees, distance, rotate_into_frame};
    use crate::shared_types::Point;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_distance_and_angle() {
        let target = Point { x: 3.0, y: 4.0 };
        assert_close(distance(target), 5.0);
        assert_close(angle_degrees(Point { x: 0.0, y: 85.0 }), 90.0);
        assert_close(angle_degrees(Point { x: -1.0, y: 0.0 }), 180.0);
    }

    #[test]
    fn test_rotate_into_frame() {
        let rotated = rotate_into_frame(Point { x: 0.0, y: 85.0 }, 90.0);
        assert_close(rotated.x, 85.0);
        assert_close(rotated.y, 0.0);
    }

    #[test]
    fn test_rotation_composes_to_identity() {
        let start = Point { x: 12.5, y: -7.25 };
        let there = rotate_into_frame(start, 33.0);
        let back = rotate_into_frame(there, -33.0);
        assert_close(back.x, start.x);
        assert_close(back.y, start.y);
    }
}
