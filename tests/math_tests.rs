use roll_engine::math::Vector3;
use approx::assert_relative_eq;

#[test]
fn test_vector3_operations() {
    let v1 = Vector3::new(1.0, 2.0, 3.0);
    let v2 = Vector3::new(4.0, 5.0, 6.0);

    // Addition
    let sum = v1 + v2;
    assert_eq!(sum.x, 5.0);
    assert_eq!(sum.y, 7.0);
    assert_eq!(sum.z, 9.0);

    // Subtraction
    let diff = v2 - v1;
    assert_eq!(diff.x, 3.0);
    assert_eq!(diff.y, 3.0);
    assert_eq!(diff.z, 3.0);

    // Scalar multiplication
    let scaled = v1 * 2.0;
    assert_eq!(scaled.x, 2.0);
    assert_eq!(scaled.y, 4.0);
    assert_eq!(scaled.z, 6.0);

    // Dot product
    let dot = v1.dot(&v2);
    assert_eq!(dot, 1.0 * 4.0 + 2.0 * 5.0 + 3.0 * 6.0);

    // Cross product
    let cross = v1.cross(&v2);
    assert_eq!(cross.x, v1.y * v2.z - v1.z * v2.y);
    assert_eq!(cross.y, v1.z * v2.x - v1.x * v2.z);
    assert_eq!(cross.z, v1.x * v2.y - v1.y * v2.x);

    // Length
    let length = v1.length();
    assert_relative_eq!(length, (1.0f32.powi(2) + 2.0f32.powi(2) + 3.0f32.powi(2)).sqrt());

    // Normalize
    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
    assert_relative_eq!(normalized.x, v1.x / length);
    assert_relative_eq!(normalized.y, v1.y / length);
    assert_relative_eq!(normalized.z, v1.z / length);
}

#[test]
fn test_vector3_reflect() {
    let v = Vector3::new(1.0, -2.0, 3.0);
    let n = Vector3::unit_y();

    let reflected = v.reflect(&n);
    assert_relative_eq!(reflected.x, 1.0);
    assert_relative_eq!(reflected.y, 2.0);
    assert_relative_eq!(reflected.z, 3.0);

    // Reflection preserves length
    assert_relative_eq!(reflected.length(), v.length(), epsilon = 1e-6);

    // Reflecting twice is the identity
    let twice = reflected.reflect(&n);
    assert_relative_eq!(twice.y, v.y, epsilon = 1e-6);
}

#[test]
fn test_vector3_projection() {
    let v = Vector3::new(3.0, 4.0, 0.0);
    let onto = Vector3::unit_x();

    let projected = v.project(&onto);
    assert_relative_eq!(projected.x, 3.0);
    assert_relative_eq!(projected.y, 0.0);

    // Removing the projected part leaves a perpendicular remainder
    let rest = v - projected;
    assert_relative_eq!(rest.dot(&onto), 0.0, epsilon = 1e-6);
}

#[test]
fn test_vector3_lerp_and_distance() {
    let a = Vector3::zero();
    let b = Vector3::new(2.0, 4.0, 6.0);

    let mid = a.lerp(&b, 0.5);
    assert_relative_eq!(mid.x, 1.0);
    assert_relative_eq!(mid.y, 2.0);
    assert_relative_eq!(mid.z, 3.0);

    assert_relative_eq!(a.distance(&b), b.length());
    assert_relative_eq!(a.distance_squared(&b), b.length_squared());
}

#[test]
fn test_vector3_nalgebra_round_trip() {
    let v = Vector3::new(0.5, -1.5, 2.5);
    let na = v.to_nalgebra();
    let back = Vector3::from_nalgebra(&na);
    assert_eq!(v, back);
}

#[test]
fn test_vector3_zero_guards() {
    let zero = Vector3::zero();
    assert!(zero.is_zero());

    // Normalizing a zero vector leaves it unchanged instead of dividing by zero
    let normalized = zero.normalize();
    assert!(normalized.is_zero());
}
