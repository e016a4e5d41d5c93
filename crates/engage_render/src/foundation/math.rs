//! Math utilities and types
//!
//! Provides the fundamental double-precision math types used throughout the
//! renderer, plus the handful of vector helpers whose edge-case behavior the
//! transform and visibility code depends on.

pub use nalgebra::{Matrix3, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// Radians per degree used for all trajectory angle conversions.
pub const RADIANS_PER_DEGREE: f64 = 0.017_453_29;

/// Magnitude of a vector. Returns 0 for the zero vector.
pub fn magnitude(v: Vec3) -> f64 {
    let msq = v.dot(&v);
    if msq > 0.0 {
        msq.sqrt()
    } else {
        0.0
    }
}

/// Normalize a vector, returning the zero vector when the magnitude is 0.
///
/// The zero-vector case is a valid input (a degenerate polygon normal), not
/// an error, so this deliberately does not panic the way
/// `nalgebra::Unit::new_normalize` would.
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let mag = magnitude(v);
    if mag > 0.0 {
        v / mag
    } else {
        Vec3::zeros()
    }
}

/// Round to the nearest integer with ties going away from zero.
///
/// Depth keys are quantized with this exact rule: 2.5 rounds to 3 and -2.5
/// rounds to -3, independent of whatever rounding mode the platform libm
/// picked. Implemented explicitly rather than via `f64::round` so the rule
/// is visible at the one place ordering depends on it.
pub fn round_half_away_from_zero(x: f64) -> i64 {
    if x >= 0.0 {
        (x + 0.5).floor() as i64
    } else {
        (x - 0.5).ceil() as i64
    }
}
