//! Provides degree-based trigonometry and distance helpers.
//!
//! All angles taken by the model transforms are in degrees; these helpers
//! convert with a fixed single-precision factor so every transform sees the
//! same radians for the same input.
//!
//! # Examples
//! ```
//! use rawcube::math::{cos_angle, sin_angle};
//!
//! assert!((cos_angle(60.0) - 0.5).abs() < 1e-6);
//! assert!((sin_angle(30.0) - 0.5).abs() < 1e-6);
//! ```

use glam::{DVec3, Vec3};

/// Degrees to radians, as a single-precision factor.
///
/// # Examples
/// ```
/// use rawcube::math::DEG_TO_RAD;
///
/// assert!((180.0 * DEG_TO_RAD - std::f32::consts::PI).abs() < 1e-6);
/// ```
pub const DEG_TO_RAD: f32 = 0.017_453_292_52;

/// Returns the cosine of an angle given in degrees.
///
/// # Examples
/// ```
/// use rawcube::math::cos_angle;
///
/// assert_eq!(cos_angle(0.0), 1.0);
/// ```
#[inline]
pub fn cos_angle(degrees: f32) -> f32 {
    (degrees * DEG_TO_RAD).cos()
}

/// Returns the sine of an angle given in degrees.
///
/// # Examples
/// ```
/// use rawcube::math::sin_angle;
///
/// assert_eq!(sin_angle(0.0), 0.0);
/// ```
#[inline]
pub fn sin_angle(degrees: f32) -> f32 {
    (degrees * DEG_TO_RAD).sin()
}

/// Euclidean distance between two points.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use rawcube::math::distance_of;
///
/// assert_eq!(distance_of(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)), 5.0);
/// ```
#[inline]
pub fn distance_of(start: Vec3, end: Vec3) -> f32 {
    let d = start - end;
    (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
}

/// Euclidean distance between two double-precision points.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use rawcube::math::distance_of_f64;
///
/// assert_eq!(distance_of_f64(DVec3::ZERO, DVec3::new(0.0, 6.0, 8.0)), 10.0);
/// ```
#[inline]
pub fn distance_of_f64(start: DVec3, end: DVec3) -> f64 {
    let d = start - end;
    (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
}
