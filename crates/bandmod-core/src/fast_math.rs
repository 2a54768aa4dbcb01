//! Fast polynomial approximations for per-sample modulation math.
//!
//! # Accuracy
//!
//! | Function | Max error | Domain |
//! |----------|-----------|--------|
//! | [`parabolic_sine`] | ~0.001 | \[−π, π\] |
//!
//! The LFO renders one sine per channel per sample. A transcendental call
//! there buys nothing audible over the parabola below.

use core::f32::consts::PI;

const B: f32 = 4.0 / PI;
const C: f32 = -4.0 / (PI * PI);
const P: f32 = 0.225;

/// Parabolic sine approximation.
///
/// Two parabolas give the rough shape, then the `P = 0.225` blend pulls the
/// curve onto the true sine:
///
/// ```text
/// y  = B·x + C·x·|x|
/// y' = P·(y·|y| − y) + y
/// ```
///
/// # Arguments
///
/// * `angle` - Angle in radians, valid on \[−π, π\]
///
/// # Returns
///
/// Approximation of `sin(angle)`, clamped to \[−1, 1\].
///
/// # Examples
///
/// ```
/// use bandmod_core::fast_math::parabolic_sine;
/// use core::f32::consts::FRAC_PI_2;
///
/// assert!(parabolic_sine(0.0).abs() < 1e-6);
/// assert!((parabolic_sine(FRAC_PI_2) - 1.0).abs() < 0.002);
/// assert!((parabolic_sine(-FRAC_PI_2) + 1.0).abs() < 0.002);
/// ```
#[inline]
pub fn parabolic_sine(angle: f32) -> f32 {
    let y = B * angle + C * angle * angle.abs();
    let y = P * (y * y.abs() - y) + y;
    y.clamp(-1.0, 1.0)
}
