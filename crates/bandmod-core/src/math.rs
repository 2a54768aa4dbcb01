//! Mathematical utility functions for DSP.
//!
//! Provides the gain conversions, saturation curve and modulation mappings the
//! bandmod components cook their parameters with. All functions are
//! allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`dry_gain`] - dB to linear with the "−15 dB is off" convention
//!
//! # Modulation Mapping
//!
//! - [`bipolar_to_unipolar`] / [`unipolar_to_bipolar`]
//! - [`unipolar_modulation_from_min`] / [`unipolar_modulation_from_max`]

use libm::{expf, logf, tanhf};

/// Dry volumes at or below this level are treated as fully off.
pub const DRY_OFF_DB: f32 = -15.0;

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use bandmod_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// # Example
/// ```rust
/// use bandmod_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Linear dry gain for a dry-volume setting.
///
/// Returns exactly `0.0` for `db <= DRY_OFF_DB`, otherwise `10^(db/20)`.
///
/// # Example
/// ```rust
/// use bandmod_core::dry_gain;
///
/// assert_eq!(dry_gain(-15.0), 0.0);
/// assert_eq!(dry_gain(-40.0), 0.0);
/// assert!((dry_gain(0.0) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn dry_gain(db: f32) -> f32 {
    if db <= DRY_OFF_DB { 0.0 } else { db_to_linear(db) }
}

/// Normalized tanh soft clip.
///
/// `tanh(x·k) / tanh(k)` for `drive > 1`, identity otherwise. The
/// normalization keeps a full-scale input at full scale.
///
/// # Arguments
/// * `x` - Input sample
/// * `drive` - Saturation drive `k` (≤ 1 disables saturation)
#[inline]
pub fn saturate(x: f32, drive: f32) -> f32 {
    if drive > 1.0 {
        tanhf(x * drive) / tanhf(drive)
    } else {
        x
    }
}

/// Map a bipolar value in [-1, 1] to [0, 1].
#[inline]
pub fn bipolar_to_unipolar(value: f32) -> f32 {
    0.5 * value + 0.5
}

/// Map a unipolar value in [0, 1] to [-1, 1].
#[inline]
pub fn unipolar_to_bipolar(value: f32) -> f32 {
    2.0 * value - 1.0
}

/// Modulate upward from `min` toward `max` by a unipolar amount.
///
/// `value` is clamped to [0, 1]; `0.0` yields `min`.
///
/// # Example
/// ```rust
/// use bandmod_core::unipolar_modulation_from_min;
///
/// assert_eq!(unipolar_modulation_from_min(0.0, 20.0, 10000.0), 20.0);
/// assert_eq!(unipolar_modulation_from_min(1.0, 20.0, 10000.0), 10000.0);
/// ```
#[inline]
pub fn unipolar_modulation_from_min(value: f32, min: f32, max: f32) -> f32 {
    value.clamp(0.0, 1.0) * (max - min) + min
}

/// Modulate downward from `max` toward `min` by a unipolar amount.
///
/// `value` is clamped to [0, 1]; `0.0` yields `max`.
#[inline]
pub fn unipolar_modulation_from_max(value: f32, min: f32, max: f32) -> f32 {
    max - value.clamp(0.0, 1.0) * (max - min)
}

/// Flush denormal floats to zero.
///
/// Recursive filter state decaying toward zero can hit the denormal range,
/// which is very slow on most CPUs.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversion() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-6);
        assert!((linear_to_db(10.0) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_dry_gain_off_threshold() {
        assert_eq!(dry_gain(DRY_OFF_DB), 0.0);
        assert_eq!(dry_gain(-15.0001), 0.0);
        assert!(dry_gain(-14.9) > 0.17);
        assert!((dry_gain(-6.0) - db_to_linear(-6.0)).abs() < 1e-7);
    }

    #[test]
    fn test_saturate_identity_below_unity_drive() {
        for &x in &[-2.0, -0.5, 0.0, 0.3, 1.7] {
            assert_eq!(saturate(x, 1.0), x);
            assert_eq!(saturate(x, 0.0), x);
            assert_eq!(saturate(x, 0.5), x);
        }
    }

    #[test]
    fn test_saturate_normalized_at_full_scale() {
        for &k in &[1.5, 3.0, 10.0] {
            assert!((saturate(1.0, k) - 1.0).abs() < 1e-5);
            assert!((saturate(-1.0, k) + 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_saturate_compresses_peaks() {
        let k = 4.0;
        assert!(saturate(2.0, k) < 2.0);
        assert!(saturate(2.0, k) > saturate(1.0, k));
    }

    #[test]
    fn test_unipolar_bipolar_roundtrip() {
        assert_eq!(bipolar_to_unipolar(-1.0), 0.0);
        assert_eq!(bipolar_to_unipolar(1.0), 1.0);
        assert_eq!(unipolar_to_bipolar(0.5), 0.0);
    }

    #[test]
    fn test_modulation_mapping() {
        assert_eq!(unipolar_modulation_from_min(0.5, 0.0, 100.0), 50.0);
        assert_eq!(unipolar_modulation_from_min(2.0, 0.0, 100.0), 100.0);
        assert_eq!(unipolar_modulation_from_max(0.0, 20.0, 800.0), 800.0);
        assert_eq!(unipolar_modulation_from_max(1.0, 20.0, 800.0), 20.0);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(0.5), 0.5);
    }
}
