//! Parameter range validation.
//!
//! Each user-facing parameter has a [`ParamRange`] describing its control
//! range and default. [`EngineConfig::validate`](crate::EngineConfig::validate)
//! checks every field against these and reports all violations at once.
//!
//! # Example
//!
//! ```rust
//! use bandmod_config::validation::{self, ValidationError};
//!
//! assert!(validation::CUTOFF.check("cutoff_hz", 800.0).is_ok());
//! assert!(matches!(
//!     validation::CUTOFF.check("cutoff_hz", 20.0),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Flatten into the individual violations.
    pub fn errors(&self) -> Vec<&ValidationError> {
        match self {
            ValidationError::Multiple(errors) => errors.iter().flat_map(Self::errors).collect(),
            single => vec![single],
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Inclusive control range and default of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
    /// Default value.
    pub default: f32,
}

impl ParamRange {
    const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Whether `value` lies inside the range. NaN never does.
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Check `value`, naming it `param` in the error.
    pub fn check(&self, param: &str, value: f32) -> ValidationResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                param: param.to_string(),
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Host sample rate, Hz.
pub const SAMPLE_RATE: ParamRange = ParamRange::new(8000.0, 192_000.0, 48000.0);

/// Low split frequency, Hz.
pub const LOW_SPLIT: ParamRange = ParamRange::new(50.0, 2000.0, 400.0);
/// Mid split frequency, Hz.
pub const MID_SPLIT: ParamRange = ParamRange::new(300.0, 12000.0, 1000.0);
/// High split frequency, Hz.
pub const HIGH_SPLIT: ParamRange = ParamRange::new(5000.0, 20000.0, 10000.0);
/// Per-band volume, dB.
pub const BAND_VOLUME: ParamRange = ParamRange::new(-60.0, 6.0, 0.0);
/// Per-band saturation drive.
pub const BAND_SATURATION: ParamRange = ParamRange::new(1.0, 10.0, 1.0);
/// Dry volume, dB. Shared by splitter and filter.
pub const DRY_VOLUME: ParamRange = ParamRange::new(-15.0, 0.0, -15.0);
/// Output boost, dB. Shared by splitter and filter.
pub const BOOST: ParamRange = ParamRange::new(-5.0, 10.0, 0.0);

/// Filter cutoff, Hz.
pub const CUTOFF: ParamRange = ParamRange::new(80.0, 5000.0, 800.0);
/// Filter Q.
pub const Q: ParamRange = ParamRange::new(0.5, 10.0, 2.0);
/// Envelope threshold, dB.
pub const THRESHOLD: ParamRange = ParamRange::new(-30.0, 0.0, -15.0);
/// Envelope attack, ms.
pub const ATTACK: ParamRange = ParamRange::new(1.0, 10.0, 8.0);
/// Envelope release, ms.
pub const RELEASE: ParamRange = ParamRange::new(20.0, 400.0, 80.0);
/// Envelope sensitivity.
pub const SENSITIVITY: ParamRange = ParamRange::new(0.25, 5.0, 1.0);
/// LFO rate, Hz.
pub const LFO_RATE: ParamRange = ParamRange::new(2.0, 15.0, 8.0);
/// LFO depth, percent.
pub const LFO_DEPTH: ParamRange = ParamRange::new(0.0, 100.0, 50.0);

/// Accumulates violations across many checks.
#[derive(Debug, Default)]
pub struct Violations(Vec<ValidationError>);

impl Violations {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one value and record any violation.
    pub fn check(&mut self, range: &ParamRange, param: &str, value: f32) {
        if let Err(e) = range.check(param, value) {
            self.0.push(e);
        }
    }

    /// No violations, a single one, or [`ValidationError::Multiple`].
    pub fn finish(mut self) -> ValidationResult<()> {
        match self.0.len() {
            0 => Ok(()),
            1 => Err(self.0.remove(0)),
            _ => Err(ValidationError::Multiple(self.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ParamRange; 16] = [
        SAMPLE_RATE,
        LOW_SPLIT,
        MID_SPLIT,
        HIGH_SPLIT,
        BAND_VOLUME,
        BAND_SATURATION,
        DRY_VOLUME,
        BOOST,
        CUTOFF,
        Q,
        THRESHOLD,
        ATTACK,
        RELEASE,
        SENSITIVITY,
        LFO_RATE,
        LFO_DEPTH,
    ];

    #[test]
    fn defaults_lie_inside_their_ranges() {
        for range in ALL {
            assert!(range.min < range.max, "{range:?}");
            assert!(range.contains(range.default), "{range:?}");
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(Q.check("q", 0.5).is_ok());
        assert!(Q.check("q", 10.0).is_ok());
        assert!(Q.check("q", 10.01).is_err());
    }

    #[test]
    fn nan_is_rejected() {
        assert!(!ATTACK.contains(f32::NAN));
        assert!(ATTACK.check("attack_ms", f32::NAN).is_err());
    }

    #[test]
    fn out_of_range_display() {
        let err = LFO_DEPTH.check("lfo_depth_pct", 150.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter 'lfo_depth_pct' value 150 out of range [0, 100]"
        );
    }

    #[test]
    fn violations_collapse_single_error() {
        let mut v = Violations::new();
        v.check(&CUTOFF, "cutoff_hz", 800.0);
        assert!(v.finish().is_ok());

        let mut v = Violations::new();
        v.check(&CUTOFF, "cutoff_hz", 10.0);
        assert!(matches!(v.finish(), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn violations_collect_all() {
        let mut v = Violations::new();
        v.check(&CUTOFF, "cutoff_hz", 10.0);
        v.check(&Q, "q", 0.1);
        v.check(&RELEASE, "release_ms", 100.0);
        let err = v.finish().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        let msg = err.to_string();
        assert!(msg.starts_with("multiple validation errors"), "{msg}");
        assert!(msg.contains("cutoff_hz") && msg.contains("'q'"), "{msg}");
    }
}
