//! Two-way crossover filter bank.
//!
//! Splits one signal into a low and a high band at a split frequency.
//!
//! # Topology
//!
//! The low band is a fourth-order Linkwitz-Riley low-pass: two cascaded
//! Butterworth biquads at the same cutoff (24 dB/oct, −6 dB at the split).
//! The high band is the complement of the low band:
//!
//! ```text
//! low  = LR4_lowpass(x)
//! high = x − low
//! ```
//!
//! so `low + high == x` on every sample. The price is a gentler high band:
//! below the split it falls off at 6 dB/oct and it peaks by ~3.5 dB at the
//! split itself. Cascading banks (feeding one bank's
//! high output into the next) therefore still sums back to the input, which
//! is what lets a multi-band splitter null against its dry signal.
//!
//! # Reference
//!
//! Linkwitz, "Active Crossover Networks for Noncoincident Drivers" (1976).

use crate::biquad::{BUTTERWORTH_Q, Biquad, lowpass_coefficients};

/// Output pair of one crossover call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterBankOutput {
    /// Low-frequency band
    pub low: f32,
    /// High-frequency band
    pub high: f32,
}

/// Crossover parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverParams {
    /// Split frequency in Hz
    pub split_frequency_hz: f32,
}

impl Default for CrossoverParams {
    fn default() -> Self {
        Self {
            split_frequency_hz: 1000.0,
        }
    }
}

/// Linkwitz-Riley crossover with complementary high band.
///
/// One instance handles one channel.
///
/// # Example
///
/// ```rust
/// use bandmod_core::{CrossoverFilterBank, CrossoverParams};
///
/// let mut bank = CrossoverFilterBank::new();
/// bank.reset(48000.0);
/// bank.set_params(CrossoverParams { split_frequency_hz: 400.0 });
///
/// let out = bank.process(0.5);
/// assert!((out.low + out.high - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct CrossoverFilterBank {
    params: CrossoverParams,
    lowpass: [Biquad; 2],
    sample_rate: f32,
}

impl Default for CrossoverFilterBank {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossoverFilterBank {
    /// Create a bank at 48 kHz with the default split frequency.
    pub fn new() -> Self {
        let mut bank = Self {
            params: CrossoverParams::default(),
            lowpass: [Biquad::new(), Biquad::new()],
            sample_rate: 48000.0,
        };
        bank.update_coefficients();
        bank
    }

    /// Clear filter memory and recalculate coefficients for `sample_rate`.
    pub fn reset(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        for stage in &mut self.lowpass {
            stage.clear();
        }
        self.update_coefficients();
    }

    /// Current parameters (as supplied, before clamping).
    pub fn params(&self) -> CrossoverParams {
        self.params
    }

    /// Set the split frequency.
    ///
    /// The effective frequency is clamped to `[20 Hz, 0.49 × sample_rate]`.
    pub fn set_params(&mut self, params: CrossoverParams) {
        if params == self.params {
            return;
        }
        self.params = params;
        self.update_coefficients();
    }

    /// Effective split frequency after clamping.
    pub fn split_frequency(&self) -> f32 {
        self.params
            .split_frequency_hz
            .clamp(20.0, (self.sample_rate * 0.49).max(20.0))
    }

    /// Split one sample into low and high bands.
    #[inline]
    pub fn process(&mut self, input: f32) -> FilterBankOutput {
        let first = self.lowpass[0].process(input);
        let low = self.lowpass[1].process(first);
        FilterBankOutput {
            low,
            high: input - low,
        }
    }

    fn update_coefficients(&mut self) {
        let coefficients =
            lowpass_coefficients(self.split_frequency(), BUTTERWORTH_Q, self.sample_rate);
        for stage in &mut self.lowpass {
            stage.set_coefficients(coefficients);
        }
    }
}
