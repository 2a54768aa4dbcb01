//! State Variable Filter implementation.
//!
//! Outputs lowpass, bandpass and highpass simultaneously. Well-suited for
//! envelope modulation because the cutoff can move every sample.
//!
//! # Topology
//!
//! Topology-Preserving Transform (TPT) SVF with trapezoidal integrators.
//! Sweeping the cutoff does not produce the zipper and blow-up artifacts of
//! Direct Form sections.
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use core::f32::consts::PI;
use libm::tanf;

use crate::math::flush_denormal;

/// State Variable Filter output tap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SvfOutput {
    /// Low-pass output
    #[default]
    Lowpass,
    /// Band-pass output
    Bandpass,
    /// High-pass output
    Highpass,
}

/// State Variable Filter (2-pole, 12 dB/oct).
///
/// ## Parameters
///
/// - `cutoff`: Hz, clamped to 20.0 to sr×0.49 (default 1000.0)
/// - `resonance`: Q factor, clamped to 0.5 to 20.0 (default 0.707)
/// - `output_type`: tap returned by [`process`](Self::process)
///
/// # Example
///
/// ```rust
/// use bandmod_core::{StateVariableFilter, SvfOutput};
///
/// let mut svf = StateVariableFilter::new(48000.0);
/// svf.set_cutoff(1000.0);
/// svf.set_resonance(2.0);
/// svf.set_output_type(SvfOutput::Bandpass);
///
/// let output = svf.process(0.5);
/// ```
#[derive(Debug, Clone)]
pub struct StateVariableFilter {
    ic1eq: f32,
    ic2eq: f32,

    g: f32,
    k: f32,

    sample_rate: f32,
    cutoff: f32,
    resonance: f32,
    output_type: SvfOutput,
}

impl Default for StateVariableFilter {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl StateVariableFilter {
    /// Create a new SVF at 1000 Hz, Q = 0.707, lowpass output.
    pub fn new(sample_rate: f32) -> Self {
        let mut svf = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 0.0,
            sample_rate,
            cutoff: 1000.0,
            resonance: 0.707,
            output_type: SvfOutput::Lowpass,
        };
        svf.update_coefficients();
        svf
    }

    /// Set cutoff frequency in Hz (clamped to 20.0 to `sample_rate × 0.49`).
    pub fn set_cutoff(&mut self, freq: f32) {
        let cutoff = freq.clamp(20.0, max_cutoff(self.sample_rate));
        if cutoff != self.cutoff {
            self.cutoff = cutoff;
            self.update_coefficients();
        }
    }

    /// Current cutoff frequency in Hz.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Set resonance (clamped to 0.5 to 20.0).
    pub fn set_resonance(&mut self, q: f32) {
        let resonance = q.clamp(0.5, 20.0);
        if resonance != self.resonance {
            self.resonance = resonance;
            self.update_coefficients();
        }
    }

    /// Current resonance (Q factor).
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Select the tap returned by [`process`](Self::process).
    pub fn set_output_type(&mut self, output_type: SvfOutput) {
        self.output_type = output_type;
    }

    /// Current output tap.
    pub fn output_type(&self) -> SvfOutput {
        self.output_type
    }

    /// Change the sample rate, re-clamping the cutoff.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.cutoff = self.cutoff.clamp(20.0, max_cutoff(sample_rate));
        self.update_coefficients();
    }

    /// Clear integrator state.
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    fn update_coefficients(&mut self) {
        self.g = tanf(PI * self.cutoff / self.sample_rate);
        self.k = 1.0 / self.resonance;
    }

    /// Process one sample and return `(lowpass, bandpass, highpass)`.
    #[inline]
    pub fn process_all(&mut self, input: f32) -> (f32, f32, f32) {
        let v3 = input - self.ic2eq;
        let v1 = (self.g * v3 + self.ic1eq) / (1.0 + self.g * (self.g + self.k));
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        let hp = input - self.k * v1 - v2;
        (v2, v1, hp)
    }

    /// Process one sample through the selected tap.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let (lp, bp, hp) = self.process_all(input);
        match self.output_type {
            SvfOutput::Lowpass => lp,
            SvfOutput::Bandpass => bp,
            SvfOutput::Highpass => hp,
        }
    }
}

/// Highest usable cutoff, never below the 20 Hz floor.
#[inline]
fn max_cutoff(sample_rate: f32) -> f32 {
    (sample_rate * 0.49).max(20.0)
}
