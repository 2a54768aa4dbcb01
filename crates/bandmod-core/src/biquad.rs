//! Second-order section used by the crossover's Linkwitz-Riley low-pass.

use core::f32::consts::{FRAC_1_SQRT_2, PI};
use libm::{cosf, sinf};

use crate::math::flush_denormal;

/// Q of a second-order Butterworth section.
pub const BUTTERWORTH_Q: f32 = FRAC_1_SQRT_2;

/// Biquad coefficients normalized so that `a0 == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feed-forward, current input
    pub b0: f32,
    /// Feed-forward, one sample back
    pub b1: f32,
    /// Feed-forward, two samples back
    pub b2: f32,
    /// Feedback, one sample back
    pub a1: f32,
    /// Feedback, two samples back
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Unity passthrough.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };
}

/// RBJ cookbook low-pass at `frequency` Hz.
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let alpha = sinf(omega) / (2.0 * q);
    let norm = 1.0 / (1.0 + alpha);
    let side = (1.0 - cos_omega) * 0.5 * norm;

    BiquadCoefficients {
        b0: side,
        b1: 2.0 * side,
        b2: side,
        a1: -2.0 * cos_omega * norm,
        a2: (1.0 - alpha) * norm,
    }
}

/// Transposed direct form II biquad.
///
/// ```text
/// y  = b0·x + s1
/// s1 = b1·x − a1·y + s2
/// s2 = b2·x − a2·y
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: BiquadCoefficients,
    s1: f32,
    s2: f32,
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

impl Biquad {
    /// A passthrough section.
    pub fn new() -> Self {
        Self {
            coefficients: BiquadCoefficients::IDENTITY,
            s1: 0.0,
            s2: 0.0,
        }
    }

    /// Swap coefficients, keeping the state.
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.coefficients = coefficients;
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = self.coefficients;
        let output = c.b0 * input + self.s1;
        self.s1 = flush_denormal(c.b1 * input - c.a1 * output + self.s2);
        self.s2 = flush_denormal(c.b2 * input - c.a2 * output);
        output
    }

    /// Zero the state.
    pub fn clear(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}
