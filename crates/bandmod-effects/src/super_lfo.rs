//! Multi-waveform LFO with eight output facets.
//!
//! One phase accumulator drives every facet. The quadrature phase is derived
//! from the main phase on every call (`phase + 0.25`, wrapped), so the two can
//! never drift apart.
//!
//! # Waveforms
//!
//! | Waveform | Shape | Quadrature |
//! |----------|-------|------------|
//! | Sine | parabolic sine approximation | phase + ¼ |
//! | Triangle | `2·|saw| − 1` | phase + ¼ |
//! | Saw | phase mapped to \[−1, 1) | phase + ¼ |
//! | Square | sign of the sine | phase + ¼ |
//! | Noise | white noise each call | independent draw |
//! | QuasiRandomNoise | LFSR each call | independent draw |
//! | RandomSampleHold | white noise held for `fs / f` samples | same value |
//! | QuasiRandomSampleHold | LFSR held for `fs / f` samples | same value |
//!
//! # Unipolar facets
//!
//! Each bipolar facet is mapped to \[0, 1\] with `(x + 1) / 2` and then
//! shifted by `0.5 − amplitude / 2`, upward for the "from max" facets (peaks
//! at exactly 1.0) and downward for the "from min" facets (troughs at
//! exactly 0.0).

use core::f32::consts::PI;

use bandmod_core::{
    ModulatorOutput, PnSequence, SignalModulator, WhiteNoise, bipolar_to_unipolar,
    parabolic_sine, unipolar_to_bipolar,
};

/// Seed used by [`SuperLfo::new`].
pub const DEFAULT_SEED: u32 = 0x2545_F491;

/// LFO waveform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LfoWaveform {
    /// Symmetric triangle
    Triangle,
    /// Parabolic sine
    #[default]
    Sine,
    /// Rising ramp
    Saw,
    /// ±1 square
    Square,
    /// White-noise sample and hold
    RandomSampleHold,
    /// LFSR sample and hold
    QuasiRandomSampleHold,
    /// White noise, new value every call
    Noise,
    /// LFSR, new value every call
    QuasiRandomNoise,
}

/// Phase behaviour of the LFO.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LfoMode {
    /// Continuous, restarted by `reset`
    Sync,
    /// Renders one period, then silence until `reset`
    OneShot,
    /// Continuous
    #[default]
    FreeRun,
}

/// Parameters of a [`SuperLfo`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperLfoParams {
    /// Waveform
    pub waveform: LfoWaveform,
    /// Phase behaviour
    pub mode: LfoMode,
    /// Oscillator frequency in Hz
    pub frequency_hz: f32,
    /// Peak of the bipolar output, 0..1
    pub output_amplitude: f32,
}

impl Default for SuperLfoParams {
    fn default() -> Self {
        Self {
            waveform: LfoWaveform::Sine,
            mode: LfoMode::FreeRun,
            frequency_hz: 1.0,
            output_amplitude: 1.0,
        }
    }
}

/// Phase-accumulator LFO producing a full [`ModulatorOutput`] per call.
///
/// Random waveforms are deterministic: both noise sources are reseeded from
/// [`seed`](Self::seed) on every `reset`.
///
/// # Example
///
/// ```rust
/// use bandmod_core::SignalModulator;
/// use bandmod_effects::{LfoWaveform, SuperLfo, SuperLfoParams};
///
/// let mut lfo = SuperLfo::with_seed(7);
/// lfo.reset(48000.0);
/// lfo.set_params(SuperLfoParams {
///     waveform: LfoWaveform::Triangle,
///     frequency_hz: 2.0,
///     ..Default::default()
/// });
///
/// let out = lfo.render();
/// assert_eq!(out.inverted, -out.normal);
/// ```
#[derive(Debug, Clone)]
pub struct SuperLfo {
    params: SuperLfoParams,
    sample_rate: f32,
    phase_inc: f32,
    mod_counter: f32,
    render_complete: bool,
    /// Samples since the last sample-and-hold draw; negative before the first draw.
    hold_counter: f32,
    hold_value: f32,
    seed: u32,
    white: WhiteNoise,
    pn: PnSequence,
}

impl Default for SuperLfo {
    fn default() -> Self {
        Self::new()
    }
}

impl SuperLfo {
    /// Create an LFO at 48 kHz seeded with [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create an LFO at 48 kHz with an explicit random seed.
    pub fn with_seed(seed: u32) -> Self {
        let params = SuperLfoParams::default();
        Self {
            params,
            sample_rate: 48000.0,
            phase_inc: params.frequency_hz / 48000.0,
            mod_counter: 0.0,
            render_complete: false,
            hold_counter: -1.0,
            hold_value: 0.0,
            seed,
            white: WhiteNoise::new(seed),
            pn: PnSequence::new(seed),
        }
    }

    /// Random seed applied at the next `reset`.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Change the random seed. Takes effect at the next `reset`.
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    /// Current parameters.
    pub fn params(&self) -> SuperLfoParams {
        self.params
    }

    /// Replace the parameters and recompute the phase increment.
    pub fn set_params(&mut self, params: SuperLfoParams) {
        self.params = params;
        self.phase_inc = params.frequency_hz / self.sample_rate;
    }

    /// Main phase in \[0, 1).
    pub fn phase(&self) -> f32 {
        self.mod_counter
    }

    /// `true` once a one-shot LFO has finished its period.
    pub fn is_complete(&self) -> bool {
        self.render_complete
    }

    fn wrap_counter(&mut self) -> bool {
        if self.mod_counter >= 1.0 {
            self.mod_counter -= 1.0;
            true
        } else if self.mod_counter < 0.0 {
            self.mod_counter += 1.0;
            true
        } else {
            false
        }
    }

    fn draw(&mut self) -> f32 {
        match self.params.waveform {
            LfoWaveform::QuasiRandomSampleHold | LfoWaveform::QuasiRandomNoise => {
                self.pn.next_sample()
            }
            _ => self.white.next_sample(),
        }
    }

    fn sample_and_hold(&mut self) -> f32 {
        let hold = self.sample_rate / self.params.frequency_hz;
        if self.hold_counter < 0.0 {
            self.hold_value = self.draw();
            self.hold_counter = 1.0;
        } else if self.hold_counter > hold {
            self.hold_counter -= hold;
            self.hold_value = self.draw();
        }
        self.hold_counter += 1.0;
        self.hold_value
    }
}

#[inline]
fn sine(phase: f32) -> f32 {
    parabolic_sine(-(phase * 2.0 * PI - PI))
}

#[inline]
fn triangle(phase: f32) -> f32 {
    2.0 * unipolar_to_bipolar(phase).abs() - 1.0
}

#[inline]
fn square(phase: f32) -> f32 {
    if sine(phase) >= 0.0 { 1.0 } else { -1.0 }
}

impl SignalModulator for SuperLfo {
    fn reset(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.phase_inc = self.params.frequency_hz / sample_rate;
        self.mod_counter = 0.0;
        self.render_complete = false;
        self.hold_counter = -1.0;
        self.hold_value = 0.0;
        self.white.reseed(self.seed);
        self.pn.reseed(self.seed);
    }

    fn render(&mut self) -> ModulatorOutput {
        if self.render_complete {
            return ModulatorOutput::default();
        }

        if self.wrap_counter() && self.params.mode == LfoMode::OneShot {
            self.render_complete = true;
            return ModulatorOutput::default();
        }

        let mut quad_phase = self.mod_counter + 0.25;
        if quad_phase >= 1.0 {
            quad_phase -= 1.0;
        }
        let phase = self.mod_counter;

        let (normal, quad) = match self.params.waveform {
            LfoWaveform::Sine => (sine(phase), sine(quad_phase)),
            LfoWaveform::Triangle => (triangle(phase), triangle(quad_phase)),
            LfoWaveform::Saw => (unipolar_to_bipolar(phase), unipolar_to_bipolar(quad_phase)),
            LfoWaveform::Square => (square(phase), square(quad_phase)),
            LfoWaveform::Noise | LfoWaveform::QuasiRandomNoise => {
                let normal = self.draw();
                (normal, self.draw())
            }
            LfoWaveform::RandomSampleHold | LfoWaveform::QuasiRandomSampleHold => {
                let held = self.sample_and_hold();
                (held, held)
            }
        };

        let amplitude = self.params.output_amplitude;
        let normal = normal * amplitude;
        let quad = quad * amplitude;
        let shift = 1.0 - 0.5 - amplitude / 2.0;

        self.mod_counter += self.phase_inc;

        ModulatorOutput {
            normal,
            inverted: -normal,
            quad_phase_pos: quad,
            quad_phase_neg: -quad,
            unipolar_from_max: bipolar_to_unipolar(normal) + shift,
            unipolar_from_min: bipolar_to_unipolar(normal) - shift,
            quad_phase_unipolar_from_max: bipolar_to_unipolar(quad) + shift,
            quad_phase_unipolar_from_min: bipolar_to_unipolar(quad) - shift,
        }
    }
}
