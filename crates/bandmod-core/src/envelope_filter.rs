//! Envelope-modulated state-variable filter.
//!
//! A peak [`EnvelopeFollower`] watches the input. Once the envelope rises
//! above the threshold, the excess (scaled by sensitivity) pushes the cutoff
//! away from its base setting: up toward [`MAX_FILTER_FREQUENCY`], or down
//! toward [`MIN_FILTER_FREQUENCY`] when the modulation is inverted.
//!
//! ```text
//! m  = clamp((env − thresh) · sensitivity, 0, 1)
//! fc = base + m · (MAX − base)        normal
//! fc = base − m · (base − MIN)        inverted
//! ```
//!
//! An external LFO can also lower the threshold. `lfo_modifier` is expected
//! to sweep the 20..10 000 Hz modulation span, and its position in that span
//! lowers the threshold by up to [`LFO_THRESHOLD_RANGE_DB`].

use crate::db_to_linear;
use crate::envelope::EnvelopeFollower;
use crate::svf::{StateVariableFilter, SvfOutput};

/// Upper bound of the modulated cutoff in Hz.
pub const MAX_FILTER_FREQUENCY: f32 = 20480.0;

/// Lower bound of the modulated cutoff in Hz.
pub const MIN_FILTER_FREQUENCY: f32 = 20.0;

/// Maximum threshold reduction applied by the LFO, in dB.
pub const LFO_THRESHOLD_RANGE_DB: f32 = 24.0;

const LFO_MODIFIER_MIN: f32 = 20.0;
const LFO_MODIFIER_MAX: f32 = 10_000.0;

/// Filter response of an [`EnvelopeFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterAlgorithm {
    /// 2nd-order low-pass
    #[default]
    Lpf2,
    /// 2nd-order band-pass
    Bpf2,
    /// 2nd-order high-pass
    Hpf2,
}

impl FilterAlgorithm {
    fn tap(self) -> SvfOutput {
        match self {
            Self::Lpf2 => SvfOutput::Lowpass,
            Self::Bpf2 => SvfOutput::Bandpass,
            Self::Hpf2 => SvfOutput::Highpass,
        }
    }
}

/// Parameters of an [`EnvelopeFilter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeFilterParams {
    /// Filter Q (clamped to 0.5..20 when applied)
    pub q: f32,
    /// Detector threshold in dBFS
    pub threshold_db: f32,
    /// Detector attack in milliseconds
    pub attack_ms: f32,
    /// Detector release in milliseconds
    pub release_ms: f32,
    /// Scales how far the envelope excess moves the cutoff
    pub sensitivity: f32,
    /// Base cutoff in Hz
    pub cutoff_hz: f32,
    /// Filter response
    pub algorithm: FilterAlgorithm,
    /// Sweep the cutoff downward instead of upward
    pub invert_modulation: bool,
    /// LFO value in Hz used to lower the threshold
    pub lfo_modifier: f32,
    /// Let `lfo_modifier` lower the threshold
    pub enable_lfo_threshold: bool,
}

impl Default for EnvelopeFilterParams {
    fn default() -> Self {
        Self {
            q: 0.707,
            threshold_db: -20.0,
            attack_ms: 10.0,
            release_ms: 100.0,
            sensitivity: 1.0,
            cutoff_hz: 1000.0,
            algorithm: FilterAlgorithm::Lpf2,
            invert_modulation: false,
            lfo_modifier: 0.0,
            enable_lfo_threshold: false,
        }
    }
}

/// Envelope follower driving a TPT state-variable filter.
///
/// One instance handles one channel.
///
/// # Example
///
/// ```rust
/// use bandmod_core::{EnvelopeFilter, EnvelopeFilterParams, FilterAlgorithm};
///
/// let mut filter = EnvelopeFilter::new();
/// filter.reset(48000.0);
/// filter.set_params(EnvelopeFilterParams {
///     cutoff_hz: 800.0,
///     algorithm: FilterAlgorithm::Bpf2,
///     ..Default::default()
/// });
///
/// let y = filter.process(0.25);
/// assert!(y.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFilter {
    params: EnvelopeFilterParams,
    detector: EnvelopeFollower,
    filter: StateVariableFilter,
    sample_rate: f32,
}

impl Default for EnvelopeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeFilter {
    /// Create a filter at 48 kHz with default parameters.
    pub fn new() -> Self {
        let params = EnvelopeFilterParams::default();
        let mut filter = Self {
            params,
            detector: EnvelopeFollower::with_times(48000.0, params.attack_ms, params.release_ms),
            filter: StateVariableFilter::new(48000.0),
            sample_rate: 48000.0,
        };
        filter.apply_filter_params();
        filter
    }

    /// Clear detector and filter state for a new stream at `sample_rate`.
    pub fn reset(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.detector.set_sample_rate(sample_rate);
        self.detector.reset();
        self.filter.set_sample_rate(sample_rate);
        self.filter.reset();
        self.apply_filter_params();
    }

    /// Current parameters.
    pub fn params(&self) -> EnvelopeFilterParams {
        self.params
    }

    /// Replace the parameters.
    ///
    /// Detector coefficients are recomputed only when attack or release
    /// actually change, so calling this every sample is cheap.
    pub fn set_params(&mut self, params: EnvelopeFilterParams) {
        if params.attack_ms != self.params.attack_ms {
            self.detector.set_attack_ms(params.attack_ms);
        }
        if params.release_ms != self.params.release_ms {
            self.detector.set_release_ms(params.release_ms);
        }
        self.params = params;
        self.apply_filter_params();
    }

    /// Cutoff used by the most recent [`process`](Self::process) call.
    pub fn current_cutoff(&self) -> f32 {
        self.filter.cutoff()
    }

    /// Threshold in dB after the optional LFO reduction.
    pub fn effective_threshold_db(&self) -> f32 {
        if !self.params.enable_lfo_threshold {
            return self.params.threshold_db;
        }
        let span = (self.params.lfo_modifier - LFO_MODIFIER_MIN)
            / (LFO_MODIFIER_MAX - LFO_MODIFIER_MIN);
        self.params.threshold_db - LFO_THRESHOLD_RANGE_DB * span.clamp(0.0, 1.0)
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let envelope = self.detector.process(input);
        let threshold = db_to_linear(self.effective_threshold_db());

        let amount = if envelope > threshold {
            ((envelope - threshold) * self.params.sensitivity).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let max = MAX_FILTER_FREQUENCY
            .min(self.sample_rate * 0.49)
            .max(MIN_FILTER_FREQUENCY);
        let base = self.params.cutoff_hz.clamp(MIN_FILTER_FREQUENCY, max);
        let cutoff = if self.params.invert_modulation {
            base - amount * (base - MIN_FILTER_FREQUENCY)
        } else {
            base + amount * (max - base)
        };

        self.filter.set_cutoff(cutoff);
        self.filter.process(input)
    }

    fn apply_filter_params(&mut self) {
        self.filter.set_output_type(self.params.algorithm.tap());
        self.filter.set_resonance(self.params.q);
    }
}
