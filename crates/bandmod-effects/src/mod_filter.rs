//! Envelope filter with LFO modulation and an optional doubled filter.
//!
//! Per channel, a primary [`EnvelopeFilter`] tracks the input envelope. The
//! internal [`SuperLfo`] (random sample-and-hold) can additionally sweep the
//! cutoff, the Q, or the detector threshold. A second "doubled" filter an
//! order of magnitude higher in frequency can be mixed in.
//!
//! ```text
//! y = primary(x) · boost_scale + x · dry + doubled(x)
//! ```
//!
//! `boost_scale` is the boost gain for BPF/HPF and half of it for LPF. The
//! doubled filter is not boosted.

use bandmod_core::{
    AudioProcessor, ChannelLayout, EnvelopeFilter, EnvelopeFilterParams, FilterAlgorithm,
    MAX_CHANNELS, MAX_FILTER_FREQUENCY, SignalModulator, db_to_linear, dry_gain,
    unipolar_modulation_from_min,
};

use crate::super_lfo::{DEFAULT_SEED, LfoWaveform, SuperLfo, SuperLfoParams};

/// Lower edge of the LFO modulation span in Hz.
pub const LFO_MOD_MIN_HZ: f32 = 20.0;
/// Upper edge of the LFO modulation span in Hz.
pub const LFO_MOD_MAX_HZ: f32 = 10_000.0;

const Q_MOD_DIVISOR: f32 = 600.0;
const Q_COUPLING_DIVISOR: f32 = 200.0;
const DOUBLED_CUTOFF_RATIO: f32 = 10.0;

const PRIMARY: usize = 0;
const DOUBLED: usize = 1;

/// Filter response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModFilterType {
    /// Low-pass
    #[default]
    Lpf,
    /// Band-pass
    Bpf,
    /// High-pass
    Hpf,
}

impl ModFilterType {
    fn algorithm(self) -> FilterAlgorithm {
        match self {
            Self::Lpf => FilterAlgorithm::Lpf2,
            Self::Bpf => FilterAlgorithm::Bpf2,
            Self::Hpf => FilterAlgorithm::Hpf2,
        }
    }

    /// Linear gain applied to the primary filter for a given boost gain.
    fn boost_scale(self, boost_gain: f32) -> f32 {
        match self {
            Self::Lpf => boost_gain / 2.0,
            Self::Bpf | Self::Hpf => boost_gain,
        }
    }
}

/// Parameters of a [`ModFilter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModFilterParams {
    /// Base cutoff in Hz
    pub cutoff_hz: f32,
    /// Filter Q (ignored when `couple_q` is set)
    pub q: f32,
    /// Envelope threshold in dB
    pub threshold_db: f32,
    /// Detector attack in ms
    pub attack_ms: f32,
    /// Detector release in ms
    pub release_ms: f32,
    /// Envelope sensitivity
    pub sensitivity: f32,
    /// Filter response
    pub filter_type: ModFilterType,
    /// Filter (`true`) or pass the dry-blended input
    pub enabled: bool,
    /// Dry volume in dB; −15 dB and below is off
    pub dry_volume_db: f32,
    /// Output boost in dB
    pub boost_db: f32,
    /// Enable LFO modulation
    pub lfo_enabled: bool,
    /// LFO rate in Hz
    pub lfo_rate_hz: f32,
    /// LFO depth in percent
    pub lfo_depth_pct: f32,
    /// Sweep the cutoff downward
    pub invert_modulation: bool,
    /// Derive Q from `cutoff_hz / 200`
    pub couple_q: bool,
    /// Mix in the doubled filter at 10× cutoff
    pub double_filter: bool,
    /// Let the LFO modulate Q as well
    pub q_modulation: bool,
    /// LFO lowers the threshold instead of moving the cutoff
    pub lfo_threshold: bool,
}

impl Default for ModFilterParams {
    fn default() -> Self {
        Self {
            cutoff_hz: 800.0,
            q: 2.0,
            threshold_db: -15.0,
            attack_ms: 8.0,
            release_ms: 80.0,
            sensitivity: 1.0,
            filter_type: ModFilterType::Lpf,
            enabled: false,
            dry_volume_db: -15.0,
            boost_db: 0.0,
            lfo_enabled: false,
            lfo_rate_hz: 8.0,
            lfo_depth_pct: 50.0,
            invert_modulation: false,
            couple_q: false,
            double_filter: false,
            q_modulation: false,
            lfo_threshold: false,
        }
    }
}

/// LFO- and envelope-modulated filter.
///
/// Supports 1→1, 1→2 and 2→2 channel layouts. Any other layout returns
/// `false` with the output frame and all internal state untouched.
///
/// # Example
///
/// ```rust
/// use bandmod_core::AudioProcessor;
/// use bandmod_effects::{ModFilter, ModFilterParams, ModFilterType};
///
/// let mut filter = ModFilter::with_seed(42);
/// filter.reset(48000.0);
/// filter.set_params(ModFilterParams {
///     enabled: true,
///     filter_type: ModFilterType::Bpf,
///     lfo_enabled: true,
///     ..Default::default()
/// });
///
/// let mut out = [0.0; 2];
/// assert!(filter.process_frame(&[0.2], &mut out, 1, 2));
/// assert_eq!(out[0], out[1]);
/// ```
#[derive(Debug, Clone)]
pub struct ModFilter {
    params: ModFilterParams,
    filters: [[EnvelopeFilter; MAX_CHANNELS]; 2],
    filter_params: [EnvelopeFilterParams; 2],
    lfo: SuperLfo,
    dry_gain: f32,
    boost_gain: f32,
}

impl Default for ModFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModFilter {
    /// Create a filter at 48 kHz with the default LFO seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create a filter whose LFO uses `seed`.
    pub fn with_seed(seed: u32) -> Self {
        let mut filter = Self {
            params: ModFilterParams::default(),
            filters: core::array::from_fn(|_| core::array::from_fn(|_| EnvelopeFilter::new())),
            filter_params: [EnvelopeFilterParams::default(); 2],
            lfo: SuperLfo::with_seed(seed),
            dry_gain: 0.0,
            boost_gain: 1.0,
        };
        filter.lfo.set_params(SuperLfoParams {
            waveform: LfoWaveform::RandomSampleHold,
            ..SuperLfoParams::default()
        });
        filter.set_params(ModFilterParams::default());
        filter
    }

    /// Change the LFO seed. Takes effect at the next `reset`.
    pub fn set_seed(&mut self, seed: u32) {
        self.lfo.set_seed(seed);
    }

    /// Current parameters.
    pub fn params(&self) -> ModFilterParams {
        self.params
    }

    /// Envelope filter parameters of the primary pair, before LFO modulation.
    pub fn primary_filter_params(&self) -> EnvelopeFilterParams {
        self.filter_params[PRIMARY]
    }

    /// Envelope filter parameters of the doubled pair.
    pub fn doubled_filter_params(&self) -> EnvelopeFilterParams {
        self.filter_params[DOUBLED]
    }

    /// The modulation LFO.
    pub fn lfo(&self) -> &SuperLfo {
        &self.lfo
    }

    /// Store `params` and configure both filter pairs.
    pub fn set_params(&mut self, params: ModFilterParams) {
        self.params = params;
        self.dry_gain = dry_gain(params.dry_volume_db);
        self.boost_gain = db_to_linear(params.boost_db);

        let primary = EnvelopeFilterParams {
            q: if params.couple_q {
                params.cutoff_hz / Q_COUPLING_DIVISOR
            } else {
                params.q
            },
            threshold_db: params.threshold_db,
            attack_ms: params.attack_ms,
            release_ms: params.release_ms,
            sensitivity: params.sensitivity,
            cutoff_hz: params.cutoff_hz,
            algorithm: params.filter_type.algorithm(),
            invert_modulation: params.invert_modulation,
            lfo_modifier: self.filter_params[PRIMARY].lfo_modifier,
            enable_lfo_threshold: params.lfo_threshold,
        };
        let doubled = EnvelopeFilterParams {
            cutoff_hz: (params.cutoff_hz * DOUBLED_CUTOFF_RATIO).min(MAX_FILTER_FREQUENCY),
            ..primary
        };

        self.filter_params = [primary, doubled];
        for (pair, filter_params) in self.filters.iter_mut().zip(self.filter_params) {
            for filter in pair {
                filter.set_params(filter_params);
            }
        }
    }

    /// Render the LFO and push the modulated parameters into the primary pair.
    fn apply_lfo(&mut self) {
        self.lfo.set_params(SuperLfoParams {
            frequency_hz: self.params.lfo_rate_hz,
            output_amplitude: (self.params.lfo_depth_pct / 100.0) * 0.5,
            ..self.lfo.params()
        });
        let modulator = self.lfo.render();
        let modifier = unipolar_modulation_from_min(
            modulator.unipolar_from_min,
            LFO_MOD_MIN_HZ,
            LFO_MOD_MAX_HZ,
        );

        let mut modulated = self.filter_params[PRIMARY];
        modulated.lfo_modifier = modifier;
        if !self.params.lfo_threshold {
            modulated.threshold_db = 0.0;
            modulated.cutoff_hz += modifier;
        }
        if self.params.q_modulation {
            modulated.q = self.params.q + modifier / Q_MOD_DIVISOR;
        }

        for filter in &mut self.filters[PRIMARY] {
            filter.set_params(modulated);
        }
    }

    #[inline]
    fn process_channel(&mut self, channel: usize, input: f32) -> f32 {
        let filtered = self.filters[PRIMARY][channel].process(input)
            * self.params.filter_type.boost_scale(self.boost_gain);
        let doubled = if self.params.double_filter {
            self.filters[DOUBLED][channel].process(input)
        } else {
            0.0
        };
        filtered + input * self.dry_gain + doubled
    }

    /// Process one mono sample through the left-channel filters.
    pub fn process_sample(&mut self, input: f32) -> f32 {
        if !self.params.enabled {
            return input + input * self.dry_gain;
        }
        if self.params.lfo_enabled {
            self.apply_lfo();
        }
        self.process_channel(0, input)
    }
}

impl AudioProcessor for ModFilter {
    fn reset(&mut self, sample_rate: f32) {
        self.lfo.reset(sample_rate);
        self.lfo.set_params(SuperLfoParams {
            waveform: LfoWaveform::RandomSampleHold,
            ..self.lfo.params()
        });
        for filter in self.filters.iter_mut().flatten() {
            filter.reset(sample_rate);
        }
    }

    fn process_frame(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        input_channels: usize,
        output_channels: usize,
    ) -> bool {
        let Some(layout) =
            ChannelLayout::for_frames(input, output, input_channels, output_channels)
        else {
            return false;
        };
        let stereo = layout == ChannelLayout::Stereo;

        if !self.params.enabled {
            let left = input[0] + input[0] * self.dry_gain;
            let right = if stereo {
                input[1] + input[1] * self.dry_gain
            } else {
                left
            };
            layout.write(output, left, right);
            return true;
        }

        if self.params.lfo_enabled {
            self.apply_lfo();
        }

        let left = self.process_channel(0, input[0]);
        let right = if stereo {
            self.process_channel(1, input[1])
        } else {
            left
        };
        layout.write(output, left, right);
        true
    }
}
