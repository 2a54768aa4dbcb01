//! Four-way band splitter with per-band saturation.
//!
//! Three crossover stages are cascaded per channel:
//!
//! ```text
//! x ──► [low split] ──low──────────────────────────────► LPF
//!            └─high─► [mid split] ──low────────────────► low band
//!                          └─high─► [high split] ─low──► high band
//!                                         └────high────► HPF
//! ```
//!
//! Each band gets its own volume and optional `tanh` soft clip. Because every
//! stage is phase-coherent, the four bands at unity gain sum back to the input.

use bandmod_core::{
    AudioProcessor, ChannelLayout, CrossoverFilterBank, CrossoverParams, MAX_CHANNELS,
    db_to_linear, dry_gain, saturate,
};

/// Number of output bands.
pub const BAND_COUNT: usize = 4;

const STAGE_COUNT: usize = 3;

/// One of the four output bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Below the low split
    Lpf,
    /// Between the low and mid splits
    LowBand,
    /// Between the mid and high splits
    HighBand,
    /// Above the high split
    Hpf,
}

impl Band {
    /// All bands, lowest first.
    pub const ALL: [Band; BAND_COUNT] = [Band::Lpf, Band::LowBand, Band::HighBand, Band::Hpf];

    /// Index into the per-band parameter arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// What the splitter outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitView {
    /// All four bands plus dry, boosted
    #[default]
    Splitter,
    /// LPF band only
    Lpf,
    /// Low band only
    LowBand,
    /// High band only
    HighBand,
    /// HPF band only
    Hpf,
}

impl SplitView {
    /// The isolated band, or `None` for the full mix.
    pub fn band(self) -> Option<Band> {
        match self {
            Self::Splitter => None,
            Self::Lpf => Some(Band::Lpf),
            Self::LowBand => Some(Band::LowBand),
            Self::HighBand => Some(Band::HighBand),
            Self::Hpf => Some(Band::Hpf),
        }
    }
}

/// Parameters of a [`FourWayBandSplitter`].
///
/// Volumes are in dB. Saturation is a drive factor where values ≤ 1 bypass
/// the soft clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSplitterParams {
    /// Low split in Hz
    pub low_split_hz: f32,
    /// Mid split in Hz
    pub mid_split_hz: f32,
    /// High split in Hz
    pub high_split_hz: f32,
    /// Output view
    pub view: SplitView,
    /// Per-band volume in dB, indexed by [`Band::index`]
    pub volume_db: [f32; BAND_COUNT],
    /// Per-band saturation drive, indexed by [`Band::index`]
    pub saturation: [f32; BAND_COUNT],
    /// Dry volume in dB; −15 dB and below is off
    pub dry_volume_db: f32,
    /// Process (`true`) or pass the input through untouched
    pub enabled: bool,
    /// Full-mix output boost in dB
    pub boost_db: f32,
}

impl Default for BandSplitterParams {
    fn default() -> Self {
        Self {
            low_split_hz: 400.0,
            mid_split_hz: 1000.0,
            high_split_hz: 10000.0,
            view: SplitView::Splitter,
            volume_db: [0.0; BAND_COUNT],
            saturation: [1.0; BAND_COUNT],
            dry_volume_db: -15.0,
            enabled: false,
            boost_db: 0.0,
        }
    }
}

impl BandSplitterParams {
    /// Return a copy with `low <= mid <= high` enforced.
    ///
    /// `low` is pulled down to `mid`, then `mid` is clamped between the new
    /// `low` and `high`, then `high` is raised to `mid`.
    pub fn with_ordered_splits(mut self) -> Self {
        self.low_split_hz = self.low_split_hz.min(self.mid_split_hz);
        self.mid_split_hz = self
            .mid_split_hz
            .min(self.high_split_hz)
            .max(self.low_split_hz);
        self.high_split_hz = self.high_split_hz.max(self.mid_split_hz);
        self
    }

    /// The three split frequencies, lowest stage first.
    pub fn splits(&self) -> [f32; STAGE_COUNT] {
        [self.low_split_hz, self.mid_split_hz, self.high_split_hz]
    }
}

/// Four-band crossover splitter.
///
/// Owns one [`CrossoverFilterBank`] per stage and channel. Supports 1→1,
/// 1→2 and 2→2 channel layouts; anything else is reported as unhandled.
///
/// # Example
///
/// ```rust
/// use bandmod_core::AudioProcessor;
/// use bandmod_effects::{BandSplitterParams, FourWayBandSplitter};
///
/// let mut splitter = FourWayBandSplitter::new();
/// splitter.reset(48000.0);
/// splitter.set_params(BandSplitterParams { enabled: true, ..Default::default() });
///
/// let mut out = [0.0; 2];
/// assert!(splitter.process_frame(&[0.5, 0.5], &mut out, 2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct FourWayBandSplitter {
    params: BandSplitterParams,
    banks: [[CrossoverFilterBank; MAX_CHANNELS]; STAGE_COUNT],
    band_gain: [f32; BAND_COUNT],
    boost_gain: f32,
    dry_gain: f32,
}

impl Default for FourWayBandSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl FourWayBandSplitter {
    /// Create a splitter at 48 kHz with default parameters.
    pub fn new() -> Self {
        let mut splitter = Self {
            params: BandSplitterParams::default(),
            banks: core::array::from_fn(|_| core::array::from_fn(|_| CrossoverFilterBank::new())),
            band_gain: [1.0; BAND_COUNT],
            boost_gain: 1.0,
            dry_gain: 0.0,
        };
        splitter.set_params(BandSplitterParams::default());
        splitter
    }

    /// Current (order-corrected) parameters.
    pub fn params(&self) -> BandSplitterParams {
        self.params
    }

    /// Store `params` with the split order corrected and cook the gains.
    pub fn set_params(&mut self, params: BandSplitterParams) {
        let ordered = params.with_ordered_splits();

        #[cfg(feature = "tracing")]
        if ordered.splits() != params.splits() {
            tracing::debug!(
                "splitter: split order corrected {:?} -> {:?}",
                params.splits(),
                ordered.splits()
            );
        }

        self.params = ordered;
        for (gain, &db) in self.band_gain.iter_mut().zip(&ordered.volume_db) {
            *gain = db_to_linear(db);
        }
        self.boost_gain = db_to_linear(ordered.boost_db);
        self.dry_gain = dry_gain(ordered.dry_volume_db);

        for (stage, split_frequency_hz) in self.banks.iter_mut().zip(ordered.splits()) {
            for bank in stage {
                bank.set_params(CrossoverParams { split_frequency_hz });
            }
        }
    }

    /// Process one mono sample through the left-channel cascade.
    pub fn process_sample(&mut self, input: f32) -> f32 {
        if self.params.enabled {
            self.process_channel(0, input)
        } else {
            input
        }
    }

    #[inline]
    fn process_channel(&mut self, channel: usize, input: f32) -> f32 {
        let low = self.banks[0][channel].process(input);
        let mid = self.banks[1][channel].process(low.high);
        let high = self.banks[2][channel].process(mid.high);

        let raw = [low.low, mid.low, high.low, high.high];
        let mut bands = [0.0; BAND_COUNT];
        for i in 0..BAND_COUNT {
            bands[i] = saturate(raw[i] * self.band_gain[i], self.params.saturation[i]);
        }

        match self.params.view.band() {
            Some(band) => bands[band.index()],
            None => {
                let dry = (low.low + low.high + mid.low + mid.high + high.low + high.high)
                    * self.dry_gain;
                (bands.iter().sum::<f32>() + dry) * self.boost_gain
            }
        }
    }
}

impl AudioProcessor for FourWayBandSplitter {
    fn reset(&mut self, sample_rate: f32) {
        for bank in self.banks.iter_mut().flatten() {
            bank.reset(sample_rate);
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
            layout.write(output, input[0], if stereo { input[1] } else { input[0] });
            return true;
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
