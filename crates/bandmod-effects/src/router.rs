//! Signal router composing the band splitter and the mod filter.

use bandmod_core::{AudioProcessor, ChannelLayout, MAX_CHANNELS};

use crate::band_splitter::{BandSplitterParams, FourWayBandSplitter};
use crate::mod_filter::{ModFilter, ModFilterParams};
use crate::super_lfo::DEFAULT_SEED;

/// Topology used by [`SignalRouter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoutingMode {
    /// Splitter output feeds the filter
    #[default]
    SplitterToFilter,
    /// Filter output feeds the splitter
    FilterToSplitter,
    /// Both process the input; outputs averaged 0.5/0.5
    Parallel,
}

/// Per-frame router over a [`FourWayBandSplitter`] and a [`ModFilter`].
///
/// A frame is handled only if both stages handle it. The layout is checked
/// against both frames before either stage runs, so a rejected frame leaves
/// the output and all state untouched. In the cascades the
/// second stage sees the first stage's output frame with the same channel
/// layout, so a 1→2 cascade feeds the second stage from the left channel.
///
/// # Example
///
/// ```rust
/// use bandmod_core::AudioProcessor;
/// use bandmod_effects::{RoutingMode, SignalRouter};
///
/// let mut router = SignalRouter::with_seed(1);
/// router.reset(48000.0);
/// router.set_mode(RoutingMode::Parallel);
///
/// let mut out = [0.0; 2];
/// assert!(router.process_frame(&[0.1, 0.2], &mut out, 2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct SignalRouter {
    mode: RoutingMode,
    splitter: FourWayBandSplitter,
    mod_filter: ModFilter,
}

impl Default for SignalRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalRouter {
    /// Create a router with default components and LFO seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create a router whose mod filter LFO uses `seed`.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            mode: RoutingMode::default(),
            splitter: FourWayBandSplitter::new(),
            mod_filter: ModFilter::with_seed(seed),
        }
    }

    /// Current routing mode.
    pub fn mode(&self) -> RoutingMode {
        self.mode
    }

    /// Select the routing mode for subsequent frames.
    pub fn set_mode(&mut self, mode: RoutingMode) {
        #[cfg(feature = "tracing")]
        if mode != self.mode {
            tracing::debug!("router: mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// The band splitter.
    pub fn splitter(&self) -> &FourWayBandSplitter {
        &self.splitter
    }

    /// The mod filter.
    pub fn mod_filter(&self) -> &ModFilter {
        &self.mod_filter
    }

    /// Forward parameters to the splitter.
    pub fn set_splitter_params(&mut self, params: BandSplitterParams) {
        self.splitter.set_params(params);
    }

    /// Forward parameters to the mod filter.
    pub fn set_mod_filter_params(&mut self, params: ModFilterParams) {
        self.mod_filter.set_params(params);
    }

    /// Change the mod filter LFO seed. Takes effect at the next `reset`.
    pub fn set_seed(&mut self, seed: u32) {
        self.mod_filter.set_seed(seed);
    }

    /// Process an interleaved buffer frame by frame.
    ///
    /// Stops at the first unhandled frame and returns `false`; frames before
    /// it have already been written. Trailing samples that do not fill a
    /// whole frame are ignored.
    pub fn process_interleaved(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        input_channels: usize,
        output_channels: usize,
    ) -> bool {
        if input_channels == 0 || output_channels == 0 {
            return false;
        }
        let frames = input.chunks_exact(input_channels);
        let out_frames = output.chunks_exact_mut(output_channels);
        if frames.len() > out_frames.len() {
            return false;
        }
        for (frame, out) in frames.zip(out_frames) {
            if !self.process_frame(frame, out, input_channels, output_channels) {
                return false;
            }
        }
        true
    }
}

impl AudioProcessor for SignalRouter {
    fn reset(&mut self, sample_rate: f32) {
        #[cfg(feature = "tracing")]
        tracing::debug!("router: reset at {} Hz, mode {:?}", sample_rate, self.mode);
        self.splitter.reset(sample_rate);
        self.mod_filter.reset(sample_rate);
    }

    fn process_frame(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        input_channels: usize,
        output_channels: usize,
    ) -> bool {
        if ChannelLayout::for_frames(input, output, input_channels, output_channels).is_none() {
            return false;
        }

        let mut first = [0.0; MAX_CHANNELS];
        match self.mode {
            RoutingMode::SplitterToFilter => {
                self.splitter
                    .process_frame(input, &mut first, input_channels, output_channels)
                    && self
                        .mod_filter
                        .process_frame(&first, output, input_channels, output_channels)
            }
            RoutingMode::FilterToSplitter => {
                self.mod_filter
                    .process_frame(input, &mut first, input_channels, output_channels)
                    && self
                        .splitter
                        .process_frame(&first, output, input_channels, output_channels)
            }
            RoutingMode::Parallel => {
                let mut second = [0.0; MAX_CHANNELS];
                let handled = self
                    .mod_filter
                    .process_frame(input, &mut first, input_channels, output_channels)
                    && self
                        .splitter
                        .process_frame(input, &mut second, input_channels, output_channels);
                if handled {
                    for ch in 0..output_channels {
                        output[ch] = 0.5 * first[ch] + 0.5 * second[ch];
                    }
                }
                handled
            }
        }
    }
}
