//! Processor and modulator traits shared by all bandmod components.
//!
//! Two shapes cover everything the engine runs on the audio thread:
//!
//! - [`AudioProcessor`]: consumes one input frame and writes one output frame.
//!   Reports whether the channel configuration was handled.
//! - [`SignalModulator`]: renders a modulation value with no audio input
//!   (oscillators, envelope generators).
//!
//! ## Design Decisions
//!
//! - **Frame-based**: A frame is a fixed slice of per-channel samples
//!   (`[0]` = left/mono, `[1]` = right). Only mono and stereo exist, so
//!   frames never need more than [`MAX_CHANNELS`] slots.
//!
//! - **Boolean results**: Nothing on the audio path can fail fatally. An
//!   unsupported channel combination returns `false` and leaves the output
//!   frame untouched.
//!
//! - **No allocations**: All methods are called per sample on the audio thread.

/// Maximum number of channels in a frame.
pub const MAX_CHANNELS: usize = 2;

/// Supported input/output channel combinations.
///
/// Any other combination is rejected by every processor in this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// 1 in, 1 out
    Mono,
    /// 1 in, 2 out (mono result duplicated)
    MonoToStereo,
    /// 2 in, 2 out (channels processed independently)
    Stereo,
}

impl ChannelLayout {
    /// Resolve a layout from channel counts.
    ///
    /// Returns `None` for anything other than 1→1, 1→2 and 2→2.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bandmod_core::ChannelLayout;
    ///
    /// assert_eq!(ChannelLayout::from_counts(1, 2), Some(ChannelLayout::MonoToStereo));
    /// assert_eq!(ChannelLayout::from_counts(2, 1), None);
    /// ```
    pub fn from_counts(input_channels: usize, output_channels: usize) -> Option<Self> {
        match (input_channels, output_channels) {
            (1, 1) => Some(Self::Mono),
            (1, 2) => Some(Self::MonoToStereo),
            (2, 2) => Some(Self::Stereo),
            _ => None,
        }
    }

    /// Resolve a layout and check that both frames are long enough for it.
    pub fn for_frames(
        input: &[f32],
        output: &[f32],
        input_channels: usize,
        output_channels: usize,
    ) -> Option<Self> {
        if input.len() < input_channels || output.len() < output_channels {
            return None;
        }
        Self::from_counts(input_channels, output_channels)
    }

    /// Number of input channels this layout reads.
    pub fn input_channels(self) -> usize {
        match self {
            Self::Mono | Self::MonoToStereo => 1,
            Self::Stereo => 2,
        }
    }

    /// Number of output channels this layout writes.
    pub fn output_channels(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::MonoToStereo | Self::Stereo => 2,
        }
    }

    /// Write per-channel results into an output frame.
    ///
    /// `left` is the mono result for mono-input layouts.
    #[inline]
    pub fn write(self, output: &mut [f32], left: f32, right: f32) {
        match self {
            Self::Mono => output[0] = left,
            Self::MonoToStereo => {
                output[0] = left;
                output[1] = left;
            }
            Self::Stereo => {
                output[0] = left;
                output[1] = right;
            }
        }
    }
}

/// Frame-based audio processor.
///
/// # Example
///
/// ```rust
/// use bandmod_core::{AudioProcessor, ChannelLayout};
///
/// struct Gain(f32);
///
/// impl AudioProcessor for Gain {
///     fn reset(&mut self, _sample_rate: f32) {}
///
///     fn process_frame(
///         &mut self,
///         input: &[f32],
///         output: &mut [f32],
///         input_channels: usize,
///         output_channels: usize,
///     ) -> bool {
///         let Some(layout) = ChannelLayout::for_frames(input, output, input_channels, output_channels)
///         else {
///             return false;
///         };
///         let right = if layout == ChannelLayout::Stereo { input[1] } else { input[0] };
///         layout.write(output, input[0] * self.0, right * self.0);
///         true
///     }
/// }
///
/// let mut gain = Gain(2.0);
/// let mut out = [0.0; 2];
/// assert!(gain.process_frame(&[0.25], &mut out, 1, 2));
/// assert_eq!(out, [0.5, 0.5]);
/// ```
pub trait AudioProcessor {
    /// Re-initialize all internal state for a new stream at `sample_rate`.
    fn reset(&mut self, sample_rate: f32);

    /// Process one frame.
    ///
    /// # Returns
    /// `true` if the channel configuration was handled. On `false` the
    /// output frame is left untouched.
    fn process_frame(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        input_channels: usize,
        output_channels: usize,
    ) -> bool;
}

/// Eight facets of one modulator sample.
///
/// All facets derive from one underlying phase value per render call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModulatorOutput {
    /// Normal bipolar output
    pub normal: f32,
    /// `-normal`
    pub inverted: f32,
    /// 90 degrees ahead of `normal`
    pub quad_phase_pos: f32,
    /// `-quad_phase_pos`
    pub quad_phase_neg: f32,
    /// Unipolar, peaks pinned at 1.0 (top-down modulation)
    pub unipolar_from_max: f32,
    /// Unipolar, troughs pinned at 0.0 (bottom-up modulation)
    pub unipolar_from_min: f32,
    /// Quadrature unipolar, peaks pinned at 1.0
    pub quad_phase_unipolar_from_max: f32,
    /// Quadrature unipolar, troughs pinned at 0.0
    pub quad_phase_unipolar_from_min: f32,
}

/// Input-less modulation source.
pub trait SignalModulator {
    /// Re-initialize phase and random state for a new stream at `sample_rate`.
    fn reset(&mut self, sample_rate: f32);

    /// Render the next modulator sample.
    fn render(&mut self) -> ModulatorOutput;
}
