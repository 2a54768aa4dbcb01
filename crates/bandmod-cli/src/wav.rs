//! WAV file reading and writing.
//!
//! Samples are kept interleaved. Only mono and stereo files are accepted.

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use thiserror::Error;

/// Errors from WAV I/O.
#[derive(Debug, Error)]
pub enum WavError {
    /// Error from the WAV codec
    #[error(transparent)]
    Hound(#[from] hound::Error),

    /// More channels than the engine routes
    #[error("unsupported channel count {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// Output bit depth not in 16, 24, 32
    #[error("unsupported bit depth {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Result type for WAV operations.
pub type Result<T> = std::result::Result<T, WavError>;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample. 32 is written as float.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Frames in an interleaved buffer of `samples` values.
    pub fn frames(&self, samples: usize) -> usize {
        samples / self.channels.max(1) as usize
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a mono or stereo WAV file as interleaved f32 in \[-1, 1\].
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    if !(1..=2).contains(&hound_spec.channels) {
        return Err(WavError::UnsupportedChannels(hound_spec.channels));
    }
    let spec = WavSpec {
        channels: hound_spec.channels,
        sample_rate: hound_spec.sample_rate,
        bits_per_sample: hound_spec.bits_per_sample,
    };

    let samples = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok((samples, spec))
}

/// Write interleaved samples, clamping integer formats to full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(WavError::UnsupportedBitDepth(spec.bits_per_sample));
    }
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
