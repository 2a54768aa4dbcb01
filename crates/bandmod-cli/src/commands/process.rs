//! File-based processing command.

use crate::wav::{WavSpec, read_wav, write_wav};
use anyhow::Context;
use bandmod_config::{EngineConfig, Routing, paths};
use bandmod_core::{AudioProcessor, linear_to_db};
use bandmod_effects::{DEFAULT_SEED, SignalRouter};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Frames handed to the router per progress update.
const BLOCK_FRAMES: usize = 4096;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Engine config (TOML). Defaults to the user config file if present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Routing override: splitter_to_filter, filter_to_splitter or parallel
    #[arg(short, long)]
    routing: Option<Routing>,

    /// LFO seed override. Falls back to the config, then the clock.
    #[arg(long)]
    seed: Option<u32>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("invalid bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let (samples, spec) = read_wav(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let channels = spec.channels as usize;
    let frames = spec.frames(samples.len());
    tracing::info!(
        path = %args.input.display(),
        channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames,
        "input"
    );

    let mut config = load_config(args.config.as_ref())?;
    if let Err(e) = config.validate() {
        for violation in e.errors() {
            tracing::warn!("{violation}");
        }
    }
    if let Some(routing) = args.routing {
        config.routing = routing;
    }
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);
    config.seed = Some(seed);

    let mut router = SignalRouter::new();
    config.apply(&mut router);
    router.reset(spec.sample_rate as f32);
    tracing::info!(routing = %config.routing, seed, config = %config.name, "engine");

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut output = vec![0.0; frames * channels];
    let block = BLOCK_FRAMES * channels;
    for (in_chunk, out_chunk) in samples.chunks(block).zip(output.chunks_mut(block)) {
        if !router.process_interleaved(in_chunk, out_chunk, channels, channels) {
            anyhow::bail!("router rejected a {channels}-channel frame");
        }
        pb.inc(spec.frames(in_chunk.len()) as u64);
    }
    pb.finish_and_clear();

    let input_stats = Stats::measure(&samples);
    let output_stats = Stats::measure(&output);
    println!("Stats:");
    println!("  Input:  {input_stats}");
    println!("  Output: {output_stats}");

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };
    write_wav(&args.output, &output, out_spec)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::info!(
        path = %args.output.display(),
        bits = out_spec.bits_per_sample,
        "output"
    );

    Ok(())
}

fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    let path = match explicit {
        Some(path) => Some(path.clone()),
        None => paths::find_default_config(),
    };
    match path {
        Some(path) => {
            let config = EngineConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::info!(path = %path.display(), name = %config.name, "config");
            Ok(config)
        }
        None => {
            tracing::info!("no config file, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(DEFAULT_SEED, |d| d.subsec_nanos() ^ d.as_secs() as u32)
}

/// Peak and RMS of a buffer.
struct Stats {
    peak: f32,
    rms: f32,
}

impl Stats {
    fn measure(samples: &[f32]) -> Self {
        let peak = samples.iter().map(|s| s.abs()).fold(0.0, f32::max);
        let rms = if samples.is_empty() {
            0.0
        } else {
            let sum: f32 = samples.iter().map(|s| s * s).sum();
            (sum / samples.len() as f32).sqrt()
        };
        Self { peak, rms }
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RMS {:.1} dB, Peak {:.1} dB",
            linear_to_db(self.rms),
            linear_to_db(self.peak)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_full_scale_square() {
        let stats = Stats::measure(&[1.0, -1.0, 1.0, -1.0]);
        assert_eq!(stats.peak, 1.0);
        assert_eq!(stats.rms, 1.0);
        assert_eq!(stats.to_string(), "RMS 0.0 dB, Peak 0.0 dB");
    }

    #[test]
    fn stats_of_silence() {
        let stats = Stats::measure(&[]);
        let floor = format!("{:.1}", linear_to_db(0.0));
        assert_eq!(stats.to_string(), format!("RMS {floor} dB, Peak {floor} dB"));
        assert!(linear_to_db(0.0) <= -199.0);
    }

    #[test]
    fn bit_depth_parser() {
        assert_eq!(parse_bit_depth("24"), Ok(24));
        assert!(parse_bit_depth("8").is_err());
        assert!(parse_bit_depth("loud").is_err());
    }

    #[test]
    fn stats_of_half_scale_square() {
        let stats = Stats::measure(&[0.5, -0.5, 0.5, -0.5]);
        assert_eq!(stats.to_string(), "RMS -6.0 dB, Peak -6.0 dB");
    }
}
