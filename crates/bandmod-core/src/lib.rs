//! Bandmod Core - DSP primitives for the band-split / mod-filter engine
//!
//! This crate provides the per-sample building blocks the bandmod components
//! are assembled from. Everything here is allocation-free and suitable for the
//! audio thread.
//!
//! # Core Abstractions
//!
//! - [`AudioProcessor`] - Frame-based processor (`reset` + `process_frame`)
//! - [`SignalModulator`] - Input-less generator rendering a [`ModulatorOutput`]
//! - [`ChannelLayout`] - The supported input/output channel combinations
//!
//! ## Filters
//!
//! - [`Biquad`] - Transposed direct form II section for the crossover low-pass
//! - [`CrossoverFilterBank`] - Two-way Linkwitz-Riley split with exact reconstruction
//! - [`StateVariableFilter`] - TPT SVF with lowpass/bandpass/highpass taps
//! - [`EnvelopeFilter`] - Threshold-gated, envelope-modulated SVF
//!
//! ## Modulation & Dynamics
//!
//! - [`EnvelopeFollower`] - Peak amplitude detection
//! - [`WhiteNoise`] - Seeded uniform noise
//! - [`PnSequence`] - Seeded 29-bit LFSR quasi-random source
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`dry_gain`], [`saturate`], etc.
//! - [`parabolic_sine`] - Polynomial sine for LFO rendering
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! bandmod-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod crossover;
pub mod envelope;
pub mod envelope_filter;
pub mod fast_math;
pub mod math;
pub mod noise;
pub mod processor;
pub mod svf;

// Re-export main types at crate root
pub use biquad::{BUTTERWORTH_Q, Biquad, BiquadCoefficients, lowpass_coefficients};
pub use crossover::{CrossoverFilterBank, CrossoverParams, FilterBankOutput};
pub use envelope::EnvelopeFollower;
pub use envelope_filter::{
    EnvelopeFilter, EnvelopeFilterParams, FilterAlgorithm, LFO_THRESHOLD_RANGE_DB,
    MAX_FILTER_FREQUENCY, MIN_FILTER_FREQUENCY,
};
pub use fast_math::parabolic_sine;
pub use math::{
    DRY_OFF_DB, bipolar_to_unipolar, db_to_linear, dry_gain, flush_denormal, linear_to_db,
    saturate, unipolar_modulation_from_max, unipolar_modulation_from_min, unipolar_to_bipolar,
};
pub use noise::{PnSequence, WhiteNoise};
pub use processor::{AudioProcessor, ChannelLayout, MAX_CHANNELS, ModulatorOutput, SignalModulator};
pub use svf::{StateVariableFilter, SvfOutput};
