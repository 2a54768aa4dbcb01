//! Bandmod Effects - the band-split / mod-filter engine
//!
//! Components built on bandmod-core:
//!
//! - [`FourWayBandSplitter`] - Three cascaded crossovers, four bands with volume and saturation
//! - [`ModFilter`] - Envelope filter with LFO modulation and an optional doubled filter
//! - [`SuperLfo`] - Eight-waveform LFO rendering eight output facets
//! - [`SignalRouter`] - Splitter→filter, filter→splitter or parallel composition
//!
//! ## Example
//!
//! ```rust
//! use bandmod_core::AudioProcessor;
//! use bandmod_effects::{BandSplitterParams, ModFilterParams, RoutingMode, SignalRouter};
//!
//! let mut router = SignalRouter::with_seed(42);
//! router.reset(48000.0);
//! router.set_mode(RoutingMode::FilterToSplitter);
//! router.set_splitter_params(BandSplitterParams { enabled: true, ..Default::default() });
//! router.set_mod_filter_params(ModFilterParams { enabled: true, ..Default::default() });
//!
//! let mut out = [0.0; 2];
//! assert!(router.process_frame(&[0.25, -0.25], &mut out, 2, 2));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `bandmod-core/std`
//! - `tracing`: debug events for resets, routing changes and split-order corrections

#![cfg_attr(not(feature = "std"), no_std)]

pub mod band_splitter;
pub mod mod_filter;
pub mod router;
pub mod super_lfo;

pub use band_splitter::{BAND_COUNT, Band, BandSplitterParams, FourWayBandSplitter, SplitView};
pub use mod_filter::{LFO_MOD_MAX_HZ, LFO_MOD_MIN_HZ, ModFilter, ModFilterParams, ModFilterType};
pub use router::{RoutingMode, SignalRouter};
pub use super_lfo::{DEFAULT_SEED, LfoMode, LfoWaveform, SuperLfo, SuperLfoParams};
