//! Configuration for the bandmod effects engine.
//!
//! An [`EngineConfig`] describes the routing topology, the LFO seed and the
//! settings of both processors. It is stored as TOML, validated against the
//! control ranges in [`validation`], and pushed into a
//! [`SignalRouter`](bandmod_effects::SignalRouter) with
//! [`EngineConfig::apply`].
//!
//! # Example
//!
//! ```rust,no_run
//! use bandmod_config::{EngineConfig, paths};
//! use bandmod_core::AudioProcessor;
//! use bandmod_effects::SignalRouter;
//!
//! let config = EngineConfig::load(paths::default_config_path()).unwrap();
//! config.validate().unwrap();
//!
//! let mut router = SignalRouter::new();
//! config.apply(&mut router);
//! router.reset(config.sample_rate as f32);
//! ```

mod engine_config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

/// Parameter range validation.
pub mod validation;

pub use engine_config::{
    EngineConfig, FilterType, ModFilterConfig, Routing, SplitterConfig, View,
};
pub use error::ConfigError;
pub use paths::{default_config_path, user_config_dir};
pub use validation::{ParamRange, ValidationError, ValidationResult};
