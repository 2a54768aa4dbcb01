//! Engine configuration file format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bandmod_effects::{
    BAND_COUNT, BandSplitterParams, ModFilterParams, ModFilterType, RoutingMode, SignalRouter,
    SplitView,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths;
use crate::validation::{self, ValidationResult, Violations};

/// Routing topology as written in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    /// Splitter, then filter
    #[default]
    SplitterToFilter,
    /// Filter, then splitter
    FilterToSplitter,
    /// Both on the input, averaged
    Parallel,
}

impl Routing {
    /// Every routing, in declaration order.
    pub const ALL: [Routing; 3] = [
        Routing::SplitterToFilter,
        Routing::FilterToSplitter,
        Routing::Parallel,
    ];

    /// Name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Routing::SplitterToFilter => "splitter_to_filter",
            Routing::FilterToSplitter => "filter_to_splitter",
            Routing::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Routing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Routing {
    type Err = String;

    /// Accepts the snake_case name, with `-` allowed in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Routing::ALL
            .into_iter()
            .find(|r| r.name() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown routing '{s}' (expected one of: splitter_to_filter, filter_to_splitter, parallel)"
                )
            })
    }
}

impl From<Routing> for RoutingMode {
    fn from(routing: Routing) -> Self {
        match routing {
            Routing::SplitterToFilter => RoutingMode::SplitterToFilter,
            Routing::FilterToSplitter => RoutingMode::FilterToSplitter,
            Routing::Parallel => RoutingMode::Parallel,
        }
    }
}

/// Splitter output selection as written in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// All bands mixed with dry
    #[default]
    Splitter,
    /// Lowest band only
    Lpf,
    /// Lower middle band only
    LowBand,
    /// Upper middle band only
    HighBand,
    /// Highest band only
    Hpf,
}

impl From<View> for SplitView {
    fn from(view: View) -> Self {
        match view {
            View::Splitter => SplitView::Splitter,
            View::Lpf => SplitView::Lpf,
            View::LowBand => SplitView::LowBand,
            View::HighBand => SplitView::HighBand,
            View::Hpf => SplitView::Hpf,
        }
    }
}

/// Filter response as written in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Lowpass
    #[default]
    Lpf,
    /// Bandpass
    Bpf,
    /// Highpass
    Hpf,
}

impl From<FilterType> for ModFilterType {
    fn from(filter_type: FilterType) -> Self {
        match filter_type {
            FilterType::Lpf => ModFilterType::Lpf,
            FilterType::Bpf => ModFilterType::Bpf,
            FilterType::Hpf => ModFilterType::Hpf,
        }
    }
}

/// `[splitter]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Process (true) or pass through (false).
    pub enabled: bool,
    /// Output selection.
    pub view: View,
    /// Split between the LPF band and the low band, Hz.
    pub low_split_hz: f32,
    /// Split between the low and high bands, Hz.
    pub mid_split_hz: f32,
    /// Split between the high band and the HPF band, Hz.
    pub high_split_hz: f32,
    /// Per-band volume, dB, lowest band first.
    pub volume_db: [f32; BAND_COUNT],
    /// Per-band saturation drive, lowest band first.
    pub saturation: [f32; BAND_COUNT],
    /// Dry level mixed into the full view, dB.
    pub dry_volume_db: f32,
    /// Output boost, dB.
    pub boost_db: f32,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            view: View::default(),
            low_split_hz: validation::LOW_SPLIT.default,
            mid_split_hz: validation::MID_SPLIT.default,
            high_split_hz: validation::HIGH_SPLIT.default,
            volume_db: [validation::BAND_VOLUME.default; BAND_COUNT],
            saturation: [validation::BAND_SATURATION.default; BAND_COUNT],
            dry_volume_db: validation::DRY_VOLUME.default,
            boost_db: validation::BOOST.default,
        }
    }
}

/// `[mod_filter]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModFilterConfig {
    /// Process (true) or pass through (false).
    pub enabled: bool,
    /// Filter response.
    pub filter_type: FilterType,
    /// Base cutoff, Hz.
    pub cutoff_hz: f32,
    /// Resonance.
    pub q: f32,
    /// Envelope threshold, dB.
    pub threshold_db: f32,
    /// Envelope attack, ms.
    pub attack_ms: f32,
    /// Envelope release, ms.
    pub release_ms: f32,
    /// Envelope sensitivity.
    pub sensitivity: f32,
    /// Dry level, dB.
    pub dry_volume_db: f32,
    /// Output boost, dB.
    pub boost_db: f32,
    /// Run the LFO against the envelope filter.
    pub lfo_enabled: bool,
    /// LFO rate, Hz.
    pub lfo_rate_hz: f32,
    /// LFO depth, percent.
    pub lfo_depth_pct: f32,
    /// Sweep the cutoff downward instead of upward.
    pub invert_modulation: bool,
    /// Derive Q from the cutoff.
    pub couple_q: bool,
    /// Add a second filter at ten times the cutoff.
    pub double_filter: bool,
    /// Let the LFO modulate Q as well.
    pub q_modulation: bool,
    /// Modulate the threshold instead of the cutoff.
    pub lfo_threshold: bool,
}

impl Default for ModFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filter_type: FilterType::default(),
            cutoff_hz: validation::CUTOFF.default,
            q: validation::Q.default,
            threshold_db: validation::THRESHOLD.default,
            attack_ms: validation::ATTACK.default,
            release_ms: validation::RELEASE.default,
            sensitivity: validation::SENSITIVITY.default,
            dry_volume_db: validation::DRY_VOLUME.default,
            boost_db: validation::BOOST.default,
            lfo_enabled: false,
            lfo_rate_hz: validation::LFO_RATE.default,
            lfo_depth_pct: validation::LFO_DEPTH.default,
            invert_modulation: false,
            couple_q: false,
            double_filter: false,
            q_modulation: false,
            lfo_threshold: false,
        }
    }
}

/// Complete engine setup, stored as TOML.
///
/// Every field has a default, so a partial file loads with the rest filled
/// in.
///
/// # Example
///
/// ```rust
/// use bandmod_config::{EngineConfig, Routing};
///
/// let config = EngineConfig::from_toml(r#"
///     routing = "parallel"
///
///     [mod_filter]
///     filter_type = "bpf"
///     cutoff_hz = 1200.0
/// "#).unwrap();
///
/// assert_eq!(config.routing, Routing::Parallel);
/// assert_eq!(config.mod_filter.cutoff_hz, 1200.0);
/// assert_eq!(config.splitter.low_split_hz, 400.0);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Display name.
    pub name: String,
    /// Sample rate the settings were authored at, Hz.
    pub sample_rate: u32,
    /// Routing topology.
    pub routing: Routing,
    /// LFO seed. Absent means the caller picks one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Band splitter settings.
    pub splitter: SplitterConfig,
    /// Mod filter settings.
    pub mod_filter: ModFilterConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            sample_rate: validation::SAMPLE_RATE.default as u32,
            routing: Routing::default(),
            seed: None,
            splitter: SplitterConfig::default(),
            mod_filter: ModFilterConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), name = %config.name, "loaded engine config");
        Ok(config)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the config to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            paths::ensure_dir(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value against its control range.
    ///
    /// All violations are reported, wrapped in
    /// [`ValidationError::Multiple`](crate::ValidationError::Multiple) when
    /// there is more than one.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut v = Violations::new();
        v.check(&validation::SAMPLE_RATE, "sample_rate", self.sample_rate as f32);

        let s = &self.splitter;
        v.check(&validation::LOW_SPLIT, "splitter.low_split_hz", s.low_split_hz);
        v.check(&validation::MID_SPLIT, "splitter.mid_split_hz", s.mid_split_hz);
        v.check(&validation::HIGH_SPLIT, "splitter.high_split_hz", s.high_split_hz);
        for (i, &db) in s.volume_db.iter().enumerate() {
            v.check(&validation::BAND_VOLUME, &format!("splitter.volume_db[{i}]"), db);
        }
        for (i, &drive) in s.saturation.iter().enumerate() {
            v.check(
                &validation::BAND_SATURATION,
                &format!("splitter.saturation[{i}]"),
                drive,
            );
        }
        v.check(&validation::DRY_VOLUME, "splitter.dry_volume_db", s.dry_volume_db);
        v.check(&validation::BOOST, "splitter.boost_db", s.boost_db);

        let m = &self.mod_filter;
        v.check(&validation::CUTOFF, "mod_filter.cutoff_hz", m.cutoff_hz);
        v.check(&validation::Q, "mod_filter.q", m.q);
        v.check(&validation::THRESHOLD, "mod_filter.threshold_db", m.threshold_db);
        v.check(&validation::ATTACK, "mod_filter.attack_ms", m.attack_ms);
        v.check(&validation::RELEASE, "mod_filter.release_ms", m.release_ms);
        v.check(&validation::SENSITIVITY, "mod_filter.sensitivity", m.sensitivity);
        v.check(&validation::DRY_VOLUME, "mod_filter.dry_volume_db", m.dry_volume_db);
        v.check(&validation::BOOST, "mod_filter.boost_db", m.boost_db);
        v.check(&validation::LFO_RATE, "mod_filter.lfo_rate_hz", m.lfo_rate_hz);
        v.check(&validation::LFO_DEPTH, "mod_filter.lfo_depth_pct", m.lfo_depth_pct);

        v.finish()
    }

    /// Splitter parameters for [`FourWayBandSplitter::set_params`](bandmod_effects::FourWayBandSplitter::set_params).
    pub fn splitter_params(&self) -> BandSplitterParams {
        let s = &self.splitter;
        BandSplitterParams {
            low_split_hz: s.low_split_hz,
            mid_split_hz: s.mid_split_hz,
            high_split_hz: s.high_split_hz,
            view: s.view.into(),
            volume_db: s.volume_db,
            saturation: s.saturation,
            dry_volume_db: s.dry_volume_db,
            enabled: s.enabled,
            boost_db: s.boost_db,
        }
    }

    /// Filter parameters for [`ModFilter::set_params`](bandmod_effects::ModFilter::set_params).
    pub fn mod_filter_params(&self) -> ModFilterParams {
        let m = &self.mod_filter;
        ModFilterParams {
            cutoff_hz: m.cutoff_hz,
            q: m.q,
            threshold_db: m.threshold_db,
            attack_ms: m.attack_ms,
            release_ms: m.release_ms,
            sensitivity: m.sensitivity,
            filter_type: m.filter_type.into(),
            enabled: m.enabled,
            dry_volume_db: m.dry_volume_db,
            boost_db: m.boost_db,
            lfo_enabled: m.lfo_enabled,
            lfo_rate_hz: m.lfo_rate_hz,
            lfo_depth_pct: m.lfo_depth_pct,
            invert_modulation: m.invert_modulation,
            couple_q: m.couple_q,
            double_filter: m.double_filter,
            q_modulation: m.q_modulation,
            lfo_threshold: m.lfo_threshold,
        }
    }

    /// Routing mode for [`SignalRouter::set_mode`].
    pub fn routing_mode(&self) -> RoutingMode {
        self.routing.into()
    }

    /// Push routing, parameters and seed into `router`.
    ///
    /// The seed takes effect at the router's next `reset`.
    pub fn apply(&self, router: &mut SignalRouter) {
        router.set_mode(self.routing_mode());
        router.set_splitter_params(self.splitter_params());
        router.set_mod_filter_params(self.mod_filter_params());
        if let Some(seed) = self.seed {
            router.set_seed(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn default_matches_control_table() {
        let config = EngineConfig::default();
        assert_eq!(config.name, "Default");
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.routing, Routing::SplitterToFilter);
        assert_eq!(config.seed, None);
        assert!(config.splitter.enabled);
        assert!(config.mod_filter.enabled);
        assert_eq!(config.splitter.saturation, [1.0; 4]);
        assert_eq!(config.mod_filter.release_ms, 80.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn toml_round_trip() {
        let mut config = EngineConfig {
            name: "Wah".to_string(),
            routing: Routing::FilterToSplitter,
            seed: Some(99),
            ..Default::default()
        };
        config.splitter.view = View::HighBand;
        config.splitter.volume_db = [-6.0, 0.0, 3.0, -60.0];
        config.mod_filter.filter_type = FilterType::Bpf;
        config.mod_filter.lfo_enabled = true;
        config.mod_filter.double_filter = true;

        let text = config.to_toml().unwrap();
        assert!(text.contains("routing = \"filter_to_splitter\""), "{text}");
        assert!(text.contains("view = \"high_band\""), "{text}");
        assert!(text.contains("filter_type = \"bpf\""), "{text}");
        assert_eq!(EngineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn seed_omitted_when_absent() {
        let text = EngineConfig::default().to_toml().unwrap();
        assert!(!text.contains("seed"), "{text}");
    }

    #[test]
    fn unknown_enum_value_is_parse_error() {
        let err = EngineConfig::from_toml("routing = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn validate_reports_every_violation() {
        let mut config = EngineConfig::default();
        config.splitter.low_split_hz = 10.0;
        config.splitter.saturation[2] = 20.0;
        config.mod_filter.q = 0.0;

        let err = config.validate().unwrap_err();
        let ValidationError::Multiple(ref errors) = err else {
            panic!("expected Multiple, got {err:?}");
        };
        assert_eq!(errors.len(), 3);
        let msg = err.to_string();
        assert!(msg.contains("splitter.low_split_hz"), "{msg}");
        assert!(msg.contains("splitter.saturation[2]"), "{msg}");
        assert!(msg.contains("mod_filter.q"), "{msg}");
    }

    #[test]
    fn validate_single_violation_is_not_wrapped() {
        let mut config = EngineConfig::default();
        config.mod_filter.lfo_depth_pct = 101.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OutOfRange { ref param, .. }) if param == "mod_filter.lfo_depth_pct"
        ));
    }

    #[test]
    fn routing_parses_names() {
        assert_eq!("parallel".parse::<Routing>(), Ok(Routing::Parallel));
        assert_eq!(
            "Filter-To-Splitter".parse::<Routing>(),
            Ok(Routing::FilterToSplitter)
        );
        assert!("serial".parse::<Routing>().is_err());
        for routing in Routing::ALL {
            assert_eq!(routing.to_string().parse::<Routing>(), Ok(routing));
        }
    }

    #[test]
    fn params_carry_every_field() {
        let mut config = EngineConfig::default();
        config.splitter.view = View::Hpf;
        config.splitter.boost_db = 4.0;
        config.mod_filter.filter_type = FilterType::Hpf;
        config.mod_filter.lfo_threshold = true;
        config.mod_filter.lfo_rate_hz = 12.0;

        let s = config.splitter_params();
        assert_eq!(s.view, SplitView::Hpf);
        assert_eq!(s.boost_db, 4.0);
        assert!(s.enabled);

        let m = config.mod_filter_params();
        assert_eq!(m.filter_type, ModFilterType::Hpf);
        assert!(m.lfo_threshold);
        assert_eq!(m.lfo_rate_hz, 12.0);
        assert_eq!(m.cutoff_hz, 800.0);
    }

    #[test]
    fn apply_configures_router() {
        let config = EngineConfig {
            routing: Routing::Parallel,
            ..Default::default()
        };
        let mut router = SignalRouter::new();
        config.apply(&mut router);
        assert_eq!(router.mode(), RoutingMode::Parallel);
        assert_eq!(router.splitter().params(), config.splitter_params());
        assert!(router.mod_filter().params().enabled);
    }

    #[test]
    fn double_filter_sits_at_ten_times_cutoff() {
        let mut config = EngineConfig::default();
        config.mod_filter.cutoff_hz = 600.0;
        config.mod_filter.double_filter = true;
        let mut router = SignalRouter::new();
        config.apply(&mut router);
        assert!(router.mod_filter().params().double_filter);
        assert_eq!(router.mod_filter().doubled_filter_params().cutoff_hz, 6000.0);
    }
}
