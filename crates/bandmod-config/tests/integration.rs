//! Integration tests for bandmod-config.
//!
//! Configs are written to disk, read back, and driven through a router.

use bandmod_config::{ConfigError, EngineConfig, FilterType, Routing, ValidationError, View};
use bandmod_core::AudioProcessor;
use bandmod_effects::{RoutingMode, SignalRouter};
use tempfile::TempDir;

fn render(router: &mut SignalRouter, frames: usize) -> Vec<f32> {
    let input: Vec<f32> = (0..frames * 2)
        .map(|i| ((i / 2) as f32 * 0.07).sin() * 0.5)
        .collect();
    let mut output = vec![0.0; input.len()];
    assert!(router.process_interleaved(&input, &mut output, 2, 2));
    output
}

#[test]
fn save_and_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("engine.toml");

    let mut config = EngineConfig {
        name: "Round Trip".to_string(),
        routing: Routing::Parallel,
        seed: Some(7),
        ..Default::default()
    };
    config.splitter.view = View::LowBand;
    config.mod_filter.filter_type = FilterType::Bpf;
    config.mod_filter.lfo_enabled = true;

    config.save(&path).unwrap();
    let loaded = EngineConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn save_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("dir").join("engine.toml");

    EngineConfig::default().save(&path).unwrap();
    assert!(path.is_file());
}

#[test]
fn load_missing_file_is_read_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.toml");

    let err = EngineConfig::load(&path).unwrap_err();
    assert!(
        matches!(err, ConfigError::ReadFile { path: ref p, .. } if p == &path),
        "got {err:?}"
    );
}

#[test]
fn load_malformed_file_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    std::fs::write(&path, "[splitter\nenabled = true").unwrap();

    assert!(matches!(
        EngineConfig::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}

#[test]
fn partial_file_fills_defaults_and_validates() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("partial.toml");
    std::fs::write(
        &path,
        r#"
routing = "filter_to_splitter"

[splitter]
volume_db = [-3.0, 0.0, 0.0, 2.0]

[mod_filter]
threshold_db = -24.0
"#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.routing, Routing::FilterToSplitter);
    assert_eq!(config.splitter.volume_db, [-3.0, 0.0, 0.0, 2.0]);
    assert_eq!(config.splitter.mid_split_hz, 1000.0);
    assert_eq!(config.mod_filter.threshold_db, -24.0);
    assert_eq!(config.mod_filter.q, 2.0);
    config.validate().unwrap();
}

#[test]
fn invalid_file_loads_but_fails_validation() {
    let config = EngineConfig::from_toml(
        r#"
[mod_filter]
cutoff_hz = 9000.0
"#,
    )
    .unwrap();

    let err: ConfigError = config.validate().unwrap_err().into();
    let ConfigError::Validation(ValidationError::OutOfRange { param, min, max, .. }) = err else {
        panic!("expected an out-of-range validation error");
    };
    assert_eq!(param, "mod_filter.cutoff_hz");
    assert_eq!((min, max), (80.0, 5000.0));
}

#[test]
fn applied_config_matches_manual_setup() {
    let mut config = EngineConfig {
        routing: Routing::FilterToSplitter,
        seed: Some(1234),
        ..Default::default()
    };
    config.mod_filter.lfo_enabled = true;
    config.splitter.boost_db = 3.0;

    let mut from_config = SignalRouter::new();
    config.apply(&mut from_config);
    from_config.reset(48000.0);

    let mut manual = SignalRouter::with_seed(1234);
    manual.set_mode(RoutingMode::FilterToSplitter);
    manual.set_splitter_params(config.splitter_params());
    manual.set_mod_filter_params(config.mod_filter_params());
    manual.reset(48000.0);

    assert_eq!(render(&mut from_config, 2048), render(&mut manual, 2048));
}

#[test]
fn seeded_config_renders_reproducibly() {
    let mut config = EngineConfig {
        seed: Some(42),
        ..Default::default()
    };
    config.mod_filter.lfo_enabled = true;

    let run = || {
        let mut router = SignalRouter::new();
        config.apply(&mut router);
        router.reset(44100.0);
        render(&mut router, 4096)
    };
    let a = run();
    assert!(a.iter().all(|s| s.is_finite()));
    assert_eq!(a, run());
}
