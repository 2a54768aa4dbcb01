//! Integration tests for bandmod-cli.
//!
//! Each test runs the `bandmod` binary against files in a temp directory.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the `bandmod` binary built by cargo.
fn bandmod_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bandmod"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn run(args: &[&str]) -> Output {
    bandmod_bin()
        .args(args)
        .output()
        .expect("failed to run bandmod")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}

/// Write a 16-bit sine test file with `channels` channels.
fn write_test_wav(path: &Path, channels: u16, frames: usize) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 48000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let x = (i as f32 * 2.0 * std::f32::consts::PI * 220.0 / 48000.0).sin() * 0.5;
        for ch in 0..channels {
            let v = if ch == 0 { x } else { -x };
            writer.write_sample((v * 32767.0) as i16).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn read_samples(path: &Path) -> (hound::WavSpec, Vec<f32>) {
    let reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader
        .into_samples::<f32>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    (spec, samples)
}

fn default_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("engine.toml");
    let out = run(&["init-config", path_str(&path)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    path
}

#[test]
fn cli_help_lists_commands() {
    let out = run(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for cmd in ["process", "init-config", "check-config"] {
        assert!(stdout.contains(cmd), "help should mention '{cmd}'");
    }
}

#[test]
fn cli_init_config_then_check() {
    let temp = TempDir::new().unwrap();
    let path = default_config(&temp);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[splitter]"));
    assert!(text.contains("[mod_filter]"));

    let out = run(&["check-config", path_str(&path)]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("OK"));
}

#[test]
fn cli_init_config_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    let path = default_config(&temp);

    let out = run(&["init-config", path_str(&path)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));

    let out = run(&["init-config", "--force", path_str(&path)]);
    assert!(out.status.success());
}

#[test]
fn cli_check_config_reports_violations() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    std::fs::write(
        &path,
        "[splitter]\nboost_db = 20.0\n\n[mod_filter]\nattack_ms = 50.0\n",
    )
    .unwrap();

    let out = run(&["check-config", path_str(&path)]);
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("splitter.boost_db"), "{stdout}");
    assert!(stdout.contains("mod_filter.attack_ms"), "{stdout}");
    assert!(String::from_utf8_lossy(&out.stderr).contains("2 parameter(s) out of range"));
}

#[test]
fn cli_process_stereo_file() {
    let temp = TempDir::new().unwrap();
    let config = default_config(&temp);
    let input = temp.path().join("in.wav");
    let output = temp.path().join("out.wav");
    write_test_wav(&input, 2, 4800);

    let out = run(&[
        "process",
        path_str(&input),
        path_str(&output),
        "--config",
        path_str(&config),
        "--seed",
        "11",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Output:"));

    let (spec, samples) = read_samples(&output);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(samples.len(), 4800 * 2);
    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().any(|&s| s != 0.0));
}

#[test]
fn cli_process_is_reproducible_with_seed() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("lfo.toml");
    std::fs::write(&config, "[mod_filter]\nlfo_enabled = true\n").unwrap();
    let input = temp.path().join("in.wav");
    write_test_wav(&input, 1, 9600);

    let render = |name: &str| {
        let output = temp.path().join(name);
        let out = run(&[
            "process",
            path_str(&input),
            path_str(&output),
            "--config",
            path_str(&config),
            "--routing",
            "parallel",
            "--seed",
            "2024",
        ]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        read_samples(&output).1
    };

    let a = render("a.wav");
    assert_eq!(a.len(), 9600);
    assert_eq!(a, render("b.wav"));
}

#[test]
fn cli_process_writes_requested_bit_depth() {
    let temp = TempDir::new().unwrap();
    let config = default_config(&temp);
    let input = temp.path().join("in.wav");
    let output = temp.path().join("out16.wav");
    write_test_wav(&input, 1, 1000);

    let out = run(&[
        "process",
        path_str(&input),
        path_str(&output),
        "--config",
        path_str(&config),
        "--bit-depth",
        "16",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let spec = hound::WavReader::open(&output).unwrap().spec();
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
}

#[test]
fn cli_process_rejects_multichannel_input() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("quad.wav");
    let output = temp.path().join("out.wav");
    write_test_wav(&input, 4, 100);

    let out = run(&["process", path_str(&input), path_str(&output)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported channel count 4"));
    assert!(!output.exists());
}

#[test]
fn cli_process_rejects_bad_routing() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.wav");
    write_test_wav(&input, 1, 10);

    let out = run(&[
        "process",
        path_str(&input),
        path_str(&temp.path().join("out.wav")),
        "--routing",
        "sideways",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown routing"));
}
