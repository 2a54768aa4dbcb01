//! Property-based tests for the bandmod components.
//!
//! Covers split-order correction, impulse reconstruction for arbitrary
//! splits, LFO bounds and the parallel-mix identity using proptest.

use bandmod_core::{AudioProcessor, SignalModulator};
use bandmod_effects::{
    BandSplitterParams, FourWayBandSplitter, LfoMode, LfoWaveform, ModFilter, ModFilterParams,
    ModFilterType, RoutingMode, SignalRouter, SuperLfo, SuperLfoParams,
};
use proptest::prelude::*;

fn waveform(index: usize) -> LfoWaveform {
    [
        LfoWaveform::Triangle,
        LfoWaveform::Sine,
        LfoWaveform::Saw,
        LfoWaveform::Square,
        LfoWaveform::RandomSampleHold,
        LfoWaveform::QuasiRandomSampleHold,
        LfoWaveform::Noise,
        LfoWaveform::QuasiRandomNoise,
    ][index % 8]
}

fn filter_type(index: usize) -> ModFilterType {
    [ModFilterType::Lpf, ModFilterType::Bpf, ModFilterType::Hpf][index % 3]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any split triple is stored in ascending order.
    #[test]
    fn split_order_always_corrected(
        low in 20.0f32..20000.0,
        mid in 20.0f32..20000.0,
        high in 20.0f32..20000.0,
    ) {
        let mut splitter = FourWayBandSplitter::new();
        splitter.set_params(BandSplitterParams {
            low_split_hz: low,
            mid_split_hz: mid,
            high_split_hz: high,
            ..Default::default()
        });
        let p = splitter.params();
        prop_assert!(p.low_split_hz <= p.mid_split_hz, "{:?}", p);
        prop_assert!(p.mid_split_hz <= p.high_split_hz, "{:?}", p);
    }

    /// The unity-gain full mix reconstructs an impulse for any splits.
    #[test]
    fn impulse_reconstruction_any_splits(
        low in 50.0f32..2000.0,
        mid in 300.0f32..12000.0,
        high in 5000.0f32..20000.0,
    ) {
        let mut splitter = FourWayBandSplitter::new();
        splitter.reset(44100.0);
        splitter.set_params(BandSplitterParams {
            enabled: true,
            low_split_hz: low,
            mid_split_hz: mid,
            high_split_hz: high,
            ..Default::default()
        });
        let mut out = [0.0; 2];
        for n in 0..1024 {
            let x = if n == 0 { 1.0 } else { 0.0 };
            prop_assert!(splitter.process_frame(&[x], &mut out, 1, 2));
            prop_assert!((out[0] - x).abs() < 1e-5);
            prop_assert_eq!(out[0], out[1]);
        }
    }

    /// Facets stay inside the amplitude envelope for every waveform.
    #[test]
    fn lfo_facets_bounded(
        wave in 0usize..8,
        frequency_hz in 0.05f32..20.0,
        amplitude in 0.0f32..=1.0,
        seed in any::<u32>(),
    ) {
        let mut lfo = SuperLfo::with_seed(seed);
        lfo.reset(48000.0);
        lfo.set_params(SuperLfoParams {
            waveform: waveform(wave),
            mode: LfoMode::FreeRun,
            frequency_hz,
            output_amplitude: amplitude,
        });
        for _ in 0..2048 {
            let out = lfo.render();
            prop_assert!(out.normal.abs() <= amplitude + 1e-5);
            prop_assert!(out.quad_phase_pos.abs() <= amplitude + 1e-5);
            prop_assert!(out.unipolar_from_max >= 0.5 - 1e-5 && out.unipolar_from_max <= 1.0 + 1e-5);
            prop_assert!(out.unipolar_from_min >= -1e-5 && out.unipolar_from_min <= 0.5 + 1e-5);
        }
    }

    /// Parallel routing equals the average of each component alone.
    #[test]
    fn parallel_mix_identity(
        seed in any::<u32>(),
        ftype in 0usize..3,
        cutoff in 80.0f32..5000.0,
        boost_db in -5.0f32..10.0,
        dry_db in -15.0f32..0.0,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let splitter_params = BandSplitterParams {
            enabled: true,
            boost_db,
            dry_volume_db: dry_db,
            ..Default::default()
        };
        let filter_params = ModFilterParams {
            enabled: true,
            filter_type: filter_type(ftype),
            cutoff_hz: cutoff,
            lfo_enabled: true,
            dry_volume_db: dry_db,
            ..Default::default()
        };

        let mut router = SignalRouter::with_seed(seed);
        router.reset(48000.0);
        router.set_mode(RoutingMode::Parallel);
        router.set_splitter_params(splitter_params);
        router.set_mod_filter_params(filter_params);

        let mut splitter = FourWayBandSplitter::new();
        splitter.reset(48000.0);
        splitter.set_params(splitter_params);
        let mut filter = ModFilter::with_seed(seed);
        filter.reset(48000.0);
        filter.set_params(filter_params);

        let (mut out, mut s, mut f) = ([0.0; 1], [0.0; 1], [0.0; 1]);
        for &x in &input {
            prop_assert!(router.process_frame(&[x], &mut out, 1, 1));
            splitter.process_frame(&[x], &mut s, 1, 1);
            filter.process_frame(&[x], &mut f, 1, 1);
            prop_assert!((out[0] - 0.5 * (s[0] + f[0])).abs() < 1e-5);
        }
    }
}
