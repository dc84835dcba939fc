// Host-side tests for the ambient layer table.

use reel_core::noise::NoiseKind;
use reel_core::{ambient_layers, FilterKind, ModTarget, SourceSpec};

#[test]
fn six_named_layers() {
    let names: Vec<&str> = ambient_layers().iter().map(|l| l.name).collect();
    assert_eq!(
        names,
        vec![
            "vinyl-noise",
            "crackle",
            "drone-root",
            "drone-fifth",
            "sub-pulse",
            "atmosphere-pad",
        ]
    );
}

#[test]
fn ten_generators_in_total() {
    let total: usize = ambient_layers().iter().map(|l| l.generator_count()).sum();
    assert_eq!(total, 10);
}

#[test]
fn every_lfo_has_a_target() {
    for layer in ambient_layers() {
        assert!(layer.modulation_is_wired(), "{} LFO is dangling", layer.name);
        assert!(layer.gain > 0.0 && layer.gain < 0.2, "{} too loud", layer.name);
    }
}

#[test]
fn noise_layers_are_stereo_loops() {
    let noise: Vec<NoiseKind> = ambient_layers()
        .iter()
        .filter_map(|l| match l.source {
            SourceSpec::Noise {
                kind,
                seconds,
                channels,
            } => {
                assert_eq!(channels, 2);
                assert!(seconds >= 3.0);
                Some(kind)
            }
            SourceSpec::Oscillator { .. } => None,
        })
        .collect();
    assert_eq!(noise, vec![NoiseKind::Pink, NoiseKind::Crackle, NoiseKind::Brown]);
}

#[test]
fn drones_sit_below_a_hundred_hertz() {
    let freqs: Vec<f32> = ambient_layers()
        .iter()
        .filter_map(|l| match l.source {
            SourceSpec::Oscillator { frequency_hz, .. } => Some(frequency_hz),
            SourceSpec::Noise { .. } => None,
        })
        .collect();
    assert_eq!(freqs, vec![55.0, 82.4, 36.7]);
}

#[test]
fn pad_filter_breathes() {
    let layers = ambient_layers();
    let pad = layers.iter().find(|l| l.name == "atmosphere-pad").unwrap();
    let lfo = pad.lfo.unwrap();
    assert_eq!(lfo.target, ModTarget::FilterFrequency(0));
    assert_eq!(pad.chain[0].kind, FilterKind::Lowpass);
    assert!(lfo.depth < pad.chain[0].frequency_hz);
}
