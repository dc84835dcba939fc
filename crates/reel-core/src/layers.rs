use crate::constants::*;
use crate::noise::NoiseKind;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub frequency_hz: f32,
    pub q: Option<f32>,
}

impl FilterSpec {
    pub const fn lowpass(frequency_hz: f32) -> Self {
        Self {
            kind: FilterKind::Lowpass,
            frequency_hz,
            q: None,
        }
    }

    pub const fn highpass(frequency_hz: f32) -> Self {
        Self {
            kind: FilterKind::Highpass,
            frequency_hz,
            q: None,
        }
    }

    pub const fn with_q(mut self, q: f32) -> Self {
        self.q = Some(q);
        self
    }
}

/// Which parameter an LFO drives. The LFO output is scaled by its depth and
/// added to the parameter; it is never mixed into the audible path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModTarget {
    SourceFrequency,
    FilterFrequency(usize),
    LayerGain,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LfoSpec {
    pub waveform: Waveform,
    pub rate_hz: f32,
    pub depth: f32,
    pub target: ModTarget,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceSpec {
    Noise {
        kind: NoiseKind,
        seconds: f32,
        channels: u32,
    },
    Oscillator {
        waveform: Waveform,
        frequency_hz: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    pub name: &'static str,
    pub source: SourceSpec,
    pub chain: SmallVec<[FilterSpec; 2]>,
    pub lfo: Option<LfoSpec>,
    pub gain: f32,
}

impl LayerSpec {
    pub fn generator_count(&self) -> usize {
        1 + usize::from(self.lfo.is_some())
    }

    pub fn modulation_is_wired(&self) -> bool {
        match self.lfo.map(|l| l.target) {
            Some(ModTarget::FilterFrequency(i)) => i < self.chain.len(),
            _ => true,
        }
    }
}

fn noise(kind: NoiseKind, seconds: f32) -> SourceSpec {
    SourceSpec::Noise {
        kind,
        seconds,
        channels: AMBIENT_CHANNELS,
    }
}

fn sine(frequency_hz: f32) -> SourceSpec {
    SourceSpec::Oscillator {
        waveform: Waveform::Sine,
        frequency_hz,
    }
}

pub fn ambient_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec {
            name: "vinyl-noise",
            source: noise(NoiseKind::Pink, VINYL_BUFFER_SEC),
            chain: smallvec![
                FilterSpec::highpass(200.0),
                FilterSpec::lowpass(4500.0).with_q(0.7),
            ],
            lfo: None,
            gain: 0.09,
        },
        LayerSpec {
            name: "crackle",
            source: noise(NoiseKind::Crackle, CRACKLE_BUFFER_SEC),
            chain: smallvec![FilterSpec::highpass(600.0)],
            lfo: None,
            gain: 0.18,
        },
        // A1 root with an eerie pitch wobble
        LayerSpec {
            name: "drone-root",
            source: sine(55.0),
            chain: smallvec![FilterSpec::lowpass(200.0)],
            lfo: Some(LfoSpec {
                waveform: Waveform::Sine,
                rate_hz: 0.07,
                depth: 1.5,
                target: ModTarget::SourceFrequency,
            }),
            gain: 0.06,
        },
        // E2, a fifth above the root
        LayerSpec {
            name: "drone-fifth",
            source: sine(82.4),
            chain: SmallVec::new(),
            lfo: Some(LfoSpec {
                waveform: Waveform::Triangle,
                rate_hz: 0.04,
                depth: 2.0,
                target: ModTarget::SourceFrequency,
            }),
            gain: 0.035,
        },
        // D1 sub with a breathing amplitude
        LayerSpec {
            name: "sub-pulse",
            source: sine(36.7),
            chain: SmallVec::new(),
            lfo: Some(LfoSpec {
                waveform: Waveform::Sine,
                rate_hz: 0.12,
                depth: 0.015,
                target: ModTarget::LayerGain,
            }),
            gain: 0.03,
        },
        LayerSpec {
            name: "atmosphere-pad",
            source: noise(NoiseKind::Brown, PAD_BUFFER_SEC),
            chain: smallvec![FilterSpec::lowpass(300.0).with_q(3.0)],
            lfo: Some(LfoSpec {
                waveform: Waveform::Sine,
                rate_hz: 0.03,
                depth: 100.0,
                target: ModTarget::FilterFrequency(0),
            }),
            gain: 0.07,
        },
    ]
}
